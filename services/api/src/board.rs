use crate::infra::{client_context, credential_notice, parse_bucket, parse_sort, review_location};
use chrono::Utc;
use clap::Args;
use hire_desk::client::{ClientContext, HttpScreeningSource, ScreeningSource};
use hire_desk::config::AppConfig;
use hire_desk::error::AppError;
use hire_desk::workflows::screening::{
    derive_view, ApplicationId, LinkOpener, MatchBucket, ReviewNavigator, ScreeningBoard,
    ScreeningCard, ScreeningFeed, ScreeningQuery, ScreeningViewModel, SortKey,
};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Case-insensitive text matched against candidate name, email and job title
    #[arg(long, default_value = "")]
    pub(crate) search: String,
    /// Match bucket: all, high, medium or low
    #[arg(long, default_value = "all", value_parser = parse_bucket)]
    pub(crate) bucket: MatchBucket,
    /// Sort key: date-desc, date-asc, match-desc, match-asc, experience-desc or experience-asc
    #[arg(long, default_value = "date-desc", value_parser = parse_sort)]
    pub(crate) sort: SortKey,
    /// Bearer token for the applicant-tracking API (defaults to APP_API_TOKEN)
    #[arg(long)]
    pub(crate) token: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReviewArgs {
    /// Application identifier shown in the screening list
    pub(crate) application_id: String,
    /// Bearer token for the applicant-tracking API (defaults to APP_API_TOKEN)
    #[arg(long)]
    pub(crate) token: Option<String>,
}

/// Prints where the reviewer should go next.
struct TerminalNavigator {
    review_base_url: Option<String>,
}

impl ReviewNavigator for TerminalNavigator {
    fn open_review(&self, application_id: &ApplicationId) {
        println!(
            "Review: {}",
            review_location(self.review_base_url.as_deref(), application_id)
        );
    }
}

struct TerminalLinkOpener;

impl LinkOpener for TerminalLinkOpener {
    fn open_external(&self, url: &str) {
        println!("Resume: {url}");
    }
}

fn warn_on_stale_credential(context: &ClientContext) {
    if let Some(notice) = credential_notice(context, Utc::now()) {
        warn!(base_url = %context.base_url(), "{notice}");
        eprintln!("{notice}");
    }
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let ListArgs {
        search,
        bucket,
        sort,
        token,
    } = args;

    let config = AppConfig::load()?;
    let context = client_context(&config.api, token);
    warn_on_stale_credential(&context);
    let feed = ScreeningFeed::new(Arc::new(HttpScreeningSource::new(config.api.timeout)?));

    println!("Loading pending screenings...");
    let state = feed.refresh(&context).await;
    if let Some(message) = state.error_message() {
        eprintln!("{message}");
    }

    let board = derive_view(&feed.view_model(ScreeningQuery {
        search,
        bucket,
        sort,
    }));

    let stdout = io::stdout();
    render_board(&mut stdout.lock(), &board)?;
    Ok(())
}

pub(crate) async fn run_review(args: ReviewArgs) -> Result<(), AppError> {
    let ReviewArgs {
        application_id,
        token,
    } = args;

    let config = AppConfig::load()?;
    let context = client_context(&config.api, token);
    warn_on_stale_credential(&context);
    let source = HttpScreeningSource::new(config.api.timeout)?;

    let records = source.fetch_pending(&context).await?;
    let board = derive_view(&ScreeningViewModel::new(records));
    let id = ApplicationId(application_id);
    let card = board
        .card(&id)
        .ok_or_else(|| AppError::UnknownApplication(id.0.clone()))?;

    let stdout = io::stdout();
    render_card(&mut stdout.lock(), card)?;

    card.request_review(&TerminalNavigator {
        review_base_url: config.api.review_base_url.clone(),
    });
    if !card.open_resume(&TerminalLinkOpener) {
        println!("Resume: not provided");
    }

    Ok(())
}

pub(crate) fn render_board<W: Write>(out: &mut W, board: &ScreeningBoard) -> io::Result<()> {
    writeln!(out, "Pending screenings")?;
    writeln!(
        out,
        "Total: {} | High match: {} | Showing: {}",
        board.stats.total, board.stats.high_match, board.filtered
    )?;
    writeln!(
        out,
        "Filters: search=\"{}\" bucket={} sort={}",
        board.query.search,
        board.query.bucket.as_str(),
        board.query.sort.as_str()
    )?;

    if board.cards.is_empty() {
        writeln!(out, "\nNo pending screenings match the current filters.")?;
        return Ok(());
    }

    for card in &board.cards {
        writeln!(out)?;
        render_card(out, card)?;
    }

    Ok(())
}

fn render_card<W: Write>(out: &mut W, card: &ScreeningCard) -> io::Result<()> {
    writeln!(
        out,
        "[{} {}%] {} <{}> - {} ({})",
        card.match_label,
        card.match_percentage,
        display_or(&card.candidate_name, "Unnamed candidate"),
        display_or(&card.candidate_email, "no email"),
        display_or(&card.job_title, "Untitled role"),
        card.application_id
    )?;

    let mut details = vec![
        format!("applied {}", card.applied_on),
        card.experience_label.clone(),
        card.skills_label.clone(),
    ];
    if let Some(company) = &card.current_company {
        details.push(company.clone());
    }
    if card.previously_screened {
        details.push("previously screened".to_string());
    }
    writeln!(out, "    {}", details.join(" | "))
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
