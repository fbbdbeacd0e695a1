//! End-to-end checks for the HTTP fetch adapter against an in-process upstream.
//!
//! Each test binds a throwaway axum server on an ephemeral port that mimics the
//! applicant-tracking API, then drives the public client, feed and view APIs.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use hire_desk::client::{ClientContext, Credential};
    use reqwest::Url;
    use serde_json::Value;

    #[derive(Clone)]
    pub(super) struct Upstream {
        pub(super) status: StatusCode,
        pub(super) body: Value,
        pub(super) seen_authorization: Arc<Mutex<Vec<String>>>,
    }

    impl Upstream {
        pub(super) fn new(status: StatusCode, body: Value) -> Self {
            Self {
                status,
                body,
                seen_authorization: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(super) fn authorizations(&self) -> Vec<String> {
            self.seen_authorization
                .lock()
                .expect("upstream mutex poisoned")
                .clone()
        }
    }

    async fn pending(
        axum::extract::State(upstream): axum::extract::State<Upstream>,
        headers: HeaderMap,
    ) -> Response {
        if let Some(value) = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
        {
            upstream
                .seen_authorization
                .lock()
                .expect("upstream mutex poisoned")
                .push(value.to_string());
        }
        (upstream.status, Json(upstream.body.clone())).into_response()
    }

    /// Serve `upstream` under `/api/pending-screenings`, returning the API base URL.
    pub(super) async fn spawn(upstream: Upstream) -> Url {
        let app = Router::new()
            .route("/api/pending-screenings", get(pending))
            .with_state(upstream);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("upstream serves");
        });
        Url::parse(&format!("http://{addr}/api/")).expect("valid base url")
    }

    pub(super) fn context(base: Url) -> ClientContext {
        ClientContext::new(base).with_credential(Credential::new("reviewer-token"))
    }
}

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use hire_desk::client::{ClientError, HttpScreeningSource, ScreeningSource};
use hire_desk::workflows::screening::{
    derive_view, LoadState, MatchBucket, ScreeningFeed, ScreeningQuery, SortKey,
};
use serde_json::json;

use common::{context, spawn, Upstream};

fn source() -> HttpScreeningSource {
    HttpScreeningSource::new(Duration::from_secs(5)).expect("client builds")
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_and_normalizes_with_bearer_token() {
    let upstream = Upstream::new(
        StatusCode::OK,
        json!([
            {
                "_id": "app-1",
                "candidateName": "Priya Raman",
                "candidateEmail": "priya@example.com",
                "jobTitle": "Platform Engineer",
                "appliedAt": "2024-03-01T09:30:00Z",
                "totalExperience": 6,
                "matchingSkills": 4,
                "requiredSkills": 5
            },
            {
                "_id": "app-2",
                "candidateName": "Tomas Berg",
                "jobTitle": "Data Engineer",
                "appliedAt": "2024-01-15",
                "matchingSkills": 0,
                "requiredSkills": 0
            },
            42
        ]),
    );
    let base = spawn(upstream.clone()).await;

    let screenings = source()
        .fetch_pending(&context(base))
        .await
        .expect("fetch succeeds");

    assert_eq!(screenings.len(), 2);
    assert_eq!(screenings[0].match_percentage(), 80);
    assert_eq!(screenings[1].candidate_email, "");
    assert_eq!(screenings[1].match_percentage(), 0);
    assert_eq!(upstream.authorizations(), vec!["Bearer reviewer-token"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_surfaces_server_message() {
    let upstream = Upstream::new(
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Session expired, please log in again" }),
    );
    let base = spawn(upstream).await;

    let err = source()
        .fetch_pending(&context(base))
        .await
        .expect_err("401 is an error");

    match &err {
        ClientError::Api { status, .. } => assert_eq!(*status, StatusCode::UNAUTHORIZED),
        other => panic!("expected api error, got {other:?}"),
    }
    assert_eq!(err.user_message(), "Session expired, please log in again");
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_without_message_uses_generic_text() {
    let upstream = Upstream::new(StatusCode::BAD_GATEWAY, json!({ "detail": "upstream" }));
    let base = spawn(upstream).await;

    let err = source()
        .fetch_pending(&context(base))
        .await
        .expect_err("502 is an error");

    assert_eq!(err.user_message(), "Unable to load pending screenings");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let base = reqwest::Url::parse(&format!("http://{addr}/api/")).expect("valid url");

    let err = source()
        .fetch_pending(&context(base))
        .await
        .expect_err("nothing listening");

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.status_hint(), StatusCode::BAD_GATEWAY);
}

#[tokio::test(flavor = "multi_thread")]
async fn feed_and_view_render_fetched_board() {
    let upstream = Upstream::new(
        StatusCode::OK,
        json!({
            "screenings": [
                { "applicationId": "a", "candidateName": "Ada", "jobTitle": "Engineer",
                  "appliedAt": "2024-03-01", "matchingSkills": 4, "requiredSkills": 5 },
                { "applicationId": "b", "candidateName": "Bea", "jobTitle": "Engineer",
                  "appliedAt": "2024-01-15", "matchingSkills": 0, "requiredSkills": 0 },
                { "applicationId": "c", "candidateName": "Cyd", "jobTitle": "Engineer",
                  "appliedAt": "2024-02-10", "matchingSkills": 2, "requiredSkills": 4 }
            ]
        }),
    );
    let base = spawn(upstream).await;
    let feed = ScreeningFeed::new(Arc::new(source()));

    let state = feed.refresh(&context(base)).await;
    assert!(matches!(state, LoadState::Ready(_)));

    let board = derive_view(&feed.view_model(ScreeningQuery {
        search: String::new(),
        bucket: MatchBucket::All,
        sort: SortKey::DateAsc,
    }));
    let order: Vec<&str> = board
        .cards
        .iter()
        .map(|card| card.application_id.as_str())
        .collect();
    assert_eq!(order, vec!["b", "c", "a"]);
    assert_eq!(board.stats.high_match, 1);

    let medium = derive_view(&feed.view_model(ScreeningQuery {
        bucket: MatchBucket::Medium,
        ..ScreeningQuery::default()
    }));
    assert_eq!(medium.filtered, 1);
    assert_eq!(medium.cards[0].application_id.as_str(), "c");
}
