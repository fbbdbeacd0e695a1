use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use reqwest::Url;
use serde_json::json;
use tracing::warn;

use super::view::{derive_view, ScreeningQuery, ScreeningViewModel};
use crate::client::{ClientContext, Credential, ScreeningSource};

/// Shared state for the pending-screenings facade.
pub struct ScreeningRouterState<S> {
    source: Arc<S>,
    api_base_url: Url,
}

impl<S> Clone for ScreeningRouterState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            api_base_url: self.api_base_url.clone(),
        }
    }
}

/// Router exposing the derived pending-screenings board. The caller's bearer
/// token is forwarded upstream unchanged.
pub fn screening_router<S>(source: Arc<S>, api_base_url: Url) -> Router
where
    S: ScreeningSource + 'static,
{
    Router::new()
        .route("/api/v1/screenings/pending", get(pending_board_handler::<S>))
        .with_state(ScreeningRouterState {
            source,
            api_base_url,
        })
}

pub(crate) async fn pending_board_handler<S>(
    State(state): State<ScreeningRouterState<S>>,
    headers: HeaderMap,
    query: Result<Query<ScreeningQuery>, QueryRejection>,
) -> Response
where
    S: ScreeningSource + 'static,
{
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable screening query, using defaults");
            ScreeningQuery::default()
        }
    };

    let Some(token) = bearer_token(&headers) else {
        let payload = json!({ "message": "missing bearer token" });
        return (StatusCode::UNAUTHORIZED, Json(payload)).into_response();
    };

    let context =
        ClientContext::new(state.api_base_url.clone()).with_credential(Credential::new(token));

    match state.source.fetch_pending(&context).await {
        Ok(records) => {
            let board = derive_view(&ScreeningViewModel::new(records).with_query(query));
            (StatusCode::OK, Json(board)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "pending screenings relay failed");
            let payload = json!({ "message": err.user_message() });
            (err.status_hint(), Json(payload)).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}
