//! Trigger handlers.
//!
//! # Responsibilities
//! - Resolve the caller's display name (query param over JSON body)
//! - Optionally grow the accumulation buffer (memory-pressure demo)
//! - Run the begin/dispatch/complete trace sequence for `/http2`
//!
//! # Design Decisions
//! - Every handler answers 200; personalization is best effort
//! - A malformed JSON body means "no name supplied", never a failure
//! - Dispatch failures are absorbed here, not surfaced to the client

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http::server::AppState;
use crate::trace::DispatchPayload;

/// Response body when no name could be resolved.
pub const GENERIC_MESSAGE: &str = "This HTTP triggered function executed successfully. \
     Pass a name in the query string or in the request body for a personalized response.";

#[derive(Debug, Deserialize)]
pub(crate) struct GreetQuery {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GreetBody {
    name: Option<String>,
}

/// Resolve the display name: query parameter first, then the JSON body.
///
/// An unparsable body or an empty name counts as "no name supplied".
fn resolve_name(query: &GreetQuery, body: &Bytes) -> Option<String> {
    if let Some(name) = query.name.as_deref() {
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    serde_json::from_slice::<GreetBody>(body)
        .ok()
        .and_then(|parsed| parsed.name)
        .filter(|name| !name.is_empty())
}

fn greeting(name: Option<&str>) -> String {
    match name {
        Some(name) => format!(
            "Hello, {}. This HTTP triggered function executed successfully.",
            name
        ),
        None => GENERIC_MESSAGE.to_string(),
    }
}

fn grow_if_enabled(state: &AppState) {
    if !state.accumulator.enable_growth {
        return;
    }
    match state.store.grow(state.accumulator.growth_bytes) {
        Ok(total) => tracing::info!(
            added = state.accumulator.growth_bytes,
            total,
            "Grew accumulation buffer"
        ),
        // Exhaustion is reported but the handler still answers.
        Err(e) => tracing::error!(error = %e, "Buffer growth failed"),
    }
}

/// Greeting trigger.
pub(crate) async fn http1(
    State(state): State<AppState>,
    Query(query): Query<GreetQuery>,
    body: Bytes,
) -> Response {
    tracing::info!("HTTP trigger processed a request");
    grow_if_enabled(&state);

    let name = resolve_name(&query, &body);
    (StatusCode::OK, greeting(name.as_deref())).into_response()
}

/// Greeting trigger addressed with a correlation token in the path.
///
/// The token is the previous hop's freshly generated suffix; it is logged
/// and otherwise ignored.
pub(crate) async fn http1_with_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<GreetQuery>,
    body: Bytes,
) -> Response {
    tracing::info!(token = %token, "HTTP trigger processed a request");
    grow_if_enabled(&state);

    let name = resolve_name(&query, &body);
    (StatusCode::OK, greeting(name.as_deref())).into_response()
}

/// Greeting trigger that forwards a correlated dispatch downstream first.
pub(crate) async fn http2(
    State(state): State<AppState>,
    Query(query): Query<GreetQuery>,
    body: Bytes,
) -> Response {
    let name = resolve_name(&query, &body);

    let mut ctx = state.tracer.begin(name.clone());
    let payload = DispatchPayload::new(ctx.requested_name());
    // Non-fatal: the tracer emits the error event and the caller still
    // gets its greeting.
    let _ = state
        .tracer
        .dispatch(&mut ctx, &state.downstream.url, &payload)
        .await;
    state.tracer.complete(&mut ctx);

    (StatusCode::OK, greeting(name.as_deref())).into_response()
}
