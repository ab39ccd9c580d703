//! Tool invocation route
//!
//! - `POST /invoke` - Run one tool: `{"tool": "...", "input": "..."}` in,
//!   `{"output": ...}` out

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use moodmix_shared_config::Environment;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::services::{Dispatcher, Tool};

/// Shared state for the invoke handler
#[derive(Clone)]
pub struct InvokeState {
    pub dispatcher: Dispatcher,
    /// Controls whether upstream error bodies are echoed back
    pub environment: Environment,
}

impl InvokeState {
    pub fn new(dispatcher: Dispatcher, environment: Environment) -> Self {
        Self {
            dispatcher,
            environment,
        }
    }
}

/// Invoke request body
///
/// Both fields are optional on the wire; a missing `tool` is reported as an
/// unknown tool.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub tool: String,
    #[serde(default)]
    pub input: String,
}

/// Create the invoke router
pub fn invoke_router(state: InvokeState) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .with_state(state)
}

async fn invoke(
    State(state): State<InvokeState>,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(request)) => match request.tool.parse::<Tool>() {
            Ok(tool) => state.dispatcher.invoke(tool, &request.input).await,
            Err(e) => Err(e),
        },
        Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
    };

    match result {
        Ok(output) => Json(json!({ "output": output })).into_response(),
        Err(e) => e.into_response_for(state.environment),
    }
}
