//! HTTP route handlers for the MoodMix API
//!
//! - Tool invocation (`POST /invoke`)
//! - Status (`GET /status`)

pub mod invoke;
pub mod status;

pub use invoke::{invoke_router, InvokeRequest, InvokeState};
pub use status::{status_router, SERVICE_NAME};
