//! Business logic services for MoodMix
//!
//! - Tool dispatch for the invoke endpoint
//! - The mood recommendation pipeline

pub mod dispatch;
pub mod recommendations;

pub use dispatch::{Dispatcher, Tool};
pub use recommendations::RecommendationService;
