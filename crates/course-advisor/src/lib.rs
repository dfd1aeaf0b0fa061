//! Academic advising core: configuration, telemetry, and the assessment workflow that turns
//! quiz answers and academic credentials into ranked degree-program recommendations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
