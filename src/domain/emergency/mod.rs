//! Emergency screening domain
//!
//! Screens user queries for diabetes-related medical emergencies before any
//! retrieval happens.

mod detector;
mod types;

pub use detector::{detect_emergency, format_emergency_reasons};
pub use types::{EmergencyScanResult, EmergencyType};
