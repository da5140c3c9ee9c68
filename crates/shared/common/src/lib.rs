//! Common utilities shared by the platform clients and services.
//!
//! This crate provides:
//! - Unified error handling with view-facing messages
//! - The deadline-bound call used at every external call site
//! - Configuration structures

pub mod config;
pub mod deadline;
pub mod error;

pub use config::*;
pub use deadline::call_with_deadline;
pub use error::{AppError, AppResult, OptionExt};
