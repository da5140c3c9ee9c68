//! Session Service Library
//!
//! Owns the authenticated-identity lifecycle: restoring a persisted session,
//! following the identity provider's change notifications, and resolving
//! each session into an application profile (stored or synthesized).
//! Embedded by the combined binary.

pub mod navigation;
pub mod service;
pub mod state;

pub use navigation::{landing_view, View};
pub use service::{
    ProfileResolution, SessionListener, SessionReconciler, SignUpDetails, SignUpOutcome,
};
pub use state::{SessionPhase, SessionSnapshot};
