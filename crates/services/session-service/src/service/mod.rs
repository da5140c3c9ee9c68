//! Service layer.

mod reconciler;

pub use reconciler::{
    ProfileResolution, SessionListener, SessionReconciler, SignUpDetails, SignUpOutcome,
};
