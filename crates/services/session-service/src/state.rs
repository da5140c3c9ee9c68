//! Observable session state.

use domain::{AuthSession, UserProfile};

/// Where the session stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    /// Session known, profile resolution outstanding
    Pending,
    Resolved,
}

/// One consistent view of the session and its resolved profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: Option<AuthSession>,
    pub profile: Option<UserProfile>,
    /// True while an asynchronous transition is outstanding
    pub loading: bool,
}

impl SessionSnapshot {
    /// State before the first resolution has completed
    pub fn starting() -> Self {
        Self {
            session: None,
            profile: None,
            loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            session: None,
            profile: None,
            loading: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.session, &self.profile) {
            (Some(_), Some(_)) => SessionPhase::Resolved,
            (Some(_), None) => SessionPhase::Pending,
            (None, _) => SessionPhase::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Resolved
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id())
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::starting()
    }
}
