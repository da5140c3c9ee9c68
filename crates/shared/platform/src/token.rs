//! Access token shared between the identity client and the record store.

use std::sync::{Arc, PoisonError, RwLock};

/// Bearer token of the signed-in user. The store falls back to the anon key
/// while it is empty, so row-level security sees an anonymous caller.
#[derive(Clone, Default)]
pub struct AccessToken(Arc<RwLock<Option<String>>>);

impl AccessToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, token: Option<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.get().is_some() { "[REDACTED]" } else { "None" };
        f.debug_tuple("AccessToken").field(&state).finish()
    }
}
