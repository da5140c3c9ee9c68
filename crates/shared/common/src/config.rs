//! Shared configuration structures.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use domain::{
    AUTH_TIMEOUT_MS, LISTING_READ_TIMEOUT_MS, LISTING_WRITE_TIMEOUT_MS, PROFILE_CREATE_TIMEOUT_MS,
    PROFILE_FETCH_TIMEOUT_MS,
};

/// Default local platform endpoint
pub const DEFAULT_PLATFORM_URL: &str = "http://localhost:54321";

/// Hosted platform connection settings.
#[derive(Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Project base URL; REST and auth APIs live under it
    pub url: String,
    /// Public (anon) API key sent with every request
    #[serde(skip_serializing)]
    pub anon_key: String,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl PlatformConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let anon_key = env::var("BUILDMART_ANON_KEY")
            .or_else(|_| env::var("SUPABASE_ANON_KEY"))
            .unwrap_or_else(|_| {
                tracing::warn!("BUILDMART_ANON_KEY not set, requests will be unauthenticated");
                String::new()
            });

        Self {
            url: env::var("BUILDMART_PLATFORM_URL")
                .or_else(|_| env::var("SUPABASE_URL"))
                .unwrap_or_else(|_| DEFAULT_PLATFORM_URL.to_string()),
            anon_key,
        }
    }

    /// Base URL of the REST (table) API.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }

    /// Base URL of the auth API.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url.trim_end_matches('/'))
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PLATFORM_URL.to_string(),
            anon_key: String::new(),
        }
    }
}

/// Deadlines for every class of external call, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeadlineConfig {
    pub profile_fetch_ms: u64,
    pub auth_ms: u64,
    pub profile_create_ms: u64,
    pub listing_read_ms: u64,
    pub listing_write_ms: u64,
}

impl DeadlineConfig {
    /// Load overrides from environment variables, keeping defaults otherwise.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            profile_fetch_ms: env_ms("BUILDMART_PROFILE_FETCH_TIMEOUT_MS")
                .unwrap_or(defaults.profile_fetch_ms),
            auth_ms: env_ms("BUILDMART_AUTH_TIMEOUT_MS").unwrap_or(defaults.auth_ms),
            profile_create_ms: env_ms("BUILDMART_PROFILE_CREATE_TIMEOUT_MS")
                .unwrap_or(defaults.profile_create_ms),
            listing_read_ms: env_ms("BUILDMART_LISTING_READ_TIMEOUT_MS")
                .unwrap_or(defaults.listing_read_ms),
            listing_write_ms: env_ms("BUILDMART_LISTING_WRITE_TIMEOUT_MS")
                .unwrap_or(defaults.listing_write_ms),
        }
    }

    pub fn profile_fetch(&self) -> Duration {
        Duration::from_millis(self.profile_fetch_ms)
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn profile_create(&self) -> Duration {
        Duration::from_millis(self.profile_create_ms)
    }

    pub fn listing_read(&self) -> Duration {
        Duration::from_millis(self.listing_read_ms)
    }

    pub fn listing_write(&self) -> Duration {
        Duration::from_millis(self.listing_write_ms)
    }
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            profile_fetch_ms: PROFILE_FETCH_TIMEOUT_MS,
            auth_ms: AUTH_TIMEOUT_MS,
            profile_create_ms: PROFILE_CREATE_TIMEOUT_MS,
            listing_read_ms: LISTING_READ_TIMEOUT_MS,
            listing_write_ms: LISTING_WRITE_TIMEOUT_MS,
        }
    }
}

fn env_ms(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
