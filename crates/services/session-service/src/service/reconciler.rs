//! Session reconciler - keeps the signed-in profile consistent with the
//! identity provider.
//!
//! Every session change re-runs profile resolution. Resolutions are stamped
//! with a generation number; only the most recently started one may publish,
//! so a slow lookup for an earlier change never overwrites a newer result.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use common::{call_with_deadline, AppError, AppResult, DeadlineConfig};
use domain::{
    AuthSession, AuthUser, MembershipType, NewProfile, Role, SignUpRole, UserMetadata, UserProfile,
    FALLBACK_FULL_NAME,
};
use platform::{IdentityProvider, ProfileRepository};

use crate::state::SessionSnapshot;

/// Outcome of looking up the profile behind a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileResolution {
    /// Stored row found
    Stored(UserProfile),
    /// No stored row yet; synthesized from identity metadata
    Fallback(UserProfile),
}

impl ProfileResolution {
    pub fn profile(&self) -> &UserProfile {
        match self {
            ProfileResolution::Stored(p) | ProfileResolution::Fallback(p) => p,
        }
    }

    pub fn into_profile(self) -> UserProfile {
        match self {
            ProfileResolution::Stored(p) | ProfileResolution::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ProfileResolution::Fallback(_))
    }
}

/// Details collected by the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    pub full_name: String,
    pub role: SignUpRole,
}

/// Result of a successful sign-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    /// False when the profile row could not be written; it will be
    /// synthesized on first resolution instead
    pub profile_created: bool,
    /// False when the provider requires email confirmation first
    pub signed_in: bool,
}

/// Owns the authenticated-identity lifecycle.
pub struct SessionReconciler {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    deadlines: DeadlineConfig,
    state: watch::Sender<SessionSnapshot>,
    generation: AtomicU64,
}

impl SessionReconciler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        deadlines: DeadlineConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::starting());
        Self {
            identity,
            profiles,
            deadlines,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Resolved profile of the signed-in user, if any
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().profile.clone()
    }

    /// Restore any persisted session and resolve its profile.
    ///
    /// `loading` stays true until this first resolution settles, whatever
    /// its outcome. A connection check runs alongside; its result is only
    /// logged.
    pub async fn initialize(&self) {
        self.spawn_connection_check();

        let session = match call_with_deadline(
            "Session restore",
            self.deadlines.auth(),
            self.identity.get_session(),
        )
        .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Could not restore session");
                None
            }
        };

        self.reconcile(session).await;
    }

    fn spawn_connection_check(&self) {
        let profiles = Arc::clone(&self.profiles);
        let deadline = self.deadlines.profile_fetch();
        tokio::spawn(async move {
            match call_with_deadline("Connection check", deadline, profiles.check_connection()).await {
                Ok(()) => info!("Platform connection successful"),
                Err(e) => error!(error = %e, "Platform connection failed"),
            }
        });
    }

    /// Register for session changes. Each change supersedes any resolution
    /// still in flight. After each change `on_change` sees the latest
    /// snapshot; intermediate values published in quick succession may be
    /// coalesced. Callbacks stop once the returned listener is dropped.
    pub fn subscribe<F>(self: &Arc<Self>, on_change: F) -> SessionListener
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let mut changes = self.identity.on_session_change();
        let reconciler = Arc::clone(self);

        let events = tokio::spawn(async move {
            let mut inflight = JoinSet::new();
            loop {
                tokio::select! {
                    change = changes.recv() => match change {
                        Ok(change) => {
                            info!(event = ?change.event, user_id = ?change.session.as_ref().map(|s| s.user_id()), "Session changed");
                            inflight.abort_all();
                            let reconciler = Arc::clone(&reconciler);
                            inflight.spawn(async move { reconciler.reconcile(change.session).await });
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Missed session changes, re-reading session");
                            inflight.abort_all();
                            let reconciler = Arc::clone(&reconciler);
                            inflight.spawn(async move { reconciler.resync().await });
                        }
                        Err(RecvError::Closed) => break,
                    },
                    Some(_) = inflight.join_next(), if !inflight.is_empty() => {}
                }
            }
        });

        let mut snapshots = self.state.subscribe();
        let forward_active = Arc::clone(&active);
        let callbacks = tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                if !forward_active.load(Ordering::Acquire) {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                on_change(&snapshot);
            }
        });

        SessionListener {
            active,
            tasks: vec![events, callbacks],
        }
    }

    /// Look up the stored profile for `user` under the profile-fetch deadline.
    ///
    /// A missing row is not a failure: the profile is synthesized from the
    /// identity metadata. Any other failure, including the deadline, is
    /// returned to the caller.
    pub async fn resolve_profile(&self, user: &AuthUser) -> AppResult<ProfileResolution> {
        debug!(user_id = %user.id, "Fetching user profile");
        let lookup = call_with_deadline(
            "Profile fetch",
            self.deadlines.profile_fetch(),
            self.profiles.find_by_id(&user.id),
        )
        .await;

        match lookup {
            Ok(profile) => {
                debug!(user_id = %profile.id, role = %profile.role, "User profile found");
                Ok(ProfileResolution::Stored(profile))
            }
            Err(AppError::NotFound) => {
                let profile = UserProfile::fallback_from(user);
                info!(user_id = %profile.id, role = %profile.role, "No stored profile, using fallback from identity metadata");
                Ok(ProfileResolution::Fallback(profile))
            }
            Err(e) => Err(e),
        }
    }

    /// Re-read the session from the provider and reconcile it. A read that
    /// fails or misses its deadline counts as signed out.
    pub async fn resync(&self) {
        let session = match call_with_deadline(
            "Session restore",
            self.deadlines.auth(),
            self.identity.get_session(),
        )
        .await
        {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Could not re-read session");
                None
            }
        };
        self.reconcile(session).await
    }

    /// Bring the published state in line with `session`.
    async fn reconcile(&self, session: Option<AuthSession>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(session) = session else {
            self.publish(generation, SessionSnapshot::signed_out());
            return;
        };

        self.publish_with(generation, |current| {
            // Keep the profile across token refreshes of the same user
            let same_user = current.user_id() == Some(session.user_id());
            SessionSnapshot {
                profile: if same_user { current.profile.clone() } else { None },
                session: Some(session.clone()),
                loading: true,
            }
        });

        match self.resolve_profile(&session.user).await {
            Ok(resolution) => self.publish(
                generation,
                SessionSnapshot {
                    session: Some(session),
                    profile: Some(resolution.into_profile()),
                    loading: false,
                },
            ),
            Err(e) => {
                error!(error = %e, user_id = %session.user.id, "Error fetching user profile, clearing session state");
                self.publish(generation, SessionSnapshot::signed_out());
            }
        }
    }

    fn publish(&self, generation: u64, snapshot: SessionSnapshot) {
        self.publish_with(generation, move |_| snapshot);
    }

    /// Replace the snapshot unless a newer reconciliation has started.
    fn publish_with<F>(&self, generation: u64, next: F)
    where
        F: FnOnce(&SessionSnapshot) -> SessionSnapshot,
    {
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            let snapshot = next(current);
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });

        if !published && self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded session resolution");
        }
    }

    /// Create an account and, on success, its profile row.
    ///
    /// Profile creation failing is logged and reported through
    /// [`SignUpOutcome::profile_created`]; the account still exists.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        details: SignUpDetails,
    ) -> AppResult<SignUpOutcome> {
        let email = email.trim();
        let full_name = details.full_name.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let role: Role = details.role.into();
        info!(%role, "Starting sign-up");
        let metadata = UserMetadata {
            full_name: Some(full_name.to_string()).filter(|n| !n.is_empty()),
            role: Some(role.as_str().to_string()),
            membership_type: Some(MembershipType::Free.as_str().to_string()),
        };

        let response = call_with_deadline(
            "Sign-up",
            self.deadlines.auth(),
            self.identity.sign_up(email, password, metadata),
        )
        .await?;

        let profile = NewProfile {
            id: response.user.id.clone(),
            email: response
                .user
                .email
                .clone()
                .unwrap_or_else(|| email.to_string()),
            full_name: if full_name.is_empty() {
                FALLBACK_FULL_NAME.to_string()
            } else {
                full_name.to_string()
            },
            role,
            membership_type: MembershipType::Free,
        };

        let profile_created = match call_with_deadline(
            "Profile creation",
            self.deadlines.profile_create(),
            self.profiles.create(profile),
        )
        .await
        {
            Ok(()) => {
                info!(user_id = %response.user.id, "User profile created");
                true
            }
            Err(e) => {
                warn!(error = %e, user_id = %response.user.id, "Profile creation failed, but auth user created");
                false
            }
        };

        let signed_in = response.session.is_some();
        if let Some(session) = response.session {
            self.reconcile(Some(session)).await;
        }

        Ok(SignUpOutcome {
            user: response.user,
            profile_created,
            signed_in,
        })
    }

    /// Authenticate and resolve the new session's profile.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SessionSnapshot> {
        info!("Starting sign-in");
        let session = call_with_deadline(
            "Sign-in",
            self.deadlines.auth(),
            self.identity.sign_in_with_password(email.trim(), password),
        )
        .await?;

        info!(user_id = %session.user.id, "User signed in");
        self.reconcile(Some(session)).await;
        Ok(self.snapshot())
    }

    /// Notify the provider, then clear local state regardless of its answer.
    pub async fn sign_out(&self) -> AppResult<()> {
        let result = call_with_deadline(
            "Sign-out",
            self.deadlines.auth(),
            self.identity.sign_out(),
        )
        .await;

        if let Err(e) = &result {
            warn!(error = %e, "Provider sign-out failed, clearing local session anyway");
        }
        self.reconcile(None).await;
        result
    }
}

/// Handle for a session-change subscription. Dropping it unsubscribes; no
/// callback runs afterwards.
pub struct SessionListener {
    active: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
}

impl SessionListener {
    /// Explicit teardown; same as dropping the listener
    pub fn unsubscribe(self) {}
}

impl Drop for SessionListener {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        for task in &self.tasks {
            task.abort();
        }
    }
}
