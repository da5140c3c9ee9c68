//! Wires the platform clients into the session and listing view-models.

use std::sync::Arc;

use common::{call_with_deadline, AppError, AppResult, DeadlineConfig, PlatformConfig};
use domain::{AuthUser, UserProfile};
use listing_service_lib::{
    AdminConsole, BrowseCatalog, ListingManager, ListingService, Repositories, SellerDashboard,
};
use platform::{
    AccessToken, AnalyticsStore, IdentityProvider, ListingStore, PaymentStore, ProfileStore,
    RecordStore, RestIdentity, RestStore,
};
use session_service_lib::{SessionReconciler, SessionSnapshot};
use tracing::info;

pub struct App {
    identity: Arc<dyn IdentityProvider>,
    pub session: Arc<SessionReconciler>,
    pub repositories: Repositories,
    pub manager: Arc<dyn ListingService>,
    deadlines: DeadlineConfig,
}

impl App {
    pub fn new(platform: &PlatformConfig, deadlines: DeadlineConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("buildmart/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Identity and store share the bearer token
        let token = AccessToken::new();
        let store: Arc<dyn RecordStore> =
            Arc::new(RestStore::new(client.clone(), platform, token.clone()));
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(RestIdentity::new(client, platform, token));

        let repositories = Repositories {
            profiles: Arc::new(ProfileStore::new(store.clone())),
            listings: Arc::new(ListingStore::new(store.clone())),
            analytics: Arc::new(AnalyticsStore::new(store.clone())),
            payments: Arc::new(PaymentStore::new(store)),
        };
        let manager: Arc<dyn ListingService> = Arc::new(ListingManager::new(
            repositories.listings.clone(),
            repositories.profiles.clone(),
            deadlines,
        ));
        let session = Arc::new(SessionReconciler::new(
            identity.clone(),
            repositories.profiles.clone(),
            deadlines,
        ));

        info!(url = %platform.url, "Platform clients ready");
        Ok(Self {
            identity,
            session,
            repositories,
            manager,
            deadlines,
        })
    }

    /// Restore any persisted session, then sign in when credentials are given.
    pub async fn start(&self, credentials: Option<(&str, &str)>) -> AppResult<SessionSnapshot> {
        self.session.initialize().await;
        match credentials {
            Some((email, password)) => self.session.sign_in(email, password).await,
            None => Ok(self.session.snapshot()),
        }
    }

    pub fn require_user(&self) -> AppResult<UserProfile> {
        self.session.current_user().ok_or(AppError::Unauthorized)
    }

    /// Identity record as the provider currently sees it
    pub async fn auth_user(&self) -> AppResult<AuthUser> {
        call_with_deadline(
            "User lookup",
            self.deadlines.auth(),
            self.identity.get_current_user(),
        )
        .await
    }

    pub fn catalog(&self) -> BrowseCatalog {
        BrowseCatalog::new(
            self.repositories.listings.clone(),
            self.manager.clone(),
            self.deadlines,
        )
    }

    pub fn seller_dashboard(&self, seller: UserProfile) -> SellerDashboard {
        SellerDashboard::new(seller, &self.repositories, self.manager.clone(), self.deadlines)
    }

    pub fn admin_console(&self, admin: UserProfile) -> AdminConsole {
        AdminConsole::new(admin, &self.repositories, self.manager.clone(), self.deadlines)
    }
}
