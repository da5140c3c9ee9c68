//! Integration tests for the listing view-models.
//!
//! Listing reads and writes go through an in-memory fake with optional
//! latency or a script of timed responses; the remaining repositories are
//! mockall mocks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use common::{AppError, AppResult, DeadlineConfig};
use domain::{
    AccountStatus, Category, Listing, ListingStatus, MembershipType, NewListing, Role,
    SellerSummary, UserProfile,
};
use listing_service_lib::{
    AdminConsole, BrowseCatalog, ListingManager, ListingQuery, ListingService, ListingSource,
    Repositories, SellerDashboard, UserQuery,
};
use platform::{
    ListingRepository, MockAnalyticsRepository, MockPaymentRepository, MockProfileRepository,
};

// =============================================================================
// Fakes
// =============================================================================

fn user(id: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        full_name: Some(format!("User {}", id)),
        role,
        membership_type: MembershipType::Free,
        status: AccountStatus::Active,
        phone: None,
        location: None,
        membership_expires_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn listing(id: &str, seller_id: &str, status: ListingStatus) -> Listing {
    Listing {
        id: id.to_string(),
        seller_id: seller_id.to_string(),
        title: format!("Listing {}", id),
        description: "Portland cement".to_string(),
        price: 1_200.0,
        category: Category::Materials,
        location: "Lahore".to_string(),
        images: Vec::new(),
        status,
        is_featured: false,
        is_premium: false,
        contact_phone: None,
        contact_email: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        seller: None,
    }
}

fn new_listing(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "Fresh stock".to_string(),
        price: 950.0,
        category: Category::Materials,
        location: "Multan".to_string(),
        contact_phone: Some("0300-0000000".to_string()),
        contact_email: None,
    }
}

#[derive(Default)]
struct FakeListings {
    rows: Mutex<Vec<Listing>>,
    /// Consumed one per read before falling back to `rows`
    script: Mutex<VecDeque<(Duration, Vec<Listing>)>>,
    delay: Duration,
    broken: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl FakeListings {
    fn with_rows(rows: Vec<Listing>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    fn scripted(responses: Vec<(Duration, Vec<Listing>)>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    fn rows(&self) -> Vec<Listing> {
        self.rows.lock().unwrap().clone()
    }

    async fn read(&self) -> AppResult<Vec<Listing>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        if let Some((delay, rows)) = next {
            tokio::time::sleep(delay).await;
            return Ok(rows);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.broken.load(Ordering::SeqCst) {
            return Err(AppError::backend("connection refused"));
        }
        Ok(self.rows())
    }
}

#[async_trait]
impl ListingRepository for FakeListings {
    async fn list_active(&self) -> AppResult<Vec<Listing>> {
        let rows = self.read().await?;
        Ok(rows
            .into_iter()
            .filter(|l| l.status == ListingStatus::Active)
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Listing>> {
        self.read().await
    }

    async fn list_by_seller(&self, seller_id: &str) -> AppResult<Vec<Listing>> {
        let rows = self.read().await?;
        Ok(rows.into_iter().filter(|l| l.seller_id == seller_id).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Listing> {
        self.rows()
            .into_iter()
            .find(|l| l.id == id)
            .ok_or(AppError::NotFound)
    }

    async fn create(
        &self,
        seller_id: &str,
        new: NewListing,
        status: ListingStatus,
    ) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let mut row = listing(&format!("ad-{}", rows.len() + 1), seller_id, status);
        row.title = new.title;
        row.description = new.description;
        row.price = new.price;
        row.category = new.category;
        row.location = new.location;
        rows.insert(0, row);
        Ok(())
    }

    async fn set_status(&self, id: &str, status: ListingStatus) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|l| l.id == id) {
            Some(row) => {
                row.status = status;
                Ok(())
            }
            None => Err(AppError::write_failed("no such row")),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }

    async fn delete_owned(&self, id: &str, seller_id: &str) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .retain(|l| !(l.id == id && l.seller_id == seller_id));
        Ok(())
    }
}

struct Harness {
    listings: Arc<FakeListings>,
    repositories: Repositories,
    manager: Arc<dyn ListingService>,
}

fn harness(
    listings: FakeListings,
    profiles: MockProfileRepository,
    analytics: MockAnalyticsRepository,
    payments: MockPaymentRepository,
) -> Harness {
    let listings = Arc::new(listings);
    let repositories = Repositories {
        profiles: Arc::new(profiles),
        listings: listings.clone(),
        analytics: Arc::new(analytics),
        payments: Arc::new(payments),
    };
    let manager: Arc<dyn ListingService> = Arc::new(ListingManager::new(
        repositories.listings.clone(),
        repositories.profiles.clone(),
        DeadlineConfig::default(),
    ));

    Harness {
        listings,
        repositories,
        manager,
    }
}

fn listings_only(listings: FakeListings) -> Harness {
    harness(
        listings,
        MockProfileRepository::new(),
        MockAnalyticsRepository::new(),
        MockPaymentRepository::new(),
    )
}

fn catalog(h: &Harness) -> BrowseCatalog {
    BrowseCatalog::new(
        h.repositories.listings.clone(),
        h.manager.clone(),
        DeadlineConfig::default(),
    )
}

/// Slow response with two old rows, then a fast one with a single new row
fn overlapping_reads(seller_id: &str) -> FakeListings {
    FakeListings::scripted(vec![
        (
            Duration::from_secs(3),
            vec![
                listing("old-1", seller_id, ListingStatus::Active),
                listing("old-2", seller_id, ListingStatus::Active),
            ],
        ),
        (
            Duration::from_secs(1),
            vec![listing("new-1", seller_id, ListingStatus::Active)],
        ),
    ])
}

/// Runs `first`, then `second` 10ms later, and waits for both
async fn overlap<A, B>(first: A, second: B) -> (A::Output, B::Output)
where
    A: std::future::Future,
    B: std::future::Future,
{
    tokio::join!(first, async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        second.await
    })
}

// =============================================================================
// Browse catalog
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_later_load_wins_over_slow_earlier_load() {
    let h = listings_only(overlapping_reads("u-1"));
    let catalog = catalog(&h);

    overlap(catalog.load(), catalog.load()).await;

    let state = catalog.snapshot().await;
    let ids: Vec<&str> = state.data.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["new-1"]);
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(h.listings.reads.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_falls_back_to_samples() {
    let h = listings_only(FakeListings::slow(Duration::from_secs(9)));
    let catalog = catalog(&h);

    catalog.load().await;

    let state = catalog.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.data.len(), 12);
    assert_eq!(catalog.source().await, Some(ListingSource::Sample));
    assert_eq!(
        state.error.as_deref(),
        Some("Ads fetch timed out - the service may be unavailable")
    );
}

#[tokio::test]
async fn test_empty_remote_result_shows_samples() {
    let h = listings_only(FakeListings::default());
    let catalog = catalog(&h);

    catalog.load().await;

    let state = catalog.snapshot().await;
    assert_eq!(state.data.len(), 12);
    assert_eq!(state.error, None);
    assert_eq!(catalog.source().await, Some(ListingSource::Sample));
}

#[tokio::test]
async fn test_remote_listings_are_normalized() {
    let mut joined = listing("ad-1", "u-1", ListingStatus::Active);
    joined.seller = Some(SellerSummary {
        full_name: Some("Lahore Cement Co.".to_string()),
        email: None,
    });
    let h = listings_only(FakeListings::with_rows(vec![
        joined,
        listing("ad-2", "u-2", ListingStatus::Active),
        listing("ad-3", "u-2", ListingStatus::Pending),
    ]));
    let catalog = catalog(&h);

    catalog.load().await;

    let view = catalog.visible(&ListingQuery::default()).await;
    assert_eq!(view.count(), 2);
    assert_eq!(view.items[0].seller, "Lahore Cement Co.");
    assert_eq!(view.items[1].seller, "Unknown Seller");
    assert!(view.items.iter().all(|l| l.glyph == "🏗️"));
    assert_eq!(catalog.source().await, Some(ListingSource::Remote));
}

#[tokio::test]
async fn test_failed_refetch_keeps_loaded_listings() {
    let h = listings_only(FakeListings::with_rows(vec![listing(
        "ad-1",
        "u-1",
        ListingStatus::Active,
    )]));
    let catalog = catalog(&h);
    catalog.load().await;

    h.listings.broken.store(true, Ordering::SeqCst);
    catalog.load().await;

    let state = catalog.snapshot().await;
    assert_eq!(state.data.len(), 1);
    assert_eq!(state.data[0].id, "ad-1");
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some("The service returned an error. Please try again.")
    );
}

#[tokio::test]
async fn test_steel_search_over_samples() {
    let h = listings_only(FakeListings::default());
    let catalog = catalog(&h);
    catalog.load().await;

    let query = ListingQuery::from_inputs("steel", "Materials", "all").unwrap();
    let view = catalog.visible(&query).await;

    let ids: Vec<&str> = view.items.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "7", "10"]);
    assert_eq!(view.total, 12);
    assert_eq!(view.hint(), None);
}

#[tokio::test]
async fn test_empty_results_carry_hint() {
    let h = listings_only(FakeListings::default());
    let catalog = catalog(&h);

    let unfiltered = catalog.visible(&ListingQuery::default()).await;
    assert_eq!(unfiltered.hint(), Some("Be the first to post an ad!"));

    catalog.load().await;
    let filtered = catalog
        .visible(&ListingQuery::default().with_search("titanium"))
        .await;
    assert!(filtered.is_empty());
    assert_eq!(filtered.hint(), Some("Try adjusting your search criteria"));
}

#[tokio::test]
async fn test_post_refetches_catalog() {
    let h = listings_only(FakeListings::with_rows(vec![listing(
        "ad-1",
        "u-1",
        ListingStatus::Active,
    )]));
    let catalog = catalog(&h);
    catalog.load().await;

    catalog
        .post(&user("u-1", Role::Seller), new_listing("Red Bricks"))
        .await
        .unwrap();

    assert_eq!(h.listings.reads.load(Ordering::SeqCst), 2);
    let view = catalog.visible(&ListingQuery::default()).await;
    assert_eq!(view.count(), 2);
    assert_eq!(view.items[0].title, "Red Bricks");
    assert_eq!(view.items[0].seller_id.as_deref(), Some("u-1"));
}

#[tokio::test]
async fn test_rejected_post_keeps_catalog() {
    let h = listings_only(FakeListings::with_rows(vec![listing(
        "ad-1",
        "u-1",
        ListingStatus::Active,
    )]));
    let catalog = catalog(&h);
    catalog.load().await;

    let err = catalog
        .post(&user("u-1", Role::Seller), new_listing("  "))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(ref m) if m == "Title is required"));
    assert_eq!(h.listings.writes.load(Ordering::SeqCst), 0);
    let state = catalog.snapshot().await;
    assert_eq!(state.data.len(), 1);
    assert_eq!(state.error.as_deref(), Some("Title is required"));
}

#[tokio::test]
async fn test_non_owner_delete_leaves_listing_visible() {
    let h = listings_only(FakeListings::with_rows(vec![listing(
        "ad-1",
        "u-1",
        ListingStatus::Active,
    )]));
    let catalog = catalog(&h);
    catalog.load().await;
    let target = h.listings.rows()[0].clone();

    let err = h
        .manager
        .delete_listing(&user("u-2", Role::Seller), &target)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden));
    assert_eq!(h.listings.writes.load(Ordering::SeqCst), 0);
    catalog.load().await;
    assert_eq!(catalog.visible(&ListingQuery::default()).await.count(), 1);
}

// =============================================================================
// Seller dashboard
// =============================================================================

#[tokio::test]
async fn test_seller_stats_degrade_to_zero() {
    let mut analytics = MockAnalyticsRepository::new();
    analytics
        .expect_count_views()
        .returning(|_| Err(AppError::unavailable("ad_views")));
    analytics
        .expect_count_contacts()
        .returning(|_| Err(AppError::backend("permission denied")));

    let h = harness(
        FakeListings::with_rows(vec![
            listing("ad-1", "u-1", ListingStatus::Active),
            listing("ad-2", "u-1", ListingStatus::Pending),
            listing("ad-3", "u-9", ListingStatus::Active),
        ]),
        MockProfileRepository::new(),
        analytics,
        MockPaymentRepository::new(),
    );
    let dashboard = SellerDashboard::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    tokio_test::assert_ok!(dashboard.refresh().await);

    let state = dashboard.snapshot().await;
    assert_eq!(state.data.stats.total_ads, 2);
    assert_eq!(state.data.stats.active_ads, 1);
    assert_eq!(state.data.stats.total_views, 0);
    assert_eq!(state.data.stats.total_contacts, 0);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_seller_counts_engagement() {
    let mut analytics = MockAnalyticsRepository::new();
    analytics
        .expect_count_views()
        .withf(|ids| ids == ["ad-1".to_string()])
        .returning(|_| Ok(41));
    analytics.expect_count_contacts().returning(|_| Ok(3));

    let h = harness(
        FakeListings::with_rows(vec![listing("ad-1", "u-1", ListingStatus::Active)]),
        MockProfileRepository::new(),
        analytics,
        MockPaymentRepository::new(),
    );
    let dashboard = SellerDashboard::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    dashboard.refresh().await.unwrap();

    let stats = dashboard.snapshot().await.data.stats;
    assert_eq!(stats.total_views, 41);
    assert_eq!(stats.total_contacts, 3);
}

#[tokio::test]
async fn test_seller_delete_refetches() {
    let mut analytics = MockAnalyticsRepository::new();
    analytics.expect_count_views().returning(|_| Ok(0));
    analytics.expect_count_contacts().returning(|_| Ok(0));

    let h = harness(
        FakeListings::with_rows(vec![
            listing("ad-1", "u-1", ListingStatus::Active),
            listing("ad-2", "u-1", ListingStatus::Active),
        ]),
        MockProfileRepository::new(),
        analytics,
        MockPaymentRepository::new(),
    );
    let dashboard = SellerDashboard::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );
    dashboard.refresh().await.unwrap();

    dashboard.delete("ad-1").await.unwrap();

    assert_eq!(h.listings.reads.load(Ordering::SeqCst), 2);
    let state = dashboard.snapshot().await;
    assert_eq!(state.data.listings.len(), 1);
    assert_eq!(state.data.stats.total_ads, 1);
}

#[tokio::test(start_paused = true)]
async fn test_later_seller_refresh_wins_over_slow_earlier_one() {
    let mut analytics = MockAnalyticsRepository::new();
    analytics.expect_count_views().returning(|_| Ok(0));
    analytics.expect_count_contacts().returning(|_| Ok(0));

    let h = harness(
        overlapping_reads("u-1"),
        MockProfileRepository::new(),
        analytics,
        MockPaymentRepository::new(),
    );
    let dashboard = SellerDashboard::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    let (first, second) = overlap(dashboard.refresh(), dashboard.refresh()).await;
    tokio_test::assert_ok!(first);
    tokio_test::assert_ok!(second);

    let state = dashboard.snapshot().await;
    let ids: Vec<&str> = state.data.listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["new-1"]);
    assert_eq!(state.data.stats.total_ads, 1);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_premium_request_is_simulated_without_proof_table() {
    let mut payments = MockPaymentRepository::new();
    payments
        .expect_submit()
        .withf(|proof| proof.user_id == "u-1" && proof.file_name == "receipt.png")
        .times(1)
        .returning(|_| Err(AppError::unavailable("payment_proofs")));

    let h = harness(
        FakeListings::default(),
        MockProfileRepository::new(),
        MockAnalyticsRepository::new(),
        payments,
    );
    let dashboard = SellerDashboard::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    let outcome = dashboard.request_premium("receipt.png", 20_480).await.unwrap();
    assert!(outcome.is_simulated());
}

#[tokio::test]
async fn test_premium_request_surfaces_write_failure() {
    let mut payments = MockPaymentRepository::new();
    payments
        .expect_submit()
        .returning(|_| Err(AppError::write_failed("storage quota exceeded")));

    let h = harness(
        FakeListings::default(),
        MockProfileRepository::new(),
        MockAnalyticsRepository::new(),
        payments,
    );
    let dashboard = SellerDashboard::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    let err = dashboard.request_premium("receipt.png", 20_480).await.unwrap_err();
    assert!(matches!(err, AppError::WriteFailed(_)));
}

// =============================================================================
// Admin console
// =============================================================================

#[tokio::test]
async fn test_non_admin_is_rejected_before_any_read() {
    // Mocks without expectations panic on any call
    let h = listings_only(FakeListings::with_rows(vec![listing(
        "ad-1",
        "u-1",
        ListingStatus::Active,
    )]));
    let console = AdminConsole::new(
        user("u-1", Role::Seller),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    assert!(matches!(console.refresh().await, Err(AppError::Forbidden)));
    assert!(matches!(
        console.set_listing_status("ad-1", ListingStatus::Inactive).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        console.set_user_membership("u-1", MembershipType::Premium).await,
        Err(AppError::Forbidden)
    ));
    assert_eq!(h.listings.reads.load(Ordering::SeqCst), 0);
    assert_eq!(h.listings.writes.load(Ordering::SeqCst), 0);
}

fn admin_harness(profiles: MockProfileRepository) -> Harness {
    let mut analytics = MockAnalyticsRepository::new();
    analytics
        .expect_admin_stats()
        .returning(|| Err(AppError::unavailable("admin_stats")));

    harness(
        FakeListings::with_rows(vec![
            listing("ad-1", "u-1", ListingStatus::Pending),
            listing("ad-2", "u-2", ListingStatus::Active),
        ]),
        profiles,
        analytics,
        MockPaymentRepository::new(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_later_admin_refresh_wins_over_slow_earlier_one() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_list()
        .returning(|| Ok(vec![user("u-1", Role::Seller)]));
    let mut analytics = MockAnalyticsRepository::new();
    analytics
        .expect_admin_stats()
        .returning(|| Err(AppError::unavailable("admin_stats")));

    let h = harness(
        overlapping_reads("u-1"),
        profiles,
        analytics,
        MockPaymentRepository::new(),
    );
    let console = AdminConsole::new(
        user("root", Role::Admin),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );

    let (first, second) = overlap(console.refresh(), console.refresh()).await;
    tokio_test::assert_ok!(first);
    tokio_test::assert_ok!(second);

    let state = console.snapshot().await;
    let ids: Vec<&str> = state.data.listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["new-1"]);
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_admin_status_change_refetches() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_list()
        .returning(|| Ok(vec![user("u-1", Role::Seller), user("u-2", Role::Buyer)]));

    let h = admin_harness(profiles);
    let console = AdminConsole::new(
        user("root", Role::Admin),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );
    console.refresh().await.unwrap();

    console
        .set_listing_status("ad-1", ListingStatus::Active)
        .await
        .unwrap();

    assert_eq!(h.listings.reads.load(Ordering::SeqCst), 2);
    let active = console
        .listings(&ListingQuery::default().with_status(ListingStatus::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
    assert_eq!(console.snapshot().await.data.stats.total_users, 0);
}

#[tokio::test]
async fn test_admin_membership_change_refetches_users() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_list()
        .times(2)
        .returning(|| Ok(vec![user("u-1", Role::Seller)]));
    profiles
        .expect_set_membership()
        .withf(|id, membership| id == "u-1" && *membership == MembershipType::Premium)
        .times(1)
        .returning(|_, _| Ok(()));

    let h = admin_harness(profiles);
    let console = AdminConsole::new(
        user("root", Role::Admin),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );
    console.refresh().await.unwrap();

    console
        .set_user_membership("u-1", MembershipType::Premium)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_admin_user_filter() {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_list().returning(|| {
        let mut suspended = user("u-3", Role::Seller);
        suspended.status = AccountStatus::Suspended;
        Ok(vec![
            user("u-1", Role::Seller),
            user("u-2", Role::Buyer),
            suspended,
        ])
    });

    let h = admin_harness(profiles);
    let console = AdminConsole::new(
        user("root", Role::Admin),
        &h.repositories,
        h.manager.clone(),
        DeadlineConfig::default(),
    );
    console.refresh().await.unwrap();

    let query = UserQuery::from_inputs("", "seller", "active", "all").unwrap();
    let sellers = console.users(&query).await.unwrap();
    assert_eq!(sellers.len(), 1);
    assert_eq!(sellers[0].id, "u-1");

    let by_email = UserQuery::from_inputs("U-2@EXAMPLE", "all", "all", "all").unwrap();
    assert_eq!(console.users(&by_email).await.unwrap()[0].id, "u-2");
}
