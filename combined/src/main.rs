//! BuildMart command-line client.
//!
//! Drives the session reconciler and listing view-models against the hosted
//! platform configured in the environment.

mod app;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult, DeadlineConfig, PlatformConfig};
use domain::{
    AccountStatus, Category, ListingStatus, MembershipType, NewListing, SignUpRole,
};
use listing_service_lib::{DisplayListing, ListingQuery, UserQuery};
use session_service_lib::{landing_view, SignUpDetails};

use app::App;

#[derive(Parser)]
#[command(name = "buildmart")]
#[command(about = "Construction materials marketplace client", version)]
struct Cli {
    /// Account email; signs in before running the command
    #[arg(long, global = true, env = "BUILDMART_EMAIL")]
    email: Option<String>,

    #[arg(long, global = true, env = "BUILDMART_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    deadlines: DeadlineArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the BUILDMART_*_TIMEOUT_MS settings
#[derive(Args)]
struct DeadlineArgs {
    #[arg(long, global = true)]
    profile_fetch_ms: Option<u64>,
    #[arg(long, global = true)]
    auth_ms: Option<u64>,
    #[arg(long, global = true)]
    listing_read_ms: Option<u64>,
    #[arg(long, global = true)]
    listing_write_ms: Option<u64>,
}

impl DeadlineArgs {
    fn resolve(&self) -> DeadlineConfig {
        let mut deadlines = DeadlineConfig::from_env();
        if let Some(ms) = self.profile_fetch_ms {
            deadlines.profile_fetch_ms = ms;
        }
        if let Some(ms) = self.auth_ms {
            deadlines.auth_ms = ms;
        }
        if let Some(ms) = self.listing_read_ms {
            deadlines.listing_read_ms = ms;
        }
        if let Some(ms) = self.listing_write_ms {
            deadlines.listing_write_ms = ms;
        }
        deadlines
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List active listings
    Browse {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: String,
        /// Print JSON instead of one line per listing
        #[arg(long)]
        json: bool,
    },
    /// Create an account with --email and --password
    Register {
        #[arg(long, default_value = "")]
        name: String,
        /// seller or buyer
        #[arg(long, default_value = "buyer")]
        role: String,
    },
    /// Show the signed-in profile
    Whoami,
    /// Post a listing
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
    },
    /// Seller dashboard
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Admin console
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum SellerAction {
    /// Own listings and counters
    Listings,
    /// Change the status of an own listing
    Status { id: String, status: String },
    /// Delete an own listing
    Delete { id: String },
    /// Request premium membership with a payment proof
    Premium { file: PathBuf },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Platform statistics
    Stats,
    Users {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        role: String,
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value = "all")]
        membership: String,
    },
    Listings {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Suspend or reactivate an account
    UserStatus { id: String, status: String },
    /// Set a user's membership tier
    Membership { id: String, tier: String },
    /// Moderate a listing
    AdStatus { id: String, status: String },
    /// Delete any listing
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        error!(code = e.code(), "{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let platform = PlatformConfig::from_env();
    let app = App::new(&platform, cli.deadlines.resolve())?;

    let _listener = app.session.subscribe(|snapshot| {
        debug!(phase = ?snapshot.phase(), user_id = ?snapshot.user_id(), "Session changed");
    });

    if let Commands::Register { name, role } = &cli.command {
        let email = cli.email.as_deref().unwrap_or_default();
        let password = cli.password.as_deref().unwrap_or_default();
        app.session.initialize().await;
        let outcome = app
            .session
            .sign_up(
                email,
                password,
                SignUpDetails {
                    full_name: name.clone(),
                    role: role.parse::<SignUpRole>()?,
                },
            )
            .await?;

        println!("Account created for {}", outcome.user.email.unwrap_or_default());
        if !outcome.signed_in {
            println!("Check your inbox to confirm the address before signing in.");
        }
        return Ok(());
    }

    let login = match (&cli.email, &cli.password) {
        (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
        _ => None,
    };
    app.start(login).await?;

    match cli.command {
        Commands::Browse {
            search,
            category,
            json,
        } => {
            let catalog = app.catalog();
            catalog.load().await;

            let query = ListingQuery::from_inputs(&search, &category, "all")?;
            let view = catalog.visible(&query).await;
            if let Some(error) = catalog.snapshot().await.error {
                eprintln!("{}", error);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&view.items)?);
            } else {
                view.items.iter().for_each(print_listing);
                match view.hint() {
                    Some(hint) => println!("No listings found. {}", hint),
                    None => println!("{} of {} listings", view.count(), view.total),
                }
            }
        }
        Commands::Register { .. } => {}
        Commands::Whoami => {
            let user = app.require_user()?;
            let identity = app.auth_user().await?;
            println!("{} <{}>", user.display_name(), user.email);
            println!("identity: {}", identity.id);
            println!(
                "role: {}  membership: {}  status: {}",
                user.role, user.membership_type, user.status
            );
            println!("landing view: {:?}", landing_view(Some(&user)));
        }
        Commands::Post {
            title,
            description,
            price,
            category,
            location,
            phone,
            contact_email,
        } => {
            let user = app.require_user()?;
            let listing = NewListing {
                title,
                description,
                price,
                category: category.parse::<Category>()?,
                location,
                contact_phone: phone,
                contact_email,
            };
            app.catalog().post(&user, listing).await?;
            println!("Listing posted");
        }
        Commands::Seller { action } => {
            let dashboard = app.seller_dashboard(app.require_user()?);
            dashboard.refresh().await?;

            match action {
                SellerAction::Listings => {
                    let overview = dashboard.snapshot().await.data;
                    for listing in &overview.listings {
                        println!(
                            "{}  [{}]  {}  PKR {:.0}",
                            listing.id, listing.status, listing.title, listing.price
                        );
                    }
                    let stats = overview.stats;
                    println!(
                        "total: {}  active: {}  views: {}  contacts: {}",
                        stats.total_ads, stats.active_ads, stats.total_views, stats.total_contacts
                    );
                }
                SellerAction::Status { id, status } => {
                    dashboard.set_status(&id, status.parse::<ListingStatus>()?).await?;
                    println!("Listing {} updated", id);
                }
                SellerAction::Delete { id } => {
                    dashboard.delete(&id).await?;
                    println!("Listing {} deleted", id);
                }
                SellerAction::Premium { file } => {
                    let size = std::fs::metadata(&file)
                        .map_err(|e| AppError::validation(format!("Cannot read {}: {}", file.display(), e)))?
                        .len();
                    let name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();

                    let request = dashboard.request_premium(&name, size).await?;
                    if request.is_simulated() {
                        println!("Payment proof accepted (simulated). An admin will review your upgrade.");
                    } else {
                        println!("Payment proof submitted. An admin will review your upgrade.");
                    }
                }
            }
        }
        Commands::Admin { action } => {
            let console = app.admin_console(app.require_user()?);
            console.refresh().await?;

            match action {
                AdminAction::Stats => {
                    let stats = console.snapshot().await.data.stats;
                    println!("users: {}  sellers: {}  buyers: {}", stats.total_users, stats.total_sellers, stats.total_buyers);
                    println!("ads: {}  signups today: {}  views today: {}", stats.total_ads, stats.today_signups, stats.today_views);
                }
                AdminAction::Users {
                    search,
                    role,
                    status,
                    membership,
                } => {
                    let query = UserQuery::from_inputs(&search, &role, &status, &membership)?;
                    for user in console.users(&query).await? {
                        println!(
                            "{}  {} <{}>  {}  {}  {}",
                            user.id,
                            user.display_name(),
                            user.email,
                            user.role,
                            user.membership_type,
                            user.status
                        );
                    }
                }
                AdminAction::Listings {
                    search,
                    category,
                    status,
                } => {
                    let query = ListingQuery::from_inputs(&search, &category, &status)?;
                    for listing in console.listings(&query).await? {
                        println!(
                            "{}  [{}]  {}  by {}",
                            listing.id,
                            listing.status,
                            listing.title,
                            listing_service_lib::normalize::seller_name(&listing)
                        );
                    }
                }
                AdminAction::UserStatus { id, status } => {
                    console
                        .set_user_status(&id, status.parse::<AccountStatus>()?)
                        .await?;
                    println!("User {} is now {}", id, status);
                }
                AdminAction::Membership { id, tier } => {
                    console
                        .set_user_membership(&id, tier.parse::<MembershipType>()?)
                        .await?;
                    println!("User {} membership set to {}", id, tier);
                }
                AdminAction::AdStatus { id, status } => {
                    console
                        .set_listing_status(&id, status.parse::<ListingStatus>()?)
                        .await?;
                    println!("Listing {} updated", id);
                }
                AdminAction::Delete { id } => {
                    console.delete_listing(&id).await?;
                    println!("Listing {} deleted", id);
                }
            }
        }
    }

    Ok(())
}

fn print_listing(listing: &DisplayListing) {
    let badge = if listing.is_premium { " ★" } else { "" };
    println!(
        "{} {}{}  PKR {:.0}  {}  {}  ({})",
        listing.glyph, listing.title, badge, listing.price, listing.category, listing.location, listing.seller
    );
}
