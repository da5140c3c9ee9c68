//! Uniform display shape for listings from either source.

use serde::Serialize;

use domain::{Category, Listing, ListingId, ListingStatus, UserId, UNKNOWN_SELLER};

/// Where a displayed listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingSource {
    Remote,
    Sample,
}

/// Flat built-in listing shown when the store is unreachable or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub location: String,
    pub seller: String,
    pub glyph: &'static str,
    pub is_premium: bool,
}

/// Either listing shape.
#[derive(Debug, Clone, Copy)]
pub enum RawListing<'a> {
    Remote(&'a Listing),
    Sample(&'a SampleListing),
}

/// What the browse view renders for one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayListing {
    pub id: ListingId,
    /// Absent for sample listings
    pub seller_id: Option<UserId>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub location: String,
    pub seller: String,
    pub glyph: &'static str,
    pub status: ListingStatus,
    pub is_premium: bool,
    pub is_featured: bool,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub source: ListingSource,
}

pub fn normalize(raw: RawListing<'_>) -> DisplayListing {
    match raw {
        RawListing::Remote(listing) => DisplayListing {
            id: listing.id.clone(),
            seller_id: Some(listing.seller_id.clone()),
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            category: listing.category.clone(),
            location: listing.location.clone(),
            seller: seller_name(listing).to_string(),
            glyph: listing.category.glyph(),
            status: listing.status,
            is_premium: listing.is_premium,
            is_featured: listing.is_featured,
            contact_phone: listing.contact_phone.clone(),
            contact_email: listing.contact_email.clone(),
            source: ListingSource::Remote,
        },
        RawListing::Sample(sample) => DisplayListing {
            id: sample.id.clone(),
            seller_id: None,
            title: sample.title.clone(),
            description: sample.description.clone(),
            price: sample.price,
            category: sample.category.clone(),
            location: sample.location.clone(),
            seller: sample.seller.clone(),
            glyph: sample.glyph,
            status: ListingStatus::Active,
            is_premium: sample.is_premium,
            is_featured: false,
            contact_phone: None,
            contact_email: None,
            source: ListingSource::Sample,
        },
    }
}

/// Joined seller name, or the placeholder when the join carried none.
pub fn seller_name(listing: &Listing) -> &str {
    listing
        .seller
        .as_ref()
        .and_then(|s| s.full_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_SELLER)
}
