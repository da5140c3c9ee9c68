//! Listing (ad) entity, its closed status and category vocabularies.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{DomainError, DomainResult};
use crate::user::UserId;

pub type ListingId = String;

/// Canonical listing status.
///
/// The store has used two vocabularies over time. `approved` maps to
/// `Active` and `rejected` maps to `Inactive`; only the canonical names are
/// ever written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Pending,
    #[serde(alias = "approved")]
    Active,
    #[serde(alias = "rejected")]
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ListingStatus::Pending),
            "active" | "approved" => Ok(ListingStatus::Active),
            "inactive" | "rejected" => Ok(ListingStatus::Inactive),
            other => Err(DomainError::unknown("listing status", other)),
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing category.
///
/// The extended taxonomy offered by the posting form folds into these
/// canonical values (see [`Category::parse`]); anything else is kept
/// verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Materials,
    Equipment,
    Tools,
    Safety,
    Services,
    Other(String),
}

impl Category {
    /// Canonical categories offered by the browse filter
    pub const ALL: [Category; 5] = [
        Category::Materials,
        Category::Equipment,
        Category::Tools,
        Category::Safety,
        Category::Services,
    ];

    /// Case-insensitive parse; extended names map onto canonical ones.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "materials"
            | "building materials"
            | "concrete & cement"
            | "roofing materials"
            | "flooring"
            | "paint & coatings"
            | "electrical supplies"
            | "plumbing supplies" => Category::Materials,
            "equipment" | "heavy machinery" => Category::Equipment,
            "tools" | "tools & equipment" | "hardware" => Category::Tools,
            "safety" | "safety equipment" => Category::Safety,
            "services" => Category::Services,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Materials => "Materials",
            Category::Equipment => "Equipment",
            Category::Tools => "Tools",
            Category::Safety => "Safety",
            Category::Services => "Services",
            Category::Other(raw) => raw,
        }
    }

    /// Fixed category -> glyph lookup used for display
    pub fn glyph(&self) -> &'static str {
        match self {
            Category::Materials => "🏗️",
            Category::Equipment => "🚛",
            Category::Tools => "🔧",
            Category::Safety => "🦺",
            Category::Services | Category::Other(_) => "🏢",
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Category::parse(raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DomainError::validation("Category is required"));
        }
        Ok(Category::parse(s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Seller fields embedded through the `ads -> users` foreign key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerSummary {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Nullable columns decode to the field's default instead of failing the row.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Listing as stored in the `ads` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub seller_id: UserId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ListingStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, alias = "users", skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerSummary>,
}

impl Listing {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.seller_id == user_id
    }
}

/// Listing details collected by the posting form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewListing {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(custom(function = "validate_category"))]
    pub category: Category,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Contact email is invalid"))]
    pub contact_email: Option<String>,
}

impl NewListing {
    /// Trim free-text fields and run validation.
    pub fn validated(mut self) -> DomainResult<Self> {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.location = self.location.trim().to_string();
        self.contact_phone = self.contact_phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self.contact_email = self.contact_email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());

        self.validate()
            .map_err(|errors| DomainError::validation(first_message(&errors)))?;
        Ok(self)
    }
}

fn validate_category(category: &Category) -> Result<(), ValidationError> {
    match category {
        Category::Other(raw) if raw.trim().is_empty() => {
            let mut error = ValidationError::new("category");
            error.message = Some("Category is required".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid listing".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_listing() -> NewListing {
        NewListing {
            title: "  Steel Rebar  ".to_string(),
            description: "Grade 60".to_string(),
            price: 850.0,
            category: Category::Materials,
            location: "Lahore".to_string(),
            contact_phone: Some("   ".to_string()),
            contact_email: None,
        }
    }

    #[test]
    fn test_status_accepts_both_vocabularies() {
        assert_eq!("approved".parse::<ListingStatus>(), Ok(ListingStatus::Active));
        assert_eq!("rejected".parse::<ListingStatus>(), Ok(ListingStatus::Inactive));
        assert_eq!("Active".parse::<ListingStatus>(), Ok(ListingStatus::Active));
        assert!("archived".parse::<ListingStatus>().is_err());

        let status: ListingStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, ListingStatus::Active);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"active\"");
    }

    #[test]
    fn test_extended_categories_fold_to_canonical() {
        assert_eq!(Category::parse("Building Materials"), Category::Materials);
        assert_eq!(Category::parse("Heavy Machinery"), Category::Equipment);
        assert_eq!(Category::parse("hardware"), Category::Tools);
        assert_eq!(Category::parse("Safety Equipment"), Category::Safety);
        assert_eq!(Category::parse("materials"), Category::Materials);
        assert_eq!(
            Category::parse("Landscaping"),
            Category::Other("Landscaping".to_string())
        );
    }

    #[test]
    fn test_category_glyphs() {
        assert_eq!(Category::Materials.glyph(), "🏗️");
        assert_eq!(Category::Equipment.glyph(), "🚛");
        assert_eq!(Category::Tools.glyph(), "🔧");
        assert_eq!(Category::Safety.glyph(), "🦺");
        assert_eq!(Category::Other("x".into()).glyph(), "🏢");
    }

    #[test]
    fn test_listing_row_with_joined_seller() {
        let row = serde_json::json!({
            "id": "ad-1",
            "seller_id": "u-1",
            "title": "Mixer",
            "description": "350L",
            "price": 2500,
            "category": "Equipment",
            "location": "Karachi",
            "status": "approved",
            "created_at": "2024-01-10T10:00:00Z",
            "updated_at": "2024-01-10T10:00:00Z",
            "users": { "full_name": "John Co." }
        });

        let listing: Listing = serde_json::from_value(row).unwrap();
        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(listing.category, Category::Equipment);
        assert_eq!(
            listing.seller.and_then(|s| s.full_name).as_deref(),
            Some("John Co.")
        );
        assert!(!listing.is_premium);
    }

    #[test]
    fn test_listing_row_with_null_columns() {
        let row = serde_json::json!({
            "id": "ad-2",
            "seller_id": "u-1",
            "title": "Bricks",
            "description": null,
            "price": 12,
            "category": "Bricks",
            "location": null,
            "images": null,
            "status": null,
            "is_featured": null,
            "is_premium": null,
            "contact_phone": null,
            "created_at": "2024-01-10T10:00:00Z",
            "updated_at": "2024-01-10T10:00:00Z"
        });

        let listing: Listing = serde_json::from_value(row).unwrap();
        assert_eq!(listing.description, "");
        assert_eq!(listing.location, "");
        assert!(listing.images.is_empty());
        assert_eq!(listing.status, ListingStatus::Pending);
        assert!(!listing.is_featured);
        assert!(!listing.is_premium);
        assert_eq!(listing.contact_phone, None);
    }

    #[test]
    fn test_new_listing_trims_and_validates() {
        let listing = new_listing().validated().unwrap();
        assert_eq!(listing.title, "Steel Rebar");
        assert_eq!(listing.contact_phone, None);
    }

    #[test]
    fn test_new_listing_rejects_negative_price() {
        let result = NewListing {
            price: -1.0,
            ..new_listing()
        }
        .validated();

        assert_eq!(
            result,
            Err(DomainError::validation("Price cannot be negative"))
        );
    }

    #[test]
    fn test_new_listing_rejects_blank_title() {
        let result = NewListing {
            title: "   ".to_string(),
            ..new_listing()
        }
        .validated();

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
