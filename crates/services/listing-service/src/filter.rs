//! Pure, order-preserving filters over already-fetched records.
//!
//! Filtering never clones or reorders: the result borrows from the input,
//! so it is always a subset of it in input order. A criterion left
//! unset (or set to `"all"`) matches everything.

use std::str::FromStr;

use domain::{
    AccountStatus, Category, DomainError, Listing, ListingStatus, MembershipType, Role,
    UserProfile, FILTER_ALL,
};

use crate::normalize::{seller_name, DisplayListing};

/// Fields a listing filter inspects.
pub trait ListingRecord {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn seller_name(&self) -> &str;
    fn category(&self) -> &Category;
    fn status(&self) -> ListingStatus;
}

impl ListingRecord for DisplayListing {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn seller_name(&self) -> &str {
        &self.seller
    }

    fn category(&self) -> &Category {
        &self.category
    }

    fn status(&self) -> ListingStatus {
        self.status
    }
}

impl ListingRecord for Listing {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn seller_name(&self) -> &str {
        seller_name(self)
    }

    fn category(&self) -> &Category {
        &self.category
    }

    fn status(&self) -> ListingStatus {
        self.status
    }
}

/// Listing filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ListingStatus>,
}

impl ListingQuery {
    /// Build from raw view inputs; empty text and `"all"` mean unset.
    pub fn from_inputs(search: &str, category: &str, status: &str) -> Result<Self, DomainError> {
        Ok(Self {
            search: search_term(search),
            category: criterion(category).map(Category::parse),
            status: criterion(status).map(ListingStatus::from_str).transpose()?,
        })
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search = search_term(term);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when any criterion is set
    pub fn is_filtering(&self) -> bool {
        self.search.is_some() || self.category.is_some() || self.status.is_some()
    }

    pub fn matches<T: ListingRecord>(&self, record: &T) -> bool {
        let search = self.search.as_deref().map_or(true, |term| {
            contains_folded(record.title(), term)
                || contains_folded(record.description(), term)
                || contains_folded(record.seller_name(), term)
        });
        let category = self
            .category
            .as_ref()
            .map_or(true, |c| c == record.category());
        let status = self.status.map_or(true, |s| s == record.status());

        search && category && status
    }
}

/// User filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
    pub membership: Option<MembershipType>,
}

impl UserQuery {
    /// Build from raw view inputs; empty text and `"all"` mean unset.
    pub fn from_inputs(
        search: &str,
        role: &str,
        status: &str,
        membership: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            search: search_term(search),
            role: criterion(role).map(Role::from_str).transpose()?,
            status: criterion(status).map(AccountStatus::from_str).transpose()?,
            membership: criterion(membership)
                .map(MembershipType::from_str)
                .transpose()?,
        })
    }

    pub fn is_filtering(&self) -> bool {
        self.search.is_some()
            || self.role.is_some()
            || self.status.is_some()
            || self.membership.is_some()
    }

    pub fn matches(&self, user: &UserProfile) -> bool {
        let search = self.search.as_deref().map_or(true, |term| {
            user.full_name
                .as_deref()
                .is_some_and(|name| contains_folded(name, term))
                || contains_folded(&user.email, term)
        });

        search
            && self.role.map_or(true, |r| r == user.role)
            && self.status.map_or(true, |s| s == user.status)
            && self.membership.map_or(true, |m| m == user.membership_type)
    }
}

pub fn filter_listings<'a, T: ListingRecord>(listings: &'a [T], query: &ListingQuery) -> Vec<&'a T> {
    listings.iter().filter(|l| query.matches(*l)).collect()
}

pub fn filter_users<'a>(users: &'a [UserProfile], query: &UserQuery) -> Vec<&'a UserProfile> {
    users.iter().filter(|u| query.matches(u)).collect()
}

fn search_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn criterion(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(FILTER_ALL)).then_some(trimmed)
}

/// `term` is already lowercased
fn contains_folded(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_display;

    fn ids(listings: &[&DisplayListing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    fn queries() -> Vec<ListingQuery> {
        vec![
            ListingQuery::default(),
            ListingQuery::default().with_search("steel"),
            ListingQuery::default().with_search("KARACHI"),
            ListingQuery::default().with_category(Category::Equipment),
            ListingQuery::default()
                .with_search("premium")
                .with_category(Category::Materials),
            ListingQuery::default().with_status(ListingStatus::Inactive),
            ListingQuery::default().with_search("no such thing"),
        ]
    }

    #[test]
    fn test_steel_in_materials_scenario() {
        let listings = sample_display();
        let query = ListingQuery::from_inputs("steel", "Materials", "all").unwrap();

        let result = filter_listings(&listings, &query);

        assert_eq!(ids(&result), vec!["1", "7", "10"]);
    }

    #[test]
    fn test_unset_criteria_return_input_unchanged() {
        let listings = sample_display();
        let query = ListingQuery::from_inputs("  ", "all", "").unwrap();
        assert!(!query.is_filtering());

        let result = filter_listings(&listings, &query);

        assert_eq!(result.len(), listings.len());
        assert!(result.iter().zip(&listings).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_result_is_ordered_subset_of_input() {
        let listings = sample_display();

        for query in queries() {
            let result = filter_listings(&listings, &query);
            let positions: Vec<usize> = result
                .iter()
                .map(|r| {
                    listings
                        .iter()
                        .position(|l| std::ptr::eq(l, *r))
                        .expect("result borrowed from input")
                })
                .collect();

            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", query);
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let listings = sample_display();

        for query in queries() {
            let once: Vec<DisplayListing> = filter_listings(&listings, &query)
                .into_iter()
                .cloned()
                .collect();
            let twice = filter_listings(&once, &query);
            assert_eq!(twice.len(), once.len(), "{:?}", query);
        }
    }

    #[test]
    fn test_search_matches_seller_name() {
        let listings = sample_display();
        let query = ListingQuery::default().with_search("safework");

        assert_eq!(ids(&filter_listings(&listings, &query)), vec!["4"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let listings = sample_display();
        let query = ListingQuery::default().with_search("titanium");

        assert!(filter_listings(&listings, &query).is_empty());
    }

    #[test]
    fn test_category_input_accepts_extended_names() {
        let query = ListingQuery::from_inputs("", "Heavy Machinery", "all").unwrap();
        assert_eq!(query.category, Some(Category::Equipment));
    }

    #[test]
    fn test_unknown_status_input_is_rejected() {
        assert!(ListingQuery::from_inputs("", "all", "archived").is_err());
        assert_eq!(
            ListingQuery::from_inputs("", "all", "approved").unwrap().status,
            Some(ListingStatus::Active)
        );
    }
}
