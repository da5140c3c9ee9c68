//! User profile entity and related value objects.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_FULL_NAME, ROLE_ADMIN, ROLE_BUYER, ROLE_SELLER};
use crate::error::DomainError;
use crate::session::AuthUser;

/// Opaque, stable identifier issued by the identity provider.
pub type UserId = String;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    #[default]
    Buyer,
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Sellers and admins may post listings
    pub fn can_post(&self) -> bool {
        matches!(self, Role::Seller | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => ROLE_SELLER,
            Role::Buyer => ROLE_BUYER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ROLE_SELLER => Ok(Role::Seller),
            ROLE_BUYER => Ok(Role::Buyer),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(DomainError::unknown("role", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles a user may pick for themselves at sign-up. Admin is never self-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignUpRole {
    Seller,
    Buyer,
}

impl From<SignUpRole> for Role {
    fn from(role: SignUpRole) -> Self {
        match role {
            SignUpRole::Seller => Role::Seller,
            SignUpRole::Buyer => Role::Buyer,
        }
    }
}

impl FromStr for SignUpRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Role::from_str(s)? {
            Role::Seller => Ok(SignUpRole::Seller),
            Role::Buyer => Ok(SignUpRole::Buyer),
            Role::Admin => Err(DomainError::validation("admin role cannot be chosen at sign-up")),
        }
    }
}

/// Membership tier; changed only by an admin or an approved payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    #[default]
    Free,
    Premium,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Free => "free",
            MembershipType::Premium => "premium",
        }
    }
}

impl FromStr for MembershipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(MembershipType::Free),
            "premium" => Ok(MembershipType::Premium),
            other => Err(DomainError::unknown("membership type", other)),
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin-managed account status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "suspended" => Ok(AccountStatus::Suspended),
            other => Err(DomainError::unknown("account status", other)),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level user profile, stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub membership_type: MembershipType,
    /// Missing on older rows; treated as active
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Synthesize a transient profile from identity metadata when no stored
    /// row exists yet.
    ///
    /// Metadata is writable by the user, so only a sign-up role is taken from
    /// it. Admin falls back to buyer and membership is always free.
    pub fn fallback_from(user: &AuthUser) -> Self {
        let created_at = user.created_at.unwrap_or_else(Utc::now);
        let role = user
            .user_metadata
            .role
            .as_deref()
            .and_then(|r| r.parse::<SignUpRole>().ok())
            .map(Role::from)
            .unwrap_or_default();
        let full_name = user
            .user_metadata
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_FULL_NAME.to_string());

        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            full_name: Some(full_name),
            role,
            membership_type: MembershipType::Free,
            status: AccountStatus::Active,
            phone: None,
            location: None,
            membership_expires_at: None,
            created_at,
            updated_at: user.updated_at.unwrap_or(created_at),
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_premium(&self) -> bool {
        self.membership_type == MembershipType::Premium
    }

    /// Name for display, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Row inserted right after a successful sign-up.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub membership_type: MembershipType,
}
