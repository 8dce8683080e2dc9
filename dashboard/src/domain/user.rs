//! Normalized user records consumed by the presentation layer.
//!
//! These are the domain-owned shapes produced by enrichment; raw upstream
//! records never leak past the fetch pipeline. All types are plain data and
//! read-only to consumers.

use serde::{Deserialize, Serialize};

/// Application role derived from the upstream free-text role string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Can modify content (upstream calls this `moderator`).
    Editor,
    /// Read-only access; the default for unknown upstream roles.
    Viewer,
}

impl Role {
    /// Map an upstream role string onto the application vocabulary.
    ///
    /// Case-insensitive and total: `admin` maps to [`Role::Admin`],
    /// `moderator` to [`Role::Editor`], and anything else, including the
    /// empty string, to [`Role::Viewer`].
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::Role;
    ///
    /// assert_eq!(Role::from_upstream("ADMIN"), Role::Admin);
    /// assert_eq!(Role::from_upstream("Moderator"), Role::Editor);
    /// assert_eq!(Role::from_upstream(""), Role::Viewer);
    /// ```
    #[must_use]
    pub fn from_upstream(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "admin" => Self::Admin,
            "moderator" => Self::Editor,
            _ => Self::Viewer,
        }
    }

    /// The value the upstream filter endpoint expects for this role.
    #[must_use]
    pub const fn upstream_value(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "moderator",
            Self::Viewer => "user",
        }
    }
}

/// Activity status attached during enrichment.
///
/// The upstream API carries no status field; the pipeline derives a
/// placeholder value from the record's position in the fetched window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Shown as an active account.
    Active,
    /// Shown as an inactive account.
    Inactive,
}

/// Postal address in the normalized field vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line (upstream `address.address`).
    pub street: String,
    /// City name.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code (upstream `address.postalCode`).
    pub zipcode: String,
    /// Country name.
    pub country: String,
}

/// Employment details; fields default to empty strings when the upstream
/// record omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Employer name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Department name.
    pub department: String,
}

/// Normalized user record.
///
/// Derived deterministically from exactly one raw upstream record by
/// [`enrich`](crate::domain::enrich); owned by the pipeline and read-only to
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Upstream record identifier.
    pub id: u64,
    /// Display name composed from the upstream first and last names.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Contact e-mail address.
    pub email: String,
    /// Normalized postal address.
    pub address: Address,
    /// Contact phone number.
    pub phone: String,
    /// Employment details.
    pub company: Company,
    /// University attended.
    pub university: String,
    /// Application role.
    pub role: Role,
    /// Derived activity status.
    pub status: UserStatus,
    /// Profile image URL (upstream `image`).
    pub avatar_url: String,
}
