//! Raw upstream user records and their normalization into domain users.
//!
//! The upstream API returns a wide, loosely-shaped record; [`enrich`] is the
//! single place that turns it into the stable [`User`] shape. The transform
//! is total and index-preserving: it never fails and never drops records.

use serde::Deserialize;

use super::user::{Address, Company, Role, User, UserStatus};

/// Upstream user record as decoded from the wire.
///
/// Only the fields the dashboard consumes are modelled; unknown upstream
/// fields are ignored during decoding. Records are immutable once decoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    /// Upstream record identifier.
    pub id: u64,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Contact e-mail address.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Profile image URL.
    #[serde(default)]
    pub image: String,
    /// University attended.
    #[serde(default)]
    pub university: String,
    /// Free-text role string.
    #[serde(default)]
    pub role: String,
    /// Nested postal address in upstream vocabulary.
    #[serde(default)]
    pub address: RawAddress,
    /// Nested employment record; may be absent or partial.
    #[serde(default)]
    pub company: RawCompany,
}

/// Upstream postal address block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    /// Street line; renamed to `street` during enrichment.
    #[serde(default)]
    pub address: String,
    /// City name.
    #[serde(default)]
    pub city: String,
    /// State or region.
    #[serde(default)]
    pub state: String,
    /// Postal code; renamed to `zipcode` during enrichment.
    #[serde(default)]
    pub postal_code: String,
    /// Country name.
    #[serde(default)]
    pub country: String,
}

/// Upstream employment block with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompany {
    /// Employer name.
    pub name: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Department name.
    pub department: Option<String>,
}

/// Decoded response body for every users endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUserPage {
    /// Raw records for the requested window.
    #[serde(default)]
    pub users: Vec<RawUser>,
    /// Total matching records on the server.
    pub total: u64,
    /// Window offset echoed by the server.
    pub skip: u32,
    /// Window size echoed by the server.
    pub limit: u32,
}

/// Normalize raw upstream records into domain users.
///
/// Index-preserving and total. The display name is the first and last name
/// joined with a single space, with no trimming of empty parts. The status is
/// derived from the record's *position* in the input (every fourth record,
/// starting with the first, is inactive): the upstream API has no status
/// field, so this is a deliberate placeholder and is not stable across
/// different pagination windows.
#[must_use]
pub fn enrich(raw: Vec<RawUser>) -> Vec<User> {
    raw.into_iter()
        .enumerate()
        .map(|(index, user)| {
            let status = if index % 4 == 0 {
                UserStatus::Inactive
            } else {
                UserStatus::Active
            };
            User {
                id: user.id,
                name: format!("{} {}", user.first_name, user.last_name),
                username: user.username,
                email: user.email,
                address: Address {
                    street: user.address.address,
                    city: user.address.city,
                    state: user.address.state,
                    zipcode: user.address.postal_code,
                    country: user.address.country,
                },
                phone: user.phone,
                company: Company {
                    name: user.company.name.unwrap_or_default(),
                    title: user.company.title.unwrap_or_default(),
                    department: user.company.department.unwrap_or_default(),
                },
                university: user.university,
                role: Role::from_upstream(&user.role),
                status,
                avatar_url: user.image,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_user(id: u64, first: &str, last: &str, role: &str) -> RawUser {
        RawUser {
            id,
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            username: format!("{first}.{last}").to_lowercase(),
            email: format!("{first}@example.com").to_lowercase(),
            phone: "+44 7700 900000".to_owned(),
            image: format!("https://cdn.example.com/{id}.png"),
            university: "Open University".to_owned(),
            role: role.to_owned(),
            address: RawAddress {
                address: "1 High Street".to_owned(),
                city: "Leith".to_owned(),
                state: "Lothian".to_owned(),
                postal_code: "EH6 6QN".to_owned(),
                country: "United Kingdom".to_owned(),
            },
            company: RawCompany {
                name: Some("Acme".to_owned()),
                title: Some("Engineer".to_owned()),
                department: Some("Platform".to_owned()),
            },
        }
    }

    #[test]
    fn name_joins_first_and_last_with_single_space() {
        let users = enrich(vec![raw_user(1, "Ada", "Lovelace", "admin")]);
        assert_eq!(users[0].name, "Ada Lovelace");

        let users = enrich(vec![raw_user(2, "", "Lovelace", "admin")]);
        assert_eq!(users[0].name, " Lovelace", "empty parts are not trimmed");
    }

    #[test]
    fn status_is_derived_from_position_not_identity() {
        let raw = (0..9)
            .map(|id| raw_user(id, "Ada", "Lovelace", "admin"))
            .collect();
        let users = enrich(raw);
        for (index, user) in users.iter().enumerate() {
            let expected = if index % 4 == 0 {
                UserStatus::Inactive
            } else {
                UserStatus::Active
            };
            assert_eq!(user.status, expected, "status mismatch at index {index}");
        }
    }

    #[test]
    fn address_fields_are_remapped_structurally() {
        let users = enrich(vec![raw_user(1, "Ada", "Lovelace", "admin")]);
        let address = &users[0].address;
        assert_eq!(address.street, "1 High Street");
        assert_eq!(address.zipcode, "EH6 6QN");
        assert_eq!(address.city, "Leith");
    }

    #[test]
    fn missing_company_fields_default_to_empty_strings() {
        let mut raw = raw_user(1, "Ada", "Lovelace", "admin");
        raw.company = RawCompany::default();
        let users = enrich(vec![raw]);
        assert_eq!(users[0].company.name, "");
        assert_eq!(users[0].company.title, "");
        assert_eq!(users[0].company.department, "");
    }

    #[test]
    fn decodes_a_page_while_ignoring_unknown_fields() {
        let body = r#"{
            "users": [
                {
                    "id": 7,
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "username": "ada",
                    "email": "ada@example.com",
                    "phone": "+44 7700 900000",
                    "image": "https://cdn.example.com/7.png",
                    "university": "Open University",
                    "role": "moderator",
                    "age": 36,
                    "bloodGroup": "O-",
                    "address": {
                        "address": "1 High Street",
                        "city": "Leith",
                        "state": "Lothian",
                        "stateCode": "LO",
                        "postalCode": "EH6 6QN",
                        "country": "United Kingdom"
                    },
                    "company": { "name": "Acme" }
                }
            ],
            "total": 208,
            "skip": 0,
            "limit": 20
        }"#;

        let page: RawUserPage = serde_json::from_str(body).expect("page should decode");
        assert_eq!(page.total, 208);
        assert_eq!(page.users.len(), 1);

        let users = enrich(page.users);
        assert_eq!(users[0].role, Role::Editor);
        assert_eq!(users[0].company.name, "Acme");
        assert_eq!(users[0].company.title, "", "absent title defaults to empty");
    }
}
