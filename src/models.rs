use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::schema::{ADDRESS_MAX, FIRST_NAME_MAX, LAST_NAME_MAX, PHONE_MAX};

/// A row of the `contacts` table, also the JSON body of every contact endpoint.
///
/// `id` defaults to 0 when a request body omits it. Create ignores it and
/// update compares it with the path id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    /// Checks that every field is present and fits its column.
    pub fn validate(&self) -> Result<(), ApiError> {
        check_field("firstName", &self.first_name, FIRST_NAME_MAX)?;
        check_field("lastName", &self.last_name, LAST_NAME_MAX)?;
        check_field("address", &self.address, ADDRESS_MAX)?;
        check_field("phone", &self.phone, PHONE_MAX)
    }
}

fn check_field(name: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Invalid(format!("{} is required", name)));
    }
    if value.chars().count() > max {
        return Err(ApiError::Invalid(format!(
            "{} must be at most {} characters",
            name, max
        )));
    }
    Ok(())
}

/// Exact-match filter for `GET /contacts/info`. Absent or empty fields match anything.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl ContactFilter {
    /// Drops empty strings so that only real constraints remain.
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }

        Self {
            first_name: keep(self.first_name),
            last_name: keep(self.last_name),
            address: keep(self.address),
            phone: keep(self.phone),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// Strips everything but ASCII digits and periods.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}
