//! Vendor account types.

use bazaar_catalog::VendorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered vendor.
///
/// The password is kept as entered. Copies handed out as the active session
/// carry an empty password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub business_name: String,
    /// Login email, unique across vendors.
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    /// Stamp a registration with an ID and creation time.
    pub fn from_new(input: NewVendor) -> Self {
        Self {
            id: VendorId::generate(),
            business_name: input.business_name,
            email: input.email,
            password: input.password,
            contact_person: input.contact_person,
            phone: input.phone,
            address: input.address,
            created_at: Utc::now(),
        }
    }

    /// Copy with the password blanked, as stored for the session.
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }

    /// Exact, case-sensitive credential match.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// Registration input: a vendor without ID or timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVendor {
    pub business_name: String,
    pub email: String,
    pub password: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
}
