//! Domain DTOs for the student API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. All
//! fields except `id` are free-form strings: the server owns validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A student record as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub country: String,
    pub avatar: String,
    pub btc_address: String,
}

impl Student {
    pub fn from_fields(id: u64, fields: NewStudent) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            gender: fields.gender,
            country: fields.country,
            avatar: fields.avatar,
            btc_address: fields.btc_address,
        }
    }

    /// Everything but the server-assigned id.
    pub fn fields(&self) -> NewStudent {
        NewStudent {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            gender: self.gender.clone(),
            country: self.country.clone(),
            avatar: self.avatar.clone(),
            btc_address: self.btc_address.clone(),
        }
    }
}

/// Request payload for creating a student: a `Student` without `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub country: String,
    pub avatar: String,
    pub btc_address: String,
}

impl Default for NewStudent {
    /// The empty create-form template.
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            gender: DEFAULT_GENDER.to_string(),
            country: String::new(),
            avatar: String::new(),
            btc_address: String::new(),
        }
    }
}

impl NewStudent {
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::FirstName => &self.first_name,
            StudentField::LastName => &self.last_name,
            StudentField::Email => &self.email,
            StudentField::Gender => &self.gender,
            StudentField::Country => &self.country,
            StudentField::Avatar => &self.avatar,
            StudentField::BtcAddress => &self.btc_address,
        }
    }

    /// Replace exactly one field, leaving the others untouched.
    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        let slot = match field {
            StudentField::FirstName => &mut self.first_name,
            StudentField::LastName => &mut self.last_name,
            StudentField::Email => &mut self.email,
            StudentField::Gender => &mut self.gender,
            StudentField::Country => &mut self.country,
            StudentField::Avatar => &mut self.avatar,
            StudentField::BtcAddress => &mut self.btc_address,
        };
        *slot = value.into();
    }
}

/// The projection of `Student` used by list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: u64,
    pub email: String,
    pub last_name: String,
    pub avatar: String,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            email: student.email.clone(),
            last_name: student.last_name.clone(),
            avatar: student.avatar.clone(),
        }
    }
}

pub const DEFAULT_GENDER: &str = "other";
pub const GENDERS: [&str; 3] = ["male", "female", DEFAULT_GENDER];

/// An editable field of a student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    FirstName,
    LastName,
    Email,
    Gender,
    Country,
    Avatar,
    BtcAddress,
}

impl StudentField {
    pub const ALL: [StudentField; 7] = [
        StudentField::Email,
        StudentField::Gender,
        StudentField::Country,
        StudentField::FirstName,
        StudentField::LastName,
        StudentField::Avatar,
        StudentField::BtcAddress,
    ];

    /// Wire name, also the key used in validation error maps.
    pub fn name(self) -> &'static str {
        match self {
            StudentField::FirstName => "first_name",
            StudentField::LastName => "last_name",
            StudentField::Email => "email",
            StudentField::Gender => "gender",
            StudentField::Country => "country",
            StudentField::Avatar => "avatar",
            StudentField::BtcAddress => "btc_address",
        }
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StudentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudentField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown student field `{s}`"))
    }
}

/// Identifier as it appears in a route or a request path.
///
/// Accepts numeric and textual input alike and is interpolated verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(String);

impl StudentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for StudentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
