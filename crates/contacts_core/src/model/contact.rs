//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical persisted contact record and its wire shape.
//! - Turn raw create/update input into validated, typed values.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - `first_name`, `last_name`, `email` are non-empty after trimming.
//! - `email` is stored lower-cased.
//! - `birthday` is either absent or a real calendar date.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a persisted contact.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = Uuid;

/// Wire-level field names used in validation messages.
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_EMAIL: &str = "email";

static BIRTHDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("birthday regex must compile"));

/// Validation failure for contact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// One or more required fields are missing or blank after trimming.
    MissingRequiredFields(Vec<&'static str>),
    /// Birthday input is not a `YYYY-MM-DD` calendar date.
    InvalidBirthday(String),
    /// Contact identifier is the nil UUID.
    NilContactId,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::InvalidBirthday(value) => {
                write!(f, "invalid birthday `{value}`; expected a YYYY-MM-DD calendar date")
            }
            Self::NilContactId => write!(f, "contact id cannot be the nil uuid"),
        }
    }
}

impl Error for ContactValidationError {}

/// Calendar date for a contact's birthday, kept as `YYYY-MM-DD`.
///
/// Parsing validates both the shape and calendar validity (month range,
/// day-of-month range, leap years). Unparsable input is rejected rather
/// than silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(String);

impl Birthday {
    /// Parses a `YYYY-MM-DD` string into a validated birthday.
    pub fn parse(value: &str) -> Result<Self, ContactValidationError> {
        let trimmed = value.trim();
        let captures = BIRTHDAY_RE
            .captures(trimmed)
            .ok_or_else(|| ContactValidationError::InvalidBirthday(value.to_string()))?;

        let year: u16 = captures[1]
            .parse()
            .map_err(|_| ContactValidationError::InvalidBirthday(value.to_string()))?;
        let month: u8 = captures[2]
            .parse()
            .map_err(|_| ContactValidationError::InvalidBirthday(value.to_string()))?;
        let day: u8 = captures[3]
            .parse()
            .map_err(|_| ContactValidationError::InvalidBirthday(value.to_string()))?;

        if month == 0 || month > 12 || day == 0 || day > days_in_month(year, month) {
            return Err(ContactValidationError::InvalidBirthday(value.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the canonical `YYYY-MM-DD` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Birthday {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.0
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Canonical persisted contact record.
///
/// Timestamps are unix epoch milliseconds maintained by the store:
/// `created_at` is set once on insert, `updated_at` refreshed on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stable global ID assigned by the store on insert.
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    /// Stored lower-cased. Uniqueness is intentionally not enforced.
    pub email: String,
    pub favorite_color: Option<String>,
    /// Absent means unknown.
    pub birthday: Option<Birthday>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    /// Checks record-level invariants.
    ///
    /// Write paths must call this before persisting; read paths use it to
    /// reject invalid persisted state instead of masking it.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.id.is_nil() {
            return Err(ContactValidationError::NilContactId);
        }

        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push(FIELD_FIRST_NAME);
        }
        if self.last_name.trim().is_empty() {
            missing.push(FIELD_LAST_NAME);
        }
        if self.email.trim().is_empty() {
            missing.push(FIELD_EMAIL);
        }
        if !missing.is_empty() {
            return Err(ContactValidationError::MissingRequiredFields(missing));
        }

        Ok(())
    }
}

/// Raw create input as received from a caller, prior to validation.
///
/// All fields are optional at this stage so that validation can report
/// every missing required field at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub favorite_color: Option<String>,
    pub birthday: Option<String>,
}

/// Validated contact payload prior to id/timestamp assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub favorite_color: Option<String>,
    pub birthday: Option<Birthday>,
}

impl NewContact {
    /// Validates raw input into a draft ready for persistence.
    ///
    /// # Contract
    /// - `firstName`, `lastName`, `email` must be non-empty after trimming;
    ///   all missing fields are reported together.
    /// - `email` is normalized to lower-case.
    /// - A blank `favoriteColor` is treated as absent.
    /// - A provided but unparsable `birthday` is rejected.
    pub fn into_draft(self) -> Result<ContactDraft, ContactValidationError> {
        let first_name = trimmed_required(self.first_name);
        let last_name = trimmed_required(self.last_name);
        let email = trimmed_required(self.email);

        let (first_name, last_name, email) = match (first_name, last_name, email) {
            (Some(first_name), Some(last_name), Some(email)) => (first_name, last_name, email),
            (first_name, last_name, email) => {
                let mut missing = Vec::new();
                if first_name.is_none() {
                    missing.push(FIELD_FIRST_NAME);
                }
                if last_name.is_none() {
                    missing.push(FIELD_LAST_NAME);
                }
                if email.is_none() {
                    missing.push(FIELD_EMAIL);
                }
                return Err(ContactValidationError::MissingRequiredFields(missing));
            }
        };

        let birthday = match self.birthday.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Birthday::parse(raw)?),
        };

        Ok(ContactDraft {
            first_name,
            last_name,
            email: email.to_lowercase(),
            favorite_color: normalize_optional(self.favorite_color),
            birthday,
        })
    }
}

/// Partial update input with omitted-vs-null distinction.
///
/// Each field is a double option: `None` means the field was omitted and
/// keeps its current value; `Some(None)` means an explicit JSON `null`,
/// which clears optional fields and is rejected for required ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    #[serde(deserialize_with = "double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub favorite_color: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub birthday: Option<Option<String>>,
}

impl ContactPatch {
    /// Returns whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.favorite_color.is_none()
            && self.birthday.is_none()
    }

    /// Merges this patch into an existing contact.
    ///
    /// # Contract
    /// - Omitted fields keep their current values.
    /// - Explicit `null` (or a blank string) clears `favoriteColor` and
    ///   `birthday`, and is rejected for required fields.
    /// - `email` stays lower-cased after the merge.
    /// - Timestamps are untouched here; the store refreshes `updated_at`.
    pub fn apply_to(self, mut contact: Contact) -> Result<Contact, ContactValidationError> {
        let mut cleared_required = Vec::new();

        match merge_required(self.first_name) {
            MergedField::Keep => {}
            MergedField::Set(value) => contact.first_name = value,
            MergedField::Cleared => cleared_required.push(FIELD_FIRST_NAME),
        }
        match merge_required(self.last_name) {
            MergedField::Keep => {}
            MergedField::Set(value) => contact.last_name = value,
            MergedField::Cleared => cleared_required.push(FIELD_LAST_NAME),
        }
        match merge_required(self.email) {
            MergedField::Keep => {}
            MergedField::Set(value) => contact.email = value.to_lowercase(),
            MergedField::Cleared => cleared_required.push(FIELD_EMAIL),
        }

        if !cleared_required.is_empty() {
            return Err(ContactValidationError::MissingRequiredFields(cleared_required));
        }

        if let Some(color) = self.favorite_color {
            contact.favorite_color = normalize_optional(color);
        }

        if let Some(birthday) = self.birthday {
            contact.birthday = match birthday.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(Birthday::parse(raw)?),
            };
        }

        contact.validate()?;
        Ok(contact)
    }
}

enum MergedField {
    Keep,
    Set(String),
    Cleared,
}

fn merge_required(field: Option<Option<String>>) -> MergedField {
    match field {
        None => MergedField::Keep,
        Some(value) => match trimmed_required(value) {
            Some(trimmed) => MergedField::Set(trimmed),
            None => MergedField::Cleared,
        },
    }
}

fn trimmed_required(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    trimmed_required(value)
}

// Distinguishes an explicitly provided `null` from an omitted field: a
// present key always deserializes to `Some(inner)`, while `#[serde(default)]`
// leaves omitted keys as `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
