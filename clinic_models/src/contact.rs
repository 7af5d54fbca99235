//! Contact form submissions and the validation schema shared by the
//! submission endpoint and the form controller.

use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use thiserror::Error;

use crate::email_address::EmailAddress;

pub const NAME_MAX_LENGTH: usize = 100;
pub const PHONE_MIN_LENGTH: usize = 10;
pub const MESSAGE_MIN_LENGTH: usize = 10;
pub const MESSAGE_MAX_LENGTH: usize = 1000;

pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-()\s]*$").unwrap());

/// `local@domain.tld`: no whitespace, a single `@` and at least one dot in the
/// domain with non-empty labels on both sides.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub phone: ContactPhone,
    pub preferred_time: PreferredTime,
    pub message: ContactMessageContent,
}

#[nutype(
    validate(len_char_min = 1, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 10, regex = PHONE_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactPhone(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 1000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    Any,
}

impl PreferredTime {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Any];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Any => "any",
        }
    }

    /// Human readable label used in notification emails.
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Any => "Any time",
        }
    }
}

impl FromStr for PreferredTime {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or_else(|| UnknownVariantError(s.into()))
    }
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The named fields of the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    PreferredTime,
    Message,
    Honeypot,
}

impl ContactField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::PreferredTime,
        Self::Message,
        Self::Honeypot,
    ];

    /// Fields the user can see and fill in.
    pub const VISIBLE: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::PreferredTime,
        Self::Message,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PreferredTime => "preferredTime",
            Self::Message => "message",
            Self::Honeypot => "honeypot",
        }
    }
}

impl FromStr for ContactField {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or_else(|| UnknownVariantError(s.into()))
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown variant: {0:?}")]
pub struct UnknownVariantError(pub String);

/// Untrusted form payload. A missing field is treated like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub honeypot: Option<String>,
}

impl RawContactSubmission {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::PreferredTime => &self.preferred_time,
            ContactField::Message => &self.message,
            ContactField::Honeypot => &self.honeypot,
        }
        .as_deref()
        .unwrap_or_default()
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::PreferredTime => &mut self.preferred_time,
            ContactField::Message => &mut self.message,
            ContactField::Honeypot => &mut self.honeypot,
        };
        *slot = Some(value.into());
    }

    pub fn honeypot_filled(&self) -> bool {
        !self.get(ContactField::Honeypot).is_empty()
    }
}

impl From<&ContactSubmission> for RawContactSubmission {
    fn from(value: &ContactSubmission) -> Self {
        Self {
            name: Some(value.name.to_string()),
            email: Some(value.email.to_string()),
            phone: Some(value.phone.to_string()),
            preferred_time: Some(value.preferred_time.as_str().into()),
            message: Some(value.message.to_string()),
            honeypot: Some(String::new()),
        }
    }
}

/// Error messages per invalid field. Valid fields have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactValidationErrors(BTreeMap<ContactField, Vec<String>>);

impl ContactValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: ContactField) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &[String])> {
        self.0.iter().map(|(&field, messages)| (field, messages.as_slice()))
    }

    pub fn insert(&mut self, field: ContactField, messages: Vec<String>) {
        if !messages.is_empty() {
            self.0.insert(field, messages);
        }
    }
}

impl FromIterator<(ContactField, Vec<String>)> for ContactValidationErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, Vec<String>)>>(iter: T) -> Self {
        let mut errors = Self::default();
        for (field, messages) in iter {
            errors.insert(field, messages);
        }
        errors
    }
}

impl IntoIterator for ContactValidationErrors {
    type Item = (ContactField, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<ContactField, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Outcome of a single submit attempt, as returned to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    pub errors: Option<ContactValidationErrors>,
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
        }
    }

    pub fn invalid(message: impl Into<String>, errors: ContactValidationErrors) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Some(errors),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}

pub mod messages {
    pub const NAME_REQUIRED: &str = "Name is required";
    pub const NAME_TOO_LONG: &str = "Name must be at most 100 characters";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Please enter a valid email address";
    pub const PHONE_TOO_SHORT: &str = "Phone number must be at least 10 characters";
    pub const PHONE_INVALID: &str =
        "Phone number may only contain digits, spaces, +, - and parentheses";
    pub const PREFERRED_TIME_INVALID: &str = "Please select a preferred contact time";
    pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";
    pub const MESSAGE_TOO_LONG: &str = "Message must be at most 1000 characters";
    pub const HONEYPOT_FILLED: &str = "This field must be left empty";
}

/// Validate every field of `raw` and build a typed [`ContactSubmission`].
///
/// All fields are checked independently, so the error set always covers every
/// invalid field at once.
pub fn validate(raw: &RawContactSubmission) -> Result<ContactSubmission, ContactValidationErrors> {
    let errors = ContactField::ALL
        .into_iter()
        .map(|field| (field, validate_field(raw, field)))
        .collect::<ContactValidationErrors>();

    if !errors.is_empty() {
        return Err(errors);
    }

    build(raw)
}

/// Error messages for a single field, empty if the field is valid.
pub fn validate_field(raw: &RawContactSubmission, field: ContactField) -> Vec<String> {
    use messages::*;

    let value = raw.get(field);
    let len = value.chars().count();
    let mut errors = Vec::new();
    let mut check = |ok: bool, message: &str| {
        if !ok {
            errors.push(message.to_owned());
        }
    };

    match field {
        ContactField::Name if value.is_empty() => check(false, NAME_REQUIRED),
        ContactField::Name => check(len <= NAME_MAX_LENGTH, NAME_TOO_LONG),
        ContactField::Email if value.is_empty() => check(false, EMAIL_REQUIRED),
        ContactField::Email => check(is_valid_email(value), EMAIL_INVALID),
        ContactField::Phone => {
            check(len >= PHONE_MIN_LENGTH, PHONE_TOO_SHORT);
            check(PHONE_REGEX.is_match(value), PHONE_INVALID);
        }
        ContactField::PreferredTime => {
            check(value.parse::<PreferredTime>().is_ok(), PREFERRED_TIME_INVALID)
        }
        ContactField::Message => {
            check(len >= MESSAGE_MIN_LENGTH, MESSAGE_TOO_SHORT);
            check(len <= MESSAGE_MAX_LENGTH, MESSAGE_TOO_LONG);
        }
        ContactField::Honeypot => check(value.is_empty(), HONEYPOT_FILLED),
    }

    errors
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value) && value.parse::<EmailAddress>().is_ok()
}

fn build(raw: &RawContactSubmission) -> Result<ContactSubmission, ContactValidationErrors> {
    // the newtypes enforce the same rules as `validate_field`
    let reject = |field: ContactField| {
        ContactValidationErrors::from_iter([(field, vec![format!("Invalid {field}")])])
    };

    Ok(ContactSubmission {
        name: ContactName::try_new(raw.get(ContactField::Name))
            .map_err(|_| reject(ContactField::Name))?,
        email: raw
            .get(ContactField::Email)
            .parse()
            .map_err(|_| reject(ContactField::Email))?,
        phone: ContactPhone::try_new(raw.get(ContactField::Phone))
            .map_err(|_| reject(ContactField::Phone))?,
        preferred_time: raw
            .get(ContactField::PreferredTime)
            .parse()
            .map_err(|_| reject(ContactField::PreferredTime))?,
        message: ContactMessageContent::try_new(raw.get(ContactField::Message))
            .map_err(|_| reject(ContactField::Message))?,
    })
}
