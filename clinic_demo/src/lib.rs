//! Fixtures shared by the tests of the workspace crates.

use std::sync::LazyLock;

use clinic_models::email_address::EmailAddressWithName;

pub mod contact;

pub const FALLBACK_PHONE: &str = "021 555 0123";

pub static RECIPIENT: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "Front Desk <frontdesk@example.com>".parse().unwrap());
