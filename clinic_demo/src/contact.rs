use std::sync::LazyLock;

use clinic_models::contact::{ContactSubmission, PreferredTime, RawContactSubmission};

/// A submission satisfying every rule.
pub static JANE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Jane Doe".try_into().unwrap(),
    email: "jane@example.com".parse().unwrap(),
    phone: "0821234567".try_into().unwrap(),
    preferred_time: PreferredTime::Morning,
    message: "I'd like to book a class please".try_into().unwrap(),
});

pub static JANE_RAW: LazyLock<RawContactSubmission> =
    LazyLock::new(|| RawContactSubmission::from(&*JANE));

/// Every field except the honeypot violates its rule.
pub static INVALID_RAW: LazyLock<RawContactSubmission> =
    LazyLock::new(|| RawContactSubmission {
        name: Some(String::new()),
        email: Some("not-an-email".into()),
        phone: Some("123".into()),
        preferred_time: Some(String::new()),
        message: Some("hi".into()),
        honeypot: Some(String::new()),
    });

/// A valid submission with the hidden honeypot field filled in.
pub static SPAM_RAW: LazyLock<RawContactSubmission> = LazyLock::new(|| RawContactSubmission {
    honeypot: Some("spam".into()),
    ..JANE_RAW.clone()
});
