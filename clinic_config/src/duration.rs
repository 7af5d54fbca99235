use std::ops::Deref;

use serde::{de::Error, Deserialize};

/// Duration written as whitespace separated parts like `"1h 30m"`.
///
/// Supported units are `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(0u64, |total, part| {
                let seconds = parse_part(part)
                    .ok_or_else(|| D::Error::custom(format!("Invalid duration: {part:?}")))?;
                total
                    .checked_add(seconds)
                    .ok_or_else(|| D::Error::custom("Duration too large"))
            })
            .map(|seconds| Self(std::time::Duration::from_secs(seconds)))
    }
}

fn parse_part(part: &str) -> Option<u64> {
    let unit = part.chars().last()?;
    let factor = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };

    let value = part.strip_suffix(unit)?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    value.parse::<u64>().ok()?.checked_mul(factor)
}
