use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// E.164 caps the country code plus subscriber number at 15 digits.
pub const MAX_PHONE_DIGITS: usize = 15;

/// A validated phone number, held in canonical form (`+` followed by digits).
///
/// The canonical form doubles as the storage key, so two numbers typed with
/// different separators compare equal and address the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize_phone(raw)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn storage_key(&self) -> &str {
        &self.0
    }

    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        PhoneNumber::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Validates `raw` and strips separators, returning `+` followed by digits.
///
/// Accepted separators are space, `-`, `.`, `(` and `)`. The leading `+` is
/// mandatory; anything else is rejected rather than silently dropped.
pub fn normalize_phone(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyPhone);
    }

    let mut out = String::with_capacity(trimmed.len());
    out.push('+');
    let mut digits = 0usize;

    for (idx, ch) in trimmed.chars().enumerate() {
        match ch {
            '0'..='9' => {
                out.push(ch);
                digits += 1;
            }
            '+' if idx == 0 => {}
            ' ' | '-' | '.' | '(' | ')' => {}
            other => return Err(CoreError::InvalidPhoneCharacter(other)),
        }
    }

    if !trimmed.starts_with('+') {
        return Err(CoreError::MissingPlusPrefix);
    }
    if digits == 0 {
        return Err(CoreError::PhoneWithoutDigits);
    }
    if digits > MAX_PHONE_DIGITS {
        return Err(CoreError::PhoneTooLong(digits));
    }

    Ok(out)
}
