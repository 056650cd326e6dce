use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_ADDRESS_CHARS: usize = 10;
pub const MAX_ADDRESS_CHARS: usize = 255;

/// Free-text postal address. Only its length is checked; the text is stored
/// and returned exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        validate_address(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Address::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_address(raw: &str) -> Result<(), CoreError> {
    let len = raw.chars().count();
    if !(MIN_ADDRESS_CHARS..=MAX_ADDRESS_CHARS).contains(&len) {
        return Err(CoreError::InvalidAddressLength {
            len,
            min: MIN_ADDRESS_CHARS,
            max: MAX_ADDRESS_CHARS,
        });
    }
    Ok(())
}
