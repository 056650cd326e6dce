use crate::domain::address::Address;
use crate::domain::phone::PhoneNumber;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub phone: PhoneNumber,
    pub address: Address,
}

impl CustomerAddress {
    pub fn new(phone: PhoneNumber, address: Address) -> Self {
        Self { phone, address }
    }
}

#[cfg(test)]
mod tests {
    use super::CustomerAddress;

    #[test]
    fn deserialize_normalizes_phone() {
        let parsed: CustomerAddress = serde_json::from_str(
            r#"{"phone": "+7-911-123-45-67", "address": "RU address sample"}"#,
        )
        .unwrap();
        assert_eq!(parsed.phone.as_str(), "+79111234567");
        assert_eq!(parsed.address.as_str(), "RU address sample");
    }

    #[test]
    fn deserialize_rejects_short_address() {
        let err = serde_json::from_str::<CustomerAddress>(
            r#"{"phone": "+447911123456", "address": "too short"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("between 10 and 255"));
    }
}
