use crate::domain::CustomerAddress;
use serde::{Deserialize, Serialize};

/// Status body returned by write operations and by every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemResponse {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_addr: Option<CustomerAddress>,
}

impl SystemResponse {
    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            customer_addr: None,
        }
    }

    pub fn with_address(detail: impl Into<String>, customer_addr: CustomerAddress) -> Self {
        Self {
            detail: detail.into(),
            customer_addr: Some(customer_addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SystemResponse;
    use crate::domain::{Address, CustomerAddress, PhoneNumber};

    #[test]
    fn detail_only_omits_customer_addr() {
        let json = serde_json::to_value(SystemResponse::detail("Phone number not found.")).unwrap();
        assert_eq!(json, serde_json::json!({ "detail": "Phone number not found." }));
    }

    #[test]
    fn echo_uses_canonical_phone() {
        let addr = CustomerAddress::new(
            PhoneNumber::new("+44 7911 123456").unwrap(),
            Address::new("Some address 1").unwrap(),
        );
        let json = serde_json::to_value(SystemResponse::with_address("Created", addr)).unwrap();
        assert_eq!(json["customer_addr"]["phone"], "+447911123456");
        assert_eq!(json["customer_addr"]["address"], "Some address 1");
    }
}
