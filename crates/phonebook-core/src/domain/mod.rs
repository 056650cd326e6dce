pub mod address;
pub mod customer_address;
pub mod phone;

pub use address::{validate_address, Address, MAX_ADDRESS_CHARS, MIN_ADDRESS_CHARS};
pub use customer_address::CustomerAddress;
pub use phone::{normalize_phone, PhoneNumber, MAX_PHONE_DIGITS};
