use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("phone number is required")]
    EmptyPhone,
    #[error("phone number must start with '+' followed by the country code")]
    MissingPlusPrefix,
    #[error("phone number contains invalid character {0:?}")]
    InvalidPhoneCharacter(char),
    #[error("phone number contains no digits")]
    PhoneWithoutDigits,
    #[error("phone number has {0} digits, at most 15 are allowed")]
    PhoneTooLong(usize),
    #[error("address must be between {min} and {max} characters long, got {len}")]
    InvalidAddressLength { len: usize, min: usize, max: usize },
}
