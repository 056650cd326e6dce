pub mod addresses;

pub use addresses::AddressesRepo;
