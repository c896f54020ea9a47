pub mod address;
pub mod inspect;
pub mod mount;
pub mod resolve;
