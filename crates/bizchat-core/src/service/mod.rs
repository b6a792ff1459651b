//! Account and profile services plus the crypto seams they depend on.

pub mod account;
pub mod password;
pub mod profile;
pub mod token;
