//! Core profile types and the profile store

pub mod profile;
pub mod store;

pub use profile::{AVAILABLE, Profile};
pub use store::ProfileStore;
