//! Search provider implementations.

pub mod google_cse;

pub use google_cse::{CseCredentials, GoogleCseProvider};
