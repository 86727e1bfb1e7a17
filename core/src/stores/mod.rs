//! State containers over the key-value store
//!
//! Each container owns one slice of app state: [`AuthStore`] the signed-in
//! user, [`WellnessStore`] everything tracked day to day. Both follow the
//! same shape: load hydrates from storage, mutations persist first and
//! update in-memory state after, reads hand out cheap clones.

pub mod auth;
pub mod wellness;

pub use auth::{AuthProvider, AuthState, AuthStore, MockGoogleAuth};
pub use wellness::{WellnessSnapshot, WellnessStore};
