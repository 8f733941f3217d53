//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by Firebase uid)
    pub const USERS: &str = "users";
    /// Saved routes (keyed by route ID)
    pub const ROUTES: &str = "routes";
}
