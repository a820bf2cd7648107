//! Source implementations for observing store versions

pub mod app_store;
pub mod play_store;
pub mod storefront;

pub use app_store::AppStoreSource;
pub use play_store::PlayStoreSource;
