//! Version decision layer
//!
//! Everything here is pure. Remote fetching lives in [`crate::sources`].
//!
//! # Modules
//!
//! - [`dotted`]: Dotted numeric version parsing and comparison
//! - [`reconciler`]: Picks one App Store version out of the API and page signals
//! - [`checker`]: Decides whether an observation is worth announcing

pub mod checker;
pub mod dotted;
pub mod reconciler;
