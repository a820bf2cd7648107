//! Shared test utilities

pub mod source;

pub use source::{FakeSource, RecordingNotifier, create_test_store};
