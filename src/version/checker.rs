//! Update detection against the last announced version

use crate::version::dotted::{Comparison, compare};

/// Returns true only when `observed` is strictly newer than `last_known`.
///
/// An indeterminate comparison (either side malformed) is never an update.
pub fn is_update(observed: &str, last_known: &str) -> bool {
    compare(observed, last_known) == Comparison::Greater
}
