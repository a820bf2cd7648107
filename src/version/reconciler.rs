//! Reconciliation of the App Store lookup API with the storefront page
//!
//! The lookup API and the rendered storefront page are refreshed
//! independently, so they can disagree for a while after a release.
//! The API wins only when it is strictly ahead; otherwise the page is
//! reported, with a note when the page is the one ahead.

use crate::source::SourceKind;
use crate::version::dotted::{Comparison, VersionString};

/// The page reported something different from (and not behind) the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAhead {
    pub api: VersionString,
    pub page: VersionString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub version: VersionString,
    pub source: SourceKind,
    pub page_ahead: Option<PageAhead>,
}

/// Decide which of the two App Store signals to report.
///
/// `page` is the raw scraped text with any label already stripped; `None`
/// or unparseable text falls back to the API version.
pub fn reconcile(api: VersionString, page: Option<&str>) -> Reconciled {
    let Some(page) = page.and_then(VersionString::parse) else {
        return Reconciled {
            version: api,
            source: SourceKind::Api,
            page_ahead: None,
        };
    };

    match api.compare(&page) {
        Comparison::Greater => Reconciled {
            version: api,
            source: SourceKind::Api,
            page_ahead: None,
        },
        _ => {
            let page_ahead = (api.components() != page.components()).then(|| PageAhead {
                api: api.clone(),
                page: page.clone(),
            });
            Reconciled {
                version: page,
                source: SourceKind::Page,
                page_ahead,
            }
        }
    }
}
