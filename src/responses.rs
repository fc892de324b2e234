//! The built-in starter catalog.
//!
//! Ships enough conversational coverage that a matcher is useful out of
//! the box; hosts are expected to merge their own entries on top.

use crate::catalog::ResponseCatalog;

/// Returns the built-in conversational catalog.
///
/// The catalog is embedded at compile time. A malformed asset is a build
/// defect, so the parse expects success.
pub fn default_responses() -> ResponseCatalog {
    let raw = include_str!("../data/default_responses.json");
    ResponseCatalog::from_json(raw).expect("default_responses.json must be valid")
}
