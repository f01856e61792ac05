//! Attraction block rules: id assignment, folder naming, ordering.
//!
//! Attractions are the content blocks shown on the landing page. Each one
//! owns an image folder named after its id. The repository layer feeds the
//! current collection into these functions and persists the result.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Layout tag used when a block is created without one.
pub const DEFAULT_LAYOUT: &str = "text_left";

/// Prefix of every attraction image folder (`block-<id>`).
pub const FOLDER_PREFIX: &str = "block-";

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Attraction";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Image folder name for an attraction id.
pub fn folder_for(id: DbId) -> String {
    format!("{FOLDER_PREFIX}{id}")
}

/// Compute the id for a new attraction.
///
/// One more than the largest of the existing ids and `high_water`, the
/// largest id handed out so far in this process. The second argument keeps
/// an id from being handed out twice when the newest record was deleted.
pub fn next_id(existing: impl IntoIterator<Item = DbId>, high_water: DbId) -> DbId {
    existing.into_iter().fold(high_water.max(0), DbId::max) + 1
}

/// Display position for a block created without an explicit `order`.
pub fn next_order(existing: impl IntoIterator<Item = i64>) -> i64 {
    existing.into_iter().max().unwrap_or(0) + 1
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trim and require a title.
pub fn normalize_title(title: Option<&str>) -> Result<String, CoreError> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(CoreError::Validation("Title is required".into())),
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Map each id in `ids` to its 1-based position.
///
/// When an id appears more than once its last position wins. An empty
/// sequence is rejected.
pub fn order_positions(ids: &[DbId]) -> Result<HashMap<DbId, i64>, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("Order list is empty".into()));
    }

    Ok(ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx as i64 + 1))
        .collect())
}
