//! Deduplicated warnings for unsupported features.
//!
//! Style parsing and anchor resolution report values they cannot handle
//! (unknown properties, `anchor()` sides on the wrong axis, ...). The same
//! declaration is usually seen on every apply pass, so each unique message is
//! only emitted once until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (logged once per unique message)
///
/// # Example
/// ```
/// anchor_common::warning::warn_once("css", "unknown property 'anchor-scope'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!("[{component}] {message}");
    }
}

/// Clear all recorded warnings (call when loading a new page)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings emitted since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        let before = warning_count();
        warn_once("test", "dedup message for warning tests");
        warn_once("test", "dedup message for warning tests");
        assert_eq!(warning_count(), before + 1);
    }
}
