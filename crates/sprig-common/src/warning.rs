//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! The syntax crate never prints; front ends use this to surface non-fatal
//! parse issues.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a non-fatal issue (prints once per unique message).
///
/// Returns `true` if the warning was printed, `false` if it was a duplicate.
///
/// # Example
/// ```ignore
/// warn_once("parser", "closing tag </div> does not match open element <span>");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[sprig {component}] warning: {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before processing a new template).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        assert!(warn_once("test", "dedup message"));
        assert!(!warn_once("test", "dedup message"));
        assert!(warn_once("other", "dedup message"));
    }
}
