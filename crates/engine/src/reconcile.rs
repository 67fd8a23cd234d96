//! Metadata reconciliation: tags, descriptions, and the time window
//!
//! Folds descriptive metadata from all merged suites into the target:
//!
//! 1. Tag union: unset tag sets count as empty; the union is idempotent.
//! 2. Description folding: each source description is compared against the
//!    target's description as it was before any append. Empty or absent
//!    descriptions contribute nothing. Two sources carrying the same
//!    description both get appended; dedup is only against the target's
//!    original value.
//! 3. Time window: the target's `[start, end]` becomes the minimal start
//!    and maximal end across target and all sources.
//!
//! Persistence of the mutated target is the coordinator's single write,
//! performed immediately after this fold.

use runledger_core::TestItem;
use tracing::debug;

/// Fold the sources' tags, descriptions, and time bounds into the target
///
/// Mutates the target in place and returns it for chaining. Sources are
/// read-only.
pub fn reconcile<'a>(target: &'a mut TestItem, sources: &[TestItem]) -> &'a mut TestItem {
    for source in sources {
        target.tags.extend(source.tags.iter().cloned());
    }

    // Compared against the pre-merge description only, captured here.
    let original = target.description.clone();
    let appended: Vec<&str> = sources
        .iter()
        .filter_map(|s| s.description.as_deref())
        .filter(|d| !d.is_empty())
        .filter(|d| Some(*d) != original.as_deref())
        .collect();
    if !appended.is_empty() {
        let mut folded = original.unwrap_or_default();
        for description in appended {
            if !folded.is_empty() {
                folded.push('\n');
            }
            folded.push_str(description);
        }
        target.description = Some(folded);
    }

    target.start_time = sources
        .iter()
        .map(|s| s.start_time)
        .fold(target.start_time, std::cmp::min);
    target.end_time = sources
        .iter()
        .map(|s| s.end_time)
        .fold(target.end_time, std::cmp::max);

    debug!(
        target = %target.id,
        tags = target.tags.len(),
        start = %target.start_time,
        end = %target.end_time,
        "reconciled target metadata"
    );
    target
}
