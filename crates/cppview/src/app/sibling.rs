use crate::domain::entry::{Entry, PairSide};
use crate::domain::pairing::sibling_candidate;
use crate::infra::fs::FileSystem;

/// Locates the mirrored entry of `entry` on the other side of a split.
///
/// Tries a `cpp` segment first, then `include`, and returns the first
/// mirrored path that exists, with the same kind as `entry`. Resolved pair
/// halves (entries with a title) never have a sibling.
pub async fn locate_sibling(file_system: &dyn FileSystem, entry: &Entry) -> Option<Entry> {
    if entry.title.is_some() {
        return None;
    }

    for side in PairSide::ALL {
        let Some(candidate) = sibling_candidate(&entry.path, side) else {
            continue;
        };

        if file_system.exists(candidate.clone()).await {
            return Some(Entry::new(candidate, entry.kind));
        }
    }

    None
}
