//! Snapshot decision policy.
//!
//! Decides whether a save should also record an immutable version. The
//! length-delta heuristic keeps keystroke-level autosaves out of the history
//! while still catching substantial rewrites; missed snapshots on small but
//! important edits are an accepted trade-off (the user can always force one).

/// Minimum absolute character-count change that triggers a snapshot.
pub const SNAPSHOT_THRESHOLD: usize = 50;

/// Caller flags that override the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotFlags {
    /// Snapshot unconditionally.
    pub force: bool,
    /// Never snapshot. Wins over `force`.
    pub skip: bool,
}

impl SnapshotFlags {
    pub fn force() -> Self {
        Self {
            force: true,
            skip: false,
        }
    }

    pub fn skip() -> Self {
        Self {
            force: false,
            skip: true,
        }
    }
}

/// Decide whether a new version must be recorded for this save.
///
/// `skip` wins unconditionally, then `force`, then the character-count delta
/// between the two contents.
pub fn should_snapshot(previous: &str, next: &str, flags: SnapshotFlags) -> bool {
    if flags.skip {
        return false;
    }
    if flags.force {
        return true;
    }

    let prev_len = previous.chars().count() as i64;
    let next_len = next.chars().count() as i64;
    (next_len - prev_len).unsigned_abs() as usize >= SNAPSHOT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_below_threshold_does_not_snapshot() {
        let next = "x".repeat(SNAPSHOT_THRESHOLD - 1);
        assert!(!should_snapshot("", &next, SnapshotFlags::default()));
    }

    #[test]
    fn delta_at_threshold_snapshots() {
        let next = "x".repeat(SNAPSHOT_THRESHOLD);
        assert!(should_snapshot("", &next, SnapshotFlags::default()));
    }

    #[test]
    fn shrinking_content_counts_too() {
        let previous = "x".repeat(SNAPSHOT_THRESHOLD);
        assert!(should_snapshot(&previous, "", SnapshotFlags::default()));
    }

    #[test]
    fn identical_content_does_not_snapshot() {
        assert!(!should_snapshot("same", "same", SnapshotFlags::default()));
    }

    #[test]
    fn force_overrides_zero_delta() {
        assert!(should_snapshot("same", "same", SnapshotFlags::force()));
    }

    #[test]
    fn skip_overrides_everything() {
        let next = "x".repeat(SNAPSHOT_THRESHOLD * 2);
        assert!(!should_snapshot("", &next, SnapshotFlags::skip()));
        assert!(!should_snapshot(
            "",
            &next,
            SnapshotFlags {
                force: true,
                skip: true
            }
        ));
    }

    #[test]
    fn delta_is_measured_in_characters_not_bytes() {
        // 49 multi-byte characters stay under the threshold
        let next = "汉".repeat(SNAPSHOT_THRESHOLD - 1);
        assert!(!should_snapshot("", &next, SnapshotFlags::default()));
        let next = "汉".repeat(SNAPSHOT_THRESHOLD);
        assert!(should_snapshot("", &next, SnapshotFlags::default()));
    }
}
