//! Property-based tests for the diff and comparison invariants.

use proptest::prelude::*;

use treediff::compare::{compare_snapshots, detect_moves};
use treediff::diff::{diff_lines, has_changed, normalize, DiffSegment, SegmentKind};
use treediff::snapshot::{Blake3Hasher, FileEntry, Snapshot};

fn reconstruct(segments: &[DiffSegment], keep: SegmentKind) -> String {
    segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Equal || s.kind == keep)
        .map(|s| s.text.as_str())
        .collect()
}

proptest! {
    #[test]
    fn normalization_is_idempotent(text in "[a-z \\t\\r\\n]{0,60}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn self_diff_is_all_equal(text in "[a-z \\t\\n]{0,60}") {
        let segments = diff_lines(&text, &text);
        prop_assert!(segments.iter().all(|s| s.kind == SegmentKind::Equal));
        let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(rebuilt, normalize(&text));
        prop_assert!(!has_changed(&text, &text));
    }

    #[test]
    fn diff_reconstructs_both_sides(
        a in "[ab \\t\\n]{0,50}",
        b in "[ab \\t\\n]{0,50}",
    ) {
        let segments = diff_lines(&a, &b);
        prop_assert_eq!(reconstruct(&segments, SegmentKind::Remove), normalize(&a));
        prop_assert_eq!(reconstruct(&segments, SegmentKind::Add), normalize(&b));
    }

    #[test]
    fn has_changed_agrees_with_diff(
        a in "[ab\\t \\n]{0,40}",
        b in "[ab\\t \\n]{0,40}",
    ) {
        let has_edit = diff_lines(&a, &b).iter().any(DiffSegment::is_edit);
        prop_assert_eq!(has_changed(&a, &b), has_edit);
    }

    #[test]
    fn move_matching_is_a_disjoint_matching(
        names_a in prop::collection::vec("[ab]\\.txt", 0..6),
        names_b in prop::collection::vec("[ab]\\.txt", 0..6),
        contents_a in prop::collection::vec("[xy]{1,3}", 6),
        contents_b in prop::collection::vec("[xy]{1,3}", 6),
    ) {
        let side_a: Vec<FileEntry> = names_a
            .iter()
            .enumerate()
            .map(|(i, name)| {
                FileEntry::file(format!("a/{i}/{name}"), contents_a[i].clone(), &Blake3Hasher)
            })
            .collect();
        let side_b: Vec<FileEntry> = names_b
            .iter()
            .enumerate()
            .map(|(i, name)| {
                FileEntry::file(format!("b/{i}/{name}"), contents_b[i].clone(), &Blake3Hasher)
            })
            .collect();
        let refs_a: Vec<&FileEntry> = side_a.iter().collect();
        let refs_b: Vec<&FileEntry> = side_b.iter().collect();

        let moves = detect_moves(&refs_a, &refs_b);

        let mut used_a = std::collections::HashSet::new();
        let mut used_b = std::collections::HashSet::new();
        let mut seen_changed = false;
        for pair in &moves {
            prop_assert!(used_a.insert(pair.file_a.path.clone()), "a-side entry reused");
            prop_assert!(used_b.insert(pair.file_b.path.clone()), "b-side entry reused");
            prop_assert_eq!(&pair.file_a.name, &pair.file_b.name);
            prop_assert_ne!(&pair.file_a.path, &pair.file_b.path);
            if pair.content_changed {
                seen_changed = true;
                prop_assert_ne!(&pair.file_a.fingerprint, &pair.file_b.fingerprint);
            } else {
                prop_assert!(!seen_changed, "pass-1 pair after a pass-2 pair");
                prop_assert_eq!(&pair.file_a.fingerprint, &pair.file_b.fingerprint);
            }
        }
    }

    #[test]
    fn comparator_is_complete_and_sorted(
        tree_a in prop::collection::btree_map("[a-c]/[a-c]\\.txt", "[mn]{0,3}", 0..8),
        tree_b in prop::collection::btree_map("[a-c]/[a-c]\\.txt", "[mn]{0,3}", 0..8),
    ) {
        let build = |name: &str, tree: &std::collections::BTreeMap<String, String>| {
            Snapshot::from_entries(
                name,
                tree.iter()
                    .map(|(p, c)| FileEntry::file(p.clone(), c.clone(), &Blake3Hasher))
                    .collect(),
            )
            .unwrap()
        };
        let snap_a = build("a", &tree_a);
        let snap_b = build("b", &tree_b);

        let records = compare_snapshots(&snap_a, &snap_b);

        // Magnitudes are non-increasing.
        for pair in records.windows(2) {
            prop_assert!(pair[0].magnitude >= pair[1].magnitude);
        }

        // No path is claimed twice on either side.
        let mut claimed_a = std::collections::HashSet::new();
        let mut claimed_b = std::collections::HashSet::new();
        for record in &records {
            if let Some(p) = record.change.path_a() {
                prop_assert!(claimed_a.insert(p.to_string()));
            }
            if let Some(p) = record.change.path_b() {
                prop_assert!(claimed_b.insert(p.to_string()));
            }
        }

        // Every path is accounted for exactly when it changed. The
        // generated contents carry no whitespace, so normalization
        // never makes two different contents compare equal.
        for (path, content) in &tree_a {
            let changed = match tree_b.get(path) {
                Some(other) => other != content,
                None => true,
            };
            prop_assert_eq!(claimed_a.contains(path), changed, "path {}", path);
        }
        for (path, content) in &tree_b {
            let changed = match tree_a.get(path) {
                Some(other) => other != content,
                None => true,
            };
            prop_assert_eq!(claimed_b.contains(path), changed, "path {}", path);
        }
    }
}
