//! Myers shortest-edit-script search over lines.

use crate::{split_lines, DiffOp};
use std::collections::HashMap;

/// Compute the minimal line-level edit script from `old_text` to `new_text`.
///
/// Runs the classic Myers frontier search: for each depth `d` we keep the
/// furthest-reached x-coordinate per diagonal `k`, extending diagonals
/// greedily through runs of equal lines. A snapshot of the frontier is kept
/// per depth so the op sequence can be reconstructed by backtracking.
///
/// Ties between diagonals are broken in favor of insertion. This makes the
/// output deterministic and must not change: persisted summaries and tests
/// depend on stable op ordering.
pub fn diff_lines(old_text: &str, new_text: &str) -> Vec<DiffOp> {
    let a = split_lines(old_text);
    let b = split_lines(new_text);

    let n = a.len() as i64;
    let m = b.len() as i64;
    let max = n + m;

    let mut v: HashMap<i64, i64> = HashMap::new();
    v.insert(1, 0);

    let mut trace: Vec<HashMap<i64, i64>> = Vec::new();

    for d in 0..=max {
        trace.push(v.clone());

        let mut k = -d;
        while k <= d {
            let v_minus = v.get(&(k - 1)).copied();
            let v_plus = v.get(&(k + 1)).copied();

            let mut x = if k == -d || (k != d && v_minus.unwrap_or(-1) < v_plus.unwrap_or(-1)) {
                v_plus.unwrap_or(0)
            } else {
                v_minus.unwrap_or(0) + 1
            };

            let mut y = x - k;

            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }

            v.insert(k, x);

            if x >= n && y >= m {
                return backtrack(&trace, &a, &b);
            }

            k += 2;
        }
    }

    backtrack(&trace, &a, &b)
}

/// Walk the frontier snapshots backward from the endpoint, emitting ops in
/// reverse and flipping them at the end.
fn backtrack(trace: &[HashMap<i64, i64>], a: &[String], b: &[String]) -> Vec<DiffOp> {
    let mut x = a.len() as i64;
    let mut y = b.len() as i64;
    let mut ops = Vec::new();

    for d in (0..trace.len() as i64).rev() {
        let v = &trace[d as usize];
        let k = x - y;

        let v_minus = v.get(&(k - 1)).copied();
        let v_plus = v.get(&(k + 1)).copied();

        // Same tie-break as the forward pass: prefer the insertion step.
        let prev_k = if k == -d || (k != d && v_minus.unwrap_or(-1) < v_plus.unwrap_or(-1)) {
            k + 1
        } else {
            k - 1
        };

        let prev_x = v.get(&prev_k).copied().unwrap_or(0);
        let prev_y = prev_x - prev_k;

        // Consume the trailing snake of equal lines first.
        while x > prev_x && y > prev_y {
            ops.push(DiffOp::Equal(a[(x - 1) as usize].clone()));
            x -= 1;
            y -= 1;
        }

        if d == 0 {
            break;
        }

        if x == prev_x {
            ops.push(DiffOp::Insert(b[(y - 1) as usize].clone()));
            y -= 1;
        } else {
            ops.push(DiffOp::Delete(a[(x - 1) as usize].clone()));
            x -= 1;
        }
    }

    ops.reverse();
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replay `equal` + `delete` lines to rebuild the old text.
    fn reconstruct_old(ops: &[DiffOp]) -> String {
        ops.iter()
            .filter_map(|op| match op {
                DiffOp::Equal(line) | DiffOp::Delete(line) => Some(line.as_str()),
                DiffOp::Insert(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replay `equal` + `insert` lines to rebuild the new text.
    fn reconstruct_new(ops: &[DiffOp]) -> String {
        ops.iter()
            .filter_map(|op| match op {
                DiffOp::Equal(line) | DiffOp::Insert(line) => Some(line.as_str()),
                DiffOp::Delete(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn assert_round_trip(old: &str, new: &str) {
        let ops = diff_lines(old, new);
        assert_eq!(reconstruct_old(&ops), old, "old text must replay exactly");
        assert_eq!(reconstruct_new(&ops), new, "new text must replay exactly");
    }

    #[test]
    fn identical_texts_yield_all_equal() {
        let text = "line1\nline2\nline3";
        let ops = diff_lines(text, text);
        assert_eq!(ops.len(), 3);
        assert!(ops.iter().all(|op| matches!(op, DiffOp::Equal(_))));
    }

    #[test]
    fn empty_old_yields_all_inserts() {
        let ops = diff_lines("", "a\nb\nc");
        assert_eq!(
            ops,
            vec![
                DiffOp::Insert("a".into()),
                DiffOp::Insert("b".into()),
                DiffOp::Insert("c".into()),
            ]
        );
    }

    #[test]
    fn empty_new_yields_all_deletes() {
        let ops = diff_lines("a\nb", "");
        assert_eq!(
            ops,
            vec![DiffOp::Delete("a".into()), DiffOp::Delete("b".into())]
        );
    }

    #[test]
    fn both_empty_yields_no_ops() {
        assert!(diff_lines("", "").is_empty());
    }

    #[test]
    fn inserted_line_in_the_middle() {
        let ops = diff_lines("line1\nline2", "line1\nlineTWO\nline2");
        assert_eq!(
            ops,
            vec![
                DiffOp::Equal("line1".into()),
                DiffOp::Insert("lineTWO".into()),
                DiffOp::Equal("line2".into()),
            ]
        );
    }

    #[test]
    fn replaced_line_emits_delete_then_insert() {
        let ops = diff_lines("a", "b");
        assert_eq!(
            ops,
            vec![DiffOp::Delete("a".into()), DiffOp::Insert("b".into())]
        );
    }

    #[test]
    fn crlf_and_cr_are_normalized() {
        let ops = diff_lines("a\r\nb", "a\nb");
        assert_eq!(
            ops,
            vec![DiffOp::Equal("a".into()), DiffOp::Equal("b".into())]
        );
    }

    #[test]
    fn round_trips_on_varied_inputs() {
        assert_round_trip("", "");
        assert_round_trip("", "one\ntwo");
        assert_round_trip("one\ntwo", "");
        assert_round_trip("a\nb\nc\nd", "a\nx\nc\ny");
        assert_round_trip("the quick\nbrown fox\njumps", "the quick\njumps\nover");
        assert_round_trip("a\nb\na\nb\na", "b\na\nb\na\nb");
        assert_round_trip("only one line", "only one line");
        assert_round_trip("shared\ntail", "completely\ndifferent\nstart\ntail");
    }

    #[test]
    fn diff_is_deterministic() {
        let old = "alpha\nbeta\ngamma\ndelta";
        let new = "alpha\ngamma\nbeta\ndelta";
        let first = diff_lines(old, new);
        let second = diff_lines(old, new);
        assert_eq!(first, second);
    }

    #[test]
    fn large_shift_still_round_trips() {
        let old: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
        let mut shifted = old.clone();
        shifted.rotate_left(3);
        assert_round_trip(&old.join("\n"), &shifted.join("\n"));
    }
}
