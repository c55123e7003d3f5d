//! Lineage records and dotted-path resolution.
//!
//! A [`TargetLineage`] is a tree rooted at a target node recording every
//! target reachable through its value edges via non-target intermediates.
//! The builder caches one per target and environments share them by `Rc`;
//! a lineage is never mutated after creation. Look-backs such as
//! `dest a.b.c` and argument fields such as `arg.a.b` resolve against these
//! trees with [`resolve_path`].

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::id::NodeId;

/// Nested targets keyed by name. Name order keeps resolution deterministic.
pub type ChildTargets = BTreeMap<String, Vec<Rc<TargetLineage>>>;

/// The lineage tree cached for one target node.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLineage {
    pub node: NodeId,
    /// Every target appearing in this target's value-edge subtree, keyed by
    /// name. Multiple entries under one name reflect multiple writes.
    pub child_targets: ChildTargets,
}

/// A projector-argument binding.
///
/// Relaxed form of [`TargetLineage`]: the bound node may be a projector or a
/// constant, in which case `child_targets` holds the relevant lineage roots
/// (the projector's immediate target children) or nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgLineage {
    pub node: NodeId,
    pub child_targets: ChildTargets,
}

/// Splits a dotted path into components, tolerating a leading dot
/// (`".a.b"` and `"a.b"` both yield `["a", "b"]`).
pub fn split_path(path: &str) -> Vec<&str> {
    path.trim_start_matches('.')
        .split('.')
        .filter(|part| !part.is_empty())
        .collect()
}

/// Matches a (possibly composite) target name against a lookup path.
///
/// Returns `min(name_parts.len(), path.len())` when all corresponding
/// components agree, 0 otherwise. A composite name like `a.b` therefore
/// matches the path `[a, b, c]` in its entirety, leaving `[c]` to resolve
/// against its children.
pub fn match_up_to_diff(name_parts: &[&str], path: &[&str]) -> usize {
    let n = name_parts.len().min(path.len());
    if n == 0 {
        return 0;
    }
    if name_parts[..n] == path[..n] {
        n
    } else {
        0
    }
}

/// Resolves a dotted lookup path against a name table.
///
/// Returns `None` when no name in the table matches the head of the path at
/// all (the caller reports an unknown destination or variable), and
/// `Some(terminals)` otherwise — empty when the head matched but the
/// remaining components led nowhere (the caller reports a dead path).
pub fn resolve_path(table: &ChildTargets, path: &[&str]) -> Option<Vec<Rc<TargetLineage>>> {
    let mut matched_head = false;
    let mut terminals = Vec::new();

    for (name, lineages) in table {
        let name_parts = split_path(name);
        let consumed = match_up_to_diff(&name_parts, path);
        if consumed == 0 {
            continue;
        }
        matched_head = true;
        let rest = &path[consumed..];
        if rest.is_empty() {
            terminals.extend(lineages.iter().cloned());
        } else {
            for lineage in lineages {
                if let Some(nested) = resolve_path(&lineage.child_targets, rest) {
                    terminals.extend(nested);
                }
            }
        }
    }

    if matched_head {
        Some(terminals)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u32) -> Rc<TargetLineage> {
        Rc::new(TargetLineage {
            node: NodeId(id),
            child_targets: ChildTargets::new(),
        })
    }

    fn with_children(id: u32, children: &[(&str, Rc<TargetLineage>)]) -> Rc<TargetLineage> {
        let mut child_targets = ChildTargets::new();
        for (name, lineage) in children {
            child_targets
                .entry((*name).to_string())
                .or_default()
                .push(lineage.clone());
        }
        Rc::new(TargetLineage {
            node: NodeId(id),
            child_targets,
        })
    }

    #[test]
    fn split_path_tolerates_leading_dot() {
        assert_eq!(split_path("a.b"), vec!["a", "b"]);
        assert_eq!(split_path(".a.b"), vec!["a", "b"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn match_up_to_diff_basics() {
        assert_eq!(match_up_to_diff(&["a"], &["a", "b"]), 1);
        assert_eq!(match_up_to_diff(&["a", "b"], &["a", "b", "c"]), 2);
        assert_eq!(match_up_to_diff(&["a", "b", "c"], &["a", "b"]), 2);
        assert_eq!(match_up_to_diff(&["a"], &["b"]), 0);
        assert_eq!(match_up_to_diff(&["a", "x"], &["a", "b"]), 0);
        assert_eq!(match_up_to_diff(&[], &["a"]), 0);
    }

    #[test]
    fn resolve_simple_head() {
        let mut table = ChildTargets::new();
        table.insert("a".into(), vec![leaf(1)]);

        let found = resolve_path(&table, &["a"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].node, NodeId(1));
    }

    #[test]
    fn resolve_through_children() {
        let b = leaf(2);
        let a = with_children(1, &[("b", b)]);
        let mut table = ChildTargets::new();
        table.insert("a".into(), vec![a]);

        let found = resolve_path(&table, &["a", "b"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].node, NodeId(2));
    }

    #[test]
    fn resolve_composite_name_consumes_both_components() {
        let c = leaf(3);
        let ab = with_children(1, &[("c", c)]);
        let mut table = ChildTargets::new();
        table.insert("a.b".into(), vec![ab]);

        let found = resolve_path(&table, &["a", "b", "c"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].node, NodeId(3));

        // A shorter path terminates at the composite itself.
        let found = resolve_path(&table, &["a", "b"]).unwrap();
        assert_eq!(found[0].node, NodeId(1));
    }

    #[test]
    fn resolve_unknown_head_is_none() {
        let mut table = ChildTargets::new();
        table.insert("a".into(), vec![leaf(1)]);
        assert!(resolve_path(&table, &["z"]).is_none());
    }

    #[test]
    fn resolve_dead_tail_is_some_empty() {
        let mut table = ChildTargets::new();
        table.insert("a".into(), vec![leaf(1)]);
        let found = resolve_path(&table, &["a", "missing"]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn resolve_collects_every_write() {
        let mut table = ChildTargets::new();
        table.insert("a".into(), vec![leaf(1), leaf(4)]);
        let found = resolve_path(&table, &["a"]).unwrap();
        let ids: Vec<_> = found.iter().map(|l| l.node).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(4)]);
    }
}
