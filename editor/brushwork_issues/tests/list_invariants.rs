//! Property-based tests for registry list invariants.
//!
//! Random insert and removal sequences must always leave:
//! - forward and backward traversal in agreement, for every list
//! - top-level entries in registry order
//! - every group with at least two members
//! - the issue count equal to the number of issues actually linked

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use brushwork_issues::{Issue, IssueId, IssueKind, IssueRegistry, List, Severity};
use brushwork_model::NodeId;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert { subject: u32, kind: usize, info: bool },
    RemoveSubject(u32),
    /// Remove the n-th live issue handle, if any.
    RemoveIssue(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u32..6, 0..IssueKind::ALL.len(), any::<bool>())
            .prop_map(|(subject, kind, info)| Op::Insert { subject, kind, info }),
        1 => (0u32..6).prop_map(Op::RemoveSubject),
        1 => any::<usize>().prop_map(Op::RemoveIssue),
    ]
}

fn traverse_backward(registry: &IssueRegistry, list: List) -> Vec<IssueId> {
    let arena = registry.arena();
    let mut ids = Vec::new();
    let mut cursor = arena.last(list);
    while let Some(id) = cursor {
        ids.push(id);
        cursor = arena.previous(id);
    }
    ids.reverse();
    ids
}

fn check_invariants(registry: &IssueRegistry) {
    let arena = registry.arena();

    let top: Vec<IssueId> = registry.iter().map(|entry| entry.id()).collect();
    assert_eq!(top, traverse_backward(registry, List::TopLevel));
    assert_eq!(top.len(), registry.len());

    let keys: Vec<(Severity, IssueKind)> = registry
        .iter()
        .map(|entry| (entry.severity(), entry.kind()))
        .collect();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]), "{keys:?}");

    let mut linked = 0;
    for entry in registry.iter() {
        assert_eq!(arena.owner(entry.id()), Some(List::TopLevel));
        if !entry.is_group() {
            linked += 1;
            continue;
        }
        let list = List::Group(entry.id());
        let children: Vec<IssueId> = entry.children().map(|child| child.id()).collect();
        assert!(children.len() >= 2, "group {} has {} members", entry.id(), children.len());
        assert_eq!(children, traverse_backward(registry, list));
        for child in entry.children() {
            assert!(!child.is_group());
            assert_eq!(child.kind(), entry.kind());
            assert_eq!(child.severity(), entry.severity());
            assert_eq!(arena.owner(child.id()), Some(list));
        }
        linked += children.len();
    }
    assert_eq!(linked, registry.issue_count());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn list_invariants_hold(ops in prop::collection::vec(op(), 1..64)) {
        let mut registry = IssueRegistry::new();
        let mut handles: Vec<IssueId> = Vec::new();

        for op in ops {
            match op {
                Op::Insert { subject, kind, info } => {
                    let mut issue = Issue::new(NodeId::new(subject), IssueKind::ALL[kind]);
                    if info {
                        issue = issue.with_severity(Severity::Info);
                    }
                    handles.push(registry.insert(issue).unwrap());
                }
                Op::RemoveSubject(subject) => {
                    let expected = registry.subject_issue_count(NodeId::new(subject));
                    let removed = registry.remove(NodeId::new(subject)).unwrap();
                    prop_assert_eq!(removed, expected);
                    prop_assert!(!registry.contains_subject(NodeId::new(subject)));
                }
                Op::RemoveIssue(n) => {
                    handles.retain(|&id| registry.get(id).is_some());
                    if !handles.is_empty() {
                        let id = handles.swap_remove(n % handles.len());
                        registry.remove_issue(id).unwrap();
                    }
                }
            }
            check_invariants(&registry);
        }
    }

    #[test]
    fn removing_every_subject_empties_the_registry(
        inserts in prop::collection::vec((0u32..4, 0..IssueKind::ALL.len()), 1..32),
    ) {
        let mut registry = IssueRegistry::new();
        for &(subject, kind) in &inserts {
            registry.insert(Issue::new(NodeId::new(subject), IssueKind::ALL[kind])).unwrap();
        }
        prop_assert_eq!(registry.issue_count(), inserts.len());

        for subject in 0..4 {
            registry.remove(NodeId::new(subject)).unwrap();
            check_invariants(&registry);
        }
        prop_assert!(registry.is_empty());
        prop_assert_eq!(registry.arena().live_count(), 0);
    }
}
