use super::*;
use pretty_assertions::assert_eq;

fn brush(id: u32) -> NodeId {
    NodeId::new(id)
}

#[test]
fn test_issue_builder() {
    let issue = Issue::new(brush(1), IssueKind::MissingTexture)
        .with_severity(Severity::Error)
        .with_detail("base/wall01");

    assert_eq!(issue.subject(), brush(1));
    assert_eq!(issue.kind(), IssueKind::MissingTexture);
    assert_eq!(issue.severity(), Severity::Error);
    assert_eq!(issue.detail(), Some("base/wall01"));
}

#[test]
fn test_default_severity_comes_from_kind() {
    let issue = Issue::new(brush(1), IssueKind::EmptyBrushEntity);
    assert_eq!(issue.severity(), Severity::Error);

    let issue = Issue::new(brush(1), IssueKind::EmptyGroup);
    assert_eq!(issue.severity(), Severity::Info);
}

#[test]
fn test_description() {
    let plain = Issue::new(brush(1), IssueKind::NonIntegerPlanePoints);
    assert_eq!(plain.description(), "Brush has non-integer plane points");

    let detailed = Issue::new(brush(2), IssueKind::LongPropertyKey).with_detail("targetname_0123");
    assert_eq!(
        detailed.description(),
        "Property key is too long: targetname_0123"
    );
}

#[test]
fn test_severity_order_lists_errors_first() {
    let mut severities = vec![Severity::Info, Severity::Error, Severity::Warning];
    severities.sort();
    assert_eq!(
        severities,
        vec![Severity::Error, Severity::Warning, Severity::Info]
    );
    assert_eq!(Severity::Warning.to_string(), "warning");
}

#[test]
fn test_same_subject_rule() {
    let a = Issue::new(brush(1), IssueKind::NonIntegerPlanePoints);
    let b = Issue::new(brush(1), IssueKind::NonIntegerPlanePoints);
    let other_brush = Issue::new(brush(2), IssueKind::NonIntegerPlanePoints);
    let other_kind = Issue::new(brush(1), IssueKind::NonIntegerVertices);

    assert!(a.merges_with(&b));
    assert!(!a.merges_with(&other_brush));
    assert!(!a.merges_with(&other_kind));
}

#[test]
fn test_same_kind_rule_ignores_subject() {
    let a = Issue::new(brush(1), IssueKind::WorldBounds);
    let b = Issue::new(brush(9), IssueKind::WorldBounds);
    assert!(a.merges_with(&b));
}

#[test]
fn test_never_rule() {
    let a = Issue::new(brush(1), IssueKind::EmptyBrushEntity);
    let b = Issue::new(brush(1), IssueKind::EmptyBrushEntity);
    assert!(!a.merges_with(&b));
}

#[test]
fn test_severity_mismatch_prevents_merge() {
    let a = Issue::new(brush(1), IssueKind::MissingTexture);
    let b = Issue::new(brush(1), IssueKind::MissingTexture).with_severity(Severity::Error);
    assert!(!a.merges_with(&b));
}

#[test]
fn test_mergeable_issues_share_an_order_key() {
    let a = Issue::new(brush(1), IssueKind::WorldBounds);
    let b = Issue::new(brush(5), IssueKind::WorldBounds);
    assert_eq!(a.order_key(), b.order_key());

    let c = Issue::new(brush(1), IssueKind::MissingTexture);
    let d = Issue::new(brush(5), IssueKind::MissingTexture);
    assert!(c.order_key() < d.order_key());
}

#[test]
fn test_order_key_sorts_by_severity_first() {
    let info = Issue::new(brush(0), IssueKind::EmptyGroup);
    let error = Issue::new(brush(9), IssueKind::MissingClassname);
    assert!(error.order_key() < info.order_key());
}

#[test]
fn test_kind_catalogue_is_consistent() {
    for (index, kind) in IssueKind::ALL.iter().enumerate() {
        assert_eq!(kind.issue_type().bits().count_ones(), 1);
        assert_eq!(kind.to_string(), kind.as_str());
        assert!(!kind.summary().is_empty());
        for other in &IssueKind::ALL[index + 1..] {
            assert!(kind < other);
            assert!(!kind.issue_type().intersects(other.issue_type()));
        }
    }
}
