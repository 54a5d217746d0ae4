use super::*;
use brushwork_model::NodeId;
use pretty_assertions::assert_eq;

fn plain() -> IssueNode {
    IssueNode::new(NodeBody::Issue(Issue::new(
        NodeId::new(1),
        IssueKind::NonIntegerVertices,
    )))
}

#[test]
fn test_new_node_is_unlinked() {
    let node = plain();
    assert!(!node.is_linked());
    assert_eq!(node.owner(), None);
    assert_eq!(node.links(), Links::NONE);
    assert!(node.issue().is_some());
    assert!(node.group().is_none());
}

#[test]
fn test_attach_uses_the_pair_of_the_owning_list() {
    let neighbour = IssueId::new(3, 0);
    let group = IssueId::new(9, 0);

    let mut top = plain();
    top.attach(
        List::TopLevel,
        Links {
            previous: Some(neighbour),
            next: None,
        },
    );
    assert_eq!(top.links().previous, Some(neighbour));
    assert_eq!(top.sibling_links(), Links::NONE);

    let mut grouped = plain();
    grouped.attach(
        List::Group(group),
        Links {
            previous: None,
            next: Some(neighbour),
        },
    );
    assert_eq!(grouped.owner(), Some(List::Group(group)));
    assert_eq!(grouped.links().next, Some(neighbour));
    assert_eq!(grouped.top_links(), Links::NONE);
}

#[test]
fn test_detach_clears_both_pairs() {
    let mut node = plain();
    node.attach(
        List::TopLevel,
        Links {
            previous: Some(IssueId::new(1, 0)),
            next: Some(IssueId::new(2, 0)),
        },
    );
    node.detach();
    assert!(!node.is_linked());
    assert_eq!(node.top_links(), Links::NONE);
    assert_eq!(node.sibling_links(), Links::NONE);
}

#[test]
fn test_new_group_is_empty() {
    let node = IssueNode::new(NodeBody::Group(IssueGroup::new(
        IssueKind::WorldBounds,
        Severity::Error,
    )));
    let Some(group) = node.group() else {
        panic!("expected a group body");
    };
    assert!(group.is_empty());
    assert_eq!(group.len(), 0);
    assert_eq!(group.first_child(), None);
    assert_eq!(group.kind(), IssueKind::WorldBounds);
}
