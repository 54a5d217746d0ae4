//! Read-only views of registry entries for presenters.

use std::fmt;

use brushwork_model::{IssueTypes, NodeId};

use crate::arena::Iter;
use crate::node::{IssueNode, List, NodeBody};
use crate::{Issue, IssueArena, IssueId, IssueKind, Severity};

/// A live node, borrowed from its arena.
///
/// Gives the same answers for plain issues and groups: a group reports its
/// representative's subject, its shared kind and severity, and an aggregate
/// description.
#[derive(Copy, Clone)]
pub struct IssueRef<'a> {
    arena: &'a IssueArena,
    id: IssueId,
    node: &'a IssueNode,
}

impl<'a> IssueRef<'a> {
    pub(crate) fn new(arena: &'a IssueArena, id: IssueId, node: &'a IssueNode) -> Self {
        IssueRef { arena, id, node }
    }

    #[inline]
    pub fn id(&self) -> IssueId {
        self.id
    }

    #[inline]
    pub fn node(&self) -> &'a IssueNode {
        self.node
    }

    /// The plain issue, if this is not a group.
    #[inline]
    pub fn issue(&self) -> Option<&'a Issue> {
        self.node.issue()
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        self.node.group().is_some()
    }

    /// The issue itself, or a group's first child.
    pub fn representative(&self) -> Option<&'a Issue> {
        self.arena.representative(self.id)
    }

    /// The node this entry concerns; [`NodeId::INVALID`] for an empty group.
    pub fn subject(&self) -> NodeId {
        self.representative().map_or(NodeId::INVALID, Issue::subject)
    }

    pub fn kind(&self) -> IssueKind {
        match self.node.body() {
            NodeBody::Issue(issue) => issue.kind(),
            NodeBody::Group(group) => group.kind(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self.node.body() {
            NodeBody::Issue(issue) => issue.severity(),
            NodeBody::Group(group) => group.severity(),
        }
    }

    #[inline]
    pub fn issue_type(&self) -> IssueTypes {
        self.kind().issue_type()
    }

    /// Number of grouped issues; zero for a plain issue.
    pub fn child_count(&self) -> usize {
        self.node.group().map_or(0, |group| group.len())
    }

    /// The grouped issues in order; empty for a plain issue.
    pub fn children(&self) -> Iter<'a> {
        if self.is_group() {
            self.arena.iter(List::Group(self.id))
        } else {
            Iter::empty(self.arena)
        }
    }

    /// Display text, recomputed on every call.
    pub fn as_string(&self) -> String {
        self.arena.describe(self.id).unwrap_or_default()
    }
}

impl fmt::Debug for IssueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueRef")
            .field("id", &self.id)
            .field("severity", &self.severity())
            .field("kind", &self.kind())
            .field("subject", &self.subject())
            .field("children", &self.child_count())
            .finish()
    }
}
