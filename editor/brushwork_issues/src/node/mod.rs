//! Arena-resident nodes and their links.
//!
//! A node is either a plain [`Issue`] or an [`IssueGroup`]. Each node carries
//! two link pairs: `top` for membership in the registry's top-level list and
//! `sibling` for membership in a group's sublist. Only the pair matching the
//! node's current [`List`] is ever non-empty.

use crate::{Issue, IssueId, IssueKind, Severity};

/// The list a linked node belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum List {
    /// The registry's top-level list.
    TopLevel,
    /// The sublist owned by the given group.
    Group(IssueId),
}

/// Neighbour handles within one list.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Links {
    pub previous: Option<IssueId>,
    pub next: Option<IssueId>,
}

impl Links {
    /// No neighbours.
    pub const NONE: Links = Links {
        previous: None,
        next: None,
    };
}

/// First/last handles and length of one list.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub(crate) struct ListEnds {
    pub(crate) first: Option<IssueId>,
    pub(crate) last: Option<IssueId>,
    pub(crate) len: usize,
}

/// An aggregate of equivalent issues.
///
/// All children share the group's kind and severity; the first child is the
/// representative used for the group's subject and description.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IssueGroup {
    kind: IssueKind,
    severity: Severity,
    children: ListEnds,
}

impl IssueGroup {
    pub(crate) fn new(kind: IssueKind, severity: Severity) -> Self {
        IssueGroup {
            kind,
            severity,
            children: ListEnds::default(),
        }
    }

    #[inline]
    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Number of grouped issues.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.len == 0
    }

    #[inline]
    pub fn first_child(&self) -> Option<IssueId> {
        self.children.first
    }

    #[inline]
    pub fn last_child(&self) -> Option<IssueId> {
        self.children.last
    }

    pub(crate) fn children(&self) -> ListEnds {
        self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut ListEnds {
        &mut self.children
    }
}

/// What a node holds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeBody {
    Issue(Issue),
    Group(IssueGroup),
}

/// A node in the issue arena.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IssueNode {
    body: NodeBody,
    owner: Option<List>,
    top: Links,
    sibling: Links,
}

impl IssueNode {
    pub(crate) fn new(body: NodeBody) -> Self {
        IssueNode {
            body,
            owner: None,
            top: Links::NONE,
            sibling: Links::NONE,
        }
    }

    #[inline]
    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    /// The plain issue, if this node is not a group.
    #[inline]
    pub fn issue(&self) -> Option<&Issue> {
        match &self.body {
            NodeBody::Issue(issue) => Some(issue),
            NodeBody::Group(_) => None,
        }
    }

    /// The group, if this node is one.
    #[inline]
    pub fn group(&self) -> Option<&IssueGroup> {
        match &self.body {
            NodeBody::Group(group) => Some(group),
            NodeBody::Issue(_) => None,
        }
    }

    pub(crate) fn group_mut(&mut self) -> Option<&mut IssueGroup> {
        match &mut self.body {
            NodeBody::Group(group) => Some(group),
            NodeBody::Issue(_) => None,
        }
    }

    /// The list this node is linked into; `None` while unlinked.
    #[inline]
    pub fn owner(&self) -> Option<List> {
        self.owner
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.owner.is_some()
    }

    /// Neighbours in the list that currently owns this node.
    pub fn links(&self) -> Links {
        match self.owner {
            Some(List::TopLevel) => self.top,
            Some(List::Group(_)) => self.sibling,
            None => Links::NONE,
        }
    }

    /// The top-level link pair, regardless of membership.
    #[inline]
    pub fn top_links(&self) -> Links {
        self.top
    }

    /// The group-sublist link pair, regardless of membership.
    #[inline]
    pub fn sibling_links(&self) -> Links {
        self.sibling
    }

    pub(crate) fn links_mut(&mut self, list: List) -> &mut Links {
        match list {
            List::TopLevel => &mut self.top,
            List::Group(_) => &mut self.sibling,
        }
    }

    /// Make this node a member of `list` with the given neighbours.
    pub(crate) fn attach(&mut self, list: List, links: Links) {
        debug_assert!(self.owner.is_none(), "attach on a linked node");
        self.owner = Some(list);
        *self.links_mut(list) = links;
    }

    /// Clear both link pairs and return to the unlinked state.
    pub(crate) fn detach(&mut self) {
        self.owner = None;
        self.top = Links::NONE;
        self.sibling = Links::NONE;
    }

    pub(crate) fn into_body(self) -> NodeBody {
        self.body
    }
}

#[cfg(test)]
mod tests;
