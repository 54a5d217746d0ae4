//! Link contract errors.
//!
//! Every list primitive checks its preconditions before touching a link.
//! A failed check is a programming error in the caller: the primitive logs
//! it and returns a [`LinkError`] with the list left exactly as it was.

use crate::IssueId;

/// A violated list contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LinkError {
    /// The node is already a member of a list.
    #[error("{0} is already linked into a list")]
    AlreadyLinked(IssueId),

    /// The node is not a member of any list.
    #[error("{0} is not linked into any list")]
    NotLinked(IssueId),

    /// A group was asked to join another group's sublist.
    #[error("{0} is a group and cannot join another group")]
    NestedGroup(IssueId),

    /// A group operation was given a plain issue.
    #[error("{0} is not a group")]
    NotAGroup(IssueId),

    /// A single-issue operation was given a group.
    #[error("{0} is a group, not a single issue")]
    NotAnIssue(IssueId),

    /// Only unlinked nodes can be disposed.
    #[error("{0} must be unlinked before it is disposed")]
    StillLinked(IssueId),

    /// A group was disposed while it still had children.
    #[error("group {0} still has children")]
    GroupNotEmpty(IssueId),

    /// The handle refers to a disposed node or was never issued.
    #[error("{0} does not refer to a live node")]
    StaleHandle(IssueId),
}

impl LinkError {
    /// The node the violated contract concerns.
    pub fn issue(self) -> IssueId {
        match self {
            LinkError::AlreadyLinked(id)
            | LinkError::NotLinked(id)
            | LinkError::NestedGroup(id)
            | LinkError::NotAGroup(id)
            | LinkError::NotAnIssue(id)
            | LinkError::StillLinked(id)
            | LinkError::GroupNotEmpty(id)
            | LinkError::StaleHandle(id) => id,
        }
    }
}

/// Log a contract violation and hand the error back for propagation.
#[cold]
pub(crate) fn violation(err: LinkError) -> LinkError {
    tracing::error!(error = %err, "issue list contract violated");
    err
}
