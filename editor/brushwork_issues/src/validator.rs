//! The boundary to the validators that produce issues.

use brushwork_model::{IssueTypes, NodeId};

use crate::Issue;

/// Produces issues for one document node.
///
/// `D` is the document type; the registry never looks inside it. A validator
/// reports issues only about the node it is asked about, and only of the
/// types it declares.
pub trait Validator<D: ?Sized> {
    /// Issue types this validator can report.
    fn issue_types(&self) -> IssueTypes;

    /// Append every problem found on `subject` to `issues`.
    fn validate(&self, document: &D, subject: NodeId, issues: &mut Vec<Issue>);
}
