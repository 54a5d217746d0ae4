//! Brushwork model types shared by the document and its validators.
//!
//! This crate holds the small, dependency-light vocabulary that the rest of
//! the editor uses to talk about the document without depending on it:
//! - [`NodeId`] identifies a document node (brush, entity, group, layer)
//! - [`IssueTypes`] is a bit mask of validation issue types
//! - [`NodeChange`] is the notification the document emits when a node is
//!   added, structurally changed, or deleted
//!
//! Every type is `Copy + Eq + Hash` so it can key hash maps and be passed
//! around by value.

mod change;
mod issue_type;
mod node_id;

pub use change::NodeChange;
pub use issue_type::IssueTypes;
pub use node_id::NodeId;
