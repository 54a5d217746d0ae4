//! Document change notifications.

use crate::NodeId;

/// A structural change to a document node.
///
/// The document emits one of these after every command that touches a node;
/// the owner of the issue registry turns it into re-validation of that node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeChange {
    /// The node was added to the document.
    Added(NodeId),
    /// The node's contents changed (geometry, properties, children).
    Changed(NodeId),
    /// The node was deleted. Its id will not come back.
    Removed(NodeId),
}

impl NodeChange {
    /// The node this change concerns.
    #[inline]
    pub fn node(self) -> NodeId {
        match self {
            NodeChange::Added(node) | NodeChange::Changed(node) | NodeChange::Removed(node) => {
                node
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_returns_the_changed_node() {
        let id = NodeId::new(12);
        assert_eq!(NodeChange::Added(id).node(), id);
        assert_eq!(NodeChange::Changed(id).node(), id);
        assert_eq!(NodeChange::Removed(id).node(), id);
    }
}
