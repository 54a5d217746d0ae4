//! Handle-indexed storage for issue nodes and the list primitives.
//!
//! [`IssueArena`] owns every node, linked or not. Lists are threaded through
//! the nodes by [`IssueId`] handles: the top-level list's ends live in the
//! arena, each group's sublist ends live in the group node.
//!
//! # Contracts
//!
//! | Operation        | Node        | Other                 |
//! |------------------|-------------|-----------------------|
//! | `insert_after`   | unlinked    | anchor linked         |
//! | `insert_before`  | unlinked    | anchor linked         |
//! | `remove`         | linked      |                       |
//! | `replace_with`   | linked      | replacement unlinked  |
//! | `dispose`        | unlinked    | group must be empty   |
//!
//! Groups never join a group's sublist. Every check runs before the first
//! link is written, so a rejected call leaves all lists untouched.

use crate::error::violation;
use crate::node::{IssueGroup, IssueNode, Links, List, ListEnds, NodeBody};
use crate::{Issue, IssueId, IssueRef, LinkError};

/// One arena slot.
#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<IssueNode>,
}

/// Result of offering an issue to an existing node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    /// The issue now lives in `group` as node `issue`.
    Absorbed { group: IssueId, issue: IssueId },
    /// Not equivalent; ownership of the issue goes back to the caller.
    Rejected(Issue),
}

/// Arena of issue nodes.
#[derive(Clone, Debug, Default)]
pub struct IssueArena {
    slots: Vec<Slot>,
    /// Disposed slot indices, reused before the arena grows.
    free: Vec<u32>,
    top: ListEnds,
    live: usize,
}

impl IssueArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        IssueArena {
            slots: Vec::new(),
            free: Vec::new(),
            top: ListEnds::default(),
            live: 0,
        }
    }

    /// Allocate an unlinked node for `issue`.
    ///
    /// # Panics
    ///
    /// Panics if the arena would hold more than `u32::MAX` slots. Disposed
    /// slots are reused first, so only that many live nodes can trigger it.
    pub fn alloc(&mut self, issue: Issue) -> IssueId {
        self.alloc_node(NodeBody::Issue(issue))
    }

    fn alloc_node(&mut self, body: NodeBody) -> IssueId {
        let node = Some(IssueNode::new(body));
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = node;
            return IssueId::new(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("issue arena exceeded {} nodes", u32::MAX));
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        IssueId::new(index, 0)
    }

    /// Number of live nodes, linked or not.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Look up a live node.
    pub fn get(&self, id: IssueId) -> Option<&IssueNode> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    /// View of a live node for display.
    pub fn view(&self, id: IssueId) -> Option<IssueRef<'_>> {
        self.get(id).map(|node| IssueRef::new(self, id, node))
    }

    #[inline]
    pub fn contains(&self, id: IssueId) -> bool {
        self.get(id).is_some()
    }

    fn node(&self, id: IssueId) -> Result<&IssueNode, LinkError> {
        self.get(id)
            .ok_or_else(|| violation(LinkError::StaleHandle(id)))
    }

    fn node_mut(&mut self, id: IssueId) -> Result<&mut IssueNode, LinkError> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| violation(LinkError::StaleHandle(id)))
    }

    /// The list `id` is linked into, if any.
    #[inline]
    pub fn owner(&self, id: IssueId) -> Option<List> {
        self.get(id).and_then(IssueNode::owner)
    }

    /// Next node in the list `id` belongs to.
    #[inline]
    pub fn next(&self, id: IssueId) -> Option<IssueId> {
        self.get(id).and_then(|node| node.links().next)
    }

    /// Previous node in the list `id` belongs to.
    #[inline]
    pub fn previous(&self, id: IssueId) -> Option<IssueId> {
        self.get(id).and_then(|node| node.links().previous)
    }

    /// Head of `list`.
    pub fn first(&self, list: List) -> Option<IssueId> {
        self.ends(list)?.first
    }

    /// Tail of `list`.
    pub fn last(&self, list: List) -> Option<IssueId> {
        self.ends(list)?.last
    }

    /// Number of nodes in `list`; zero if `list` names no live group.
    pub fn list_len(&self, list: List) -> usize {
        self.ends(list).map_or(0, |ends| ends.len)
    }

    /// Forward iterator over `list`.
    pub fn iter(&self, list: List) -> Iter<'_> {
        Iter {
            arena: self,
            cursor: self.first(list),
        }
    }

    fn ends(&self, list: List) -> Option<ListEnds> {
        match list {
            List::TopLevel => Some(self.top),
            List::Group(group) => self.get(group)?.group().map(IssueGroup::children),
        }
    }

    fn checked_ends(&self, list: List) -> Result<ListEnds, LinkError> {
        match list {
            List::TopLevel => Ok(self.top),
            List::Group(group) => self
                .node(group)?
                .group()
                .map(IssueGroup::children)
                .ok_or_else(|| violation(LinkError::NotAGroup(group))),
        }
    }

    fn ends_mut(&mut self, list: List) -> Result<&mut ListEnds, LinkError> {
        match list {
            List::TopLevel => Ok(&mut self.top),
            List::Group(group) => self
                .node_mut(group)?
                .group_mut()
                .map(IssueGroup::children_mut)
                .ok_or_else(|| violation(LinkError::NotAGroup(group))),
        }
    }

    fn expect_unlinked(&self, id: IssueId) -> Result<(), LinkError> {
        if self.node(id)?.is_linked() {
            return Err(violation(LinkError::AlreadyLinked(id)));
        }
        Ok(())
    }

    fn linked_list(&self, id: IssueId) -> Result<List, LinkError> {
        self.node(id)?
            .owner()
            .ok_or_else(|| violation(LinkError::NotLinked(id)))
    }

    /// Check that `id` may become a member of `list`.
    fn check_joinable(&self, id: IssueId, list: List) -> Result<(), LinkError> {
        if let List::Group(group) = list {
            if self.node(id)?.group().is_some() {
                return Err(violation(LinkError::NestedGroup(id)));
            }
            if self.node(group)?.group().is_none() {
                return Err(violation(LinkError::NotAGroup(group)));
            }
        }
        Ok(())
    }

    /// Link the unlinked node `id` directly after the linked node `anchor`,
    /// in whichever list `anchor` belongs to.
    pub fn insert_after(&mut self, id: IssueId, anchor: IssueId) -> Result<(), LinkError> {
        self.expect_unlinked(id)?;
        let list = self.linked_list(anchor)?;
        self.check_joinable(id, list)?;

        let next = self.node(anchor)?.links().next;
        self.node_mut(id)?.attach(
            list,
            Links {
                previous: Some(anchor),
                next,
            },
        );
        self.node_mut(anchor)?.links_mut(list).next = Some(id);
        match next {
            Some(next) => self.node_mut(next)?.links_mut(list).previous = Some(id),
            None => self.ends_mut(list)?.last = Some(id),
        }
        self.ends_mut(list)?.len += 1;
        tracing::trace!(%id, after = %anchor, "linked issue");
        Ok(())
    }

    /// Link the unlinked node `id` directly before the linked node `anchor`.
    pub fn insert_before(&mut self, id: IssueId, anchor: IssueId) -> Result<(), LinkError> {
        self.expect_unlinked(id)?;
        let list = self.linked_list(anchor)?;
        self.check_joinable(id, list)?;

        let previous = self.node(anchor)?.links().previous;
        self.node_mut(id)?.attach(
            list,
            Links {
                previous,
                next: Some(anchor),
            },
        );
        self.node_mut(anchor)?.links_mut(list).previous = Some(id);
        match previous {
            Some(previous) => self.node_mut(previous)?.links_mut(list).next = Some(id),
            None => self.ends_mut(list)?.first = Some(id),
        }
        self.ends_mut(list)?.len += 1;
        tracing::trace!(%id, before = %anchor, "linked issue");
        Ok(())
    }

    /// Link `id` at the head of `list`.
    pub fn push_front(&mut self, list: List, id: IssueId) -> Result<(), LinkError> {
        match self.checked_ends(list)?.first {
            Some(first) => self.insert_before(id, first),
            None => self.link_into_empty(list, id),
        }
    }

    /// Link `id` at the tail of `list`.
    pub fn push_back(&mut self, list: List, id: IssueId) -> Result<(), LinkError> {
        match self.checked_ends(list)?.last {
            Some(last) => self.insert_after(id, last),
            None => self.link_into_empty(list, id),
        }
    }

    fn link_into_empty(&mut self, list: List, id: IssueId) -> Result<(), LinkError> {
        self.expect_unlinked(id)?;
        self.check_joinable(id, list)?;
        self.node_mut(id)?.attach(list, Links::NONE);
        *self.ends_mut(list)? = ListEnds {
            first: Some(id),
            last: Some(id),
            len: 1,
        };
        tracing::trace!(%id, "linked issue into empty list");
        Ok(())
    }

    /// Unlink `id` from its list, joining its neighbours.
    ///
    /// The node stays allocated; the caller owns it until it is linked again
    /// or disposed.
    pub fn remove(&mut self, id: IssueId) -> Result<(), LinkError> {
        let list = self.linked_list(id)?;
        let Links { previous, next } = self.node(id)?.links();

        match previous {
            Some(previous) => self.node_mut(previous)?.links_mut(list).next = next,
            None => self.ends_mut(list)?.first = next,
        }
        match next {
            Some(next) => self.node_mut(next)?.links_mut(list).previous = previous,
            None => self.ends_mut(list)?.last = previous,
        }
        self.ends_mut(list)?.len -= 1;
        self.node_mut(id)?.detach();
        tracing::trace!(%id, "unlinked issue");
        Ok(())
    }

    /// Put the unlinked node `other` exactly where `id` is, and unlink `id`.
    pub fn replace_with(&mut self, id: IssueId, other: IssueId) -> Result<(), LinkError> {
        let list = self.linked_list(id)?;
        self.expect_unlinked(other)?;
        self.check_joinable(other, list)?;

        let links = self.node(id)?.links();
        self.node_mut(other)?.attach(list, links);
        match links.previous {
            Some(previous) => self.node_mut(previous)?.links_mut(list).next = Some(other),
            None => self.ends_mut(list)?.first = Some(other),
        }
        match links.next {
            Some(next) => self.node_mut(next)?.links_mut(list).previous = Some(other),
            None => self.ends_mut(list)?.last = Some(other),
        }
        self.node_mut(id)?.detach();
        tracing::trace!(%id, replacement = %other, "replaced issue");
        Ok(())
    }

    /// Offer `incoming` to the linked node `target`.
    ///
    /// A group absorbs an equivalent issue at the end of its sublist. A
    /// standalone issue that is equivalent is first promoted: a new group takes
    /// its place in the top-level list and adopts it as the first child.
    /// Merging never creates a top-level entry.
    pub fn merge_with(
        &mut self,
        target: IssueId,
        incoming: Issue,
    ) -> Result<MergeOutcome, LinkError> {
        let node = self.node(target)?;
        let compatible = match node.body() {
            NodeBody::Issue(existing) => {
                // Promotion puts a group where `target` is; that must be the top level.
                match node.owner() {
                    Some(List::TopLevel) => {}
                    Some(List::Group(_)) => {
                        return Err(violation(LinkError::NestedGroup(target)));
                    }
                    None => return Err(violation(LinkError::NotLinked(target))),
                }
                existing.merges_with(&incoming)
            }
            NodeBody::Group(_) => self
                .representative(target)
                .is_some_and(|representative| representative.merges_with(&incoming)),
        };
        if !compatible {
            return Ok(MergeOutcome::Rejected(incoming));
        }

        let group = if self.node(target)?.group().is_some() {
            target
        } else {
            self.promote(target)?
        };
        let issue = self.alloc(incoming);
        self.push_back(List::Group(group), issue)?;
        Ok(MergeOutcome::Absorbed { group, issue })
    }

    /// Swap the standalone issue `target` for a new group containing it.
    fn promote(&mut self, target: IssueId) -> Result<IssueId, LinkError> {
        let (kind, severity) = match self.node(target)?.issue() {
            Some(issue) => (issue.kind(), issue.severity()),
            None => return Err(violation(LinkError::NotAnIssue(target))),
        };
        let group = self.alloc_node(NodeBody::Group(IssueGroup::new(kind, severity)));
        self.replace_with(target, group)?;
        self.push_back(List::Group(group), target)?;
        tracing::debug!(%target, %group, "promoted issue to group");
        Ok(group)
    }

    /// Free the unlinked node `id`, returning what it held.
    pub fn dispose(&mut self, id: IssueId) -> Result<NodeBody, LinkError> {
        let node = self.node(id)?;
        if node.is_linked() {
            return Err(violation(LinkError::StillLinked(id)));
        }
        if node.group().is_some_and(|group| !group.is_empty()) {
            return Err(violation(LinkError::GroupNotEmpty(id)));
        }

        let slot = &mut self.slots[id.index()];
        let node = slot
            .node
            .take()
            .ok_or_else(|| violation(LinkError::StaleHandle(id)))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.raw_index());
        self.live -= 1;
        Ok(node.into_body())
    }

    /// Drop every node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in (0u32..).zip(self.slots.iter_mut()) {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.top = ListEnds::default();
        self.live = 0;
    }

    /// The issue that speaks for `id`: the issue itself, or a group's first
    /// child.
    pub fn representative(&self, id: IssueId) -> Option<&Issue> {
        let node = self.get(id)?;
        match node.body() {
            NodeBody::Issue(issue) => Some(issue),
            NodeBody::Group(group) => self.get(group.first_child()?)?.issue(),
        }
    }

    /// Display text for `id`, built fresh from current state.
    pub fn describe(&self, id: IssueId) -> Option<String> {
        let node = self.get(id)?;
        Some(match node.body() {
            NodeBody::Issue(issue) => issue.description(),
            NodeBody::Group(group) => match self.representative(id) {
                Some(representative) => {
                    format!("{} issues: {}", group.len(), representative.description())
                }
                None => format!("{} issues", group.len()),
            },
        })
    }
}

/// Forward cursor over one list.
///
/// Yields each node once from head to tail. Holding it borrows the arena, so
/// the list cannot change underneath it.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    arena: &'a IssueArena,
    cursor: Option<IssueId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = IssueRef<'a>;

    fn next(&mut self) -> Option<IssueRef<'a>> {
        let id = self.cursor.take()?;
        let node = self.arena.get(id)?;
        self.cursor = node.links().next;
        Some(IssueRef::new(self.arena, id, node))
    }
}

impl std::iter::FusedIterator for Iter<'_> {}

impl<'a> Iter<'a> {
    /// An iterator that yields nothing.
    pub(crate) fn empty(arena: &'a IssueArena) -> Self {
        Iter {
            arena,
            cursor: None,
        }
    }
}
