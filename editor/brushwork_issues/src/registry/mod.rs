//! The ordered, self-grouping registry of document issues.
//!
//! Features:
//! - Deterministic order: severity, kind, subject, then detection order
//! - Merging of equivalent issues into groups at insertion time
//! - Group shrinking and dissolution on removal
//! - Per-subject index so removals for clean nodes cost nothing
//! - Display filtering of hidden issue types

use std::collections::hash_map::Entry;

use brushwork_model::{IssueTypes, NodeChange, NodeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::arena::{Iter, MergeOutcome};
use crate::error::violation;
use crate::issue::OrderKey;
use crate::node::{List, NodeBody};
use crate::{Issue, IssueArena, IssueId, IssueRef, LinkError, Validator};

/// Configuration for issue registration and display.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegistryConfig {
    /// Collapse equivalent issues into groups.
    pub group_duplicates: bool,
    /// Issue types left out of [`IssueRegistry::visible`].
    pub hidden: IssueTypes,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            group_duplicates: true,
            hidden: IssueTypes::empty(),
        }
    }
}

impl RegistryConfig {
    /// Create a config that keeps every issue standalone.
    pub fn ungrouped() -> Self {
        RegistryConfig {
            group_duplicates: false,
            hidden: IssueTypes::empty(),
        }
    }
}

/// Registry of the issues currently detected in a document.
///
/// # Example
///
/// ```no_run
/// use brushwork_issues::{Issue, IssueKind, IssueRegistry, LinkError};
/// use brushwork_model::NodeId;
///
/// fn main() -> Result<(), LinkError> {
///     let brush = NodeId::new(1);
///     let mut registry = IssueRegistry::new();
///     let a = registry.insert(Issue::new(brush, IssueKind::NonIntegerPlanePoints))?;
///     registry.insert(Issue::new(brush, IssueKind::NonIntegerPlanePoints))?;
///     assert_eq!(registry.len(), 1); // one group of two
///     registry.remove_issue(a)?; // the group dissolves
///     assert_eq!(registry.issue_count(), 1);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct IssueRegistry {
    /// Node storage; owns the head of the top-level list.
    arena: IssueArena,
    /// Number of live issues per subject.
    subjects: FxHashMap<NodeId, usize>,
    /// Configuration.
    config: RegistryConfig,
}

impl Default for IssueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        IssueRegistry {
            arena: IssueArena::new(),
            subjects: FxHashMap::default(),
            config: RegistryConfig::default(),
        }
    }

    /// Create an empty registry with custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        IssueRegistry {
            arena: IssueArena::new(),
            subjects: FxHashMap::default(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Read-only access to node storage, for walking links directly.
    pub fn arena(&self) -> &IssueArena {
        &self.arena
    }

    /// Register a freshly detected issue.
    ///
    /// Returns the handle of the issue's own node. If an equivalent entry
    /// already exists the issue joins its group and the top-level list does
    /// not grow.
    #[tracing::instrument(level = "trace", skip_all, fields(
        subject = %issue.subject(),
        kind = %issue.kind(),
    ))]
    pub fn insert(&mut self, issue: Issue) -> Result<IssueId, LinkError> {
        let key = issue.order_key();
        let subject = issue.subject();
        let anchor = self.insertion_anchor(key)?;

        // Ties are placed after existing entries, so an equivalent entry can
        // only be the anchor itself.
        let issue = match anchor {
            Some(anchor) if self.config.group_duplicates && self.order_key(anchor)? == key => {
                match self.arena.merge_with(anchor, issue)? {
                    MergeOutcome::Absorbed { group, issue } => {
                        self.track(subject);
                        tracing::debug!(%group, %issue, "merged duplicate issue");
                        return Ok(issue);
                    }
                    MergeOutcome::Rejected(issue) => issue,
                }
            }
            _ => issue,
        };

        let id = self.arena.alloc(issue);
        match anchor {
            Some(anchor) => self.arena.insert_after(id, anchor)?,
            None => self.arena.push_front(List::TopLevel, id)?,
        }
        self.track(subject);
        Ok(id)
    }

    /// Last top-level entry that sorts at or before `key`.
    fn insertion_anchor(&self, key: OrderKey) -> Result<Option<IssueId>, LinkError> {
        let mut anchor = None;
        let mut cursor = self.arena.first(List::TopLevel);
        while let Some(id) = cursor {
            if self.order_key(id)? > key {
                break;
            }
            anchor = Some(id);
            cursor = self.arena.next(id);
        }
        Ok(anchor)
    }

    fn order_key(&self, id: IssueId) -> Result<OrderKey, LinkError> {
        let node = self
            .arena
            .get(id)
            .ok_or_else(|| violation(LinkError::StaleHandle(id)))?;
        Ok(match node.body() {
            NodeBody::Issue(issue) => issue.order_key(),
            NodeBody::Group(group) => match self.arena.representative(id) {
                Some(representative) => representative.order_key(),
                None => OrderKey::class(group.severity(), group.kind()),
            },
        })
    }

    /// Remove every issue concerning `subject`.
    ///
    /// Groups shrink or dissolve as their members go. Returns how many issues
    /// were removed; zero when the subject had none.
    #[tracing::instrument(level = "debug", skip(self), fields(subject = %subject))]
    pub fn remove(&mut self, subject: NodeId) -> Result<usize, LinkError> {
        if !self.subjects.contains_key(&subject) {
            return Ok(0);
        }

        let mut matches: SmallVec<[IssueId; 4]> = SmallVec::new();
        for entry in self.arena.iter(List::TopLevel) {
            if entry.is_group() {
                matches.extend(
                    entry
                        .children()
                        .filter(|child| child.subject() == subject)
                        .map(|child| child.id()),
                );
            } else if entry.subject() == subject {
                matches.push(entry.id());
            }
        }

        for &id in &matches {
            self.remove_issue(id)?;
        }
        tracing::debug!(removed = matches.len(), "removed issues for subject");
        Ok(matches.len())
    }

    /// Remove one issue by the handle [`insert`](Self::insert) returned.
    ///
    /// Returns the issue to the caller. A group left with one member is
    /// replaced by that member; a group left empty is removed.
    pub fn remove_issue(&mut self, id: IssueId) -> Result<Issue, LinkError> {
        let node = self
            .arena
            .get(id)
            .ok_or_else(|| violation(LinkError::StaleHandle(id)))?;
        if node.issue().is_none() {
            return Err(violation(LinkError::NotAnIssue(id)));
        }
        let owner = node.owner();

        self.arena.remove(id)?;
        if let Some(List::Group(group)) = owner {
            self.shrink(group)?;
        }
        match self.arena.dispose(id)? {
            NodeBody::Issue(issue) => {
                self.untrack(issue.subject());
                Ok(issue)
            }
            NodeBody::Group(_) => Err(violation(LinkError::NotAnIssue(id))),
        }
    }

    /// Restore the group invariant after `group` lost a member.
    fn shrink(&mut self, group: IssueId) -> Result<(), LinkError> {
        let list = List::Group(group);
        match self.arena.list_len(list) {
            0 => {
                self.arena.remove(group)?;
                self.arena.dispose(group)?;
                tracing::debug!(%group, "removed empty issue group");
            }
            1 => {
                let Some(survivor) = self.arena.first(list) else {
                    return Ok(());
                };
                self.arena.remove(survivor)?;
                self.arena.replace_with(group, survivor)?;
                self.arena.dispose(group)?;
                tracing::debug!(%group, %survivor, "dissolved issue group");
            }
            _ => {}
        }
        Ok(())
    }

    /// Drop every issue. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.subjects.clear();
    }

    /// Re-run `validators` on `subject`, replacing its issues.
    ///
    /// Returns the number of issues now registered for `subject`.
    #[tracing::instrument(level = "debug", skip(self, document, validators), fields(
        subject = %subject,
        validators = validators.len(),
    ))]
    pub fn revalidate<D: ?Sized>(
        &mut self,
        document: &D,
        subject: NodeId,
        validators: &[&dyn Validator<D>],
    ) -> Result<usize, LinkError> {
        self.remove(subject)?;

        let mut found = Vec::new();
        let mut inserted = 0;
        for validator in validators {
            let declared = validator.issue_types();
            validator.validate(document, subject, &mut found);
            for issue in found.drain(..) {
                if issue.subject() != subject {
                    tracing::warn!(
                        reported = %issue.subject(),
                        kind = %issue.kind(),
                        "validator reported an issue for another node"
                    );
                    continue;
                }
                if !declared.contains(issue.kind().issue_type()) {
                    tracing::warn!(
                        kind = %issue.kind(),
                        "validator reported an undeclared issue type"
                    );
                    continue;
                }
                self.insert(issue)?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// React to a document change notification.
    pub fn apply_change<D: ?Sized>(
        &mut self,
        change: NodeChange,
        document: &D,
        validators: &[&dyn Validator<D>],
    ) -> Result<(), LinkError> {
        match change {
            NodeChange::Removed(node) => {
                self.remove(node)?;
            }
            NodeChange::Added(node) | NodeChange::Changed(node) => {
                self.revalidate(document, node, validators)?;
            }
        }
        Ok(())
    }

    /// All top-level entries, head to tail.
    pub fn iter(&self) -> Iter<'_> {
        self.arena.iter(List::TopLevel)
    }

    /// Top-level entries whose type is not hidden.
    pub fn visible(&self) -> impl Iterator<Item = IssueRef<'_>> + '_ {
        let hidden = self.config.hidden;
        self.iter()
            .filter(move |entry| !hidden.intersects(entry.issue_type()))
    }

    /// Look up a live node (top-level entry or grouped issue).
    pub fn get(&self, id: IssueId) -> Option<IssueRef<'_>> {
        self.arena.view(id)
    }

    /// Hide or show the given issue types in [`visible`](Self::visible).
    pub fn set_issue_hidden(&mut self, types: IssueTypes, hidden: bool) {
        self.config.hidden.set(types, hidden);
    }

    /// Check whether any of the given issue types is hidden.
    pub fn issue_hidden(&self, types: IssueTypes) -> bool {
        self.config.hidden.intersects(types)
    }

    #[inline]
    pub fn head(&self) -> Option<IssueId> {
        self.arena.first(List::TopLevel)
    }

    #[inline]
    pub fn tail(&self) -> Option<IssueId> {
        self.arena.last(List::TopLevel)
    }

    /// Number of top-level entries (a group counts once).
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.list_len(List::TopLevel)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of individual issues, counting every group member.
    pub fn issue_count(&self) -> usize {
        self.subjects.values().sum()
    }

    /// Number of issues registered for `subject`.
    pub fn subject_issue_count(&self, subject: NodeId) -> usize {
        self.subjects.get(&subject).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains_subject(&self, subject: NodeId) -> bool {
        self.subjects.contains_key(&subject)
    }

    fn track(&mut self, subject: NodeId) {
        *self.subjects.entry(subject).or_insert(0) += 1;
    }

    fn untrack(&mut self, subject: NodeId) {
        if let Entry::Occupied(mut entry) = self.subjects.entry(subject) {
            *entry.get_mut() -= 1;
            if *entry.get() == 0 {
                entry.remove();
            }
        }
    }
}
