//! Issue payloads reported by validators.
//!
//! Defines [`Issue`], [`IssueKind`], [`Severity`] and [`MergeRule`]: what a
//! validator hands to the registry and how the registry decides whether two
//! issues say the same thing.

use std::fmt;

use brushwork_model::{IssueTypes, NodeId};

/// Severity level for issues.
///
/// Ordered from most to least severe; the registry lists errors first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// When two issues of the same kind collapse into one group.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MergeRule {
    /// Every issue stays standalone.
    Never,
    /// Issues on the same node collapse (e.g. several bad faces of one brush).
    SameSubject,
    /// Issues collapse regardless of node (e.g. everything outside the world).
    SameKind,
}

/// The kinds of issue the editor's validators report.
///
/// Declaration order is display order within one severity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum IssueKind {
    NonIntegerPlanePoints,
    NonIntegerVertices,
    MissingTexture,
    InvalidTextureScale,
    WorldBounds,
    EmptyBrushEntity,
    PointEntityWithBrushes,
    MissingClassname,
    MissingDefinition,
    EmptyGroup,
    LongPropertyKey,
    LongPropertyValue,
    EmptyProperty,
    MixedBrushContents,
}

impl IssueKind {
    /// Every kind, in declaration order.
    pub const ALL: [IssueKind; 14] = [
        IssueKind::NonIntegerPlanePoints,
        IssueKind::NonIntegerVertices,
        IssueKind::MissingTexture,
        IssueKind::InvalidTextureScale,
        IssueKind::WorldBounds,
        IssueKind::EmptyBrushEntity,
        IssueKind::PointEntityWithBrushes,
        IssueKind::MissingClassname,
        IssueKind::MissingDefinition,
        IssueKind::EmptyGroup,
        IssueKind::LongPropertyKey,
        IssueKind::LongPropertyValue,
        IssueKind::EmptyProperty,
        IssueKind::MixedBrushContents,
    ];

    /// Stable identifier, used in logs and preferences.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::NonIntegerPlanePoints => "non-integer-plane-points",
            IssueKind::NonIntegerVertices => "non-integer-vertices",
            IssueKind::MissingTexture => "missing-texture",
            IssueKind::InvalidTextureScale => "invalid-texture-scale",
            IssueKind::WorldBounds => "world-bounds",
            IssueKind::EmptyBrushEntity => "empty-brush-entity",
            IssueKind::PointEntityWithBrushes => "point-entity-with-brushes",
            IssueKind::MissingClassname => "missing-classname",
            IssueKind::MissingDefinition => "missing-definition",
            IssueKind::EmptyGroup => "empty-group",
            IssueKind::LongPropertyKey => "long-property-key",
            IssueKind::LongPropertyValue => "long-property-value",
            IssueKind::EmptyProperty => "empty-property",
            IssueKind::MixedBrushContents => "mixed-brush-contents",
        }
    }

    /// The issue type bit owned by the validator reporting this kind.
    pub fn issue_type(self) -> IssueTypes {
        match self {
            IssueKind::NonIntegerPlanePoints => IssueTypes::NON_INTEGER_PLANE_POINTS,
            IssueKind::NonIntegerVertices => IssueTypes::NON_INTEGER_VERTICES,
            IssueKind::MissingTexture => IssueTypes::MISSING_TEXTURE,
            IssueKind::InvalidTextureScale => IssueTypes::INVALID_TEXTURE_SCALE,
            IssueKind::WorldBounds => IssueTypes::WORLD_BOUNDS,
            IssueKind::EmptyBrushEntity => IssueTypes::EMPTY_BRUSH_ENTITY,
            IssueKind::PointEntityWithBrushes => IssueTypes::POINT_ENTITY_WITH_BRUSHES,
            IssueKind::MissingClassname => IssueTypes::MISSING_CLASSNAME,
            IssueKind::MissingDefinition => IssueTypes::MISSING_DEFINITION,
            IssueKind::EmptyGroup => IssueTypes::EMPTY_GROUP,
            IssueKind::LongPropertyKey => IssueTypes::LONG_PROPERTY_KEY,
            IssueKind::LongPropertyValue => IssueTypes::LONG_PROPERTY_VALUE,
            IssueKind::EmptyProperty => IssueTypes::EMPTY_PROPERTY,
            IssueKind::MixedBrushContents => IssueTypes::MIXED_BRUSH_CONTENTS,
        }
    }

    /// Severity an issue of this kind gets unless the validator overrides it.
    pub fn default_severity(self) -> Severity {
        match self {
            IssueKind::WorldBounds
            | IssueKind::EmptyBrushEntity
            | IssueKind::PointEntityWithBrushes
            | IssueKind::MissingClassname => Severity::Error,
            IssueKind::EmptyGroup => Severity::Info,
            IssueKind::NonIntegerPlanePoints
            | IssueKind::NonIntegerVertices
            | IssueKind::MissingTexture
            | IssueKind::InvalidTextureScale
            | IssueKind::MissingDefinition
            | IssueKind::LongPropertyKey
            | IssueKind::LongPropertyValue
            | IssueKind::EmptyProperty
            | IssueKind::MixedBrushContents => Severity::Warning,
        }
    }

    /// How duplicates of this kind collapse.
    pub fn merge_rule(self) -> MergeRule {
        match self {
            IssueKind::NonIntegerPlanePoints
            | IssueKind::NonIntegerVertices
            | IssueKind::MissingTexture
            | IssueKind::InvalidTextureScale
            | IssueKind::LongPropertyKey
            | IssueKind::LongPropertyValue
            | IssueKind::EmptyProperty => MergeRule::SameSubject,
            IssueKind::WorldBounds | IssueKind::MissingDefinition => MergeRule::SameKind,
            IssueKind::EmptyBrushEntity
            | IssueKind::PointEntityWithBrushes
            | IssueKind::MissingClassname
            | IssueKind::EmptyGroup
            | IssueKind::MixedBrushContents => MergeRule::Never,
        }
    }

    /// One-line description shown for an issue of this kind.
    pub fn summary(self) -> &'static str {
        match self {
            IssueKind::NonIntegerPlanePoints => "Brush has non-integer plane points",
            IssueKind::NonIntegerVertices => "Brush has non-integer vertices",
            IssueKind::MissingTexture => "Face uses a missing texture",
            IssueKind::InvalidTextureScale => "Face has an invalid texture scale",
            IssueKind::WorldBounds => "Object is out of world bounds",
            IssueKind::EmptyBrushEntity => "Brush entity is empty",
            IssueKind::PointEntityWithBrushes => "Point entity has brushes",
            IssueKind::MissingClassname => "Entity has no classname",
            IssueKind::MissingDefinition => "Entity has no definition",
            IssueKind::EmptyGroup => "Group is empty",
            IssueKind::LongPropertyKey => "Property key is too long",
            IssueKind::LongPropertyValue => "Property value is too long",
            IssueKind::EmptyProperty => "Entity has a property with an empty key or value",
            IssueKind::MixedBrushContents => "Brush has mixed content flags",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation problem found on one document node.
///
/// Built by a validator and handed to the registry by value. The fields are
/// fixed once built: the registry orders and groups issues by them.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Issue {
    subject: NodeId,
    kind: IssueKind,
    severity: Severity,
    detail: Option<String>,
}

impl Issue {
    /// Create an issue with the kind's default severity.
    pub fn new(subject: NodeId, kind: IssueKind) -> Self {
        Issue {
            subject,
            kind,
            severity: kind.default_severity(),
            detail: None,
        }
    }

    /// Override the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attach specifics (texture name, property key) to the description.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The node this issue concerns.
    #[inline]
    pub fn subject(&self) -> NodeId {
        self.subject
    }

    #[inline]
    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Display text, built fresh on every call.
    pub fn description(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {detail}", self.kind.summary()),
            None => self.kind.summary().to_string(),
        }
    }

    /// Check whether `other` reports the same problem and may share a group.
    pub fn merges_with(&self, other: &Issue) -> bool {
        if self.kind != other.kind || self.severity != other.severity {
            return false;
        }
        match self.kind.merge_rule() {
            MergeRule::Never => false,
            MergeRule::SameSubject => self.subject == other.subject,
            MergeRule::SameKind => true,
        }
    }

    /// Position of this issue in the registry.
    ///
    /// Issues that may merge compare equal, so they always end up adjacent.
    pub(crate) fn order_key(&self) -> OrderKey {
        let subject = match self.kind.merge_rule() {
            MergeRule::SameKind => None,
            MergeRule::Never | MergeRule::SameSubject => Some(self.subject),
        };
        OrderKey {
            severity: self.severity,
            kind: self.kind,
            subject,
        }
    }
}

/// Sort key for top-level registry entries: severity, kind, then subject.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub(crate) struct OrderKey {
    severity: Severity,
    kind: IssueKind,
    subject: Option<NodeId>,
}

impl OrderKey {
    /// Key of an entry whose subject is unknown (an empty group).
    pub(crate) fn class(severity: Severity, kind: IssueKind) -> Self {
        OrderKey {
            severity,
            kind,
            subject: None,
        }
    }
}

#[cfg(test)]
mod tests;
