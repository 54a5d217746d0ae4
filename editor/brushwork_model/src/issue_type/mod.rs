//! Bit masks of validation issue types.
//!
//! Every validator reports exactly one issue type and owns one bit. Masks are
//! used to hide whole categories of issues from display without removing them
//! from the registry.

use bitflags::bitflags;

bitflags! {
    /// Set of issue types, one bit per validator.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct IssueTypes: u32 {
        const NON_INTEGER_PLANE_POINTS = 1 << 0;
        const NON_INTEGER_VERTICES = 1 << 1;
        const MISSING_TEXTURE = 1 << 2;
        const INVALID_TEXTURE_SCALE = 1 << 3;
        const WORLD_BOUNDS = 1 << 4;
        const EMPTY_BRUSH_ENTITY = 1 << 5;
        const POINT_ENTITY_WITH_BRUSHES = 1 << 6;
        const MISSING_CLASSNAME = 1 << 7;
        const MISSING_DEFINITION = 1 << 8;
        const EMPTY_GROUP = 1 << 9;
        const LONG_PROPERTY_KEY = 1 << 10;
        const LONG_PROPERTY_VALUE = 1 << 11;
        const EMPTY_PROPERTY = 1 << 12;
        const MIXED_BRUSH_CONTENTS = 1 << 13;
    }
}

impl IssueTypes {
    /// Geometry issue types (brush planes, vertices, bounds).
    pub const GEOMETRY: IssueTypes = IssueTypes::NON_INTEGER_PLANE_POINTS
        .union(IssueTypes::NON_INTEGER_VERTICES)
        .union(IssueTypes::WORLD_BOUNDS);

    /// Entity property issue types.
    pub const PROPERTIES: IssueTypes = IssueTypes::LONG_PROPERTY_KEY
        .union(IssueTypes::LONG_PROPERTY_VALUE)
        .union(IssueTypes::EMPTY_PROPERTY);
}
