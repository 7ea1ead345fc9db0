use super::ids::{ElementId, RegionId};
use crate::core::geometry::transform::Transform;
use crate::core::identifiers::CellId;

/// A rigid transform plus the composite identifier attaching one region
/// instance under a parent element.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub transform: Transform,
    pub cell_id: CellId,
}

impl Placement {
    pub fn new(transform: Transform, cell_id: CellId) -> Self {
        Self { transform, cell_id }
    }
}

/// One named, indexed node of the placed geometry hierarchy.
///
/// Every element except the root carries exactly one placement and has
/// exactly one parent; children are owned by arena handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub index: i64,
    pub region: RegionId,
    pub placement: Option<Placement>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}
