use super::element::{Element, Placement};
use super::ids::{ElementId, RegionId};
use super::region::Region;
use crate::core::geometry::transform::Transform;
use nalgebra::{Point3, Vector3};
use slotmap::SlotMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    #[error("Parent element not found in tree")]
    ParentNotFound,

    #[error("Region handle not registered in tree")]
    RegionNotFound,

    #[error("Sibling elements share the identifier '{0}'")]
    DuplicateSiblingId(String),
}

/// The rooted hierarchy of placed elements produced by one build pass.
///
/// Elements and regions live in slot-map arenas and reference each other by
/// handle, so the structure is a strict tree with single ownership and a
/// read-only parent lookup. Once the build pass returns the tree it is never
/// mutated again and may be shared freely.
#[derive(Debug, Clone)]
pub struct DetectorTree {
    elements: SlotMap<ElementId, Element>,
    regions: SlotMap<RegionId, Region>,
    root: ElementId,
    /// Global position of the root's local frame, set by the builder that
    /// placed the envelope.
    origin: Vector3<f64>,
    sensitive: Vec<ElementId>,
}

impl DetectorTree {
    /// Creates a tree holding only the root (envelope) element. The root
    /// carries no placement; its global frame is given by `origin`.
    pub fn new(
        root_name: impl Into<String>,
        root_index: i64,
        root_region: Region,
        origin: Vector3<f64>,
    ) -> Self {
        let mut regions = SlotMap::with_key();
        let region = regions.insert(root_region);
        let mut elements = SlotMap::with_key();
        let root = elements.insert(Element {
            name: root_name.into(),
            index: root_index,
            region,
            placement: None,
            parent: None,
            children: Vec::new(),
        });
        Self {
            elements,
            regions,
            root,
            origin,
            sensitive: Vec::new(),
        }
    }

    /// Registers a reusable region and returns its handle.
    pub fn add_region(&mut self, region: Region) -> RegionId {
        self.regions.insert(region)
    }

    /// Attaches a new element under `parent`.
    ///
    /// The element is created by this call, so no element can ever be
    /// attached twice. Rejects a placement whose full identifier collides
    /// with an existing sibling's, and records elements with a sensitive
    /// region in the sensitive-element index.
    pub fn attach(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        index: i64,
        region: RegionId,
        placement: Placement,
    ) -> Result<ElementId, TreeError> {
        if !self.elements.contains_key(parent) {
            return Err(TreeError::ParentNotFound);
        }
        let sensitive = self
            .regions
            .get(region)
            .ok_or(TreeError::RegionNotFound)?
            .sensitive;
        for &sibling in &self.elements[parent].children {
            if let Some(existing) = &self.elements[sibling].placement
                && existing.cell_id == placement.cell_id
            {
                return Err(TreeError::DuplicateSiblingId(placement.cell_id.to_string()));
            }
        }

        let child = self.elements.insert(Element {
            name: name.into(),
            index,
            region,
            placement: Some(placement),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.elements[parent].children.push(child);
        if sensitive {
            self.sensitive.push(child);
        }
        Ok(child)
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// All elements, in insertion (build) order.
    pub fn elements_iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Readout-contributing elements, in build order. Used by the
    /// readout-geometry exporter.
    pub fn sensitive_elements(&self) -> &[ElementId] {
        &self.sensitive
    }

    /// Composes the placement chain from the root down to `id`, including
    /// the root's global origin.
    pub fn global_transform(&self, id: ElementId) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let element = self.elements.get(current)?;
            if let Some(placement) = &element.placement {
                chain.push(&placement.transform);
            }
            cursor = element.parent;
        }
        let mut transform = Transform::translation(self.origin);
        for step in chain.iter().rev() {
            transform = transform.compose(step);
        }
        Some(transform)
    }

    /// The global position of an element's center.
    pub fn global_position(&self, id: ElementId) -> Option<Point3<f64>> {
        Some(self.global_transform(id)?.apply(&Point3::origin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifiers::{CellId, IdSchema};
    use crate::core::materials::MaterialCatalog;
    use crate::core::models::region::BoxShape;

    fn schema() -> IdSchema {
        IdSchema::new(vec!["system".to_string(), "layer".to_string()]).unwrap()
    }

    fn test_tree() -> DetectorTree {
        let catalog = MaterialCatalog::new();
        let envelope = Region::new(
            "env",
            BoxShape::new(10.0, 10.0, 50.0),
            catalog.air().clone(),
        );
        DetectorTree::new("det", 1, envelope, Vector3::new(0.0, 0.0, 100.0))
    }

    fn placement_at(schema: &IdSchema, layer: i64, z: f64) -> Placement {
        let id = CellId::empty()
            .append(schema, "system", 1)
            .unwrap()
            .append(schema, "layer", layer)
            .unwrap();
        Placement::new(Transform::translation(Vector3::new(0.0, 0.0, z)), id)
    }

    #[test]
    fn attach_links_parent_and_child_both_ways() {
        let mut tree = test_tree();
        let s = schema();
        let catalog = MaterialCatalog::new();
        let region = tree.add_region(Region::new(
            "slab",
            BoxShape::new(10.0, 10.0, 1.0),
            catalog.get("Silicon").unwrap().clone(),
        ));
        let child = tree
            .attach(tree.root(), "layer0", 0, region, placement_at(&s, 0, -5.0))
            .unwrap();

        assert_eq!(tree.element(child).unwrap().parent, Some(tree.root()));
        assert_eq!(tree.children(tree.root()), &[child]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn duplicate_sibling_identifier_is_rejected() {
        let mut tree = test_tree();
        let s = schema();
        let catalog = MaterialCatalog::new();
        let region = tree.add_region(Region::new(
            "slab",
            BoxShape::new(10.0, 10.0, 1.0),
            catalog.get("Silicon").unwrap().clone(),
        ));
        tree.attach(tree.root(), "layer0", 0, region, placement_at(&s, 0, -5.0))
            .unwrap();
        let err = tree
            .attach(tree.root(), "layer0b", 0, region, placement_at(&s, 0, -3.0))
            .unwrap_err();
        assert!(matches!(err, TreeError::DuplicateSiblingId(_)));
    }

    #[test]
    fn sensitive_regions_are_indexed_on_attach() {
        let mut tree = test_tree();
        let s = schema();
        let catalog = MaterialCatalog::new();
        let silicon = catalog.get("Silicon").unwrap().clone();
        let passive =
            tree.add_region(Region::new("absorber", BoxShape::new(10.0, 10.0, 1.0), silicon.clone()));
        let active =
            tree.add_region(Region::new("sensor", BoxShape::new(10.0, 10.0, 0.15), silicon).sensitive());

        tree.attach(tree.root(), "absorber0", 0, passive, placement_at(&s, 0, -5.0))
            .unwrap();
        let sensor = tree
            .attach(tree.root(), "plane0", 1, active, placement_at(&s, 1, -3.0))
            .unwrap();

        assert_eq!(tree.sensitive_elements(), &[sensor]);
    }

    #[test]
    fn global_position_composes_origin_and_placements() {
        let mut tree = test_tree();
        let s = schema();
        let catalog = MaterialCatalog::new();
        let region = tree.add_region(Region::new(
            "slab",
            BoxShape::new(10.0, 10.0, 1.0),
            catalog.get("Silicon").unwrap().clone(),
        ));
        let child = tree
            .attach(tree.root(), "layer0", 0, region, placement_at(&s, 0, -5.0))
            .unwrap();

        // origin z=100, local offset z=-5
        assert_eq!(
            tree.global_position(child).unwrap(),
            Point3::new(0.0, 0.0, 95.0)
        );
    }
}
