use log::debug;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use verdure_math::Transform;
use verdure_mesh::TriangleMesh;

use crate::part::PlantPart;

new_key_type! {
    pub struct PartId;
}

/// A named assembly of parts sharing one model transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    name: String,
    pub model: Transform,
    parts: SlotMap<PartId, PlantPart>,
}

impl Plant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: Transform::identity(),
            parts: SlotMap::with_key(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn add_part(&mut self, part: PlantPart) -> PartId {
        self.parts.insert(part)
    }

    pub fn remove_part(&mut self, id: PartId) -> Option<PlantPart> {
        self.parts.remove(id)
    }

    pub fn part(&self, id: PartId) -> Option<&PlantPart> {
        self.parts.get(id)
    }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut PlantPart> {
        self.parts.get_mut(id)
    }

    pub fn parts(&self) -> impl Iterator<Item = (PartId, &PlantPart)> {
        self.parts.iter()
    }

    pub fn parts_mut(&mut self) -> impl Iterator<Item = (PartId, &mut PlantPart)> {
        self.parts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Loft every stale part. Returns how many were regenerated.
    pub fn regenerate_all(&mut self) -> usize {
        let mut count = 0;
        for (_, part) in self.parts.iter_mut().filter(|(_, p)| !p.is_generated()) {
            part.mesh();
            count += 1;
        }
        debug!("plant '{}': regenerated {} of {} parts", self.name, count, self.parts.len());
        count
    }

    /// All part meshes in plant space: each placed by its part transform,
    /// then by the model transform. Stale parts contribute their cached mesh.
    pub fn merged_mesh(&self) -> TriangleMesh {
        let mut merged = TriangleMesh::default();
        for part in self.parts.values() {
            let placement = part.part_transform().then(&self.model);
            merged.merge(&part.cached_mesh().transformed(&placement));
        }
        merged
    }
}
