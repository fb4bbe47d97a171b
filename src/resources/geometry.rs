use std::cell::RefCell;

use glam::{Affine3A, Vec2, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);

        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }

    /// Returns whether the ray (origin, direction) can hit this box.
    ///
    /// Slab test; used as an early-out before per-triangle intersection.
    #[must_use]
    pub fn intersects_ray(&self, origin: Vec3, direction: Vec3) -> bool {
        let inv_dir = direction.recip();
        let t1 = (self.min - origin) * inv_dir;
        let t2 = (self.max - origin) * inv_dir;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let near = t_min.max_element();
        let far = t_max.min_element();

        far >= near.max(0.0)
    }
}

/// CPU-side mesh geometry.
///
/// Stores plain vertex streams and an optional index buffer. The viewer core
/// is backend-agnostic: a render backend uploads these streams however it
/// sees fit, and the raycaster walks the triangles directly.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Option<Vec<u32>>,

    // Lazily computed; interior mutability so read paths stay &self
    pub(crate) bounding_box: RefCell<Option<BoundingBox>>,
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = Some(indices);
    }

    /// Number of triangles described by the index buffer (or the raw
    /// position stream when non-indexed).
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Returns the vertices of triangle `i` in local space.
    #[must_use]
    pub fn triangle(&self, i: usize) -> Option<[Vec3; 3]> {
        let fetch = |idx: usize| self.positions.get(idx).copied();
        match &self.indices {
            Some(indices) => {
                let a = fetch(*indices.get(i * 3)? as usize)?;
                let b = fetch(*indices.get(i * 3 + 1)? as usize)?;
                let c = fetch(*indices.get(i * 3 + 2)? as usize)?;
                Some([a, b, c])
            }
            None => {
                let a = fetch(i * 3)?;
                let b = fetch(i * 3 + 1)?;
                let c = fetch(i * 3 + 2)?;
                Some([a, b, c])
            }
        }
    }

    /// Computes (and caches) the local-space bounding box.
    pub fn compute_bounding_volume(&self) {
        if self.positions.is_empty() {
            return;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }

        *self.bounding_box.borrow_mut() = Some(BoundingBox { min, max });
    }

    /// Returns the cached bounding box, computing it on first access.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.bounding_box.borrow().is_none() {
            self.compute_bounding_volume();
        }
        self.bounding_box.borrow().clone()
    }
}
