use crate::resources::geometry::Geometry;
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

/// UV sphere centered at the origin (Y-up).
#[must_use]
pub fn create_sphere(options: &SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // Generate vertex data
    for y in 0..=height_segments {
        let v_ratio = y as f32 / height_segments as f32;
        // Latitude angle: from 0 to PI (south pole to north pole)
        let theta = v_ratio * PI;

        let py = -radius * theta.cos();
        // Radius of current latitude ring
        let ring_radius = radius * theta.sin();

        for x in 0..=width_segments {
            let u_ratio = x as f32 / width_segments as f32;
            // Longitude angle: from 0 to 2*PI
            let phi = u_ratio * 2.0 * PI;

            let px = -ring_radius * phi.cos();
            let pz = ring_radius * phi.sin();

            positions.push(Vec3::new(px, py, pz));
            normals.push(Vec3::new(px, py, pz) / radius);
            uvs.push(Vec2::new(u_ratio, 1.0 - v_ratio));
        }
    }

    // Generate indices (two triangles per quad, skipping degenerate pole quads)
    let ring_stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let a = y * ring_stride + x;
            let b = (y + 1) * ring_stride + x;
            let c = (y + 1) * ring_stride + x + 1;
            let d = y * ring_stride + x + 1;

            if y != 0 {
                indices.push(a);
                indices.push(b);
                indices.push(d);
            }
            if y != height_segments - 1 {
                indices.push(b);
                indices.push(c);
                indices.push(d);
            }
        }
    }

    let mut geo = Geometry {
        positions,
        normals,
        uvs,
        ..Geometry::new()
    };
    geo.set_indices(indices);
    geo.compute_bounding_volume();

    geo
}
