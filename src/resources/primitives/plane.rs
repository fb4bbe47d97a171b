use crate::resources::geometry::Geometry;
use glam::{Vec2, Vec3};

pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// 在 XY 平面生成一个面片（法线朝 +Z）
#[must_use]
pub fn create_plane(options: &PlaneOptions) -> Geometry {
    let width_half = options.width / 2.0;
    let height_half = options.height / 2.0;

    let grid_x = options.width_segments.max(1);
    let grid_y = options.height_segments.max(1);

    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let segment_width = options.width / grid_x as f32;
    let segment_height = options.height / grid_y as f32;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_width - width_half;

            positions.push(Vec3::new(x, -y, 0.0)); // 注意 -y 是为了对应 UV 方向
            normals.push(Vec3::Z);
            uvs.push(Vec2::new(
                ix as f32 / grid_x as f32,
                1.0 - (iy as f32 / grid_y as f32),
            ));
        }
    }

    // 索引
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;

            indices.push(a);
            indices.push(b);
            indices.push(d);

            indices.push(b);
            indices.push(c);
            indices.push(d);
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
