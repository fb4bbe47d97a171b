//! CPU 拾取
//!
//! 屏幕坐标 -> 世界射线 -> 三角形求交。几何体留在 CPU 侧，拾取不依赖
//! 渲染后端；包围盒槽测试作为逐三角形求交前的快速剔除。

use glam::{Vec2, Vec3};

use crate::assets::AssetServer;
use crate::scene::camera::Camera;
use crate::scene::{NodeHandle, Scene};

/// 平行于三角形平面的判定阈值
const EPSILON: f32 = 1e-7;

/// 世界空间射线
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    /// 单位方向
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// 由屏幕坐标构造射线
    ///
    /// `screen_pos` 为左上角原点的像素坐标，`screen_size` 为视口尺寸。
    /// 先换算到 NDC（Y 轴翻转），再用视图投影矩阵的逆矩阵反投影近/远
    /// 平面上的两个点。投影深度约定为 0..1。
    #[must_use]
    pub fn from_screen(screen_pos: Vec2, screen_size: Vec2, camera: &Camera) -> Self {
        let ndc = Vec2::new(
            (screen_pos.x / screen_size.x) * 2.0 - 1.0,
            1.0 - (screen_pos.y / screen_size.y) * 2.0,
        );

        let inv_vp = camera.view_projection().inverse();
        let near = inv_vp.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv_vp.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        Self::new(near, far - near)
    }

    /// 射线上距原点 `t` 处的点
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// 一次拾取命中
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub node: NodeHandle,
    /// 沿射线方向的距离
    pub distance: f32,
    /// 世界空间命中点
    pub point: Vec3,
}

/// Möller–Trumbore 射线-三角形求交，双面。
///
/// 返回沿射线的距离 t（t >= 0）。
#[must_use]
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None; // 射线与三角形平面平行
    }

    let inv_det = 1.0 / det;
    let t_vec = ray.origin - v0;
    let u = t_vec.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = t_vec.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= EPSILON).then_some(t)
}

/// 对整个场景做最近命中拾取
///
/// 只考虑可见节点上的可见网格。三角形在世界空间求交，所有候选命中中
/// 取距离最小者。
#[must_use]
pub fn pick(scene: &Scene, assets: &AssetServer, ray: &Ray) -> Option<RayHit> {
    let mut nearest: Option<RayHit> = None;

    for handle in scene.traverse() {
        let Some(node) = scene.get_node(handle) else {
            continue;
        };
        if !node.visible {
            continue;
        }
        let Some(mesh) = scene.get_mesh(handle) else {
            continue;
        };
        if !mesh.visible {
            continue;
        }
        let Some(geometry) = assets.get_geometry(mesh.geometry) else {
            continue;
        };

        let world = node.world_matrix();

        // 包围盒快速剔除
        if let Some(bbox) = geometry.bounding_box()
            && !bbox
                .transform(world)
                .intersects_ray(ray.origin, ray.direction)
        {
            continue;
        }

        for i in 0..geometry.triangle_count() {
            let Some([a, b, c]) = geometry.triangle(i) else {
                continue;
            };
            let v0 = world.transform_point3(a);
            let v1 = world.transform_point3(b);
            let v2 = world.transform_point3(c);

            if let Some(t) = intersect_triangle(ray, v0, v1, v2)
                && nearest.is_none_or(|hit| t < hit.distance)
            {
                nearest = Some(RayHit {
                    node: handle,
                    distance: t,
                    point: ray.at(t),
                });
            }
        }
    }

    nearest
}
