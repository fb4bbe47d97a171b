use glam::{Affine3A, Mat4, Vec3};
use std::borrow::Cow;
use uuid::Uuid;

/// 透视相机组件
///
/// 只保存投影属性和缓存矩阵；位置/朝向由所属节点的 Transform 决定，
/// 每帧由变换系统写回。
#[derive(Debug, Clone)]
pub struct Camera {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,

    // === 投影属性 ===
    /// 垂直视场角（弧度）
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // 缓存的矩阵，拾取/渲染只读
    pub(crate) world_matrix: Affine3A,
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Camera {
    /// 创建透视相机，`fov` 单位为角度。
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            uuid: Uuid::new_v4(),
            name: Cow::Borrowed("Camera"),
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    /// 重算投影矩阵（fov/aspect/near/far 变化后调用）
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    /// 视口变化时更新宽高比
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// 由变换系统在节点世界矩阵更新后调用
    pub fn update_view_projection(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;

        // View Matrix = World Inverse
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    /// 相机的世界空间位置
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    /// 视图投影矩阵（拾取用）
    #[inline]
    #[must_use]
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection_matrix
    }
}
