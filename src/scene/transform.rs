use glam::{Affine3A, Mat3, Mat4, Quat, Vec3};

/// Transform 组件
///
/// 封装节点的位置、旋转、缩放（TRS）以及矩阵缓存和脏检查逻辑。
/// 作为独立的数据组件，既可以被 Node 组合，也可以单独使用（例如相机节点）。
#[derive(Debug, Clone)]
pub struct Transform {
    // === Public 属性 ===
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    // === 矩阵缓存 (Internal) ===
    // pub(crate) 供渲染/拾取读取，对用户隐藏细节
    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // === 脏检查状态 (Private) ===
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    /// 检查并更新局部矩阵
    ///
    /// 返回值: bool (是否发生了变化)
    pub fn update_local_matrix(&mut self) -> bool {
        // 脏检查：对比当前 pub 属性和 last 影子状态
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix = Affine3A::from_scale_rotation_translation(
                self.scale,
                self.rotation,
                self.position,
            );

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// 设置欧拉角旋转 (XYZ 顺序)
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::XYZ, x, y, z);
    }

    /// 获取局部矩阵 (Affine3A)
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    /// 获取世界矩阵 (Affine3A) - 供 CPU 端拾取/逻辑计算使用
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// 获取世界矩阵 (Mat4) - 供渲染后端上传使用
    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    /// 供 Scene 更新完层级后写入
    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// 直接设置局部矩阵 (适用于 glTF 加载)
    ///
    /// 注意：会触发矩阵分解，反向更新 position/rotation/scale。
    /// 如果矩阵包含切变，分解过程会丢失切变信息。
    pub fn apply_local_matrix(&mut self, mat: Affine3A) {
        self.local_matrix = mat;

        let (scale, rotation, translation) = mat.to_scale_rotation_translation();

        self.scale = scale;
        self.rotation = rotation;
        self.position = translation;

        self.last_scale = scale;
        self.last_rotation = rotation;
        self.last_position = translation;

        self.mark_dirty();
    }

    /// LookAt 变换
    ///
    /// `target` 和 `up` 应处于该变换的父坐标系中。
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();

        // 退化情况：视线与 up 共线
        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }

    /// 手动标记脏（例如 attach 后强制刷新）
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
