//! Environment - 纯数据结构
//!
//! 场景级环境光照配置（环境光颜色/强度）。

use glam::Vec3;

/// 场景环境配置
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// 环境光颜色 (ambient)
    pub ambient_color: Vec3,
    /// 环境光强度
    pub intensity: f32,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ambient_color: Vec3::ZERO,
            intensity: 1.0,
        }
    }

    /// 设置环境光颜色
    pub fn set_ambient_color(&mut self, color: Vec3) {
        self.ambient_color = color;
    }

    /// 设置环境光强度
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
