//! 帧合成器
//!
//! `FrameComposer` 持有渲染后端和后处理设置，负责每帧固定的 pass
//! 编排：场景 pass 先执行，泛光 pass（若启用）随后对其输出叠加。
//! pass 顺序不可配置，这是查看器管线的结构不变量。

use crate::assets::AssetServer;
use crate::render::backend::RenderBackend;
use crate::resources::bloom::BloomSettings;
use crate::scene::Scene;

/// 帧合成器
///
/// 表面尺寸由合成器统一管理：`resize` 同时更新自身记录和后端表面，
/// 二者永远一致。
pub struct FrameComposer {
    backend: Box<dyn RenderBackend>,
    bloom: BloomSettings,
    size: (u32, u32),
}

impl FrameComposer {
    pub fn new(mut backend: Box<dyn RenderBackend>, width: u32, height: u32) -> Self {
        backend.resize(width, height);
        Self {
            backend,
            bloom: BloomSettings::default(),
            size: (width, height),
        }
    }

    #[must_use]
    pub fn bloom(&self) -> &BloomSettings {
        &self.bloom
    }

    pub fn bloom_mut(&mut self) -> &mut BloomSettings {
        &mut self.bloom
    }

    /// 当前表面尺寸
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    #[must_use]
    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// 表面尺寸变化
    ///
    /// 零尺寸（最小化窗口）直接忽略，保持上一次有效尺寸。
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.backend.resize(width, height);
    }

    /// 渲染一帧
    ///
    /// 场景没有激活相机时跳过该帧并告警，不算错误。
    pub fn render(&mut self, scene: &Scene, assets: &AssetServer) {
        let Some(camera) = scene.main_camera() else {
            log::warn!("No active camera, skipping frame");
            return;
        };

        self.backend.draw_scene(scene, assets, camera);

        if self.bloom.enabled {
            self.backend.apply_bloom(&self.bloom);
        }
    }
}
