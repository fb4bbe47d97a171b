use std::sync::{Arc, Mutex};

use crate::assets::AssetServer;
use crate::resources::bloom::BloomSettings;
use crate::scene::Scene;
use crate::scene::camera::Camera;

/// 渲染管线中的一个 pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// 场景前向着色
    Scene,
    /// 泛光后处理（阈值提取 + 模糊 + 叠加）
    Bloom,
}

/// 渲染后端抽象
///
/// 后端持有表面和 GPU 资源；合成器通过该接口驱动每帧的 pass 序列。
/// 实现方必须保证 `surface_size` 与最近一次 `resize` 的尺寸一致。
pub trait RenderBackend {
    /// 重建表面到新的物理尺寸
    fn resize(&mut self, width: u32, height: u32);

    /// 当前表面尺寸
    fn surface_size(&self) -> (u32, u32);

    /// 场景 pass：遍历可见网格并着色
    fn draw_scene(&mut self, scene: &Scene, assets: &AssetServer, camera: &Camera);

    /// 泛光 pass：对场景 pass 的输出做亮度提取和叠加
    fn apply_bloom(&mut self, settings: &BloomSettings);
}

#[derive(Debug, Default)]
struct TraceInner {
    passes: Vec<PassKind>,
    size: (u32, u32),
    frames_drawn: u64,
}

/// [`HeadlessBackend`] 的执行轨迹句柄
///
/// 可克隆；后端被装箱进合成器之后，外部仍然能通过句柄观察 pass 顺序
/// 和表面尺寸。
#[derive(Debug, Clone, Default)]
pub struct RenderTrace(Arc<Mutex<TraceInner>>);

impl RenderTrace {
    /// 按执行顺序记录的所有 pass
    #[must_use]
    pub fn passes(&self) -> Vec<PassKind> {
        self.0.lock().expect("trace lock poisoned").passes.clone()
    }

    /// 最近一帧的 pass 序列
    #[must_use]
    pub fn last_frame(&self) -> Vec<PassKind> {
        let inner = self.0.lock().expect("trace lock poisoned");
        let start = inner
            .passes
            .iter()
            .rposition(|p| *p == PassKind::Scene)
            .unwrap_or(0);
        inner.passes[start..].to_vec()
    }

    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.0.lock().expect("trace lock poisoned").size
    }

    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.0.lock().expect("trace lock poisoned").frames_drawn
    }
}

/// 无 GPU 后端：记录 pass 执行轨迹，供测试和离屏逻辑验证使用。
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    trace: RenderTrace,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 克隆一个轨迹句柄，装箱后仍可观察
    #[must_use]
    pub fn trace(&self) -> RenderTrace {
        self.trace.clone()
    }
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.trace.0.lock().expect("trace lock poisoned").size = (width, height);
    }

    fn surface_size(&self) -> (u32, u32) {
        self.trace.0.lock().expect("trace lock poisoned").size
    }

    fn draw_scene(&mut self, _scene: &Scene, _assets: &AssetServer, _camera: &Camera) {
        let mut inner = self.trace.0.lock().expect("trace lock poisoned");
        inner.passes.push(PassKind::Scene);
        inner.frames_drawn += 1;
    }

    fn apply_bloom(&mut self, _settings: &BloomSettings) {
        self.trace
            .0
            .lock()
            .expect("trace lock poisoned")
            .passes
            .push(PassKind::Bloom);
    }
}
