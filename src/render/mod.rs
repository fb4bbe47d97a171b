//! 渲染层
//!
//! 查看器核心不直接对接 GPU API：[`RenderBackend`] 抽象出一帧渲染需要
//! 的全部操作，[`FrameComposer`] 负责固定的 pass 编排（先场景后泛光）
//! 和表面尺寸的同步。测试使用 [`HeadlessBackend`] 记录执行轨迹。

pub mod backend;
pub mod composer;

pub use backend::{HeadlessBackend, PassKind, RenderBackend, RenderTrace};
pub use composer::FrameComposer;
