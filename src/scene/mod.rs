//! 场景图系统模块
//!
//! 管理场景层级结构和组件：
//! - Node: 场景节点（父子关系 + 变换 + 组件键）
//! - Transform: 变换组件（位置、旋转、缩放）
//! - Scene: 场景容器
//! - Camera / Light: 相机和光源组件
//! - LightRig: 主/副点光源及其指示器
//! - Raycast: 屏幕坐标到场景表面的拾取

pub mod camera;
pub mod environment;
pub mod light;
pub mod light_rig;
pub mod node;
pub mod raycast;
pub mod scene;
pub mod transform;
pub mod transform_system;

// 重新导出常用类型
pub use camera::Camera;
pub use environment::Environment;
pub use light::{Light, LightKind};
pub use light_rig::LightRig;
pub use node::Node;
pub use raycast::{Ray, RayHit};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
