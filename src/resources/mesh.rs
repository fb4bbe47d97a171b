use crate::assets::{GeometryHandle, MaterialHandle};

/// Mesh 组件
///
/// 节点上的可渲染组件：引用 AssetServer 中的几何体与材质。
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === 资源引用 ===
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,

    // === 实例特定的渲染设置 ===
    pub visible: bool,

    // 绘制顺序 (Render Order)
    pub render_order: i32,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            visible: true,
            render_order: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}
