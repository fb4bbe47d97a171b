use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec4;
use slotmap::SlotMap;

use crate::resources::mesh::Mesh;
use crate::scene::camera::Camera;
use crate::scene::environment::Environment;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// 场景图结构
///
/// Scene 是纯数据层，存储场景图逻辑和组件数据。
/// 节点保存在 SlotMap 中，组件（Mesh/Camera/Light）保存在独立的组件池里，
/// 节点通过键引用组件。
pub struct Scene {
    pub id: u32,

    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ====组件/资源池====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,

    // 环境和全局设置
    pub environment: Environment,

    // 暂时简单用 RGBA 清屏色
    pub background: Option<Vec4>,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),

            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),

            environment: Environment::new(),
            background: Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),

            active_camera: None,
        }
    }

    /// 创建一个空节点（挂在根上）
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::default())
    }

    /// 创建一个带名字的空节点
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// 添加一个节点到场景 (默认放在根节点)
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);

        // 建立父子关系
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }

        handle
    }

    /// 移除节点 (递归移除所有子节点和关联组件)
    pub fn remove_node(&mut self, handle: NodeHandle) {
        // 1. 先拿出 children 列表，避免借用冲突
        let children = if let Some(node) = self.nodes.get(handle) {
            node.children.clone()
        } else {
            return;
        };

        // 2. 递归移除子节点
        for child in children {
            self.remove_node(child);
        }

        // 3. 处理父节点关系
        let parent_opt = self.nodes.get(handle).and_then(|n| n.parent);

        if let Some(parent) = parent_opt {
            if let Some(parent_node) = self.nodes.get_mut(parent)
                && let Some(pos) = parent_node.children.iter().position(|&x| x == handle)
            {
                parent_node.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(pos);
        }

        // 4. 清理组件
        if let Some(node) = self.nodes.get(handle) {
            if let Some(mesh_key) = node.mesh {
                self.meshes.remove(mesh_key);
            }
            if let Some(camera_key) = node.camera {
                self.cameras.remove(camera_key);
            }
            if let Some(light_key) = node.light {
                self.lights.remove(light_key);
            }
        }

        // 5. 彻底删除数据
        self.nodes.remove(handle);
    }

    /// 核心逻辑：建立父子关系 (Attach)
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        } else {
            log::error!("Parent node not found during attach!");
            // 恢复 child 到 root_nodes 防止数据丢失
            self.root_nodes.push(child);
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty(); // 强制标记脏，确保矩阵更新
        }
    }

    /// 获取只读引用
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// 获取可变引用 (用于修改 TRS)
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// 当前节点总数（含不可见节点）
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // 遍历 (Traversal)
    // ========================================================================

    /// 深度优先遍历所有可达节点
    ///
    /// 返回惰性迭代器；再次调用即可重新开始遍历。
    #[must_use]
    pub fn traverse(&self) -> SceneTraversal<'_> {
        let mut stack: Vec<NodeHandle> = self.root_nodes.clone();
        stack.reverse();
        SceneTraversal { scene: self, stack }
    }

    // ========================================================================
    // 组件管理 API
    // ========================================================================

    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) -> Option<MeshKey> {
        let key = self.meshes.insert(mesh);
        let node = self.nodes.get_mut(handle)?;
        node.mesh = Some(key);
        Some(key)
    }

    #[must_use]
    pub fn get_mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        let key = self.nodes.get(handle)?.mesh?;
        self.meshes.get(key)
    }

    pub fn set_camera(&mut self, handle: NodeHandle, camera: Camera) -> Option<CameraKey> {
        let key = self.cameras.insert(camera);
        let node = self.nodes.get_mut(handle)?;
        node.camera = Some(key);
        Some(key)
    }

    #[must_use]
    pub fn get_camera(&self, handle: NodeHandle) -> Option<&Camera> {
        let key = self.nodes.get(handle)?.camera?;
        self.cameras.get(key)
    }

    pub fn get_camera_mut(&mut self, handle: NodeHandle) -> Option<&mut Camera> {
        let key = self.nodes.get(handle)?.camera?;
        self.cameras.get_mut(key)
    }

    pub fn set_light(&mut self, handle: NodeHandle, light: Light) -> Option<LightKey> {
        let key = self.lights.insert(light);
        let node = self.nodes.get_mut(handle)?;
        node.light = Some(key);
        Some(key)
    }

    #[must_use]
    pub fn get_light(&self, handle: NodeHandle) -> Option<&Light> {
        let key = self.nodes.get(handle)?.light?;
        self.lights.get(key)
    }

    pub fn get_light_mut(&mut self, handle: NodeHandle) -> Option<&mut Light> {
        let key = self.nodes.get(handle)?.light?;
        self.lights.get_mut(key)
    }

    /// 添加一个带 Mesh 的节点
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_node(node)
    }

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let mut node = Node::new("Camera");
        node.camera = Some(self.cameras.insert(camera));
        self.add_node(node)
    }

    pub fn add_light(&mut self, light: Light) -> NodeHandle {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_node(node)
    }

    pub fn add_light_to_parent(&mut self, light: Light, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_to_parent(node, parent)
    }

    /// 迭代场景中所有可见节点上的灯光
    pub fn iter_active_lights(&self) -> impl Iterator<Item = (&Light, &Node)> {
        self.nodes.iter().filter_map(|(_, node)| {
            if !node.visible {
                return None;
            }
            let light_key = node.light?;
            self.lights.get(light_key).map(|light| (light, node))
        })
    }

    // ========================================================================
    // 矩阵更新流水线
    // ========================================================================

    /// 更新整个场景的世界矩阵（每帧渲染/拾取前调用）
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(
            &mut self.nodes,
            &mut self.cameras,
            &self.root_nodes,
        );
    }

    /// 更新指定子树的世界矩阵
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, &mut self.cameras, root);
    }

    pub fn main_camera_node_mut(&mut self) -> Option<&mut Node> {
        let id = self.active_camera?;
        self.get_node_mut(id)
    }

    #[must_use]
    pub fn main_camera(&self) -> Option<&Camera> {
        let id = self.active_camera?;
        self.get_camera(id)
    }
}

/// 深度优先场景遍历迭代器
pub struct SceneTraversal<'a> {
    scene: &'a Scene,
    stack: Vec<NodeHandle>,
}

impl Iterator for SceneTraversal<'_> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        if let Some(node) = self.scene.nodes.get(handle) {
            for &child in node.children.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(handle)
    }
}
