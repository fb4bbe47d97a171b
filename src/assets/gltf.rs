//! glTF 模型解码
//!
//! 将 glTF/GLB 字节流解码为场景无关的 [`ModelPrefab`]，再由调用方
//! 实例化进 Scene。解码本身不接触 Scene 和 AssetServer，因此可以在
//! 加载线程上运行。

use glam::{Affine3A, Mat4, Vec2, Vec3};

use crate::assets::AssetServer;
use crate::errors::{Result, ViewerError};
use crate::resources::geometry::Geometry;
use crate::resources::material::PhysicalMaterial;
use crate::resources::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::{NodeHandle, Scene};

/// 模型落地时的垂直偏移：让模型底部贴在地面上
pub const GROUND_OFFSET_Y: f32 = -0.84;

/// 单个图元：一段几何体和可选的材质引用
#[derive(Debug, Clone)]
pub struct PrefabPrimitive {
    pub geometry: usize,
    pub material: Option<usize>,
}

/// 预制体里的网格（glTF mesh，可能包含多个图元）
#[derive(Debug, Clone)]
pub struct PrefabMesh {
    pub name: String,
    pub primitives: Vec<PrefabPrimitive>,
}

/// 预制体节点：局部变换 + 可选网格 + 子节点索引
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: String,
    pub local: Mat4,
    pub mesh: Option<usize>,
    pub children: Vec<usize>,
}

/// 解码完成、等待实例化的模型子树描述
///
/// 纯数据：持有解码出的几何体/材质，和以索引互相引用的节点层级。
/// 同一份 Prefab 可以多次实例化，每次得到结构等价的子树。
#[derive(Debug, Clone, Default)]
pub struct ModelPrefab {
    pub geometries: Vec<Geometry>,
    pub materials: Vec<PhysicalMaterial>,
    pub meshes: Vec<PrefabMesh>,
    pub nodes: Vec<PrefabNode>,
    pub roots: Vec<usize>,
}

impl ModelPrefab {
    /// 实例化进场景
    ///
    /// 创建一个根节点（固定落地偏移 + 单位缩放），把整个层级挂进去。
    /// 所有带网格的后代节点都会同时开启投射/接收阴影。
    pub fn instantiate(&self, scene: &mut Scene, assets: &mut AssetServer) -> NodeHandle {
        // 1. 资源入库
        let geometry_handles: Vec<_> = self
            .geometries
            .iter()
            .map(|g| assets.add_geometry(g.clone()))
            .collect();
        let material_handles: Vec<_> = self
            .materials
            .iter()
            .map(|m| assets.add_material(m.clone()))
            .collect();
        let default_material = assets.add_material(PhysicalMaterial::default());

        // 2. 根节点：固定落地偏移，单位缩放
        let mut root = Node::new("Model");
        root.transform.position = Vec3::new(0.0, GROUND_OFFSET_Y, 0.0);
        root.transform.scale = Vec3::ONE;
        let root_handle = scene.add_node(root);

        // 3. 递归挂载层级
        let mut stack: Vec<(usize, NodeHandle)> = self
            .roots
            .iter()
            .map(|&index| (index, root_handle))
            .collect();

        while let Some((index, parent)) = stack.pop() {
            let Some(prefab_node) = self.nodes.get(index) else {
                continue;
            };

            let mut node = Node::new(&prefab_node.name);
            node.transform
                .apply_local_matrix(Affine3A::from_mat4(prefab_node.local));

            let handle = scene.add_to_parent(node, parent);

            if let Some(mesh_index) = prefab_node.mesh
                && let Some(prefab_mesh) = self.meshes.get(mesh_index)
            {
                self.attach_mesh(
                    scene,
                    handle,
                    prefab_mesh,
                    &geometry_handles,
                    &material_handles,
                    default_material,
                );
            }

            for &child in &prefab_node.children {
                stack.push((child, handle));
            }
        }

        root_handle
    }

    fn attach_mesh(
        &self,
        scene: &mut Scene,
        handle: NodeHandle,
        prefab_mesh: &PrefabMesh,
        geometry_handles: &[crate::assets::GeometryHandle],
        material_handles: &[crate::assets::MaterialHandle],
        default_material: crate::assets::MaterialHandle,
    ) {
        let make_mesh = |primitive: &PrefabPrimitive, name: &str| -> Option<Mesh> {
            let Some(&geometry) = geometry_handles.get(primitive.geometry) else {
                log::warn!(
                    "Mesh '{name}' references geometry {} out of range, skipping",
                    primitive.geometry
                );
                return None;
            };
            let material = match primitive.material {
                Some(m) => match material_handles.get(m) {
                    Some(&material) => material,
                    None => {
                        log::warn!("Mesh '{name}' references material {m} out of range");
                        default_material
                    }
                },
                None => default_material,
            };
            Some(Mesh::new(geometry, material).with_name(name))
        };

        match prefab_mesh.primitives.as_slice() {
            [] => {}
            [single] => {
                if let Some(mesh) = make_mesh(single, &prefab_mesh.name) {
                    scene.set_mesh(handle, mesh);
                    if let Some(node) = scene.get_node_mut(handle) {
                        node.cast_shadow = true;
                        node.receive_shadow = true;
                    }
                }
            }
            primitives => {
                // 多图元网格：每个图元一个子节点
                for (i, primitive) in primitives.iter().enumerate() {
                    let name = format!("{}.{i}", prefab_mesh.name);
                    let Some(mesh) = make_mesh(primitive, &name) else {
                        continue;
                    };
                    let mut child = Node::new(&name);
                    child.cast_shadow = true;
                    child.receive_shadow = true;
                    let child_handle = scene.add_to_parent(child, handle);
                    scene.set_mesh(child_handle, mesh);
                }
            }
        }
    }
}

/// 解码 glTF/GLB 字节流
///
/// 支持 GLB 与内嵌 data-URI buffer 的 JSON glTF；外部 .bin 引用不在
/// 查看器的资产边界内。
pub fn decode_prefab(bytes: &[u8]) -> Result<ModelPrefab> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;

    let mut prefab = ModelPrefab::default();

    // 材质：metallic-roughness 因子映射到 PhysicalMaterial
    for material in document.materials() {
        let pbr = material.pbr_metallic_roughness();
        let base = pbr.base_color_factor();
        let emissive = material.emissive_factor();

        prefab.materials.push(
            PhysicalMaterial::new(material.name().unwrap_or("Material"))
                .with_base_color(Vec3::new(base[0], base[1], base[2]))
                .with_roughness(pbr.roughness_factor())
                .with_metalness(pbr.metallic_factor())
                .with_emissive(Vec3::from_array(emissive)),
        );
    }

    // 网格：每个图元解出一份独立几何体
    for mesh in document.meshes() {
        let name = mesh
            .name()
            .map_or_else(|| format!("Mesh{}", mesh.index()), ToString::to_string);

        let mut prefab_mesh = PrefabMesh {
            name,
            primitives: Vec::new(),
        };

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|b| &b.0[..]));

            let Some(positions) = reader.read_positions() else {
                return Err(ViewerError::InvalidData(format!(
                    "mesh {} primitive without POSITION attribute",
                    mesh.index()
                )));
            };

            let mut geometry = Geometry::new();
            geometry.positions = positions.map(Vec3::from_array).collect();

            if let Some(normals) = reader.read_normals() {
                geometry.normals = normals.map(Vec3::from_array).collect();
            }
            if let Some(uvs) = reader.read_tex_coords(0) {
                geometry.uvs = uvs.into_f32().map(Vec2::from_array).collect();
            }
            if let Some(indices) = reader.read_indices() {
                geometry.set_indices(indices.into_u32().collect());
            }
            geometry.compute_bounding_volume();

            prefab_mesh.primitives.push(PrefabPrimitive {
                geometry: prefab.geometries.len(),
                material: primitive.material().index(),
            });
            prefab.geometries.push(geometry);
        }

        prefab.meshes.push(prefab_mesh);
    }

    // 节点层级
    for node in document.nodes() {
        prefab.nodes.push(PrefabNode {
            name: node
                .name()
                .map_or_else(|| format!("Node{}", node.index()), ToString::to_string),
            local: Mat4::from_cols_array_2d(&node.transform().matrix()),
            mesh: node.mesh().map(|m| m.index()),
            children: node.children().map(|c| c.index()).collect(),
        });
    }

    // 默认场景的根节点
    if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
        prefab.roots = scene.nodes().map(|n| n.index()).collect();
    }

    if prefab.roots.is_empty() {
        return Err(ViewerError::InvalidData(
            "glTF document contains no scene roots".to_string(),
        ));
    }

    Ok(prefab)
}
