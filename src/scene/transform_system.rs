//! 变换系统 (Transform System)
//!
//! 负责场景图的矩阵层级更新，与 Scene 解耦以避免借用冲突。
//! 只需要借用 nodes SlotMap、cameras SlotMap 和 root_nodes 列表。

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::{CameraKey, NodeHandle};

/// 更新整个场景图的世界矩阵（迭代版本，避免深层级栈溢出）
///
/// 遍历顺序保证父节点先于子节点更新；局部矩阵未变化且父矩阵未变化的
/// 子树会跳过世界矩阵重算。挂载了相机组件的节点在世界矩阵更新后同步
/// 刷新相机的视图/投影矩阵。
pub fn update_hierarchy_iterative(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    roots: &[NodeHandle],
) {
    // (节点, 父世界矩阵, 父矩阵是否变化)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = roots
        .iter()
        .map(|&handle| (handle, Affine3A::IDENTITY, false))
        .collect();

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let changed = local_changed || parent_changed;

        if changed {
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);
        }

        let world = node.transform.world_matrix;

        // 相机跟随节点的世界矩阵
        if let Some(camera_key) = node.camera
            && let Some(camera) = cameras.get_mut(camera_key)
        {
            camera.update_view_projection(&world);
        }

        for &child in &node.children.clone() {
            stack.push((child, world, changed));
        }
    }
}

/// 更新指定子树的世界矩阵（局部更新）
///
/// 父矩阵取自该子树根节点的父节点当前缓存；子树整体强制重算。
pub fn update_subtree(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    root: NodeHandle,
) {
    let parent_world = nodes
        .get(root)
        .and_then(|n| n.parent)
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack = vec![(root, parent_world, true)];

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let changed = local_changed || parent_changed;

        if changed {
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);
        }

        let world = node.transform.world_matrix;

        if let Some(camera_key) = node.camera
            && let Some(camera) = cameras.get_mut(camera_key)
        {
            camera.update_view_projection(&world);
        }

        for &child in &node.children.clone() {
            stack.push((child, world, changed));
        }
    }
}
