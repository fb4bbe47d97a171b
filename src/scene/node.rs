use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};
use glam::Affine3A;

/// A node in the renderable scene graph.
///
/// # Design Principles
///
/// - Keeps the data traversed every frame (hierarchy and transform) inline
/// - Components (Mesh, Camera, Light) are stored in the scene's component
///   maps and referenced by key
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: optional handle to the parent node (None for root nodes)
/// - `children`: list of child node handles
///
/// [`Scene::attach`](crate::scene::Scene::attach) keeps both sides in sync;
/// the raw fields are crate-visible for the transform system.
#[derive(Debug, Clone)]
pub struct Node {
    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    /// Transform component (hot data accessed every frame)
    pub transform: Transform,

    // === Components ===
    pub mesh: Option<MeshKey>,
    pub light: Option<LightKey>,
    pub camera: Option<CameraKey>,

    // === Render State ===
    /// Visibility flag; invisible nodes are skipped by traversal consumers
    pub visible: bool,
    /// Whether this node's mesh casts shadows
    pub cast_shadow: bool,
    /// Whether this node's mesh receives shadows
    pub receive_shadow: bool,

    /// Debug / lookup name
    pub name: String,
}

impl Node {
    /// Creates a new node with default transform and visibility.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            light: None,
            camera: None,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            name: name.to_string(),
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns a reference to the world transformation matrix.
    ///
    /// Updated by [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world)
    /// each frame.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
