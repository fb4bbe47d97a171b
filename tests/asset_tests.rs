//! Asset Loading Integration Tests
//!
//! Decodes an embedded single-triangle glTF document, instantiates it into a
//! scene and exercises the failure path of the background load task.

use anyhow::Result;
use glam::Vec3;
use lume::assets::{AssetServer, decode_prefab};
use lume::render::backend::HeadlessBackend;
use lume::scene::scene::Scene;
use lume::viewer::{Viewer, ViewerConfig};

/// Captures the viewer's load/progress logging under the test harness.
fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Minimal valid glTF: one node, one mesh, one triangle, embedded buffer.
const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "name": "Tri", "mesh": 0, "translation": [0.5, 0.0, 0.0] }],
  "meshes": [{
    "name": "TriMesh",
    "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }]
  }],
  "materials": [{
    "name": "Red",
    "pbrMetallicRoughness": {
      "baseColorFactor": [1.0, 0.0, 0.0, 1.0],
      "metallicFactor": 0.25,
      "roughnessFactor": 0.5
    }
  }],
  "accessors": [
    {
      "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
    },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "buffers": [{
    "byteLength": 42,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIA"
  }]
}"#;

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn decode_triangle_document() {
    let prefab = decode_prefab(TRIANGLE_GLTF.as_bytes()).expect("valid document");

    assert_eq!(prefab.geometries.len(), 1);
    assert_eq!(prefab.meshes.len(), 1);
    assert_eq!(prefab.nodes.len(), 1);
    assert_eq!(prefab.roots, vec![0]);

    let geometry = &prefab.geometries[0];
    assert_eq!(geometry.positions.len(), 3);
    assert_eq!(geometry.triangle_count(), 1);
    assert_eq!(
        geometry.triangle(0),
        Some([
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0)
        ])
    );

    let material = &prefab.materials[0];
    assert_eq!(material.name, "Red");
    assert_eq!(material.base_color, Vec3::new(1.0, 0.0, 0.0));
    assert!((material.metalness - 0.25).abs() < 1e-6);
    assert!((material.roughness - 0.5).abs() < 1e-6);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_prefab(b"not a gltf document").is_err());
    assert!(decode_prefab(b"").is_err());
}

// ============================================================================
// Instantiation
// ============================================================================

#[test]
fn instantiate_grounds_the_model_root() {
    let prefab = decode_prefab(TRIANGLE_GLTF.as_bytes()).unwrap();
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();

    let root = prefab.instantiate(&mut scene, &mut assets);
    scene.update_matrix_world();

    let root_node = scene.get_node(root).unwrap();
    assert_eq!(root_node.transform.position, Vec3::new(0.0, -0.84, 0.0));
    assert_eq!(root_node.transform.scale, Vec3::ONE);
    assert_eq!(root_node.children().len(), 1);

    // The glTF node keeps its own local transform under the grounded root
    let child = root_node.children()[0];
    let child_node = scene.get_node(child).unwrap();
    assert_eq!(child_node.name, "Tri");
    let world = Vec3::from(child_node.world_matrix().translation);
    assert!((world - Vec3::new(0.5, -0.84, 0.0)).length() < 1e-6);

    // Mesh-bearing nodes cast and receive shadows
    assert!(child_node.cast_shadow);
    assert!(child_node.receive_shadow);
    assert!(scene.get_mesh(child).is_some());
}

#[test]
fn instantiate_skips_out_of_range_references() {
    // Prefab fields are public, so a hand-edited prefab must not be able to
    // panic instantiation
    let mut prefab = decode_prefab(TRIANGLE_GLTF.as_bytes()).unwrap();
    prefab.meshes[0].primitives[0].geometry = 99;

    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let root = prefab.instantiate(&mut scene, &mut assets);

    // The node hierarchy still lands, just without the broken mesh
    let child = scene.get_node(root).unwrap().children()[0];
    assert!(scene.get_mesh(child).is_none());

    // A dangling material reference falls back to the default material
    let mut prefab = decode_prefab(TRIANGLE_GLTF.as_bytes()).unwrap();
    prefab.meshes[0].primitives[0].material = Some(99);
    let root = prefab.instantiate(&mut scene, &mut assets);
    let child = scene.get_node(root).unwrap().children()[0];
    let mesh = scene.get_mesh(child).expect("mesh with fallback material");
    assert!(assets.get_material(mesh.material).is_some());
}

#[test]
fn instantiate_twice_yields_independent_subtrees() {
    let prefab = decode_prefab(TRIANGLE_GLTF.as_bytes()).unwrap();
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();

    let first = prefab.instantiate(&mut scene, &mut assets);
    let count_after_first = scene.node_count();
    let second = prefab.instantiate(&mut scene, &mut assets);

    assert_ne!(first, second);
    assert_eq!(scene.node_count(), count_after_first * 2);

    scene.remove_node(first);
    assert!(scene.get_node(second).is_some());
    assert_eq!(scene.node_count(), count_after_first);
}

// ============================================================================
// Background Loading via the Viewer
// ============================================================================

fn wait_for_terminal_load(viewer: &mut Viewer) {
    for _ in 0..2000 {
        viewer.tick(1.0 / 60.0);
        match viewer.load_state() {
            Some(lume::assets::LoadState::Pending) => {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            _ => return,
        }
    }
    panic!("load task never resolved");
}

#[test]
fn successful_load_instantiates_once() -> Result<()> {
    init_logs();
    let path = std::env::temp_dir().join(format!("lume-tri-{}.gltf", std::process::id()));
    std::fs::write(&path, TRIANGLE_GLTF)?;

    let mut viewer = Viewer::new(
        &ViewerConfig {
            model_path: Some(path.clone()),
            ..ViewerConfig::default()
        },
        Box::new(HeadlessBackend::new()),
    );
    assert!(viewer.model_root().is_none());

    wait_for_terminal_load(&mut viewer);
    assert!(matches!(
        viewer.load_state(),
        Some(lume::assets::LoadState::Ready)
    ));
    let root = viewer.model_root().expect("model instantiated");
    let count = viewer.scene.node_count();

    // Further ticks must not instantiate again
    viewer.tick(1.0 / 60.0);
    viewer.tick(1.0 / 60.0);
    assert_eq!(viewer.model_root(), Some(root));
    assert_eq!(viewer.scene.node_count(), count);

    std::fs::remove_file(&path).ok();
    Ok(())
}

#[test]
fn failed_load_leaves_scene_unchanged() -> Result<()> {
    init_logs();
    let path = std::env::temp_dir().join(format!("lume-bad-{}.gltf", std::process::id()));
    std::fs::write(&path, b"this is not a gltf file")?;

    let mut viewer = Viewer::new(
        &ViewerConfig {
            model_path: Some(path.clone()),
            ..ViewerConfig::default()
        },
        Box::new(HeadlessBackend::new()),
    );
    let stage_nodes = viewer.scene.node_count();

    wait_for_terminal_load(&mut viewer);
    assert!(matches!(
        viewer.load_state(),
        Some(lume::assets::LoadState::Failed(_))
    ));
    assert!(viewer.model_root().is_none());
    assert_eq!(viewer.scene.node_count(), stage_nodes);

    std::fs::remove_file(&path).ok();
    Ok(())
}

#[test]
fn missing_file_fails_terminally() {
    init_logs();
    let mut viewer = Viewer::new(
        &ViewerConfig {
            model_path: Some("no/such/model.gltf".into()),
            ..ViewerConfig::default()
        },
        Box::new(HeadlessBackend::new()),
    );

    wait_for_terminal_load(&mut viewer);
    let Some(lume::assets::LoadState::Failed(message)) = viewer.load_state() else {
        panic!("expected terminal failure");
    };
    assert!(message.contains("not found"), "got: {message}");
}
