//! 查看器核心
//!
//! [`Viewer`] 把各子系统装配成一个可交互的模型查看器：
//! 固定舞台（环境光、太阳光、地面、灯光架）、轨道相机、
//! 异步模型加载、拾取驱动的灯光移动和帧合成。
//!
//! 每帧流程（[`Viewer::tick`]）：
//! 1. 轮询加载任务，完成后把模型实例化进场景
//! 2. 输入意图路由（R 切换自动旋转 / 右键拾取移动主光源）
//! 3. 轨道相机更新 + 世界矩阵更新
//! 4. 帧尾清理瞬时输入状态
//!
//! 渲染（[`Viewer::render`]）之后向调度器请求下一帧，维持帧链。

use std::path::PathBuf;

use glam::Vec3;

use crate::app::input::{Input, Key, MouseButton};
use crate::app::scheduler::FrameScheduler;
use crate::assets::AssetServer;
use crate::assets::load_task::{LoadState, LoadTask};
use crate::controls::orbit::{DEFAULT_RADIUS, OrbitRig};
use crate::render::backend::RenderBackend;
use crate::render::composer::FrameComposer;
use crate::resources::material::PhysicalMaterial;
use crate::resources::mesh::Mesh;
use crate::resources::primitives::{PlaneOptions, create_plane};
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::light_rig::LightRig;
use crate::scene::node::Node;
use crate::scene::raycast::{self, Ray};
use crate::scene::{NodeHandle, Scene};

// ============================================================================
// 舞台常量
// ============================================================================

const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

const SUN_ELEVATION_DEGREES: f32 = 35.0;

const GROUND_SIZE: f32 = 100_000.0;
const GROUND_Y: f32 = -1.0;

/// 查看器配置
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// 初始表面尺寸（物理像素）
    pub width: u32,
    pub height: u32,
    /// 启动时加载的模型；None 表示空舞台
    pub model_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            model_path: None,
        }
    }
}

/// 交互式模型查看器
pub struct Viewer {
    pub scene: Scene,
    pub assets: AssetServer,

    composer: FrameComposer,
    orbit: OrbitRig,
    light_rig: LightRig,
    input: Input,

    camera_node: NodeHandle,
    model_root: Option<NodeHandle>,
    load_task: Option<LoadTask>,
}

impl Viewer {
    /// 创建查看器并搭好固定舞台
    #[must_use]
    pub fn new(config: &ViewerConfig, backend: Box<dyn RenderBackend>) -> Self {
        let mut scene = Scene::new();
        let mut assets = AssetServer::new();

        // ====环境光====
        scene
            .environment
            .set_ambient_color(Vec3::splat(64.0 / 255.0));

        // ====太阳光（方向光，固定仰角）====
        let elevation = SUN_ELEVATION_DEGREES.to_radians();
        let mut sun_light = Light::new_directional(Vec3::ONE, 5.0);
        sun_light.cast_shadows = true;
        let mut sun = Node::new("Sun");
        sun.transform.position = Vec3::new(elevation.cos(), elevation.sin(), 2.0);
        sun.transform.look_at(Vec3::ZERO, Vec3::Y);
        let sun_handle = scene.add_node(sun);
        scene.set_light(sun_handle, sun_light);

        // ====地面====
        let ground_geometry = assets.add_geometry(create_plane(&PlaneOptions {
            width: GROUND_SIZE,
            height: GROUND_SIZE,
            ..PlaneOptions::default()
        }));
        let ground_material = assets.add_material(
            PhysicalMaterial::new("Ground")
                .with_base_color(Vec3::splat(128.0 / 255.0))
                .with_roughness(0.8)
                .with_metalness(0.2)
                .with_reflectivity(0.9)
                .with_clearcoat(0.2),
        );
        let mut ground = Node::new("Ground");
        ground.transform.position = Vec3::new(0.0, GROUND_Y, 0.0);
        // XY 平面转到水平，法线朝上
        ground
            .transform
            .set_rotation_euler(-std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        ground.receive_shadow = true;
        let ground_handle = scene.add_node(ground);
        scene.set_mesh(
            ground_handle,
            Mesh::new(ground_geometry, ground_material).with_name("Ground"),
        );

        // ====灯光架====
        let light_rig = LightRig::setup(&mut scene, &mut assets);

        // ====相机====
        let aspect = config.width as f32 / config.height.max(1) as f32;
        let camera = Camera::new_perspective(CAMERA_FOV_DEGREES, aspect, CAMERA_NEAR, CAMERA_FAR);
        let mut camera_host = Node::new("MainCamera");
        camera_host.transform.position = Vec3::new(0.0, 0.0, DEFAULT_RADIUS);
        camera_host.transform.look_at(Vec3::ZERO, Vec3::Y);
        let camera_node = scene.add_node(camera_host);
        scene.set_camera(camera_node, camera);
        scene.active_camera = Some(camera_node);

        let mut input = Input::new();
        input.inject_resize(config.width, config.height);

        let load_task = config.model_path.as_ref().map(LoadTask::spawn);
        if let Some(task) = &load_task {
            log::info!("Loading model: {}", task.uri().display());
        }

        let mut viewer = Self {
            scene,
            assets,
            composer: FrameComposer::new(backend, config.width, config.height),
            orbit: OrbitRig::new(Vec3::ZERO, DEFAULT_RADIUS),
            light_rig,
            input,
            camera_node,
            model_root: None,
            load_task,
        };

        // 初始矩阵就位，首帧拾取/渲染前不依赖 tick
        viewer.scene.update_matrix_world();
        viewer
    }

    // ========================================================================
    // 访问器
    // ========================================================================

    #[must_use]
    pub fn orbit(&self) -> &OrbitRig {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut OrbitRig {
        &mut self.orbit
    }

    #[must_use]
    pub fn light_rig(&self) -> &LightRig {
        &self.light_rig
    }

    #[must_use]
    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut FrameComposer {
        &mut self.composer
    }

    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// 已实例化的模型根节点
    #[must_use]
    pub fn model_root(&self) -> Option<NodeHandle> {
        self.model_root
    }

    /// 当前加载任务状态（没有任务时为 None）
    #[must_use]
    pub fn load_state(&self) -> Option<&LoadState> {
        self.load_task.as_ref().map(LoadTask::state)
    }

    #[must_use]
    pub fn camera_node(&self) -> NodeHandle {
        self.camera_node
    }

    /// 替换正在查看的模型：卸掉旧模型并启动新的加载任务
    pub fn load_model(&mut self, path: impl Into<PathBuf>) {
        if let Some(old_root) = self.model_root.take() {
            self.scene.remove_node(old_root);
        }
        let task = LoadTask::spawn(path.into());
        log::info!("Loading model: {}", task.uri().display());
        self.load_task = Some(task);
    }

    /// 修改主光源颜色（指示器同步变色）
    pub fn set_primary_light_color(&mut self, color: Vec3) {
        self.light_rig
            .set_primary_color(&mut self.scene, &mut self.assets, color);
    }

    // ========================================================================
    // 每帧流程
    // ========================================================================

    /// 表面尺寸变化：合成器、相机宽高比和输入状态同步更新
    pub fn resize(&mut self, width: u32, height: u32) {
        self.composer.resize(width, height);
        self.input.inject_resize(width, height);

        if height > 0
            && let Some(camera) = self.scene.get_camera_mut(self.camera_node)
        {
            camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// 更新一帧并清理瞬时输入状态
    pub fn tick(&mut self, dt: f32) {
        self.update(dt);
        self.input.start_frame();
    }

    /// 渲染一帧并请求下一帧
    pub fn render(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.composer.render(&self.scene, &self.assets);
        scheduler.request_frame();
    }

    fn update(&mut self, dt: f32) {
        self.poll_load();

        // ====意图路由====
        if self.input.get_key_down(Key::R) {
            self.orbit.toggle_auto_rotate();
        }

        // ====相机更新====
        if let Some(node) = self.scene.get_node_mut(self.camera_node) {
            self.orbit.update(&mut node.transform, &self.input, dt);
        }
        self.scene.update_matrix_world();

        // ====拾取移动主光源====
        if self.input.get_mouse_button_down(MouseButton::Right) {
            self.pick_and_move_light();
        }
    }

    fn poll_load(&mut self) {
        let resolved = self.load_task.as_mut().and_then(|task| {
            let uri = task.uri().display().to_string();
            task.poll_with(|loaded, total| match total {
                Some(total) => log::debug!("{uri}: {loaded}/{total} bytes"),
                None => log::debug!("{uri}: {loaded} bytes"),
            })
        });

        match resolved {
            Some(Ok(prefab)) => {
                let root = prefab.instantiate(&mut self.scene, &mut self.assets);
                self.model_root = Some(root);
                log::info!(
                    "Model ready: {} nodes, {} meshes",
                    prefab.nodes.len(),
                    prefab.meshes.len()
                );
            }
            // 失败是终态：场景保持原样，只上报一次
            Some(Err(err)) => log::error!("Model load failed: {err}"),
            None => {}
        }
    }

    /// 右键拾取：对场景表面做最近命中，把主光源移到命中点
    fn pick_and_move_light(&mut self) {
        let cursor = self.input.cursor_position();
        let screen = self.input.screen_size;
        if screen.x <= 0.0 || screen.y <= 0.0 {
            return;
        }

        let hit = self.scene.main_camera().and_then(|camera| {
            let ray = Ray::from_screen(cursor, screen, camera);
            raycast::pick(&self.scene, &self.assets, &ray)
        });

        if let Some(hit) = hit {
            self.light_rig.move_primary(&mut self.scene, hit.point);
        }
    }
}
