#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod assets;
pub mod controls;
pub mod errors;
pub mod render;
pub mod resources;
pub mod scene;
pub mod viewer;

pub use app::{FrameScheduler, Input, Key, ManualScheduler, MouseButton};
pub use assets::{AssetServer, LoadState, LoadTask, ModelPrefab};
pub use controls::OrbitRig;
pub use errors::{Result, ViewerError};
pub use render::{FrameComposer, HeadlessBackend, PassKind, RenderBackend, RenderTrace};
pub use resources::primitives::*;
pub use resources::{BloomSettings, BoundingBox, Geometry, Mesh, PhysicalMaterial};
pub use scene::{Camera, Light, LightRig, Node, Ray, RayHit, Scene};
pub use viewer::{Viewer, ViewerConfig};

#[cfg(feature = "winit")]
pub use app::App;
