//! Host integration: platform-agnostic input state, frame scheduling and
//! the optional winit application shell.

pub mod input;
pub mod scheduler;

#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use input::{ButtonState, Input, Key, MouseButton};
pub use scheduler::{FrameScheduler, ManualScheduler};

#[cfg(feature = "winit")]
pub use winit_shell::App;

#[cfg(feature = "winit")]
mod winit_shell {
    use std::sync::Arc;
    use std::time::Instant;

    use winit::application::ApplicationHandler;
    use winit::event::WindowEvent;
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::window::{Window, WindowId};

    use crate::app::scheduler::FrameScheduler;
    use crate::app::winit_adapter;
    use crate::errors::Result;
    use crate::viewer::Viewer;

    /// 窗口重绘请求即帧链：呈现一帧后请求下一帧
    struct RedrawScheduler {
        window: Arc<Window>,
    }

    impl FrameScheduler for RedrawScheduler {
        fn request_frame(&mut self) {
            self.window.request_redraw();
        }
    }

    /// Winit 应用外壳
    ///
    /// 持有窗口和 [`Viewer`]，把窗口事件翻译给查看器，并用重绘请求维持
    /// 渲染帧链。
    pub struct App {
        window: Option<Arc<Window>>,
        pub title: String,
        pub viewer: Viewer,

        last_loop_time: Instant,
    }

    impl App {
        #[must_use]
        pub fn new(viewer: Viewer) -> Self {
            Self {
                window: None,
                title: "Model Viewer".into(),
                viewer,
                last_loop_time: Instant::now(),
            }
        }

        #[must_use]
        pub fn with_title(mut self, title: impl Into<String>) -> Self {
            self.title = title.into();
            self
        }

        pub fn run(mut self) -> Result<()> {
            let event_loop = EventLoop::new()?;
            event_loop.set_control_flow(ControlFlow::Poll);
            event_loop.run_app(&mut self)?;
            Ok(())
        }

        fn redraw(&mut self) {
            let now = Instant::now();
            let dt = now.duration_since(self.last_loop_time).as_secs_f32();
            self.last_loop_time = now;

            self.viewer.tick(dt);

            if let Some(window) = &self.window {
                let mut scheduler = RedrawScheduler {
                    window: window.clone(),
                };
                self.viewer.render(&mut scheduler);
            }
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }

            let window_attributes = Window::default_attributes()
                .with_title(self.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

            let window = match event_loop.create_window(window_attributes) {
                Ok(window) => Arc::new(window),
                Err(err) => {
                    log::error!("Failed to create window: {err}");
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            self.viewer.resize(size.width, size.height);

            self.last_loop_time = Instant::now();
            window.request_redraw();
            self.window = Some(window);
        }

        fn window_event(
            &mut self,
            event_loop: &ActiveEventLoop,
            _window_id: WindowId,
            event: WindowEvent,
        ) {
            match event {
                WindowEvent::CloseRequested => {
                    event_loop.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    self.viewer.resize(physical_size.width, physical_size.height);
                }
                WindowEvent::RedrawRequested => {
                    self.redraw();
                }
                other => {
                    winit_adapter::process_window_event(self.viewer.input_mut(), &other);
                }
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
