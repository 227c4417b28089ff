use anyhow::Context;
use cgmath::Point2;
use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    editor::{Command, Editor},
    gfx::render_engine::RenderEngine,
    ui::{command_panel, overlay, PanelState, UiManager},
};

pub struct MultiMeshApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    editor: Editor,
    panel: PanelState,
    scroll: ScrollAccumulator,
}

impl MultiMeshApp {
    /// Create an application with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(AppConfig::default())
    }

    /// Create an application reading meshes through [`ObjLoader`] from the
    /// configured mesh directory. The scene file (or the default meshes) is
    /// loaded here, before the window opens.
    ///
    /// [`ObjLoader`]: crate::gfx::scene::ObjLoader
    pub fn with_config(config: AppConfig) -> anyhow::Result<Self> {
        Self::with_editor(Editor::with_obj_loader(config))
    }

    /// Create an application around an existing editor
    pub fn with_editor(mut editor: Editor) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        editor.startup();

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                editor,
                panel: PanelState::new(),
                scroll: ScrollAccumulator::default(),
            },
        })
    }

    pub fn editor(&self) -> &Editor {
        &self.app_state.editor
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop failed")
    }
}

impl AppState {
    fn apply(&mut self, command: Command) {
        let description = format!("{:?}", command);
        match self.editor.execute(command) {
            Ok(()) => self.panel.set_status(format!("{} done", description)),
            Err(err) => {
                log::error!("{} failed: {}", description, err);
                self.panel.set_status(err.to_string());
            }
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) {
        match key_code {
            KeyCode::KeyR => self.apply(Command::LoadScene),
            KeyCode::KeyS => self.apply(Command::SaveScene),
            KeyCode::KeyL => self.apply(Command::ListMeshes),
            KeyCode::KeyD => self.panel.request_delete(),
            KeyCode::KeyA => self.panel.request_add(),
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        let editor = &self.editor;
        let panel = &mut self.panel;
        let mut confirmed = None;
        let now = Instant::now();

        let result = render_engine.render_frame(|device, queue, encoder, color_attachment| {
            ui_manager.draw(device, queue, encoder, window, color_attachment, |ui| {
                overlay::draw_handles(ui, editor, now);
                confirmed = command_panel(ui, editor, panel);
            });
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                render_engine.reconfigure();
            }
            Err(err) => log::error!("failed to render frame: {}", err),
        }

        if let Some(command) = confirmed {
            self.apply(command);
        }
    }
}

/// Trackpad travel that counts as one wheel notch
const PIXELS_PER_NOTCH: f64 = 50.0;

/// Turns scroll events into whole wheel notches, positive away from the user.
///
/// A mouse wheel event is one notch whatever its size. Trackpad pixel deltas
/// are summed until they cover [`PIXELS_PER_NOTCH`].
#[derive(Debug, Default)]
struct ScrollAccumulator {
    pending_pixels: f64,
}

impl ScrollAccumulator {
    fn notches(&mut self, delta: MouseScrollDelta) -> i32 {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => {
                self.pending_pixels = 0.0;
                if y > 0.0 {
                    1
                } else if y < 0.0 {
                    -1
                } else {
                    0
                }
            }
            MouseScrollDelta::PixelDelta(position) => {
                self.pending_pixels += position.y;
                let notches = (self.pending_pixels / PIXELS_PER_NOTCH).trunc();
                self.pending_pixels -= notches * PIXELS_PER_NOTCH;
                notches as i32
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = self.editor.config();
        let (width, height) = config.window_size;
        let attributes = WindowAttributes::default()
            .with_title(config.window_title.clone())
            .with_inner_size(PhysicalSize::new(width, height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.inner_size().into();
        let window_clone = window.clone();
        let renderer =
            match pollster::block_on(async move { RenderEngine::new(window_clone, width, height).await }) {
                Ok(renderer) => renderer,
                Err(err) => {
                    log::error!("failed to initialise rendering: {:#}", err);
                    event_loop.exit();
                    return;
                }
            };

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );

        self.editor.resize(width, height);
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key_code),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.editor.set_shift(modifiers.state().shift_key());
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.editor
                    .mouse_moved(Point2::new(position.x as f32, position.y as f32), Instant::now());
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.editor.mouse_pressed();
                }
                ElementState::Released => self.editor.mouse_released(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = self.scroll.notches(delta);
                let direction = notches.signum() as f32;
                for _ in 0..notches.unsigned_abs() {
                    self.editor.wheel(direction);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.editor.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
