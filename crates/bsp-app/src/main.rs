// ABOUTME: Main application entry point.
// ABOUTME: Sets up the window and event loop, and routes pointer input into the partition tree.

use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use bsp_core::{Config, Metrics};
use bsp_layout::{compute_layout, Axis, Hit, Layout, LeafAction, NodePath, PartitionTree, Rect, ResizeDrag};
use bsp_renderer::Renderer;

fn resize_cursor(axis: Axis) -> CursorIcon {
    match axis {
        Axis::Horizontal => CursorIcon::ColResize,
        Axis::Vertical => CursorIcon::RowResize,
    }
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    tree: PartitionTree,
    drag: ResizeDrag,
    /// Regions from the last layout pass; None until the window exists
    layout: Option<Layout>,
    hovered_divider: Option<NodePath>,
    mouse_pos: (f32, f32),
    config: Config,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            window: None,
            renderer: None,
            tree: PartitionTree::new(),
            drag: ResizeDrag::Idle,
            layout: None,
            hovered_divider: None,
            mouse_pos: (0.0, 0.0),
            config,
        }
    }

    fn metrics(&self) -> Metrics {
        let scale = self
            .window
            .as_ref()
            .map(|w| w.scale_factor() as f32)
            .unwrap_or(1.0);
        self.config.metrics.scaled(scale)
    }

    /// Recompute regions from the tree and any live drag preview
    fn relayout(&mut self) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        let (width, height) = renderer.window_size();
        let bounds = Rect::new(0.0, 0.0, width as f32, height as f32);
        let metrics = self.metrics();
        self.layout = Some(compute_layout(
            self.tree.root(),
            bounds,
            &metrics,
            self.drag.preview(),
        ));
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn set_cursor(&self, icon: CursorIcon) {
        if let Some(window) = &self.window {
            window.set_cursor(icon);
        }
    }

    fn tree_changed(&mut self) {
        self.hovered_divider = None;
        self.relayout();
        self.request_redraw();
    }

    fn leaf_action(&mut self, path: &NodePath, action: LeafAction) {
        match self.tree.apply_leaf_action(path, action) {
            Ok(true) => {
                tracing::info!(
                    "{:?} at {}, {} leaves",
                    action,
                    path,
                    self.tree.leaf_count()
                );
                self.tree_changed();
            }
            Ok(false) => tracing::info!("Keeping the last remaining leaf"),
            Err(e) => tracing::error!("Failed to apply {:?} at {}: {}", action, path, e),
        }
    }

    fn pointer_pressed(&mut self) {
        let (x, y) = self.mouse_pos;
        let Some(hit) = self.layout.as_ref().and_then(|l| l.hit_test(x, y)) else {
            return;
        };
        match hit {
            Hit::Divider { path, axis, ratio } => {
                let bounds = self.layout.as_ref().and_then(|l| l.container_for(&path));
                if self.drag.begin(path, axis, ratio, bounds) {
                    self.set_cursor(resize_cursor(axis));
                    self.request_redraw();
                }
            }
            Hit::Control { path, action } => self.leaf_action(&path, action),
            Hit::Leaf { .. } => {}
        }
    }

    fn pointer_released(&mut self) {
        let Some(commit) = self.drag.release() else {
            return;
        };
        match self.tree.commit_ratio(&commit.path, commit.ratio) {
            Ok(_) => tracing::debug!("Resized {} to {:.3}", commit.path, commit.ratio),
            Err(e) => tracing::error!("Failed to resize {}: {}", commit.path, e),
        }
        self.tree_changed();
        self.update_hover();
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        self.mouse_pos = (x, y);
        if self.drag.pointer_moved(x, y).is_some() {
            self.relayout();
            self.request_redraw();
            return;
        }
        self.update_hover();
    }

    fn update_hover(&mut self) {
        let (x, y) = self.mouse_pos;
        let hovered = match self.layout.as_ref().and_then(|l| l.hit_test(x, y)) {
            Some(Hit::Divider { path, axis, .. }) => Some((path, axis)),
            _ => None,
        };
        let hovered_path = hovered.as_ref().map(|(path, _)| path.clone());
        if hovered_path == self.hovered_divider {
            return;
        }
        match &hovered {
            Some((_, axis)) => self.set_cursor(resize_cursor(*axis)),
            None => self.set_cursor(CursorIcon::Default),
        }
        self.hovered_divider = hovered_path;
        self.request_redraw();
    }

    fn render(&mut self) {
        let active = self
            .drag
            .preview()
            .map(|(path, _)| path.clone())
            .or_else(|| self.hovered_divider.clone());
        let (Some(renderer), Some(layout)) = (&mut self.renderer, &self.layout) else {
            return;
        };
        if let Err(e) = renderer.render(layout, &self.config.palette, active.as_ref()) {
            tracing::error!("Render error: {}", e);
        }
    }

    fn log_snapshot(&self) {
        match self.tree.snapshot() {
            Ok(json) => tracing::info!("Partition tree (revision {}):\n{}", self.tree.revision(), json),
            Err(e) => tracing::error!("Failed to serialize tree: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("bsp-panels")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(Arc::clone(&window))) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("Failed to create renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let physical_size = window.inner_size();
        tracing::info!(
            "Window created: {}x{} physical pixels, scale factor: {}",
            physical_size.width,
            physical_size.height,
            window.scale_factor()
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.relayout();
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
                self.relayout();
                self.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                self.relayout();
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.render(),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.pointer_pressed(),
                ElementState::Released => self.pointer_released(),
            },
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::F12)
                {
                    self.log_snapshot();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting bsp-panels");

    let config = Config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!("Using default config: {}", e);
        Config::default()
    });

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(config);

    event_loop.run_app(&mut app)?;

    Ok(())
}
