mod app;
mod color;
mod config;
mod editor;
mod font;
mod graphics;
mod grid;
mod history;
mod input;
mod layout;
mod raster;
mod status;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::app::Session;
use crate::config::EditorConfig;
use crate::editor::EditorState;
use crate::font::FontRenderer;
use crate::graphics::GraphicsRenderer;
use crate::input::InputHandler;
use crate::raster::Theme;

const WIDTH: u32 = 720;
const HEIGHT: u32 = 560;
const FONT_SIZE: f32 = 14.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = EditorConfig::resolve_path(std::env::args().nth(1));
    let config = EditorConfig::load(&config_path)?;

    let editor = EditorState::new(config.editor_options())?;

    let font = match &config.font_path {
        Some(path) => match FontRenderer::load(path, FONT_SIZE) {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("{}; status text disabled", err);
                None
            }
        },
        None => None,
    };

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Stitch Grid")
        .with_inner_size(winit::dpi::LogicalSize::new(WIDTH, HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    let theme = Theme {
        background: config.background,
        guide: config.guide_color,
    };
    let mut graphics = GraphicsRenderer::new(&window, &editor, config.cell_size, theme, font)?;
    let mut session = Session::new(editor, config.palette.clone());
    let mut input_handler = InputHandler::new();

    log::info!(
        "Editing a {}x{} grid (max {}x{})",
        config.grid_width,
        config.grid_height,
        config.max_width,
        config.max_height
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    graphics.resize(size.width, size.height, session.editor());
                    session.request_full_redraw();
                }
                event => {
                    let action = input_handler.handle_window_event(&event);
                    if session.handle(action, graphics.layout()) {
                        graphics.relayout(session.editor());
                    }
                }
            },
            Event::MainEventsCleared => {
                let redraw = session.take_redraw();
                let status_text = session.status_text();
                let prompt_pending = session.status().has_prompt();

                if graphics.render(session.editor(), &redraw, &status_text, prompt_pending) {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(err) = graphics.present() {
                    log::error!("Render error: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
