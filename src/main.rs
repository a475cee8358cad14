use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use std::sync::Arc;
use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::AppConfig;
use engine::renderer::Renderer;
use engine::Engine;
use game::Application;

const TITLE: &str = "Debris Dodger";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting {}...", TITLE);

    let config = AppConfig::from_env();
    info!("Config: {:?}", config);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let size = window.inner_size();
    let mut engine = Engine::from_config(&config);
    engine.resize(size.width, size.height);
    let mut app = Application::create(Some(engine))
        .ok_or_else(|| anyhow::anyhow!("Failed to create application"))?;

    let frame_interval = config.frame_interval();
    let mut title = String::from(TITLE);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                let Some(engine) = app.engine_mut() else {
                    elwt.exit();
                    return;
                };

                match event {
                    WindowEvent::CloseRequested => {
                        info!("Close requested, shutting down...");
                        app.destroy();
                        elwt.exit();
                    }
                    WindowEvent::Resized(physical_size) => {
                        renderer.resize(physical_size);
                        engine.resize(physical_size.width, physical_size.height);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        engine.input_mut().process_keyboard_event(&event);
                    }
                    WindowEvent::Touch(touch) => {
                        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                        engine.process_touch(touch.id, touch.phase.into(), position);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        engine
                            .input_mut()
                            .process_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                    }
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => {
                        engine.process_mouse_button(state == ElementState::Pressed);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        engine.input_mut().process_cursor_left();
                    }
                    WindowEvent::Focused(false) => {
                        engine.input_mut().reset();
                    }
                    WindowEvent::RedrawRequested => {
                        app.update();

                        if app.quit_requested() {
                            info!("Quit requested, shutting down...");
                            app.destroy();
                            elwt.exit();
                            return;
                        }

                        let Some(engine) = app.engine() else {
                            return;
                        };
                        if let Err(e) = renderer.render(engine.draw_list()) {
                            error!("Render error: {}", e);
                        }

                        let current = window_title(
                            engine.clock().fps(),
                            app.hit_count(),
                            engine.watches().describe_selected(),
                        );
                        if current != title {
                            window.set_title(&current);
                            title = current;
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                if app.is_destroyed() {
                    elwt.exit();
                    return;
                }
                // Request redraw on next frame
                window.request_redraw();
                elwt.set_control_flow(ControlFlow::wait_duration(frame_interval));
            }
            Event::LoopExiting => {
                app.destroy();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

fn window_title(fps: f32, hits: u32, watch: Option<String>) -> String {
    let mut title = format!("{} - {:.0} fps - {} hits", TITLE, fps, hits);
    if let Some(watch) = watch {
        title.push_str(" - ");
        title.push_str(&watch);
    }
    title
}
