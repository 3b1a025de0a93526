//! winit event loop driving the interactive session.

use crate::controllers::interactive::input_event::InputEvent;
use crate::controllers::interactive::pacer::EventLoopPacer;
use crate::controllers::interactive::session::{FrameOutcome, InteractiveSession, SessionError};
use crate::core::data::camera::CameraError;
use crate::core::data::resolution::{Resolution, ResolutionError};
use crate::core::navigation::{NavigationLimits, clamp_to_limits};
use crate::input::gui::config::ViewerConfig;
use crate::input::gui::keymap;
use crate::input::gui::overlay::DebugOverlay;
use crate::presenters::pixels::presenter::{PixelsDisplay, PixelsDisplayError};
use std::time::Instant;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowBuilder};

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Display(#[from] PixelsDisplayError),
    #[error("invalid window size: {0}")]
    Size(#[from] ResolutionError),
    #[error("invalid starting camera: {0}")]
    Camera(#[from] CameraError),
    #[error("interactive session failed: {0}")]
    Session(#[from] SessionError),
}

type Session = InteractiveSession<PixelsDisplay, EventLoopPacer>;

/// Opens the viewer window and blocks until it is closed.
pub fn run_viewer(config: ViewerConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;

    // pixels needs a 'static window handle.
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title("Fractal Camera Control")
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
            .build(&event_loop)?,
    ));

    let size = window.inner_size();
    let resolution = Resolution::new(size.width.max(1), size.height.max(1))?;
    let display = PixelsDisplay::new(window, resolution, &config.shader)?;

    let limits = NavigationLimits {
        frame_rate: config.frame_rate,
        ..NavigationLimits::default()
    };
    let mut camera = config.camera;
    let requested_scale = camera.scale();
    if let Some(warning) = clamp_to_limits(&mut camera, &limits)? {
        warn!(
            requested_scale,
            scale = camera.scale(),
            ?warning,
            "starting scale is outside the navigation limits"
        );
    }

    let pacer = EventLoopPacer::new(limits.frame_duration(), Instant::now());
    let mut session = InteractiveSession::new(display, pacer, camera, limits, resolution);
    let mut overlay = DebugOverlay::new(window, &event_loop, config.camera.iterations());
    let mut failure = None;

    info!(
        %resolution,
        frame_rate = limits.frame_rate,
        shader = config.shader.label(),
        "viewer started"
    );

    event_loop.run(|event, elwt| match event {
        Event::NewEvents(StartCause::Init) => {
            elwt.set_control_flow(ControlFlow::WaitUntil(session.pacer().deadline()));
        }
        Event::WindowEvent { event, window_id } if window_id == window.id() => {
            handle_window_event(&mut session, &mut overlay, window, &event);
        }
        Event::AboutToWait => {
            if Instant::now() >= session.pacer().deadline() {
                match run_frame(&mut session, &mut overlay, window) {
                    Ok(FrameOutcome::Terminated) => elwt.exit(),
                    Ok(_) => {}
                    Err(session_error) => {
                        error!(error = %session_error, "frame failed, closing viewer");
                        failure = Some(session_error);
                        elwt.exit();
                    }
                }
            }

            elwt.set_control_flow(ControlFlow::WaitUntil(session.pacer().deadline()));
        }
        _ => {}
    })?;

    match failure {
        Some(session_error) => Err(session_error.into()),
        None => Ok(()),
    }
}

fn run_frame(
    session: &mut Session,
    overlay: &mut DebugOverlay,
    window: &Window,
) -> Result<FrameOutcome, SessionError> {
    let output = overlay.run(window, session.camera(), session.last_frame_time());
    session.display_mut().queue_overlay(overlay.context(), output);

    if let Some(iterations) = overlay.take_requested_iterations() {
        session.push_event(InputEvent::SetIterations(iterations));
    }

    session.step()
}

fn handle_window_event(
    session: &mut Session,
    overlay: &mut DebugOverlay,
    window: &Window,
    event: &WindowEvent,
) {
    let response = overlay.on_window_event(window, event);

    match event {
        WindowEvent::CloseRequested => session.push_event(InputEvent::Quit),
        WindowEvent::Resized(size) => session.push_event(InputEvent::Resize {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            overlay.set_pixels_per_point(*scale_factor as f32);
            let size = window.inner_size();
            session.push_event(InputEvent::Resize {
                width: size.width,
                height: size.height,
            });
        }
        WindowEvent::Focused(false) => {
            for release in keymap::release_all() {
                session.push_event(release);
            }
        }
        WindowEvent::KeyboardInput { event: key, .. } => {
            // Releases always pass through so a key cannot stay held.
            let captured = response.consumed && key.state == ElementState::Pressed;

            if captured || key.repeat {
                return;
            }

            if let PhysicalKey::Code(code) = key.physical_key {
                if let Some(input) = keymap::key_event(code, key.state) {
                    session.push_event(input);
                }
            }
        }
        WindowEvent::MouseWheel { delta, .. } if !response.consumed => {
            let delta_y = match delta {
                MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                MouseScrollDelta::PixelDelta(position) => position.y,
            };
            session.push_event(InputEvent::Wheel { delta_y });
        }
        _ => {}
    }
}
