use crate::controllers::interactive::input_event::{InputEvent, NavKey};
use crate::controllers::interactive::pacer::FramePacer;
use crate::controllers::interactive::ports::display::{DisplayError, DisplayPort};
use crate::core::data::camera::{CameraError, CameraState};
use crate::core::data::resolution::Resolution;
use crate::core::navigation::{
    NavigationLimits, NavigationWarning, PanControls, apply_pan, apply_wheel,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The display has no area (minimised); input was applied, nothing drawn.
    Skipped,
    Terminated,
}

/// The fixed-cadence viewer loop: apply input, render, present, pace.
pub struct InteractiveSession<D, P> {
    camera: CameraState,
    limits: NavigationLimits,
    controls: PanControls,
    pending: VecDeque<InputEvent>,
    resolution: Option<Resolution>,
    display: D,
    pacer: P,
    state: LoopState,
    frames: u64,
    last_frame_time: Duration,
    precision_warned: bool,
}

impl<D: DisplayPort, P: FramePacer> InteractiveSession<D, P> {
    pub fn new(
        display: D,
        pacer: P,
        camera: CameraState,
        limits: NavigationLimits,
        resolution: Resolution,
    ) -> Self {
        Self {
            camera,
            limits,
            controls: PanControls::default(),
            pending: VecDeque::new(),
            resolution: Some(resolution),
            display,
            pacer,
            state: LoopState::Running,
            frames: 0,
            last_frame_time: Duration::ZERO,
            precision_warned: false,
        }
    }

    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render plus present time of the most recent drawn frame.
    #[must_use]
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[must_use]
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Runs one cycle. Any error terminates the session.
    pub fn step(&mut self) -> Result<FrameOutcome, SessionError> {
        if self.state == LoopState::Terminated {
            return Ok(FrameOutcome::Terminated);
        }

        let result = self.run_frame();

        if result.is_err() {
            self.state = LoopState::Terminated;
        }

        result
    }

    /// Drives the loop until quit. `next_events` is asked for the input of
    /// each frame, by frame number.
    pub fn run_until_terminated<F>(&mut self, mut next_events: F) -> Result<u64, SessionError>
    where
        F: FnMut(u64) -> Vec<InputEvent>,
    {
        loop {
            for event in next_events(self.frames) {
                self.push_event(event);
            }

            if self.step()? == FrameOutcome::Terminated {
                info!(frames = self.frames, "interactive session terminated");
                return Ok(self.frames);
            }
        }
    }

    fn run_frame(&mut self) -> Result<FrameOutcome, SessionError> {
        if !self.apply_input()? {
            self.state = LoopState::Terminated;
            self.pending.clear();
            return Ok(FrameOutcome::Terminated);
        }

        let outcome = match self.resolution {
            Some(resolution) => {
                self.warn_on_precision_loss(resolution);

                let start = Instant::now();
                self.display.render(&self.camera, resolution)?;
                self.display.present()?;
                self.last_frame_time = start.elapsed();

                FrameOutcome::Presented
            }
            None => FrameOutcome::Skipped,
        };

        self.pacer.pace();
        self.frames += 1;

        Ok(outcome)
    }

    /// Returns `false` when a quit was received.
    fn apply_input(&mut self) -> Result<bool, SessionError> {
        while let Some(event) = self.pending.pop_front() {
            match event {
                InputEvent::Quit => return Ok(false),
                InputEvent::KeyDown(NavKey::Pan(direction)) => {
                    self.controls.set(direction, true);
                }
                InputEvent::KeyUp(NavKey::Pan(direction)) => {
                    self.controls.set(direction, false);
                }
                InputEvent::KeyDown(NavKey::ToggleFullscreen) => {}
                InputEvent::KeyUp(NavKey::ToggleFullscreen) => {
                    self.display.toggle_fullscreen();
                }
                InputEvent::Wheel { delta_y } => {
                    let warning = apply_wheel(&mut self.camera, delta_y, &self.limits)?;
                    log_navigation_warning(warning, self.camera.scale());
                }
                InputEvent::Resize { width, height } => self.resize(width, height)?,
                InputEvent::SetIterations(iterations) => {
                    self.camera.set_iterations(iterations)?;
                    debug!(iterations, "iteration bound changed");
                }
            }
        }

        apply_pan(&mut self.camera, self.controls, &self.limits)?;

        Ok(true)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        match Resolution::new(width, height) {
            Ok(resolution) => {
                self.display.resize(resolution)?;
                self.resolution = Some(resolution);
                debug!(%resolution, "display resized");
            }
            Err(_) => {
                self.resolution = None;
                debug!(width, height, "display has no area, pausing rendering");
            }
        }

        Ok(())
    }

    fn warn_on_precision_loss(&mut self, resolution: Resolution) {
        let exhausted = self.camera.single_precision_exhausted(resolution);

        if exhausted && !self.precision_warned {
            warn!(
                scale = self.camera.scale(),
                "zoom is past f32 precision, the image will degrade"
            );
        }

        self.precision_warned = exhausted;
    }
}

fn log_navigation_warning(warning: Option<NavigationWarning>, scale: f64) {
    match warning {
        Some(NavigationWarning::ScaleClampedToMin) => {
            warn!(scale, "zoom limit reached, scale clamped to minimum");
        }
        Some(NavigationWarning::ScaleClampedToMax) => {
            warn!(scale, "zoom limit reached, scale clamped to maximum");
        }
        None => {}
    }
}
