//! Platform abstraction layer
//!
//! The host owns the clock and the "call me next frame" primitive
//! (`requestAnimationFrame` in the browser). `FrameDriver` turns those into
//! clamped frame deltas and a loop that can be stopped from anywhere.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::MAX_FRAME_DT;

/// Host primitive that arranges for one future frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Something advanced and drawn once per frame
pub trait Simulation {
    /// Advance by `dt` seconds
    fn update(&mut self, dt: f32);
    fn render(&mut self);
}

/// Stops a running `FrameDriver` from an event handler.
///
/// A frame that is already scheduled still fires, but does nothing.
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Cooperative per-frame loop
#[derive(Debug)]
pub struct FrameDriver<F: FrameScheduler> {
    scheduler: F,
    running: Rc<Cell<bool>>,
    /// Host timestamp (ms) of the previous frame
    last_time: f64,
}

impl<F: FrameScheduler> FrameDriver<F> {
    pub fn new(scheduler: F) -> Self {
        Self {
            scheduler,
            running: Rc::new(Cell::new(false)),
            last_time: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: self.running.clone(),
        }
    }

    /// Start the loop at host time `now` (ms). Does nothing if already running.
    pub fn start(&mut self, now: f64) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
        self.last_time = now;
        self.scheduler.request_frame();
        log::info!("Frame loop started");
    }

    pub fn stop(&mut self) {
        if self.running.replace(false) {
            log::info!("Frame loop stopped");
        }
    }

    /// Run one frame at host time `now` (ms).
    ///
    /// Returns false, touching nothing, once the loop has been stopped.
    pub fn on_frame<S: Simulation + ?Sized>(&mut self, now: f64, sim: &mut S) -> bool {
        if !self.running.get() {
            return false;
        }

        let dt = (((now - self.last_time) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT);
        self.last_time = now;

        sim.update(dt);
        sim.render();

        // The simulation may have stopped us through a handle
        if self.running.get() {
            self.scheduler.request_frame();
        }
        true
    }
}
