//! Explicit frame loop around an [`Engine`].
//!
//! A browser host reschedules the frame callback forever via
//! `requestAnimationFrame`; here that becomes a [`RunLoop`] with start/stop
//! control plus a [`FrameScheduler`] that decides whether another frame is
//! wanted. Tests and headless renders use [`FixedFrames`].
//!
//! Host events are queued and applied in arrival order at the start of the
//! next tick, so a resize reported while a frame is being computed never
//! changes that frame's dimensions.

use crate::engine::{Engine, HostEvent};
use crate::surface::Surface;
use std::collections::VecDeque;

/// Decides whether the loop should run another frame.
pub trait FrameScheduler {
    /// Called before each frame; `false` ends [`RunLoop::run`].
    fn next_frame(&mut self) -> bool;
}

/// Allows exactly `n` frames.
#[derive(Debug, Clone, Copy)]
pub struct FixedFrames(pub usize);

impl FrameScheduler for FixedFrames {
    fn next_frame(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

/// Owns an engine, its pending host events, and the running flag.
pub struct RunLoop<E: Engine> {
    engine: E,
    pending: VecDeque<HostEvent>,
    running: bool,
    frames: u64,
}

impl<E: Engine> RunLoop<E> {
    /// A stopped loop around `engine`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            pending: VecDeque::new(),
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("run loop started at frame {}", self.frames);
        }
        self.running = true;
    }

    /// Stops the loop; queued events stay queued until the next tick.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("run loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames executed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Queues a host event for the start of the next tick.
    /// Queues a host event for the start of the next tick.
    pub fn push_event(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    /// Events queued but not yet applied.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Consumes the loop, dropping any unapplied events.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Runs one frame if the loop is running.
    ///
    /// Drains queued events into the engine first. Returns whether a frame
    /// was executed.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.running {
            return false;
        }
        while let Some(event) = self.pending.pop_front() {
            self.engine.handle(event);
        }
        self.engine.frame(surface);
        self.frames += 1;
        true
    }

    /// Starts the loop and ticks until `scheduler` declines or the loop is
    /// stopped. Returns the number of frames run by this call.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler, surface: &mut dyn Surface) -> usize {
        self.start();
        let mut ran = 0;
        while self.running && scheduler.next_frame() {
            if self.tick(surface) {
                ran += 1;
            }
        }
        ran
    }
}
