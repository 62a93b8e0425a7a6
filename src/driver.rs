//! Frame loop driver
//!
//! Owns the session and turns platform callbacks into ticks. A frame is
//! requested only while the session is Running; pausing or a terminal
//! transition simply stops requesting, and any transition back to Running
//! requests a fresh frame because none is pending.

use crate::renderer::{RenderOptions, Vertex, build_frame};
use crate::sim::{Autopilot, GameEvent, GamePhase, GameState, TickInput, tick};

/// Something that can call `LoopDriver::frame` on the next display refresh
pub trait FrameScheduler {
    /// Ask for one callback; repeated requests before it fires are coalesced
    fn request_frame(&mut self);
    /// Drop a pending callback, if any
    fn cancel(&mut self);
    /// The pending callback has just run
    fn on_fired(&mut self);
    fn is_pending(&self) -> bool;
}

/// Where finished frames go
pub trait FrameTarget {
    fn present(&mut self, vertices: &[Vertex]);
}

/// Consumer of presentation events (HUD, dialogs)
pub trait Presenter {
    fn on_event(&mut self, event: GameEvent);
}

/// Keyboard hold intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

/// Flag-based scheduler for headless runs: the owner polls `take`
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    /// Total frames requested
    pub requests: u64,
}

impl ManualScheduler {
    /// True if a frame was pending; the caller should now run it
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        if !self.pending {
            self.pending = true;
            self.requests += 1;
        }
    }

    fn cancel(&mut self) {
        self.pending = false;
    }

    fn on_fired(&mut self) {
        self.pending = false;
    }

    fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Frame target that only counts what it is given
#[derive(Debug, Default)]
pub struct HeadlessTarget {
    pub frames: u64,
    pub last_vertex_count: usize,
}

impl FrameTarget for HeadlessTarget {
    fn present(&mut self, vertices: &[Vertex]) {
        self.frames += 1;
        self.last_vertex_count = vertices.len();
    }
}

/// Presenter that records every event
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl Presenter for EventLog {
    fn on_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Drives the session from platform callbacks
pub struct LoopDriver<S, T, P> {
    state: GameState,
    scheduler: S,
    target: T,
    presenter: P,
    options: RenderOptions,
    held_left: bool,
    held_right: bool,
    autopilot: Option<Autopilot>,
}

impl<S: FrameScheduler, T: FrameTarget, P: Presenter> LoopDriver<S, T, P> {
    pub fn new(state: GameState, scheduler: S, target: T, presenter: P) -> Self {
        Self {
            state,
            scheduler,
            target,
            presenter,
            options: RenderOptions::default(),
            held_left: false,
            held_right: false,
            autopilot: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Start or restart the session
    pub fn start(&mut self) {
        self.state.start();
        self.after_transition();
    }

    /// Next level; ignored unless the level is complete
    pub fn advance_level(&mut self) -> bool {
        let advanced = self.state.advance_level();
        self.after_transition();
        advanced
    }

    pub fn toggle_pause(&mut self) -> GamePhase {
        let phase = self.state.toggle_pause();
        self.after_transition();
        phase
    }

    /// Pointer moved to playfield x. Applied immediately while Running.
    pub fn pointer_moved(&mut self, x: f32) {
        if self.state.is_running() && self.autopilot.is_none() {
            self.state.paddle.move_to_pointer(x);
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.set_held(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.set_held(key, false);
    }

    fn set_held(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.held_left = held,
            Key::Right => self.held_right = held,
        }
    }

    /// Enable the AI with the given seed, or hand control back with None
    pub fn set_autopilot(&mut self, seed: Option<u64>) {
        self.autopilot = seed.map(Autopilot::new);
        log::info!("Autopilot {}", if self.autopilot.is_some() { "on" } else { "off" });
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.is_some()
    }

    /// Intent snapshot for the coming tick
    fn input_snapshot(&mut self) -> TickInput {
        match self.autopilot.as_mut() {
            Some(pilot) => TickInput {
                pointer_x: pilot.pointer_target(&self.state),
                ..Default::default()
            },
            None => TickInput {
                pointer_x: None,
                move_left: self.held_left,
                move_right: self.held_right,
            },
        }
    }

    /// One scheduled callback: tick, draw, report, and maybe ask for another
    pub fn frame(&mut self) {
        self.scheduler.on_fired();
        if !self.state.is_running() {
            return;
        }

        let input = self.input_snapshot();
        tick(&mut self.state, &input);

        let vertices = build_frame(&self.state, &self.options);
        self.target.present(&vertices);
        self.flush_events();

        if self.state.is_running() {
            self.scheduler.request_frame();
        }
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            self.presenter.on_event(event);
        }
    }

    /// Keep scheduling in step with the phase
    fn after_transition(&mut self) {
        self.flush_events();
        let pending = self.scheduler.is_pending();
        if self.state.is_running() && !pending {
            self.scheduler.request_frame();
        } else if !self.state.is_running() && pending {
            self.scheduler.cancel();
        }
    }
}
