//! Timer and idle bookkeeping.
//!
//! The engine owns no threads and no clocks. The host calls `tick()` on a fixed period while
//! ticking is armed and `idle()` while idle work is armed; this module decides what each call
//! should do.

/// Idle styling disabled; styling happens on demand.
pub const SC_IDLESTYLING_NONE: isize = 0;
/// Style the visible part eagerly, the rest in idle time.
pub const SC_IDLESTYLING_TOVISIBLE: isize = 1;
/// Style text after the visible part in idle time.
pub const SC_IDLESTYLING_AFTERVISIBLE: isize = 2;
/// Style the whole document in idle time.
pub const SC_IDLESTYLING_ALL: isize = 3;

/// Milliseconds that pass per host tick.
pub const TICK_MS: u32 = 100;

/// Idle styling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdleStyling {
    /// No background styling.
    #[default]
    None,
    /// Up to the visible text.
    ToVisible,
    /// After the visible text.
    AfterVisible,
    /// The whole document.
    All,
}

impl IdleStyling {
    /// Decode `SC_IDLESTYLING_*`; unknown values disable idle styling.
    pub fn from_code(code: isize) -> Self {
        match code {
            SC_IDLESTYLING_TOVISIBLE => Self::ToVisible,
            SC_IDLESTYLING_AFTERVISIBLE => Self::AfterVisible,
            SC_IDLESTYLING_ALL => Self::All,
            _ => Self::None,
        }
    }

    /// `SC_IDLESTYLING_*` value.
    pub fn code(self) -> isize {
        match self {
            Self::None => SC_IDLESTYLING_NONE,
            Self::ToVisible => SC_IDLESTYLING_TOVISIBLE,
            Self::AfterVisible => SC_IDLESTYLING_AFTERVISIBLE,
            Self::All => SC_IDLESTYLING_ALL,
        }
    }
}

/// Resumable styling queue.
///
/// The queue has no storage of its own: the document's end-styled position is the resume
/// point, so an edit that lowers it restarts work at the edit.
#[derive(Debug, Clone, Default)]
pub struct IdleStyler {
    mode: IdleStyling,
    armed: bool,
}

impl IdleStyler {
    /// Queue in `mode`.
    pub fn new(mode: IdleStyling) -> Self {
        Self { mode, armed: false }
    }

    /// Current mode.
    pub fn mode(&self) -> IdleStyling {
        self.mode
    }

    /// Change the mode.
    pub fn set_mode(&mut self, mode: IdleStyling) {
        self.mode = mode;
    }

    /// Whether the host was asked for idle calls.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Record that idle calls were requested or cancelled. Returns `true` on a change.
    pub fn set_armed(&mut self, armed: bool) -> bool {
        let changed = self.armed != armed;
        self.armed = armed;
        changed
    }

    /// Returns `true` while unstyled text remains and idle styling is on.
    pub fn has_work(&self, end_styled: usize, len: usize) -> bool {
        self.mode != IdleStyling::None && end_styled < len
    }

    /// Next range to style within `budget` characters.
    pub fn next_chunk(&self, end_styled: usize, len: usize, budget: usize) -> Option<(usize, usize)> {
        if !self.has_work(end_styled, len) {
            return None;
        }
        Some((end_styled, end_styled.saturating_add(budget.max(1)).min(len)))
    }
}

/// Caret blink and dwell timers, advanced by host ticks.
#[derive(Debug, Clone)]
pub struct Timers {
    caret_period: u32,
    caret_elapsed: u32,
    caret_on: bool,
    dwell_time: u32,
    dwell_elapsed: u32,
    pointer: Option<(i32, i32, usize)>,
    dwelling: bool,
}

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The caret blinked.
    pub caret_toggled: bool,
    /// The pointer rested long enough: `(x, y, position)`.
    pub dwell_start: Option<(i32, i32, usize)>,
}

impl Timers {
    /// Timers with the given periods in milliseconds.
    pub fn new(caret_period: u32, dwell_time: u32) -> Self {
        Self {
            caret_period,
            caret_elapsed: 0,
            caret_on: true,
            dwell_time,
            dwell_elapsed: 0,
            pointer: None,
            dwelling: false,
        }
    }

    /// Caret blink period.
    pub fn caret_period(&self) -> u32 {
        self.caret_period
    }

    /// Change the caret blink period; the caret is shown.
    pub fn set_caret_period(&mut self, period: u32) {
        self.caret_period = period;
        self.caret_elapsed = 0;
        self.caret_on = true;
    }

    /// Dwell delay.
    pub fn dwell_time(&self) -> u32 {
        self.dwell_time
    }

    /// Change the dwell delay.
    pub fn set_dwell_time(&mut self, time: u32) {
        self.dwell_time = time;
        self.dwell_elapsed = 0;
    }

    /// Whether the caret is in its visible phase.
    pub fn caret_on(&self) -> bool {
        self.caret_on
    }

    /// Show the caret and restart its blink cycle.
    pub fn reset_caret(&mut self) {
        self.caret_on = true;
        self.caret_elapsed = 0;
    }

    /// Returns `true` while anything needs ticks.
    pub fn wants_ticks(&self) -> bool {
        self.caret_period > 0 || (self.dwell_time > 0 && self.pointer.is_some())
    }

    /// The pointer moved to `(x, y)` over `position`. Returns `true` when a dwell ended.
    pub fn pointer_moved(&mut self, x: i32, y: i32, position: usize) -> bool {
        let ended = self.dwelling;
        self.dwelling = false;
        self.dwell_elapsed = 0;
        self.pointer = Some((x, y, position));
        ended
    }

    /// The pointer left. Returns `true` when a dwell ended.
    pub fn pointer_left(&mut self) -> bool {
        let ended = self.dwelling;
        self.dwelling = false;
        self.dwell_elapsed = 0;
        self.pointer = None;
        ended
    }

    /// Advance by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.caret_period > 0 {
            self.caret_elapsed += TICK_MS;
            if self.caret_elapsed >= self.caret_period {
                self.caret_elapsed = 0;
                self.caret_on = !self.caret_on;
                outcome.caret_toggled = true;
            }
        }
        if self.dwell_time > 0
            && !self.dwelling
            && let Some(pointer) = self.pointer
        {
            self.dwell_elapsed += TICK_MS;
            if self.dwell_elapsed >= self.dwell_time {
                self.dwelling = true;
                outcome.dwell_start = Some(pointer);
            }
        }
        outcome
    }
}
