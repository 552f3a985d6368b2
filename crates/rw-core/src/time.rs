//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter at a
//! fixed rate (default 60 ticks/second).  All simulation state changes happen
//! on tick boundaries; the only sub-tick quantity in the system is the
//! leftover fraction reported when a mover arrives mid-tick, which exists so
//! finish times stay accurate at any tick rate.
//!
//! `FrameDriver` maps irregular real frame times onto whole ticks with an
//! accumulator.  Two guards keep a slow frame from snowballing: elapsed time
//! is clamped per frame, and the number of ticks run per frame is capped with
//! any surplus backlog discarded.  The simulation slows down under sustained
//! load instead of entering a death spiral.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 60 ticks/second a u64 lasts ~9.7
/// billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Fixed-rate tick counter with conversions to seconds.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickClock {
    /// Simulation rate.  60 is the stock rate; anything positive works.
    pub ticks_per_second: u32,
    /// The current tick — advanced by `TickClock::advance()` each step.
    pub current: Tick,
}

impl TickClock {
    /// # Panics
    /// Panics if `ticks_per_second` is zero.
    pub fn new(ticks_per_second: u32) -> Self {
        assert!(ticks_per_second > 0, "tick rate must be positive");
        Self {
            ticks_per_second,
            current: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current = Tick(self.current.0 + 1);
    }

    /// Duration of one tick in seconds.
    #[inline]
    pub fn tick_delta_secs(&self) -> f32 {
        1.0 / self.ticks_per_second as f32
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current.0 as f64 / self.ticks_per_second as f64
    }

    /// Seconds spanned by a (possibly fractional) tick count.  Used to turn
    /// sub-tick arrival stamps into finish times.
    #[inline]
    pub fn secs_for_ticks(&self, ticks: f64) -> f64 {
        ticks / self.ticks_per_second as f64
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={:.3}s)", self.current, self.elapsed_secs())
    }
}

// ── FrameDriver ───────────────────────────────────────────────────────────────

/// Accumulator-based frame pacing: converts real frame durations into a whole
/// number of simulation ticks to run.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    tick_delta_secs: f32,
    accumulator:     f32,
    /// Time-scale multiplier; 0 pauses, 2.0 runs double speed.
    pub sim_speed: f32,
    /// Upper bound on real elapsed seconds counted per frame.
    pub max_frame_secs: f32,
    /// Upper bound on ticks run per frame; surplus backlog is discarded.
    pub max_ticks_per_frame: u32,
}

impl FrameDriver {
    /// # Panics
    /// Panics if `ticks_per_second` is zero.
    pub fn new(ticks_per_second: u32) -> Self {
        assert!(ticks_per_second > 0, "tick rate must be positive");
        Self {
            tick_delta_secs: 1.0 / ticks_per_second as f32,
            accumulator: 0.0,
            sim_speed: 1.0,
            max_frame_secs: 0.25,
            max_ticks_per_frame: 30,
        }
    }

    /// Feed one frame's real duration; returns how many ticks to run now.
    pub fn begin_frame(&mut self, real_dt_secs: f32) -> u32 {
        let dt = real_dt_secs.clamp(0.0, self.max_frame_secs) * self.sim_speed;
        self.accumulator += dt;

        let ticks = (self.accumulator / self.tick_delta_secs) as u32;
        if ticks > self.max_ticks_per_frame {
            // Too far behind to ever catch up — drop the backlog entirely.
            self.accumulator = 0.0;
            return self.max_ticks_per_frame;
        }
        self.accumulator -= ticks as f32 * self.tick_delta_secs;
        ticks
    }

    /// Fraction [0, 1) of the next tick already accumulated — the blend
    /// factor for render-time interpolation between tick states.
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.tick_delta_secs).clamp(0.0, 1.0)
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Render a duration as `m:ss.mmm` (or `h:mm:ss.mmm` past an hour).
pub fn format_secs(total_secs: f64) -> String {
    let millis = (total_secs.max(0.0) * 1000.0).round() as u64;
    let h = millis / 3_600_000;
    let m = (millis % 3_600_000) / 60_000;
    let s = (millis % 60_000) / 1_000;
    let ms = millis % 1_000;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}.{ms:03}")
    } else {
        format!("{m}:{s:02}.{ms:03}")
    }
}
