//! Movement modes: the gear a racer runs in.
//!
//! A mode scales both speed and stamina drain.  Walking costs no stamina at
//! all, which is what racers fall back to when their tank runs dry.

/// How hard a racer is pushing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementMode {
    Walk,
    Pace,
    Jog,
    Run,
    Sprint,
}

impl MovementMode {
    /// All modes, slowest first.
    pub const ALL: [MovementMode; 5] = [
        MovementMode::Walk,
        MovementMode::Pace,
        MovementMode::Jog,
        MovementMode::Run,
        MovementMode::Sprint,
    ];

    /// Multiplier applied to the mover's surface speed.
    #[inline]
    pub fn speed_modifier(self) -> f32 {
        match self {
            MovementMode::Walk => 0.5,
            MovementMode::Pace => 0.7,
            MovementMode::Jog => 1.0,
            MovementMode::Run => 1.5,
            MovementMode::Sprint => 3.0,
        }
    }

    /// Multiplier applied to the base stamina drain.  Walking is free.
    #[inline]
    pub fn stamina_modifier(self) -> f32 {
        match self {
            MovementMode::Walk => 0.0,
            MovementMode::Pace => 0.7,
            MovementMode::Jog => 1.0,
            MovementMode::Run => 2.0,
            MovementMode::Sprint => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementMode::Walk => "walk",
            MovementMode::Pace => "pace",
            MovementMode::Jog => "jog",
            MovementMode::Run => "run",
            MovementMode::Sprint => "sprint",
        }
    }
}

impl std::fmt::Display for MovementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
