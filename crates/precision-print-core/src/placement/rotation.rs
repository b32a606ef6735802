//! Quarter-turn rotation.
//!
//! The rotate control only ever steps by 90 degrees, so rotation is stored as
//! one of four discrete states rather than a free angle. Positive angles are
//! clockwise on screen, matching CSS `rotate()` in a y-down coordinate system.

use serde::{Deserialize, Serialize};

/// One of the four reachable rotation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum QuarterTurn {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl QuarterTurn {
    /// All states in clockwise order starting from upright.
    pub const ALL: [QuarterTurn; 4] = [
        QuarterTurn::Deg0,
        QuarterTurn::Deg90,
        QuarterTurn::Deg180,
        QuarterTurn::Deg270,
    ];

    /// Reduce an arbitrary integer angle to a quarter turn.
    ///
    /// The angle is wrapped into `0..360` first, then snapped down to the
    /// nearest multiple of 90.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) / 90 {
            0 => QuarterTurn::Deg0,
            1 => QuarterTurn::Deg90,
            2 => QuarterTurn::Deg180,
            _ => QuarterTurn::Deg270,
        }
    }

    /// The angle in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> i32 {
        match self {
            QuarterTurn::Deg0 => 0,
            QuarterTurn::Deg90 => 90,
            QuarterTurn::Deg180 => 180,
            QuarterTurn::Deg270 => 270,
        }
    }

    /// The angle in radians, for building affine transforms.
    pub fn radians(self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// The next state after one activation of the rotate control (+90°, mod 360).
    pub fn clockwise(self) -> Self {
        Self::from_degrees(self.degrees() + 90)
    }

    /// True when the rotation swaps the image's width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurn::Deg90 | QuarterTurn::Deg270)
    }
}

impl From<i32> for QuarterTurn {
    fn from(degrees: i32) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<QuarterTurn> for i32 {
    fn from(turn: QuarterTurn) -> Self {
        turn.degrees()
    }
}
