//! Input validation failures

use crate::{Coordinates2D, CurveIdx, Level, NumBits};
use core::fmt;

/// An input was outside of the domain of a Hilbert curve operation
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidArgument {
    /// Level is above [`Level::MAX`]
    LevelTooHigh { level: NumBits },

    /// Grid side length is not a power of two
    SideLengthNotPowerOfTwo { side_length: u64 },

    /// A coordinate does not fit in the grid of the requested level
    CoordinateOutOfRange { level: Level, coords: Coordinates2D },

    /// A curve index is past the end of the curve of the requested level
    DistanceOutOfRange { level: Level, distance: CurveIdx },
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelTooHigh { level } => write!(
                f,
                "curve level {} is above the maximum of {}",
                level,
                Level::MAX.get()
            ),
            Self::SideLengthNotPowerOfTwo { side_length } => {
                write!(f, "grid side length {} is not a power of two", side_length)
            }
            Self::CoordinateOutOfRange { level, coords } => write!(
                f,
                "coordinates {:?} are outside of the {}x{} grid of level {}",
                coords,
                level.side_length(),
                level.side_length(),
                level.get()
            ),
            Self::DistanceOutOfRange { level, distance } => write!(
                f,
                "curve index {} is outside of the {} points of level {}",
                distance,
                level.num_points(),
                level.get()
            ),
        }
    }
}

impl std::error::Error for InvalidArgument {}
