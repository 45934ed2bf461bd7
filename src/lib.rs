//! Mapping between 2D grid coordinates and distance along a Hilbert curve
//!
//! A Hilbert curve of a given [`Level`] `k` visits every point of a
//! `2^k x 2^k` grid exactly once, always moving from one point to one of its
//! direct neighbors. This crate computes the position of a point along that
//! curve ([`hilbert::encode_2d`]), the point at a given position
//! ([`hilbert::decode_2d`]), and the full sequence of visited points
//! ([`hilbert::generate`]).
//!
//! ```
//! use hilbert_2d::{hilbert, Level};
//!
//! let level = Level::new(3)?;
//! let distance = hilbert::encode_2d(level, [5, 2])?;
//! assert_eq!(hilbert::decode_2d(level, distance)?, [5, 2]);
//! # Ok::<(), hilbert_2d::InvalidArgument>(())
//! ```

mod bits;
mod error;
pub mod hilbert;

pub use error::InvalidArgument;

/// Integer type suitable for counting number of bits
///
/// Although 32-bit is very much overkill for this purpose, I am using this type
/// for interface compatibility with standard Rust integer methods.
///
pub type NumBits = u32;

/// Index of a point on a space-filling curve
///
/// Must hold twice as many bits as [`Coordinate`], since each level of the
/// curve consumes one bit of each coordinate.
///
pub type CurveIdx = u64;

/// Coordinate of a point on a space-filling curve
pub type Coordinate = u32;

/// Coordinates of a 2D point on a space-filling curve (in x, y order)
pub type Coordinates2D = [Coordinate; 2];

/// Resolution of a Hilbert curve
///
/// A curve of level `k` covers a square grid of side length `2^k`, so its
/// points have coordinates in `0..2^k` and its indices lie in `0..2^(2k)`.
///
/// Levels are validated on construction, which means that every `Level` is
/// small enough for its coordinates to fit in a [`Coordinate`] and its
/// indices to fit in a [`CurveIdx`].
///
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Level(NumBits);

impl Level {
    /// Highest supported level
    pub const MAX: Level = Level(bits::num_bits::<Coordinate>());

    /// Build a level, checking that it is supported
    pub const fn new(level: NumBits) -> Result<Self, InvalidArgument> {
        if level <= Self::MAX.0 {
            Ok(Self(level))
        } else {
            Err(InvalidArgument::LevelTooHigh { level })
        }
    }

    /// Find the level whose grid has a certain side length
    ///
    /// This is the entry point for callers which think in terms of grid size
    /// rather than curve resolution. `side_length` must be a power of two.
    ///
    pub const fn from_side_length(side_length: u64) -> Result<Self, InvalidArgument> {
        if !side_length.is_power_of_two() {
            return Err(InvalidArgument::SideLengthNotPowerOfTwo { side_length });
        }
        Self::new(side_length.trailing_zeros())
    }

    /// Number of bits of each coordinate at this level
    pub const fn get(self) -> NumBits {
        self.0
    }

    /// Side length of the square grid covered by the curve
    pub const fn side_length(self) -> u64 {
        1 << self.0
    }

    /// Number of points on the curve (side length squared)
    pub const fn num_points(self) -> u128 {
        1 << (2 * self.0)
    }

    /// Largest valid coordinate at this level
    pub const fn max_coordinate(self) -> Coordinate {
        bits::low_order_mask(self.0) as _
    }

    /// Largest valid curve index at this level
    pub const fn max_idx(self) -> CurveIdx {
        bits::low_order_mask(2 * self.0)
    }
}

impl TryFrom<NumBits> for Level {
    type Error = InvalidArgument;

    fn try_from(level: NumBits) -> Result<Self, InvalidArgument> {
        Self::new(level)
    }
}

impl From<Level> for NumBits {
    fn from(level: Level) -> NumBits {
        level.0
    }
}
