//! Utilities related to the Hilbert space-filling curve

use crate::{bits, Coordinate, Coordinates2D, CurveIdx, InvalidArgument, Level};

/// Reflect and/or transpose a point of a sub-square of the curve
///
/// This is the one geometrical rule behind the Hilbert curve. When moving
/// between a square and one of its four quadrants, points of the lower-left
/// quadrant are transposed, points of the lower-right quadrant are reflected
/// across both axes and then transposed, and points of the upper quadrants
/// are left alone. The transform is its own inverse, which is why encoding and
/// decoding can share it.
///
/// `coords` must lie within the `sub_size x sub_size` square, and `rx`/`ry`
/// are the 0/1 quadrant bits.
///
#[inline(always)]
const fn rotate(
    sub_size: CurveIdx,
    coords: [CurveIdx; 2],
    rx: CurveIdx,
    ry: CurveIdx,
) -> [CurveIdx; 2] {
    debug_assert!(coords[0] < sub_size && coords[1] < sub_size);
    if ry != 0 {
        return coords;
    }
    let [mut x, mut y] = coords;
    if rx != 0 {
        x = sub_size - 1 - x;
        y = sub_size - 1 - y;
    }
    [y, x]
}

/// Compute the index of a point on the Hilbert curve of a certain level
///
/// The curve starts at (0, 0), ends at (2^level - 1, 0), and never jumps: the
/// points at consecutive indices are always direct neighbors. Its orientation
/// alternates with the level. Here are levels 2 and 3 (y axis pointing down):
///
/// ```text
/// ├┐┌>    ┬┌─┐┌─┐^
/// ┌┘└┐    └┘┌┘└┐└┘
/// │┌┐│    ┌┐└┐┌┘┌┐
/// └┘└┘    │└─┘└─┘│
///         └┐┌──┐┌┘
///         ┌┘└┐┌┘└┐
///         │┌┐││┌┐│
///         └┘└┘└┘└┘
/// ```
///
/// Fails if either coordinate is outside of the `2^level x 2^level` grid.
///
#[inline]
pub const fn encode_2d(level: Level, coords: Coordinates2D) -> Result<CurveIdx, InvalidArgument> {
    if let Err(e) = check_coords(level, coords) {
        return Err(e);
    }
    Ok(encode_2d_unchecked(level, coords))
}

/// Iterative Hilbert encoding, from the coarsest quadrant to the finest
const fn encode_2d_unchecked(level: Level, coords: Coordinates2D) -> CurveIdx {
    let mut xy = [coords[0] as CurveIdx, coords[1] as CurveIdx];
    let mut idx = 0;
    let mut sub_size = level.side_length() / 2;
    while sub_size > 0 {
        // Peel off the most significant bit pair, which selects a quadrant.
        // Quadrants are visited in (rx, ry) order 00, 01, 11, 10, and each
        // one holds sub_size² points of the curve.
        let rx = bits::masked_bit(xy[0], sub_size);
        let ry = bits::masked_bit(xy[1], sub_size);
        idx += sub_size * sub_size * ((3 * rx) ^ ry);

        // Move to the quadrant's own frame of reference for the next level
        let low_bits = sub_size - 1;
        xy = rotate(sub_size, [xy[0] & low_bits, xy[1] & low_bits], rx, ry);
        sub_size /= 2;
    }
    idx
}

/// Curve quadrant and next state, by state and (x_bit << 1 | y_bit)
///
/// States track the orientation of the current sub-square: 0 is the
/// orientation of the whole curve, 1 is transposed, 2 is reflected across
/// both axes then transposed, 3 is reflected across both axes.
///
const TRANSITIONS: [[(u8, u8); 4]; 4] = [
    [(0, 3), (1, 0), (3, 1), (2, 0)],
    [(2, 1), (1, 1), (3, 0), (0, 2)],
    [(2, 2), (3, 3), (1, 2), (0, 1)],
    [(0, 0), (3, 2), (1, 3), (2, 3)],
];

/// Compute the index of a point on the Hilbert curve using a state table
///
/// Produces the same results as [`encode_2d()`], but instead of transforming
/// the coordinates at every level, it tracks the orientation of the current
/// sub-square with a 4-state automaton and emits two index bits per level.
///
#[inline]
pub const fn encode_2d_by_table(
    level: Level,
    coords: Coordinates2D,
) -> Result<CurveIdx, InvalidArgument> {
    if let Err(e) = check_coords(level, coords) {
        return Err(e);
    }
    let mut state = 0;
    let mut idx: CurveIdx = 0;
    let mut bit_idx = level.get();
    while bit_idx > 0 {
        bit_idx -= 1;
        let x_bit = (coords[0] >> bit_idx) & 1;
        let y_bit = (coords[1] >> bit_idx) & 1;
        let (quadrant, next_state) = TRANSITIONS[state][((x_bit << 1) | y_bit) as usize];
        idx = (idx << 2) | quadrant as CurveIdx;
        state = next_state as usize;
    }
    Ok(idx)
}

/// Compute the coordinates of the i-th point of the Hilbert curve of a level
///
/// This is the inverse of [`encode_2d()`]. Fails if `idx` is past the end of
/// the curve, which has `2^(2 * level)` points.
///
#[inline]
pub const fn decode_2d(level: Level, idx: CurveIdx) -> Result<Coordinates2D, InvalidArgument> {
    if idx > level.max_idx() {
        return Err(InvalidArgument::DistanceOutOfRange {
            level,
            distance: idx,
        });
    }
    Ok(decode_2d_unchecked(level, idx))
}

/// Iterative Hilbert decoding, from the finest quadrant to the coarsest
const fn decode_2d_unchecked(level: Level, idx: CurveIdx) -> Coordinates2D {
    let mut xy = [0, 0];
    let mut remaining = idx;
    let mut sub_size = 1;
    while sub_size < level.side_length() {
        // Each pair of index bits selects a quadrant, in the visiting order
        // that encode_2d uses: 00, 01, 11, 10.
        let rx = 1 & (remaining >> 1);
        let ry = 1 & (remaining ^ rx);
        xy = rotate(sub_size, xy, rx, ry);
        xy[0] += sub_size * rx;
        xy[1] += sub_size * ry;
        remaining >>= 2;
        sub_size *= 2;
    }
    debug_assert!(
        xy[0] <= Coordinate::MAX as CurveIdx && xy[1] <= Coordinate::MAX as CurveIdx,
        "Decoded coordinates should fit in a Coordinate"
    );
    [xy[0] as _, xy[1] as _]
}

/// Check that a point lies within the grid of a certain level
const fn check_coords(level: Level, coords: Coordinates2D) -> Result<(), InvalidArgument> {
    let max = level.max_coordinate();
    if coords[0] > max || coords[1] > max {
        Err(InvalidArgument::CoordinateOutOfRange { level, coords })
    } else {
        Ok(())
    }
}

/// Compute the coordinates of every point of the Hilbert curve of a level
///
/// Points are listed in curve order, so `generate(level)[idx]` is
/// `decode_2d(level, idx)`. The result has `2^(2 * level)` elements, which is
/// only reasonable to materialize for small levels. Use [`iter_2d()`] to walk
/// larger curves lazily.
///
pub fn generate(level: Level) -> Vec<Coordinates2D> {
    iter_range(level, 0).collect()
}

/// Iterate over the Hilbert curve of a certain level
///
/// This is equivalent to running `decode_2d()` on the sequence of all curve
/// indices (0..=level.max_idx()).
///
pub fn iter_2d(level: Level) -> impl Iterator<Item = Coordinates2D> {
    iter_range(level, 0)
}

/// Iterate over the Hilbert curve of a certain level, starting from an index
///
/// This is equivalent to running `decode_2d()` on the sequence of curve
/// indices (start..=level.max_idx()). Fails if `start` is past the end of the
/// curve.
///
pub fn iter_from_2d(
    level: Level,
    start: CurveIdx,
) -> Result<impl Iterator<Item = Coordinates2D>, InvalidArgument> {
    if start > level.max_idx() {
        return Err(InvalidArgument::DistanceOutOfRange {
            level,
            distance: start,
        });
    }
    Ok(iter_range(level, start))
}

fn iter_range(level: Level, start: CurveIdx) -> impl Iterator<Item = Coordinates2D> {
    debug_assert!(start <= level.max_idx());
    (start..=level.max_idx()).map(move |idx| decode_2d_unchecked(level, idx))
}

/// Check that the curve of a certain level round-trips through the encoders
///
/// Every point produced by [`iter_2d()`] is re-encoded with both
/// [`encode_2d()`] and [`encode_2d_by_table()`]. Returns the first curve index
/// for which either encoder disagrees, or `None` if the whole curve is
/// consistent.
///
pub fn first_mismatch(level: Level) -> Option<CurveIdx> {
    iter_2d(level)
        .zip(0..=level.max_idx())
        .find(|&(coords, idx)| {
            encode_2d(level, coords) != Ok(idx) || encode_2d_by_table(level, coords) != Ok(idx)
        })
        .map(|(_coords, idx)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NumBits;
    use quickcheck::quickcheck;
    use std::collections::HashSet;

    fn level(level: NumBits) -> Level {
        Level::new(level).unwrap()
    }

    // Recursive construction of the curve: the curve of level k is made of
    // four copies of the curve of level k-1, transposed in the lower-left
    // quadrant and reflected-then-transposed in the lower-right one.
    fn reference_decode(level: NumBits, idx: CurveIdx) -> Coordinates2D {
        if level == 0 {
            return [0, 0];
        }
        let sub_level = level - 1;
        let half = 1 << sub_level;
        let quadrant = idx >> (2 * sub_level);
        let [a, b] = reference_decode(sub_level, idx & bits::low_order_mask(2 * sub_level));
        match quadrant {
            0 => [b, a],
            1 => [a, b + half],
            2 => [a + half, b + half],
            3 => [2 * half - 1 - b, half - 1 - a],
            _ => unreachable!("Index {} is past the end of the level {} curve", idx, level),
        }
    }

    #[test]
    fn rotate() {
        // Upper quadrants are left alone
        assert_eq!(super::rotate(4, [1, 3], 0, 1), [1, 3]);
        assert_eq!(super::rotate(4, [1, 3], 1, 1), [1, 3]);
        // Lower-left quadrant is transposed
        assert_eq!(super::rotate(4, [1, 3], 0, 0), [3, 1]);
        // Lower-right quadrant is reflected, then transposed
        assert_eq!(super::rotate(4, [1, 3], 1, 0), [0, 2]);
        assert_eq!(super::rotate(1, [0, 0], 1, 0), [0, 0]);
        // The transform is an involution
        for sub_size in [1, 2, 4, 8] {
            for x in 0..sub_size {
                for y in 0..sub_size {
                    for (rx, ry) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                        let once = super::rotate(sub_size, [x, y], rx, ry);
                        assert_eq!(super::rotate(sub_size, once, rx, ry), [x, y]);
                    }
                }
            }
        }
    }

    #[test]
    fn level_zero() {
        let zero = level(0);
        assert_eq!(super::decode_2d(zero, 0), Ok([0, 0]));
        assert_eq!(super::encode_2d(zero, [0, 0]), Ok(0));
        assert_eq!(encode_2d_by_table(zero, [0, 0]), Ok(0));
        assert_eq!(generate(zero), vec![[0, 0]]);
    }

    #[test]
    fn first_levels() {
        assert_eq!(generate(level(1)), vec![[0, 0], [0, 1], [1, 1], [1, 0]]);
        let level_2 = [
            [0, 0],
            [1, 0],
            [1, 1],
            [0, 1],
            [0, 2],
            [0, 3],
            [1, 3],
            [1, 2],
            [2, 2],
            [2, 3],
            [3, 3],
            [3, 2],
            [3, 1],
            [2, 1],
            [2, 0],
            [3, 0],
        ];
        for (idx, &coords) in level_2.iter().enumerate() {
            assert_eq!(super::decode_2d(level(2), idx as CurveIdx), Ok(coords));
            assert_eq!(super::encode_2d(level(2), coords), Ok(idx as CurveIdx));
        }
        assert_eq!(generate(level(2)), level_2);
    }

    #[test]
    fn generate_reencodes_in_order() {
        let level = level(2);
        let indices = generate(level)
            .into_iter()
            .map(|coords| super::encode_2d(level, coords).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(indices, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn decode_2d() {
        for level in 0..=6 {
            for idx in 0..=self::level(level).max_idx() {
                assert_eq!(
                    super::decode_2d(self::level(level), idx),
                    Ok(reference_decode(level, idx)),
                    "Unexpected level {} Hilbert decoding result for index {:012b}",
                    level,
                    idx
                );
            }
        }
    }

    #[test]
    fn encode_2d() {
        for level in 0..=6 {
            for idx in 0..=self::level(level).max_idx() {
                let coords = reference_decode(level, idx);
                assert_eq!(
                    super::encode_2d(self::level(level), coords),
                    Ok(idx),
                    "Unexpected level {} Hilbert encoding result for {:?}",
                    level,
                    coords
                );
            }
        }
    }

    #[test]
    fn coverage_and_locality() {
        for level in 1..=7 {
            let level = self::level(level);
            let points = generate(level);
            assert_eq!(points.len() as u128, level.num_points());

            let max = level.max_coordinate();
            assert!(points.iter().all(|&[x, y]| x <= max && y <= max));
            assert_eq!(points.iter().collect::<HashSet<_>>().len(), points.len());

            assert_eq!(points.first(), Some(&[0, 0]));
            assert_eq!(points.last(), Some(&[max, 0]));
            for pair in points.windows(2) {
                let [[x1, y1], [x2, y2]] = [pair[0], pair[1]];
                assert_eq!(
                    x1.abs_diff(x2) + y1.abs_diff(y2),
                    1,
                    "Level {:?} curve jumps from {:?} to {:?}",
                    level,
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn out_of_range() {
        let level = level(3);
        for coords in [[8, 0], [0, 8], [8, 8], [Coordinate::MAX, 2]] {
            let expected = Err(InvalidArgument::CoordinateOutOfRange { level, coords });
            assert_eq!(super::encode_2d(level, coords), expected);
            assert_eq!(encode_2d_by_table(level, coords), expected);
        }
        for distance in [64, 65, CurveIdx::MAX] {
            assert_eq!(
                super::decode_2d(level, distance),
                Err(InvalidArgument::DistanceOutOfRange { level, distance })
            );
            assert!(iter_from_2d(level, distance).is_err());
        }
        assert_eq!(
            super::encode_2d(self::level(0), [1, 0]),
            Err(InvalidArgument::CoordinateOutOfRange {
                level: self::level(0),
                coords: [1, 0]
            })
        );
    }

    #[test]
    fn highest_level() {
        let level = Level::MAX;
        let corners = [
            (0, [0, 0]),
            (CurveIdx::MAX, [Coordinate::MAX, 0]),
            (1 << 62, [0, 1 << 31]),
        ];
        for (idx, coords) in corners {
            assert_eq!(super::decode_2d(level, idx), Ok(coords));
            assert_eq!(super::encode_2d(level, coords), Ok(idx));
            assert_eq!(encode_2d_by_table(level, coords), Ok(idx));
        }
    }

    #[test]
    fn iterators() {
        let level = level(4);
        let all = generate(level);
        assert_eq!(iter_2d(level).collect::<Vec<_>>(), all);
        assert_eq!(iter_2d(level).size_hint(), (256, Some(256)));
        for start in [0, 1, 100, 255] {
            let tail = iter_from_2d(level, start).unwrap().collect::<Vec<_>>();
            assert_eq!(tail, &all[start as usize..]);
        }
    }

    #[test]
    fn first_mismatch() {
        for level in 0..=8 {
            assert_eq!(super::first_mismatch(self::level(level)), None);
        }
    }

    // This test really takes a long while to run in debug mode...
    #[test]
    #[ignore]
    fn exhaustive() {
        for level in 0..=12 {
            assert_eq!(super::first_mismatch(self::level(level)), None);
        }
    }

    // ...instead, random testing should be good enough for most purposes
    quickcheck! {
        fn encode_then_decode(level: u8, x: Coordinate, y: Coordinate) -> bool {
            let level = self::level(NumBits::from(level) % (Level::MAX.get() + 1));
            let max = level.max_coordinate();
            let coords = [x & max, y & max];
            let idx = super::encode_2d(level, coords).unwrap();
            encode_2d_by_table(level, coords) == Ok(idx)
                && super::decode_2d(level, idx) == Ok(coords)
        }

        fn decode_then_encode(level: u8, idx: CurveIdx) -> bool {
            let level = self::level(NumBits::from(level) % (Level::MAX.get() + 1));
            let idx = idx & level.max_idx();
            let coords = super::decode_2d(level, idx).unwrap();
            super::encode_2d(level, coords) == Ok(idx)
        }

        fn neighbors(level: u8, idx: CurveIdx) -> bool {
            let level = self::level(NumBits::from(level) % Level::MAX.get() + 1);
            let idx = idx & level.max_idx();
            if idx == level.max_idx() {
                return true;
            }
            let [x1, y1] = super::decode_2d(level, idx).unwrap();
            let [x2, y2] = super::decode_2d(level, idx + 1).unwrap();
            x1.abs_diff(x2) + y1.abs_diff(y2) == 1
        }
    }
}
