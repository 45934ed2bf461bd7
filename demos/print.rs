//! Hilbert curves in your terminal!
//!
//! Draws the curve at a few levels with box-drawing characters, checks that
//! every level round-trips through the encoders, and lists the points of a
//! small curve along with their re-encoded indices.

use hilbert_2d::{hilbert, Coordinates2D, InvalidArgument, Level};

// Display the Hilbert curve of a certain level
fn print_hilbert(level: Level) {
    // Print header
    println!("--- At level {} ---\n", level.get());

    // Compute a Hilbert curve's coordinates
    let coord_range = level.side_length() as usize;
    let coordinates = hilbert::generate(level);
    let num_points = coordinates.len();
    if num_points < 2 {
        println!("·\n");
        return;
    }

    // Set up a 2D character-based display
    let mut display = (0..(num_points + coord_range))
        .map(|idx| {
            if idx % (coord_range + 1) == coord_range {
                '\n'
            } else {
                // This character is a placeholder that should not persist in
                // the final program output.
                '@'
            }
        })
        .collect::<Vec<_>>();
    let to_index = |coords: Coordinates2D| {
        assert!(
            coords.iter().all(|&coord| (coord as usize) < coord_range),
            "Coordinates out of range: {coords:?} for range {coord_range}"
        );
        (coords[1] as usize) * (coord_range + 1) + (coords[0] as usize)
    };
    let to_dir = |src: Coordinates2D, dst: Coordinates2D| {
        [
            dst[0] as isize - src[0] as isize,
            dst[1] as isize - src[1] as isize,
        ]
    };

    // Draw the start of the curve
    let start = coordinates[0];
    let next = coordinates[1];
    display[to_index(start)] = match to_dir(start, next) {
        [0, -1] => '┴',
        [1, 0] => '├',
        [0, 1] => '┬',
        [-1, 0] => '┤',
        _ => unreachable!("Hilbert curve moves by single-coordinate steps"),
    };

    // Draw the end of the curve
    let end = coordinates[num_points - 1];
    let prev = coordinates[num_points - 2];
    display[to_index(end)] = match to_dir(prev, end) {
        [0, -1] => '^',
        [1, 0] => '>',
        [0, 1] => 'v',
        [-1, 0] => '<',
        _ => unreachable!("Hilbert curve moves by single-coordinate steps"),
    };

    // Draw the middle of the curve
    for window in coordinates.windows(3) {
        let path = match (to_dir(window[0], window[1]), to_dir(window[1], window[2])) {
            ([-1, 0], [0, -1]) | ([0, 1], [1, 0]) => '└',
            ([-1, 0], [0, 1]) | ([0, -1], [1, 0]) => '┌',
            ([1, 0], [1, 0]) | ([-1, 0], [-1, 0]) => '─',
            ([1, 0], [0, -1]) | ([0, 1], [-1, 0]) => '┘',
            ([0, 1], [0, 1]) | ([0, -1], [0, -1]) => '│',
            ([1, 0], [0, 1]) | ([0, -1], [-1, 0]) => '┐',
            _ => unreachable!("Hilbert curve moves by single-coordinate steps and doesn't go back"),
        };
        display[to_index(window[1])] = path;
    }

    // Display the curve
    let display_string = display.into_iter().collect::<String>();
    println!("{display_string}");
}

// Check that a level's curve re-encodes to its own indices
fn check_hilbert(level: Level) {
    print!("Testing level {} ({} points)... ", level.get(), level.num_points());
    match hilbert::first_mismatch(level) {
        None => println!("passed"),
        Some(idx) => println!("failed at point {idx}"),
    }
}

// List the points of a small curve with their re-encoded indices
fn list_hilbert(level: Level) -> Result<(), InvalidArgument> {
    println!("\n--- Points at level {} ---\n", level.get());
    for coords in hilbert::iter_2d(level) {
        let idx = hilbert::encode_2d(level, coords)?;
        println!("{idx:>3} <-> {coords:?}");
    }
    Ok(())
}

// Display the Hilbert curve at a few levels
fn main() -> Result<(), InvalidArgument> {
    println!();
    for level in 0..=6 {
        print_hilbert(Level::new(level)?);
    }
    for level in 0..=10 {
        check_hilbert(Level::new(level)?);
    }
    list_hilbert(Level::new(2)?)
}
