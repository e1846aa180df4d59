//! Board tests - cell addressing, frame protection, centred text

use proptest::prelude::*;

use tui_arcade::core::Board;
use tui_arcade::types::{Glyphs, Location, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

fn frame_snapshot(board: &Board) -> Vec<char> {
    // Title row, top border, side borders and bottom border.
    let stride = board.stride();
    let mut cells = Vec::new();
    for (y, row) in board.rows().enumerate() {
        let interior_row = y >= 2 && y < board.frame_height() - 1;
        if interior_row {
            cells.push(row[0]);
            cells.push(row[stride - 1]);
        } else {
            cells.extend_from_slice(row);
        }
    }
    cells
}

#[test]
fn test_board_new_has_clear_interior() {
    let board = Board::new(40, 15, " T ", Glyphs::default());
    assert_eq!(board.stride(), 42);
    assert_eq!(board.frame_height(), 18);
    for row in 0..15 {
        for col in 0..40 {
            assert!(board.is_clear(Location::new(row, col)), "({row}, {col})");
        }
    }
}

#[test]
fn test_board_frame_layout() {
    let board = Board::new(23, 6, " T ", Glyphs::default());
    let rows: Vec<String> = board.rows().map(|r| r.iter().collect()).collect();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[1], format!("+{}+", "-".repeat(23)));
    assert_eq!(rows[2], format!("|{}|", " ".repeat(23)));
    assert_eq!(rows[8], rows[1]);
    // Title centred over the interior: col 1 + 23/2 - 3/2 = 11.
    assert_eq!(rows[0].find(" T ").unwrap(), 11);
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::new(23, 6, "", Glyphs::default());
    for loc in [
        Location::new(-1, 0),
        Location::new(0, -1),
        Location::new(6, 0),
        Location::new(0, 23),
    ] {
        assert!(!board.paint_char(loc, '#'));
        assert_eq!(board.read_char(loc), None);
        assert!(!board.is_clear(loc));
    }
}

#[test]
fn test_clear_interior_is_idempotent() {
    let mut board = Board::new(30, 10, " X ", Glyphs::default());
    board.paint_char(Location::new(3, 3), '#');
    board.paint_char(Location::new(9, 29), '#');
    board.clear_interior();
    let once = board.clone();
    board.clear_interior();
    assert_eq!(board, once);
    assert_eq!(board, Board::new(30, 10, " X ", Glyphs::default()));
}

#[test]
fn test_centered_text() {
    let mut board = Board::new(40, 15, "", Glyphs::default());
    assert!(board.paint_centered_text(6, " GAME OVER "));
    let row: String = board.rows().nth(2 + 6).unwrap().iter().collect();
    // Start column 40/2 - 11/2 = 15, plus the left border.
    assert_eq!(row.find(" GAME OVER ").unwrap(), 16);

    assert!(!board.paint_centered_text(0, &"x".repeat(41)));
    assert!(!board.paint_centered_text(15, "late"));
    assert!(!board.paint_centered_text(-1, "early"));
}

fn board_dims() -> impl Strategy<Value = (u16, u16)> {
    (MIN_WIDTH..=MAX_WIDTH, MIN_HEIGHT..=MAX_HEIGHT)
}

proptest! {
    #[test]
    fn prop_write_then_read_returns_glyph((w, h) in board_dims(), row in 0u16..MAX_HEIGHT, col in 0u16..MAX_WIDTH, glyph in proptest::char::range('!', '~')) {
        let mut board = Board::new(w, h, "", Glyphs::default());
        let loc = Location::new((row % h) as i16, (col % w) as i16);
        let frame = frame_snapshot(&board);

        prop_assert!(board.paint_char(loc, glyph));
        prop_assert_eq!(board.read_char(loc), Some(glyph));
        prop_assert_eq!(frame_snapshot(&board), frame);
    }

    #[test]
    fn prop_interior_cells_map_to_distinct_offsets((w, h) in board_dims()) {
        let mut board = Board::new(w, h, "", Glyphs::default());
        let frame = frame_snapshot(&board);
        for row in 0..h as i16 {
            for col in 0..w as i16 {
                board.paint_char(Location::new(row, col), '#');
            }
        }
        let painted = board.cells().iter().filter(|&&c| c == '#').count();
        prop_assert_eq!(painted, w as usize * h as usize);
        prop_assert_eq!(frame_snapshot(&board), frame);
    }
}
