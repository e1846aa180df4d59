//! Scoreboard line painted below the board.

use crate::types::BORDER_WIDTH;

/// Compose the scoreboard for a board `width` columns wide.
///
/// The score sits on the left (when kept), the size/speed summary on the right,
/// and spaces fill the gap so the line spans the frame exactly. Fields wider
/// than the frame are simply concatenated.
///
/// ```
/// use tui_arcade_core::compose_scoreboard;
///
/// let line = compose_scoreboard(true, 7, 40, 15, 2);
/// assert_eq!(line.chars().count(), 42);
/// assert!(line.starts_with(" SCORE: 7 "));
/// assert!(line.ends_with("SIZE: 40x15  SPEED: 2 "));
/// ```
pub fn compose_scoreboard(keep_score: bool, score: u32, width: u16, height: u16, speed: u8) -> String {
    let left = if keep_score {
        format!(" SCORE: {score} ")
    } else {
        String::new()
    };
    let right = format!("SIZE: {width}x{height}  SPEED: {speed} ");
    let frame = (width + 2 * BORDER_WIDTH) as usize;
    let used = left.chars().count() + right.chars().count();
    let pad = frame.saturating_sub(used);

    let mut line = String::with_capacity(used + pad);
    line.push_str(&left);
    line.extend(std::iter::repeat(' ').take(pad));
    line.push_str(&right);
    line
}
