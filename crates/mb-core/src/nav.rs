//! Navigation planning over a grid layout.
//!
//! Pure transition logic only. Runtime side effects (scrolling, checkbox
//! toggling, opening entries) are handled by the application layer.

use crate::grid::GridLayout;

/// Discrete navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Up,
    Down,
    Left,
    Right,
    /// Select the first entry unconditionally.
    Home,
    /// Select the last entry unconditionally.
    End,
    /// Flip the highlighted entry's checked flag (external renderer state).
    ToggleSelectCurrent,
    /// Open the highlighted entry (external navigation concern).
    ActivateCurrent,
}

impl NavCommand {
    /// `(dx, dy)` of a directional command, `None` for the rest.
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Self::Up => Some((0, -1)),
            Self::Down => Some((0, 1)),
            Self::Left => Some((-1, 0)),
            Self::Right => Some((1, 0)),
            _ => None,
        }
    }
}

/// Compute the entry a `(dx, dy)` move lands on, or `None` when the move is a
/// no-op (no current highlight, or the target address holds no entry).
///
/// Horizontal overflow carries into the adjacent row: stepping left off
/// column 0 wraps to the last column of the previous row, stepping right off
/// the last column wraps to column 0 of the next row.
pub fn plan_move(layout: &GridLayout, dx: isize, dy: isize) -> Option<usize> {
    let (row, col) = layout.highlight_position()?;
    let columns = layout.columns() as isize;
    if columns == 0 {
        return None;
    }

    let mut new_col = col as isize + dx;
    let mut new_row = row as isize + dy;
    if new_col < 0 {
        new_row -= 1;
        new_col += columns;
    } else if new_col >= columns {
        new_row += 1;
        new_col -= columns;
    }
    if new_row < 0 || new_col < 0 {
        return None;
    }

    layout.entry_at(new_row as usize, new_col as usize)
}
