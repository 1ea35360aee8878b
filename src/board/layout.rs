use serde::Serialize;

use crate::{
    board::charset::{encode, encode_word, BLANK, GREEN, RED},
    models::Grid,
};

/// Rows on the board
pub const ROWS: usize = 6;
/// Columns on the board
pub const COLS: usize = 22;
/// Total flaps, addressed row-major
pub const CELLS: usize = ROWS * COLS;

const GAME_LABEL: &str = "BOGGLE";

/// Which half of the game a grid belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Start,
    End,
}

impl Phase {
    fn border(self) -> u8 {
        match self {
            Phase::Start => GREEN,
            Phase::End => RED,
        }
    }

    fn caption(self) -> &'static str {
        match self {
            Phase::Start => "GO",
            Phase::End => "TIME",
        }
    }
}

/// Full board contents as the vendor expects them: 6 rows of 22 codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardCharacters([[u8; COLS]; ROWS]);

impl BoardCharacters {
    /// Fold the linear cell buffer back into rows
    pub fn from_cells(cells: &[u8; CELLS]) -> Self {
        let mut rows = [[BLANK; COLS]; ROWS];
        for (row, chunk) in rows.iter_mut().zip(cells.chunks_exact(COLS)) {
            row.copy_from_slice(chunk);
        }
        Self(rows)
    }

    pub fn rows(&self) -> &[[u8; COLS]; ROWS] {
        &self.0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }
}

/// Linear address of a flap
pub fn cell_index(row: usize, col: usize) -> usize {
    row * COLS + col
}

/// Where the top-left letter of a grid lands on the board
pub fn grid_origin(side: usize) -> (usize, usize) {
    // A 4x4 grid gets a border row above and below; 5x5 only fits one below.
    let top = if side + 2 <= ROWS { 1 } else { 0 };
    let left = (COLS - side) / 2;
    (top, left)
}

/// Lay a grid out on the board inside a coloured frame.
///
/// Letters are written row-major into the board's linear addressing,
/// centred horizontally. The frame colour tells players whether the
/// round is starting (green) or over (red).
pub fn compose_grid(grid: &Grid, phase: Phase) -> BoardCharacters {
    let mut cells = [BLANK; CELLS];
    let side = grid.size().side();
    let (top, left) = grid_origin(side);
    let border = phase.border();

    // Side borders
    for row in top..top + side {
        cells[cell_index(row, left - 1)] = border;
        cells[cell_index(row, left + side)] = border;
    }

    // Top and bottom borders where the board has room
    let mut border_rows = Vec::with_capacity(2);
    if top > 0 {
        border_rows.push(top - 1);
    }
    if top + side < ROWS {
        border_rows.push(top + side);
    }
    for row in border_rows {
        for col in left - 1..=left + side {
            cells[cell_index(row, col)] = border;
        }
    }

    for (i, letter) in grid.cells().enumerate() {
        let row = top + i / side;
        let col = left + i % side;
        cells[cell_index(row, col)] = encode(letter).unwrap_or(BLANK);
    }

    for (row, code) in encode_word(GAME_LABEL).into_iter().enumerate().take(ROWS) {
        cells[cell_index(row, 0)] = code;
    }

    let caption = encode_word(phase.caption());
    let caption_start = COLS - caption.len();
    for (offset, code) in caption.into_iter().enumerate() {
        cells[cell_index(2, caption_start + offset)] = code;
    }

    BoardCharacters::from_cells(&cells)
}
