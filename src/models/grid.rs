use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported Boggle board sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoggleSize {
    Four,
    Five,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Unsupported Boggle size: {0}")]
    UnsupportedSize(i64),
}

impl BoggleSize {
    /// Side length of the grid
    pub fn side(self) -> usize {
        match self {
            BoggleSize::Four => 4,
            BoggleSize::Five => 5,
        }
    }

    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }
}

impl TryFrom<i64> for BoggleSize {
    type Error = GridError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(BoggleSize::Four),
            5 => Ok(BoggleSize::Five),
            other => Err(GridError::UnsupportedSize(other)),
        }
    }
}

impl std::fmt::Display for BoggleSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = self.side();
        write!(f, "{side}x{side}")
    }
}

/// A square matrix of upper-case letters, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    size: BoggleSize,
    /// Row-major, always `size.cell_count()` letters
    letters: Vec<char>,
}

impl Grid {
    /// Build a grid from row-major letters.
    ///
    /// Returns `None` when the letter count does not match the size or a
    /// letter falls outside `A..=Z`.
    pub fn from_letters(size: BoggleSize, letters: Vec<char>) -> Option<Self> {
        if letters.len() != size.cell_count() || !letters.iter().all(|c| c.is_ascii_uppercase()) {
            return None;
        }
        Some(Self { size, letters })
    }

    pub fn size(&self) -> BoggleSize {
        self.size
    }

    /// Letters in row-major order
    pub fn cells(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.letters.chunks(self.size.side())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        let side = self.size.side();
        if row >= side || col >= side {
            return None;
        }
        self.letters.get(row * side + col).copied()
    }
}
