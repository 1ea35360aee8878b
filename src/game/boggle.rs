use rand::{seq::IndexedRandom, Rng};

use crate::{
    game::dice::dice_for,
    models::{BoggleSize, Grid, GridError},
};

pub struct GridGenerator;

impl GridGenerator {
    /// Generate the start and end grids for a new game.
    ///
    /// The two grids are rolled independently; the end grid is not derived
    /// from the start grid.
    pub fn generate(size: i64) -> Result<(Grid, Grid), GridError> {
        Self::generate_with(size, &mut rand::rng())
    }

    /// Same as [`GridGenerator::generate`] with a caller-supplied random source
    pub fn generate_with(size: i64, rng: &mut impl Rng) -> Result<(Grid, Grid), GridError> {
        let size = BoggleSize::try_from(size)?;
        let start = Self::roll(size, rng);
        let end = Self::roll(size, rng);
        Ok((start, end))
    }

    /// Roll a single grid: every cell picks a die for the board size, then a face
    pub fn roll(size: BoggleSize, rng: &mut impl Rng) -> Grid {
        let dice = dice_for(size);
        let letters: Vec<char> = (0..size.cell_count())
            .map(|_| {
                let die = dice.choose(rng).unwrap_or(&dice[0]);
                die[rng.random_range(0..die.len())]
            })
            .collect();

        Grid::from_letters(size, letters).unwrap_or_else(|| {
            unreachable!("dice faces are always A-Z and the cell count matches the size")
        })
    }
}
