// Boggle board generation

pub mod boggle;
pub mod dice;

pub use boggle::GridGenerator;
