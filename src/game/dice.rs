use crate::models::BoggleSize;

/// A six-faced die. Repeated faces weight a letter more heavily.
pub type Die = [char; 6];

/// Classic 4x4 Boggle dice
pub static DICE_4X4: [Die; 16] = [
    ['A', 'E', 'A', 'N', 'E', 'G'],
    ['A', 'H', 'S', 'P', 'C', 'O'],
    ['A', 'B', 'B', 'J', 'O', 'O'],
    ['A', 'F', 'F', 'K', 'P', 'S'],
    ['A', 'O', 'O', 'T', 'T', 'W'],
    ['C', 'I', 'M', 'O', 'T', 'U'],
    ['D', 'E', 'I', 'L', 'R', 'X'],
    ['D', 'E', 'L', 'R', 'V', 'Y'],
    ['D', 'I', 'S', 'T', 'T', 'Y'],
    ['E', 'E', 'G', 'H', 'N', 'W'],
    ['E', 'E', 'I', 'N', 'S', 'U'],
    ['E', 'H', 'R', 'T', 'V', 'W'],
    ['E', 'I', 'O', 'S', 'S', 'T'],
    ['E', 'L', 'R', 'T', 'T', 'Y'],
    ['H', 'I', 'M', 'N', 'U', 'T'],
    ['H', 'L', 'N', 'N', 'R', 'Z'],
];

/// Big Boggle 5x5 dice
pub static DICE_5X5: [Die; 25] = [
    ['Q', 'B', 'Z', 'J', 'X', 'K'],
    ['H', 'H', 'L', 'R', 'D', 'C'],
    ['T', 'E', 'L', 'P', 'C', 'I'],
    ['T', 'T', 'O', 'T', 'E', 'M'],
    ['A', 'E', 'A', 'E', 'E', 'E'],
    ['T', 'O', 'U', 'O', 'T', 'C'],
    ['N', 'H', 'D', 'T', 'H', 'C'],
    ['S', 'S', 'N', 'S', 'E', 'U'],
    ['S', 'C', 'T', 'I', 'E', 'P'],
    ['Y', 'I', 'F', 'P', 'S', 'R'],
    ['O', 'V', 'W', 'R', 'G', 'R'],
    ['L', 'H', 'N', 'R', 'O', 'D'],
    ['R', 'I', 'Y', 'P', 'R', 'H'],
    ['E', 'A', 'N', 'D', 'N', 'N'],
    ['E', 'E', 'E', 'E', 'M', 'A'],
    ['A', 'A', 'A', 'F', 'S', 'R'],
    ['A', 'F', 'A', 'I', 'S', 'R'],
    ['D', 'O', 'R', 'D', 'L', 'N'],
    ['M', 'N', 'N', 'E', 'A', 'G'],
    ['I', 'T', 'I', 'T', 'I', 'E'],
    ['A', 'U', 'M', 'E', 'E', 'G'],
    ['Y', 'I', 'F', 'A', 'S', 'R'],
    ['C', 'C', 'W', 'N', 'S', 'T'],
    ['U', 'O', 'T', 'O', 'W', 'N'],
    ['E', 'T', 'I', 'L', 'I', 'C'],
];

/// Dice used for a given board size
pub fn dice_for(size: BoggleSize) -> &'static [Die] {
    match size {
        BoggleSize::Four => &DICE_4X4,
        BoggleSize::Five => &DICE_5X5,
    }
}

/// Probability of each letter appearing on a single cell, as `(letter, weight)`
/// pairs where weights sum to 1.0
#[cfg(test)]
pub fn face_weights(size: BoggleSize) -> Vec<(char, f64)> {
    let dice = dice_for(size);
    let total_faces = (dice.len() * 6) as f64;
    let mut counts = [0u32; 26];

    for face in dice.iter().flatten() {
        counts[(*face as u8 - b'A') as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(idx, &count)| ((b'A' + idx as u8) as char, count as f64 / total_faces))
        .collect()
}
