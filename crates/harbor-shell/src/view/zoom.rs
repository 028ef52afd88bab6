//! Discrete page zoom levels.

pub const ZOOM_LEVELS: [f64; 17] = [
    0.25, 0.33, 0.5, 0.67, 0.75, 0.8, 0.9, 1.0, 1.1, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0, 4.0, 5.0,
];

pub const DEFAULT_ZOOM: f64 = 1.0;

/// Index of the level closest to `factor`; ties go to the lower level.
pub fn nearest_index(factor: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, level) in ZOOM_LEVELS.iter().enumerate() {
        let distance = (level - factor).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

pub fn snap(factor: f64) -> f64 {
    ZOOM_LEVELS[nearest_index(factor)]
}

/// Next level up, or `None` at the top.
pub fn step_in(factor: f64) -> Option<f64> {
    ZOOM_LEVELS.get(nearest_index(factor) + 1).copied()
}

/// Next level down, or `None` at the bottom.
pub fn step_out(factor: f64) -> Option<f64> {
    nearest_index(factor)
        .checked_sub(1)
        .map(|index| ZOOM_LEVELS[index])
}
