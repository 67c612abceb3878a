use std::time::Duration;

use super::config::GameConfig;

/// Movement tick period for a given score.
///
/// Speed is counted in moves per second: `min_speed` until the score climbs
/// past it, then the score itself, capped at `max_speed`.
pub fn movement_period(score: u32, config: &GameConfig) -> Duration {
    let speed = score.clamp(config.min_speed, config.max_speed).max(1);
    Duration::from_micros(1_000_000 / u64::from(speed))
}

/// Moves per second at the given score
pub fn moves_per_second(score: u32, config: &GameConfig) -> u32 {
    score.clamp(config.min_speed, config.max_speed)
}
