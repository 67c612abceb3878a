use ratatui::layout::Rect;

use crate::game::Direction;

/// Map a click or tap to a direction by its quadrant around `area`'s center.
///
/// Horizontal wins only when the horizontal offset is strictly larger; ties
/// steer vertically. Terminal cells are roughly twice as tall as wide, so
/// the vertical offset is doubled to compare like with like.
pub fn quadrant_direction(column: u16, row: u16, area: Rect) -> Direction {
    let center_x = f64::from(area.x) + f64::from(area.width) / 2.0;
    let center_y = f64::from(area.y) + f64::from(area.height) / 2.0;
    let dx = f64::from(column) + 0.5 - center_x;
    let dy = (f64::from(row) + 0.5 - center_y) * 2.0;

    if dx.abs() > dy.abs() {
        if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dy < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}
