//! Sprite frame selection.
//!
//! Picks the source rectangle inside a sprite sheet from facing direction,
//! current speed and the frame clock. Walk cycles are driven by wall-clock
//! time, so every animal of a species steps in lockstep.

use crate::math::Rect;
use crate::resources::renderconfig::RenderConfig;
use crate::resources::spriteregistry::{ReadySheet, SheetLayout};
use crate::snapshot::{CardinalDirection, FacingDirection};

/// Row of an animated sheet for a direction: down, right, left, up.
pub fn animated_row(direction: CardinalDirection) -> u32 {
    match direction {
        CardinalDirection::Down => 0,
        CardinalDirection::Right => 1,
        CardinalDirection::Left => 2,
        CardinalDirection::Up => 3,
    }
}

/// `(column, row)` cell of a fixed 3×3 sheet for a direction.
pub fn fixed_cell(direction: CardinalDirection) -> (u32, u32) {
    match direction {
        CardinalDirection::Up => (1, 0),
        CardinalDirection::Left => (0, 1),
        CardinalDirection::Right => (2, 1),
        CardinalDirection::Down => (1, 2),
    }
}

/// Walk-cycle column: 0 while idle, otherwise advancing every
/// `walk_frame_ms` and wrapping at `columns`.
pub fn animation_column(speed: f32, now_ms: f64, columns: u32, config: &RenderConfig) -> u32 {
    if columns <= 1 || speed.is_nan() || speed < config.idle_speed {
        return 0;
    }
    let step = (now_ms.max(0.0) / config.walk_frame_ms).floor() as u64;
    (step % columns as u64) as u32
}

/// Source rectangle for this frame.
pub fn select_frame(
    sheet: &ReadySheet,
    facing: FacingDirection,
    speed: f32,
    now_ms: f64,
    config: &RenderConfig,
) -> Rect {
    let direction = facing.to_cardinal();
    match sheet.layout {
        SheetLayout::Fixed4 => {
            let cell_w = sheet.size.width as f32 / 3.0;
            let cell_h = sheet.size.height as f32 / 3.0;
            let (col, row) = fixed_cell(direction);
            Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h)
        }
        SheetLayout::Animated {
            columns,
            frame_width,
            frame_height,
        } => {
            let col = animation_column(speed, now_ms, columns, config);
            let row = animated_row(direction);
            Rect::new(
                (col * frame_width) as f32,
                (row * frame_height) as f32,
                frame_width as f32,
                frame_height as f32,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::spriteregistry::TextureInfo;
    use std::sync::Arc;

    fn animated(columns: u32, frame: u32) -> ReadySheet {
        ReadySheet {
            texture: Arc::from("sheet.png"),
            layout: SheetLayout::Animated {
                columns,
                frame_width: frame,
                frame_height: frame,
            },
            size: TextureInfo {
                width: columns * frame,
                height: 4 * frame,
            },
        }
    }

    #[test]
    fn test_idle_uses_first_column() {
        let cfg = RenderConfig::new();
        for now in [0.0, 150.0, 1234.0] {
            assert_eq!(animation_column(0.0, now, 4, &cfg), 0);
            assert_eq!(animation_column(0.005, now, 4, &cfg), 0);
        }
    }

    #[test]
    fn test_walk_cycle_wraps() {
        let cfg = RenderConfig::new();
        assert_eq!(animation_column(0.2, 0.0, 4, &cfg), 0);
        assert_eq!(animation_column(0.2, 99.9, 4, &cfg), 0);
        assert_eq!(animation_column(0.2, 100.0, 4, &cfg), 1);
        assert_eq!(animation_column(0.2, 350.0, 4, &cfg), 3);
        assert_eq!(animation_column(0.2, 400.0, 4, &cfg), 0);
        assert_eq!(animation_column(0.2, 500.0, 6, &cfg), 5);
    }

    #[test]
    fn test_nan_speed_is_idle() {
        let cfg = RenderConfig::new();
        assert_eq!(animation_column(f32::NAN, 300.0, 4, &cfg), 0);
    }

    #[test]
    fn test_animated_rows_follow_down_right_left_up() {
        let cfg = RenderConfig::new();
        let sheet = animated(4, 80);
        let rect = |dir| select_frame(&sheet, dir, 0.0, 0.0, &cfg);
        assert_eq!(rect(FacingDirection::Down).y, 0.0);
        assert_eq!(rect(FacingDirection::Right).y, 80.0);
        assert_eq!(rect(FacingDirection::Left).y, 160.0);
        assert_eq!(rect(FacingDirection::Up).y, 240.0);
        assert_eq!(rect(FacingDirection::UpLeft).y, 160.0);
        assert_eq!(rect(FacingDirection::DownRight).y, 80.0);
    }

    #[test]
    fn test_moving_frame_offsets_column() {
        let cfg = RenderConfig::new();
        let sheet = animated(6, 48);
        let rect = select_frame(&sheet, FacingDirection::Left, 0.3, 250.0, &cfg);
        assert_eq!(rect, Rect::new(96.0, 96.0, 48.0, 48.0));
    }

    #[test]
    fn test_fixed_sheet_uses_cross_cells() {
        let cfg = RenderConfig::new();
        let sheet = ReadySheet {
            texture: Arc::from("viper.png"),
            layout: SheetLayout::Fixed4,
            size: TextureInfo {
                width: 300,
                height: 300,
            },
        };
        let rect = |dir| select_frame(&sheet, dir, 1.0, 500.0, &cfg);
        assert_eq!(rect(FacingDirection::Up), Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(rect(FacingDirection::Left), Rect::new(0.0, 100.0, 100.0, 100.0));
        assert_eq!(rect(FacingDirection::Right), Rect::new(200.0, 100.0, 100.0, 100.0));
        assert_eq!(rect(FacingDirection::Down), Rect::new(100.0, 200.0, 100.0, 100.0));
        assert_eq!(rect(FacingDirection::DownLeft), Rect::new(0.0, 100.0, 100.0, 100.0));
    }
}
