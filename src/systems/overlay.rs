//! Indicators drawn on top of an animal's sprite.

use glam::Vec2;
use smallvec::SmallVec;

use crate::math::Rect;
use crate::snapshot::{CardinalDirection, FacingDirection, ServerTimestamp, WildAnimalSnapshot};
use crate::surface::{Color, RasterSurface};

const BUBBLE_FILL: Color = Color::new(255, 255, 255, 235);
const BUBBLE_EDGE: Color = Color::new(60, 60, 60, 255);
const HEART_RED: Color = Color::new(225, 45, 70, 255);
const TEAR_BLUE: Color = Color::new(70, 150, 235, 255);
const PREGNANCY_PINK: Color = Color::new(255, 170, 200, 255);
const HELD_ITEM: Color = Color::new(230, 200, 120, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThoughtBubble {
    Heart,
    Crying,
}

fn effect_active(until: Option<ServerTimestamp>, server_now: ServerTimestamp) -> bool {
    until.is_some_and(|t| t.is_set() && server_now < t)
}

/// Thought bubbles currently active for an animal.
pub fn active_bubbles(
    animal: &WildAnimalSnapshot,
    server_now: Option<ServerTimestamp>,
) -> SmallVec<[ThoughtBubble; 2]> {
    let mut bubbles = SmallVec::new();
    let Some(now) = server_now else {
        return bubbles;
    };
    if effect_active(animal.heart_effect_until, now) {
        bubbles.push(ThoughtBubble::Heart);
    }
    if effect_active(animal.crying_effect_until, now) {
        bubbles.push(ThoughtBubble::Crying);
    }
    bubbles
}

/// Bubbles float above the sprite and bob slightly; several sit side by side.
pub fn draw_thought_bubbles<S: RasterSurface>(
    screen: &mut S,
    bubbles: &[ThoughtBubble],
    dest: Rect,
    now_ms: f64,
) {
    let bob = ((now_ms / 250.0).sin() * 2.0) as f32;
    let count = bubbles.len() as f32;
    for (i, bubble) in bubbles.iter().enumerate() {
        let spread = (i as f32 - (count - 1.0) * 0.5) * 30.0;
        let center = Vec2::new(dest.center().x + spread, dest.y - 14.0 + bob);
        let trail = Vec2::new(center.x - 6.0, center.y + 14.0);
        screen.fill_circle(trail, 3.0, BUBBLE_FILL);
        screen.fill_ellipse(center, 14.0, 11.0, BUBBLE_FILL);
        screen.stroke_circle(center, 12.0, 1.0, BUBBLE_EDGE);
        match bubble {
            ThoughtBubble::Heart => {
                screen.fill_circle(Vec2::new(center.x - 3.0, center.y - 2.0), 3.5, HEART_RED);
                screen.fill_circle(Vec2::new(center.x + 3.0, center.y - 2.0), 3.5, HEART_RED);
                screen.fill_polygon(
                    &[
                        Vec2::new(center.x - 6.4, center.y - 1.0),
                        Vec2::new(center.x + 6.4, center.y - 1.0),
                        Vec2::new(center.x, center.y + 6.0),
                    ],
                    HEART_RED,
                );
            }
            ThoughtBubble::Crying => {
                screen.fill_circle(Vec2::new(center.x, center.y + 2.0), 3.5, TEAR_BLUE);
                screen.fill_polygon(
                    &[
                        Vec2::new(center.x - 3.4, center.y + 1.5),
                        Vec2::new(center.x + 3.4, center.y + 1.5),
                        Vec2::new(center.x, center.y - 6.0),
                    ],
                    TEAR_BLUE,
                );
            }
        }
    }
}

/// Pulsing bubble beside a pregnant animal.
pub fn draw_pregnancy_indicator<S: RasterSurface>(screen: &mut S, dest: Rect, now_ms: f64) {
    let pulse = 1.0 + 0.12 * ((now_ms / 300.0).sin() as f32);
    let center = Vec2::new(dest.x + dest.width * 0.85, dest.y + dest.height * 0.1);
    screen.fill_circle(center, 8.0 * pulse, PREGNANCY_PINK.with_alpha(0.9));
    screen.stroke_circle(center, 8.0 * pulse, 1.5, Color::WHITE);
    screen.fill_circle(center, 3.0 * pulse, Color::WHITE);
}

/// Small dot at the beak of a bird carrying something.
pub fn draw_held_item<S: RasterSurface>(screen: &mut S, dest: Rect, facing: FacingDirection) {
    let side = match facing.to_cardinal() {
        CardinalDirection::Left => -0.3,
        CardinalDirection::Right => 0.3,
        _ => 0.0,
    };
    let center = Vec2::new(
        dest.center().x + dest.width * side,
        dest.y + dest.height * 0.55,
    );
    screen.fill_circle(center, (dest.width * 0.06).max(2.0), HELD_ITEM);
}

/// Collision box and authoritative position marker.
pub fn draw_debug_overlay<S: RasterSurface>(screen: &mut S, bounds: Rect, server: Vec2) {
    screen.stroke_rect(bounds, 1.0, Color::new(0, 255, 0, 255));
    let red = Color::new(255, 0, 0, 255);
    screen.draw_line(
        Vec2::new(server.x - 5.0, server.y),
        Vec2::new(server.x + 5.0, server.y),
        1.0,
        red,
    );
    screen.draw_line(
        Vec2::new(server.x, server.y - 5.0),
        Vec2::new(server.x, server.y + 5.0),
        1.0,
        red,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AnimalSpecies;
    use crate::surface::recording::{DrawCommand, RecordingSurface};

    fn animal() -> WildAnimalSnapshot {
        let mut a = WildAnimalSnapshot::new(1, AnimalSpecies::Caribou, 0.0, 0.0);
        a.heart_effect_until = Some(ServerTimestamp(2_000_000));
        a.crying_effect_until = Some(ServerTimestamp(1_000_000));
        a
    }

    #[test]
    fn test_bubbles_follow_server_clock() {
        let a = animal();
        assert_eq!(
            active_bubbles(&a, Some(ServerTimestamp(500_000))).as_slice(),
            &[ThoughtBubble::Heart, ThoughtBubble::Crying]
        );
        assert_eq!(
            active_bubbles(&a, Some(ServerTimestamp(1_000_000))).as_slice(),
            &[ThoughtBubble::Heart]
        );
        assert!(active_bubbles(&a, Some(ServerTimestamp(2_000_000))).is_empty());
        assert!(active_bubbles(&a, None).is_empty());
    }

    #[test]
    fn test_bubbles_sit_above_sprite() {
        let mut screen = RecordingSurface::new(400, 400);
        let dest = Rect::new(100.0, 100.0, 64.0, 64.0);
        draw_thought_bubbles(&mut screen, &[ThoughtBubble::Heart], dest, 0.0);
        assert!(!screen.commands().is_empty());
        for cmd in screen.commands() {
            if let DrawCommand::Ellipse { center, .. } = cmd {
                assert!(center.y < dest.y + 8.0);
            }
        }
    }
}
