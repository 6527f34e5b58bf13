//! Shadows under animals.
//!
//! Grounded animals cast a silhouette of their current frame, squashed and
//! skewed by the sun position, or a soft ellipse while the sprite is not
//! loaded. Flying birds get a small detached ellipse offset toward a fixed
//! light direction; it ignores the wing-flap frame on purpose so the shadow
//! does not flicker.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::math::Rect;
use crate::surface::{Color, CompositeOp, DrawTargets, Filter, RasterSurface};

/// Shadow shape for a time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    pub alpha: f32,
    /// Shadow height as a fraction of sprite height.
    pub stretch: f32,
    /// Horizontal lean in -1..=1; negative points west.
    pub skew: f32,
}

/// Map day/night progress (0 midnight, 0.25 sunrise, 0.5 noon, 0.75 sunset)
/// to shadow parameters. Short dark shadows at noon, long faint ones near the
/// horizon and at night.
pub fn shadow_params(day_night_progress: f32) -> ShadowParams {
    let progress = if day_night_progress.is_finite() {
        day_night_progress.rem_euclid(1.0)
    } else {
        0.5
    };
    let sun_angle = TAU * (progress - 0.25);
    let daylight = sun_angle.sin().max(0.0);
    ShadowParams {
        alpha: 0.12 + 0.23 * daylight,
        stretch: 0.25 + 0.35 * (1.0 - daylight),
        skew: -sun_angle.cos() * 0.5,
    }
}

fn feet_y(dest: Rect) -> f32 {
    dest.y + dest.height * 0.85
}

/// Silhouette shadow built from the frame being drawn.
///
/// The frame is drawn into the scratch buffer, blackened with a
/// keep-alpha composite, then blitted squashed under the sprite.
pub fn draw_silhouette_shadow<S: RasterSurface>(
    targets: &mut DrawTargets<'_, S>,
    texture: &str,
    src: Rect,
    dest: Rect,
    params: ShadowParams,
    alpha: f32,
) {
    let local = Rect::new(0.0, 0.0, src.width, src.height);
    let scratch = &mut *targets.scratch;
    scratch.resize(src.width.ceil() as u32, src.height.ceil() as u32);
    scratch.clear();
    scratch.draw_texture(texture, src, local);
    scratch.save();
    scratch.set_composite(CompositeOp::SourceAtop);
    scratch.fill_rect(local, Color::BLACK);
    scratch.restore();

    let height = dest.height * params.stretch;
    let shadow_dest = Rect::new(
        dest.x + params.skew * dest.width * 0.3,
        feet_y(dest) - height * 0.5,
        dest.width,
        height,
    );
    let screen = &mut *targets.screen;
    screen.save();
    screen.set_alpha(params.alpha * alpha);
    screen.draw_surface(&*targets.scratch, local, shadow_dest);
    screen.restore();
}

/// Soft ellipse used when no frame is available.
pub fn draw_ellipse_shadow<S: RasterSurface>(
    screen: &mut S,
    dest: Rect,
    params: ShadowParams,
    alpha: f32,
) {
    let center = Vec2::new(dest.center().x + params.skew * dest.width * 0.15, feet_y(dest));
    let radius_x = dest.width * 0.35;
    let radius_y = radius_x * params.stretch * 0.6;
    screen.save();
    screen.set_alpha(alpha);
    screen.fill_ellipse(center, radius_x, radius_y, Color::BLACK.with_alpha(params.alpha));
    screen.restore();
}

/// Detached shadow for a bird in flight.
pub fn draw_flying_shadow<S: RasterSurface>(screen: &mut S, position: Vec2, size: Vec2, alpha: f32) {
    let center = position + Vec2::new(size.x * 0.2, size.y * 0.55);
    screen.save();
    screen.set_alpha(alpha);
    screen.fill_ellipse(center, size.x * 0.22, size.x * 0.09, Color::BLACK.with_alpha(0.15));
    screen.restore();
}

/// Red ground glow under hostile night creatures.
pub fn draw_hostile_glow<S: RasterSurface>(screen: &mut S, dest: Rect, alpha: f32) {
    let center = Vec2::new(dest.center().x, feet_y(dest));
    screen.save();
    screen.set_alpha(alpha);
    screen.set_filter(Filter::Blur(8.0));
    screen.fill_ellipse(
        center,
        dest.width * 0.5,
        dest.width * 0.2,
        Color::new(200, 30, 30, 255).with_alpha(0.25),
    );
    screen.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawCommand, RecordingSurface};

    #[test]
    fn test_noon_shadow_is_short_and_dark() {
        let noon = shadow_params(0.5);
        let dusk = shadow_params(0.75);
        let night = shadow_params(0.0);
        assert!(noon.stretch < dusk.stretch);
        assert!(noon.alpha > dusk.alpha);
        assert!((night.alpha - 0.12).abs() < 1e-5);
        assert!(noon.skew.abs() < 1e-5);
    }

    #[test]
    fn test_shadow_leans_west_in_the_morning() {
        assert!(shadow_params(0.3).skew < 0.0);
        assert!(shadow_params(0.7).skew > 0.0);
    }

    #[test]
    fn test_non_finite_progress_uses_noon() {
        assert_eq!(shadow_params(f32::NAN), shadow_params(0.5));
    }

    #[test]
    fn test_silhouette_is_blackened_scratch_blit() {
        let mut screen = RecordingSurface::new(800, 600);
        let mut scratch = RecordingSurface::default();
        let mut targets = DrawTargets::new(&mut screen, &mut scratch);
        let src = Rect::new(80.0, 0.0, 80.0, 80.0);
        let dest = Rect::new(100.0, 100.0, 128.0, 128.0);
        draw_silhouette_shadow(&mut targets, "wolf.png", src, dest, shadow_params(0.5), 1.0);

        assert_eq!(scratch.size(), (80, 80));
        assert_eq!(scratch.commands().len(), 2);
        assert_eq!(scratch.commands()[1].state().composite, CompositeOp::SourceAtop);
        match &screen.commands()[0] {
            DrawCommand::Surface { dest: shadow, state, .. } => {
                assert!(shadow.height < dest.height);
                assert!((state.alpha - 0.35).abs() < 1e-5);
            }
            other => panic!("expected shadow blit, got {:?}", other),
        }
    }

    #[test]
    fn test_flying_shadow_is_offset_and_faint() {
        let mut screen = RecordingSurface::new(800, 600);
        draw_flying_shadow(&mut screen, Vec2::new(100.0, 100.0), Vec2::new(80.0, 80.0), 1.0);
        match &screen.commands()[0] {
            DrawCommand::Ellipse { center, color, .. } => {
                assert!(center.x > 100.0 && center.y > 100.0);
                assert!(color.a < 64);
            }
            other => panic!("expected ellipse, got {:?}", other),
        }
    }

    #[test]
    fn test_hostile_glow_sits_under_feet_and_restores_state() {
        let mut screen = RecordingSurface::new(800, 600);
        let dest = Rect::new(0.0, 0.0, 100.0, 100.0);
        draw_hostile_glow(&mut screen, dest, 0.5);
        match &screen.commands()[0] {
            DrawCommand::Ellipse { center, color, state, .. } => {
                assert_eq!(center.x, 50.0);
                assert_eq!(center.y, feet_y(dest));
                assert!(color.r > color.g);
                assert_eq!(state.alpha, 0.5);
                assert_eq!(state.filter, Filter::Blur(8.0));
            }
            other => panic!("expected glow ellipse, got {:?}", other),
        }
        assert_eq!(screen.current_state().filter, Filter::None);
    }
}
