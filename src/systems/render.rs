//! Per-animal frame rendering.
//!
//! [`render_animal`] is called once per visible animal per frame. It feeds the
//! snapshot through interpolation and hit tracking, then draws, in order:
//! ground glow for hostile creatures, the shadow, the sprite (or a placeholder
//! while its sheet is loading), overlays, and debug markers.
//!
//! Sprite effects that need pixel compositing go through the scratch surface
//! in [`DrawTargets`]:
//! - hit flash: frame, then white filled with `SourceAtop`
//! - underwater tint: frame, tint with `Multiply`, frame again with
//!   `DestinationIn` to restore the silhouette's alpha

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::interpolation::Interpolation;
use crate::math::Rect;
use crate::resources::debugmode::DebugMode;
use crate::resources::renderconfig::RenderConfig;
use crate::resources::spriteregistry::{SheetStatus, SpriteRegistry};
use crate::snapshot::{AnimalState, BreedingData, ServerTimestamp, WildAnimalSnapshot};
use crate::surface::{Color, CompositeOp, DrawTargets, Filter, RasterSurface};
use crate::systems::animation::select_frame;
use crate::systems::breeding::{breeding_for, shows_pregnancy, size_multiplier};
use crate::systems::hiteffect::update_hit_effect;
use crate::systems::interpolation::interpolate_animal;
use crate::systems::lifecycle::track_animal;
use crate::systems::overlay::{
    active_bubbles, draw_debug_overlay, draw_held_item, draw_pregnancy_indicator,
    draw_thought_bubbles,
};
use crate::systems::shadow::{
    draw_ellipse_shadow, draw_flying_shadow, draw_hostile_glow, draw_silhouette_shadow,
    shadow_params,
};
use crate::systems::time::update_world_time;

/// Time a despawning animal takes to fade out, in milliseconds.
pub const DESPAWN_FADE_MS: f64 = 1000.0;
/// Opacity of a despawning animal when the server clock is unknown.
const DESPAWN_FALLBACK_ALPHA: f32 = 0.5;

const ABOVE_WATER_BLUR_PX: f32 = 2.0;
const ABOVE_WATER_ALPHA: f32 = 0.6;
const UNDERWATER_TINT: Color = Color::new(90, 150, 190, 255);

/// Where the local player is looking from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerContext {
    /// Best estimate of the server clock, for thought bubble and fade expiry.
    pub server_time: Option<ServerTimestamp>,
    /// The player is below the water line.
    pub viewer_underwater: bool,
}

/// What [`render_animal`] ended up drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOutcome {
    Sprite { position: Vec2 },
    /// Sheet not ready or unmapped; drew the colored placeholder.
    Placeholder { position: Vec2 },
    /// Burrowed animals are tracked but not drawn.
    Hidden,
    /// No usable position yet.
    Skipped,
}

impl RenderOutcome {
    pub fn position(&self) -> Option<Vec2> {
        match self {
            RenderOutcome::Sprite { position } | RenderOutcome::Placeholder { position } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SpriteMode {
    Plain,
    Flash,
    AboveWater,
    Tinted(Color),
}

fn sprite_mode(flash: bool, aquatic: bool, viewer: Option<&ViewerContext>) -> SpriteMode {
    let underwater = viewer.is_some_and(|v| v.viewer_underwater);
    if flash {
        SpriteMode::Flash
    } else if aquatic && !underwater {
        SpriteMode::AboveWater
    } else if underwater && !aquatic {
        SpriteMode::Tinted(UNDERWATER_TINT)
    } else {
        SpriteMode::Plain
    }
}

fn despawn_alpha(animal: &WildAnimalSnapshot, viewer: Option<&ViewerContext>) -> f32 {
    if animal.state != AnimalState::Despawning {
        return 1.0;
    }
    match viewer.and_then(|v| v.server_time) {
        Some(now) if animal.state_change_time.is_set() => {
            let elapsed_ms = (now.micros() - animal.state_change_time.micros()) as f64 / 1000.0;
            (1.0 - elapsed_ms / DESPAWN_FADE_MS).clamp(0.0, 1.0) as f32
        }
        _ => DESPAWN_FALLBACK_ALPHA,
    }
}

/// Draw `texture[src]` as a flat white silhouette into `dest`.
pub fn draw_flash_sprite<S: RasterSurface>(
    targets: &mut DrawTargets<'_, S>,
    texture: &str,
    src: Rect,
    dest: Rect,
) {
    let local = Rect::new(0.0, 0.0, src.width, src.height);
    let scratch = &mut *targets.scratch;
    scratch.resize(src.width.ceil() as u32, src.height.ceil() as u32);
    scratch.clear();
    scratch.draw_texture(texture, src, local);
    scratch.save();
    scratch.set_composite(CompositeOp::SourceAtop);
    scratch.fill_rect(local, Color::WHITE);
    scratch.restore();
    targets.screen.draw_surface(&*targets.scratch, local, dest);
}

/// Draw `texture[src]` color-multiplied by `tint`, keeping its alpha.
pub fn draw_tinted_sprite<S: RasterSurface>(
    targets: &mut DrawTargets<'_, S>,
    texture: &str,
    src: Rect,
    dest: Rect,
    tint: Color,
) {
    let local = Rect::new(0.0, 0.0, src.width, src.height);
    let scratch = &mut *targets.scratch;
    scratch.resize(src.width.ceil() as u32, src.height.ceil() as u32);
    scratch.clear();
    scratch.draw_texture(texture, src, local);
    scratch.save();
    scratch.set_composite(CompositeOp::Multiply);
    scratch.fill_rect(local, tint);
    scratch.set_composite(CompositeOp::DestinationIn);
    scratch.draw_texture(texture, src, local);
    scratch.restore();
    targets.screen.draw_surface(&*targets.scratch, local, dest);
}

/// Colored circle with the species glyph, used until the sheet is ready.
pub fn draw_placeholder<S: RasterSurface>(
    screen: &mut S,
    dest: Rect,
    color: Color,
    glyph: char,
    flash: bool,
) {
    let center = dest.center();
    let radius = dest.width.min(dest.height) * 0.35;
    let fill = if flash { Color::WHITE } else { color };
    screen.fill_circle(center, radius, fill);
    let mut buf = [0u8; 4];
    screen.fill_text(glyph.encode_utf8(&mut buf), center, radius, Color::WHITE);
}

/// Draw one animal for this frame.
///
/// Never fails: missing sprites fall back to a placeholder, unknown species
/// use default sizes, and a non-finite first position skips the frame.
pub fn render_animal<S: RasterSurface>(
    world: &mut World,
    targets: &mut DrawTargets<'_, S>,
    animal: &WildAnimalSnapshot,
    now_ms: f64,
    day_night_progress: f32,
    breeding: Option<&FxHashMap<u64, BreedingData>>,
    viewer: Option<&ViewerContext>,
) -> RenderOutcome {
    update_world_time(world, now_ms);
    let entity = track_animal(world, animal.id, animal.species);

    let Some(position) = interpolate_animal(world, entity, animal.id, animal.position(), now_ms)
    else {
        return RenderOutcome::Skipped;
    };
    if animal.is_burrowed() {
        return RenderOutcome::Hidden;
    }

    let feedback = update_hit_effect(world, entity, animal.last_hit_time, animal.health, now_ms);
    let speed = world
        .get::<Interpolation>(entity)
        .map_or(0.0, |state| state.speed());

    let info = animal.species.info();
    let breeding_row = breeding_for(breeding, animal.id, animal.species);
    let scale = size_multiplier(breeding_row);
    let size = Vec2::new(info.render_width * scale, info.render_height * scale);
    let draw_pos = position + feedback.shake;
    let dest = Rect::centered(draw_pos, size.x, size.y);

    let status = world
        .resource::<SpriteRegistry>()
        .resolve(animal.species, animal.is_flying);
    if let SheetStatus::Pending(key) = &status {
        world.resource_mut::<SpriteRegistry>().warn_missing_once(key);
    }
    let frame = match &status {
        SheetStatus::Ready(sheet) => {
            let config = world.resource::<RenderConfig>();
            Some((
                sheet.texture.clone(),
                select_frame(sheet, animal.facing_direction, speed, now_ms, config),
            ))
        }
        _ => None,
    };

    let alpha = despawn_alpha(animal, viewer);
    let flying = animal.is_flying && animal.species.is_bird();
    let aquatic = animal.species.is_aquatic();

    // Ground layer
    if animal.species.is_hostile_npc() {
        draw_hostile_glow(&mut *targets.screen, dest, alpha);
    }
    if flying {
        draw_flying_shadow(&mut *targets.screen, draw_pos, size, alpha);
    } else if !aquatic {
        let params = shadow_params(day_night_progress);
        match &frame {
            Some((texture, src)) => {
                draw_silhouette_shadow(targets, texture, *src, dest, params, alpha)
            }
            None => draw_ellipse_shadow(&mut *targets.screen, dest, params, alpha),
        }
    }

    // Sprite
    targets.screen.save();
    targets.screen.set_alpha(alpha);
    let outcome = match &frame {
        Some((texture, src)) => {
            match sprite_mode(feedback.flash, aquatic, viewer) {
                SpriteMode::Plain => targets.screen.draw_texture(texture, *src, dest),
                SpriteMode::Flash => draw_flash_sprite(targets, texture, *src, dest),
                SpriteMode::AboveWater => {
                    targets.screen.set_filter(Filter::Blur(ABOVE_WATER_BLUR_PX));
                    targets.screen.set_alpha(alpha * ABOVE_WATER_ALPHA);
                    targets.screen.draw_texture(texture, *src, dest);
                }
                SpriteMode::Tinted(tint) => draw_tinted_sprite(targets, texture, *src, dest, tint),
            }
            RenderOutcome::Sprite { position }
        }
        None => {
            draw_placeholder(
                &mut *targets.screen,
                dest,
                info.fallback_color,
                info.glyph,
                feedback.flash,
            );
            RenderOutcome::Placeholder { position }
        }
    };
    targets.screen.restore();

    // Overlays
    if animal.held_item_name.is_some() && animal.species.is_bird() {
        draw_held_item(&mut *targets.screen, dest, animal.facing_direction);
    }
    if shows_pregnancy(breeding_row) {
        draw_pregnancy_indicator(&mut *targets.screen, dest, now_ms);
    }
    let bubbles = active_bubbles(animal, viewer.and_then(|v| v.server_time));
    if !bubbles.is_empty() {
        draw_thought_bubbles(&mut *targets.screen, &bubbles, dest, now_ms);
    }

    if world.contains_resource::<DebugMode>()
        && let Some(collider) = world.get::<BoxCollider>(entity)
    {
        draw_debug_overlay(
            &mut *targets.screen,
            collider.bounds(animal.position()),
            animal.position(),
        );
    }

    outcome
}
