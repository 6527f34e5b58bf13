//! Drawing surface abstraction.
//!
//! The renderer never owns a window. It draws through [`RasterSurface`], a
//! small immediate-mode API modelled on a 2D canvas: a state stack, global
//! alpha, composite operation and filter, plus primitive fills and texture
//! blits addressed by texture key. Hosts implement it for their real canvas;
//! [`recording::RecordingSurface`] implements it in memory for tests and the
//! headless demo.
//!
//! White-flash and tint effects need an offscreen buffer. That buffer is an
//! explicit second surface passed alongside the screen in [`DrawTargets`]; it
//! is resized and cleared on each use and its contents are only meaningful for
//! the entity currently being drawn.

pub mod recording;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced by `alpha` in 0..=1.
    pub fn with_alpha(&self, alpha: f32) -> Color {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::new(self.r, self.g, self.b, a)
    }
}

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    /// Normal alpha blending.
    #[default]
    SourceOver,
    /// Draw only where the destination is opaque, keeping destination alpha.
    SourceAtop,
    /// Keep destination only where the source is opaque.
    DestinationIn,
    /// Multiply source and destination colors.
    Multiply,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Filter {
    #[default]
    None,
    /// Gaussian blur radius in pixels.
    Blur(f32),
}

/// Canvas-like immediate drawing API.
///
/// All coordinates are in surface pixels. State changes (`set_*`) affect later
/// draws until the matching [`restore`](RasterSurface::restore).
pub trait RasterSurface {
    fn size(&self) -> (u32, u32);

    /// Resize the surface; contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear to fully transparent and reset drawing state.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);

    fn set_alpha(&mut self, alpha: f32);
    fn set_composite(&mut self, op: CompositeOp);
    fn set_filter(&mut self, filter: Filter);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radius_x: f32, radius_y: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color);

    /// Draw text centered on `center`.
    fn fill_text(&mut self, text: &str, center: Vec2, size: f32, color: Color);

    /// Blit the `src` region of a loaded texture into `dest`.
    fn draw_texture(&mut self, texture: &str, src: Rect, dest: Rect);

    /// Blit the `src` region of another surface into `dest`.
    fn draw_surface(&mut self, source: &Self, src: Rect, dest: Rect)
    where
        Self: Sized;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, radius, radius, color);
    }
}

/// The host canvas plus the offscreen scratch buffer used for compositing.
pub struct DrawTargets<'a, S: RasterSurface> {
    pub screen: &'a mut S,
    pub scratch: &'a mut S,
}

impl<'a, S: RasterSurface> DrawTargets<'a, S> {
    pub fn new(screen: &'a mut S, scratch: &'a mut S) -> Self {
        Self { screen, scratch }
    }
}
