//! In-memory surface that records draw commands.
//!
//! Every draw is stored together with the alpha, composite operation and
//! filter in effect at the time, so tests can assert on what a real canvas
//! would have produced without rasterizing anything.

use glam::Vec2;

use crate::math::Rect;
use crate::surface::{Color, CompositeOp, Filter, RasterSurface};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawState {
    pub alpha: f32,
    pub composite: CompositeOp,
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
        state: DrawState,
    },
    StrokeRect {
        rect: Rect,
        line_width: f32,
        color: Color,
        state: DrawState,
    },
    Ellipse {
        center: Vec2,
        radius_x: f32,
        radius_y: f32,
        color: Color,
        state: DrawState,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Color,
        state: DrawState,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
        state: DrawState,
    },
    Line {
        from: Vec2,
        to: Vec2,
        line_width: f32,
        color: Color,
        state: DrawState,
    },
    Text {
        text: String,
        center: Vec2,
        size: f32,
        color: Color,
        state: DrawState,
    },
    Texture {
        texture: String,
        src: Rect,
        dest: Rect,
        state: DrawState,
    },
    /// Another surface blitted onto this one, with its recorded contents.
    Surface {
        contents: Vec<DrawCommand>,
        src: Rect,
        dest: Rect,
        state: DrawState,
    },
}

impl DrawCommand {
    pub fn state(&self) -> DrawState {
        match self {
            DrawCommand::Rect { state, .. }
            | DrawCommand::StrokeRect { state, .. }
            | DrawCommand::Ellipse { state, .. }
            | DrawCommand::StrokeCircle { state, .. }
            | DrawCommand::Polygon { state, .. }
            | DrawCommand::Line { state, .. }
            | DrawCommand::Text { state, .. }
            | DrawCommand::Texture { state, .. }
            | DrawCommand::Surface { state, .. } => *state,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: DrawState,
    stack: Vec<DrawState>,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: DrawState {
                alpha: 1.0,
                ..DrawState::default()
            },
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands but keep size and state; call between frames.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn current_state(&self) -> DrawState {
        self.state
    }

    /// Depth of the save/restore stack; zero when every save was restored.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Texture keys drawn directly onto this surface, in order.
    pub fn textures_drawn(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Texture { texture, .. } => Some(texture.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn surfaces_drawn(&self) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Surface { .. }))
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl RasterSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.stack.clear();
        self.state = DrawState {
            alpha: 1.0,
            ..DrawState::default()
        };
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.state.composite = op;
    }

    fn set_filter(&mut self, filter: Filter) {
        self.state.filter = filter;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let state = self.state;
        self.push(DrawCommand::Rect { rect, color, state });
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: Color) {
        let state = self.state;
        self.push(DrawCommand::StrokeRect {
            rect,
            line_width,
            color,
            state,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radius_x: f32, radius_y: f32, color: Color) {
        let state = self.state;
        self.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            color,
            state,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        let state = self.state;
        self.push(DrawCommand::StrokeCircle {
            center,
            radius,
            line_width,
            color,
            state,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let state = self.state;
        self.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            state,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Color) {
        let state = self.state;
        self.push(DrawCommand::Line {
            from,
            to,
            line_width,
            color,
            state,
        });
    }

    fn fill_text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        let state = self.state;
        self.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size,
            color,
            state,
        });
    }

    fn draw_texture(&mut self, texture: &str, src: Rect, dest: Rect) {
        let state = self.state;
        self.push(DrawCommand::Texture {
            texture: texture.to_string(),
            src,
            dest,
            state,
        });
    }

    fn draw_surface(&mut self, source: &Self, src: Rect, dest: Rect) {
        let state = self.state;
        self.push(DrawCommand::Surface {
            contents: source.commands.clone(),
            src,
            dest,
            state,
        });
    }
}
