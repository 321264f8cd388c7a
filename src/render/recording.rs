use crate::assets::texture::ImageData;
use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, Vec2};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::surface::{Surface, TextStyle, TransformStack, estimate_text_size};

/// One call made against a [`RecordingSurface`]. Drawing commands carry the transform that was
/// current when they were issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    Clear(Color),
    FillPath {
        path: BezPath,
        color: Color,
        transform: Affine,
    },
    StrokePath {
        path: BezPath,
        color: Color,
        width: f64,
        transform: Affine,
    },
    FillText {
        text: String,
        anchor: Point,
        style: TextStyle,
        transform: Affine,
    },
    DrawImage {
        image_id: u64,
        src: Rect,
        dst: Rect,
        transform: Affine,
    },
}

impl DrawCmd {
    /// Whether the command puts pixels on the surface.
    pub fn is_draw(&self) -> bool {
        !matches!(self, DrawCmd::Save | DrawCmd::Restore)
    }

    pub fn transform(&self) -> Option<Affine> {
        match self {
            DrawCmd::FillPath { transform, .. }
            | DrawCmd::StrokePath { transform, .. }
            | DrawCmd::FillText { transform, .. }
            | DrawCmd::DrawImage { transform, .. } => Some(*transform),
            _ => None,
        }
    }
}

/// Surface that records calls instead of rasterizing. Used by tests and by hosts that forward
/// commands elsewhere.
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: TransformStack,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: TransformStack::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn draw_calls(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Depth of the `save()` stack; zero when every save was restored.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> MotionResult<()> {
        if width == 0 || height == 0 {
            return Err(MotionError::surface(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        self.state.reset();
        Ok(())
    }

    fn save(&mut self) {
        self.state.save();
        self.commands.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.commands.push(DrawCmd::Restore);
    }

    fn current_transform(&self) -> Affine {
        self.state.current
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.current = transform;
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCmd::Clear(color));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCmd::FillPath {
            path: path.clone(),
            color,
            transform: self.state.current,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.commands.push(DrawCmd::StrokePath {
            path: path.clone(),
            color,
            width,
            transform: self.state.current,
        });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        self.commands.push(DrawCmd::FillText {
            text: text.to_string(),
            anchor,
            style: style.clone(),
            transform: self.state.current,
        });
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Vec2 {
        estimate_text_size(text, style)
    }

    fn draw_image(&mut self, image: &ImageData, src: Rect, dst: Rect) {
        self.commands.push(DrawCmd::DrawImage {
            image_id: image.id(),
            src,
            dst,
            transform: self.state.current,
        });
    }
}
