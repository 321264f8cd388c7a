use crate::assets::texture::ImageData;
use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, Vec2};
use crate::foundation::error::MotionResult;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        let mut out = [px[0], px[1], px[2], px[3]];
        if self.premultiplied && out[3] != 0 && out[3] != 255 {
            let a = u16::from(out[3]);
            for c in &mut out[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Some(out)
    }

    /// Convert to straight alpha in place, as expected by PNG encoders.
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Wrap width for multi-line layout.
    pub max_width: Option<f64>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::WHITE,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            max_width: None,
        }
    }
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            ..Self::default()
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self.baseline = TextBaseline::Middle;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_max_width(mut self, max_width: Option<f64>) -> Self {
        self.max_width = max_width;
        self
    }
}

/// Text metrics used when no shaped layout is available.
pub fn estimate_text_size(text: &str, style: &TextStyle) -> Vec2 {
    let line_height = style.size * 1.2;
    let mut lines = 0usize;
    let mut widest = 0usize;
    for line in text.split('\n') {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    let mut width = widest as f64 * style.size * 0.6;
    if let Some(max) = style.max_width {
        width = width.min(max);
    }
    Vec2::new(width, lines as f64 * line_height)
}

/// Offset from the anchor point to the top-left corner of a text box of `size`.
///
/// `ascent` is the distance from the top of the box to the first baseline.
pub fn text_anchor_offset(size: Vec2, ascent: f64, style: &TextStyle) -> Vec2 {
    let dx = match style.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -size.x / 2.0,
        TextAlign::Right => -size.x,
    };
    let dy = match style.baseline {
        TextBaseline::Top => 0.0,
        TextBaseline::Middle => -size.y / 2.0,
        TextBaseline::Alphabetic => -ascent,
        TextBaseline::Bottom => -size.y,
    };
    Vec2::new(dx, dy)
}

/// Immediate-mode 2D drawing target with a save/restore transform stack.
///
/// Transform calls compose onto the current transform the way a 2D canvas context does:
/// `translate` followed by `rotate` rotates around the translated origin.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resize the backing store. Clears the contents.
    fn resize(&mut self, width: u32, height: u32) -> MotionResult<()>;

    fn save(&mut self);

    fn restore(&mut self);

    fn current_transform(&self) -> Affine;

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    fn reset_transform(&mut self) {
        self.set_transform(Affine::IDENTITY);
    }

    /// Post-multiply the current transform.
    fn transform(&mut self, transform: Affine) {
        let current = self.current_transform();
        self.set_transform(current * transform);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform(Affine::translate(offset));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    fn rotate(&mut self, radians: f64) {
        self.transform(Affine::rotate(radians));
    }

    /// Fill the whole surface, ignoring the current transform.
    fn clear(&mut self, color: Color);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        use kurbo::Shape;
        self.fill_path(&rect.to_path(0.1), color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        use kurbo::Shape;
        self.stroke_path(&rect.to_path(0.1), color, width);
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle);

    /// Size of the box `text` occupies when drawn with `style`.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Vec2;

    /// Draw the `src` region of `image` into `dst` (user space).
    fn draw_image(&mut self, image: &ImageData, src: Rect, dst: Rect);
}

/// A surface whose pixels can be read back.
pub trait RasterSurface: Surface {
    fn read_frame(&mut self) -> MotionResult<FrameRGBA>;
}

/// Current transform plus the stack pushed by `save()`.
#[derive(Clone, Debug, Default)]
pub(crate) struct TransformStack {
    pub(crate) current: Affine,
    stack: Vec<Affine>,
}

impl TransformStack {
    pub(crate) fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// Unbalanced restores are ignored.
    pub(crate) fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.stack.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
