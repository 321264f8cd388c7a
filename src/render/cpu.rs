use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::texture::ImageData;
use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, Vec2};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::surface::{
    FrameRGBA, RasterSurface, Surface, TextStyle, TransformStack, estimate_text_size,
    text_anchor_offset,
};
use crate::render::text::{TextLayoutEngine, first_baseline};

struct LoadedFont {
    engine: TextLayoutEngine,
    data: vello_cpu::peniko::FontData,
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext` and rasterized on
/// [`RasterSurface::read_frame`]. Text needs a font registered with [`CpuSurface::with_font`];
/// without one, text draws are skipped and measured with a fixed-advance estimate.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    state: TransformStack,
    font: Option<LoadedFont>,
    /// Image uploads used since the last `clear()`.
    image_cache: HashMap<u64, vello_cpu::Image>,
    /// Uploads used in the previous frame; dropped on the next `clear()` unless drawn again.
    stale_images: HashMap<u64, vello_cpu::Image>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_font", &self.font.is_some())
            .field("cached_images", &self.cached_images())
            .finish_non_exhaustive()
    }
}

fn dim_to_u16(v: u32, what: &str) -> MotionResult<u16> {
    if v == 0 {
        return Err(MotionError::surface(format!("surface {what} must be non-zero")));
    }
    v.try_into()
        .map_err(|_| MotionError::surface(format!("surface {what} {v} exceeds u16")))
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> MotionResult<Self> {
        let w = dim_to_u16(width, "width")?;
        let h = dim_to_u16(height, "height")?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
            state: TransformStack::default(),
            font: None,
            image_cache: HashMap::new(),
            stale_images: HashMap::new(),
        })
    }

    /// Register a TTF/OTF font used for all text on this surface.
    pub fn with_font(mut self, font_bytes: Vec<u8>) -> MotionResult<Self> {
        let engine = TextLayoutEngine::new(&font_bytes)?;
        tracing::info!(family = engine.family_name(), "registered surface font");
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        self.font = Some(LoadedFont { engine, data });
        Ok(self)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Number of image uploads currently held.
    pub fn cached_images(&self) -> usize {
        self.image_cache.len() + self.stale_images.len()
    }

    /// Start a new cache generation: uploads not drawn since the previous one are released.
    fn age_image_cache(&mut self) {
        self.stale_images = std::mem::take(&mut self.image_cache);
    }

    fn apply_transform(&mut self) {
        self.ctx.set_transform(affine_to_cpu(self.state.current));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn image_paint(&mut self, image: &ImageData) -> MotionResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(&image.id()) {
            return Ok(paint.clone());
        }
        if let Some(paint) = self.stale_images.remove(&image.id()) {
            self.image_cache.insert(image.id(), paint.clone());
            return Ok(paint);
        }
        let pixmap = pixmap_from_premul_bytes(image.rgba8_premul(), image.width(), image.height())?;
        let mut sampler = vello_cpu::peniko::ImageSampler::default();
        if !image.smooth() {
            sampler.quality = vello_cpu::peniko::ImageQuality::Low;
        }
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler,
        };
        self.image_cache.insert(image.id(), paint.clone());
        Ok(paint)
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> MotionResult<()> {
        let w = dim_to_u16(width, "width")?;
        let h = dim_to_u16(height, "height")?;
        if w != self.width || h != self.height {
            self.ctx = vello_cpu::RenderContext::new(w, h);
            self.width = w;
            self.height = h;
        } else {
            self.ctx.reset();
        }
        self.state.reset();
        Ok(())
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn current_transform(&self) -> Affine {
        self.state.current
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.current = transform;
    }

    fn clear(&mut self, color: Color) {
        // Everything below the clear is hidden, so drop it instead of rasterizing it.
        self.ctx.reset();
        self.age_image_cache();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        if color.is_transparent() {
            return;
        }
        self.apply_transform();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        if color.is_transparent() || width <= 0.0 {
            return;
        }
        self.apply_transform();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        let Some(font) = self.font.as_mut() else {
            tracing::debug!(text, "no font registered, skipping text");
            return;
        };
        let layout = match font.engine.layout_plain(
            text,
            style.size as f32,
            style.max_width.map(|w| w as f32),
        ) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::debug!(%err, "text layout failed");
                return;
            }
        };

        let size = Vec2::new(f64::from(layout.width()), f64::from(layout.height()));
        let offset = text_anchor_offset(size, first_baseline(&layout), style);
        let origin = anchor.to_vec2() + offset;
        let font_data = font.data.clone();

        self.ctx
            .set_transform(affine_to_cpu(self.state.current * Affine::translate(origin)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(style.color));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Vec2 {
        let Some(font) = self.font.as_mut() else {
            return estimate_text_size(text, style);
        };
        match font.engine.layout_plain(
            text,
            style.size as f32,
            style.max_width.map(|w| w as f32),
        ) {
            Ok(layout) => Vec2::new(f64::from(layout.width()), f64::from(layout.height())),
            Err(_) => estimate_text_size(text, style),
        }
    }

    fn draw_image(&mut self, image: &ImageData, src: Rect, dst: Rect) {
        if src.width() <= 0.0 || src.height() <= 0.0 {
            return;
        }
        let paint = match self.image_paint(image) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(%err, image = image.id(), "cannot upload image");
                return;
            }
        };

        let sx = dst.width() / src.width();
        let sy = dst.height() / src.height();
        let to_dst = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate((-src.x0, -src.y0));

        self.ctx.set_transform(affine_to_cpu(self.state.current));
        self.ctx.set_paint_transform(affine_to_cpu(to_dst));
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(dst.x0, dst.y0, dst.x1, dst.y1));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

impl RasterSurface for CpuSurface {
    fn read_frame(&mut self) -> MotionResult<FrameRGBA> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MotionResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MotionError::asset("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MotionError::asset("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MotionError::asset("image byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
