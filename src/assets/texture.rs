use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::decode::{decode_file, decode_image, premultiply_colors};
use crate::foundation::core::{Color, Rect};
use crate::foundation::error::{MotionError, MotionResult};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Decoded premultiplied RGBA8 pixels.
///
/// Every value gets a fresh id when it is created; surfaces key their upload caches on it, so
/// changed pixels must come in a new `ImageData`.
#[derive(Clone, Debug)]
pub struct ImageData {
    id: u64,
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
    smooth: bool,
}

impl ImageData {
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> MotionResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(MotionError::asset(format!(
                "image data for {width}x{height} needs {expected} bytes, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            smooth: true,
        })
    }

    /// Nearest-neighbour sampling when scaled.
    pub fn pixelated(mut self) -> Self {
        self.smooth = false;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn smooth(&self) -> bool {
        self.smooth
    }

    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// A drawable image handle that may not be available yet.
///
/// Draw code checks [`Texture::is_loaded`] every frame and silently skips drawing until it is.
pub trait Texture {
    fn is_loaded(&self) -> bool;

    fn image(&self) -> Option<&ImageData>;
}

/// A plain image texture.
#[derive(Clone, Debug, Default)]
pub struct ImageTexture {
    source: Option<PathBuf>,
    image: Option<ImageData>,
}

impl ImageTexture {
    /// A texture that never loads.
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn from_image(image: ImageData) -> Self {
        Self {
            source: None,
            image: Some(image),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> MotionResult<Self> {
        Ok(Self::from_image(decode_image(bytes)?))
    }

    /// Load from disk. Failures leave the texture unloaded and are logged.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let image = match decode_file(path) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "texture not loaded");
                None
            }
        };
        Self {
            source: Some(path.to_path_buf()),
            image,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Texture for ImageTexture {
    fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }
}

/// A grid of equally sized animation frames in one image.
#[derive(Clone, Debug)]
pub struct Spritesheet {
    texture: ImageTexture,
    frames_x: u32,
    frames_y: u32,
    frame_count: u32,
}

impl Spritesheet {
    /// Inset applied to each frame's source rectangle so sampling does not bleed into
    /// neighbouring frames.
    pub const BIAS: f64 = 0.5;

    /// `frame_count` defaults to `frames_x * frames_y` when `None`.
    pub fn new(
        texture: ImageTexture,
        frames_x: u32,
        frames_y: u32,
        frame_count: Option<u32>,
    ) -> MotionResult<Self> {
        if frames_x == 0 || frames_y == 0 {
            return Err(MotionError::validation(
                "spritesheet needs at least one column and one row",
            ));
        }
        let cells = frames_x.checked_mul(frames_y).ok_or_else(|| {
            MotionError::validation(format!(
                "spritesheet grid {frames_x}x{frames_y} has too many cells"
            ))
        })?;
        let frame_count = frame_count.unwrap_or(cells);
        if frame_count == 0 || frame_count > cells {
            return Err(MotionError::validation(format!(
                "spritesheet frame count {frame_count} does not fit a {frames_x}x{frames_y} grid"
            )));
        }
        Ok(Self {
            texture,
            frames_x,
            frames_y,
            frame_count,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Source rectangle of `frame_index` (taken modulo the frame count; negative indices wrap).
    pub fn frame_rect(&self, frame_index: i64) -> Option<Rect> {
        let image = self.texture.image()?;
        let index = frame_index.rem_euclid(i64::from(self.frame_count)) as u32;

        let frame_w = f64::from(image.width()) / f64::from(self.frames_x);
        let frame_h = f64::from(image.height()) / f64::from(self.frames_y);
        let x = f64::from(index % self.frames_x) * frame_w;
        let y = f64::from(index / self.frames_x) * frame_h;

        Some(Rect::new(
            x + Self::BIAS,
            y + Self::BIAS,
            x + frame_w - Self::BIAS,
            y + frame_h - Self::BIAS,
        ))
    }
}

impl Texture for Spritesheet {
    fn is_loaded(&self) -> bool {
        self.texture.is_loaded()
    }

    fn image(&self) -> Option<&ImageData> {
        self.texture.image()
    }
}

/// A texture whose pixels are edited directly, one straight-alpha RGBA8 value per cell.
///
/// Edits go to a CPU-side buffer; [`ManualTexture::commit`] publishes them as a new
/// [`ImageData`].
#[derive(Clone, Debug)]
pub struct ManualTexture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    image: ImageData,
}

impl ManualTexture {
    pub fn new(width: u32, height: u32) -> MotionResult<Self> {
        let pixels = vec![Color::TRANSPARENT; (width as usize) * (height as usize)];
        let image = Self::build(width, height, &pixels)?;
        Ok(Self {
            width,
            height,
            pixels,
            image,
        })
    }

    fn build(width: u32, height: u32, pixels: &[Color]) -> MotionResult<ImageData> {
        let bytes = premultiply_colors(pixels);
        Ok(ImageData::from_premul(width, height, bytes)?.pixelated())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize) * (self.width as usize) + x as usize;
        self.pixels[i] = color;
    }

    /// Rebuild the drawable image from the edited pixels.
    pub fn commit(&mut self) -> MotionResult<()> {
        self.image = Self::build(self.width, self.height, &self.pixels)?;
        Ok(())
    }
}

impl Texture for ManualTexture {
    fn is_loaded(&self) -> bool {
        true
    }

    fn image(&self) -> Option<&ImageData> {
        Some(&self.image)
    }
}

/// Loads textures relative to an asset root, sharing decoded images by path.
#[derive(Debug, Default)]
pub struct TextureLoader {
    root: Option<PathBuf>,
    cache: RefCell<HashMap<PathBuf, ImageTexture>>,
}

impl TextureLoader {
    /// Without a root every texture stays unloaded.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn image(&self, name: &str) -> ImageTexture {
        let Some(root) = &self.root else {
            tracing::debug!(name, "no asset root, texture stays unloaded");
            return ImageTexture::unloaded();
        };
        let path = root.join(name.trim_start_matches('/'));
        self.cache
            .borrow_mut()
            .entry(path.clone())
            .or_insert_with(|| ImageTexture::load(&path))
            .clone()
    }

    pub fn spritesheet(
        &self,
        name: &str,
        frames_x: u32,
        frames_y: u32,
        frame_count: Option<u32>,
    ) -> MotionResult<Spritesheet> {
        Spritesheet::new(self.image(name), frames_x, frames_y, frame_count)
    }
}

pub type SharedTextures = Rc<TextureLoader>;

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
