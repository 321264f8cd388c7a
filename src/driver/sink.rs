use std::path::{Path, PathBuf};

use crate::foundation::error::{MotionError, MotionResult};
use crate::render::surface::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frames per second of the synthetic clock.
    pub fps: f64,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing frame indices.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> MotionResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> MotionResult<()>;
    fn end(&mut self) -> MotionResult<()>;
}

/// Keeps every frame in memory. Used by tests.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MotionResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> MotionResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MotionResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn frame_path(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("frame_{idx:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> MotionResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            MotionError::validation(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> MotionResult<()> {
        let path = self.frame_path(idx);
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> MotionResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode a frame as straight-alpha RGBA PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> MotionResult<()> {
    let mut frame = frame.clone();
    frame.unpremultiply();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| MotionError::Other(anyhow::anyhow!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/driver/sink.rs"]
mod tests;
