use crate::driver::sink::{FrameSink, SinkConfig};
use crate::driver::wrapper::CanvasWrapper;
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::surface::RasterSurface;

/// Synthetic clock settings for [`run_headless`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessOpts {
    pub fps: f64,
    /// Number of frames driven, starting at time zero.
    pub frames: u64,
    /// Frames before this index are rendered (so scene state advances) but not read back.
    pub emit_from: u64,
}

impl HeadlessOpts {
    pub fn new(fps: f64, frames: u64) -> Self {
        Self {
            fps,
            frames,
            emit_from: 0,
        }
    }

    /// Drive up to the frame shown at `time` seconds and emit only that frame.
    pub fn single_at(fps: f64, time: f64) -> MotionResult<Self> {
        if !time.is_finite() || time < 0.0 {
            return Err(MotionError::validation(format!(
                "frame time must be finite and >= 0, got {time}"
            )));
        }
        let index = (time * fps).round() as u64;
        Ok(Self {
            fps,
            frames: index + 1,
            emit_from: index,
        })
    }

    fn validate(&self) -> MotionResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(MotionError::validation(format!(
                "fps must be finite and > 0, got {}",
                self.fps
            )));
        }
        if self.frames == 0 || self.emit_from >= self.frames {
            return Err(MotionError::validation(format!(
                "nothing to emit: frames={} emit_from={}",
                self.frames, self.emit_from
            )));
        }
        Ok(())
    }
}

/// What a headless run produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    pub frames_driven: u64,
    pub frames_emitted: u64,
    /// Render diagnostics reported across all frames.
    pub diagnostics: u64,
}

/// Stand-in for a display loop: calls [`CanvasWrapper::frame`] with timestamps `i / fps` and
/// pushes the emitted frames to `sink`.
#[tracing::instrument(skip(driver, sink), fields(scene = driver.scene_name()))]
pub fn run_headless<S: RasterSurface>(
    driver: &mut CanvasWrapper<S>,
    opts: HeadlessOpts,
    sink: &mut dyn FrameSink,
) -> MotionResult<HeadlessStats> {
    opts.validate()?;
    let (width, height) = driver.backing_size();
    sink.begin(SinkConfig {
        width,
        height,
        fps: opts.fps,
    })?;

    let mut stats = HeadlessStats::default();
    for i in 0..opts.frames {
        driver.frame(i as f64 / opts.fps);
        stats.frames_driven += 1;
        stats.diagnostics += driver.render_ctx().diagnostics().len() as u64;
        if i < opts.emit_from {
            continue;
        }
        let frame = driver.read_frame()?;
        sink.push_frame(i - opts.emit_from, &frame)?;
        stats.frames_emitted += 1;
    }

    sink.end()?;
    tracing::debug!(?stats, "headless run finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/driver/headless.rs"]
mod tests;
