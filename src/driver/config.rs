use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::driver::fps::DEFAULT_FPS_CAPACITY;
use crate::foundation::core::Color;
use crate::foundation::error::{MotionError, MotionResult};

/// Frame driver settings, usually read from a JSON file.
///
/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Virtual resolution scenes draw in.
    pub resolution: [u32; 2],
    /// Extra supersampling applied on top of the device pixel ratio.
    pub resolution_scale: f64,
    /// Fill of the virtual area.
    pub background: Color,
    /// Fill of the bars around the virtual area.
    pub letterbox: Color,
    /// Outline of the virtual area.
    pub border: Color,
    pub debug: bool,
    pub fps_capacity: usize,
    /// TTF/OTF file used for all text. Without one, text is measured but not drawn.
    pub font: Option<PathBuf>,
    /// Directory textures are loaded from.
    pub assets_root: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            resolution: [1280, 720],
            resolution_scale: 1.5,
            background: Color::rgb(0x44, 0x44, 0x44),
            letterbox: Color::BLACK,
            border: Color::WHITE,
            debug: false,
            fps_capacity: DEFAULT_FPS_CAPACITY,
            font: None,
            assets_root: None,
        }
    }
}

impl DriverConfig {
    /// Parse and validate a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MotionError::serde(format!("parse driver config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MotionError::validation(format!("open driver config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> MotionResult<()> {
        let [w, h] = self.resolution;
        if w == 0 || h == 0 {
            return Err(MotionError::validation(format!(
                "resolution must be positive, got {w}x{h}"
            )));
        }
        if !self.resolution_scale.is_finite() || self.resolution_scale <= 0.0 {
            return Err(MotionError::validation(format!(
                "resolution_scale must be finite and > 0, got {}",
                self.resolution_scale
            )));
        }
        if self.fps_capacity < 2 {
            return Err(MotionError::validation(format!(
                "fps_capacity must be at least 2, got {}",
                self.fps_capacity
            )));
        }
        Ok(())
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = Some(root.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/config.rs"]
mod tests;
