//! motionbox is a 2D animation playground.
//!
//! It is built from four layers:
//!
//! - a scene graph of [`CanvasObject`]s drawn through a [`Surface`]
//! - cooperative sequencing: start/tick [`SequenceObject`]s driven by resumable [`Routine`]s
//! - a frame driver ([`CanvasWrapper`]) that owns the clock, letterboxes a virtual resolution
//!   and resumes the active scene's routine once per frame
//! - example [`scenes`], runnable headlessly through [`run_headless`] or the `motionbox` CLI
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod driver;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod scenes;

pub use crate::foundation::core::{
    Affine, BezPath, Clock, Color, Point, Rect, Time, TimeSource, Vec2, Vector2f,
};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::animator::{BoxRoutine, Progress, Routine, RoutineExt};
pub use crate::animation::ease::Ease;
pub use crate::animation::sequence::{
    InterpolationSequence, Interpolator, InterpolatorOptions, Keyframe, SequenceObject, Timer,
};
pub use crate::assets::texture::{ImageData, ImageTexture, ManualTexture, Spritesheet, Texture};
pub use crate::driver::config::DriverConfig;
pub use crate::driver::headless::{HeadlessOpts, HeadlessStats, run_headless};
pub use crate::driver::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::driver::wrapper::CanvasWrapper;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::ctx::RenderCtx;
pub use crate::render::recording::RecordingSurface;
pub use crate::render::surface::{FrameRGBA, RasterSurface, Surface, TextStyle};
pub use crate::scene::draw::Draw;
pub use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
pub use crate::scene::provider::{Scene, SceneEnv, SceneProvider, provide};
