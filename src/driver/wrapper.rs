use std::cell::Cell;
use std::rc::Rc;

use crate::animation::animator::BoxRoutine;
use crate::assets::texture::{SharedTextures, TextureLoader};
use crate::driver::config::DriverConfig;
use crate::driver::fps::FpsTracker;
use crate::driver::input::{InputSource, InputState, MouseButton};
use crate::driver::letterbox::Letterbox;
use crate::foundation::core::{Clock, Color, Point, Rect, Time, TimeSource, Vector2f};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::ctx::RenderCtx;
use crate::render::surface::{FrameRGBA, RasterSurface, Surface, TextBaseline, TextStyle};
use crate::scene::plot::{line, polyline};
use crate::scene::provider::{PlaceholderScene, Scene, SceneEnv, SceneProvider};

const DEBUG_PANEL: Color = Color::rgba(0, 0, 0, 0x44);
const INPUT_PANEL: Color = Color::rgba(0, 0, 0, 64);
const FPS_LINE: Color = Color::rgb(0, 255, 0);

/// Frame driver: owns the clock, the surface and the active scene.
///
/// A host calls [`CanvasWrapper::frame`] once per display frame and [`CanvasWrapper::resize`]
/// whenever its client area changes. Scenes draw in a fixed virtual resolution that is
/// letterboxed into the backing store.
pub struct CanvasWrapper<S: Surface> {
    surface: S,
    config: DriverConfig,
    clock: Clock,
    start: Option<f64>,
    resolution: Vector2f,
    client_size: Vector2f,
    device_pixel_ratio: f64,
    letterbox: Letterbox,
    fps: FpsTracker,
    ctx: RenderCtx,
    debug: bool,
    scene: Box<dyn Scene>,
    routine: Option<BoxRoutine>,
    input: Rc<Cell<InputState>>,
    textures: SharedTextures,
    frame_count: u64,
}

impl<S: Surface> std::fmt::Debug for CanvasWrapper<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasWrapper")
            .field("scene", &self.scene.name())
            .field("resolution", &self.resolution)
            .field("backing", &self.backing_size())
            .field("time", &self.clock.get())
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> CanvasWrapper<S> {
    /// Build a driver around `surface`. A missing surface is fatal.
    ///
    /// The surface's current size is taken as the backing store; the client size is derived from
    /// it assuming a device pixel ratio of 1.
    pub fn new(surface: Option<S>, config: DriverConfig) -> MotionResult<Self> {
        let surface =
            surface.ok_or_else(|| MotionError::surface("failed to get a 2D drawing surface"))?;
        config.validate()?;

        let resolution = Vector2f::new(
            f64::from(config.resolution[0]),
            f64::from(config.resolution[1]),
        );
        let client_size = Vector2f::new(
            f64::from(surface.width()),
            f64::from(surface.height()),
        ) * (1.0 / config.resolution_scale);

        tracing::info!(
            width = surface.width(),
            height = surface.height(),
            resolution = ?config.resolution,
            "canvas wrapper initialized"
        );

        Ok(Self {
            fps: FpsTracker::new(config.fps_capacity),
            debug: config.debug,
            ctx: RenderCtx::new(config.debug),
            textures: Rc::new(TextureLoader::new(config.assets_root.clone())),
            scene: Box::new(PlaceholderScene::new(resolution)),
            routine: None,
            surface,
            config,
            clock: Clock::new(),
            start: None,
            resolution,
            client_size,
            device_pixel_ratio: 1.0,
            letterbox: Letterbox::default(),
            input: Rc::new(Cell::new(InputState::default())),
            frame_count: 0,
        })
    }

    /// Handles a scene needs from its driver.
    pub fn env(&self) -> SceneEnv {
        SceneEnv {
            time: self.clock.source(),
            resolution: self.resolution,
            client_size: self.client_size,
            input: InputSource::new(Rc::clone(&self.input)),
            textures: Rc::clone(&self.textures),
        }
    }

    /// Build a scene with `provider` and make it active. `None` from the provider selects the
    /// placeholder scene.
    pub fn set_scene(&mut self, provider: &SceneProvider) {
        let env = self.env();
        let scene = provider(&env).unwrap_or_else(|| {
            tracing::info!("no scene provided, showing placeholder");
            Box::new(PlaceholderScene::new(self.resolution))
        });
        self.activate(scene);
    }

    pub fn set_scene_boxed(&mut self, scene: Box<dyn Scene>) {
        self.activate(scene);
    }

    fn activate(&mut self, mut scene: Box<dyn Scene>) {
        tracing::info!(scene = scene.name(), "scene activated");
        self.routine = Some(scene.sequence());
        self.scene = scene;
    }

    /// Render one frame for the host timestamp `timestamp` (seconds, monotonic).
    ///
    /// The first call defines time zero.
    pub fn frame(&mut self, timestamp: f64) -> Time {
        let start = *self.start.get_or_insert(timestamp);
        let time = self.clock.advance_to(timestamp - start);
        if self.frame_count > 0 {
            self.fps.push_delta(time.delta);
        }

        self.ctx = RenderCtx::new(self.debug);
        self.setup_transformations();

        self.surface.save();
        self.scene.render(&mut self.surface, &mut self.ctx);
        self.surface.restore();

        if let Some(routine) = self.routine.as_mut()
            && routine.resume().is_done()
        {
            tracing::debug!(scene = self.scene.name(), "scene sequence finished");
            self.routine = None;
        }

        if self.debug {
            self.surface.save();
            self.draw_debug_info(time);
            self.draw_input_info();
            self.surface.restore();
        }

        let mut input = self.input.get();
        input.end_frame();
        self.input.set(input);

        self.frame_count += 1;
        time
    }

    fn setup_transformations(&mut self) {
        let backing = self.backing_size();
        self.surface.reset_transform();
        self.surface.clear(self.config.letterbox);

        self.letterbox = Letterbox::fit(
            Vector2f::new(f64::from(backing.0), f64::from(backing.1)),
            self.resolution,
        );
        self.surface.set_transform(self.letterbox.transform());

        let area = Rect::new(0.0, 0.0, self.resolution.x, self.resolution.y);
        self.surface.fill_rect(area, self.config.background);
        self.surface.stroke_rect(area, self.config.border, 1.0);
    }

    fn draw_debug_info(&mut self, time: Time) {
        let style = TextStyle::new(16.0, Color::WHITE);
        let (w, h) = self.backing_size();
        let surface = &mut self.surface;

        surface.fill_rect(Rect::new(0.0, 0.0, 200.0, 100.0), DEBUG_PANEL);
        surface.fill_text("Debug Info", Point::new(10.0, 20.0), &style);
        let rule = line(Point::new(10.0, 30.0), Point::new(190.0, 30.0));
        surface.stroke_path(&rule, Color::WHITE, 1.0);
        surface.fill_text(
            &format!("Delta : {:05.2}ms", time.delta * 1000.0),
            Point::new(10.0, 50.0),
            &style,
        );
        surface.fill_text(&format!("Now   : {:.2}s", time.now), Point::new(10.0, 70.0), &style);
        surface.fill_text(&format!("Canvas: {w}x{h}"), Point::new(10.0, 90.0), &style);

        let graph = Rect::new(0.0, 100.0, 200.0, 160.0);
        surface.fill_rect(graph, DEBUG_PANEL);
        let (Some(avg), Some(min), Some(max)) = (self.fps.average(), self.fps.min(), self.fps.max())
        else {
            return;
        };
        surface.fill_text(
            &format!("FPS {avg:.1} ({min:.0}-{max:.0})"),
            Point::new(10.0, 118.0),
            &style,
        );
        let span = (self.fps.capacity() - 1).max(1) as f64;
        let points: Vec<Point> = self
            .fps
            .samples()
            .enumerate()
            .map(|(i, v)| {
                Point::new(
                    graph.x0 + graph.width() * i as f64 / span,
                    graph.y1 - 32.0 * v / max,
                )
            })
            .collect();
        if points.len() >= 2 {
            surface.stroke_path(&polyline(&points), FPS_LINE, 1.0);
        }
    }

    fn draw_input_info(&mut self) {
        let res = self.resolution;
        let input = self.input.get();
        let lb = self.letterbox;
        let style = TextStyle::new(16.0, Color::WHITE).with_baseline(TextBaseline::Top);
        let surface = &mut self.surface;

        surface.fill_rect(Rect::new(0.0, res.y - 135.0, res.x, res.y), INPUT_PANEL);
        let lines = [
            format!(
                "Client Size: ({}, {}) x {}",
                self.client_size.x, self.client_size.y, self.device_pixel_ratio
            ),
            format!("Working Resolution: ({}, {})", res.x, res.y),
            format!(
                "Real Mouse Position: ({:.2}, {:.2})",
                input.pointer.real.x, input.pointer.real.y
            ),
            format!(
                "Mouse Position: ({:.2}, {:.2})",
                input.pointer.virtual_pos.x, input.pointer.virtual_pos.y
            ),
            format!(
                "Scale: {:.2}, Offset: ({:.2}, {:.2})",
                lb.scale, lb.offset.x, lb.offset.y
            ),
        ];
        for (i, text) in lines.iter().enumerate() {
            let y = res.y - 25.0 * (i as f64 + 1.0);
            surface.fill_text(text, Point::new(10.0, y), &style);
        }
    }

    /// Host client area changed. The backing store becomes
    /// `client_size * device_pixel_ratio * resolution_scale` pixels.
    pub fn resize(&mut self, client_size: Vector2f, device_pixel_ratio: f64) -> MotionResult<()> {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let factor = dpr * self.config.resolution_scale;
        let w = (client_size.x * factor).round().max(1.0) as u32;
        let h = (client_size.y * factor).round().max(1.0) as u32;
        self.surface.resize(w, h)?;
        self.client_size = client_size;
        self.device_pixel_ratio = dpr;
        tracing::info!(width = w, height = h, "canvas resized");
        Ok(())
    }

    /// Pointer moved to `client_pos`, in client (CSS) pixels.
    pub fn pointer_moved(&mut self, client_pos: Vector2f) {
        let real = client_pos * (self.device_pixel_ratio * self.config.resolution_scale);
        let mut input = self.input.get();
        input.pointer_moved(real, &self.letterbox);
        self.input.set(input);
    }

    pub fn pointer_left(&mut self) {
        let mut input = self.input.get();
        input.pointer_left();
        self.input.set(input);
    }

    pub fn button_changed(&mut self, button: MouseButton, pressed: bool) {
        let mut input = self.input.get();
        input.button_changed(button, pressed);
        self.input.set(input);
    }

    pub fn resolution(&self) -> Vector2f {
        self.resolution
    }

    pub fn client_size(&self) -> Vector2f {
        self.client_size
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn backing_size(&self) -> (u32, u32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn letterbox(&self) -> Letterbox {
        self.letterbox
    }

    pub fn time(&self) -> Time {
        self.clock.get()
    }

    pub fn time_source(&self) -> TimeSource {
        self.clock.source()
    }

    pub fn input(&self) -> InputState {
        self.input.get()
    }

    pub fn fps(&self) -> &FpsTracker {
        &self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn scene_name(&self) -> &str {
        self.scene.name()
    }

    /// Whether the active scene's routine has completed.
    pub fn sequence_finished(&self) -> bool {
        self.routine.is_none()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Render state of the last frame, including its diagnostics.
    pub fn render_ctx(&self) -> &RenderCtx {
        &self.ctx
    }

    pub fn textures(&self) -> &SharedTextures {
        &self.textures
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: RasterSurface> CanvasWrapper<S> {
    /// Pixels of the last rendered frame.
    pub fn read_frame(&mut self) -> MotionResult<FrameRGBA> {
        self.surface.read_frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/wrapper.rs"]
mod tests;
