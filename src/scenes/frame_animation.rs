use crate::foundation::core::{TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::Surface;
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::provider::{Scene, SceneEnv};
use crate::scene::renderable::{ProgressBar, Renderable};

/// Playback rate of every spritesheet animation.
pub const SPRITE_FPS: f64 = 24.0;
pub const CAT_FRAMES: u32 = 158;

/// Frame index shown at `now` seconds, before wrapping.
pub fn sprite_frame(now: f64) -> i64 {
    (now * SPRITE_FPS).floor() as i64
}

/// Fraction of a `frames`-long loop played at `now` seconds.
pub fn loop_progress(now: f64, frames: u32) -> f64 {
    ((now * SPRITE_FPS).round() / f64::from(frames)) % 1.0
}

/// A spritesheet cat playing at 24 fps above a bar showing where it is in the loop.
pub struct FrameAnimation {
    time: TimeSource,
    graph: SceneGraph,
    cat: NodeId,
    bar: ProgressBar,
}

impl FrameAnimation {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let mut graph = SceneGraph::new();
        let sheet = env
            .textures
            .spritesheet("cat-spritesheet.webp", 12, 14, Some(CAT_FRAMES))?;
        let time = env.time.clone();
        let center = env.resolution * 0.5;
        let cat = graph.insert(
            CanvasObject::new(Draw::sprite(sheet, move || sprite_frame(time.now())))
                .at(center.x, center.y)
                .sized(256.0, 256.0),
        );

        let time = env.time.clone();
        let bar = ProgressBar::new(
            &mut graph,
            Vector2f::new((env.resolution.x - 1024.0) / 2.0, env.resolution.y - 128.0),
            Vector2f::new(1024.0, 32.0),
            move || {
                let frame = sprite_frame(time.now()).rem_euclid(i64::from(CAT_FRAMES));
                format!("Frame: {frame} / {CAT_FRAMES}")
            },
        )?;

        Ok(Self {
            time: env.time.clone(),
            graph,
            cat,
            bar,
        })
    }

    pub fn bar_progress(&self) -> f64 {
        self.bar.progress(&self.graph)
    }
}

impl Scene for FrameAnimation {
    fn name(&self) -> &str {
        "frame-animation"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        self.graph.render(self.cat, surface, ctx);
        self.bar
            .set_progress(&mut self.graph, loop_progress(self.time.now(), CAT_FRAMES));
        self.bar.render(&mut self.graph, surface, ctx);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/frame_animation.rs"]
mod tests;
