use crate::foundation::core::{Color, TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextStyle};
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::provider::{Scene, SceneEnv};
use crate::scene::renderable::{ProgressBar, Renderable};
use crate::scenes::frame_animation::{loop_progress, sprite_frame};

/// One swinging cat: its sheet, node placement and swing.
struct CatSpec {
    sheet: &'static str,
    grid: (u32, u32),
    frames: u32,
    position: (f64, f64),
    size: (f64, f64),
    /// Angular frequency and amplitude of `sin(freq * t) * amp`.
    swing: (f64, f64),
}

const CATS: [CatSpec; 3] = [
    CatSpec {
        sheet: "cat-spritesheet.webp",
        grid: (12, 14),
        frames: 158,
        position: (0.0, 200.0),
        size: (200.0, 200.0),
        swing: (2.0, 0.75),
    },
    CatSpec {
        sheet: "cat-alt-spritesheet.webp",
        grid: (9, 8),
        frames: 71,
        position: (0.0, 150.0),
        size: (200.0, 200.0),
        swing: (3.0, 0.5),
    },
    CatSpec {
        sheet: "cat-alt-02-spritesheet.webp",
        grid: (9, 8),
        frames: 68,
        position: (640.0, 100.0),
        size: (200.0, 150.0),
        swing: (4.0, 0.5),
    },
];

/// Three spritesheet cats hanging from each other, each swinging at its own rate, with a
/// progress bar per cat.
pub struct CatPendulum {
    time: TimeSource,
    graph: SceneGraph,
    cats: [NodeId; 3],
    bars: [ProgressBar; 3],
}

impl CatPendulum {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let mut graph = SceneGraph::new();
        let mut cats = Vec::with_capacity(CATS.len());
        let mut bars = Vec::with_capacity(CATS.len());

        for (i, spec) in CATS.iter().enumerate() {
            let n = i + 1;
            let sheet = env.textures.spritesheet(
                spec.sheet,
                spec.grid.0,
                spec.grid.1,
                Some(spec.frames),
            )?;
            let time = env.time.clone();
            let cat = graph.insert(
                CanvasObject::new(Draw::sprite(sheet, move || sprite_frame(time.now())))
                    .at(spec.position.0, spec.position.1)
                    .sized(spec.size.0, spec.size.1)
                    .pivoted(0.5, 0.0),
            );
            let label = graph.insert(CanvasObject::new(Draw::text(
                format!("Cat {n}: {} frames", spec.frames),
                TextStyle::new(24.0, Color::WHITE).centered(),
            )));
            graph.append(cat, label)?;
            cats.push(cat);

            let time = env.time.clone();
            let frames = spec.frames;
            let bar = ProgressBar::new(
                &mut graph,
                Vector2f::new(50.0, env.resolution.y - 202.0 + 64.0 * i as f64),
                Vector2f::new(128.0, 24.0),
                move || {
                    let frame = sprite_frame(time.now()).rem_euclid(i64::from(frames)) + 1;
                    format!("Cat {n}: {frame} / {frames}")
                },
            )?;
            bars.push(bar);
        }

        // Each cat hangs from the next one: cat 3 holds cat 2, which holds cat 1.
        graph.append(cats[2], cats[1])?;
        graph.append(cats[1], cats[0])?;

        Ok(Self {
            time: env.time.clone(),
            graph,
            cats: [cats[0], cats[1], cats[2]],
            bars: [bars[0], bars[1], bars[2]],
        })
    }

    pub fn cats(&self) -> [NodeId; 3] {
        self.cats
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }
}

impl Scene for CatPendulum {
    fn name(&self) -> &str {
        "cat-pendulum"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        let now = self.time.now();
        for (cat, spec) in self.cats.iter().zip(&CATS) {
            let (freq, amp) = spec.swing;
            self.graph[*cat].rotation = (now * freq).sin() * amp;
        }
        self.graph.render(self.cats[2], surface, ctx);

        for (bar, spec) in self.bars.iter().zip(&CATS) {
            bar.set_progress(&mut self.graph, loop_progress(now, spec.frames));
            bar.render(&mut self.graph, surface, ctx);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/cat_pendulum.rs"]
mod tests;
