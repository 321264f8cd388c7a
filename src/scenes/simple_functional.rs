use crate::foundation::core::{Color, TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::Surface;
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::plot::{PlotSpec, Span};
use crate::scene::provider::{Scene, SceneEnv};

pub const ORBIT_CENTER: Vector2f = Vector2f::new(350.0, 360.0);
pub const ORBIT_RADIUS: f64 = 200.0;

/// A ball circling at one radian per second next to the cosine and sine of its angle.
///
/// Nothing here is sequenced: every position is a function of the current time.
pub struct SimpleFunctional {
    time: TimeSource,
    graph: SceneGraph,
    x_plot: NodeId,
    y_plot: NodeId,
    orbit: NodeId,
    circle: NodeId,
}

impl SimpleFunctional {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let mut graph = SceneGraph::new();
        let wave = |title: &str, f: fn(f64) -> f64, time: TimeSource| {
            PlotSpec::new(
                title,
                move |x| f(x + time.now()),
                Span::new(-1.0, 6.0),
                Span::new(-2.0, 2.0),
                0.1,
            )
        };

        let x_plot = graph.insert(
            CanvasObject::new(Draw::plot(wave("f(x) = cos(x + t)", f64::cos, env.time.clone())))
                .at(950.0, 240.0)
                .sized(300.0, 200.0),
        );
        let y_plot = graph.insert(
            CanvasObject::new(Draw::plot(wave("f(y) = sin(y + t)", f64::sin, env.time.clone())))
                .at(950.0, 480.0)
                .sized(300.0, 200.0),
        );
        let orbit = graph.insert(
            CanvasObject::new(Draw::ellipse(Color::TRANSPARENT, Color::BLACK))
                .at(ORBIT_CENTER.x, ORBIT_CENTER.y)
                .sized(2.0 * ORBIT_RADIUS, 2.0 * ORBIT_RADIUS),
        );
        let circle = graph.insert(
            CanvasObject::new(Draw::ellipse(
                Color::rgb(0xff, 0x57, 0x22),
                Color::rgb(0xff, 0x8a, 0x50),
            ))
            .at(ORBIT_CENTER.x, ORBIT_CENTER.y)
            .sized(50.0, 50.0),
        );

        Ok(Self {
            time: env.time.clone(),
            graph,
            x_plot,
            y_plot,
            orbit,
            circle,
        })
    }

    pub fn circle_position(&self) -> Vector2f {
        self.graph[self.circle].position
    }
}

impl Scene for SimpleFunctional {
    fn name(&self) -> &str {
        "simple-functional"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        self.graph
            .render_in_order(&[self.x_plot, self.y_plot, self.orbit], surface, ctx);
        let t = self.time.now();
        self.graph[self.circle].position =
            ORBIT_CENTER + Vector2f::from_angle(t) * ORBIT_RADIUS;
        self.graph.render(self.circle, surface, ctx);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/simple_functional.rs"]
mod tests;
