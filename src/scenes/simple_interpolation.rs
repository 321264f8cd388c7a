use std::cell::Cell;
use std::rc::Rc;

use crate::animation::animator::{BoxRoutine, RoutineExt, action, forever, run};
use crate::animation::ease::Ease;
use crate::animation::sequence::{Interpolator, InterpolatorOptions, Shared, Timer, shared};
use crate::foundation::core::{Color, Point, TimeSource};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::Surface;
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::plot::{PlotSpec, Span, line};
use crate::scene::provider::{Scene, SceneEnv};
use crate::scenes::together;

pub const TOP: f64 = 360.0;
pub const BOTTOM: f64 = 600.0;
const TRACK: Color = Color::rgb(0x22, 0x22, 0x22);

struct Lane {
    x: f64,
    title: &'static str,
    ease: Ease,
    fill: Color,
    stroke: Color,
}

const LANES: [Lane; 3] = [
    Lane {
        x: 340.0,
        title: "easeInQuad: t ^ 2",
        ease: Ease::InQuad,
        fill: Color::rgb(0xff, 0x57, 0x22),
        stroke: Color::rgb(0xff, 0x00, 0x00),
    },
    Lane {
        x: 640.0,
        title: "easeOutQuad: t * (2 - t)",
        ease: Ease::OutQuad,
        fill: Color::rgb(0x57, 0xff, 0x22),
        stroke: Color::rgb(0x00, 0xff, 0x22),
    },
    Lane {
        x: 940.0,
        title: "easeInOutElastic: <...>",
        ease: Ease::InOutElastic,
        fill: Color::rgb(0x22, 0x57, 0xff),
        stroke: Color::rgb(0x22, 0x00, 0xff),
    },
];

/// Three balls dropping with different easings, each under a plot of its easing curve whose
/// tracker dot follows the ball's progress.
pub struct SimpleInterpolation {
    time: TimeSource,
    graph: Shared<SceneGraph>,
    balls: Vec<NodeId>,
    plots: Vec<NodeId>,
    interpolators: Vec<Shared<Interpolator<f64>>>,
    /// Last rendered progress of each interpolator, read by the plot trackers.
    dots: Vec<Rc<Cell<f64>>>,
}

impl SimpleInterpolation {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let graph = shared(SceneGraph::new());
        let mut balls = Vec::new();
        let mut plots = Vec::new();
        let mut interpolators = Vec::new();
        let mut dots = Vec::new();

        for lane in &LANES {
            let dot = Rc::new(Cell::new(0.0));
            let tracker = Rc::clone(&dot);
            let ease = lane.ease;
            let spec = PlotSpec::new(
                lane.title,
                move |t| ease.apply(t),
                Span::new(0.0, 1.0),
                Span::new(0.0, 1.0),
                0.01,
            )
            .with_tracker(move || tracker.get());

            let mut g = graph.borrow_mut();
            let ball = g.insert(
                CanvasObject::new(Draw::ellipse(lane.fill, lane.stroke))
                    .at(lane.x, TOP)
                    .sized(50.0, 50.0),
            );
            let plot = g.insert(
                CanvasObject::new(Draw::plot(spec))
                    .at(lane.x, 150.0)
                    .sized(200.0, 200.0),
            );
            drop(g);

            let setter_graph = Rc::clone(&graph);
            let interpolator = Interpolator::new(
                env.time.clone(),
                move |y: f64| setter_graph.borrow_mut()[ball].position.y = y,
                InterpolatorOptions::new(TOP, BOTTOM, 1.0).with_easing(lane.ease),
            );

            balls.push(ball);
            plots.push(plot);
            interpolators.push(shared(interpolator));
            dots.push(dot);
        }

        Ok(Self {
            time: env.time.clone(),
            graph,
            balls,
            plots,
            interpolators,
            dots,
        })
    }

    pub fn graph(&self) -> Shared<SceneGraph> {
        Rc::clone(&self.graph)
    }

    pub fn balls(&self) -> &[NodeId] {
        &self.balls
    }
}

impl Scene for SimpleInterpolation {
    fn name(&self) -> &str {
        "simple-interpolation"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        for lane in &LANES {
            let track = line(Point::new(lane.x, TOP), Point::new(lane.x, BOTTOM));
            surface.stroke_path(&track, TRACK, 16.0);
        }
        for (dot, interpolator) in self.dots.iter().zip(&self.interpolators) {
            dot.set(interpolator.borrow().progress());
        }

        let mut graph = self.graph.borrow_mut();
        for &id in self.balls.iter().chain(&self.plots) {
            graph.render(id, surface, ctx);
        }
    }

    fn sequence(&mut self) -> BoxRoutine {
        let interpolators = self.interpolators.clone();
        let timer = shared(Timer::new(self.time.clone(), 0.5));
        forever(move || {
            let reversed = interpolators.clone();
            together(&interpolators)
                .then(run(timer.clone()))
                .then(action(move || {
                    for i in &reversed {
                        i.borrow_mut().reverse();
                    }
                }))
                .boxed()
        })
        .boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/simple_interpolation.rs"]
mod tests;
