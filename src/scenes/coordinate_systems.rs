use std::rc::Rc;

use crate::animation::animator::{BoxRoutine, RoutineExt, action, forever, run};
use crate::animation::ease::Ease;
use crate::animation::sequence::{Interpolator, InterpolatorOptions, Shared, Timer, shared};
use crate::foundation::core::{Color, Point, TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle};
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::plot::{AxesSpec, Span};
use crate::scene::provider::{Scene, SceneEnv};

/// A ball carrying its own axes and a hat across a screen-space grid. The children move with
/// the ball because they live in its local space.
pub struct CoordinateSystems {
    time: TimeSource,
    resolution: Vector2f,
    graph: Shared<SceneGraph>,
    screen: NodeId,
    ball: NodeId,
    slide: Shared<Interpolator<f64>>,
}

impl CoordinateSystems {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let graph = shared(SceneGraph::new());
        let (screen, ball) = {
            let mut g = graph.borrow_mut();
            let screen = g.insert(
                CanvasObject::new(Draw::axes(AxesSpec::new(
                    Span::new(0.0, 1280.0),
                    Span::new(0.0, 720.0),
                    80.0,
                    false,
                )))
                .at(40.0, 40.0)
                .sized(1200.0, 640.0)
                .pivoted(0.0, 0.0),
            );
            let ball = g.insert(
                CanvasObject::new(Draw::ellipse(Color::rgb(0x88, 0x88, 0x88), Color::BLACK))
                    .at(340.0, 290.0)
                    .sized(50.0, 50.0),
            );
            let hat = g.insert(
                CanvasObject::new(Draw::rectangle(Color::rgb(0xff, 0, 0), Color::BLACK))
                    .at(0.0, -30.0)
                    .sized(25.0, 25.0),
            );
            let local = g.insert(
                CanvasObject::new(Draw::axes(AxesSpec::new(
                    Span::new(-100.0, 100.0),
                    Span::new(-100.0, 100.0),
                    20.0,
                    false,
                )))
                .sized(200.0, 200.0),
            );
            g.append_all(ball, &[hat, local])?;
            (screen, ball)
        };

        let setter_graph = Rc::clone(&graph);
        let slide = Interpolator::new(
            env.time.clone(),
            move |x: f64| setter_graph.borrow_mut()[ball].position.x = x,
            InterpolatorOptions::new(320.0, 960.0, 0.5).with_easing(Ease::InOutCubic),
        );

        Ok(Self {
            time: env.time.clone(),
            resolution: env.resolution,
            graph,
            screen,
            ball,
            slide: shared(slide),
        })
    }

    pub fn ball_position(&self) -> Vector2f {
        self.graph.borrow()[self.ball].position
    }

    pub fn caption(&self) -> String {
        let p = self.ball_position();
        format!("Ball Position: ({:.2}, {:.2})", p.x, p.y)
    }
}

impl Scene for CoordinateSystems {
    fn name(&self) -> &str {
        "coordinate-systems"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        self.graph
            .borrow_mut()
            .render_in_order(&[self.screen, self.ball], surface, ctx);

        let style = TextStyle::new(20.0, Color::WHITE)
            .with_align(TextAlign::Center)
            .with_baseline(TextBaseline::Top);
        surface.fill_text(
            &self.caption(),
            Point::new(self.resolution.x / 2.0, self.resolution.y - 30.0),
            &style,
        );
    }

    fn sequence(&mut self) -> BoxRoutine {
        let slide = Rc::clone(&self.slide);
        let timer = shared(Timer::new(self.time.clone(), 1.0));
        forever(move || {
            let flip = Rc::clone(&slide);
            run(Rc::clone(&slide))
                .then(action(move || flip.borrow_mut().reverse()))
                .then(run(timer.clone()))
                .boxed()
        })
        .boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/coordinate_systems.rs"]
mod tests;
