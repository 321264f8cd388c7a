use std::rc::Rc;

use crate::animation::animator::{BoxRoutine, RoutineExt, forever};
use crate::animation::ease::Ease;
use crate::animation::sequence::{InterpolationSequence, Shared, shared};
use crate::foundation::core::{Color, Vector2f};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::Surface;
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::provider::{Scene, SceneEnv};
use crate::scenes::together;

pub const XS: [f64; 4] = [440.0, 840.0, 840.0, 440.0];
pub const YS: [f64; 4] = [160.0, 160.0, 560.0, 560.0];
pub const SEGMENT: f64 = 0.5;

/// A ball tracing three sides of a square with two keyframe sequences, one per axis.
pub struct SimpleSequence {
    graph: Shared<SceneGraph>,
    circle: NodeId,
    path: NodeId,
    axes: [Shared<InterpolationSequence<f64>>; 2],
}

impl SimpleSequence {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let graph = shared(SceneGraph::new());
        let (circle, path) = {
            let mut g = graph.borrow_mut();
            let circle = g.insert(
                CanvasObject::new(Draw::ellipse(
                    Color::rgb(0xff, 0x57, 0x22),
                    Color::rgb(0xff, 0x00, 0x00),
                ))
                .at(340.0, 360.0)
                .sized(50.0, 50.0),
            );
            let path = g.insert(
                CanvasObject::new(Draw::rounded_rectangle(Color::TRANSPARENT, Color::WHITE, 8.0))
                    .at(640.0, 360.0)
                    .sized(400.0, 400.0),
            );
            (circle, path)
        };

        let gx = Rc::clone(&graph);
        let x = InterpolationSequence::uniform(
            env.time.clone(),
            move |v: f64| gx.borrow_mut()[circle].position.x = v,
            &XS,
            SEGMENT,
            Ease::InOutQuad,
            false,
        )?;
        let gy = Rc::clone(&graph);
        let y = InterpolationSequence::uniform(
            env.time.clone(),
            move |v: f64| gy.borrow_mut()[circle].position.y = v,
            &YS,
            SEGMENT,
            Ease::InOutQuad,
            false,
        )?;

        Ok(Self {
            graph,
            circle,
            path,
            axes: [shared(x), shared(y)],
        })
    }

    pub fn circle_position(&self) -> Vector2f {
        self.graph.borrow()[self.circle].position
    }
}

impl Scene for SimpleSequence {
    fn name(&self) -> &str {
        "simple-sequence"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        self.graph
            .borrow_mut()
            .render_in_order(&[self.path, self.circle], surface, ctx);
    }

    fn sequence(&mut self) -> BoxRoutine {
        let axes = self.axes.clone();
        forever(move || together(&axes).boxed()).boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/simple_sequence.rs"]
mod tests;
