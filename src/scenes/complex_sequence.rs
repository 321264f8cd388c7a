use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use crate::animation::animator::{
    BoxRoutine, RoutineExt, action, chain, repeat_while, run, run_together,
};
use crate::animation::ease::Ease;
use crate::animation::sequence::{
    InterpolationSequence, Interpolator, InterpolatorOptions, Keyframe, SequenceObject, Shared,
    Timer, shared,
};
use crate::foundation::core::Color;
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextAlign, TextBaseline, TextStyle};
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};
use crate::scene::provider::{Scene, SceneEnv};

pub const SIGN_TEXT: &str = "This whole animation is done\n\
with the following objects:\n\
\n\
2 simple sequences.\n\
A looping interpolator.";

/// The swing stops once its amplitude drops below this many radians.
pub const SETTLE_AMPLITUDE: f64 = 0.001;
const NAIL_TILT: f64 = 0.2;

/// Nodes the sequencers write to.
#[derive(Clone, Copy, Debug)]
pub struct SignNodes {
    pub pivot: NodeId,
    pub sign: NodeId,
    pub nail: NodeId,
}

/// A wooden sign drops in on two ropes, wobbles, then swings with a halving amplitude until it
/// comes to rest.
pub struct ComplexSequence {
    graph: Shared<SceneGraph>,
    nodes: SignNodes,
    timer: Shared<Timer>,
    sign_rotation: Shared<InterpolationSequence<f64>>,
    pivot_y: Shared<Interpolator<f64>>,
    swing_in: Shared<InterpolationSequence<f64>>,
    swing: Shared<Interpolator<f64>>,
}

impl ComplexSequence {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let graph = shared(SceneGraph::new());
        let nodes = {
            let mut g = graph.borrow_mut();
            let rope = |rotation: f64| {
                CanvasObject::new(Draw::rounded_rectangle(Color::BLACK, Color::TRANSPARENT, 5.0))
                    .sized(10.0, 300.0)
                    .pivoted(0.5, 0.01)
                    .rotated(rotation)
            };
            let rope_left = g.insert(rope(PI / 5.0));
            let rope_right = g.insert(rope(-PI / 5.0));
            let sign = g.insert(
                CanvasObject::new(Draw::image(env.textures.image("wood.webp")))
                    .at(0.0, 200.0)
                    .sized(400.0, 300.0)
                    .pivoted(0.5, 0.0),
            );
            let text = g.insert(
                CanvasObject::new(Draw::multiline_text(
                    SIGN_TEXT,
                    TextStyle::new(20.0, Color::WHITE)
                        .with_align(TextAlign::Center)
                        .with_baseline(TextBaseline::Top),
                ))
                .at(0.0, 100.0),
            );
            let pivot = g.insert(CanvasObject::new(Draw::None).at(640.0, -1000.0).sized(1.0, 1.0));
            let nail = g.insert(
                CanvasObject::new(Draw::rounded_rectangle(
                    Color::rgb(0x88, 0x88, 0x88),
                    Color::BLACK,
                    4.0,
                ))
                .at(0.0, 8.0)
                .sized(16.0, 16.0)
                .rotated(NAIL_TILT),
            );
            g.append_all(pivot, &[rope_left, rope_right, sign, nail])?;
            g.append(sign, text)?;
            SignNodes { pivot, sign, nail }
        };

        let time = &env.time;
        let g = Rc::clone(&graph);
        let sign_rotation = InterpolationSequence::new(
            time.clone(),
            move |v: f64| g.borrow_mut()[nodes.sign].rotation = v,
            [0.0, -0.05, 0.05, 0.0]
                .into_iter()
                .map(|v| Keyframe::new(v, 0.25))
                .collect(),
            Ease::InOutQuad,
            false,
        )?;

        let g = Rc::clone(&graph);
        let pivot_y = Interpolator::new(
            time.clone(),
            move |v: f64| g.borrow_mut()[nodes.pivot].position.y = v,
            InterpolatorOptions::new(-600.0, 100.0, 1.0).with_easing(Ease::OutElastic),
        );

        let swing_in = InterpolationSequence::uniform(
            time.clone(),
            swing_setter(&graph, nodes),
            &[PI / 5.0, -PI / 5.0, PI / 10.0],
            0.66,
            Ease::InOutQuad,
            false,
        )?;
        let swing = Interpolator::new(
            time.clone(),
            swing_setter(&graph, nodes),
            InterpolatorOptions::new(PI / 10.0, -PI / 10.0, 0.6666).with_easing(Ease::InOutQuad),
        );

        Ok(Self {
            graph,
            nodes,
            timer: shared(Timer::new(time.clone(), 0.5)),
            sign_rotation: shared(sign_rotation),
            pivot_y: shared(pivot_y),
            swing_in: shared(swing_in),
            swing: shared(swing),
        })
    }

    pub fn graph(&self) -> Shared<SceneGraph> {
        Rc::clone(&self.graph)
    }

    pub fn nodes(&self) -> SignNodes {
        self.nodes
    }

    pub fn swing(&self) -> Shared<Interpolator<f64>> {
        Rc::clone(&self.swing)
    }
}

/// Rotates the pivot and counter-rotates the nail so it keeps its tilt on screen.
fn swing_setter(graph: &Shared<SceneGraph>, nodes: SignNodes) -> impl FnMut(f64) + 'static {
    let graph = Rc::clone(graph);
    move |v| {
        let mut g = graph.borrow_mut();
        g[nodes.pivot].rotation = v;
        g[nodes.nail].rotation = -v + NAIL_TILT;
    }
}

impl Scene for ComplexSequence {
    fn name(&self) -> &str {
        "complex-sequence"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        self.graph.borrow_mut().render(self.nodes.pivot, surface, ctx);
    }

    fn sequence(&mut self) -> BoxRoutine {
        let drop_in = run_drop_in(self);

        let settled = Rc::new(Cell::new(false));
        let swing = Rc::clone(&self.swing);
        let graph = Rc::clone(&self.graph);
        let pivot = self.nodes.pivot;
        let flag = Rc::clone(&settled);
        let settle = repeat_while(
            move || !flag.get(),
            move || {
                let swing_after = Rc::clone(&swing);
                let graph = Rc::clone(&graph);
                let settled = Rc::clone(&settled);
                run(Rc::clone(&swing))
                    .then(action(move || {
                        let mut s = swing_after.borrow_mut();
                        s.reverse();
                        s.options.end_value *= 0.5;
                        if s.options.end_value.abs() < SETTLE_AMPLITUDE {
                            graph.borrow_mut()[pivot].rotation = 0.0;
                            settled.set(true);
                        }
                    }))
                    .boxed()
            },
        );

        chain(vec![drop_in, settle.boxed()]).boxed()
    }
}

/// Hold, then drop the sign in while it wobbles and the ropes swing.
fn run_drop_in(scene: &ComplexSequence) -> BoxRoutine {
    let group: Vec<Box<dyn SequenceObject>> = vec![
        Box::new(Rc::clone(&scene.sign_rotation)),
        Box::new(Rc::clone(&scene.pivot_y)),
        Box::new(Rc::clone(&scene.swing_in)),
    ];
    run(Rc::clone(&scene.timer))
        .then(run_together(group))
        .boxed()
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/complex_sequence.rs"]
mod tests;
