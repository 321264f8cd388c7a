use super::*;
use crate::animation::animator::Routine;
use crate::foundation::core::{Clock, Vector2f};
use crate::render::recording::{DrawCmd, RecordingSurface};

fn scene() -> (Clock, SimpleInterpolation) {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let scene = SimpleInterpolation::new(&env).unwrap();
    (clock, scene)
}

fn ball_ys(scene: &SimpleInterpolation) -> Vec<f64> {
    let graph = scene.graph();
    let graph = graph.borrow();
    scene.balls().iter().map(|&b| graph[b].position.y).collect()
}

#[test]
fn balls_drop_with_their_easings_then_rise() {
    let (clock, mut scene) = scene();
    let mut routine = scene.sequence();
    routine.resume();
    assert_eq!(ball_ys(&scene), vec![TOP; 3]);

    clock.advance_to(0.5);
    routine.resume();
    let ys = ball_ys(&scene);
    assert!((ys[0] - (TOP + 240.0 * 0.25)).abs() < 1e-9);
    assert!((ys[1] - (TOP + 240.0 * 0.75)).abs() < 1e-9);
    assert!((ys[2] - (TOP + 120.0)).abs() < 1e-9);

    clock.advance_to(1.0);
    routine.resume();
    assert_eq!(ball_ys(&scene), vec![BOTTOM; 3]);

    // One more frame for the group to report done, then the 0.5 s hold.
    clock.advance_to(1.1);
    routine.resume();
    clock.advance_to(1.6);
    routine.resume();
    // Reversed and restarted in the same resume.
    clock.advance_to(1.7);
    routine.resume();
    let ys = ball_ys(&scene);
    assert!(ys[0] < BOTTOM && ys[1] < BOTTOM);
    assert_ne!(ys[2], BOTTOM);
}

#[test]
fn render_draws_tracks_balls_and_plots() {
    let (_clock, mut scene) = scene();
    let mut surface = RecordingSurface::new(1280, 720);
    scene.render(&mut surface, &mut RenderCtx::default());

    let tracks = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokePath { width, .. } if *width == 16.0))
        .count();
    assert_eq!(tracks, 3);
    let texts = surface.texts();
    assert!(texts.contains(&"easeInQuad: t ^ 2"));
    assert!(texts.contains(&"easeOutQuad: t * (2 - t)"));
    assert!(texts.contains(&"easeInOutElastic: <...>"));
}
