use super::*;
use crate::foundation::core::Clock;
use crate::render::recording::RecordingSurface;

#[test]
fn circle_orbits_with_time() {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let mut scene = SimpleFunctional::new(&env).unwrap();
    let mut surface = RecordingSurface::new(1280, 720);

    scene.render(&mut surface, &mut RenderCtx::default());
    assert_eq!(scene.circle_position(), Vector2f::new(550.0, 360.0));

    clock.advance_to(std::f64::consts::FRAC_PI_2);
    scene.render(&mut surface, &mut RenderCtx::default());
    let p = scene.circle_position();
    assert!((p.x - 350.0).abs() < 1e-9);
    assert!((p.y - 560.0).abs() < 1e-9);
}

#[test]
fn both_plots_are_titled() {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let mut scene = SimpleFunctional::new(&env).unwrap();
    let mut surface = RecordingSurface::new(1280, 720);
    scene.render(&mut surface, &mut RenderCtx::default());
    assert_eq!(surface.texts(), vec!["f(x) = cos(x + t)", "f(y) = sin(y + t)"]);
}
