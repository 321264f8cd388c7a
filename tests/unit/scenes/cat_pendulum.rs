use super::*;
use crate::foundation::core::Clock;
use crate::render::recording::RecordingSurface;

fn scene() -> (Clock, CatPendulum) {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let scene = CatPendulum::new(&env).unwrap();
    (clock, scene)
}

#[test]
fn cats_hang_from_each_other() {
    let (_clock, scene) = scene();
    let [cat1, cat2, cat3] = scene.cats();
    let graph = scene.graph();
    assert_eq!(graph[cat1].parent(), Some(cat2));
    assert_eq!(graph[cat2].parent(), Some(cat3));
    assert_eq!(graph[cat3].parent(), None);
    assert_eq!(graph[cat3].children()[1], cat2);
}

#[test]
fn each_cat_swings_at_its_own_rate() {
    let (clock, mut scene) = scene();
    let mut surface = RecordingSurface::new(1280, 720);
    clock.advance_to(0.3);
    scene.render(&mut surface, &mut RenderCtx::default());

    let [cat1, cat2, cat3] = scene.cats();
    let graph = scene.graph();
    assert_eq!(graph[cat1].rotation, (0.3f64 * 2.0).sin() * 0.75);
    assert_eq!(graph[cat2].rotation, (0.3f64 * 3.0).sin() * 0.5);
    assert_eq!(graph[cat3].rotation, (0.3f64 * 4.0).sin() * 0.5);
}

#[test]
fn labels_render_through_the_chain_then_the_bars() {
    let (_clock, mut scene) = scene();
    let mut surface = RecordingSurface::new(1280, 720);
    scene.render(&mut surface, &mut RenderCtx::default());
    assert_eq!(
        surface.texts(),
        vec![
            "Cat 3: 68 frames",
            "Cat 2: 71 frames",
            "Cat 1: 158 frames",
            "Cat 1: 1 / 158",
            "Cat 2: 1 / 71",
            "Cat 3: 1 / 68",
        ]
    );
}
