use super::*;
use crate::foundation::core::Clock;
use crate::render::recording::RecordingSurface;

#[test]
fn frame_index_and_loop_progress() {
    assert_eq!(sprite_frame(0.0), 0);
    assert_eq!(sprite_frame(1.0), 24);
    assert_eq!(sprite_frame(1.0 / 48.0), 0);
    assert_eq!(loop_progress(0.0, 158), 0.0);
    assert!((loop_progress(10.0, 158) - (240.0 / 158.0 - 1.0)).abs() < 1e-12);
}

#[test]
fn bar_tracks_the_loop_and_labels_the_frame() {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let mut scene = FrameAnimation::new(&env).unwrap();
    let mut surface = RecordingSurface::new(1280, 720);

    clock.advance_to(10.0);
    scene.render(&mut surface, &mut RenderCtx::default());
    assert_eq!(surface.texts(), vec!["Frame: 82 / 158"]);
    assert_eq!(scene.bar_progress(), loop_progress(10.0, CAT_FRAMES));
}
