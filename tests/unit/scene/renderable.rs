use super::*;
use crate::render::recording::RecordingSurface;

#[test]
fn progress_scales_the_foreground_and_clamps() {
    let mut graph = SceneGraph::new();
    let bar = ProgressBar::new(
        &mut graph,
        Vector2f::new(10.0, 10.0),
        Vector2f::new(200.0, 32.0),
        || "Frame: 1 / 158".to_string(),
    )
    .unwrap();

    bar.set_progress(&mut graph, 0.25);
    assert_eq!(bar.progress(&graph), 0.25);
    assert_eq!(graph[bar.foreground].size(), Vector2f::new(50.0, 32.0));

    bar.set_progress(&mut graph, 3.0);
    assert_eq!(bar.progress(&graph), 1.0);
    bar.set_progress(&mut graph, f64::NAN);
    assert_eq!(bar.progress(&graph), 0.0);
}

#[test]
fn bar_renders_background_foreground_and_label() {
    let mut graph = SceneGraph::new();
    let bar = ProgressBar::new(
        &mut graph,
        Vector2f::ZERO,
        Vector2f::new(100.0, 10.0),
        || "half".to_string(),
    )
    .unwrap();
    bar.set_progress(&mut graph, 0.5);

    let mut surface = RecordingSurface::new(100, 100);
    let mut ctx = RenderCtx::default();
    bar.render(&mut graph, &mut surface, &mut ctx);
    assert_eq!(surface.texts(), vec!["half"]);
    assert_eq!(surface.draw_calls(), 5);

    // The label is a child, so drawing it alone is a no-op.
    let mut alone = RecordingSurface::new(100, 100);
    bar.label().render(&mut graph, &mut alone, &mut ctx);
    assert!(alone.commands().is_empty());
}
