use super::*;
use crate::render::recording::{DrawCmd, RecordingSurface};

#[test]
fn span_maps_and_detects_the_axis_crossing() {
    let s = Span::new(-1.0, 6.0);
    assert_eq!(s.length(), 7.0);
    assert!(s.contains(0.0));
    assert_eq!(s.map(-1.0, 0.0, 70.0), 0.0);
    assert_eq!(s.map(6.0, 0.0, 70.0), 70.0);
    assert_eq!(s.axis_crossing(), 0.0);

    assert_eq!(Span::new(2.0, 5.0).axis_crossing(), 2.0);
    assert_eq!(Span::new(-5.0, -2.0).axis_crossing(), -2.0);
    assert_eq!(Span::new(3.0, 3.0).map(3.0, 10.0, 20.0), 10.0);
}

#[test]
fn grid_values_are_multiples_of_step_inside_the_span() {
    assert_eq!(
        Span::new(-100.0, 100.0).grid_values(50.0),
        vec![-100.0, -50.0, 0.0, 50.0, 100.0]
    );
    assert_eq!(Span::new(0.5, 2.5).grid_values(1.0), vec![1.0, 2.0]);
    assert!(Span::new(0.0, 1.0).grid_values(0.0).is_empty());
    assert!(Span::new(0.0, 1.0).grid_values(f64::NAN).is_empty());
    assert!(Span::new(0.0, 1e9).grid_values(1.0).is_empty());
}

#[test]
fn plot_samples_flip_y_and_skip_non_finite_values() {
    let plot = PlotSpec::new("id", |x| x, Span::new(0.0, 1.0), Span::new(0.0, 1.0), 0.25);
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let points = plot.sample_points(bounds);
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], Point::new(0.0, 100.0));
    assert_eq!(points[4], Point::new(100.0, 0.0));

    let holes = PlotSpec::new(
        "log",
        f64::ln,
        Span::new(-1.0, 1.0),
        Span::new(-2.0, 2.0),
        0.5,
    );
    assert!(holes.sample_points(bounds).iter().all(|p| p.y.is_finite()));
}

#[test]
fn plot_draws_curve_tracker_and_title() {
    let plot = PlotSpec::new("sin", f64::sin, Span::new(-1.0, 6.0), Span::new(-2.0, 2.0), 0.1)
        .with_tracker(|| 1.0);
    let mut surface = RecordingSurface::new(200, 200);
    plot.render(Rect::new(-100.0, -50.0, 100.0, 50.0), &mut surface);

    let curve = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCmd::StrokePath { color, .. } if *color == CURVE))
        .count();
    assert_eq!(curve, 1);
    let white_fills = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCmd::FillPath { color, .. } if *color == Color::WHITE))
        .count();
    assert_eq!(white_fills, 1);
    assert_eq!(surface.texts(), vec!["sin"]);
}

#[test]
fn axes_labels_are_optional() {
    let axes = AxesSpec::new(Span::new(-100.0, 100.0), Span::new(-100.0, 100.0), 20.0, false);
    let mut surface = RecordingSurface::new(200, 200);
    axes.render(Rect::new(-100.0, -100.0, 100.0, 100.0), &mut surface);
    assert!(surface.texts().is_empty());
    // 11 vertical + 11 horizontal gridlines and two axes.
    assert_eq!(surface.draw_calls(), 24);

    let labelled = AxesSpec {
        labels: true,
        ..axes
    };
    let mut surface = RecordingSurface::new(200, 200);
    labelled.render(Rect::new(-100.0, -100.0, 100.0, 100.0), &mut surface);
    assert!(surface.texts().contains(&"-100"));
    assert!(surface.texts().contains(&"20"));
}

#[test]
fn polyline_visits_every_point() {
    let path = polyline(&[Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
    assert_eq!(path.elements().len(), 3);
    assert!(polyline(&[]).elements().is_empty());
}
