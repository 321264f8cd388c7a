use super::*;

#[test]
fn ignores_bad_samples() {
    let mut fps = FpsTracker::default();
    fps.push(f64::NAN);
    fps.push(f64::INFINITY);
    fps.push(0.0);
    fps.push(-5.0);
    assert!(fps.is_empty());
    assert_eq!(fps.average(), None);
    assert_eq!(fps.min(), None);
    assert_eq!(fps.capacity(), DEFAULT_FPS_CAPACITY);
}

#[test]
fn window_evicts_oldest_and_recomputes_bounds() {
    let mut fps = FpsTracker::new(3);
    for v in [10.0, 60.0, 30.0] {
        fps.push(v);
    }
    assert_eq!(fps.min(), Some(10.0));
    assert_eq!(fps.max(), Some(60.0));
    assert_eq!(fps.average(), Some(100.0 / 3.0));

    fps.push(40.0);
    assert_eq!(fps.len(), 3);
    assert_eq!(fps.min(), Some(30.0));
    assert_eq!(fps.samples().collect::<Vec<_>>(), vec![60.0, 30.0, 40.0]);

    fps.push(50.0);
    assert_eq!(fps.max(), Some(50.0));
    assert_eq!(fps.average(), Some(40.0));
}

#[test]
fn deltas_become_rates() {
    let mut fps = FpsTracker::new(4);
    fps.push_delta(0.5);
    fps.push_delta(0.0);
    assert_eq!(fps.samples().collect::<Vec<_>>(), vec![2.0]);
}
