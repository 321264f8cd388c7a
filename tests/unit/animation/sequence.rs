use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::Clock;

fn recorder<T: Copy + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |v| sink.borrow_mut().push(v))
}

#[test]
fn timer_finishes_at_its_duration() {
    let clock = Clock::new();
    let mut timer = Timer::new(clock.source(), 0.5);
    assert!(timer.tick(), "a timer that never started reports finished");

    timer.start();
    clock.advance_to(0.49);
    assert!(!timer.tick());
    clock.advance_to(0.5);
    assert!(timer.tick());
    clock.advance_to(3.0);
    assert!(timer.tick());
}

#[test]
fn zero_duration_timer_finishes_on_first_tick() {
    let clock = Clock::new();
    let mut timer = Timer::new(clock.source(), 0.0);
    timer.start();
    assert!(timer.tick());
}

#[test]
fn interpolator_hits_midpoint_and_exact_end() {
    let clock = Clock::new();
    let (log, setter) = recorder::<f64>();
    let mut interp = Interpolator::new(
        clock.source(),
        setter,
        InterpolatorOptions::new(0.0, 100.0, 1.0),
    );

    interp.start();
    assert_eq!(*log.borrow(), vec![0.0]);

    clock.advance_to(0.5);
    assert!(!interp.tick());
    assert_eq!(*log.borrow().last().unwrap(), 50.0);
    assert_eq!(interp.progress(), 0.5);

    clock.advance_to(1.0);
    assert!(interp.tick());
    assert_eq!(*log.borrow().last().unwrap(), 100.0);
    assert_eq!(interp.progress(), 1.0);
}

#[test]
fn finished_interpolator_tick_has_no_side_effects() {
    let clock = Clock::new();
    let (log, setter) = recorder::<f64>();
    let mut interp = Interpolator::new(
        clock.source(),
        setter,
        InterpolatorOptions::new(0.0, 1.0, 0.25),
    );
    interp.start();
    clock.advance_to(2.0);
    assert!(interp.tick());
    let calls = log.borrow().len();

    clock.advance_to(3.0);
    assert!(interp.tick());
    assert!(interp.tick());
    assert_eq!(log.borrow().len(), calls);
}

#[test]
fn eased_end_value_is_exact() {
    let clock = Clock::new();
    let (log, setter) = recorder::<f64>();
    let mut interp = Interpolator::new(
        clock.source(),
        setter,
        InterpolatorOptions::new(3.0, 7.0, 1.0).with_easing(Ease::OutElastic),
    );
    interp.start();
    clock.advance_to(1.7);
    assert!(interp.tick());
    assert_eq!(*log.borrow().last().unwrap(), 7.0);
}

#[test]
fn reverse_mirrors_values() {
    let clock = Clock::new();
    let (log, setter) = recorder::<f64>();
    let mut interp = Interpolator::new(
        clock.source(),
        setter,
        InterpolatorOptions::new(0.0, 10.0, 1.0),
    );

    let sample = |interp: &mut Interpolator<f64>, base: f64| {
        clock.advance_to(base);
        interp.start();
        for step in 1..=4 {
            clock.advance_to(base + f64::from(step) * 0.25);
            interp.tick();
        }
    };

    sample(&mut interp, 0.0);
    let forward: Vec<f64> = log.borrow_mut().drain(..).collect();

    interp.reverse();
    sample(&mut interp, 10.0);
    let backward: Vec<f64> = log.borrow().clone();

    assert_eq!(forward.first(), Some(&0.0));
    assert_eq!(backward.first(), Some(&10.0));
    assert_eq!(forward.len(), backward.len());
    for (f, b) in forward.iter().zip(&backward) {
        assert!((f + b - 10.0).abs() < 1e-9, "{f} vs {b}");
    }
}

#[test]
fn vector_interpolation() {
    let clock = Clock::new();
    let (log, setter) = recorder::<Vector2f>();
    let mut interp = Interpolator::new(
        clock.source(),
        setter,
        InterpolatorOptions::new(Vector2f::ZERO, Vector2f::new(10.0, -20.0), 2.0),
    );
    interp.start();
    clock.advance_to(1.0);
    interp.tick();
    assert_eq!(*log.borrow().last().unwrap(), Vector2f::new(5.0, -10.0));
}

#[test]
fn keyframe_sequence_needs_two_frames() {
    let clock = Clock::new();
    let setter = |_: f64| {};
    let err =
        InterpolationSequence::uniform(clock.source(), setter, &[1.0], 1.0, Ease::Linear, false);
    assert!(matches!(err, Err(MotionError::Animation(_))));
}

#[test]
fn non_looping_sequence_stops_on_last_keyframe() {
    let clock = Clock::new();
    let (log, setter) = recorder::<f64>();
    let mut seq = InterpolationSequence::uniform(
        clock.source(),
        setter,
        &[0.0, 10.0, 20.0],
        1.0,
        Ease::Linear,
        false,
    )
    .unwrap();
    assert!(seq.is_finished());

    seq.start();
    clock.advance_to(0.5);
    assert!(!seq.tick());
    assert_eq!(*log.borrow().last().unwrap(), 5.0);

    clock.advance_to(1.0);
    assert!(!seq.tick());
    assert_eq!(seq.current_index(), 1);

    clock.advance_to(1.5);
    assert!(!seq.tick());
    assert_eq!(*log.borrow().last().unwrap(), 15.0);

    clock.advance_to(2.0);
    assert!(seq.tick());
    assert_eq!(*log.borrow().last().unwrap(), 20.0);
    assert!(seq.tick());
}

#[test]
fn looping_sequence_never_finishes() {
    let clock = Clock::new();
    let (log, setter) = recorder::<f64>();
    let mut seq = InterpolationSequence::uniform(
        clock.source(),
        setter,
        &[0.0, 10.0, 0.0],
        0.5,
        Ease::InOutQuad,
        true,
    )
    .unwrap();

    seq.start();
    for frame in 1..=600 {
        clock.advance_to(f64::from(frame) / 60.0);
        assert!(!seq.tick());
    }
    assert!(!seq.is_finished());
    let values = log.borrow();
    assert!(values.iter().all(|v| (-1e-9..=10.0 + 1e-9).contains(v)));
}

#[test]
fn shared_handle_drives_inner_sequencer() {
    let clock = Clock::new();
    let timer = shared(Timer::new(clock.source(), 1.0));
    let mut handle = Rc::clone(&timer);
    handle.start();
    clock.advance_to(1.0);
    assert!(handle.tick());
    assert!(timer.borrow().is_finished());
}
