use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::animation::sequence::{Interpolator, InterpolatorOptions, Timer};
use crate::foundation::core::Clock;

#[test]
fn run_completes_on_the_resume_whose_tick_finishes() {
    let clock = Clock::new();
    let mut r = run(Timer::new(clock.source(), 1.0));

    assert_eq!(r.resume(), Progress::Pending);
    clock.advance_to(0.5);
    assert_eq!(r.resume(), Progress::Pending);
    clock.advance_to(1.0);
    assert_eq!(r.resume(), Progress::Done);
    assert_eq!(r.resume(), Progress::Done);
}

#[test]
fn run_together_keeps_ticking_the_short_one() {
    let clock = Clock::new();
    let a_ticks = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&a_ticks);
    let a = Interpolator::new(
        clock.source(),
        move |_: f64| counter.set(counter.get() + 1),
        InterpolatorOptions::new(0.0, 1.0, 1.0),
    );
    let b = Timer::new(clock.source(), 2.0);
    let mut r = run_together(vec![Box::new(a), Box::new(b)]);

    let mut frame = 0;
    let mut progress = Progress::Pending;
    let mut a_calls_after_finish = 0;
    while progress == Progress::Pending {
        clock.advance_to(f64::from(frame) * 0.25);
        let before = a_ticks.get();
        progress = r.resume();
        if clock.get().now > 1.0 && progress == Progress::Pending {
            // Finished sequencers are still ticked but stay silent.
            a_calls_after_finish += a_ticks.get() - before;
        }
        frame += 1;
        assert!(frame < 100);
    }

    assert_eq!(a_calls_after_finish, 0);
    // b finishes at t = 2.0 (frame 8); the routine completes on the following resume.
    assert_eq!(frame, 10);
}

#[test]
fn run_parallel_completes_with_the_last_routine() {
    let clock = Clock::new();
    let mut r = run_parallel(vec![
        run(Timer::new(clock.source(), 0.5)).boxed(),
        run(Timer::new(clock.source(), 1.0)).boxed(),
    ]);
    assert_eq!(r.resume(), Progress::Pending);
    clock.advance_to(0.5);
    assert_eq!(r.resume(), Progress::Pending);
    clock.advance_to(1.0);
    assert_eq!(r.resume(), Progress::Done);
}

#[test]
fn run_parallel_of_nothing_is_done() {
    assert_eq!(run_parallel(Vec::new()).resume(), Progress::Done);
}

#[test]
fn then_falls_through_in_the_same_resume() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (l1, l2) = (Rc::clone(&log), Rc::clone(&log));
    let mut r = action(move || l1.borrow_mut().push("a"))
        .then(action(move || l2.borrow_mut().push("b")));
    assert_eq!(r.resume(), Progress::Done);
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn chain_runs_in_order() {
    let clock = Clock::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let mut r = chain(vec![
        run(Timer::new(clock.source(), 1.0)).boxed(),
        action(move || h.set(h.get() + 1)).boxed(),
    ]);
    assert_eq!(r.resume(), Progress::Pending);
    assert_eq!(hits.get(), 0);
    clock.advance_to(1.0);
    assert_eq!(r.resume(), Progress::Done);
    assert_eq!(hits.get(), 1);
}

#[test]
fn instant_loop_body_yields_once_per_iteration() {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    let mut r = forever(move || {
        let c = Rc::clone(&c);
        action(move || c.set(c.get() + 1)).boxed()
    });
    for _ in 0..5 {
        assert_eq!(r.resume(), Progress::Pending);
    }
    assert_eq!(count.get(), 5);
}

#[test]
fn repeat_while_checks_condition_per_iteration() {
    let clock = Clock::new();
    let source = clock.source();
    let iterations = Rc::new(Cell::new(0));
    let it = Rc::clone(&iterations);
    let cond_it = Rc::clone(&iterations);
    let mut r = repeat_while(
        move || cond_it.get() < 2,
        move || {
            it.set(it.get() + 1);
            run(Timer::new(source.clone(), 1.0)).boxed()
        },
    );

    let mut frames = 0;
    let mut t = 0.0;
    while r.resume() == Progress::Pending {
        t += 0.5;
        clock.advance_to(t);
        frames += 1;
        assert!(frames < 50);
    }
    assert_eq!(iterations.get(), 2);
}

#[test]
fn from_fn_counts_down() {
    let mut left = 3;
    let mut r = from_fn(move || {
        left -= 1;
        if left == 0 { Progress::Done } else { Progress::Pending }
    });
    assert_eq!(r.resume(), Progress::Pending);
    assert_eq!(r.resume(), Progress::Pending);
    assert_eq!(r.resume(), Progress::Done);
    assert_eq!(r.resume(), Progress::Done);
    assert_eq!(empty().resume(), Progress::Done);
}
