//! Resumable routines and the combinators that drive sequencers from them.
//!
//! A [`Routine`] is resumed once per frame by the frame driver. Each `Pending` result hands
//! control back to the host until the next frame; `Done` means the routine has completed and will
//! not be resumed again. Completed routines keep answering `Done`.

use crate::animation::sequence::SequenceObject;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Pending,
    Done,
}

impl Progress {
    pub fn is_done(self) -> bool {
        self == Progress::Done
    }
}

pub trait Routine {
    fn resume(&mut self) -> Progress;
}

impl<R: Routine + ?Sized> Routine for Box<R> {
    fn resume(&mut self) -> Progress {
        (**self).resume()
    }
}

pub type BoxRoutine = Box<dyn Routine>;

/// Chaining helpers available on every routine.
pub trait RoutineExt: Routine + Sized {
    /// Run `next` after `self`. `next` is resumed in the same frame `self` completes in.
    fn then<R: Routine>(self, next: R) -> Then<Self, R> {
        Then {
            first: Some(self),
            second: next,
        }
    }

    fn boxed(self) -> BoxRoutine
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<R: Routine> RoutineExt for R {}

/// Drive one sequencer: start it, then tick once per resume until it reports finished.
pub fn run<S: SequenceObject>(seq: S) -> Run<S> {
    Run {
        seq,
        started: false,
    }
}

pub struct Run<S> {
    seq: S,
    started: bool,
}

impl<S: SequenceObject> Routine for Run<S> {
    fn resume(&mut self) -> Progress {
        if !self.started {
            self.started = true;
            self.seq.start();
        }
        if self.seq.tick() {
            Progress::Done
        } else {
            Progress::Pending
        }
    }
}

/// Start every sequencer, then tick all of them each frame (finished ones included) until a
/// frame in which every one reported finished.
pub fn run_together(seqs: Vec<Box<dyn SequenceObject>>) -> RunTogether {
    RunTogether {
        seqs,
        state: TogetherState::Idle,
    }
}

enum TogetherState {
    Idle,
    Running { all_finished: bool },
    Done,
}

pub struct RunTogether {
    seqs: Vec<Box<dyn SequenceObject>>,
    state: TogetherState,
}

impl RunTogether {
    fn tick_all(&mut self) -> bool {
        let mut all = true;
        for seq in &mut self.seqs {
            all = seq.tick() && all;
        }
        all
    }
}

impl Routine for RunTogether {
    fn resume(&mut self) -> Progress {
        match self.state {
            TogetherState::Idle => {
                for seq in &mut self.seqs {
                    seq.start();
                }
            }
            TogetherState::Running { all_finished: true } | TogetherState::Done => {
                self.state = TogetherState::Done;
                return Progress::Done;
            }
            TogetherState::Running { all_finished: false } => {}
        }

        let all_finished = self.tick_all();
        self.state = TogetherState::Running { all_finished };
        Progress::Pending
    }
}

/// Advance every unfinished routine once per resume. Completes in the resume in which the last
/// routine completes.
pub fn run_parallel(routines: Vec<BoxRoutine>) -> RunParallel {
    let finished = vec![false; routines.len()];
    RunParallel { routines, finished }
}

pub struct RunParallel {
    routines: Vec<BoxRoutine>,
    finished: Vec<bool>,
}

impl Routine for RunParallel {
    fn resume(&mut self) -> Progress {
        for (routine, finished) in self.routines.iter_mut().zip(&mut self.finished) {
            if !*finished {
                *finished = routine.resume().is_done();
            }
        }
        if self.finished.iter().all(|&f| f) {
            Progress::Done
        } else {
            Progress::Pending
        }
    }
}

pub struct Then<A, B> {
    first: Option<A>,
    second: B,
}

impl<A: Routine, B: Routine> Routine for Then<A, B> {
    fn resume(&mut self) -> Progress {
        if let Some(first) = &mut self.first {
            if first.resume() == Progress::Pending {
                return Progress::Pending;
            }
            self.first = None;
        }
        self.second.resume()
    }
}

/// Run routines one after another.
pub fn chain(routines: Vec<BoxRoutine>) -> Chain {
    Chain {
        routines: routines.into(),
    }
}

pub struct Chain {
    routines: std::collections::VecDeque<BoxRoutine>,
}

impl Routine for Chain {
    fn resume(&mut self) -> Progress {
        while let Some(front) = self.routines.front_mut() {
            if front.resume() == Progress::Pending {
                return Progress::Pending;
            }
            self.routines.pop_front();
        }
        Progress::Done
    }
}

/// Run a closure once and complete in the same resume.
pub fn action<F: FnOnce()>(f: F) -> Action<F> {
    Action { f: Some(f) }
}

pub struct Action<F> {
    f: Option<F>,
}

impl<F: FnOnce()> Routine for Action<F> {
    fn resume(&mut self) -> Progress {
        if let Some(f) = self.f.take() {
            f();
        }
        Progress::Done
    }
}

pub fn from_fn<F: FnMut() -> Progress>(f: F) -> FromFn<F> {
    FromFn { f, done: false }
}

pub struct FromFn<F> {
    f: F,
    done: bool,
}

impl<F: FnMut() -> Progress> Routine for FromFn<F> {
    fn resume(&mut self) -> Progress {
        if !self.done {
            self.done = (self.f)().is_done();
        }
        if self.done {
            Progress::Done
        } else {
            Progress::Pending
        }
    }
}

/// A routine that completes immediately.
pub fn empty() -> Empty {
    Empty
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Empty;

impl Routine for Empty {
    fn resume(&mut self) -> Progress {
        Progress::Done
    }
}

/// Build a fresh body with `factory` and run it, for as long as `cond` holds when an iteration
/// begins.
///
/// When a body completes after yielding, the next iteration begins in the same resume. A body that
/// completes without ever yielding costs one frame, so an instant body cannot spin the loop.
pub fn repeat_while<C, F>(cond: C, factory: F) -> RepeatWhile<C, F>
where
    C: FnMut() -> bool,
    F: FnMut() -> BoxRoutine,
{
    RepeatWhile {
        cond,
        factory,
        current: None,
        yielded: false,
        done: false,
    }
}

/// [`repeat_while`] with a condition that always holds.
pub fn forever<F>(factory: F) -> RepeatWhile<fn() -> bool, F>
where
    F: FnMut() -> BoxRoutine,
{
    fn always() -> bool {
        true
    }
    repeat_while(always as fn() -> bool, factory)
}

pub struct RepeatWhile<C, F> {
    cond: C,
    factory: F,
    current: Option<BoxRoutine>,
    yielded: bool,
    done: bool,
}

impl<C, F> Routine for RepeatWhile<C, F>
where
    C: FnMut() -> bool,
    F: FnMut() -> BoxRoutine,
{
    fn resume(&mut self) -> Progress {
        if self.done {
            return Progress::Done;
        }
        loop {
            if self.current.is_none() {
                if !(self.cond)() {
                    self.done = true;
                    return Progress::Done;
                }
                self.yielded = false;
                self.current = Some((self.factory)());
            }
            let Some(body) = self.current.as_mut() else {
                return Progress::Done;
            };

            if body.resume() == Progress::Pending {
                self.yielded = true;
                return Progress::Pending;
            }

            self.current = None;
            if !self.yielded {
                return Progress::Pending;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
