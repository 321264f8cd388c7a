use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::foundation::core::{TimeSource, Vector2f};
use crate::foundation::error::{MotionError, MotionResult};

/// A start/tick state machine driven by the frame clock.
///
/// `start()` moves the object into the running state and captures the current time. `tick()`
/// advances it and reports whether it is finished. Once finished, further ticks return `true`
/// without side effects. An object that was never started also reports finished.
pub trait SequenceObject {
    fn start(&mut self);

    fn tick(&mut self) -> bool;

    fn is_finished(&self) -> bool;
}

impl<S: SequenceObject + ?Sized> SequenceObject for Box<S> {
    fn start(&mut self) {
        (**self).start();
    }

    fn tick(&mut self) -> bool {
        (**self).tick()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}

/// Sequencers are usually owned by a scene and run repeatedly by its routine, so they are
/// shared through `Rc<RefCell<_>>` handles.
impl<S: SequenceObject + ?Sized> SequenceObject for Rc<RefCell<S>> {
    fn start(&mut self) {
        self.borrow_mut().start();
    }

    fn tick(&mut self) -> bool {
        self.borrow_mut().tick()
    }

    fn is_finished(&self) -> bool {
        self.borrow().is_finished()
    }
}

pub type Shared<S> = Rc<RefCell<S>>;

pub fn shared<S>(s: S) -> Shared<S> {
    Rc::new(RefCell::new(s))
}

/// Interpolation contract for animated value types.
pub trait Lerp: Copy {
    /// Interpolate from `a` to `b` with factor `t` (may leave `[0, 1]` for overshooting eases).
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vector2f {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Vector2f::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// A wait of fixed duration.
#[derive(Debug)]
pub struct Timer {
    time: TimeSource,
    duration: f64,
    start_time: f64,
    end_time: f64,
    finished: bool,
}

impl Timer {
    pub fn new(time: TimeSource, duration: f64) -> Self {
        Self {
            time,
            duration,
            start_time: 0.0,
            end_time: 0.0,
            finished: true,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }
}

impl SequenceObject for Timer {
    fn start(&mut self) {
        self.start_time = self.time.now();
        self.end_time = self.start_time + self.duration;
        self.finished = false;
    }

    fn tick(&mut self) -> bool {
        if self.finished {
            return true;
        }
        if self.time.now() >= self.end_time {
            self.finished = true;
        }
        self.finished
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Endpoints, duration and easing of an [`Interpolator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolatorOptions<T> {
    pub start_value: T,
    pub end_value: T,
    /// Seconds.
    pub duration: f64,
    pub easing: Ease,
}

impl<T> InterpolatorOptions<T> {
    pub fn new(start_value: T, end_value: T, duration: f64) -> Self {
        Self {
            start_value,
            end_value,
            duration,
            easing: Ease::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }
}

/// Animates a value from `start_value` to `end_value`, pushing each frame's value through a
/// setter.
pub struct Interpolator<T: Lerp> {
    time: TimeSource,
    setter: Box<dyn FnMut(T)>,
    pub options: InterpolatorOptions<T>,
    start_time: f64,
    end_time: f64,
    finished: bool,
}

impl<T: Lerp> Interpolator<T> {
    pub fn new(
        time: TimeSource,
        setter: impl FnMut(T) + 'static,
        options: InterpolatorOptions<T>,
    ) -> Self {
        Self {
            time,
            setter: Box::new(setter),
            options,
            start_time: 0.0,
            end_time: 0.0,
            finished: true,
        }
    }

    fn raw_progress(&self) -> f64 {
        if self.options.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = self.time.now() - self.start_time;
        (elapsed / self.options.duration).clamp(0.0, 1.0)
    }

    /// Normalized, un-eased progress; `1` once finished.
    pub fn progress(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        self.raw_progress()
    }

    /// Swap the endpoints. Takes effect on the next `start()`.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.options.start_value, &mut self.options.end_value);
    }
}

impl<T: Lerp> SequenceObject for Interpolator<T> {
    fn start(&mut self) {
        self.start_time = self.time.now();
        self.end_time = self.start_time + self.options.duration;
        self.finished = false;
        (self.setter)(self.options.start_value);
    }

    fn tick(&mut self) -> bool {
        if self.finished {
            return true;
        }

        let eased = self.options.easing.apply(self.raw_progress());
        let value = T::lerp(self.options.start_value, self.options.end_value, eased);
        (self.setter)(value);

        if self.time.now() >= self.end_time {
            self.finished = true;
            // Easing may leave the value a rounding error short of the target.
            (self.setter)(self.options.end_value);
        }

        self.finished
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<T: Lerp + std::fmt::Debug> std::fmt::Debug for Interpolator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpolator")
            .field("options", &self.options)
            .field("start_time", &self.start_time)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// One stop of an [`InterpolationSequence`]: the value and how long the move to the next stop
/// takes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub value: T,
    pub duration: f64,
}

impl<T> Keyframe<T> {
    pub fn new(value: T, duration: f64) -> Self {
        Self { value, duration }
    }
}

/// Interpolates through consecutive keyframe pairs with a shared easing.
///
/// Without looping the sequence finishes on the last keyframe, one segment short of the keyframe
/// count. With looping the last keyframe interpolates back to the first and the sequence never
/// finishes.
pub struct InterpolationSequence<T: Lerp> {
    keyframes: Vec<Keyframe<T>>,
    loops: bool,
    index: usize,
    started: bool,
    interpolator: Interpolator<T>,
}

impl<T: Lerp> InterpolationSequence<T> {
    pub fn new(
        time: TimeSource,
        setter: impl FnMut(T) + 'static,
        keyframes: Vec<Keyframe<T>>,
        easing: Ease,
        loops: bool,
    ) -> MotionResult<Self> {
        if keyframes.len() < 2 {
            return Err(MotionError::animation(
                "interpolation sequence needs at least two keyframes",
            ));
        }
        let options = InterpolatorOptions {
            start_value: keyframes[0].value,
            end_value: keyframes[1].value,
            duration: keyframes[0].duration,
            easing,
        };
        Ok(Self {
            interpolator: Interpolator::new(time, setter, options),
            keyframes,
            loops,
            index: 0,
            started: false,
        })
    }

    /// Same duration for every segment.
    pub fn uniform(
        time: TimeSource,
        setter: impl FnMut(T) + 'static,
        values: &[T],
        duration: f64,
        easing: Ease,
        loops: bool,
    ) -> MotionResult<Self> {
        let keyframes = values.iter().map(|&v| Keyframe::new(v, duration)).collect();
        Self::new(time, setter, keyframes, easing, loops)
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn loops(&self) -> bool {
        self.loops
    }

    /// Index of the keyframe the current segment starts from.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Progress of the current segment.
    pub fn segment_progress(&self) -> f64 {
        self.interpolator.progress()
    }

    fn begin_segment(&mut self) {
        let n = self.keyframes.len();
        let from = self.keyframes[self.index];
        let to = self.keyframes[(self.index + 1) % n];
        self.interpolator.options.start_value = from.value;
        self.interpolator.options.end_value = to.value;
        self.interpolator.options.duration = from.duration;
        self.interpolator.start();
    }
}

impl<T: Lerp> SequenceObject for InterpolationSequence<T> {
    fn start(&mut self) {
        self.index = 0;
        self.started = true;
        self.begin_segment();
    }

    fn tick(&mut self) -> bool {
        if self.is_finished() {
            return true;
        }

        if self.interpolator.tick() {
            let n = self.keyframes.len();
            self.index += 1;
            if self.loops {
                self.index %= n;
                self.begin_segment();
            } else if self.index < n - 1 {
                self.begin_segment();
            }
        }

        self.is_finished()
    }

    fn is_finished(&self) -> bool {
        if !self.started {
            return true;
        }
        !self.loops && self.index >= self.keyframes.len() - 1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;
