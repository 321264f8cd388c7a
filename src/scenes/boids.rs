use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::animator::{BoxRoutine, RoutineExt, action, forever, run};
use crate::animation::sequence::{Timer, shared};
use crate::foundation::core::{BezPath, Color, Point, TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::foundation::math::{Rng64, TAU, lerp, wrap, wrap_angle};
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextBaseline, TextStyle};
use crate::scene::plot::line;
use crate::scene::provider::{Scene, SceneEnv};

pub const BOID_COUNT: usize = 300;
pub const SPEED: f64 = 250.0;
pub const STEP: f64 = 1.0 / 60.0;
const SEED: u64 = 0xB01D5;

/// Radius and turn weight of one steering rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub radius: f64,
    pub weight: f64,
}

pub const SEPARATION: Rule = Rule {
    radius: 40.0,
    weight: 0.25,
};
pub const ALIGNMENT: Rule = Rule {
    radius: 140.0,
    weight: 0.3,
};
pub const COHESION: Rule = Rule {
    radius: 200.0,
    weight: 0.07,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boid {
    pub position: Vector2f,
    /// Heading in radians.
    pub rotation: f64,
}

impl Boid {
    fn turn_towards(&mut self, heading: f64, weight: f64) {
        self.rotation += wrap_angle(heading - self.rotation) * weight;
    }
}

/// Flock state plus the three steering rules. Each rule reads the whole flock as it was when the
/// rule started, so update order inside a rule does not matter.
#[derive(Clone, Debug)]
pub struct Flock {
    pub boids: Vec<Boid>,
    pub bounds: Vector2f,
}

impl Flock {
    /// Spawns `count` boids in the middle quarter of `bounds` with random headings.
    pub fn spawn(count: usize, bounds: Vector2f, rng: &mut Rng64) -> Self {
        let boids = (0..count)
            .map(|_| Boid {
                position: Vector2f::new(
                    rng.range(bounds.x * 0.375, bounds.x * 0.625),
                    rng.range(bounds.y * 0.375, bounds.y * 0.625),
                ),
                rotation: rng.range(0.0, TAU),
            })
            .collect();
        Self { boids, bounds }
    }

    pub fn separation(&mut self, rule: Rule) {
        let snapshot = self.boids.clone();
        for (i, boid) in self.boids.iter_mut().enumerate() {
            let mut steer = Vector2f::ZERO;
            let mut count = 0usize;
            for (j, other) in snapshot.iter().enumerate() {
                if i == j {
                    continue;
                }
                let away = boid.position - other.position;
                let d = away.length();
                if d > 0.0 && d < rule.radius {
                    steer += away.normalize() * (1.0 / d);
                    count += 1;
                }
            }
            if count > 0 {
                let steer = steer * (1.0 / count as f64);
                boid.turn_towards(steer.angle(), rule.weight);
            }
        }
    }

    pub fn alignment(&mut self, rule: Rule) {
        let snapshot = self.boids.clone();
        for (i, boid) in self.boids.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut count = 0usize;
            for (j, other) in snapshot.iter().enumerate() {
                if i != j && (boid.position - other.position).length() < rule.radius {
                    sum += other.rotation;
                    count += 1;
                }
            }
            if count > 0 {
                boid.turn_towards(sum / count as f64, rule.weight);
            }
        }
    }

    /// Steers towards the centre of nearby boids. The screen centre always counts once, which
    /// keeps isolated boids drifting back.
    pub fn cohesion(&mut self, rule: Rule) {
        let snapshot = self.boids.clone();
        let anchor = self.bounds * 0.5;
        for boid in &mut self.boids {
            let mut center = anchor;
            let mut count = 1usize;
            for other in &snapshot {
                if (boid.position - other.position).length() < rule.radius {
                    center += other.position;
                    count += 1;
                }
            }
            let center = center * (1.0 / count as f64);
            boid.turn_towards((center - boid.position).angle(), rule.weight);
        }
    }

    /// Moves every boid along its heading and wraps it around the screen edges.
    pub fn physics(&mut self, dt: f64) {
        for boid in &mut self.boids {
            boid.position += Vector2f::from_angle(boid.rotation) * (SPEED * dt);
            boid.position = Vector2f::new(
                wrap(boid.position.x, self.bounds.x),
                wrap(boid.position.y, self.bounds.y),
            );
        }
    }

    pub fn step(&mut self, dt: f64) {
        self.separation(SEPARATION);
        self.alignment(ALIGNMENT);
        self.cohesion(COHESION);
        self.physics(dt);
    }

    /// Purple in the top-left corner, shading towards green at the bottom-right.
    pub fn color_at(&self, position: Vector2f) -> Color {
        let tx = position.x / self.bounds.x;
        let ty = position.y / self.bounds.y;
        let channel =
            |a: u8, b: u8, t: f64| lerp(f64::from(a), f64::from(b), t).clamp(0.0, 255.0) as u8;
        Color::rgb(
            channel(200, 200, tx),
            channel(128, 255, ty),
            channel(255, 128, tx + ty),
        )
    }
}

fn arrow() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((10.0, 0.0));
    path.line_to((-10.0, 7.0));
    path.line_to((-5.0, 0.0));
    path.line_to((-10.0, -7.0));
    path.close_path();
    path
}

/// Flocking with separation, alignment and cohesion, stepped at a fixed 60 Hz.
pub struct Boids {
    time: TimeSource,
    flock: Rc<RefCell<Flock>>,
    shape: BezPath,
}

impl Boids {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        Ok(Self::with_seed(env, SEED))
    }

    pub fn with_seed(env: &SceneEnv, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        Self {
            time: env.time.clone(),
            flock: Rc::new(RefCell::new(Flock::spawn(BOID_COUNT, env.resolution, &mut rng))),
            shape: arrow(),
        }
    }

    pub fn flock(&self) -> Rc<RefCell<Flock>> {
        Rc::clone(&self.flock)
    }
}

impl Scene for Boids {
    fn name(&self) -> &str {
        "boids"
    }

    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        let flock = self.flock.borrow();
        for boid in &flock.boids {
            surface.save();
            surface.translate(boid.position.to_vec2());
            surface.rotate(boid.rotation);
            surface.fill_path(&self.shape, flock.color_at(boid.position));
            if ctx.debug() {
                surface.stroke_path(
                    &line(Point::ZERO, Point::new(50.0, 0.0)),
                    Color::rgb(255, 0, 0),
                    1.0,
                );
            }
            surface.restore();
        }

        let style = TextStyle::new(16.0, Color::WHITE).with_baseline(TextBaseline::Top);
        let lines = [
            format!("Boids: {}", flock.boids.len()),
            format!("Separation: {:.1} @ {:.2}", SEPARATION.radius, SEPARATION.weight),
            format!("Alignment: {:.1} @ {:.2}", ALIGNMENT.radius, ALIGNMENT.weight),
            format!("Cohesion: {:.1} @ {:.2}", COHESION.radius, COHESION.weight),
        ];
        for (i, text) in lines.iter().enumerate() {
            surface.fill_text(text, Point::new(20.0, 20.0 * (i + 1) as f64), &style);
        }
    }

    fn sequence(&mut self) -> BoxRoutine {
        let timer = shared(Timer::new(self.time.clone(), STEP));
        let flock = Rc::clone(&self.flock);
        forever(move || {
            let flock = Rc::clone(&flock);
            run(timer.clone())
                .then(action(move || flock.borrow_mut().step(STEP)))
                .boxed()
        })
        .boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/boids.rs"]
mod tests;
