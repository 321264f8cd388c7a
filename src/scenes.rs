//! Example scenes and the name registry the CLI resolves `--scene` against.

pub mod boids;
pub mod cat_pendulum;
pub mod complex_sequence;
pub mod coordinate_systems;
pub mod frame_animation;
pub mod game_of_life;
pub mod simple_functional;
pub mod simple_interpolation;
pub mod simple_sequence;

use crate::animation::animator::{RunTogether, run_together};
use crate::animation::sequence::{SequenceObject, Shared};
use crate::scene::provider::{SceneProvider, provide};

/// A registered scene: its CLI name, a one-line description and a provider factory.
#[derive(Clone, Copy)]
pub struct SceneEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub provider: fn() -> SceneProvider,
}

impl std::fmt::Debug for SceneEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneEntry")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

const REGISTRY: &[SceneEntry] = &[
    SceneEntry {
        name: "boids",
        summary: "flocking with separation, alignment and cohesion",
        provider: || provide(boids::Boids::new),
    },
    SceneEntry {
        name: "game-of-life",
        summary: "Conway's Game of Life on a pixelated texture",
        provider: || provide(game_of_life::GameOfLife::new),
    },
    SceneEntry {
        name: "simple-interpolation",
        summary: "three easings side by side with their curves",
        provider: || provide(simple_interpolation::SimpleInterpolation::new),
    },
    SceneEntry {
        name: "simple-sequence",
        summary: "keyframed motion around a square path",
        provider: || provide(simple_sequence::SimpleSequence::new),
    },
    SceneEntry {
        name: "simple-functional",
        summary: "circular motion next to live sine and cosine plots",
        provider: || provide(simple_functional::SimpleFunctional::new),
    },
    SceneEntry {
        name: "coordinate-systems",
        summary: "screen space versus a moving node's local space",
        provider: || provide(coordinate_systems::CoordinateSystems::new),
    },
    SceneEntry {
        name: "complex-sequence",
        summary: "a hanging sign built from chained and looping sequencers",
        provider: || provide(complex_sequence::ComplexSequence::new),
    },
    SceneEntry {
        name: "frame-animation",
        summary: "a spritesheet cat with a frame counter",
        provider: || provide(frame_animation::FrameAnimation::new),
    },
    SceneEntry {
        name: "cat-pendulum",
        summary: "three nested swinging spritesheet cats",
        provider: || provide(cat_pendulum::CatPendulum::new),
    },
];

pub fn registry() -> &'static [SceneEntry] {
    REGISTRY
}

pub fn find(name: &str) -> Option<&'static SceneEntry> {
    REGISTRY.iter().find(|e| e.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|e| e.name)
}

/// `run_together` over shared sequencers, keeping the caller's handles.
pub(crate) fn together<S: SequenceObject + 'static>(seqs: &[Shared<S>]) -> RunTogether {
    run_together(
        seqs.iter()
            .map(|s| Box::new(s.clone()) as Box<dyn SequenceObject>)
            .collect(),
    )
}

#[cfg(test)]
#[path = "../tests/unit/scenes/registry.rs"]
mod tests;
