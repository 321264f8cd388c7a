use super::*;
use crate::animation::animator::{Progress, Routine};
use crate::assets::texture::TextureLoader;
use crate::foundation::core::Clock;
use crate::foundation::error::MotionError;
use crate::render::recording::RecordingSurface;
use std::rc::Rc;

fn env() -> SceneEnv {
    SceneEnv {
        time: Clock::new().source(),
        resolution: Vector2f::new(1280.0, 720.0),
        client_size: Vector2f::new(1280.0, 720.0),
        input: InputSource::detached(),
        textures: Rc::new(TextureLoader::new(None)),
    }
}

struct Blank;

impl Scene for Blank {
    fn name(&self) -> &str {
        "blank"
    }

    fn render(&mut self, _surface: &mut dyn Surface, _ctx: &mut RenderCtx) {}
}

#[test]
fn placeholder_asks_for_a_scene() {
    let mut scene = PlaceholderScene::new(Vector2f::new(100.0, 50.0));
    let mut surface = RecordingSurface::new(100, 50);
    scene.render(&mut surface, &mut RenderCtx::default());
    assert_eq!(surface.texts(), vec![PlaceholderScene::MESSAGE]);
}

#[test]
fn default_sequence_is_already_done() {
    let mut scene = Blank;
    assert_eq!(scene.sequence().resume(), Progress::Done);
}

#[test]
fn failing_constructors_yield_none() {
    let ok = provide(|_env| Ok(Blank));
    let failing = provide(|_env| -> MotionResult<Blank> { Err(MotionError::asset("missing")) });
    assert_eq!(ok(&env()).map(|s| s.name().to_string()), Some("blank".into()));
    assert!(failing(&env()).is_none());
}
