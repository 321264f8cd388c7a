use std::rc::Rc;

use crate::animation::animator::{BoxRoutine, RoutineExt, empty};
use crate::assets::texture::{SharedTextures, TextureLoader};
use crate::driver::input::InputSource;
use crate::foundation::core::{Color, Point, TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextStyle};

/// Everything a scene may read from the driver that hosts it.
#[derive(Clone, Debug)]
pub struct SceneEnv {
    pub time: TimeSource,
    /// Virtual resolution the scene draws in.
    pub resolution: Vector2f,
    /// Host client area, in CSS pixels.
    pub client_size: Vector2f,
    pub input: InputSource,
    pub textures: SharedTextures,
}

impl SceneEnv {
    /// An environment outside any driver: no pointer, no asset root.
    pub fn detached(time: TimeSource, resolution: Vector2f) -> Self {
        Self {
            time,
            resolution,
            client_size: resolution,
            input: InputSource::detached(),
            textures: Rc::new(TextureLoader::new(None)),
        }
    }
}

/// A drawable animation hosted by the frame driver.
///
/// Each frame the driver calls [`Scene::render`] and then resumes the routine returned by
/// [`Scene::sequence`] once.
pub trait Scene {
    fn name(&self) -> &str;

    /// Draw the current state in virtual-resolution coordinates.
    fn render(&mut self, surface: &mut dyn Surface, ctx: &mut RenderCtx);

    /// Called once when the scene becomes active.
    fn sequence(&mut self) -> BoxRoutine {
        empty().boxed()
    }
}

/// Builds a scene for a driver. `None` selects the placeholder scene.
pub type SceneProvider = Box<dyn Fn(&SceneEnv) -> Option<Box<dyn Scene>>>;

/// Wrap a fallible scene constructor; construction errors are logged and select the placeholder.
pub fn provide<S, F>(build: F) -> SceneProvider
where
    S: Scene + 'static,
    F: Fn(&SceneEnv) -> MotionResult<S> + 'static,
{
    Box::new(move |env| match build(env) {
        Ok(scene) => Some(Box::new(scene) as Box<dyn Scene>),
        Err(err) => {
            tracing::warn!(%err, "scene construction failed");
            None
        }
    })
}

/// Shown until a real scene is provided.
#[derive(Debug)]
pub struct PlaceholderScene {
    resolution: Vector2f,
}

impl PlaceholderScene {
    pub const MESSAGE: &'static str = "Please provide a scene";

    pub fn new(resolution: Vector2f) -> Self {
        Self { resolution }
    }
}

impl Scene for PlaceholderScene {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn render(&mut self, surface: &mut dyn Surface, _ctx: &mut RenderCtx) {
        let center = self.resolution * 0.5;
        surface.fill_text(
            Self::MESSAGE,
            Point::new(center.x, center.y),
            &TextStyle::new(32.0, Color::WHITE).centered(),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/provider.rs"]
mod tests;
