use crate::foundation::core::{Color, Vector2f};
use crate::foundation::error::MotionResult;
use crate::foundation::math::clamp01;
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextBaseline, TextStyle};
use crate::scene::draw::Draw;
use crate::scene::graph::{CanvasObject, NodeId, SceneGraph};

/// Anything that can be drawn from a scene graph: a single node or a composite built from several.
pub trait Renderable {
    fn render(&self, graph: &mut SceneGraph, surface: &mut dyn Surface, ctx: &mut RenderCtx);
}

impl Renderable for NodeId {
    fn render(&self, graph: &mut SceneGraph, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        graph.render(*self, surface, ctx);
    }
}

/// A horizontal bar with a label above it.
///
/// `position` is the top-left corner of the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressBar {
    background: NodeId,
    foreground: NodeId,
    label: NodeId,
}

impl ProgressBar {
    pub fn new(
        graph: &mut SceneGraph,
        position: Vector2f,
        size: Vector2f,
        label: impl Fn() -> String + 'static,
    ) -> MotionResult<Self> {
        let background = graph.insert(
            CanvasObject::new(Draw::rounded_rectangle(
                Color::rgba(0, 0, 0, 128),
                Color::BLACK,
                8.0,
            ))
            .at(position.x, position.y)
            .sized(size.x, size.y)
            .pivoted(0.0, 0.0),
        );
        let foreground = graph.insert(
            CanvasObject::new(Draw::rounded_rectangle(
                Color::rgba(0, 255, 0, 128),
                Color::rgb(0, 255, 0),
                8.0,
            ))
            .sized(0.0, size.y)
            .pivoted(0.0, 0.0),
        );
        let style = TextStyle::new(24.0, Color::WHITE).with_baseline(TextBaseline::Middle);
        let label =
            graph.insert(CanvasObject::new(Draw::dynamic_text(label, style)).at(0.0, -12.0));
        graph.append_all(background, &[foreground, label])?;

        Ok(Self {
            background,
            foreground,
            label,
        })
    }

    /// Root node; attach it elsewhere to move the whole bar.
    pub fn root(&self) -> NodeId {
        self.background
    }

    pub fn label(&self) -> NodeId {
        self.label
    }

    /// Fill fraction, clamped to `[0, 1]`.
    pub fn set_progress(&self, graph: &mut SceneGraph, progress: f64) {
        let width = graph[self.background].size().x;
        graph[self.foreground].size_mut().x = width * clamp01(progress);
    }

    pub fn progress(&self, graph: &SceneGraph) -> f64 {
        let width = graph[self.background].size().x;
        if width == 0.0 {
            return 0.0;
        }
        graph[self.foreground].size().x / width
    }
}

impl Renderable for ProgressBar {
    fn render(&self, graph: &mut SceneGraph, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        graph.render(self.background, surface, ctx);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderable.rs"]
mod tests;
