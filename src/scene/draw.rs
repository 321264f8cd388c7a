use std::rc::Rc;

use kurbo::Shape;

use crate::assets::texture::{Spritesheet, Texture};
use crate::foundation::core::{Color, Point, Vector2f};
use crate::render::ctx::RenderCtx;
use crate::render::surface::{Surface, TextStyle};
use crate::scene::graph::CanvasObject;
use crate::scene::plot::{AxesSpec, PlotSpec, line};

pub type TextProvider = Rc<dyn Fn() -> String>;
pub type FrameProvider = Rc<dyn Fn() -> i64>;
pub type CustomDraw = Rc<dyn Fn(&CanvasObject, &mut dyn Surface, &mut RenderCtx)>;

/// Line height used to space multi-line text, relative to the font size.
const LINE_HEIGHT: f64 = 1.2;

/// How a node paints itself, in node-local space (after its transform is applied).
///
/// Shapes fill the node's box, which is offset so the pivot sits at the local origin. Text is
/// anchored at the origin. Cloning shares providers and textures.
#[derive(Clone, Default)]
pub enum Draw {
    #[default]
    None,
    Ellipse {
        fill: Color,
        stroke: Color,
    },
    Rectangle {
        fill: Color,
        stroke: Color,
    },
    RoundedRectangle {
        fill: Color,
        stroke: Color,
        radius: f64,
    },
    /// Segment across the node's box from its top-left to its bottom-right corner.
    Line {
        color: Color,
        width: f64,
    },
    StaticText {
        text: Rc<str>,
        style: TextStyle,
        multiline: bool,
    },
    DynamicText {
        provider: TextProvider,
        style: TextStyle,
        multiline: bool,
    },
    Image(Rc<dyn Texture>),
    Sprite {
        sheet: Rc<Spritesheet>,
        frame: FrameProvider,
    },
    Plot(Rc<PlotSpec>),
    Axes(AxesSpec),
    Custom(CustomDraw),
}

impl Draw {
    pub fn ellipse(fill: Color, stroke: Color) -> Self {
        Self::Ellipse { fill, stroke }
    }

    pub fn rectangle(fill: Color, stroke: Color) -> Self {
        Self::Rectangle { fill, stroke }
    }

    pub fn rounded_rectangle(fill: Color, stroke: Color, radius: f64) -> Self {
        Self::RoundedRectangle {
            fill,
            stroke,
            radius,
        }
    }

    pub fn line(color: Color, width: f64) -> Self {
        Self::Line { color, width }
    }

    pub fn text(text: impl Into<Rc<str>>, style: TextStyle) -> Self {
        Self::StaticText {
            text: text.into(),
            style,
            multiline: false,
        }
    }

    /// Text split on `\n`, one line drawn below the other.
    pub fn multiline_text(text: impl Into<Rc<str>>, style: TextStyle) -> Self {
        Self::StaticText {
            text: text.into(),
            style,
            multiline: true,
        }
    }

    pub fn dynamic_text(provider: impl Fn() -> String + 'static, style: TextStyle) -> Self {
        Self::DynamicText {
            provider: Rc::new(provider),
            style,
            multiline: false,
        }
    }

    /// Provider text split on `\n`, re-read every frame.
    pub fn dynamic_multiline_text(
        provider: impl Fn() -> String + 'static,
        style: TextStyle,
    ) -> Self {
        Self::DynamicText {
            provider: Rc::new(provider),
            style,
            multiline: true,
        }
    }

    pub fn image(texture: impl Texture + 'static) -> Self {
        Self::Image(Rc::new(texture))
    }

    pub fn sprite(sheet: Spritesheet, frame: impl Fn() -> i64 + 'static) -> Self {
        Self::Sprite {
            sheet: Rc::new(sheet),
            frame: Rc::new(frame),
        }
    }

    pub fn plot(spec: PlotSpec) -> Self {
        Self::Plot(Rc::new(spec))
    }

    pub fn axes(spec: AxesSpec) -> Self {
        Self::Axes(spec)
    }

    pub fn custom(f: impl Fn(&CanvasObject, &mut dyn Surface, &mut RenderCtx) + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ellipse { .. } => "ellipse",
            Self::Rectangle { .. } => "rectangle",
            Self::RoundedRectangle { .. } => "rounded_rectangle",
            Self::Line { .. } => "line",
            Self::StaticText { .. } => "static_text",
            Self::DynamicText { .. } => "dynamic_text",
            Self::Image(_) => "image",
            Self::Sprite { .. } => "sprite",
            Self::Plot(_) => "plot",
            Self::Axes(_) => "axes",
            Self::Custom(_) => "custom",
        }
    }

    /// Paint `node`. Text draws may give the node a size the first time they measure it.
    pub fn render(&self, node: &mut CanvasObject, surface: &mut dyn Surface, ctx: &mut RenderCtx) {
        match self {
            Self::None => {}
            Self::Ellipse { fill, stroke } => {
                let size = node.size();
                let center = -size.scale(node.pivot - Vector2f::new(0.5, 0.5));
                let path =
                    kurbo::Ellipse::new(center.to_point(), (size.x / 2.0, size.y / 2.0), 0.0)
                        .to_path(0.1);
                surface.fill_path(&path, *fill);
                surface.stroke_path(&path, *stroke, 1.0);
            }
            Self::Rectangle { fill, stroke } => {
                let bounds = node.bounds();
                surface.fill_rect(bounds, *fill);
                surface.stroke_rect(bounds, *stroke, 1.0);
            }
            Self::RoundedRectangle {
                fill,
                stroke,
                radius,
            } => {
                let path = kurbo::RoundedRect::from_rect(node.bounds(), *radius).to_path(0.1);
                surface.fill_path(&path, *fill);
                surface.stroke_path(&path, *stroke, 1.0);
            }
            Self::Line { color, width } => {
                let size = node.size();
                let from = -size.scale(node.pivot);
                let to = size.scale(Vector2f::ONE - node.pivot);
                surface.stroke_path(&line(from.to_point(), to.to_point()), *color, *width);
            }
            Self::StaticText {
                text,
                style,
                multiline,
            } => draw_text(node, surface, text, style, *multiline),
            Self::DynamicText {
                provider,
                style,
                multiline,
            } => {
                let text = provider();
                draw_text(node, surface, &text, style, *multiline);
            }
            Self::Image(texture) => {
                if let Some(image) = texture.image() {
                    surface.draw_image(image, image.bounds(), node.bounds());
                }
            }
            Self::Sprite { sheet, frame } => {
                let (Some(image), Some(src)) = (sheet.image(), sheet.frame_rect(frame())) else {
                    return;
                };
                surface.draw_image(image, src, node.bounds());
            }
            Self::Plot(spec) => spec.render(node.bounds(), surface),
            Self::Axes(spec) => spec.render(node.bounds(), surface),
            Self::Custom(f) => f(&*node, surface, ctx),
        }
    }
}

fn draw_text(
    node: &mut CanvasObject,
    surface: &mut dyn Surface,
    text: &str,
    style: &TextStyle,
    multiline: bool,
) {
    if !node.has_explicit_size() {
        node.set_size(surface.measure_text(text, style).into());
    }
    if !multiline {
        surface.fill_text(text, Point::ZERO, style);
        return;
    }
    let step = style.size * LINE_HEIGHT;
    for (i, line) in text.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        surface.fill_text(line, Point::new(0.0, i as f64 * step), style);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/draw.rs"]
mod tests;
