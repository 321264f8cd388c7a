use crate::foundation::error::{MotionError, MotionResult};

/// Brush type carried through Parley layouts; the paint colour is set per draw call.
pub(crate) type TextBrush = [u8; 4];

/// Parley-backed shaping for a single registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and use its first family for every layout.
    pub(crate) fn new(font_bytes: &[u8]) -> MotionResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| MotionError::asset("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MotionError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape and lay out plain text; lines wrap at `max_width_px` when given.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        max_width_px: Option<f32>,
    ) -> MotionResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MotionError::validation(
                "text size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush([255, 255, 255, 255]));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }

        Ok(layout)
    }
}

/// Distance from the top of the layout to its first baseline.
pub(crate) fn first_baseline(layout: &parley::Layout<TextBrush>) -> f64 {
    layout
        .lines()
        .next()
        .map(|line| f64::from(line.metrics().baseline))
        .unwrap_or(0.0)
}
