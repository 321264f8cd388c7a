use super::*;

#[test]
fn anchor_offset_follows_align_and_baseline() {
    let size = Vec2::new(100.0, 20.0);
    let centered = TextStyle::default().centered();
    assert_eq!(text_anchor_offset(size, 15.0, &centered), Vec2::new(-50.0, -10.0));

    let right_top = TextStyle::default()
        .with_align(TextAlign::Right)
        .with_baseline(TextBaseline::Top);
    assert_eq!(text_anchor_offset(size, 15.0, &right_top), Vec2::new(-100.0, 0.0));

    assert_eq!(
        text_anchor_offset(size, 15.0, &TextStyle::default()),
        Vec2::new(0.0, -15.0)
    );
}

#[test]
fn estimate_counts_lines_and_widest_line() {
    let style = TextStyle::new(10.0, Color::WHITE);
    let size = estimate_text_size("ab\nabcd", &style);
    assert_eq!(size, Vec2::new(24.0, 24.0));

    let clipped = estimate_text_size("abcd", &style.with_max_width(Some(5.0)));
    assert_eq!(clipped.x, 5.0);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 128, 128],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(0, 0), Some([128, 0, 255, 128]));
    frame.unpremultiply();
    assert!(!frame.premultiplied);
    assert_eq!(frame.data, vec![128, 0, 255, 128]);
    assert_eq!(frame.pixel(1, 0), None);
}

#[test]
fn transform_stack_restores_and_ignores_extra_restore() {
    let mut s = TransformStack::default();
    s.save();
    s.current = Affine::translate((5.0, 0.0));
    s.restore();
    assert_eq!(s.current, Affine::IDENTITY);
    s.restore();
    assert_eq!(s.depth(), 0);
}
