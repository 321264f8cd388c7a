use super::*;

#[test]
fn wide_backing_is_pillarboxed() {
    let lb = Letterbox::fit(Vector2f::new(2560.0, 720.0), Vector2f::new(1280.0, 720.0));
    assert_eq!(lb.scale, 1.0);
    assert_eq!(lb.offset, Vector2f::new(640.0, 0.0));
}

#[test]
fn tall_backing_is_letterboxed() {
    let lb = Letterbox::fit(Vector2f::new(640.0, 720.0), Vector2f::new(1280.0, 720.0));
    assert_eq!(lb.scale, 0.5);
    assert_eq!(lb.offset, Vector2f::new(0.0, 180.0));
    let p = lb.transform() * kurbo::Point::new(1280.0, 720.0);
    assert_eq!(p, kurbo::Point::new(640.0, 540.0));
}

#[test]
fn to_virtual_inverts_the_transform() {
    let lb = Letterbox::fit(Vector2f::new(1920.0, 1200.0), Vector2f::new(1280.0, 720.0));
    let v = Vector2f::new(640.0, 360.0);
    let real = Vector2f::from(lb.transform() * v.to_point());
    let back = lb.to_virtual(real);
    assert!((back.x - v.x).abs() < 1e-9);
    assert!((back.y - v.y).abs() < 1e-9);
}

#[test]
fn degenerate_virtual_size_falls_back_to_identity() {
    let lb = Letterbox::fit(Vector2f::new(100.0, 100.0), Vector2f::ZERO);
    assert_eq!(lb, Letterbox::default());
}
