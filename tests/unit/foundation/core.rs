use super::*;

#[test]
fn normalize_has_unit_length() {
    for v in [
        Vector2f::new(3.0, 4.0),
        Vector2f::new(-0.001, 0.0),
        Vector2f::new(1e6, -2e6),
        Vector2f::new(0.5, 0.5),
    ] {
        assert!((v.normalize().length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn normalize_zero_is_zero() {
    assert_eq!(Vector2f::zero().normalize(), Vector2f::ZERO);
}

#[test]
fn in_place_ops_chain_and_mutate() {
    let mut v = Vector2f::new(1.0, 2.0);
    v.add_in_place(Vector2f::one())
        .multiply_in_place(2.0)
        .subtract_in_place(Vector2f::new(1.0, 1.0));
    assert_eq!(v, Vector2f::new(3.0, 5.0));

    let w = v.add(Vector2f::one());
    assert_eq!(v, Vector2f::new(3.0, 5.0));
    assert_eq!(w, Vector2f::new(4.0, 6.0));
    assert_eq!(v.scale(Vector2f::new(2.0, 0.5)), Vector2f::new(6.0, 2.5));
}

#[test]
fn color_parses_hex_and_functional_forms() {
    assert_eq!(Color::parse("#ff5722").unwrap(), Color::rgb(255, 87, 34));
    assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
    assert_eq!(
        Color::parse("#00000044").unwrap(),
        Color::rgba(0, 0, 0, 0x44)
    );
    assert_eq!(
        Color::parse("rgba(0, 255, 0, 0.5)").unwrap(),
        Color::rgba(0, 255, 0, 128)
    );
    assert_eq!(Color::parse("rgb(1,2,3)").unwrap(), Color::rgb(1, 2, 3));
    assert_eq!(Color::parse("transparent").unwrap(), Color::TRANSPARENT);
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("hsl(1,2,3)").is_err());
}

#[test]
fn color_serde_uses_strings() {
    let json = serde_json::to_string(&Color::rgb(255, 87, 34)).unwrap();
    assert_eq!(json, "\"#ff5722\"");
    let back: Color = serde_json::from_str("\"#44444480\"").unwrap();
    assert_eq!(back, Color::rgba(0x44, 0x44, 0x44, 0x80));
}

#[test]
fn clock_is_single_writer_many_readers() {
    let clock = Clock::new();
    let a = clock.source();
    let b = a.clone();

    clock.advance_to(0.25);
    let t = clock.advance_to(1.0);
    assert_eq!(t.delta, 0.75);
    assert_eq!(a.now(), 1.0);
    assert_eq!(b.delta(), 0.75);
}
