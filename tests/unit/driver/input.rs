use super::*;

#[test]
fn button_edges_last_one_update() {
    let mut b = MouseButtonState::default();
    assert!(!b.is_down() && !b.is_pressed() && !b.is_released());

    b.update(true);
    assert!(b.is_down() && b.is_pressed() && !b.is_released());
    b.update(true);
    assert!(b.is_down() && !b.is_pressed());

    b.update(false);
    assert!(!b.is_down() && b.is_released());
    b.update(false);
    assert!(!b.is_released(), "idle buttons do not keep reporting a release");
}

#[test]
fn pressed_edge_survives_until_end_of_frame() {
    let mut input = InputState::default();
    input.button_changed(MouseButton::Left, true);
    assert!(input.left.is_pressed());
    input.end_frame();
    assert!(input.left.is_down());
    assert!(!input.left.is_pressed());
}

#[test]
fn pointer_maps_through_the_letterbox() {
    let lb = Letterbox::fit(Vector2f::new(2560.0, 1440.0), Vector2f::new(1280.0, 720.0));
    let mut input = InputState::default();
    input.pointer_moved(Vector2f::new(200.0, 100.0), &lb);
    assert_eq!(input.pointer.virtual_pos, Vector2f::new(100.0, 50.0));
    assert!(input.mouse_in_rect(Vector2f::new(100.0, 0.0), Vector2f::new(10.0, 50.0)));
    assert!(!input.mouse_in_rect(Vector2f::new(101.0, 0.0), Vector2f::new(10.0, 50.0)));
}

#[test]
fn leaving_resets_pointer_and_releases_buttons() {
    let mut input = InputState::default();
    input.pointer_moved(Vector2f::new(5.0, 5.0), &Letterbox::default());
    input.button_changed(MouseButton::Right, true);
    input.end_frame();

    input.pointer_left();
    assert_eq!(input.pointer.real, Pointer::OUTSIDE);
    assert_eq!(input.pointer.virtual_pos, Pointer::OUTSIDE);
    assert!(!input.right.is_down());
    assert!(input.button(MouseButton::Right).is_released());
}

#[test]
fn dom_button_indices() {
    assert_eq!(MouseButton::from_index(0), Some(MouseButton::Left));
    assert_eq!(MouseButton::from_index(2), Some(MouseButton::Right));
    assert_eq!(MouseButton::from_index(7), None);
}
