use super::*;
use crate::foundation::core::Rect;

#[test]
fn clear_fills_every_pixel() {
    let mut s = CpuSurface::new(4, 3).unwrap();
    s.clear(Color::rgb(10, 20, 30));
    let frame = s.read_frame().unwrap();
    assert_eq!((frame.width, frame.height), (4, 3));
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(frame.pixel(x, y), Some([10, 20, 30, 255]));
        }
    }
}

#[test]
fn fill_rect_respects_transform() {
    let mut s = CpuSurface::new(8, 8).unwrap();
    s.clear(Color::BLACK);
    s.translate(Vec2::new(4.0, 4.0));
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
    let frame = s.read_frame().unwrap();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(6, 6), Some([255, 255, 255, 255]));
}

#[test]
fn zero_size_is_rejected() {
    assert!(CpuSurface::new(0, 10).is_err());
    let mut s = CpuSurface::new(2, 2).unwrap();
    assert!(s.resize(70_000, 10).is_err());
    s.resize(5, 6).unwrap();
    assert_eq!((s.width(), s.height()), (5, 6));
}

#[test]
fn text_without_font_is_skipped_and_estimated() {
    let mut s = CpuSurface::new(16, 16).unwrap();
    assert!(!s.has_font());
    s.clear(Color::BLACK);
    s.fill_text("hello", Point::new(0.0, 8.0), &TextStyle::default());
    let frame = s.read_frame().unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    let size = s.measure_text("hello", &TextStyle::new(10.0, Color::WHITE));
    assert!(size.x > 0.0 && size.y > 0.0);
}

#[test]
fn image_blit_covers_destination() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.clear(Color::BLACK);
    let red = ImageData::from_premul(1, 1, vec![255, 0, 0, 255]).unwrap();
    s.draw_image(&red, red.bounds(), Rect::new(0.0, 0.0, 4.0, 4.0));
    let frame = s.read_frame().unwrap();
    let center = frame.pixel(2, 2).unwrap();
    assert!(center[0] > 200 && center[1] < 40, "{center:?}");
}

#[test]
fn image_uploads_are_released_once_unused() {
    use crate::assets::texture::{ManualTexture, Texture};

    let mut s = CpuSurface::new(64, 64).unwrap();
    let mut texture = ManualTexture::new(128, 72).unwrap();
    for i in 0..200u32 {
        texture.set(i % 128, 0, Color::WHITE);
        texture.commit().unwrap();
        s.clear(Color::BLACK);
        let image = texture.image().unwrap();
        s.draw_image(image, image.bounds(), Rect::new(0.0, 0.0, 64.0, 36.0));
        assert!(s.cached_images() <= 2, "{} uploads held", s.cached_images());
    }
}

#[test]
fn image_drawn_every_frame_stays_cached() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let red = ImageData::from_premul(1, 1, vec![255, 0, 0, 255]).unwrap();
    for _ in 0..5 {
        s.clear(Color::BLACK);
        s.draw_image(&red, red.bounds(), Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(s.cached_images(), 1);
    }
    s.clear(Color::BLACK);
    s.clear(Color::BLACK);
    assert_eq!(s.cached_images(), 0);
}
