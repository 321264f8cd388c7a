use super::*;

fn sheet_image(w: u32, h: u32) -> ImageTexture {
    let bytes = vec![255u8; (w * h * 4) as usize];
    ImageTexture::from_image(ImageData::from_premul(w, h, bytes).unwrap())
}

#[test]
fn image_ids_are_unique() {
    let a = ImageData::from_premul(1, 1, vec![0; 4]).unwrap();
    let b = ImageData::from_premul(1, 1, vec![0; 4]).unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
}

#[test]
fn image_data_rejects_wrong_length() {
    assert!(ImageData::from_premul(2, 2, vec![0; 4]).is_err());
    assert!(ImageData::from_premul(0, 2, Vec::new()).is_err());
}

#[test]
fn unloaded_texture_reports_so() {
    let t = ImageTexture::load("/definitely/not/here.png");
    assert!(!t.is_loaded());
    assert!(t.image().is_none());
}

#[test]
fn spritesheet_frame_rect_is_biased_and_wraps() {
    let sheet = Spritesheet::new(sheet_image(120, 40), 3, 2, Some(5)).unwrap();
    let r0 = sheet.frame_rect(0).unwrap();
    assert_eq!(r0, Rect::new(0.5, 0.5, 39.5, 19.5));

    let r4 = sheet.frame_rect(4).unwrap();
    assert_eq!(r4, Rect::new(40.5, 20.5, 79.5, 39.5));

    assert_eq!(sheet.frame_rect(5), Some(r0));
    assert_eq!(sheet.frame_rect(-1), Some(r4));
}

#[test]
fn spritesheet_validates_grid() {
    assert!(Spritesheet::new(sheet_image(4, 4), 0, 1, None).is_err());
    assert!(Spritesheet::new(sheet_image(4, 4), 2, 2, Some(5)).is_err());
    let s = Spritesheet::new(ImageTexture::unloaded(), 2, 2, None).unwrap();
    assert_eq!(s.frame_count(), 4);
    assert!(s.frame_rect(0).is_none());
}

#[test]
fn manual_texture_commit_publishes_new_image() {
    let mut t = ManualTexture::new(2, 1).unwrap();
    let before = t.image().unwrap().id();
    t.set(1, 0, Color::rgba(255, 0, 0, 128));
    t.set(5, 5, Color::WHITE);
    assert_eq!(t.get(1, 0), Some(Color::rgba(255, 0, 0, 128)));

    t.commit().unwrap();
    let image = t.image().unwrap();
    assert_ne!(image.id(), before);
    assert!(!image.smooth());
    assert_eq!(&image.rgba8_premul()[4..], &[128, 0, 0, 128]);
}

#[test]
fn loader_without_root_yields_unloaded_textures() {
    let loader = TextureLoader::new(None);
    assert!(!loader.image("wood.webp").is_loaded());
    let sheet = loader.spritesheet("cat.webp", 12, 14, Some(158)).unwrap();
    assert!(!sheet.is_loaded());
}

#[test]
fn spritesheet_rejects_overflowing_grids() {
    let err = Spritesheet::new(ImageTexture::unloaded(), 70_000, 70_000, None).unwrap_err();
    assert!(matches!(err, MotionError::Validation(_)));
    assert!(Spritesheet::new(ImageTexture::unloaded(), u32::MAX, 2, Some(1)).is_err());
}
