use image::Rgba;
use marquee::config::ConfigError;
use marquee::fade::{blend, fade_last_edit, FadeError};
use marquee::{Document, EditError, EditorConfig, PartialPixelEdit, PixelRect, Shape};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn paint(doc: &mut Document, name: &str, rect: PixelRect, color: Rgba<u8>) {
    let layer = doc.active_layer_id().unwrap();
    let edit = PartialPixelEdit::capture(name, doc, layer, rect, true);
    let image = doc.layer_mut(layer).unwrap().image_mut();
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
    doc.add_edit(edit.into());
}

fn pixel(doc: &Document, x: u32, y: u32) -> Rgba<u8> {
    *doc.active_layer().unwrap().image().get_pixel(x, y)
}

#[test]
fn test_fade_half_way() {
    init_logger();
    let mut doc = Document::with_config(20, 10, EditorConfig::headless());
    paint(&mut doc, "Fill", PixelRect::new(0, 0, 20, 10), BLACK);
    paint(&mut doc, "Brush", PixelRect::new(0, 0, 4, 4), WHITE);

    fade_last_edit(&mut doc, 0.5).unwrap();

    assert_eq!(pixel(&doc, 1, 1), Rgba([128, 128, 128, 255]));
    assert_eq!(pixel(&doc, 10, 5), BLACK);
    assert_eq!(doc.history().undo_name(), Some("Fade"));
    assert!(!doc.history().can_repeat());

    doc.undo().unwrap();
    assert_eq!(pixel(&doc, 1, 1), WHITE);
}

#[test]
fn test_fade_inside_selection_only() {
    let mut doc = Document::with_config(20, 10, EditorConfig::headless());
    paint(&mut doc, "Fill", PixelRect::new(0, 0, 20, 10), BLACK);
    paint(&mut doc, "Brush", PixelRect::new(0, 0, 4, 4), WHITE);
    doc.create_selection_from_shape(Shape::Rect(PixelRect::new(0, 0, 2, 2)));

    fade_last_edit(&mut doc, 0.0).unwrap();

    assert_eq!(pixel(&doc, 1, 1), BLACK);
    assert_eq!(pixel(&doc, 3, 3), WHITE);
}

#[test]
fn test_fade_rejects_bad_opacity() {
    let mut doc = Document::new(4, 4);
    paint(&mut doc, "Brush", PixelRect::new(0, 0, 2, 2), WHITE);

    assert!(matches!(
        fade_last_edit(&mut doc, 1.5),
        Err(FadeError::InvalidOpacity(_))
    ));
    assert_eq!(doc.history().undo_count(), 1);
}

#[test]
fn test_only_pixel_edits_can_be_faded() {
    let mut doc = Document::with_config(8, 8, EditorConfig::headless());
    assert!(matches!(fade_last_edit(&mut doc, 0.5), Err(FadeError::NothingToFade)));

    paint(&mut doc, "Brush", PixelRect::new(0, 0, 2, 2), WHITE);
    doc.create_selection_from_shape(Shape::Rect(PixelRect::new(0, 0, 3, 3)));
    doc.deselect(true);

    assert!(matches!(fade_last_edit(&mut doc, 0.5), Err(FadeError::NothingToFade)));
}

#[test]
fn test_blend_endpoints() {
    let before = image::RgbaImage::from_pixel(2, 1, BLACK);
    let after = image::RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 255]));

    assert_eq!(blend(&before, &after, 1.0), after);
    assert_eq!(blend(&before, &after, 0.0), before);
    assert_eq!(
        *blend(&before, &after, 0.25).get_pixel(0, 0),
        Rgba([50, 25, 13, 255])
    );
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = EditorConfig::from_json("{}").unwrap();

    assert_eq!(config, EditorConfig::default());
    assert_eq!(config.history_limit, 50);
    assert!(!config.headless);
}

#[test]
fn test_partial_config_overrides_given_fields() {
    let config = EditorConfig::from_json(r#"{ "headless": true, "history_limit": 5 }"#).unwrap();

    assert!(config.headless);
    assert_eq!(config.history_limit, 5);
    assert_eq!(config.marching_interval_ms, 100);
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(matches!(
        EditorConfig::from_json(r#"{ "history_limit": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        EditorConfig::from_json(r#"{ "marching_interval_ms": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        EditorConfig::from_json("history_limit = 3"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_config_file_loading() {
    let path = std::env::temp_dir().join(format!("marquee-config-{}.json", std::process::id()));
    std::fs::write(&path, EditorConfig::headless().to_json().unwrap()).unwrap();

    let loaded = EditorConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, EditorConfig::headless());

    assert!(matches!(EditorConfig::load(&path), Err(ConfigError::Read(_))));
}

#[test]
fn test_document_uses_configured_history_limit() {
    let config = EditorConfig {
        history_limit: 1,
        ..EditorConfig::default()
    };
    let mut doc = Document::with_config(4, 4, config);
    paint(&mut doc, "One", PixelRect::new(0, 0, 1, 1), WHITE);
    paint(&mut doc, "Two", PixelRect::new(1, 0, 1, 1), WHITE);

    assert_eq!(doc.history().limit(), 1);
    assert_eq!(doc.history().edit_names(), vec!["Two"]);
}

#[test]
fn test_failed_fade_records_nothing() {
    let mut doc = Document::with_config(20, 10, EditorConfig::headless());
    paint(&mut doc, "Brush", PixelRect::new(10, 5, 4, 4), WHITE);
    let layer = doc.active_layer_id().unwrap();
    let shrunk = image::RgbaImage::from_pixel(8, 8, BLACK);
    doc.layer_mut(layer).unwrap().set_image(shrunk.clone());

    assert!(matches!(
        fade_last_edit(&mut doc, 0.5),
        Err(FadeError::Edit(EditError::TargetOutOfBounds { .. }))
    ));
    assert_eq!(doc.history().undo_name(), Some("Brush"));
    assert_eq!(doc.active_layer().unwrap().image().as_raw(), shrunk.as_raw());
}
