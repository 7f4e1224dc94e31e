use super::*;

#[test]
fn platform_dimensions() {
    assert_eq!(Platform::YouTube.dimensions(), (1920, 1080));
    assert_eq!(Platform::TikTok.dimensions(), (1080, 1920));
    assert_eq!(Platform::Square.dimensions(), (1080, 1080));
}

#[test]
fn parse_is_case_insensitive_and_strict() {
    assert_eq!(Platform::parse("youtube").unwrap(), Platform::YouTube);
    assert_eq!(Platform::parse(" TikTok ").unwrap(), Platform::TikTok);
    let err = Platform::parse("Instagram").unwrap_err();
    assert_eq!(err.kind(), "unsupported_platform_tag");
    assert!(err.to_string().contains("Instagram"));
}

#[test]
fn unknown_tags_fall_back_to_square() {
    assert_eq!(Platform::from_tag("Vimeo"), Platform::Square);
    assert_eq!(Platform::from_tag(""), Platform::Square);
}

#[test]
fn style_aliases_and_default() {
    assert_eq!(BackgroundStyle::from_tag("blur"), BackgroundStyle::BlurredBackdrop);
    assert_eq!(
        BackgroundStyle::from_tag("dominant-color-frame"),
        BackgroundStyle::DominantColorFrame
    );
    assert_eq!(BackgroundStyle::from_tag("black"), BackgroundStyle::PlainBlack);
    assert_eq!(BackgroundStyle::from_tag("sparkles"), BackgroundStyle::PlainBlack);
}

#[test]
fn serde_tags() {
    assert_eq!(
        serde_json::to_value(BackgroundStyle::BlurredBackdrop).unwrap(),
        serde_json::json!("blurred-backdrop")
    );
    assert_eq!(
        serde_json::from_value::<Platform>(serde_json::json!("TikTok")).unwrap(),
        Platform::TikTok
    );
}

#[test]
fn canvas_spec_orientation() {
    let c = CanvasSpec::new(Platform::TikTok, BackgroundStyle::PlainBlack);
    assert_eq!((c.width, c.height), (1080, 1920));
    assert!(c.is_portrait_or_square());
    assert!(!CanvasSpec::new(Platform::YouTube, BackgroundStyle::PlainBlack).is_portrait_or_square());
}
