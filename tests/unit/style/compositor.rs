use super::*;

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> Image {
    Image::solid_rgb(w, h, rgb).unwrap()
}

#[test]
fn output_matches_canvas_for_every_platform_and_aspect() {
    let c = Compositor::default();
    for src in [(300, 200), (200, 300), (1, 40), (40, 1)] {
        let img = solid(src.0, src.1, [10, 20, 30]);
        for platform in Platform::ALL {
            let out = c
                .compose(&img, CanvasSpec::new(platform, BackgroundStyle::PlainBlack))
                .unwrap();
            assert_eq!(out.dimensions(), platform.dimensions(), "{src:?} on {platform}");
            assert_eq!(out.model, ColorModel::Rgb);
        }
    }
}

#[test]
fn plain_black_letterboxes() {
    let img = solid(200, 100, [200, 100, 50]);
    let out = Compositor::default()
        .compose(&img, CanvasSpec::new(Platform::TikTok, BackgroundStyle::PlainBlack))
        .unwrap();
    // 1080x540 foreground at y = 690.
    assert_eq!(out.pixel(540, 0), &[0, 0, 0]);
    assert_eq!(out.pixel(540, 689), &[0, 0, 0]);
    assert_eq!(out.pixel(540, 1230), &[0, 0, 0]);
    assert_eq!(out.pixel(540, 960), &[200, 100, 50]);
}

#[test]
fn dominant_color_frame_of_red_is_red() {
    let img = solid(200, 100, [255, 0, 0]);
    let out = Compositor::default()
        .compose(
            &img,
            CanvasSpec::new(Platform::TikTok, BackgroundStyle::DominantColorFrame),
        )
        .unwrap();
    for y in (0..690).chain(1230..1920).step_by(7) {
        for x in (0..1080).step_by(13) {
            assert_eq!(out.pixel(x, y), &[255, 0, 0]);
        }
    }
}

#[test]
fn blurred_backdrop_is_dimmed_source() {
    let img = solid(300, 300, [100, 200, 50]);
    let out = Compositor::default()
        .compose(
            &img,
            CanvasSpec::new(Platform::YouTube, BackgroundStyle::BlurredBackdrop),
        )
        .unwrap();
    // Foreground is 1080x1080 at x = 420; the left band is backdrop.
    assert_eq!(out.pixel(10, 500), &[70, 140, 35]);
    assert_eq!(out.pixel(960, 540), &[100, 200, 50]);
}

#[test]
fn unknown_tags_degrade() {
    let img = solid(30, 30, [1, 2, 3]);
    let out = Compositor::default()
        .compose_tags(&img, "Vimeo", "glitter")
        .unwrap();
    assert_eq!(out.dimensions(), (1080, 1080));
}

#[test]
fn dominant_color_is_area_mean() {
    let img = Image::new(2, 1, ColorModel::Rgb, vec![0, 0, 0, 255, 101, 10]).unwrap();
    assert_eq!(dominant_color(&img), [128, 51, 5]);
    let gray = Image::new(2, 1, ColorModel::Gray, vec![10, 20]).unwrap();
    assert_eq!(dominant_color(&gray), [15, 15, 15]);
}

#[test]
fn config_sets_backdrop_parameters() {
    let cfg = EngineConfig {
        backdrop_blur_radius: 3.0,
        backdrop_brightness: 0.5,
        ..EngineConfig::default()
    };
    let c = Compositor::from_config(&cfg);
    assert_eq!(c.blur_radius, 3.0);
    assert_eq!(c.brightness, 0.5);
}
