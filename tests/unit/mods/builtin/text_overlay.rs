use super::*;
use crate::mods::params::ParamValue;

fn params(text: &str, font: Option<PathBuf>) -> ModParams {
    ModParams::empty("text_overlay")
        .with("text", ParamValue::Text(text.to_string()))
        .with("font_size", ParamValue::Number(20.0))
        .with("color", ParamValue::Color([255, 255, 255]))
        .with("font_path", ParamValue::FilePath(font))
        .with("x", ParamValue::Number(-1.0))
        .with("y", ParamValue::Number(-1.0))
        .with("scale", ParamValue::Number(100.0))
}

#[test]
fn empty_text_is_pass_through() {
    let img = Image::solid_rgb(40, 20, [9, 9, 9]).unwrap().into_rgba();
    let out = TextOverlay::default().apply(img.clone(), &params("", None)).unwrap();
    assert_eq!(out, img);
}

#[test]
fn unreadable_font_falls_back_instead_of_failing() {
    let img = Image::solid_rgb(64, 32, [0, 0, 0]).unwrap();
    let overlay = TextOverlay::new(Some(PathBuf::from("target/missing-fallback.ttf")));
    let out = overlay
        .apply(
            img,
            &params("Hi", Some(PathBuf::from("target/missing-font.ttf"))),
        )
        .unwrap();
    assert_eq!(out.dimensions(), (64, 32));
}

#[test]
fn fallback_font_is_resolved_once_per_instance() {
    let overlay = TextOverlay::default();
    let a = overlay.fallback_font("text_overlay").family().to_string();
    let b = overlay.fallback_font("text_overlay").family().to_string();
    assert_eq!(a, b);
    assert!(overlay.fallback.get().is_some());
}

fn ink_height(img: &Image) -> Option<u32> {
    let rows: Vec<u32> = (0..img.height)
        .filter(|&y| (0..img.width).any(|x| img.pixel(x, y).iter().any(|&v| v > 32)))
        .collect();
    Some(rows.last()? - rows.first()? + 1)
}

#[test]
fn scale_multiplies_the_font_size() {
    if FontChoice::system().face_count() == 0 {
        eprintln!("skipping: no system fonts installed");
        return;
    }
    let overlay = TextOverlay::default();
    let canvas = || Image::solid_rgb(320, 160, [0, 0, 0]).unwrap();
    let small = overlay.apply(canvas(), &params("Hg", None)).unwrap();
    let large = overlay
        .apply(
            canvas(),
            &params("Hg", None).with("scale", ParamValue::Number(200.0)),
        )
        .unwrap();
    let (hs, hl) = (ink_height(&small).unwrap(), ink_height(&large).unwrap());
    assert!(hl * 2 >= hs * 3, "height {hs} at 100% vs {hl} at 200%");
}

#[test]
fn explicit_coordinates_anchor_the_text() {
    if FontChoice::system().face_count() == 0 {
        eprintln!("skipping: no system fonts installed");
        return;
    }
    let p = params("Hi", None)
        .with("x", ParamValue::Number(5.0))
        .with("y", ParamValue::Number(6.0));
    let out = TextOverlay::default()
        .apply(Image::solid_rgb(160, 80, [0, 0, 0]).unwrap(), &p)
        .unwrap();
    let first_lit_row = (0..out.height)
        .find(|&y| (0..out.width).any(|x| out.pixel(x, y)[0] > 32))
        .unwrap();
    let first_lit_col = (0..out.width)
        .find(|&x| (0..out.height).any(|y| out.pixel(x, y)[0] > 32))
        .unwrap();
    assert!((4..=12).contains(&first_lit_row), "row {first_lit_row}");
    assert!((4..=12).contains(&first_lit_col), "col {first_lit_col}");
}
