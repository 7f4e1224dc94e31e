use std::path::PathBuf;

use super::*;
use crate::foundation::core::ColorModel;
use crate::mods::params::ParamValue;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "framemod_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn params(path: Option<PathBuf>, x: f64, y: f64, scale: f64) -> ModParams {
    ModParams::empty("image_overlay")
        .with("overlay_path", ParamValue::FilePath(path))
        .with("x", ParamValue::Number(x))
        .with("y", ParamValue::Number(y))
        .with("scale", ParamValue::Number(scale))
}

fn white_square(dir: &std::path::Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("overlay.png");
    Image::filled(2, 2, ColorModel::Rgba, &[255, 255, 255, 255])
        .unwrap()
        .save_png(&path)
        .unwrap();
    path
}

#[test]
fn unset_overlay_is_pass_through() {
    let img = Image::solid_rgb(10, 10, [5, 5, 5]).unwrap().into_rgba();
    let out = ImageOverlay
        .apply(img.clone(), &params(None, -1.0, -1.0, 100.0))
        .unwrap();
    assert_eq!(out, img);
}

#[test]
fn missing_overlay_degrades_to_pass_through() {
    let img = Image::solid_rgb(10, 10, [5, 5, 5]).unwrap();
    let missing = temp_dir("overlay_missing").join("nope.png");
    let out = ImageOverlay
        .apply(img.clone(), &params(Some(missing), -1.0, -1.0, 100.0))
        .unwrap();
    assert_eq!(out, img);
}

#[test]
fn overlay_is_centered_by_default() {
    let path = white_square(&temp_dir("overlay_center"));
    let img = Image::solid_rgb(10, 10, [0, 0, 0]).unwrap();
    let out = ImageOverlay
        .apply(img, &params(Some(path), -1.0, -1.0, 100.0))
        .unwrap();
    assert_eq!(out.model, ColorModel::Rgb);
    assert_eq!(out.pixel(4, 4), &[255, 255, 255]);
    assert_eq!(out.pixel(5, 5), &[255, 255, 255]);
    assert_eq!(out.pixel(3, 3), &[0, 0, 0]);
    assert_eq!(out.pixel(6, 6), &[0, 0, 0]);
}

#[test]
fn explicit_position_and_clipping() {
    let path = white_square(&temp_dir("overlay_pos"));
    let img = Image::solid_rgb(10, 10, [0, 0, 0]).unwrap();
    let out = ImageOverlay
        .apply(img, &params(Some(path), 9.0, 0.0, 100.0))
        .unwrap();
    assert_eq!(out.pixel(9, 0), &[255, 255, 255]);
    assert_eq!(out.pixel(9, 1), &[255, 255, 255]);
    assert_eq!(out.pixel(8, 0), &[0, 0, 0]);
}
