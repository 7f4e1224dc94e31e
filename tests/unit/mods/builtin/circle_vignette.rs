use super::*;
use crate::foundation::core::ColorModel;
use crate::mods::params::ParamValue;

fn params(radius: f64, opacity: f64) -> ModParams {
    ModParams::empty("circle_vignette")
        .with("radius", ParamValue::Number(radius))
        .with("opacity", ParamValue::Number(opacity))
}

#[test]
fn inside_untouched_outside_darkened_by_opacity() {
    let img = Image::solid_rgb(300, 300, [200, 200, 200]).unwrap();
    let out = CircleVignette.apply(img, &params(100.0, 128.0)).unwrap();
    assert_eq!(out.model, ColorModel::Rgba);
    assert_eq!(out.dimensions(), (300, 300));
    assert_eq!(out.pixel(150, 150), &[200, 200, 200, 255]);
    assert_eq!(out.pixel(0, 0), &[100, 100, 100, 255]);
}

#[test]
fn zero_opacity_only_changes_the_color_model() {
    let img = Image::solid_rgb(50, 40, [1, 2, 3]).unwrap();
    let out = CircleVignette.apply(img.clone(), &params(10.0, 0.0)).unwrap();
    assert_eq!(out, img.into_rgba());
}
