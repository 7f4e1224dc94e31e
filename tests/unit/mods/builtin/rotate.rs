use super::*;
use crate::mods::params::ParamValue;

fn params(angle: f64) -> ModParams {
    ModParams::empty("rotate").with("angle", ParamValue::Number(angle))
}

#[test]
fn zero_angle_is_identity() {
    let img = Image::solid_rgb(4, 3, [1, 2, 3]).unwrap();
    assert_eq!(Rotate.apply(img.clone(), &params(0.0)).unwrap(), img);
}

#[test]
fn quarter_turn_swaps_dimensions() {
    let img = Image::solid_rgb(4, 3, [1, 2, 3]).unwrap();
    assert_eq!(Rotate.apply(img, &params(90.0)).unwrap().dimensions(), (3, 4));
    let img = Image::solid_rgb(4, 3, [1, 2, 3]).unwrap();
    assert_eq!(Rotate.apply(img, &params(-90.0)).unwrap().dimensions(), (3, 4));
}
