use super::*;
use crate::foundation::core::ColorModel;
use crate::mods::params::ParamValue;

fn params(intensity: f64) -> ModParams {
    ModParams::empty("noise").with("intensity", ParamValue::Number(intensity))
}

fn gradient() -> Image {
    let data: Vec<u8> = (0..16 * 16 * 3).map(|i| (i % 256) as u8).collect();
    Image::new(16, 16, ColorModel::Rgb, data).unwrap()
}

#[test]
fn zero_intensity_is_identity() {
    let img = gradient();
    assert_eq!(Noise.apply(img.clone(), &params(0.0)).unwrap(), img);
}

#[test]
fn offsets_stay_within_the_intensity_bound() {
    let img = gradient();
    let out = Noise.apply(img.clone(), &params(50.0)).unwrap();
    assert_eq!(out.dimensions(), img.dimensions());
    for (a, b) in img.data.iter().zip(out.data.iter()) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 32);
    }
}

#[test]
fn rgba_input_becomes_rgb() {
    let img = gradient().into_rgba();
    let out = Noise.apply(img, &params(10.0)).unwrap();
    assert_eq!(out.model, ColorModel::Rgb);
}

#[test]
fn regenerate_suggests_intensity_between_10_and_80() {
    for _ in 0..50 {
        match Noise.on_action(REGENERATE_ACTION, &params(0.0)) {
            Some(ActionResult::Update {
                new_value,
                update_param,
                ..
            }) => {
                let v = new_value.as_u64().unwrap();
                assert!((10..=80).contains(&v));
                assert_eq!(update_param, "intensity");
            }
            other => panic!("unexpected action result: {other:?}"),
        }
    }
}

#[test]
fn other_actions_get_a_plain_message() {
    assert!(matches!(
        Noise.on_action("something_else", &params(0.0)),
        Some(ActionResult::Message(_))
    ));
}
