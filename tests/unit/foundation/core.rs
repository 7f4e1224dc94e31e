use std::io::Cursor;

use super::*;

#[test]
fn new_rejects_mismatched_buffer() {
    assert!(Image::new(2, 2, ColorModel::Rgb, vec![0; 11]).is_err());
    assert!(Image::new(2, 2, ColorModel::Rgb, vec![0; 12]).is_ok());
    assert!(Image::new(0, 2, ColorModel::Gray, vec![]).is_err());
}

#[test]
fn validate_catches_tampered_fields() {
    let mut img = Image::solid_rgb(3, 3, [1, 2, 3]).unwrap();
    img.width = 4;
    assert!(img.validate().is_err());
}

#[test]
fn rgb_rgba_round_trip_keeps_color() {
    let img = Image::solid_rgb(2, 1, [10, 20, 30]).unwrap();
    let rgba = img.clone().into_rgba();
    assert_eq!(rgba.model, ColorModel::Rgba);
    assert_eq!(rgba.pixel(1, 0), &[10, 20, 30, 255]);
    assert_eq!(rgba.into_rgb(), img);
}

#[test]
fn gray_conversion_uses_luma_weights() {
    let img = Image::solid_rgb(1, 1, [255, 0, 0]).unwrap();
    let gray = img.into_model(ColorModel::Gray);
    assert_eq!(gray.data, vec![76]);
}

#[test]
fn decode_png_keeps_alpha_model() {
    let src = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(src)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let img = Image::decode(&buf).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.model, ColorModel::Rgba);
    assert_eq!(img.data, vec![100, 50, 200, 128]);
}

#[test]
fn open_missing_file_is_an_error() {
    let err = Image::open(Path::new("target/does/not/exist.png")).unwrap_err();
    assert!(err.to_string().contains("open image"));
}
