use serde_json::json;

use super::*;

fn raw(v: Value) -> RawParams {
    v.as_object().cloned().unwrap()
}

fn overlay_like() -> ModDescriptor {
    ModDescriptor::new("probe", "Probe")
        .param(ParamSpec::slider("enhance", "Enhance", 0.0, 2.0, 1.0))
        .param(ParamSpec::text("text", "Text", "hello"))
        .param(ParamSpec::color("color", "Color", "#FFFFFF"))
        .param(ParamSpec::file("overlay_path", "Overlay", "image/*"))
        .param(ParamSpec::dropdown(
            "shape",
            "Shape",
            &[("Circle", "circle"), ("Star", "star")],
            "circle",
        ))
        .param(ParamSpec::button("regen", "Regenerate", None))
}

#[test]
fn missing_values_take_defaults() {
    let p = validate_params(&overlay_like(), &RawParams::new()).unwrap();
    assert_eq!(p.number("enhance").unwrap(), 1.0);
    assert_eq!(p.text("text").unwrap(), "hello");
    assert_eq!(p.color("color").unwrap(), [255, 255, 255]);
    assert_eq!(p.file("overlay_path").unwrap(), None);
    assert_eq!(p.choice("shape").unwrap(), "circle");
    assert!(p.get("regen").is_none());
}

#[test]
fn sliders_clamp_and_accept_numeric_strings() {
    let d = overlay_like();
    let hi = validate_params(&d, &raw(json!({ "enhance": 5 }))).unwrap();
    let lo = validate_params(&d, &raw(json!({ "enhance": "-1" }))).unwrap();
    let mid = validate_params(&d, &raw(json!({ "enhance": " 0.8 " }))).unwrap();
    assert_eq!(hi.number("enhance").unwrap(), 2.0);
    assert_eq!(lo.number("enhance").unwrap(), 0.0);
    assert_eq!(mid.number("enhance").unwrap(), 0.8);
}

#[test]
fn type_mismatch_names_mod_and_param() {
    let err = validate_params(&overlay_like(), &raw(json!({ "enhance": "lots" }))).unwrap_err();
    match err {
        FramemodError::InvalidParameter { mod_name, param, .. } => {
            assert_eq!(mod_name, "probe");
            assert_eq!(param, "enhance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dropdown_rejects_unknown_choice() {
    let err = validate_params(&overlay_like(), &raw(json!({ "shape": "hexagon" }))).unwrap_err();
    assert_eq!(err.kind(), "invalid_parameter");
    assert!(err.to_string().contains("circle, star"));
}

#[test]
fn unknown_names_and_nulls_are_tolerated() {
    let p = validate_params(
        &overlay_like(),
        &raw(json!({ "future_knob": 3, "text": null, "regen": true, "overlay_path": "" })),
    )
    .unwrap();
    assert_eq!(p.text("text").unwrap(), "hello");
    assert_eq!(p.file("overlay_path").unwrap(), None);
}

#[test]
fn text_stringifies_scalars_and_file_keeps_path() {
    let p = validate_params(
        &overlay_like(),
        &raw(json!({ "text": 42, "overlay_path": "uploads/a.png" })),
    )
    .unwrap();
    assert_eq!(p.text("text").unwrap(), "42");
    assert_eq!(
        p.file("overlay_path").unwrap(),
        Some(Path::new("uploads/a.png"))
    );
}

#[test]
fn getters_report_wrong_kind() {
    let p = ModParams::empty("m").with("x", ParamValue::Text("a".into()));
    assert!(p.number("x").is_err());
    assert!(p.number("missing").is_err());
    assert_eq!(p.int("missing").unwrap_err().kind(), "invalid_parameter");
}

#[test]
fn hex_colors() {
    assert_eq!(parse_hex_color("#FF8000"), Some([255, 128, 0]));
    assert_eq!(parse_hex_color("0a0B0c"), Some([10, 11, 12]));
    assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
    assert_eq!(parse_hex_color("#ggg000"), None);
    assert_eq!(parse_hex_color("#12345"), None);
}
