use serde_json::json;

use super::*;

#[test]
fn catalog_wire_shape_matches_plugin_metadata() {
    let desc = ModDescriptor::new("blur", "Blur")
        .param(ParamSpec::slider("radius", "Radius", 0.0, 50.0, 0.0));
    let v = serde_json::to_value(&desc).unwrap();
    assert_eq!(
        v,
        json!({
            "name": "blur",
            "label": "Blur",
            "params": [
                { "name": "radius", "label": "Radius", "type": "slider", "min": 0.0, "max": 50.0, "default": 0.0 }
            ]
        })
    );
}

#[test]
fn deserializes_plugin_style_metadata() {
    let desc: ModDescriptor = serde_json::from_value(json!({
        "name": "noise",
        "label": "Noise",
        "description": "Adds noise",
        "params": [
            { "name": "intensity", "type": "slider", "label": "Intensity", "min": 0, "max": 100, "default": 0 },
            { "name": "regenerate_noise", "type": "button", "label": "Regenerate", "icon": "fa-refresh" },
            { "name": "overlay_path", "type": "file", "label": "Upload", "accept": "image/*" }
        ]
    }))
    .unwrap();
    assert_eq!(desc.params.len(), 3);
    assert_eq!(desc.params[1].kind.type_name(), "button");
    assert!(matches!(&desc.params[2].kind, ParamKind::File { accept } if accept == "image/*"));
    desc.validate().unwrap();
}

#[test]
fn slider_default_outside_range_is_invalid() {
    let spec = ParamSpec::slider("x", "X", 0.0, 1.0, 2.0);
    assert!(spec.validate().unwrap_err().contains("outside"));
}

#[test]
fn dropdown_default_must_be_an_option() {
    let spec = ParamSpec::dropdown("shape", "Shape", &[("Circle", "circle")], "square");
    assert!(spec.validate().is_err());
    let spec = ParamSpec::dropdown("shape", "Shape", &[("Circle", "circle")], "circle");
    assert!(spec.validate().is_ok());
}

#[test]
fn descriptor_rejects_bad_names_and_duplicates() {
    assert!(ModDescriptor::new("bad name", "x").validate().is_err());
    let dup = ModDescriptor::new("ok", "x")
        .param(ParamSpec::text("t", "T", ""))
        .param(ParamSpec::text("t", "T", ""));
    assert!(dup.validate().unwrap_err().contains("duplicate"));
}

#[test]
fn color_default_must_parse() {
    assert!(ParamSpec::color("c", "C", "#12345").validate().is_err());
    assert!(ParamSpec::color("c", "C", "#123456").validate().is_ok());
}
