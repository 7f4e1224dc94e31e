use super::*;

fn base() -> ModDescriptor {
    ModDescriptor::new("shape_vignette", "Shape vignette")
        .describe("Vignette with a shape")
        .param(ParamSpec::dropdown(
            "shape",
            "Shape",
            &[("Circle", "circle"), ("Star", "star"), ("Heart", "heart")],
            "circle",
        ))
        .param(ParamSpec::slider("radius", "Radius", 10.0, 500.0, 100.0))
}

#[test]
fn overrides_merge_by_name_and_keep_order() {
    let m = PluginManifest::from_json_str(
        r#"{
            "base": "shape_vignette",
            "name": "star_vignette",
            "label": "Star",
            "params": [
                { "name": "radius", "type": "slider", "min": 50, "max": 200, "default": 150 },
                { "name": "shape", "type": "dropdown", "options": [{ "label": "Star", "value": "star" }], "default": "star" }
            ]
        }"#,
    )
    .unwrap();
    let d = m.resolve(&base()).unwrap();
    assert_eq!(d.name, "star_vignette");
    assert_eq!(d.label, "Star");
    assert_eq!(d.description.as_deref(), Some("Vignette with a shape"));
    assert_eq!(d.params[0].name, "shape");
    assert_eq!(d.params[1].label, "Radius");
    assert_eq!(d.params[1].default, Some(serde_json::json!(150)));
}

#[test]
fn unknown_param_is_rejected() {
    let m = PluginManifest {
        base: "shape_vignette".into(),
        name: "x".into(),
        label: None,
        description: None,
        params: vec![ParamSpec::text("caption", "Caption", "")],
    };
    assert!(m.resolve(&base()).unwrap_err().contains("does not exist"));
}

#[test]
fn kind_change_is_rejected() {
    let m = PluginManifest {
        base: "shape_vignette".into(),
        name: "x".into(),
        label: None,
        description: None,
        params: vec![ParamSpec::text("radius", "Radius", "big")],
    };
    assert!(m.resolve(&base()).unwrap_err().contains("is a slider"));
}

#[test]
fn dropdown_cannot_add_options() {
    let m = PluginManifest {
        base: "shape_vignette".into(),
        name: "x".into(),
        label: None,
        description: None,
        params: vec![ParamSpec::dropdown("shape", "Shape", &[("Moon", "moon")], "moon")],
    };
    assert!(m.resolve(&base()).unwrap_err().contains("moon"));
}

#[test]
fn out_of_range_default_is_rejected_by_descriptor_rules() {
    let m = PluginManifest {
        base: "shape_vignette".into(),
        name: "x".into(),
        label: None,
        description: None,
        params: vec![ParamSpec::slider("radius", "Radius", 10.0, 20.0, 30.0)],
    };
    assert!(m.resolve(&base()).is_err());
}

#[test]
fn unknown_fields_fail_to_parse() {
    let err = PluginManifest::from_json_str(r#"{"base":"blur","name":"b","script":"rm -rf"}"#)
        .unwrap_err();
    assert_eq!(err.kind(), "serialization");
}

#[test]
fn narrowed_slider_without_default_inherits_the_clamped_base_default() {
    let m = PluginManifest::from_json_str(
        r#"{
            "base": "shape_vignette",
            "name": "tight",
            "params": [{ "name": "radius", "type": "slider", "min": 10, "max": 50 }]
        }"#,
    )
    .unwrap();
    let d = m.resolve(&base()).unwrap();
    assert_eq!(d.params[1].default, Some(serde_json::json!(50.0)));

    let m = PluginManifest::from_json_str(
        r#"{
            "base": "shape_vignette",
            "name": "wide",
            "params": [{ "name": "radius", "type": "slider", "min": 50, "max": 400 }]
        }"#,
    )
    .unwrap();
    assert_eq!(
        m.resolve(&base()).unwrap().params[1].default,
        Some(serde_json::json!(100.0))
    );
}

#[test]
fn narrowed_dropdown_drops_a_default_it_no_longer_offers() {
    let m = PluginManifest {
        base: "shape_vignette".into(),
        name: "x".into(),
        label: None,
        description: None,
        params: vec![ParamSpec {
            default: None,
            ..ParamSpec::dropdown("shape", "", &[("Star", "star")], "star")
        }],
    };
    let d = m.resolve(&base()).unwrap();
    assert_eq!(d.params[0].default, None);
    assert_eq!(d.params[0].label, "Shape");
}
