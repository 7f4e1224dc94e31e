use std::collections::BTreeSet;

use super::*;

#[test]
fn all_builtins_have_valid_unique_descriptors() {
    let mods = builtins();
    let names: BTreeSet<&str> = mods.iter().map(|m| m.descriptor.name.as_str()).collect();
    assert_eq!(names.len(), mods.len());
    assert_eq!(
        names.into_iter().collect::<Vec<_>>(),
        vec![
            "blur",
            "circle_vignette",
            "darken",
            "image_overlay",
            "noise",
            "rotate",
            "shape_vignette",
            "sharpness",
            "text_overlay"
        ]
    );
    for m in &mods {
        m.descriptor.validate().unwrap();
    }
}

#[test]
fn parameter_tables_match_published_ranges() {
    let by_name = |n: &str| {
        builtins()
            .into_iter()
            .find(|m| m.descriptor.name == n)
            .unwrap()
            .descriptor
    };
    let v = serde_json::to_value(by_name("darken")).unwrap();
    assert_eq!(v["params"][0]["min"], 0.0);
    assert_eq!(v["params"][0]["max"], 2.0);
    assert_eq!(v["params"][0]["default"], 1.0);

    let text = by_name("text_overlay");
    let names: Vec<&str> = text.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        ["text", "font_size", "color", "font_path", "x", "y", "scale"]
    );

    let noise = serde_json::to_value(by_name("noise")).unwrap();
    assert_eq!(noise["params"][1]["type"], "button");
    assert_eq!(noise["params"][1]["name"], "regenerate_noise");
}
