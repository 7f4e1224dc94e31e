use serde_json::json;

use super::*;

struct Identity;

impl ModPlugin for Identity {
    fn apply(&self, image: Image, _params: &ModParams) -> FramemodResult<Image> {
        Ok(image)
    }
}

#[test]
fn plugin_without_actions_reports_unsupported() {
    let handle = PluginHandle::new(
        Arc::new(ModDescriptor::new("identity", "Identity")),
        Box::new(Identity),
    );
    let err = handle
        .invoke_action("regenerate", &ModParams::empty("identity"))
        .unwrap_err();
    assert_eq!(err.kind(), "unsupported_action");
    assert_eq!(err.mod_name(), Some("identity"));
}

#[test]
fn action_results_serialize_like_plugin_responses() {
    let update = ActionResult::Update {
        message: "new noise".to_string(),
        new_value: json!(42),
        update_param: "intensity".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        json!({ "message": "new noise", "new_value": 42, "update_param": "intensity" })
    );
    assert_eq!(
        serde_json::to_value(ActionResult::Message("ok".into())).unwrap(),
        json!("ok")
    );
}

#[test]
fn handle_applies_plugin() {
    let handle = PluginHandle::new(
        Arc::new(ModDescriptor::new("identity", "Identity")),
        Box::new(Identity),
    );
    let img = Image::solid_rgb(2, 2, [1, 2, 3]).unwrap();
    let out = handle.apply(img.clone(), &ModParams::empty("identity")).unwrap();
    assert_eq!(out, img);
    assert_eq!(handle.name(), "identity");
}
