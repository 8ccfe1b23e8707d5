use super::*;
use crate::foundation::core::ScaleBounds;

#[test]
fn empty_object_yields_defaults() {
    let cfg = EditorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.export_filename, "twibbon-result.png");
    assert_eq!(cfg.limits.slider, ScaleBounds::SLIDER);
    assert_eq!(cfg.limits.pinch, ScaleBounds::PINCH);
    assert_eq!(cfg.redraw_policy, RedrawPolicy::Cached);
    assert_eq!(cfg.render.clear_rgba, None);
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = EditorConfig::from_json_str(
        r#"{
  "limits": { "pinch": { "min": 0.25, "max": 8.0 } },
  "redraw_policy": "reload_always",
  "render": { "clear_rgba": [255, 255, 255, 255] }
}"#,
    )
    .unwrap();
    assert_eq!(cfg.limits.pinch, ScaleBounds { min: 0.25, max: 8.0 });
    assert_eq!(cfg.limits.slider, ScaleBounds::SLIDER);
    assert_eq!(cfg.limits.slider_step, 0.1);
    assert_eq!(cfg.redraw_policy, RedrawPolicy::ReloadAlways);
    assert_eq!(cfg.render.clear_rgba, Some([255, 255, 255, 255]));
}

#[test]
fn invalid_values_are_rejected() {
    let err = EditorConfig::from_json_str(r#"{ "limits": { "slider": { "min": 2.0, "max": 1.0 } } }"#)
        .unwrap_err();
    assert!(matches!(err, TwibbonError::Validation(_)));

    let err = EditorConfig::from_json_str(r#"{ "export_filename": "../escape.png" }"#).unwrap_err();
    assert!(matches!(err, TwibbonError::Validation(_)));

    let err = EditorConfig::from_json_str(r#"{ "canvas": { "width": 10, "height": 10 } }"#)
        .unwrap_err();
    assert!(matches!(err, TwibbonError::Serde(_)));
}

#[test]
fn documented_full_shape_loads() {
    let cfg = EditorConfig::from_json_str(
        r#"{
  "limits": {
    "slider": { "min": 0.5, "max": 3.0 },
    "slider_step": 0.1,
    "pinch": { "min": 0.5, "max": 5.0 }
  },
  "export_filename": "twibbon-result.png",
  "render": { "clear_rgba": null },
  "redraw_policy": "cached"
}"#,
    )
    .unwrap();
    assert_eq!(cfg, EditorConfig::default());
}
