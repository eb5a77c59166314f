use super::*;

#[test]
fn empty_document_yields_defaults() {
    let cfg = StageConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, StageConfig::default());
    assert_eq!(cfg.gate, GateMargins::uniform(-0.2));
    assert_eq!(cfg.reveal.margins, GateMargins::uniform(-0.1));
    assert_eq!(cfg.workflow_steps.get(), 4);
    assert_eq!(cfg.panel_spring, SpringParams::default());
    assert!(cfg.holds(ShowcaseKind::Editing).is_empty());
}

#[test]
fn partial_documents_merge_with_defaults() {
    let cfg = StageConfig::from_json_str(
        r#"{
            "gate": { "top": -0.1 },
            "panel_spring": { "damping": 30 },
            "timings": { "auto_mode": [100, 200] }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.gate.top, -0.1);
    assert_eq!(cfg.gate.bottom, -0.2);
    assert_eq!(cfg.panel_spring.damping, 30.0);
    assert_eq!(cfg.panel_spring.stiffness, 300.0);
    assert_eq!(cfg.holds(ShowcaseKind::AutoMode), &[100, 200]);
}

#[test]
fn rejects_unknown_fields_and_bad_values() {
    let err = StageConfig::from_json_str(r#"{ "gates": {} }"#).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));

    let err = StageConfig::from_json_str(r#"{ "workflow_steps": 0 }"#).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));

    let err = StageConfig::from_json_str(r#"{ "card_scale_step": 0.5 }"#).unwrap_err();
    assert!(err.to_string().contains("card stack"), "{err}");

    let err = StageConfig::from_json_str(r#"{ "gate": { "top": -2 } }"#).unwrap_err();
    assert!(err.to_string().contains("gate.top"), "{err}");

    let err = StageConfig::from_json_str(r#"{ "marquee": { "duration_ms": 0 } }"#).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn rejects_extra_hold_overrides() {
    let err = StageConfig::from_json_str(r#"{ "timings": { "auto_mode": [1, 2, 3, 4] } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("timings.auto_mode"), "{err}");
}

#[test]
fn load_reports_missing_files() {
    let err = StageConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().starts_with("config error: read"));
}

#[test]
fn card_stack_is_checked_against_the_landing_cards() {
    // 0.2 per card fits the four advantage cards whatever the workflow step count.
    let cfg =
        StageConfig::from_json_str(r#"{ "workflow_steps": 8, "card_scale_step": 0.2 }"#).unwrap();
    assert_eq!(cfg.workflow_steps.get(), 8);

    let err = StageConfig::from_json_str(r#"{ "workflow_steps": 1, "card_scale_step": 0.3 }"#)
        .unwrap_err();
    assert!(err.to_string().contains("card stack"), "{err}");
}

#[test]
fn panel_spring_must_be_damped() {
    let err = StageConfig::from_json_str(r#"{ "panel_spring": { "damping": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("panel_spring"), "{err}");
}
