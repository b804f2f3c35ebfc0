//! Integration tests for the DiagramBuilder API
//!
//! These tests run complete conversion responses through decoding, layout
//! and rendering.

use std::time::{Duration, Instant};

use simview::{
    DiagramBuilder, SimviewError,
    config::{AppConfig, LayoutEngine},
    identifier::BlockId,
    layout::LayoutMode,
};

const ZERO_COORDINATES: &str = r##"{
    "success": true,
    "c_code": "#include <stdio.h>\n\nint main(void) {\n    return 0;\n}\n",
    "diagram": {
        "blocks": [
            {"id": "1", "type": "Inport", "name": "In1", "x": 0.0, "y": 0.0},
            {"id": "2", "type": "Gain", "name": "Gain", "x": 0.0, "y": 0.0}
        ],
        "connections": [{"from": "1", "to": "2"}]
    },
    "block_count": 2,
    "connection_count": 1
}"##;

const SUPPLIED_COORDINATES: &str = r#"{
    "success": true,
    "c_code": "",
    "diagram": {
        "blocks": [
            {"id": 10, "type": "Step", "name": "Step", "x": 100, "y": 50},
            {"id": 11, "type": "TransferFcn", "name": "Plant", "x": 300, "y": 250},
            {"id": 12, "type": "Scope", "name": "Scope", "x": 500, "y": 150}
        ],
        "connections": [{"from": 10, "to": 11}, {"from": 11, "to": 12}]
    }
}"#;

#[test]
fn test_decode_and_layout_zero_coordinates() {
    let builder = DiagramBuilder::default();
    let result = builder.decode(ZERO_COORDINATES).expect("Should decode");

    assert_eq!(result.stats().block_count(), 2);
    assert_eq!(result.stats().connection_count(), 1);
    assert_eq!(result.stats().code_lines(), 6);

    let layout = builder.layout(result.diagram());
    assert_eq!(layout.mode(), LayoutMode::Layered);
    assert_eq!(layout.layer_of(BlockId::new("1")), Some(0));
    assert_eq!(layout.layer_of(BlockId::new("2")), Some(1));

    let first = layout.position(BlockId::new("1")).unwrap();
    let second = layout.position(BlockId::new("2")).unwrap();
    assert!(first.x() < second.x());
}

#[test]
fn test_decode_and_layout_supplied_coordinates() {
    let builder = DiagramBuilder::default();
    let result = builder.decode(SUPPLIED_COORDINATES).expect("Should decode");

    let layout = builder.layout(result.diagram());
    assert_eq!(layout.mode(), LayoutMode::Normalized);

    let step = layout.position(BlockId::from(10_u64)).unwrap();
    let scope = layout.position(BlockId::from(12_u64)).unwrap();
    assert_eq!(step.x(), 60.0);
    assert_eq!(step.y(), 40.0);
    assert_eq!(scope.x(), 740.0);
}

#[test]
fn test_render_svg() {
    let builder = DiagramBuilder::new(AppConfig::default());
    let result = builder.decode(ZERO_COORDINATES).unwrap();

    let svg = builder
        .render_svg(result.diagram())
        .expect("Should render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert_eq!(svg.matches(r#"class="block""#).count(), 2);
    assert_eq!(svg.matches("<line").count(), 1);
}

#[test]
fn test_service_error_is_reported() {
    let builder = DiagramBuilder::default();
    let err = builder
        .decode(r#"{"error": "Could not parse .slx archive"}"#)
        .unwrap_err();

    assert!(matches!(err, SimviewError::Service(_)));
    assert_eq!(
        err.to_string(),
        "Conversion failed: Could not parse .slx archive"
    );
}

#[test]
fn test_malformed_body_is_decode_error() {
    let builder = DiagramBuilder::default();
    let err = builder.decode("{\"success\": tru}").unwrap_err();

    assert!(matches!(err, SimviewError::Decode { .. }));
    assert!(err.decode_offset().is_some());
}

#[test]
fn test_invalid_style_color_is_style_error() {
    let config: AppConfig = json_config(r#"{"style": {"block_colors": {"Gain": "nope"}}}"#);
    let builder = DiagramBuilder::new(config);
    let result = builder.decode(ZERO_COORDINATES).unwrap();

    let err = builder.render_svg(result.diagram()).unwrap_err();
    assert!(matches!(err, SimviewError::Style(_)));
}

#[test]
fn test_grid_engine_from_config() {
    let config = json_config(r#"{"layout": {"engine": "grid"}}"#);
    assert_eq!(config.layout().engine(), LayoutEngine::Grid);

    let builder = DiagramBuilder::new(config);
    let result = builder.decode(ZERO_COORDINATES).unwrap();
    assert_eq!(builder.layout(result.diagram()).mode(), LayoutMode::Grid);
}

#[test]
fn test_cycle_terminates_quickly() {
    let body = r#"{
        "success": true,
        "diagram": {
            "blocks": [
                {"id": "A", "type": "Sum"},
                {"id": "B", "type": "Integrator"},
                {"id": "C", "type": "Gain"}
            ],
            "connections": [
                {"from": "A", "to": "B"},
                {"from": "B", "to": "C"},
                {"from": "C", "to": "A"}
            ]
        }
    }"#;
    let builder = DiagramBuilder::default();
    let result = builder.decode(body).unwrap();

    let start = Instant::now();
    let layout = builder.layout(result.diagram());
    assert!(start.elapsed() < Duration::from_millis(50));

    let layers: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|id| layout.layer_of(BlockId::new(id)).unwrap())
        .collect();
    assert_eq!(layers, [0, 1, 2]);
}

#[test]
fn test_missing_name_gets_default() {
    let body = r#"{"success": true, "diagram": {"blocks": [{"id": 7, "type": "Scope"}]}}"#;
    let result = DiagramBuilder::default().decode(body).unwrap();

    assert_eq!(result.diagram().blocks()[0].name(), "Block_7");
}

fn json_config(json: &str) -> AppConfig {
    serde_json::from_str(json).expect("Valid test config")
}
