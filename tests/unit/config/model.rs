use super::*;
use serde_json::json;

fn line() -> LineDefinition {
    LineDefinition::new(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
        2.0,
        StrokeColor::from_hex_u32(0xffffff),
    )
}

#[test]
fn default_config_is_valid() {
    let cfg = RevealConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.lines.len(), 5);
    assert_eq!(cfg.frame_step, FrameStep::Fixed { secs: 0.016 });
}

#[test]
fn empty_json_yields_defaults() {
    let cfg = RevealConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, RevealConfig::default());
}

#[test]
fn json_lines_and_frame_step_parse() {
    let doc = json!({
        "max_pixel_ratio": 2.0,
        "frame_step": { "mode": "measured", "nominal_secs": 0.016, "max_delta_secs": 0.1 },
        "lines": [
            { "points": [{"x": 0.0, "y": 0.0}, {"x": 0.5, "y": 1.0}], "speed": 1.5,
              "delay": 0.2, "color": "#ff8800", "units": "relative" }
        ]
    });
    let cfg = RevealConfig::from_json_str(&doc.to_string()).unwrap();
    assert_eq!(cfg.lines.len(), 1);
    assert_eq!(cfg.lines[0].units, Units::Relative);
    assert_eq!(cfg.lines[0].opacity, 1.0);
    assert!(matches!(cfg.frame_step, FrameStep::Measured { .. }));
}

#[test]
fn json_roundtrips_through_serialize() {
    let cfg = RevealConfig::default();
    let s = cfg.to_json_string().unwrap();
    let back = RevealConfig::from_json_str(&s).unwrap();
    assert_eq!(back.lines.len(), cfg.lines.len());
    assert_eq!(back.curve_segments, cfg.curve_segments);
    for (a, b) in back.lines.iter().zip(&cfg.lines) {
        assert_eq!(a.points.len(), b.points.len());
        assert_eq!(a.units, b.units);
        assert!((a.speed - b.speed).abs() < 1e-12);
        assert!((a.color.r - b.color.r).abs() < 1e-12);
    }
}

#[test]
fn line_validation_rejects_bad_fields() {
    line().validate().unwrap();

    let mut l = line();
    l.points.truncate(1);
    assert!(l.validate().is_err());

    assert!(LineDefinition { speed: 0.0, ..line() }.validate().is_err());
    assert!(LineDefinition { speed: f64::INFINITY, ..line() }.validate().is_err());
    assert!(line().with_delay(-0.1).validate().is_err());
    assert!(line().with_opacity(1.5).validate().is_err());
}

#[test]
fn config_validation_names_the_offending_line() {
    let cfg = RevealConfig {
        lines: vec![line(), LineDefinition { speed: -1.0, ..line() }],
        ..RevealConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("lines[1]"));
}

#[test]
fn config_validation_rejects_bad_globals() {
    let bad = [
        RevealConfig { visibility_threshold: 0.0, ..RevealConfig::default() },
        RevealConfig { max_pixel_ratio: 0.0, ..RevealConfig::default() },
        RevealConfig { curve_segments: 0, ..RevealConfig::default() },
        RevealConfig { stroke_width: 0.0, ..RevealConfig::default() },
        RevealConfig { frame_step: FrameStep::Fixed { secs: 0.0 }, ..RevealConfig::default() },
        RevealConfig {
            depth: DepthRange { near: 1.0, far: -1.0 },
            ..RevealConfig::default()
        },
        RevealConfig {
            depth: DepthRange { near: 1.0, far: 2.0 },
            ..RevealConfig::default()
        },
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}

#[test]
fn relative_points_scale_with_container() {
    let l = LineDefinition::new(
        vec![Point::new(0.5, 0.25), Point::new(1.0, 1.0)],
        1.0,
        StrokeColor::from_hex_u32(0),
    )
    .with_units(Units::Relative);
    let pts = l.resolve_points(Size::new(800.0, 400.0).unwrap());
    assert_eq!(pts, vec![Point::new(400.0, 100.0), Point::new(800.0, 400.0)]);
}

#[test]
fn step_points_rounds_fractional_speed_up() {
    assert_eq!(LineDefinition { speed: 1.2, ..line() }.step_points(), 2);
    assert_eq!(LineDefinition { speed: 2.0, ..line() }.step_points(), 2);
    assert_eq!(LineDefinition { speed: 0.3, ..line() }.step_points(), 1);
}

#[test]
fn curve_segments_are_bounded() {
    let at_max = RevealConfig {
        curve_segments: MAX_CURVE_SEGMENTS,
        ..RevealConfig::default()
    };
    assert!(at_max.validate().is_ok());

    let over = RevealConfig {
        curve_segments: MAX_CURVE_SEGMENTS + 1,
        ..RevealConfig::default()
    };
    assert!(matches!(over.validate(), Err(RevealError::Validation(_))));

    let huge = RevealConfig::from_json_str(r#"{"curve_segments": 18446744073709551615}"#);
    assert!(matches!(huge, Err(RevealError::Validation(_))));
}
