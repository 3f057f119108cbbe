use vizbar::models::{ChartConfig, ChartSpec, FieldType, Metadata, XValue};
use vizbar::viz::tooltip::{format_point, format_time};
use vizbar::viz::{DEFAULT_VIEWPORT, IgnoreSet, render_frame};
use vizbar::row;

#[test]
fn time_axis_uses_tip_pattern() {
    let metadata = Metadata::new(["ts", "load"], vec![FieldType::Time, FieldType::Linear]);
    let config = ChartConfig::new("ts", vec![ChartSpec::line("load")])
        .with_tip_time_format("%Y-%m-%d %H:%M");
    let text = format_point(&XValue::Number(86_400_000.0), 5.0, 0, &config, FieldType::Time).unwrap();
    assert_eq!(text, "ts : 1970-01-02 00:00\nload : 5");

    let rows = vec![row![0, 1.25], row![60_000, 3.14159]];
    let frame = render_frame(&rows, &metadata, &config, &IgnoreSet::new(), DEFAULT_VIEWPORT).unwrap();
    let tip = frame.tooltip(&config, 0, 0, 1).unwrap().unwrap();
    assert_eq!(tip, "ts : 1970-01-01 00:01\nload : 3.14");
    assert!(frame.tooltip(&config, 0, 0, 9).is_none());
}

#[test]
fn numbers_and_categories() {
    let config = ChartConfig::new("Quarter", vec![ChartSpec::bar("Sales"), ChartSpec::line("Cost")]);
    let text = format_point(&XValue::from("Q3"), 1234.5, 1, &config, FieldType::Ordinal).unwrap();
    assert_eq!(text, "Quarter : Q3\nCost : 1234.5");

    let linear = ChartConfig::new("rpm", vec![ChartSpec::bar("torque")]);
    let text = format_point(&XValue::Number(2.0 / 3.0), 42.0, 0, &linear, FieldType::Linear).unwrap();
    assert_eq!(text, "rpm : 0.67\ntorque : 42");
}

#[test]
fn time_without_pattern_prints_raw_milliseconds() {
    let config = ChartConfig::new("ts", vec![ChartSpec::bar("load")]);
    let text = format_point(&XValue::Number(1_700_000_000_000.0), 1.0, 0, &config, FieldType::Time).unwrap();
    assert_eq!(text, "ts : 1700000000000\nload : 1");
}

#[test]
fn malformed_pattern_is_reported() {
    assert!(format_time(0.0, "%Y-%").is_err());
    assert_eq!(format_time(0.0, "%d/%m/%Y").unwrap(), "01/01/1970");
}
