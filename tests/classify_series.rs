use vizbar::error::{ConfigError, FieldRole};
use vizbar::models::{ChartConfig, ChartSpec, FieldType, Metadata, Point, Row, XValue};
use vizbar::viz::util::office_hex;
use vizbar::{classify, row};

fn engine_metadata() -> Metadata {
    Metadata::new(
        ["rpm", "torque", "horsepower", "EngineType"],
        vec![
            FieldType::Linear,
            FieldType::Linear,
            FieldType::Linear,
            FieldType::Ordinal,
        ],
    )
}

fn sales_metadata() -> Metadata {
    Metadata::new(
        ["Quarter", "Sales", "Product"],
        vec![FieldType::Ordinal, FieldType::Linear, FieldType::Ordinal],
    )
}

fn quarterly_rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for q in ["Q1", "Q2", "Q3", "Q4"] {
        for (i, product) in ["Product 1", "Product 2", "Product 3", "Product 4"]
            .iter()
            .enumerate()
        {
            rows.push(row![q, 1000.0 * (i + 1) as f64, *product]);
        }
    }
    rows
}

#[test]
fn color_field_splits_rows_into_named_series() {
    let config = ChartConfig::new(
        "rpm",
        vec![ChartSpec::bar("torque").with_color("EngineType")],
    );
    let rows = vec![row![1, 42, 10, "piston"], row![1, 55, 10, "rotary"]];
    let classified = classify(&rows, &engine_metadata(), &config).unwrap();

    let chart = classified.chart(0).unwrap();
    let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["piston", "rotary"]);
    assert_eq!(chart.series[0].points, vec![Point::new(1.0, 42.0)]);
    assert_eq!(chart.series[1].points, vec![Point::new(1.0, 55.0)]);
    assert_eq!(chart.data_set_length, 1);
}

#[test]
fn without_color_a_single_series_uses_fill() {
    let config = ChartConfig::new(
        "rpm",
        vec![
            ChartSpec::bar("horsepower").with_fill("#2ca02c"),
            ChartSpec::bar("torque"),
        ],
    );
    let rows = vec![row![1, 42, 10, "piston"], row![2, 55, 12, "rotary"]];
    let classified = classify(&rows, &engine_metadata(), &config).unwrap();

    let hp = &classified.chart(0).unwrap().series;
    assert_eq!(hp.len(), 1);
    assert_eq!(hp[0].name, "horsepower");
    assert_eq!(hp[0].color, "#2ca02c");
    assert_eq!(hp[0].points.len(), 2);

    let torque = &classified.chart(1).unwrap().series;
    assert_eq!(torque[0].color, office_hex(1));
}

#[test]
fn color_domain_pins_category_colors() {
    let config = ChartConfig::new(
        "rpm",
        vec![
            ChartSpec::bar("torque")
                .with_color("EngineType")
                .with_color_domain(["", "", "piston"]),
        ],
    );
    let rows = vec![row![1, 55, 10, "rotary"], row![1, 42, 10, "piston"]];
    let classified = classify(&rows, &engine_metadata(), &config).unwrap();
    let chart = classified.chart(0).unwrap();
    assert_eq!(chart.series_named("rotary").unwrap().color, office_hex(0));
    assert_eq!(chart.series_named("piston").unwrap().color, office_hex(2));
}

#[test]
fn complete_ordinal_grid_is_left_untouched() {
    let config = ChartConfig::new(
        "Quarter",
        vec![ChartSpec::bar("Sales").with_color("Product").stacked()],
    );
    let classified = classify(&quarterly_rows(), &sales_metadata(), &config).unwrap();
    let chart = classified.chart(0).unwrap();
    assert_eq!(chart.series.len(), 4);
    for (i, s) in chart.series.iter().enumerate() {
        let xs: Vec<String> = s.points.iter().map(|p| p.x.to_string()).collect();
        assert_eq!(xs, ["Q1", "Q2", "Q3", "Q4"]);
        assert!(s.points.iter().all(|p| p.y == 1000.0 * (i + 1) as f64));
    }
}

#[test]
fn sparse_ordinal_series_share_one_category_order() {
    let config = ChartConfig::new(
        "Quarter",
        vec![
            ChartSpec::bar("Sales").with_color("Product"),
            ChartSpec::line("Sales"),
        ],
    );
    let rows = vec![
        row!["Q2", 10, "A"],
        row!["Q1", 20, "B"],
        row!["Q3", 30, "A"],
        row!["Q2", 40, "C"],
    ];
    let classified = classify(&rows, &sales_metadata(), &config).unwrap();

    let expected: Vec<XValue> = ["Q2", "Q3", "Q1"].into_iter().map(XValue::from).collect();
    for s in classified.all_series() {
        let xs: Vec<XValue> = s.points.iter().map(|p| p.x.clone()).collect();
        assert_eq!(xs, expected, "series {}", s.name);
    }

    let chart = classified.chart(0).unwrap();
    let b: Vec<f64> = chart.series_named("B").unwrap().points.iter().map(|p| p.y).collect();
    assert_eq!(b, [0.0, 0.0, 20.0]);
    let a: Vec<f64> = chart.series_named("A").unwrap().points.iter().map(|p| p.y).collect();
    assert_eq!(a, [10.0, 30.0, 0.0]);
    assert_eq!(chart.data_set_length, 3);
}

#[test]
fn null_values_are_skipped() {
    let config = ChartConfig::new(
        "rpm",
        vec![ChartSpec::bar("torque").with_color("EngineType")],
    );
    let rows = vec![
        row![1, None::<f64>, 10, "piston"],
        row![1, 55, 10, "rotary"],
        row![2, 60, 10, None::<f64>],
    ];
    let classified = classify(&rows, &engine_metadata(), &config).unwrap();
    let chart = classified.chart(0).unwrap();
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].name, "rotary");
}

#[test]
fn unknown_fields_are_reported_with_their_role() {
    let metadata = engine_metadata();
    let rows: Vec<Row> = Vec::new();

    let bad_x = ChartConfig::new("speed", vec![ChartSpec::bar("torque")]);
    assert_eq!(
        classify(&rows, &metadata, &bad_x).unwrap_err(),
        ConfigError::UnknownField {
            role: FieldRole::X,
            name: "speed".into()
        }
    );

    let bad_y = ChartConfig::new("rpm", vec![ChartSpec::bar("weight")]);
    assert!(matches!(
        classify(&rows, &metadata, &bad_y),
        Err(ConfigError::UnknownField { role: FieldRole::Y, .. })
    ));

    let bad_color = ChartConfig::new("rpm", vec![ChartSpec::bar("torque").with_color("Make")]);
    let err = classify(&rows, &metadata, &bad_color).unwrap_err();
    assert_eq!(err.to_string(), "color field 'Make' is not present in metadata");
}

#[test]
fn inconsistent_metadata_fails_fast() {
    let metadata = Metadata::new(["rpm", "torque"], vec![FieldType::Linear]);
    let config = ChartConfig::new("rpm", vec![ChartSpec::bar("torque")]);
    assert_eq!(
        classify(&[row![1]], &metadata, &config).unwrap_err(),
        ConfigError::MetadataMismatch { names: 2, types: 1 }
    );
}

#[test]
fn malformed_rows_are_rejected() {
    let config = ChartConfig::new("rpm", vec![ChartSpec::bar("torque")]);
    let short = vec![row![1, 42, 10, "piston"], row![1, 42]];
    assert_eq!(
        classify(&short, &engine_metadata(), &config).unwrap_err(),
        ConfigError::RowShape {
            row: 1,
            expected: 4,
            found: 2
        }
    );

    let text_y = vec![row![1, "lots", 10, "piston"]];
    assert_eq!(
        classify(&text_y, &engine_metadata(), &config).unwrap_err(),
        ConfigError::NonNumeric {
            row: 0,
            field: "torque".into()
        }
    );
}
