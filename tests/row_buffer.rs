use vizbar::models::{ChartConfig, ChartSpec, FieldType, Metadata};
use vizbar::{RowBuffer, classify, row};

fn metadata() -> Metadata {
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

#[test]
fn appends_past_max_length_drop_oldest_points() {
    let config = ChartConfig::new(
        "rpm",
        vec![ChartSpec::bar("torque").with_color("EngineType")],
    )
    .with_max_length(7);
    let metadata = metadata();
    let mut buffer = RowBuffer::new();

    for t in 1..=20 {
        buffer
            .push(
                vec![
                    row![t, t * 10, 10, "piston"],
                    row![t, t * 20, 10, "rotary"],
                ],
                &metadata,
                &config,
            )
            .unwrap();
    }
    assert_eq!(buffer.len(), 14);

    let classified = classify(buffer.rows(), &metadata, &config).unwrap();
    let chart = classified.chart(0).unwrap();
    for s in &chart.series {
        assert_eq!(s.points.len(), 7, "series {}", s.name);
        let xs: Vec<f64> = s.points.iter().filter_map(|p| p.x.as_f64()).collect();
        assert_eq!(xs, [14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0]);
    }
}

#[test]
fn uneven_categories_keep_their_own_window() {
    let config = ChartConfig::new(
        "rpm",
        vec![ChartSpec::bar("torque").with_color("EngineType")],
    )
    .with_max_length(2);
    let metadata = metadata();
    let mut buffer = RowBuffer::new();
    buffer
        .push(
            vec![
                row![1, 1, 0, "rare"],
                row![2, 2, 0, "common"],
                row![3, 3, 0, "common"],
                row![4, 4, 0, "common"],
            ],
            &metadata,
            &config,
        )
        .unwrap();

    // the lone "rare" row is older than every "common" row but still within its window
    assert_eq!(buffer.len(), 3);
    let classified = classify(buffer.rows(), &metadata, &config).unwrap();
    let chart = classified.chart(0).unwrap();
    assert_eq!(chart.series_named("rare").unwrap().points.len(), 1);
    assert_eq!(chart.series_named("common").unwrap().points.len(), 2);
}

#[test]
fn replace_policy_discards_previous_rows() {
    let config = ChartConfig::new("rpm", vec![ChartSpec::bar("torque")]).replacing();
    let metadata = metadata();
    let mut buffer = RowBuffer::new();
    buffer
        .push(vec![row![1, 1, 0, "a"], row![2, 2, 0, "a"]], &metadata, &config)
        .unwrap();
    buffer.push(vec![row![3, 3, 0, "a"]], &metadata, &config).unwrap();
    assert_eq!(buffer.rows(), &[row![3, 3, 0, "a"]]);
}

#[test]
fn malformed_push_leaves_buffer_untouched() {
    let config = ChartConfig::new("rpm", vec![ChartSpec::bar("torque")]);
    let metadata = metadata();
    let mut buffer = RowBuffer::new();
    buffer.push(vec![row![1, 1, 0, "a"]], &metadata, &config).unwrap();
    assert!(buffer.push(vec![row![2, 2]], &metadata, &config).is_err());
    assert_eq!(buffer.len(), 1);
}
