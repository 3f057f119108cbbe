use std::fs;
use tempfile::tempdir;
use vizbar::models::{ChartConfig, ChartSpec, FieldType, Metadata, Row};
use vizbar::viz::{self, IgnoreSet, Viewport};
use vizbar::{render_frame, row};

fn sample() -> (Metadata, Vec<Row>) {
    let metadata = Metadata::new(
        ["Quarter", "Sales", "Cost", "Product"],
        vec![
            FieldType::Ordinal,
            FieldType::Linear,
            FieldType::Linear,
            FieldType::Ordinal,
        ],
    );
    let mut rows = Vec::new();
    for (qi, q) in ["Q1", "Q2", "Q3", "Q4"].iter().enumerate() {
        for (pi, p) in ["Alpha", "Beta", "Gamma"].iter().enumerate() {
            let v = (qi * 3 + pi) as f64 * 10.0 - 20.0;
            rows.push(row![*q, v, v.abs() / 2.0, *p]);
        }
    }
    (metadata, rows)
}

#[test]
fn chart_kinds_produce_files() {
    let (metadata, rows) = sample();
    let configs = [
        ChartConfig::new("Quarter", vec![ChartSpec::bar("Sales").with_color("Product")]),
        ChartConfig::new(
            "Quarter",
            vec![ChartSpec::bar("Sales").with_color("Product").stacked()],
        ),
        ChartConfig::new(
            "Quarter",
            vec![ChartSpec::bar("Sales").with_color("Product").horizontal()],
        ),
        ChartConfig::new(
            "Quarter",
            vec![
                ChartSpec::bar("Sales").with_color("Product"),
                ChartSpec::line("Cost"),
                ChartSpec::area("Cost").with_fill("#2ca02c"),
            ],
        ),
    ];

    let dir = tempdir().unwrap();
    for (i, config) in configs.iter().enumerate() {
        let ignore = IgnoreSet::new().toggled("Beta");
        let frame = render_frame(&rows, &metadata, config, &ignore, Viewport::new(640.0, 360.0)).unwrap();
        for ext in ["svg", "png"] {
            let path = dir.path().join(format!("chart_{i}.{ext}"));
            viz::preview::plot_frame(&frame, config, &path, 640, 360).unwrap();
            let meta = fs::metadata(&path).expect("file created");
            assert!(meta.len() > 0, "{} has content", path.display());
        }
    }
}

#[test]
fn empty_frame_is_not_plotted() {
    let (metadata, _) = sample();
    let config = ChartConfig::new("Quarter", vec![ChartSpec::bar("Sales")]);
    let frame = render_frame(&[], &metadata, &config, &IgnoreSet::new(), Viewport::new(640.0, 360.0)).unwrap();
    let dir = tempdir().unwrap();
    assert!(viz::preview::plot_frame(&frame, &config, dir.path().join("empty.svg"), 640, 360).is_err());
}
