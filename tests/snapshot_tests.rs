use row_chart::api::{ChartSnapshot, PairedRowChart, RowChart, RowChartConfig};
use row_chart::core::{DataRecord, NoFilter, Pane, Viewport};
use row_chart::render::NullRenderer;

#[test]
fn row_chart_snapshot_survives_json() {
    let mut chart = RowChart::new(
        NullRenderer::default(),
        RowChartConfig::new(Viewport::new(400, 300)),
    )
    .expect("chart init");
    chart.set_data(vec![DataRecord::new("a", 10.0), DataRecord::new("b", 20.0)]);
    chart.render(&NoFilter).expect("render");

    let json = chart.snapshot_json_pretty().expect("serialize");
    let parsed: ChartSnapshot = serde_json::from_str(&json).expect("parse");

    assert_eq!(parsed.viewport, Viewport::new(400, 300));
    assert_eq!(parsed.panes.len(), 1);
    let pane = &parsed.panes[0];
    assert_eq!(pane.pane, None);
    assert_eq!(pane.domain, Some((0.0, 20.0)));
    assert_eq!(pane.root, Some(0.0));
    let keys: Vec<&str> = pane.rows.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(pane.axis.as_ref().map(|axis| axis.ticks.len()), Some(11));
}

#[test]
fn snapshot_before_first_render_has_no_scale() {
    let chart = RowChart::new(
        NullRenderer::default(),
        RowChartConfig::new(Viewport::new(400, 300)),
    )
    .expect("chart init");
    let snapshot = chart.snapshot();
    assert_eq!(snapshot.panes[0].domain, None);
    assert_eq!(snapshot.panes[0].root, None);
    assert!(snapshot.panes[0].rows.is_empty());
}

#[test]
fn empty_pane_reports_no_domain() {
    let mut chart = PairedRowChart::new(
        NullRenderer::default(),
        RowChartConfig::new(Viewport::new(400, 300)),
    )
    .expect("chart init");
    chart.set_left_key_filter(|record| record.key.starts_with("Male"));
    chart.set_right_key_filter(|record| record.key.starts_with("Female"));
    chart.set_data(vec![DataRecord::new("Male/A", 3.0)]);
    chart.render(&NoFilter).expect("render");

    let snapshot = chart.snapshot();
    assert_eq!(snapshot.panes[0].pane, Some(Pane::Left));
    assert_eq!(snapshot.panes[0].domain, Some((0.0, 3.0)));
    assert_eq!(snapshot.panes[1].domain, None);
    assert!(snapshot.panes[1].rows.is_empty());
    serde_json::to_string(&snapshot).expect("serializable with an empty pane");
}

#[test]
fn config_defaults_fill_missing_json_fields() {
    let parsed: RowChartConfig =
        serde_json::from_str(r#"{"viewport":{"width":400,"height":300}}"#).expect("parse");
    assert_eq!(parsed, RowChartConfig::new(Viewport::new(400, 300)));

    let tuned: RowChartConfig = serde_json::from_str(
        r#"{"viewport":{"width":400,"height":300},"gap":2,"fixed_bar_height":18,"elastic_x":true}"#,
    )
    .expect("parse");
    assert_eq!(tuned.gap, 2.0);
    assert_eq!(tuned.fixed_bar_height, Some(18.0));
    assert!(tuned.elastic_x);
    assert!(tuned.render_label);
}
