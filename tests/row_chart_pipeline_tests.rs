use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use indexmap::IndexSet;
use row_chart::api::{ChartStrategies, RowChart, RowChartConfig};
use row_chart::core::{DataRecord, NoFilter, RowSelection, Side, Viewport};
use row_chart::extensions::TopN;
use row_chart::render::NullRenderer;
use row_chart::ChartError;

fn config() -> RowChartConfig {
    RowChartConfig::new(Viewport::new(400, 300))
}

fn sample() -> Vec<DataRecord> {
    vec![
        DataRecord::new("a", 10.0),
        DataRecord::new("b", 20.0),
        DataRecord::new("c", 5.0),
    ]
}

fn chart_with(records: Vec<DataRecord>) -> RowChart<NullRenderer> {
    let mut chart = RowChart::new(NullRenderer::default(), config()).expect("chart init");
    chart.set_data(records);
    chart
}

#[test]
fn first_render_creates_one_row_per_record() {
    let mut chart = chart_with(sample());
    let plan = chart.render(&NoFilter).expect("render");

    assert_eq!(plan.to_create, 0..3);
    assert!(plan.to_update.is_empty());
    assert!(plan.to_remove.is_empty());
    assert_eq!(chart.rows().len(), 3);
    assert_eq!(chart.renderer().frames_rendered, 1);
    assert_eq!(chart.renderer().last_rect_count, 3);

    let classes: Vec<&str> = chart
        .scene()
        .rows
        .iter()
        .map(|row| row.class_name.as_str())
        .collect();
    assert_eq!(classes, vec!["row _0", "row _1", "row _2"]);
}

#[test]
fn row_geometry_follows_plot_size_and_gap() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");

    assert_relative_eq!(chart.effective_width(), 360.0);
    assert_relative_eq!(chart.effective_height(), 260.0);

    let rows = chart.rows();
    let heights: Vec<f64> = rows.iter().map(|row| row.height).collect();
    assert_eq!(heights, vec![80.0, 80.0, 80.0]);
    let tops: Vec<f64> = rows.iter().map(|row| row.y).collect();
    assert_eq!(tops, vec![5.0, 90.0, 175.0]);

    assert_relative_eq!(rows[0].width, 180.0);
    assert_relative_eq!(rows[1].width, 360.0);
    assert_relative_eq!(rows[2].width, 90.0);
    assert!(rows.iter().all(|row| row.x == 0.0));
}

#[test]
fn redraw_joins_rows_by_position() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");

    chart.set_data(vec![DataRecord::new("x", 4.0), DataRecord::new("y", 8.0)]);
    let plan = chart.redraw(&NoFilter).expect("shrink");
    assert_eq!(plan.to_update, 0..2);
    assert_eq!(plan.to_remove, 2..3);
    assert!(plan.to_create.is_empty());
    let keys: Vec<String> = chart.rows().into_iter().map(|row| row.key).collect();
    assert_eq!(keys, vec!["x", "y"]);

    chart.set_data(vec![
        DataRecord::new("x", 4.0),
        DataRecord::new("y", 8.0),
        DataRecord::new("z", 1.0),
        DataRecord::new("w", 2.0),
    ]);
    let plan = chart.redraw(&NoFilter).expect("grow");
    assert_eq!(plan.to_create, 2..4);
    assert_eq!(plan.to_update, 0..2);
    assert_eq!(chart.rows().len(), 4);
    assert_eq!(chart.last_join(), Some(&plan));
}

#[test]
fn empty_data_renders_no_rows() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");

    chart.set_data(Vec::new());
    let plan = chart.redraw(&NoFilter).expect("redraw");
    assert_eq!(plan.to_remove, 0..3);
    assert!(chart.rows().is_empty());
    assert_eq!(chart.renderer().last_rect_count, 0);
}

#[test]
fn created_bars_start_at_zero_width_and_grow() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");

    let now = chart.clock_ms();
    let first = &chart.scene().rows[0];
    assert_eq!(first.bar_width.sample(now), 0.0);
    assert_relative_eq!(first.bar_width.target(), 180.0);

    chart.advance_time(375.0);
    let mid = chart.scene().rows[0].bar_width.sample(chart.clock_ms());
    assert!(mid > 0.0 && mid < 180.0);

    chart.advance_time(375.0);
    assert_relative_eq!(
        chart.scene().rows[0].bar_width.sample(chart.clock_ms()),
        180.0
    );
}

#[test]
fn selection_classes_are_idempotent() {
    let mut chart = chart_with(sample());
    let mut filters = IndexSet::new();
    filters.insert("b".to_owned());

    chart.render(&filters).expect("render");
    let first: Vec<RowSelection> = chart.rows().iter().map(|row| row.selection).collect();
    chart.redraw(&filters).expect("redraw");
    let second: Vec<RowSelection> = chart.rows().iter().map(|row| row.selection).collect();

    assert_eq!(
        first,
        vec![
            RowSelection::Deselected,
            RowSelection::Selected,
            RowSelection::Deselected
        ]
    );
    assert_eq!(first, second);

    chart.redraw(&NoFilter).expect("clear filters");
    assert!(
        chart
            .rows()
            .iter()
            .all(|row| row.selection == RowSelection::Neutral)
    );
}

#[test]
fn fixed_bar_height_changes_rows_on_next_redraw() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");
    assert_eq!(chart.rows()[0].height, 80.0);

    chart
        .update_config(|config| config.with_fixed_bar_height(Some(20.0)))
        .expect("update");
    assert_eq!(chart.rows()[0].height, 80.0);

    chart.redraw(&NoFilter).expect("redraw");
    let rows = chart.rows();
    assert!(rows.iter().all(|row| row.height == 20.0));
    let tops: Vec<f64> = rows.iter().map(|row| row.y).collect();
    assert_eq!(tops, vec![5.0, 30.0, 55.0]);
    assert_eq!(chart.config().gap, 5.0);
}

#[test]
fn zero_fixed_bar_height_falls_back_to_computed_height() {
    let mut chart = RowChart::new(
        NullRenderer::default(),
        config().with_fixed_bar_height(Some(0.0)),
    )
    .expect("chart init");
    chart.set_data(sample());
    chart.render(&NoFilter).expect("render");
    assert_eq!(chart.rows()[0].height, 80.0);
}

#[test]
fn right_axis_mirrors_bars_toward_the_left() {
    let mut chart = RowChart::new(
        NullRenderer::default(),
        config().with_use_right_y_axis(true),
    )
    .expect("chart init");
    chart.set_data(sample());
    chart.render(&NoFilter).expect("render");

    assert_eq!(chart.side(), Side::Right);
    let scale = chart.x_scale().expect("scale");
    assert_eq!(scale.range(), (360.0, 0.0));

    let row = &chart.rows()[0];
    assert_relative_eq!(row.x, 180.0);
    assert_relative_eq!(row.width, 180.0);
    assert_relative_eq!(row.x + row.width, 360.0);
}

#[test]
fn non_elastic_scale_is_kept_across_redraws() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");
    assert_eq!(chart.x_scale().expect("scale").domain(), (0.0, 20.0));

    chart.set_data(vec![DataRecord::new("a", 40.0)]);
    chart.redraw(&NoFilter).expect("redraw");
    assert_eq!(chart.x_scale().expect("scale").domain(), (0.0, 20.0));

    chart
        .update_config(|config| config.with_elastic_x(true))
        .expect("update");
    chart.redraw(&NoFilter).expect("elastic redraw");
    assert_eq!(chart.x_scale().expect("scale").domain(), (0.0, 40.0));
}

#[test]
fn labels_follow_render_flags() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");
    let row = &chart.scene().rows[0];
    assert!(row.value_label.is_some());
    assert!(row.title_label.is_none());
    assert_eq!(row.title.as_deref(), Some("a: 10"));

    chart
        .update_config(|config| config.with_render_label(false).with_render_title_label(true))
        .expect("update");
    chart.redraw(&NoFilter).expect("redraw");
    let row = &chart.scene().rows[0];
    assert!(row.value_label.is_none());
    let title = row.title_label.as_ref().expect("title label");
    assert_eq!(title.class_name, "titlerow _0");
    assert_eq!(title.text, "a: 10");
}

#[test]
fn label_offset_y_centers_on_rows_unless_configured() {
    let mut chart = chart_with(sample());
    chart.render(&NoFilter).expect("render");
    assert_relative_eq!(chart.label_offset_y(), 40.0);

    chart
        .update_config(|config| config.with_label_offset_y(Some(12.0)))
        .expect("update");
    chart.redraw(&NoFilter).expect("redraw");
    assert_relative_eq!(chart.label_offset_y(), 12.0);
}

#[test]
fn clicks_forward_records_to_the_handler() {
    let mut chart = chart_with(sample());
    let clicked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicked);
    chart.set_on_click(move |record| sink.borrow_mut().push(record.key.clone()));
    chart.render(&NoFilter).expect("render");

    chart.click_row(1).expect("click");
    let margins = chart.margins();
    let hit = chart
        .pointer_click(margins.left + 1.0, margins.top + 100.0)
        .expect("pointer click")
        .expect("row hit");
    assert_eq!(hit.index, 1);
    assert_eq!(
        chart.pointer_click(margins.left + 1.0, 1.0).expect("miss"),
        None
    );

    assert_eq!(*clicked.borrow(), vec!["b".to_owned(), "b".to_owned()]);
    assert!(matches!(
        chart.click_row(9),
        Err(ChartError::RowIndexOutOfRange { index: 9, len: 3 })
    ));
}

#[test]
fn top_n_cap_feeds_the_pipeline() {
    let strategies = ChartStrategies::default().with_cap(TopN::new(2));
    let mut chart = RowChart::with_strategies(NullRenderer::default(), config(), strategies)
        .expect("chart init");
    chart.set_data(vec![
        DataRecord::new("a", 1.0),
        DataRecord::new("b", 5.0),
        DataRecord::new("c", 3.0),
        DataRecord::new("d", 2.0),
    ]);
    chart.render(&NoFilter).expect("render");

    let keys: Vec<String> = chart.rows().into_iter().map(|row| row.key).collect();
    assert_eq!(keys, vec!["b", "c", "Others"]);
    assert_eq!(chart.records().len(), 4);
}

#[test]
fn top_n_cap_ranks_through_the_value_accessor() {
    let strategies = ChartStrategies::default().with_cap(TopN::new(1));
    let mut chart = RowChart::with_strategies(NullRenderer::default(), config(), strategies)
        .expect("chart init");
    chart.set_value_accessor(|record| 100.0 - record.value);
    chart.set_data(vec![
        DataRecord::new("a", 1.0),
        DataRecord::new("b", 50.0),
        DataRecord::new("c", 99.0),
    ]);
    chart.render(&NoFilter).expect("render");

    let data = chart.data();
    assert_eq!(data[0].key, "a");
    assert_eq!(data[1], DataRecord::new("Others", 149.0));
    assert_eq!(chart.rows()[0].key, "a");
}

#[test]
fn custom_accessors_drive_values_and_labels() {
    let mut chart = chart_with(sample());
    chart.set_value_accessor(|record| record.value * 2.0);
    chart.set_label_accessor(|record| record.key.to_uppercase());
    chart.render(&NoFilter).expect("render");

    assert_eq!(chart.x_scale().expect("scale").domain(), (0.0, 40.0));
    let label = chart.scene().rows[0]
        .value_label
        .as_ref()
        .expect("value label");
    assert_eq!(label.text, "A");
}

#[test]
fn invalid_config_is_rejected() {
    let result = RowChart::new(
        NullRenderer::default(),
        RowChartConfig::new(Viewport::new(0, 300)),
    );
    assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));

    let mut chart = chart_with(sample());
    let result = chart.update_config(|config| config.with_gap(-1.0));
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    assert_eq!(chart.config().gap, 5.0);

    let result =
        chart.update_config(|config| config.with_axis_tick_values(Some(vec![0.0, f64::NAN])));
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    assert_eq!(chart.config().axis_tick_values, None);
}
