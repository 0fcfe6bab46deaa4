use approx::assert_relative_eq;
use row_chart::api::{ChartStrategies, RowChart, RowChartConfig};
use row_chart::core::{
    DataRecord, MarginStrategy, Margins, NoFilter, PaddingContributions, Viewport,
    compute_margins,
};
use row_chart::render::NullRenderer;

fn records() -> Vec<DataRecord> {
    vec![DataRecord::new("a", 2.0), DataRecord::new("b", 4.0)]
}

#[test]
fn empty_paddings_fall_back_to_the_floor() {
    let margins = compute_margins(&PaddingContributions::default());
    assert_eq!(
        margins,
        Margins {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0
        }
    );
}

#[test]
fn caption_height_reaches_the_bottom_margin_on_the_next_redraw() {
    let config =
        RowChartConfig::new(Viewport::new(400, 300)).with_x_axis_label(Some("Count".to_owned()));
    let mut chart = RowChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(records());

    chart.render(&NoFilter).expect("render");
    assert_eq!(chart.margins().bottom, 20.0);
    let padding = chart.snapshot().paddings.x_axis_label;
    assert_relative_eq!(padding, 12.0 * 1.1 + 20.0);
    assert_eq!(chart.snapshot().caption.as_deref(), Some("Count"));

    chart.redraw(&NoFilter).expect("redraw");
    assert_relative_eq!(chart.margins().bottom, padding + 10.0);
    assert_relative_eq!(chart.effective_height(), 300.0 - 20.0 - padding - 10.0);

    chart.redraw(&NoFilter).expect("steady redraw");
    assert_relative_eq!(chart.margins().bottom, padding + 10.0);
}

#[test]
fn removing_the_caption_releases_its_padding() {
    let config =
        RowChartConfig::new(Viewport::new(400, 300)).with_x_axis_label(Some("Count".to_owned()));
    let mut chart = RowChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_data(records());
    chart.render(&NoFilter).expect("render");
    chart.redraw(&NoFilter).expect("redraw");
    assert!(chart.margins().bottom > 20.0);

    chart
        .update_config(|config| config.with_x_axis_label(None))
        .expect("update");
    chart.redraw(&NoFilter).expect("redraw without caption");
    assert_eq!(chart.snapshot().caption, None);
    assert_eq!(chart.snapshot().paddings.x_axis_label, 0.0);

    chart.redraw(&NoFilter).expect("next redraw");
    assert_eq!(chart.margins().bottom, 20.0);
}

#[test]
fn oversized_margins_clamp_the_plot_to_zero() {
    let mut chart = RowChart::new(
        NullRenderer::default(),
        RowChartConfig::new(Viewport::new(30, 30)),
    )
    .expect("chart init");
    chart.set_data(records());

    chart.render(&NoFilter).expect("render tolerates an empty plot");
    assert_eq!(chart.effective_width(), 0.0);
    assert_eq!(chart.effective_height(), 0.0);
    assert_eq!(chart.rows().len(), 2);
    chart
        .build_render_frame()
        .validate()
        .expect("clamped frame stays valid");
}

#[derive(Debug)]
struct WideLeft;

impl MarginStrategy for WideLeft {
    fn margins(&self, paddings: &PaddingContributions) -> Margins {
        Margins {
            left: 60.0,
            ..compute_margins(paddings)
        }
    }
}

#[test]
fn margin_strategy_is_injectable() {
    let strategies = ChartStrategies::default().with_margins(WideLeft);
    let mut chart = RowChart::with_strategies(
        NullRenderer::default(),
        RowChartConfig::new(Viewport::new(400, 300)),
        strategies,
    )
    .expect("chart init");
    chart.set_data(records());
    chart.render(&NoFilter).expect("render");

    assert_eq!(chart.margins().left, 60.0);
    assert_relative_eq!(chart.effective_width(), 320.0);
}
