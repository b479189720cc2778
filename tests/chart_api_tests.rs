use approx::assert_relative_eq;
use scatter_rs::ChartError;
use scatter_rs::api::{
    ChartConfig, DataStatus, LEGEND_PLACEHOLDER, ScatterChart, SeriesConfig, SeriesToggles,
};
use scatter_rs::core::{AxisBounds, AxisOptions, DataRow, TimeRange, Viewport, ViewportState};
use scatter_rs::interaction::InteractionMode;
use scatter_rs::render::{Color, CoordinateTransform, NullSurface};

const RED: Color = Color::rgb(0.9, 0.1, 0.1);
const BLUE: Color = Color::rgb(0.1, 0.1, 0.9);

fn xy_rows() -> Vec<DataRow> {
    vec![
        DataRow::new().with("x", 0.0).with("y", 0.0),
        DataRow::new().with("x", 10.0).with("y", 10.0),
        DataRow::new().with("x", 5.0).with("y", 5.0),
    ]
}

/// 110x110 chart over x, y in [-0.5, 10.5]: 10 logical pixels per unit.
fn xy_chart(surface: NullSurface) -> ScatterChart<NullSurface> {
    let config = ChartConfig::new(Viewport::new(110, 110), "t");
    let series = vec![SeriesConfig::xy_scatter("geo", "x", "y", RED)];
    ScatterChart::new(surface, config, series, xy_rows()).expect("chart init")
}

#[test]
fn render_draws_and_indexes_every_visible_marker() {
    let mut chart = xy_chart(NullSurface::default());
    assert_eq!(chart.data_status(), DataStatus::Ready { points: 3 });

    let stats = chart.render().expect("render");
    assert_eq!(stats.markers_drawn, 3);
    assert_eq!(stats.highlights_drawn, 0);
    assert_eq!(chart.indexed_markers(), 3);

    let surface = chart.surface();
    assert_eq!(surface.last_stats.clears, 1);
    assert_eq!(surface.last_stats.arcs, 3);
    assert_eq!(surface.last_stats.fills, 3);
}

#[test]
fn pointer_move_resolves_hover_and_legend() {
    let mut chart = xy_chart(NullSurface::default());
    chart.render().expect("render");

    let hover = chart
        .pointer_move(55.0, 55.0)
        .expect("pointer move")
        .expect("marker under cursor");
    assert_eq!((hover.series_id, hover.data_index), (0, 2));
    assert_eq!(chart.hovered_point(), Some(hover));

    let legend = chart.legend();
    assert_eq!(legend.series, "geo");
    assert_eq!(legend.x, "5");
    assert_eq!(legend.y, "5");
    assert_eq!(legend.time, LEGEND_PLACEHOLDER);

    assert_eq!(chart.pointer_move(80.0, 20.0).expect("pointer move"), None);
    assert!(chart.legend().is_placeholder());
}

#[test]
fn hovered_marker_gets_highlight_and_label() {
    let mut chart = xy_chart(NullSurface::default());
    chart.pointer_move(55.0, 55.0).expect("pointer move");

    let stats = chart.render().expect("render");
    assert_eq!(stats.highlights_drawn, 1);
    assert_eq!(stats.texts_drawn, 1);
    assert_eq!(chart.surface().last_texts, vec!["geo: x=5 y=5".to_owned()]);

    chart.pointer_leave().expect("leave");
    assert_eq!(chart.hovered_point(), None);
    let stats = chart.render().expect("render");
    assert_eq!(stats.highlights_drawn, 0);
}

#[test]
fn hover_works_without_prior_render() {
    let mut chart = xy_chart(NullSurface::default());
    let hover = chart.hover_at(0.5 * 10.0, 110.0 - 0.5 * 10.0).expect("hover");
    assert_eq!(hover.map(|hover| hover.data_index), Some(0));
}

#[test]
fn device_pixel_ratio_scales_geometry_but_not_input() {
    let mut chart = xy_chart(NullSurface::with_device_pixel_ratio(2.0));
    let frame = chart.build_render_frame().expect("frame");

    let center = frame.markers[2];
    assert!((center.cx - 110.0).abs() <= 1e-9);
    assert!((center.cy - 110.0).abs() <= 1e-9);
    assert!((center.radius - 8.0).abs() <= 1e-9);

    let hover = chart.pointer_move(55.0, 55.0).expect("pointer move");
    assert_eq!(hover.map(|hover| hover.data_index), Some(2));
}

#[test]
fn points_outside_the_window_are_culled() {
    let mut chart = xy_chart(NullSurface::default());
    chart
        .set_visible_window(ViewportState {
            x: AxisBounds { min: 4.0, max: 6.0 },
            y: AxisBounds { min: 4.0, max: 6.0 },
        })
        .expect("window");

    let stats = chart.render().expect("render");
    assert_eq!(stats.markers_drawn, 1);
    assert_eq!(chart.indexed_markers(), 1);
    assert_eq!(chart.snapshot().series["geo"].visible, 1);
}

#[test]
fn wheel_zooms_around_cursor_and_reset_restores_extent() {
    let mut chart = xy_chart(NullSurface::default());
    let extent = chart.data_extent();

    let state = chart
        .wheel(55.0, 55.0, -120.0)
        .expect("wheel")
        .expect("zoom applied");
    assert!(state.x.span() < extent.x.span());
    assert!(state.x.contains(5.0) && state.y.contains(5.0));
    assert!((state.x.span() - extent.x.span() * 0.9).abs() <= 1e-9);

    assert_eq!(chart.wheel(55.0, 55.0, 0.0).expect("wheel"), None);

    chart.wheel(55.0, 55.0, 120.0).expect("wheel out");
    let restored = chart.reset_viewport().expect("reset");
    assert_eq!(restored, extent);
}

#[test]
fn drag_pans_with_overscroll_clamp() {
    let mut chart = xy_chart(NullSurface::default());
    let extent = chart.data_extent();

    chart.pointer_down(55.0, 55.0).expect("down");
    assert_eq!(chart.interaction_mode(), InteractionMode::Panning);
    chart.pointer_move(65.0, 55.0).expect("drag");

    // Dragging right reveals data to the left, up to 1% of the extent span.
    let state = chart.viewport_state();
    let tolerance = extent.x.span() * 0.01;
    assert!(state.x.min < extent.x.min);
    assert!((state.x.min - (extent.x.min - tolerance)).abs() <= 1e-9);
    assert_eq!(state.y, extent.y);

    chart.pointer_up().expect("up");
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
    chart.pointer_move(80.0, 55.0).expect("move");
    assert_eq!(chart.viewport_state(), state);
}

#[test]
fn resize_keeps_window_and_rejects_empty_size() {
    let mut chart = xy_chart(NullSurface::default());
    let before = chart.viewport_state();

    chart.resize(220, 220).expect("resize");
    assert_eq!(chart.viewport(), Viewport::new(220, 220));
    assert_eq!(chart.viewport_state(), before);

    let hover = chart.pointer_move(110.0, 110.0).expect("pointer move");
    assert_eq!(hover.map(|hover| hover.data_index), Some(2));

    let err = chart.resize(0, 100).expect_err("invalid size");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 100 }));
}

#[test]
fn empty_and_timeless_data_surface_explicit_status() {
    let config = ChartConfig::new(Viewport::new(200, 100), "t");
    let series = vec![SeriesConfig::time_scatter("temp", "temp", RED)];
    let mut chart = ScatterChart::new(NullSurface::default(), config, series, Vec::new())
        .expect("chart init");

    assert_eq!(chart.data_status(), DataStatus::NoData);
    let stats = chart.render().expect("render empty");
    assert_eq!(stats.markers_drawn, 0);
    assert!(chart.legend().is_placeholder());

    chart
        .set_data(vec![DataRow::new().with("t", "garbage").with("temp", 1.0)])
        .expect("set data");
    assert_eq!(chart.data_status(), DataStatus::NoValidTimestamps);
    assert_eq!(chart.render().expect("render").markers_drawn, 0);
}

#[test]
fn time_series_use_sorted_seconds_and_filter() {
    let rows: Vec<DataRow> = (0..10)
        .rev()
        .map(|i| {
            DataRow::new()
                .with("t", 1_000_000.0 + f64::from(i) * 1_000.0)
                .with("temp", f64::from(i))
        })
        .collect();
    let config = ChartConfig::new(Viewport::new(400, 200), "t");
    let series = vec![SeriesConfig::time_scatter("temp", "temp", RED)];
    let mut chart =
        ScatterChart::new(NullSurface::default(), config, series, rows).expect("chart init");

    let points = &chart.series_data()[0].points;
    assert_eq!(points.len(), 10);
    assert_eq!(points[0].x, 1_000.0);
    assert_eq!(points[0].y, 0.0);
    assert_eq!(points[0].row, 9);

    chart
        .set_time_filter(Some(TimeRange::new(1_002_000.0, 1_004_000.0)))
        .expect("filter");
    let ys: Vec<f64> = chart.series_data()[0].points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![2.0, 3.0, 4.0]);

    chart.set_time_filter(None).expect("clear filter");
    assert_eq!(chart.series_data()[0].points.len(), 10);
}

#[test]
fn toggles_rebuild_the_drawn_series() {
    let config = ChartConfig::new(Viewport::new(200, 100), "t");
    let series = vec![
        SeriesConfig::xy_scatter("a", "x", "y", RED),
        SeriesConfig::xy_scatter("b", "y", "x", BLUE).optional(false),
    ];
    let mut chart =
        ScatterChart::new(NullSurface::default(), config, series, xy_rows()).expect("chart init");
    assert_eq!(chart.series().len(), 1);

    chart
        .set_series_toggles(SeriesToggles::new().with("b", true))
        .expect("toggle");
    assert_eq!(chart.series().len(), 2);
    assert_eq!(chart.render().expect("render").markers_drawn, 6);
}

#[test]
fn decimation_budget_applies_per_series() {
    let rows: Vec<DataRow> = (0..1_000)
        .map(|i| DataRow::new().with("x", f64::from(i)).with("y", f64::from(i % 7)))
        .collect();
    let config = ChartConfig::new(Viewport::new(400, 200), "t").with_max_points_per_series(300);
    let series = vec![SeriesConfig::xy_scatter("a", "x", "y", RED)];
    let chart =
        ScatterChart::new(NullSurface::default(), config, series, rows).expect("chart init");

    let data = &chart.series_data()[0];
    assert_eq!(data.source_len, 1_000);
    assert!(data.points.len() <= 300);
    assert_eq!(data.points.len(), 250);
}

#[test]
fn bubble_series_scale_radius_by_size_column() {
    let rows = vec![
        DataRow::new().with("x", 1.0).with("y", 1.0).with("pop", 10.0),
        DataRow::new().with("x", 2.0).with("y", 2.0).with("pop", 20.0),
    ];
    let config = ChartConfig::new(Viewport::new(200, 200), "t");
    let series = vec![SeriesConfig::xy_scatter("city", "x", "y", RED).with_size_column("pop")];
    let mut chart =
        ScatterChart::new(NullSurface::default(), config, series, rows).expect("chart init");

    let frame = chart.build_render_frame().expect("frame");
    let sizing = chart.config().marker_sizing;
    assert!((frame.markers[0].radius - sizing.min_radius).abs() <= 1e-9);
    assert!((frame.markers[1].radius - sizing.max_radius).abs() <= 1e-9);
}

#[test]
fn invalid_series_config_is_rejected() {
    let config = ChartConfig::new(Viewport::new(200, 100), "t");
    let series = vec![
        SeriesConfig::xy_scatter("a", "x", "y", RED),
        SeriesConfig::xy_scatter("a", "x", "y", BLUE),
    ];
    let err = ScatterChart::new(NullSurface::default(), config, series, xy_rows())
        .err()
        .expect("duplicate ids");
    assert!(matches!(err, ChartError::InvalidSeriesConfig { .. }));
}

#[test]
fn destroy_is_idempotent_and_blocks_mutation() {
    let mut chart = xy_chart(NullSurface::default());
    chart.pointer_move(55.0, 55.0).expect("pointer move");
    assert!(chart.hovered_point().is_some());

    chart.destroy();
    chart.destroy();

    assert!(chart.is_destroyed());
    assert_eq!(chart.hovered_point(), None);
    assert_eq!(chart.indexed_markers(), 0);
    assert!(matches!(chart.render(), Err(ChartError::Destroyed)));
    assert!(matches!(chart.set_data(xy_rows()), Err(ChartError::Destroyed)));
    assert!(matches!(chart.pointer_move(1.0, 1.0), Err(ChartError::Destroyed)));
    assert!(chart.legend().is_placeholder());
}

#[test]
fn snapshot_serializes_to_json() {
    let mut chart = xy_chart(NullSurface::default());
    chart.pointer_move(55.0, 55.0).expect("pointer move");

    let json = chart.snapshot_json().expect("snapshot json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["series"]["geo"]["points"], 3);
    assert_eq!(value["legend"]["x"], "5");
    assert_eq!(value["destroyed"], false);
}

#[test]
fn extreme_finite_values_still_build_a_finite_window() {
    let rows = vec![
        DataRow::new().with("x", -1e308).with("y", 1.0),
        DataRow::new().with("x", 1e308).with("y", 2.0),
    ];
    let config = ChartConfig::new(Viewport::new(200, 100), "t");
    let series = vec![SeriesConfig::xy_scatter("wide", "x", "y", RED)];
    let mut chart =
        ScatterChart::new(NullSurface::default(), config, series, rows).expect("chart init");

    let state = chart.viewport_state();
    assert!(state.x.min.is_finite() && state.x.max.is_finite());
    assert!(state.x.span().is_finite());
    chart.render().expect("render");
    chart.pointer_down(100.0, 50.0).expect("down");
    chart.pointer_move(150.0, 50.0).expect("drag");
    chart.wheel(100.0, 50.0, -1.0).expect("wheel");
}

#[test]
fn rejected_time_filter_leaves_chart_untouched() {
    let mut chart = xy_chart(NullSurface::default());
    let before_state = chart.viewport_state();
    let before_points = chart.series_data()[0].points.len();

    let err = chart
        .set_time_filter(Some(TimeRange {
            min: f64::NAN,
            max: 5.0,
        }))
        .expect_err("non-finite filter");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(chart.config().time_filter, None);
    chart.config().validate().expect("config still valid");
    assert_eq!(chart.viewport_state(), before_state);
    assert_eq!(chart.series_data()[0].points.len(), before_points);
}

#[test]
fn set_data_replaces_rows_series_and_window_together() {
    let mut chart = xy_chart(NullSurface::default());
    let rows = vec![
        DataRow::new().with("x", 100.0).with("y", -3.0),
        DataRow::new().with("x", 200.0).with("y", 3.0),
    ];

    chart.set_data(rows).expect("set data");
    assert_eq!(chart.rows().len(), 2);
    assert_eq!(chart.series_data()[0].points.len(), 2);
    assert!(chart.viewport_state().x.contains(150.0));
    assert!(!chart.viewport_state().x.contains(5.0));
}

#[test]
fn log_axis_wheel_keeps_value_under_cursor() {
    let rows: Vec<DataRow> = [1.0, 10.0, 100.0, 1_000.0]
        .iter()
        .enumerate()
        .map(|(i, y)| DataRow::new().with("x", i as f64).with("y", *y))
        .collect();
    let config = ChartConfig::new(Viewport::new(100, 100), "t")
        .with_axes(AxisOptions::default(), AxisOptions::log());
    let series = vec![SeriesConfig::xy_scatter("decades", "x", "y", BLUE)];
    let mut chart =
        ScatterChart::new(NullSurface::default(), config, series, rows).expect("chart init");

    let extent = chart.data_extent();
    assert!(extent.y.min > 0.5 && extent.y.min < 1.0);
    assert!(extent.y.max > 1_000.0 && extent.y.max < 2_000.0);

    let (_, before) = chart.transform().expect("transform").to_data(50.0, 80.0).expect("data");
    chart.wheel(50.0, 80.0, -1.0).expect("wheel").expect("zoom applied");
    let (_, after) = chart.transform().expect("transform").to_data(50.0, 80.0).expect("data");
    assert_relative_eq!(after, before, max_relative = 1e-9);

    chart.pointer_down(50.0, 50.0).expect("down");
    chart.pointer_move(50.0, 60.0).expect("drag");
    let state = chart.viewport_state();
    assert!(state.y.min > 0.0 && state.y.min < state.y.max);
}
