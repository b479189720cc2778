#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use scatter_rs::ChartError;
use scatter_rs::api::{ChartConfig, ScatterChart, SeriesConfig};
use scatter_rs::core::{DataRow, Viewport};
use scatter_rs::render::{CairoSurface, Color};

fn rows() -> Vec<DataRow> {
    vec![
        DataRow::new().with("x", 1.0).with("y", 4.0),
        DataRow::new().with("x", 2.0).with("y", 1.0),
        DataRow::new().with("x", 3.0).with("y", 3.0),
    ]
}

fn series() -> Vec<SeriesConfig> {
    vec![SeriesConfig::xy_scatter("s", "x", "y", Color::rgb(0.1, 0.5, 0.8))]
}

#[test]
fn cairo_surface_rejects_invalid_size() {
    let err = CairoSurface::new(0, 480, 1.0).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_surface_paints_markers_and_hover_label() {
    let surface = CairoSurface::new(800, 400, 2.0).expect("surface");
    let config = ChartConfig::new(Viewport::new(400, 200), "t");
    let mut chart = ScatterChart::new(surface, config, series(), rows()).expect("chart init");

    let frame = chart.build_render_frame().expect("frame");
    let (cx, cy) = (frame.markers[0].cx / 2.0, frame.markers[0].cy / 2.0);
    chart.pointer_move(cx, cy).expect("hover");
    let stats = chart.render().expect("render");
    assert_eq!(stats.markers_drawn, 3);
    assert_eq!(stats.highlights_drawn, 1);

    let surface = chart.into_surface();
    let cairo_stats = surface.last_stats();
    assert_eq!(cairo_stats.arcs_drawn, 4);
    assert_eq!(cairo_stats.texts_drawn, 1);
    assert_eq!(surface.backend_name(), "cairo+pango+pangocairo");
    assert!(surface.image().is_some());
}

#[test]
fn cairo_surface_draws_on_external_context() {
    let image = ImageSurface::create(Format::ARgb32, 300, 200).expect("image");
    let context = Context::new(&image).expect("context");
    let surface = CairoSurface::from_context(context, 1.0).expect("surface");
    let config = ChartConfig::new(Viewport::new(300, 200), "t");
    let mut chart = ScatterChart::new(surface, config, series(), rows()).expect("chart init");

    chart.render().expect("render");
    assert_eq!(chart.surface().last_stats().fills, 3);
    assert!(chart.surface().image().is_none());
}
