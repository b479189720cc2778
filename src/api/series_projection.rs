#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use serde::{Deserialize, Serialize};

use crate::core::ViewportState;
use crate::error::ChartResult;
use crate::render::{CoordinateTransform, DrawingSurface, ViewportTransform};

use super::series_data::{SeriesData, SeriesPoint, marker_radius};
use super::{MarkerSizing, ScatterChart};

/// One visible marker in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMarker {
    /// Position of the series in the drawn series list.
    pub series_id: usize,
    /// Position of the point inside its (decimated) series.
    pub data_index: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Projects every point inside `visible` to device pixels.
///
/// Points outside the visible window are culled. Output order is series
/// order, then point order, which is also the order markers are painted.
pub fn project_markers(
    series: &[SeriesData],
    visible: ViewportState,
    transform: &ViewportTransform,
    sizing: MarkerSizing,
) -> ChartResult<Vec<ProjectedMarker>> {
    let mut out = Vec::new();
    for (series_id, data) in series.iter().enumerate() {
        out.extend(project_series(series_id, data, visible, transform, sizing)?);
    }
    Ok(out)
}

fn project_series(
    series_id: usize,
    data: &SeriesData,
    visible: ViewportState,
    transform: &ViewportTransform,
    sizing: MarkerSizing,
) -> ChartResult<Vec<ProjectedMarker>> {
    let project = |(data_index, point): (usize, &SeriesPoint)| {
        project_single_point(series_id, data_index, *point, data, transform, sizing)
    };

    #[cfg(feature = "parallel-projection")]
    {
        let projected: Vec<ChartResult<ProjectedMarker>> = data
            .points
            .par_iter()
            .enumerate()
            .filter(|(_, point)| visible.contains(point.x, point.y))
            .map(project)
            .collect();
        projected.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        data.points
            .iter()
            .enumerate()
            .filter(|(_, point)| visible.contains(point.x, point.y))
            .map(project)
            .collect()
    }
}

fn project_single_point(
    series_id: usize,
    data_index: usize,
    point: SeriesPoint,
    data: &SeriesData,
    transform: &ViewportTransform,
    sizing: MarkerSizing,
) -> ChartResult<ProjectedMarker> {
    let (cx, cy) = transform.to_pixel(point.x, point.y)?;
    let radius =
        marker_radius(point.size, data.size_extent, sizing) * transform.device_pixel_ratio();
    Ok(ProjectedMarker {
        series_id,
        data_index,
        cx,
        cy,
        radius,
    })
}

impl<S: DrawingSurface> ScatterChart<S> {
    /// Transform for the current window, size and surface pixel ratio.
    pub fn transform(&self) -> ChartResult<ViewportTransform> {
        ViewportTransform::new(
            self.viewport.state(),
            self.config.x_axis,
            self.config.y_axis,
            self.config.viewport,
            self.surface.device_pixel_ratio(),
        )
    }

    /// Markers that the next render would draw.
    pub fn project_visible_markers(&self) -> ChartResult<Vec<ProjectedMarker>> {
        let transform = self.transform()?;
        project_markers(
            &self.series_data,
            self.viewport.state(),
            &transform,
            self.config.marker_sizing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::project_markers;
    use crate::api::MarkerSizing;
    use crate::api::series_data::{SeriesData, SeriesPoint};
    use crate::core::{AxisBounds, AxisOptions, Viewport, ViewportState};
    use crate::render::ViewportTransform;

    fn point(x: f64, y: f64, row: usize) -> SeriesPoint {
        SeriesPoint {
            x,
            y,
            size: None,
            time: None,
            row,
        }
    }

    #[test]
    fn culls_points_outside_window_and_scales_radius_by_dpr() {
        let visible = ViewportState {
            x: AxisBounds { min: 0.0, max: 10.0 },
            y: AxisBounds { min: 0.0, max: 10.0 },
        };
        let transform = ViewportTransform::new(
            visible,
            AxisOptions::default(),
            AxisOptions::default(),
            Viewport::new(100, 100),
            2.0,
        )
        .expect("transform");
        let series = vec![SeriesData {
            id: "a".to_owned(),
            points: vec![point(5.0, 5.0, 0), point(20.0, 5.0, 1), point(0.0, 10.0, 2)],
            source_len: 3,
            size_extent: (None, None),
        }];

        let markers = project_markers(&series, visible, &transform, MarkerSizing::default())
            .expect("project");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].data_index, 0);
        assert_eq!(markers[1].data_index, 2);
        assert!((markers[0].cx - 100.0).abs() <= 1e-9);
        assert!((markers[0].cy - 100.0).abs() <= 1e-9);
        assert!((markers[0].radius - 8.0).abs() <= 1e-9);
        assert!((markers[1].cy - 0.0).abs() <= 1e-9);
    }
}
