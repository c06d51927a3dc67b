// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Trailscope.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Heatmap projection: 2D histogram of coordinate samples rendered as a PNG

use plotters::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use trailscope_types::{TrackPoint, Window};

/// Fixed histogram resolution in each dimension.
pub const HEATMAP_BINS: usize = 100;

const IMAGE_WIDTH: u32 = 1000;
const IMAGE_HEIGHT: u32 = 600;
const SCALE_STRIP_X: u32 = 880;

/// Filter a raw points payload down to entries with numeric coordinates.
pub fn valid_points(raw: &[Value]) -> Vec<TrackPoint> {
    raw.iter().filter_map(TrackPoint::from_value).collect()
}

/// A binned (longitude, latitude) histogram over the data extents.
#[derive(Debug, Clone)]
pub struct HeatmapGrid {
    bins: usize,
    counts: Vec<u32>,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub max_count: u32,
}

impl HeatmapGrid {
    /// Bin points into a `bins` x `bins` grid. Degenerate extents (all
    /// points on one line) are padded by half a degree on each side so the
    /// grid always has area.
    pub fn bin(points: &[TrackPoint], bins: usize) -> Self {
        let mut lon_min = f64::INFINITY;
        let mut lon_max = f64::NEG_INFINITY;
        let mut lat_min = f64::INFINITY;
        let mut lat_max = f64::NEG_INFINITY;
        for p in points {
            lon_min = lon_min.min(p.longitude);
            lon_max = lon_max.max(p.longitude);
            lat_min = lat_min.min(p.latitude);
            lat_max = lat_max.max(p.latitude);
        }
        if lon_max - lon_min <= f64::EPSILON {
            lon_min -= 0.5;
            lon_max += 0.5;
        }
        if lat_max - lat_min <= f64::EPSILON {
            lat_min -= 0.5;
            lat_max += 0.5;
        }

        let mut counts = vec![0u32; bins * bins];
        let mut max_count = 0u32;
        for p in points {
            let x = bin_index(p.longitude, lon_min, lon_max, bins);
            let y = bin_index(p.latitude, lat_min, lat_max, bins);
            let cell = &mut counts[y * bins + x];
            *cell += 1;
            max_count = max_count.max(*cell);
        }

        Self {
            bins,
            counts,
            lon_min,
            lon_max,
            lat_min,
            lat_max,
            max_count,
        }
    }

    pub fn count(&self, x: usize, y: usize) -> u32 {
        self.counts[y * self.bins + x]
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    fn lon_edges(&self, x: usize) -> (f64, f64) {
        let step = (self.lon_max - self.lon_min) / self.bins as f64;
        let low = self.lon_min + step * x as f64;
        (low, low + step)
    }

    fn lat_edges(&self, y: usize) -> (f64, f64) {
        let step = (self.lat_max - self.lat_min) / self.bins as f64;
        let low = self.lat_min + step * y as f64;
        (low, low + step)
    }
}

fn bin_index(value: f64, min: f64, max: f64, bins: usize) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "fraction is clamped to [0, 1) before scaling"
    )]
    let index = (((value - min) / (max - min)).clamp(0.0, 1.0) * bins as f64) as usize;
    index.min(bins - 1)
}

/// "Hot" colour ramp: black through red and yellow to white.
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let r = (t / 0.365).min(1.0);
    let g = ((t - 0.365) / 0.381).clamp(0.0, 1.0);
    let b = ((t - 0.746) / 0.254).clamp(0.0, 1.0);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "channels are clamped to [0, 1]"
    )]
    RGBColor(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Render a heatmap PNG for the given window into `media_dir`.
///
/// Returns `Ok(None)` when no entry has numeric coordinates — the reading
/// stays `unknown` and a warning is recorded, this is not an error.
pub fn render(raw_points: &[Value], window: Window, media_dir: &Path) -> anyhow::Result<Option<PathBuf>> {
    let points = valid_points(raw_points);
    if points.is_empty() {
        warn!(
            "⚠️ No usable points for the {} heatmap ({} raw entries)",
            window,
            raw_points.len()
        );
        return Ok(None);
    }

    let grid = HeatmapGrid::bin(&points, HEATMAP_BINS);
    let path = media_dir.join(format!("heatmap_{window}.png"));
    draw(&grid, window, &path)
        .map_err(|e| anyhow::anyhow!("failed to render {} heatmap: {e}", window))?;

    debug!(
        "🗺️ Rendered {} heatmap from {} points to {}",
        window,
        points.len(),
        path.display()
    );
    Ok(Some(path))
}

fn draw(grid: &HeatmapGrid, window: Window, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (map_area, scale_area) = root.split_horizontally(SCALE_STRIP_X);

    let mut chart = ChartBuilder::on(&map_area)
        .caption(
            format!("Heatmap for the last {window}"),
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(grid.lon_min..grid.lon_max, grid.lat_min..grid.lat_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_labels(8)
        .y_labels(8)
        .label_style(("sans-serif", 12))
        .draw()?;

    let bins = grid.bins();
    let max = f64::from(grid.max_count.max(1));
    chart.draw_series((0..bins).flat_map(|y| (0..bins).map(move |x| (x, y))).filter_map(
        |(x, y)| {
            let count = grid.count(x, y);
            if count == 0 {
                return None;
            }
            let (x0, x1) = grid.lon_edges(x);
            let (y0, y1) = grid.lat_edges(y);
            let color = heat_color(f64::from(count) / max);
            Some(Rectangle::new([(x0, y0), (x1, y1)], color.filled()))
        },
    ))?;

    draw_colour_scale(&scale_area, grid.max_count)?;

    root.present()?;
    Ok(())
}

/// Gradient strip with count labels, standing in for a colorbar.
fn draw_colour_scale<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    max_count: u32,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    const STEPS: usize = 64;

    let mut scale = ChartBuilder::on(area)
        .margin(15)
        .margin_top(55)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..1f64, 0f64..f64::from(max_count.max(1)))?;

    scale
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(5)
        .label_style(("sans-serif", 12))
        .draw()?;

    let top = f64::from(max_count.max(1));
    scale.draw_series((0..STEPS).map(|i| {
        let t0 = i as f64 / STEPS as f64;
        let t1 = (i + 1) as f64 / STEPS as f64;
        Rectangle::new(
            [(0.0, t0 * top), (1.0, t1 * top)],
            heat_color(t0).filled(),
        )
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_points_filters_non_numeric() {
        let raw = vec![
            json!({"latitude": 1.0, "longitude": 1.0}),
            json!({"latitude": 2.0, "longitude": 2.0}),
            json!({"latitude": "bad", "longitude": 5.0}),
        ];
        let points = valid_points(&raw);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].latitude, 1.0);
        assert_eq!(points[1].longitude, 2.0);
    }

    #[test]
    fn test_bin_single_point_pads_extents() {
        let grid = HeatmapGrid::bin(
            &[TrackPoint {
                latitude: 50.0,
                longitude: 14.0,
            }],
            HEATMAP_BINS,
        );
        assert!(grid.lon_max > grid.lon_min);
        assert!(grid.lat_max > grid.lat_min);
        assert_eq!(grid.max_count, 1);
    }

    #[test]
    fn test_bin_counts_coincident_points() {
        let p = TrackPoint {
            latitude: 50.0,
            longitude: 14.0,
        };
        let q = TrackPoint {
            latitude: 51.0,
            longitude: 15.0,
        };
        let grid = HeatmapGrid::bin(&[p, p, q], HEATMAP_BINS);

        assert_eq!(grid.max_count, 2);
        let total: u32 = (0..grid.bins())
            .flat_map(|y| (0..grid.bins()).map(move |x| (x, y)))
            .map(|(x, y)| grid.count(x, y))
            .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_bin_index_clamps_to_edges() {
        assert_eq!(bin_index(0.0, 0.0, 10.0, 100), 0);
        assert_eq!(bin_index(10.0, 0.0, 10.0, 100), 99);
        assert_eq!(bin_index(5.0, 0.0, 10.0, 100), 50);
    }

    #[test]
    fn test_heat_color_ramp() {
        assert_eq!(heat_color(0.0), RGBColor(0, 0, 0));
        assert_eq!(heat_color(1.0), RGBColor(255, 255, 255));
        // mid-ramp is saturated red before green picks up
        let mid = heat_color(0.4);
        assert_eq!(mid.0, 255);
        assert!(mid.2 == 0);
    }

    #[test]
    fn test_render_all_invalid_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let raw = vec![json!({"latitude": "bad", "longitude": "worse"})];
        let result = render(&raw, Window::Day, dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let raw = vec![
            json!({"latitude": 50.0, "longitude": 14.0}),
            json!({"latitude": 50.1, "longitude": 14.1}),
        ];

        let path = render(&raw, Window::Week, dir.path()).unwrap().unwrap();

        assert_eq!(path.file_name().unwrap(), "heatmap_week.png");
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
