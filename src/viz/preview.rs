//! Draw a computed [`Frame`] to **SVG** or **PNG** (chosen by file extension).
//!
//! Bars, lines and areas only: no text, so no font has to be registered.
//! Legend entries appear as a column of swatches on the right, greyed while ignored.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

use super::types::{Arrangement, Frame, RenderSeries};
use super::util::{office_color, parse_hex_color};
use crate::models::{ChartConfig, ChartType, XValue};

const MARGIN: u32 = 16;
const SWATCH_PX: i32 = 12;
const SWATCH_GAP_PX: i32 = 6;
const LEGEND_BAND_PX: i32 = 28;

/// Plot a frame; the backend follows the extension of `out_path`.
pub fn plot_frame<P: AsRef<Path>>(
    frame: &Frame,
    config: &ChartConfig,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if frame.legend.is_empty() {
        return Err(anyhow!("no series to plot"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_frame(root, frame, config)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_frame(root, frame, config)?;
    }
    Ok(())
}

fn series_color(series: &RenderSeries, idx: usize) -> RGBAColor {
    parse_hex_color(&series.color)
        .map(|c| c.to_rgba())
        .unwrap_or_else(|| office_color(idx))
}

/// Ordinal categories in first-seen order across the frame.
fn categories(frame: &Frame) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in frame
        .groups
        .iter()
        .flat_map(|g| g.series.iter())
        .flat_map(|s| s.points.iter())
    {
        if let XValue::Category(c) = &p.x
            && !out.contains(c)
        {
            out.push(c.clone());
        }
    }
    out
}

fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let pad = if (hi - lo).abs() < f64::EPSILON {
        1.0
    } else {
        (hi - lo) * 0.05
    };
    (lo - pad, hi + pad)
}

fn draw_frame<DB>(root: DrawingArea<DB, Shift>, frame: &Frame, config: &ChartConfig) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (root_w, _) = root.dim_in_pixel();

    let show_legend = config.legend && !frame.legend.is_empty();
    let plot_w = if show_legend {
        (root_w as i32 - LEGEND_BAND_PX).max(40)
    } else {
        root_w as i32
    };
    let (plot_area, legend_area) = root.split_horizontally(plot_w);

    // Position axis: numeric x or ordinal index. Value axis: y domain.
    let cats = categories(frame);
    let position = |x: &XValue| -> Option<f64> {
        match x {
            XValue::Number(v) => Some(*v),
            XValue::Category(c) => cats.iter().position(|k| k == c).map(|i| i as f64),
        }
    };
    let (p_lo, p_hi) = match frame.x_range {
        Some(r) => padded(r.min, r.max),
        None => (-0.5, cats.len().max(1) as f64 - 0.5),
    };
    let (v_lo, v_hi) = padded(frame.y_domain.min, frame.y_domain.max);
    let horizontal = frame.horizontal;
    let to_coord = |pos: f64, value: f64| -> (f64, f64) {
        if horizontal { (value, pos) } else { (pos, value) }
    };

    let (x_spec, y_spec) = if horizontal {
        (v_lo..v_hi, p_lo..p_hi)
    } else {
        (p_lo..p_hi, v_lo..v_hi)
    };
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .build_cartesian_2d(x_spec, y_spec)
        .map_err(|e| anyhow!("{:?}", e))?;

    let axis_color = config
        .style
        .axis_color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or(RGBColor(99, 99, 99));
    chart
        .draw_series([
            PathElement::new(vec![to_coord(p_lo, 0.0), to_coord(p_hi, 0.0)], axis_color.stroke_width(1)),
            PathElement::new(vec![to_coord(p_lo, v_lo), to_coord(p_lo, v_hi)], axis_color.stroke_width(1)),
        ])
        .map_err(|e| anyhow!("{:?}", e))?;

    // Bars: every grouped series and every stacked bar chart owns one slot.
    let mut slot = 0usize;
    let mut color_idx = 0usize;
    for group in &frame.groups {
        match group.chart_type {
            ChartType::Bar => {
                let Some(geometry) = group.bar else { continue };
                let slots = geometry.series_count.max(1) as f64;
                let half = (geometry.bar_width / 2.0).max(0.5);
                for series in &group.series {
                    let color = series_color(series, color_idx);
                    color_idx += 1;
                    let shift = (slot as f64 - (slots - 1.0) / 2.0) * geometry.group_offset;
                    for p in &series.points {
                        let Some(pos) = position(&p.x) else { continue };
                        let (a_x, a_y) = chart.backend_coord(&to_coord(pos, p.y0));
                        let (b_x, b_y) = chart.backend_coord(&to_coord(pos, p.y1));
                        let corners = if horizontal {
                            let cy = a_y as f64 + shift;
                            [
                                (a_x, (cy - half).round() as i32),
                                (b_x, (cy + half).round() as i32),
                            ]
                        } else {
                            let cx = a_x as f64 + shift;
                            [
                                ((cx - half).round() as i32, a_y),
                                ((cx + half).round() as i32, b_y),
                            ]
                        };
                        root.draw(&Rectangle::new(corners, color.filled()))
                            .map_err(|e| anyhow!("{:?}", e))?;
                    }
                    if group.arrangement != Arrangement::Stacked {
                        slot += 1;
                    }
                }
                if group.arrangement == Arrangement::Stacked {
                    slot += 1;
                }
            }
            ChartType::Line => {
                for series in &group.series {
                    let color = series_color(series, color_idx);
                    color_idx += 1;
                    let mut pts: Vec<(f64, f64)> = series
                        .points
                        .iter()
                        .filter_map(|p| position(&p.x).map(|pos| (pos, p.y1)))
                        .collect();
                    pts.sort_by(|a, b| a.0.total_cmp(&b.0));
                    chart
                        .draw_series(LineSeries::new(
                            pts.into_iter().map(|(pos, v)| to_coord(pos, v)),
                            color.stroke_width(2),
                        ))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
            ChartType::Area => {
                for series in &group.series {
                    let color = series_color(series, color_idx);
                    color_idx += 1;
                    let mut spans: Vec<(f64, f64, f64)> = series
                        .points
                        .iter()
                        .filter_map(|p| position(&p.x).map(|pos| (pos, p.y0, p.y1)))
                        .collect();
                    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
                    // polygon: lower (forward) + upper (reverse)
                    let mut poly: Vec<(f64, f64)> = Vec::with_capacity(spans.len() * 2);
                    poly.extend(spans.iter().map(|(pos, lo, _)| to_coord(*pos, *lo)));
                    poly.extend(spans.iter().rev().map(|(pos, _, hi)| to_coord(*pos, *hi)));
                    chart
                        .draw_series(std::iter::once(Polygon::new(poly, color.mix(0.30).filled())))
                        .map_err(|e| anyhow!("{:?}", e))?;
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            spans
                                .iter()
                                .map(|(pos, _, hi)| to_coord(*pos, *hi))
                                .collect::<Vec<_>>(),
                            color.stroke_width(1),
                        )))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
    }

    if show_legend {
        for (i, entry) in frame.legend.iter().enumerate() {
            let fill = parse_hex_color(&entry.fill)
                .map(|c| c.to_rgba())
                .unwrap_or_else(|| office_color(i));
            let top = SWATCH_GAP_PX + i as i32 * (SWATCH_PX + SWATCH_GAP_PX);
            legend_area
                .draw(&Rectangle::new(
                    [(SWATCH_GAP_PX, top), (SWATCH_GAP_PX + SWATCH_PX, top + SWATCH_PX)],
                    fill.filled(),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
