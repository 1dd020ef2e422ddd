//! Chart Components
//!
//! Bar, doughnut and line charts drawn on HTML5 Canvas. Each chart owns one
//! canvas that is redrawn in place whenever its data signal changes.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use phishscan::charts::{doughnut_segments, DailySeries, VerdictCounts};

const BACKGROUND: &str = "rgba(0, 0, 0, 0)";
const GRID_COLOR: &str = "#6b728055";
const LABEL_COLOR: &str = "#9ca3af";
const LINE_COLOR: &str = "#6366f1";
const PLACEHOLDER_COLOR: &str = "#6b7280";

const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Verdict counts as vertical bars
#[component]
pub fn BarChart(
    #[prop(into)]
    counts: Signal<VerdictCounts>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let counts = counts.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_bars(&canvas, &counts);
        }
    });

    view! {
        <canvas node_ref=canvas_ref width="480" height="300" class="chart-canvas w-full" />
    }
}

/// Verdict share as a doughnut with a legend
#[component]
pub fn DoughnutChart(
    #[prop(into)]
    counts: Signal<VerdictCounts>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let counts = counts.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_doughnut(&canvas, &counts);
        }
    });

    view! {
        <div class="flex flex-col items-center">
            <canvas node_ref=canvas_ref width="300" height="300" class="chart-canvas" />
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                {move || {
                    counts.get()
                        .series()
                        .into_iter()
                        .map(|(label, count, color)| view! {
                            <div class="flex items-center space-x-2">
                                <div
                                    class="w-3 h-3 rounded-full"
                                    style=format!("background-color: {}", color)
                                />
                                <span class="text-sm">{format!("{} ({})", label, count)}</span>
                            </div>
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// Scans per day
#[component]
pub fn LineChart(
    #[prop(into)]
    series: Signal<DailySeries>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let series = series.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_line(&canvas, &series);
        }
    });

    view! {
        <canvas node_ref=canvas_ref width="800" height="300" class="chart-canvas w-full" />
    }
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Y axis maximum: the data maximum, at least 1 so empty data has a scale
fn axis_max(max: u64) -> f64 {
    max.max(1) as f64
}

/// Pixel height of `value` on an axis of `max` over `height` pixels
fn scaled_height(value: u64, max: f64, height: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (value as f64 / max).min(1.0) * height
}

/// Canvas coordinates of each point of a line series
fn line_points(series: &DailySeries, width: f64, height: f64) -> Vec<(f64, f64)> {
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let max = axis_max(series.max_count() as u64);
    let n = series.points.len();

    series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = if n > 1 {
                MARGIN_LEFT + (i as f64 / (n - 1) as f64) * chart_width
            } else {
                MARGIN_LEFT + chart_width / 2.0
            };
            let y = MARGIN_TOP + chart_height
                - scaled_height(point.count as u64, max, chart_height);
            (x, y)
        })
        .collect()
}

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64, max: f64) {
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("12px sans-serif");

    for i in 0..=4 {
        let y = MARGIN_TOP + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * max;
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }
}

fn draw_bars(canvas: &HtmlCanvasElement, counts: &VerdictCounts) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_fill_style(&BACKGROUND.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let series = counts.series();
    let max = axis_max(series.iter().map(|(_, count, _)| *count).max().unwrap_or(0));
    draw_grid(&ctx, width, height, max);

    let slot = chart_width / series.len() as f64;
    let bar_width = slot * 0.5;
    for (i, (label, count, color)) in series.iter().enumerate() {
        let bar_height = scaled_height(*count, max, chart_height);
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = MARGIN_TOP + chart_height - bar_height;

        ctx.set_fill_style(&(*color).into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(label, x, height - 15.0);
    }
}

fn draw_doughnut(canvas: &HtmlCanvasElement, counts: &VerdictCounts) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let cx = width / 2.0;
    let cy = height / 2.0;
    let outer = width.min(height) / 2.0 - 10.0;
    let inner = outer * 0.6;

    ctx.clear_rect(0.0, 0.0, width, height);

    let segments = doughnut_segments(counts);
    if segments.is_empty() {
        // Empty ring
        ctx.set_stroke_style(&GRID_COLOR.into());
        ctx.set_line_width(outer - inner);
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, (outer + inner) / 2.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.stroke();

        ctx.set_fill_style(&PLACEHOLDER_COLOR.into());
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("No scans yet", cx - 40.0, cy + 5.0);
        return;
    }

    for segment in segments {
        ctx.set_fill_style(&segment.color.into());
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, outer, segment.start_angle, segment.start_angle + segment.sweep);
        let _ = ctx.arc_with_anticlockwise(
            cx,
            cy,
            inner,
            segment.start_angle + segment.sweep,
            segment.start_angle,
            true,
        );
        ctx.close_path();
        ctx.fill();
    }

    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("bold 20px sans-serif");
    let _ = ctx.fill_text(&counts.total().to_string(), cx - 10.0, cy + 7.0);
}

fn draw_line(canvas: &HtmlCanvasElement, series: &DailySeries) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.clear_rect(0.0, 0.0, width, height);
    draw_grid(&ctx, width, height, axis_max(series.max_count() as u64));

    let color = if series.placeholder { PLACEHOLDER_COLOR } else { LINE_COLOR };
    let points = line_points(series, width, height);

    ctx.set_stroke_style(&color.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(*x, *y);
        } else {
            ctx.line_to(*x, *y);
        }
    }
    ctx.stroke();

    // Points and day labels
    ctx.set_fill_style(&color.into());
    for (x, y) in &points {
        ctx.begin_path();
        let _ = ctx.arc(*x, *y, 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("12px sans-serif");
    for ((x, _), point) in points.iter().zip(&series.points) {
        let _ = ctx.fill_text(&point.label, x - 18.0, height - 10.0);
    }

    if series.placeholder {
        ctx.set_fill_style(&PLACEHOLDER_COLOR.into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No scan history yet", width / 2.0 - 70.0, height / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use phishscan::charts::daily_series;

    #[test]
    fn test_scaled_height() {
        assert_eq!(scaled_height(5, 10.0, 200.0), 100.0);
        assert_eq!(scaled_height(0, axis_max(0), 200.0), 0.0);
        assert_eq!(scaled_height(12, 10.0, 200.0), 200.0);
    }

    #[test]
    fn test_line_points_span_chart() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let series = daily_series(&[], &chrono::Utc, today, |d| d.to_string());

        let points = line_points(&series, 800.0, 300.0);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].0, MARGIN_LEFT);
        assert_eq!(points[6].0, 800.0 - MARGIN_RIGHT);
        // Placeholder counts are zero, so every point sits on the baseline
        assert!(points.iter().all(|(_, y)| *y == 300.0 - MARGIN_BOTTOM));
    }
}
