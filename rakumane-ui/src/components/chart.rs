//! Chart Component
//!
//! Daily revenue line chart using HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::types::DailySales;
use crate::state::dashboard::format_currency;

const LINE_COLOR: &str = "#FF9800";

/// Daily revenue chart
#[component]
pub fn Chart(
    #[prop(into)]
    data: Signal<Vec<DailySales>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw chart when data changes
    create_effect(move |_| {
        let days = data.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &days);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-64 md:h-80 rounded-lg"
            />
        </div>
    }
}

/// Upper bound of the y axis, rounded up to a readable step
fn axis_max(days: &[DailySales]) -> f64 {
    let max = days.iter().map(|d| d.revenue).max().unwrap_or(0).max(0) as f64;
    if max <= 0.0 {
        return 1000.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    (max / magnitude).ceil() * magnitude
}

/// `MM/DD` from a `YYYY-MM-DD` date
fn short_date(date: &str) -> String {
    match (date.get(5..7), date.get(8..10)) {
        (Some(month), Some(day)) => format!("{}/{}", month, day),
        _ => date.to_string(),
    }
}

fn draw_chart(canvas: &HtmlCanvasElement, days: &[DailySales]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 80.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if days.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("売上データがありません", width / 2.0 - 80.0, height / 2.0);
        return;
    }

    let y_max = axis_max(days);

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 4.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format_currency(value as i64), 5.0, y + 4.0);
    }

    let step = if days.len() > 1 {
        chart_width / (days.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| {
        if days.len() > 1 {
            margin_left + i as f64 * step
        } else {
            margin_left + chart_width / 2.0
        }
    };
    let y_at = |revenue: i64| margin_top + (1.0 - revenue.max(0) as f64 / y_max) * chart_height;

    // Series line
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, day) in days.iter().enumerate() {
        if i == 0 {
            ctx.move_to(x_at(i), y_at(day.revenue));
        } else {
            ctx.line_to(x_at(i), y_at(day.revenue));
        }
    }
    ctx.stroke();

    // Points
    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, day) in days.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(x_at(i), y_at(day.revenue), 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X-axis labels, at most seven
    ctx.set_fill_style(&"#9ca3af".into());
    let label_every = (days.len() + 6) / 7;
    for (i, day) in days.iter().enumerate().step_by(label_every.max(1)) {
        let _ = ctx.fill_text(&short_date(&day.date), x_at(i) - 15.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(revenue: i64) -> DailySales {
        DailySales {
            date: "2026-10-01".into(),
            revenue,
        }
    }

    #[test]
    fn test_axis_max_rounds_up() {
        assert_eq!(axis_max(&[]), 1000.0);
        assert_eq!(axis_max(&[day(0), day(0)]), 1000.0);
        assert_eq!(axis_max(&[day(1200), day(300)]), 2000.0);
        assert_eq!(axis_max(&[day(45_000)]), 50_000.0);
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2026-10-07"), "10/07");
        assert_eq!(short_date(""), "");
    }
}
