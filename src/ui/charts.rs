use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::color::ColorMap;
use crate::dash::chart::{ChartSpec, Series, SeriesKind};
use crate::dash::controller::format_mean;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard (central panel): stat cards + the three charts
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn dashboard_panel(ui: &mut Ui, state: &AppState) {
    let output = match state.output() {
        Some(out) => out,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset to explore the games market  (File → Open…)");
            });
            return;
        }
    };

    // ---- Stat cards ----
    ui.horizontal(|ui: &mut Ui| {
        stat_card(ui, "Total games", &output.total_games.to_string());
        stat_card(
            ui,
            "Average user score",
            &format_mean(output.mean_user_score),
        );
        stat_card(
            ui,
            "Average critic score",
            &format_mean(output.mean_critic_score),
        );
    });
    ui.separator();

    // ---- Chart row ----
    let chart_width = (ui.available_width() - 24.0) / 3.0;
    let chart_height = ui.available_height() - 8.0;

    ui.horizontal_top(|ui: &mut Ui| {
        chart(ui, &output.genre_chart, None, chart_width, chart_height);
        chart(
            ui,
            &output.scatter_chart,
            Some(&state.genre_colors),
            chart_width,
            chart_height,
        );
        chart(
            ui,
            &output.area_chart,
            Some(&state.platform_colors),
            chart_width,
            chart_height,
        );
    });
}

fn stat_card(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.label(title);
                ui.label(RichText::new(value).size(24.0).strong());
            });
        });
}

// ---------------------------------------------------------------------------
// Generic ChartSpec rendering
// ---------------------------------------------------------------------------

/// Render one [`ChartSpec`] with egui_plot.
///
/// Colors come from the given map when present (scatter/area series are
/// keyed by category name); the genre chart keeps the fixed bar/line
/// styling of the original dashboard.
fn chart(ui: &mut Ui, spec: &ChartSpec, colors: Option<&ColorMap>, width: f32, height: f32) {
    ui.vertical(|ui: &mut Ui| {
        ui.strong(&spec.title);

        let mut plot = Plot::new(spec.title.as_str())
            .legend(Legend::default())
            .x_axis_label(&spec.x_label)
            .y_axis_label(&spec.y_label)
            .width(width)
            .height(height)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true);

        // Categorical x axis: grid marks label the category at each index.
        if let Some(categories) = spec.x_categories.clone() {
            plot = plot.x_axis_formatter(
                move |mark: GridMark, _range: &RangeInclusive<f64>| {
                    let idx = mark.value.round();
                    if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                        return String::new();
                    }
                    categories
                        .get(idx as usize)
                        .cloned()
                        .unwrap_or_default()
                },
            );
        }

        plot.show(ui, |plot_ui| {
            // Area bands stack on each other, so they are drawn as a group.
            let bands: Vec<&Series> = spec
                .series
                .iter()
                .filter(|s| s.kind == SeriesKind::Area)
                .collect();
            if !bands.is_empty() {
                stacked_areas(plot_ui, &bands, colors);
            }

            for series in &spec.series {
                let color = colors
                    .map(|cm| cm.color_for(&series.name))
                    .unwrap_or(match series.kind {
                        SeriesKind::Bar => Color32::LIGHT_BLUE,
                        _ => Color32::RED,
                    });

                match series.kind {
                    SeriesKind::Bar => {
                        let bars: Vec<Bar> = series
                            .points
                            .iter()
                            .map(|p| Bar::new(p[0], p[1]).width(0.6))
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(color));
                    }
                    SeriesKind::Line => {
                        let points: PlotPoints = series.points.iter().copied().collect();
                        plot_ui.line(Line::new(points).name(&series.name).color(color).width(2.0));
                        let markers: PlotPoints = series.points.iter().copied().collect();
                        plot_ui.points(Points::new(markers).color(color).radius(3.0));
                    }
                    SeriesKind::Scatter => {
                        let points: PlotPoints = series.points.iter().copied().collect();
                        plot_ui.points(
                            Points::new(points)
                                .name(&series.name)
                                .color(color)
                                .radius(2.5),
                        );
                    }
                    // Handled above as a stacked group.
                    SeriesKind::Area => {}
                }
            }
        });
    });
}

/// Draw Area series as stacked bands over the union of their x values.
///
/// A band without a point at some x contributes zero height there, so gaps
/// in the count table render as implicit zeros rather than holes.
fn stacked_areas(plot_ui: &mut egui_plot::PlotUi, bands: &[&Series], colors: Option<&ColorMap>) {
    // Union of x positions across all bands (years are integral).
    let mut xs: Vec<i64> = bands
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p[0] as i64))
        .collect();
    xs.sort_unstable();
    xs.dedup();

    let mut baseline: BTreeMap<i64, f64> = xs.iter().map(|&x| (x, 0.0)).collect();

    for series in bands {
        let values: BTreeMap<i64, f64> =
            series.points.iter().map(|p| (p[0] as i64, p[1])).collect();

        let lower: Vec<[f64; 2]> = xs.iter().map(|&x| [x as f64, baseline[&x]]).collect();
        let upper: Vec<[f64; 2]> = xs
            .iter()
            .map(|&x| [x as f64, baseline[&x] + values.get(&x).copied().unwrap_or(0.0)])
            .collect();

        // Closed outline: lower edge left→right, upper edge right→left.
        let outline: Vec<[f64; 2]> = lower
            .iter()
            .copied()
            .chain(upper.iter().rev().copied())
            .collect();

        let color = colors
            .map(|cm| cm.color_for(&series.name))
            .unwrap_or(Color32::LIGHT_BLUE);

        plot_ui.polygon(
            Polygon::new(PlotPoints::from(outline))
                .name(&series.name)
                .fill_color(color.gamma_multiply(0.6))
                .stroke((1.0, color)),
        );

        for (x, upper_point) in xs.iter().zip(upper) {
            baseline.insert(*x, upper_point[1]);
        }
    }
}
