use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};
use student_scores::data::aggregate::{FrequencyTable, HistogramBin};
use student_scores::{CategoryValue, ViewData};

use crate::color::ColorMap;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;
const FACET_HEIGHT: f32 = 200.0;

fn color_of(colors: &Option<ColorMap>, value: &CategoryValue) -> Color32 {
    colors
        .as_ref()
        .map(|cm| cm.color_for(value))
        .unwrap_or(Color32::LIGHT_BLUE)
}

/// X-axis labels for bars placed at 0, 1, 2, …
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn no_data(ui: &mut Ui) {
    ui.label("No data available.");
}

// ---------------------------------------------------------------------------
// General relation tab
// ---------------------------------------------------------------------------

/// One bar per category value, height = average math score.
pub fn mean_score_chart(ui: &mut Ui, state: &AppState) {
    let ViewData::MeanScores(groups) = &state.views.mean_scores else {
        return no_data(ui);
    };

    let labels: Vec<String> = groups.iter().map(|g| g.value.to_string()).collect();
    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean_score)
                .width(0.7)
                .name(format!("{} ({} students)", g.value, g.count))
                .fill(color_of(&state.relation_colors, &g.value))
        })
        .collect();

    Plot::new(("mean_scores", state.relation_key))
        .height(CHART_HEIGHT)
        .x_axis_label(state.relation_key.label())
        .y_axis_label("Math Score")
        .x_axis_formatter(category_axis(labels))
        .include_y(0.0)
        .include_y(100.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("", bars).name("Average Math Score"));
        });
}

/// Study hours vs math score, one colour per category value, with a
/// histogram of each axis.
pub fn scatter_chart(ui: &mut Ui, state: &AppState) {
    let ViewData::Scatter {
        points,
        hours_histogram,
        score_histogram,
    } = &state.views.scatter
    else {
        return no_data(ui);
    };

    let key = state.relation_key;
    let width = ui.available_width();
    let main_width = width * 0.75;

    Plot::new(("hours_histogram", key))
        .height(90.0)
        .width(main_width)
        .show_axes([false, true])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(histogram_chart(hours_histogram, false));
        });

    ui.horizontal(|ui: &mut Ui| {
        Plot::new(("scatter", key))
            .height(CHART_HEIGHT)
            .width(main_width)
            .legend(Legend::default())
            .x_axis_label("Weekly Self-study Hours")
            .y_axis_label("Math Score")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                // One series per value so the legend lists each group once.
                let mut groups: Vec<(&CategoryValue, Vec<[f64; 2]>)> = Vec::new();
                for p in points {
                    let xy = [p.study_hours, f64::from(p.math_score)];
                    match groups.iter_mut().find(|(v, _)| *v == &p.group) {
                        Some((_, pts)) => pts.push(xy),
                        None => groups.push((&p.group, vec![xy])),
                    }
                }
                for (value, pts) in groups {
                    plot_ui.points(
                        Points::new("", PlotPoints::from(pts))
                            .radius(2.5)
                            .color(color_of(&state.relation_colors, value))
                            .name(value.to_string()),
                    );
                }
            });

        Plot::new(("score_histogram", key))
            .height(CHART_HEIGHT)
            .width((width - main_width - 16.0).max(60.0))
            .show_axes([true, false])
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(histogram_chart(score_histogram, true));
            });
    });
}

fn histogram_chart(bins: &[HistogramBin], horizontal: bool) -> BarChart {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.1} – {:.1}", b.start, b.end))
        })
        .collect();
    let chart = BarChart::new("", bars).color(Color32::GRAY);
    if horizontal {
        chart.horizontal()
    } else {
        chart
    }
}

/// Small line charts of score against study hours, one per category value.
pub fn facet_charts(ui: &mut Ui, state: &AppState) {
    let ViewData::Facets(facets) = &state.views.facets else {
        return no_data(ui);
    };

    let columns = state.charts.facet_columns.max(1);
    let spacing = ui.spacing().item_spacing.x;
    let facet_width = (ui.available_width() - spacing * columns as f32) / columns as f32;

    for (row, chunk) in facets.chunks(columns).enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            for (col, facet) in chunk.iter().enumerate() {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(format!("{} = {}", state.relation_key.label(), facet.value));
                    Plot::new(("facet", state.relation_key, row * columns + col))
                        .width(facet_width.max(120.0))
                        .height(FACET_HEIGHT)
                        .x_axis_label("Weekly Self-study Hours")
                        .y_axis_label("Math Score")
                        .allow_scroll(false)
                        .show(ui, |plot_ui| {
                            plot_ui.line(
                                Line::new("", PlotPoints::from(facet.points.clone()))
                                    .color(color_of(&state.relation_colors, &facet.value))
                                    .width(1.5),
                            );
                        });
                });
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Counts tab
// ---------------------------------------------------------------------------

/// Students per category value in the selected score range.
pub fn frequency_chart(ui: &mut Ui, state: &AppState) {
    let ViewData::Frequency(table) = &state.views.frequency else {
        return;
    };

    let labels: Vec<String> = table.iter().map(|(v, _)| v.to_string()).collect();
    let bars: Vec<Bar> = table
        .iter()
        .enumerate()
        .map(|(i, (value, count))| {
            Bar::new(i as f64, count as f64)
                .width(0.7)
                .name(format!("{value}: {count}"))
                .fill(color_of(&state.count_colors, value))
        })
        .collect();

    Plot::new(("frequency", state.count_key))
        .height(CHART_HEIGHT)
        .x_axis_label(state.count_key.label())
        .y_axis_label("count")
        .x_axis_formatter(category_axis(labels))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("", bars).name("count"));
            for ([x, y], text) in count_labels(table) {
                plot_ui.text(Text::new("", PlotPoint::new(x, y), text).anchor(Align2::CENTER_BOTTOM));
            }
        });
}

/// Count printed on top of each frequency bar.
fn count_labels(table: &FrequencyTable) -> Vec<([f64; 2], String)> {
    table
        .iter()
        .enumerate()
        .map(|(i, (_, count))| ([i as f64, count as f64], count.to_string()))
        .collect()
}

/// Donut chart of the share of each category value.
pub fn share_chart(ui: &mut Ui, state: &AppState) {
    let ViewData::Share(shares) = &state.views.share else {
        return;
    };

    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = (rect.height().min(rect.width()) / 2.0 - 8.0).max(10.0);
    let inner = outer * 0.4;

    let mut start = -TAU / 4.0;
    for (value, percent) in shares {
        let sweep = TAU * (*percent as f32) / 100.0;
        let color = color_of(&state.count_colors, value);
        for shape in donut_segment(center, inner, outer, start, sweep, color) {
            painter.add(shape);
        }

        if *percent >= 3.0 {
            let mid = start + sweep / 2.0;
            let r = (inner + outer) / 2.0;
            painter.text(
                center + Vec2::new(mid.cos(), mid.sin()) * r,
                Align2::CENTER_CENTER,
                format!("{percent:.1}%"),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (value, _) in shares {
            let color = color_of(&state.count_colors, value);
            ui.label(egui::RichText::new("■").color(color));
            ui.label(value.to_string());
        }
    });
}

/// A ring sector split into convex quads of at most ~3 degrees each.
fn donut_segment(
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) -> Vec<Shape> {
    let steps = ((sweep / TAU) * 120.0).ceil().max(1.0) as usize;
    let at = |angle: f32, radius: f32| center + Vec2::new(angle.cos(), angle.sin()) * radius;

    (0..steps)
        .map(|i| {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            Shape::convex_polygon(
                vec![at(a0, outer), at(a1, outer), at(a1, inner), at(a0, inner)],
                color,
                Stroke::NONE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use student_scores::{frequencies, CategoryKey, Dataset, StudentRecord};

    fn students(genders: &[&str]) -> Dataset {
        genders
            .iter()
            .enumerate()
            .map(|(i, gender)| StudentRecord {
                first_name: format!("s{i}"),
                gender: gender.to_string(),
                absence_days: 0,
                part_time_job: false,
                weekly_self_study_hours: 10.0,
                math_score: 70,
            })
            .collect()
    }

    #[test]
    fn every_bar_is_labelled_with_its_count() {
        let ds = students(&["female", "male", "female", "female"]);
        let labels = count_labels(&frequencies(&ds, CategoryKey::Gender));
        assert_eq!(
            labels,
            vec![([0.0, 3.0], "3".to_string()), ([1.0, 1.0], "1".to_string())]
        );
    }

    #[test]
    fn empty_table_has_no_labels() {
        let ds = students(&[]);
        assert!(count_labels(&frequencies(&ds, CategoryKey::Gender)).is_empty());
    }

    #[test]
    fn axis_labels_only_on_whole_positions() {
        let format = category_axis(vec!["female".into(), "male".into()]);
        let range = 0.0..=1.0;
        let mark = |value| GridMark { value, step_size: 0.5 };
        assert_eq!(format(mark(1.0), &range), "male");
        assert_eq!(format(mark(0.5), &range), "");
        assert_eq!(format(mark(2.0), &range), "");
    }
}
