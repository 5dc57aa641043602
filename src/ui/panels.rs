use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use student_scores::CategoryKey;

use crate::state::{AppState, Tab};
use crate::ui::{plot, table};

const NO_DATA: &str = "No data available for the selected range.";

// ---------------------------------------------------------------------------
// Left side panel – about
// ---------------------------------------------------------------------------

/// Render the left panel with author, date and a short description.
pub fn side_panel(ui: &mut Ui) {
    ui.heading("About");
    ui.separator();

    ui.label(RichText::new("Author: Student Scores contributors").strong());
    ui.label(format!("Date: {}", chrono::Local::now().date_naive()));
    ui.add_space(8.0);

    ui.label("An interactive application for analysing student math scores.");
    ui.add_space(4.0);
    ui.label(
        "Explore the performance of senior students in mathematics based on \
         gender, part-time job engagement, absence days and weekly self-study hours.",
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let in_range = match &state.views.frequency {
                student_scores::ViewData::Frequency(table) => table.total(),
                _ => 0,
            };
            ui.label(format!("{} students loaded, {in_range} in score range", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Dataset description, raw table and the two analysis tabs.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Student Performance Analysis").size(28.0));
            ui.label(
                "We analyze the Student Scores dataset to understand the performance \
                 of senior students in mathematics.",
            );
            ui.separator();

            ui.heading("Dataset Information");
            dataset_description(ui);

            let Some(dataset) = state.dataset.clone() else {
                ui.add_space(16.0);
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to explore scores  (File → Open…)");
                });
                return;
            };
            table::dataset_table(ui, &dataset);
            ui.separator();

            ui.heading("Scores Analysis by Selected Category");
            ui.label("We explore the scores of students based on a selected category.");

            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(&mut state.tab, Tab::Relation, "General relation");
                ui.selectable_value(&mut state.tab, Tab::Counts, "Counts");
            });
            ui.separator();

            match state.tab {
                Tab::Relation => relation_tab(ui, state),
                Tab::Counts => counts_tab(ui, state),
            }
        });
}

fn dataset_description(ui: &mut Ui) {
    ui.label(
        "Performance of senior students of a (very large) fictional high school \
         at the end of their final semester.",
    );
    let variables = [
        ("first_name", "The first name of a student."),
        ("math_score", "The score obtained in mathematics (0 - 100)."),
        ("gender", "The gender of a student."),
        ("absence_days", "Days the student was not present in class."),
        ("part_time_job", "Whether the student works a part-time job."),
        ("weekly_self_study_hours", "Hours per week spent on independent study."),
    ];
    for (name, text) in variables {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(name).strong().monospace());
            ui.label(text);
        });
    }
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// Tab: general relation
// ---------------------------------------------------------------------------

fn relation_tab(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label("Choose a category:");
            let mut key = state.relation_key;
            for option in CategoryKey::ALL {
                ui.radio_value(&mut key, option, option.label());
            }
            state.set_relation_key(key);
        });

        ui.vertical(|ui: &mut Ui| {
            let title = format!("Average Math Score by {}", state.relation_key.label());
            ui.strong(title);
            plot::mean_score_chart(ui, state);
        });
    });

    ui.add_space(12.0);
    ui.strong("Math Scores vs Self-study Hours");
    plot::scatter_chart(ui, state);

    ui.add_space(12.0);
    ui.strong(format!("Study Hours by {}", state.relation_key.label()));
    plot::facet_charts(ui, state);
}

// ---------------------------------------------------------------------------
// Tab: counts
// ---------------------------------------------------------------------------

fn counts_tab(ui: &mut Ui, state: &mut AppState) {
    let mut key = state.count_key;
    egui::ComboBox::from_label("Choose a category:")
        .selected_text(key.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in CategoryKey::ALL {
                ui.selectable_value(&mut key, option, option.label());
            }
        });
    state.set_count_key(key);

    let (min, max) = state.slider_bounds();
    let (mut lo, mut hi) = (state.range_lo, state.range_hi);
    ui.label("Choose a range for Math Score:");
    ui.add(egui::Slider::new(&mut lo, min..=max).text("from"));
    ui.add(egui::Slider::new(&mut hi, min..=max).text("to"));
    state.set_range(lo, hi);
    ui.label(format!("Math Score Range: ({lo}, {hi})"));
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("In frequency");
        if state.views.frequency.is_empty() {
            cols[0].label(NO_DATA);
        } else {
            plot::frequency_chart(&mut cols[0], state);
        }

        cols[1].strong("In percentage");
        if state.views.share.is_empty() {
            cols[1].label(NO_DATA);
        } else {
            plot::share_chart(&mut cols[1], state);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open student scores")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // The status line already carries the error; keep the old dataset.
        if let Err(e) = state.open(&path) {
            log::debug!("Keeping previous dataset after failed open: {e:#}");
        }
    }
}
