use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use student_scores::data::projection::{project, DISPLAY_COLUMNS};
use student_scores::Dataset;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Raw dataset table
// ---------------------------------------------------------------------------

/// The six display columns of every student, virtualised so only visible
/// rows are rendered.
pub fn dataset_table(ui: &mut Ui, dataset: &Dataset) {
    let records = dataset.records();

    TableBuilder::new(ui)
        .id_salt("dataset_table")
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(90.0), DISPLAY_COLUMNS.len())
        .header(22.0, |mut header| {
            for name in DISPLAY_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let cells = project(&records[row.index()]);
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
