// src/app/ui/table.rs
use eframe::egui as eg;
use egui_extras::{Column, TableBuilder};

use crate::app::data::{cell_text, Film, FilmId};

const HEADER_H: f32 = 28.0;
const ROW_H: f32 = 26.0;
const COLUMNS: [&str; 5] = ["Titre", "Durée", "Année", "Score", "Actions"];

pub(crate) const EMPTY_LIST_TEXT: &str = "Aucun film pour le moment.";

/// One table row: the film it acts on and its title/length/year/score cells.
pub(crate) struct FilmRow<'a> {
    pub film: &'a Film,
    pub cells: [String; 4],
}

/// Rows in list order, or `None` when the empty-state text should show instead.
pub(crate) fn film_rows(films: &[Film]) -> Option<Vec<FilmRow<'_>>> {
    if films.is_empty() {
        return None;
    }
    let rows = films
        .iter()
        .map(|film| FilmRow {
            film,
            cells: [
                film.title.clone(),
                cell_text(film.length),
                cell_text(film.year),
                cell_text(film.score),
            ],
        })
        .collect();
    Some(rows)
}

enum RowAction {
    Edit(Film),
    Delete(FilmId),
}

impl crate::app::FilmsApp {
    // ---------- FILM LIST ----------
    pub(crate) fn ui_render_film_table(&mut self, ui: &mut eg::Ui) {
        let busy = self.manager.is_busy();
        let mut action: Option<RowAction> = None;

        eg::Frame::group(ui.style())
            .inner_margin(16.0)
            .rounding(12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Liste des films");
                    if busy {
                        ui.add(eg::Spinner::new().size(14.0));
                    }
                });
                ui.add_space(8.0);

                let Some(rows) = film_rows(self.manager.films()) else {
                    ui.label(EMPTY_LIST_TEXT);
                    return;
                };

                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .column(Column::remainder().at_least(160.0))
                    .columns(Column::auto().at_least(70.0), 3)
                    .column(Column::auto().at_least(170.0))
                    .header(HEADER_H, |mut header| {
                        for name in COLUMNS {
                            header.col(|ui| {
                                ui.strong(name);
                            });
                        }
                    })
                    .body(|mut body| {
                        for FilmRow { film, cells } in &rows {
                            body.row(ROW_H, |mut row| {
                                for cell in cells {
                                    row.col(|ui| {
                                        ui.label(cell);
                                    });
                                }
                                row.col(|ui| {
                                    ui.add_enabled_ui(!busy, |ui| {
                                        ui.horizontal(|ui| {
                                            if ui.button("Modifier").clicked() {
                                                action = Some(RowAction::Edit(Film::clone(film)));
                                            }
                                            // Server records always carry an id.
                                            if let Some(id) = film.id {
                                                if ui.button("Supprimer").clicked() {
                                                    action = Some(RowAction::Delete(id));
                                                }
                                            }
                                        });
                                    });
                                });
                            });
                        }
                    });
            });

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_enabled(!busy, eg::Button::new("Créer un film"))
                .clicked()
            {
                self.manager.begin_create();
            }
        });

        match action {
            Some(RowAction::Edit(film)) => self.manager.begin_edit(&film),
            Some(RowAction::Delete(id)) => self.manager.request_delete(id),
            None => {}
        }
    }
}
