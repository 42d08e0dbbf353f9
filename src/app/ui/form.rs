// src/app/ui/form.rs
use eframe::egui as eg;
use tracing::warn;

use crate::app::data::FilmField;

const FORM_FIELDS: [(FilmField, &str, &str); 4] = [
    (FilmField::Title, "Titre", ""),
    (FilmField::Length, "Durée (min)", "148"),
    (FilmField::Year, "Année", "2010"),
    (FilmField::Score, "Score", "8.8"),
];

impl crate::app::FilmsApp {
    // ---------- CREATE / EDIT MODAL ----------
    pub(crate) fn ui_render_form(&mut self, ctx: &eg::Context) {
        let editing = self.manager.is_editing();
        let busy = self.manager.is_busy();
        let mut submit = false;
        let mut cancel = false;

        let backdrop_clicked = super::modal(ctx, "film_form", |ui| {
            ui.heading(if editing {
                "Modifier le film"
            } else {
                "Créer un film"
            });
            ui.add_space(12.0);

            for (field, label, hint) in FORM_FIELDS {
                ui.label(label);
                let mut text = self.manager.draft().field(field).to_string();
                let resp = ui.add(
                    eg::TextEdit::singleline(&mut text)
                        .hint_text(hint)
                        .desired_width(f32::INFINITY),
                );
                if resp.changed() {
                    self.manager.set_field(field, text);
                }
                ui.add_space(8.0);
            }

            let check = self.manager.draft().check();
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let label = if editing { "Mettre à jour" } else { "Créer" };
                let resp = ui.add_enabled(check.is_ok() && !busy, eg::Button::new(label));
                let resp = match &check {
                    Err(err) => resp.on_disabled_hover_text(err.to_string()),
                    Ok(()) => resp,
                };
                if resp.clicked() {
                    submit = true;
                }
                if ui.button("Annuler").clicked() {
                    cancel = true;
                }
                if busy {
                    ui.add(eg::Spinner::new().size(14.0));
                }
            });

            if check.is_ok() && !busy && ui.input(|i| i.key_pressed(eg::Key::Enter)) {
                submit = true;
            }
        });

        if backdrop_clicked || cancel || ctx.input(|i| i.key_pressed(eg::Key::Escape)) {
            self.manager.cancel();
            return;
        }
        if submit {
            match self.manager.submit() {
                Ok(req) => self.dispatch(req),
                Err(err) => warn!("form rejected: {err}"),
            }
        }
    }

    // ---------- DELETE CONFIRMATION ----------
    pub(crate) fn ui_render_delete_confirm(&mut self, ctx: &eg::Context) {
        let Some(id) = self.manager.confirming_delete() else {
            return;
        };
        let title = self
            .manager
            .films()
            .iter()
            .find(|f| f.id == Some(id))
            .map(|f| f.title.clone());
        let busy = self.manager.is_busy();
        let mut confirmed = false;
        let mut declined = false;

        let backdrop_clicked = super::modal(ctx, "delete_confirm", |ui| {
            ui.heading("Supprimer ce film ?");
            if let Some(title) = &title {
                ui.label(eg::RichText::new(title).weak());
            }
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, eg::Button::new("Supprimer"))
                    .clicked()
                {
                    confirmed = true;
                }
                if ui.button("Annuler").clicked() {
                    declined = true;
                }
            });
        });

        if confirmed {
            let req = self.manager.confirm_delete();
            self.dispatch(req);
        } else if declined || backdrop_clicked || ctx.input(|i| i.key_pressed(eg::Key::Escape)) {
            self.manager.decline_delete();
        }
    }
}
