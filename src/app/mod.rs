// src/app/mod.rs: page shell, film list, modal form

// ---- Crates ----
use eframe::egui as eg;
use thiserror::Error;
use tracing::info;

// ---- Local modules ----
pub mod api;
pub mod data;
pub mod manager;
pub mod ui;
pub mod worker;

pub use api::{ApiError, FilmApi, HttpFilmApi};
pub use data::{Film, FilmDraft, FilmField, FilmId, FormError};
pub use manager::{FilmManager, PendingRequest};
pub use worker::{ApiOutcome, ApiRequest, ApiWorker};

use crate::config::AppConfig;

// ---- Tunables ----
const MAX_OUTCOMES_PER_FRAME: usize = 8;
const PAGE_MAX_WIDTH: f32 = 1200.0;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] ApiError),
    #[error("cannot start api worker: {0}")]
    Worker(#[from] std::io::Error),
}

pub struct FilmsApp {
    page_title: String,
    manager: FilmManager,
    worker: ApiWorker,
}

impl FilmsApp {
    pub fn new(cc: &eframe::CreationContext<'_>, cfg: &AppConfig) -> Result<Self, StartupError> {
        let api = HttpFilmApi::from_config(cfg)?;
        info!("films API at {}", api.collection_url());

        let ctx = cc.egui_ctx.clone();
        let worker = ApiWorker::spawn(api, move || ctx.request_repaint())?;

        Ok(Self {
            page_title: cfg.page_title.clone(),
            manager: FilmManager::new(),
            worker,
        })
    }

    pub(crate) fn dispatch(&self, req: Option<ApiRequest>) {
        if let Some(req) = req {
            self.worker.submit(req);
        }
    }

    fn poll_outcomes(&mut self) {
        for outcome in self.worker.poll(MAX_OUTCOMES_PER_FRAME) {
            self.manager.apply(outcome);
        }
    }

    fn ui_render_heading(&self, ui: &mut eg::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(
                eg::RichText::new(&self.page_title)
                    .size(36.0)
                    .strong()
                    .color(ui.visuals().strong_text_color()),
            );
            ui.add_space(20.0);
        });
    }
}

impl eframe::App for FilmsApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        // First frame kicks off the one-time list fetch.
        let load = self.manager.load();
        self.dispatch(load);

        self.poll_outcomes();

        eg::CentralPanel::default().show(ctx, |ui| {
            self.ui_render_heading(ui);
            eg::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.set_max_width(PAGE_MAX_WIDTH);
                    self.ui_render_film_table(ui);
                });
        });

        if self.manager.show_form() {
            self.ui_render_form(ctx);
        }
        if self.manager.confirming_delete().is_some() {
            self.ui_render_delete_confirm(ctx);
        }
    }
}
