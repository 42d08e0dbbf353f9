// src/main.rs
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// `FILMS_RENDERER=glow|wgpu` forces a backend; otherwise wgpu on Windows, glow elsewhere.
fn pick_renderer() -> eframe::Renderer {
    let forced = env::var("FILMS_RENDERER").ok();
    match forced.as_deref().map(str::trim) {
        Some("glow") => eframe::Renderer::Glow,
        Some("wgpu") => eframe::Renderer::Wgpu,
        Some(other) => {
            warn!("unknown FILMS_RENDERER `{other}`; using platform default");
            platform_renderer()
        }
        None => platform_renderer(),
    }
}

fn platform_renderer() -> eframe::Renderer {
    if cfg!(target_os = "windows") {
        eframe::Renderer::Wgpu
    } else {
        eframe::Renderer::Glow
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let cfg = films::config::load_config();
    info!("starting with API base {}", cfg.api_base_url);

    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_title(cfg.page_title.clone()),
        ..Default::default()
    };

    let title = cfg.page_title.clone();
    match eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(films::app::FilmsApp::new(cc, &cfg)?))),
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try FILMS_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}
