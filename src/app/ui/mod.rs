// src/app/ui/mod.rs
pub mod form;
pub mod table;

use eframe::egui as eg;

const BACKDROP_ALPHA: u8 = 150;
const CARD_WIDTH: f32 = 420.0;

/// Dim the whole window and show `add_contents` in a centred card above it.
/// Returns true when the dimmed backdrop (outside the card) was clicked.
pub(crate) fn modal(ctx: &eg::Context, id: &str, add_contents: impl FnOnce(&mut eg::Ui)) -> bool {
    let screen = ctx.screen_rect();

    let backdrop_clicked = eg::Area::new(eg::Id::new((id, "backdrop")))
        .order(eg::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let resp = ui.allocate_rect(screen, eg::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, eg::Color32::from_black_alpha(BACKDROP_ALPHA));
            resp.clicked()
        })
        .inner;

    // The card sits on a higher layer, so clicks inside it never reach the backdrop.
    eg::Area::new(eg::Id::new((id, "card")))
        .order(eg::Order::Foreground)
        .anchor(eg::Align2::CENTER_CENTER, eg::Vec2::ZERO)
        .show(ctx, |ui| {
            eg::Frame::window(ui.style())
                .inner_margin(24.0)
                .show(ui, |ui| {
                    ui.set_width(CARD_WIDTH);
                    add_contents(ui);
                });
        });

    backdrop_clicked
}
