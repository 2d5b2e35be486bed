// src/app/ui/mod.rs
pub mod cards;
pub mod panel;
pub mod topbar;

use eframe::egui as eg;

impl crate::app::ReelpickApp {
    /// Toast overlay, bottom-center, auto-hides after the fixed duration.
    pub(crate) fn ui_render_toast(&mut self, ctx: &eg::Context) {
        let Some(toast) = &self.toast else { return };

        let elapsed = toast.shown_at.elapsed();
        if elapsed >= super::TOAST_DURATION {
            self.toast = None;
            return;
        }
        let text = toast.text.clone();

        eg::Area::new(eg::Id::new("toast"))
            .anchor(eg::Align2::CENTER_BOTTOM, eg::vec2(0.0, -24.0))
            .interactable(false)
            .show(ctx, |ui| {
                eg::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(text);
                });
            });

        // wake up in time to hide it
        ctx.request_repaint_after(super::TOAST_DURATION - elapsed);
    }

    /// Footer strip, only once the card list is scrolled to the bottom.
    pub(crate) fn ui_render_footer(&mut self, ctx: &eg::Context) {
        if !self.at_bottom {
            return;
        }
        eg::TopBottomPanel::bottom("site_footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label("Character data: api.disneyapi.dev");
            });
        });
    }
}
