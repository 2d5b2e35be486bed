// src/app/ui/topbar.rs
use eframe::egui as eg;

use crate::app::SampleCount;

impl crate::app::ReelpickApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            let in_flight = self.fetch_in_flight();
            let label = if in_flight { "Loading…" } else { "Generate Movies" };
            if ui.add_enabled(!in_flight, eg::Button::new(label)).clicked() {
                self.request_generate();
            }
            if in_flight {
                ui.add(eg::Spinner::new().size(14.0));
            }

            ui.separator();

            // Sample size
            let mut changed = false;
            eg::ComboBox::from_id_source("sample_count_combo")
                .selected_text(format!("{} movies", self.sample_count.as_str()))
                .show_ui(ui, |ui| {
                    for opt in [SampleCount::Three, SampleCount::Five, SampleCount::Eight] {
                        if ui
                            .selectable_value(
                                &mut self.sample_count,
                                opt,
                                format!("{} movies", opt.as_str()),
                            )
                            .clicked()
                        {
                            changed = true;
                        }
                    }
                });
            if changed {
                self.mark_dirty();
            }
        });
    }
}
