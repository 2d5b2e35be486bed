// src/app/ui/panel.rs
use eframe::egui as eg;

impl crate::app::ReelpickApp {
    pub(crate) fn ui_render_watchlist_panel(&mut self, ctx: &eg::Context) {
        eg::SidePanel::right("watchlist_panel")
            .resizable(true)
            .default_width(260.0)
            .min_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.heading("Watchlist");
                    ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                        if ui.button("Clear").clicked() {
                            self.watchlist.clear();
                            self.notify("Watchlist cleared");
                        }
                    });
                });
                ui.separator();

                if self.watchlist.is_empty() {
                    ui.label("Your watchlist is empty.");
                } else {
                    let titles: Vec<String> = self.watchlist.titles().to_vec();
                    eg::ScrollArea::vertical()
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            for title in titles {
                                ui.horizontal(|ui| {
                                    ui.label(&title);
                                    ui.with_layout(
                                        eg::Layout::right_to_left(eg::Align::Center),
                                        |ui| {
                                            if ui.small_button("Remove").clicked() {
                                                self.watchlist.remove(&title);
                                                self.notify(format!("Removed \"{title}\""));
                                            }
                                        },
                                    );
                                });
                            }
                        });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.small_button("Backup").clicked() {
                        match self.watchlist.backup() {
                            Ok(_) => self.notify("Watchlist backed up"),
                            Err(e) => self.notify(format!("Backup failed: {e}")),
                        }
                    }
                    if ui.small_button("Restore latest").clicked() {
                        match self.watchlist.restore_latest_backup() {
                            Ok(Some(_)) => self.notify("Watchlist restored"),
                            Ok(None) => self.notify("No backups found"),
                            Err(e) => self.notify(format!("Restore failed: {e}")),
                        }
                    }
                });
            });
    }
}
