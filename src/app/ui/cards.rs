// src/app/ui/cards.rs
use eframe::egui as eg;

use crate::app::{CardView, FOOTER_BOTTOM_SLACK, MAX_UPLOADS_PER_FRAME, SCROLL_TOP_THRESHOLD};

const CARD_W: f32 = 300.0;
const PORTRAIT_SIZE: eg::Vec2 = eg::vec2(56.0, 72.0);

impl crate::app::ReelpickApp {
    pub(crate) fn ui_render_cards(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        if let Some(err) = self.load_error.clone() {
            ui.add_space(16.0);
            ui.colored_label(ui.visuals().error_fg_color, err);
            return;
        }

        let views = self.card_views();
        if views.is_empty() {
            ui.add_space(16.0);
            if self.fetch_in_flight() {
                ui.label("Fetching characters…");
            } else {
                ui.label("Press \"Generate Movies\" to sample a few Disney films.");
            }
            return;
        }

        let mut uploads_left = MAX_UPLOADS_PER_FRAME;

        let mut scroll = eg::ScrollArea::vertical()
            .id_source("movie_cards")
            .auto_shrink([false; 2]);
        if self.scroll_to_top {
            scroll = scroll.vertical_scroll_offset(0.0);
            self.scroll_to_top = false;
        }

        let out = scroll.show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = eg::vec2(10.0, 10.0);
                for view in &views {
                    self.ui_render_movie_card(ui, ctx, view, &mut uploads_left);
                }
            });
        });

        self.scroll_offset = out.state.offset.y;
        self.at_bottom =
            out.state.offset.y + out.inner_rect.height() >= out.content_size.y - FOOTER_BOTTOM_SLACK;

        if self.scroll_offset > SCROLL_TOP_THRESHOLD {
            eg::Area::new(eg::Id::new("scroll_top_btn"))
                .anchor(eg::Align2::RIGHT_BOTTOM, eg::vec2(-16.0, -16.0))
                .show(ctx, |ui| {
                    if ui.button("⬆ Top").clicked() {
                        self.scroll_to_top = true;
                    }
                });
        }
    }

    fn ui_render_movie_card(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        view: &CardView,
        uploads_left: &mut usize,
    ) {
        ui.group(|ui| {
            ui.set_width(CARD_W);
            ui.vertical(|ui| {
                ui.heading(&view.title);

                if !view.cast.is_empty() {
                    ui.label(eg::RichText::new("Main characters:").strong());
                    ui.horizontal(|ui| {
                        for (name, key) in &view.cast {
                            if *uploads_left > 0 && self.try_upload_portrait(ctx, key) {
                                *uploads_left -= 1;
                            }
                            ui.vertical(|ui| {
                                ui.set_width(PORTRAIT_SIZE.x + 8.0);
                                match self.portrait_tex_id(key) {
                                    Some(tex) => {
                                        ui.image((tex, PORTRAIT_SIZE));
                                    }
                                    None => {
                                        let (rect, _resp) = ui
                                            .allocate_exact_size(PORTRAIT_SIZE, eg::Sense::hover());
                                        ui.painter().rect_filled(
                                            rect,
                                            4.0,
                                            eg::Color32::from_gray(40),
                                        );
                                    }
                                }
                                ui.add(
                                    eg::Label::new(eg::RichText::new(name).size(11.0)).wrap(),
                                );
                            });
                        }
                    });
                }

                if !view.tv_shows.is_empty() {
                    ui.label(format!("TV shows: {}", view.tv_shows));
                }
                if !view.short_films.is_empty() {
                    ui.label(format!("Short films: {}", view.short_films));
                }
                if !view.park_attractions.is_empty() {
                    ui.label(format!("Park attractions: {}", view.park_attractions));
                }

                ui.add_space(4.0);
                if ui.button("Add to watchlist").clicked() {
                    self.watchlist.add(&view.title);
                    self.notify(format!("Added \"{}\" to your watchlist", view.title));
                }
            });
        });
    }
}
