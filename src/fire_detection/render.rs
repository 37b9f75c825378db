use crate::config::Config;
use crate::fire_detection::core::{Dialog, Effect, Event, ResultView, State, RESET_PROMPT};
use crate::particles::ambient::AmbientField;
use crate::particles::burst::{FireBurst, RISE_PX};
use crate::particles::Dot;
use crate::prediction_client::interface::Prediction;
use crate::upload::selected_file::{Preview, SelectedFile};
use eframe::egui;
use egui::{Align, Align2, Color32, RichText, Sense, Stroke, TextureOptions};
use std::time::{Duration, Instant};

const ACCENT: Color32 = Color32::from_rgb(0x00, 0xd4, 0xff);
const FIRE: Color32 = Color32::from_rgb(0xff, 0x44, 0x44);
const SAFE: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const PANEL: Color32 = Color32::from_rgb(0x12, 0x18, 0x2b);
const ICON_SIZE: f32 = 120.0;

/// Draws `State` with egui and turns clicks into `Event`s. Also owns the purely
/// decorative parts (particles, preview texture, scrolling) that the state
/// machine never sees.
pub struct Render {
    config: Config,
    ambient: AmbientField,
    started_at: Instant,
    burst: Option<(Instant, FireBurst)>,
    preview_texture: Option<(u64, egui::TextureHandle)>,
    scroll_to_result: bool,
}

impl Render {
    pub fn new(config: Config) -> Self {
        let ambient = AmbientField::new(config.ambient_particle_count, &mut rand::rng());
        Self {
            config,
            ambient,
            started_at: Instant::now(),
            burst: None,
            preview_texture: None,
            scroll_to_result: false,
        }
    }

    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SpawnFireBurst => {
                let burst = FireBurst::new(
                    self.config.burst_particle_count,
                    self.config.burst_stagger,
                    self.config.burst_particle_lifetime,
                    &mut rand::rng(),
                );
                self.burst = Some((Instant::now(), burst));
            }
            Effect::ScrollToResult => self.scroll_to_result = true,
            _ => {}
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, state: &State) -> Vec<Event> {
        let mut events = vec![];

        self.paint_ambient(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(RichText::new("🔥 Forest Fire Detection").color(ACCENT).strong());
            ui.label("Upload an image, pick a model and let the classifier decide.");
            ui.add_space(8.0);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().inner_margin(16.0))
            .show(ctx, |ui| {
                ui.add_enabled_ui(state.dialog.is_none(), |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.render_models(ui, state, &mut events);
                        ui.add_space(16.0);
                        self.render_upload(ui, state, &mut events);
                        ui.add_space(12.0);
                        self.render_analyze(ui, state, &mut events);
                        ui.add_space(16.0);
                        self.render_result(ui, state);
                    });
                });
            });

        self.render_notice(ctx, state);
        render_dialog(ctx, state, &mut events);

        events
    }

    fn paint_ambient(&self, ctx: &egui::Context) {
        let painter = ctx.layer_painter(egui::LayerId::background());
        let screen = ctx.screen_rect();
        let elapsed = self.started_at.elapsed().as_secs_f32();

        for dot in self.ambient.sample(elapsed, screen.width(), screen.height()) {
            paint_dot(&painter, screen.min, dot);
        }
    }

    fn render_models(&self, ui: &mut egui::Ui, state: &State, events: &mut Vec<Event>) {
        ui.label(RichText::new("Model").strong());
        ui.horizontal_wrapped(|ui| {
            for model in &self.config.models {
                let active = model.id == state.selected_model;
                let text = RichText::new(format!("{}\n{}", model.label, model.description));
                let card = egui::Button::new(text)
                    .selected(active)
                    .min_size(egui::vec2(160.0, 56.0));
                if ui.add(card).clicked() {
                    events.push(Event::ModelSelected(model.id.clone()));
                }
            }
        });
    }

    fn render_upload(&mut self, ui: &mut egui::Ui, state: &State, events: &mut Vec<Event>) {
        match &state.selected_file {
            None => {
                self.preview_texture = None;

                let stroke = if state.drag_hover {
                    Stroke::new(2.0, ACCENT)
                } else {
                    Stroke::new(1.0, Color32::from_gray(90))
                };

                let zone = egui::Frame::default()
                    .fill(PANEL)
                    .stroke(stroke)
                    .inner_margin(24.0)
                    .show(ui, |ui| {
                        ui.set_min_size(egui::vec2(ui.available_width(), 160.0));
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.label(RichText::new("📁").size(32.0));
                            ui.label("Drag & drop an image here, or click to browse");
                            ui.label(RichText::new("JPG, PNG, JPEG").weak());
                        });
                    });

                if zone.response.interact(Sense::click()).clicked() {
                    events.push(Event::BrowseRequested);
                }
            }
            Some(selected) => {
                ui.horizontal(|ui| {
                    self.render_preview(ui, selected, events);

                    if matches!(state.result, ResultView::Processing { .. }) {
                        ui.vertical(|ui| {
                            ui.add_space(24.0);
                            ui.spinner();
                            ui.label(RichText::new("Scanning image...").color(ACCENT));
                        });
                    }
                });
                ui.label(
                    RichText::new(format!(
                        "{} · double-click the preview or press Esc to reset",
                        selected.file.name
                    ))
                    .weak(),
                );
            }
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui, selected: &SelectedFile, events: &mut Vec<Event>) {
        let shown = match &selected.preview {
            Preview::Decoding => ui.add(egui::Spinner::new().size(48.0)),
            Preview::Unavailable(reason) => ui.label(
                RichText::new(format!("No preview available: {}", reason)).weak(),
            ),
            Preview::Ready(image) => {
                let stale = !matches!(&self.preview_texture, Some((id, _)) if *id == selected.id);
                if stale {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width as usize, image.height as usize],
                        &image.rgba,
                    );
                    let texture =
                        ui.ctx()
                            .load_texture("preview", color_image, TextureOptions::LINEAR);
                    self.preview_texture = Some((selected.id, texture));
                }

                match &self.preview_texture {
                    Some((_, texture)) => {
                        ui.add(egui::Image::new(texture).max_size(egui::vec2(420.0, 300.0)))
                    }
                    None => ui.spinner(),
                }
            }
        };

        // Whatever stands in for the image, double-clicking it asks to reset.
        let response = ui.interact(shown.rect, preview_id(), Sense::click());
        if response.double_clicked() {
            events.push(Event::ResetRequested);
        }
    }

    fn render_analyze(&self, ui: &mut egui::Ui, state: &State, events: &mut Vec<Event>) {
        let button = egui::Button::new(RichText::new(state.analyze_label()).size(18.0))
            .min_size(egui::vec2(200.0, 40.0));
        if ui.add_enabled(state.analyze_enabled(), button).clicked() {
            events.push(Event::AnalyzeRequested);
        }
    }

    fn render_result(&mut self, ui: &mut egui::Ui, state: &State) {
        let panel = egui::Frame::default()
            .fill(PANEL)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| match &state.result {
                    ResultView::Placeholder => {
                        ui.label(RichText::new("Results will appear here").weak());
                    }
                    ResultView::Processing { .. } => {
                        ui.spinner();
                        ui.label("Analyzing image...");
                    }
                    ResultView::Positive(prediction) => {
                        self.render_fire_icon(ui);
                        ui.label(RichText::new("FIRE DETECTED").size(28.0).color(FIRE).strong());
                        render_prediction_details(ui, prediction);
                    }
                    ResultView::Negative(prediction) => {
                        ui.label(RichText::new("🌲").size(64.0));
                        ui.label(RichText::new("NO FIRE DETECTED").size(28.0).color(SAFE).strong());
                        render_prediction_details(ui, prediction);
                    }
                });
            });

        if self.scroll_to_result {
            panel.response.scroll_to_me(Some(Align::Center));
            self.scroll_to_result = false;
        }
    }

    fn render_fire_icon(&mut self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE), Sense::hover());
        let painter = ui.painter().with_clip_rect(burst_area(rect));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "🔥",
            egui::FontId::proportional(64.0),
            Color32::WHITE,
        );

        if let Some((started_at, burst)) = &self.burst {
            let elapsed = started_at.elapsed();
            if burst.is_finished(elapsed) {
                self.burst = None;
                return;
            }
            for dot in burst.sample(elapsed, rect.width(), rect.height()) {
                paint_dot(&painter, rect.min, dot);
            }
        }
    }

    fn render_notice(&self, ctx: &egui::Context, state: &State) {
        let Some(notice) = &state.notice else {
            return;
        };

        let opacity = notice_opacity(
            notice.shown_at.elapsed(),
            self.config.notice_duration,
            self.config.notice_fade,
        );

        egui::Area::new(egui::Id::new("model_notice"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::default()
                    .fill(ACCENT.gamma_multiply(opacity))
                    .inner_margin(14.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&notice.message)
                                .color(Color32::WHITE.gamma_multiply(opacity))
                                .strong(),
                        );
                    });
            });
    }
}

fn render_prediction_details(ui: &mut egui::Ui, prediction: &Prediction) {
    if let Some(confidence) = prediction.confidence {
        ui.label(format!("Confidence: {:.1}%", confidence * 100.0));
    }
    if let Some(model) = &prediction.model {
        ui.label(RichText::new(format!("Model: {}", model)).weak());
    }
}

fn render_dialog(ctx: &egui::Context, state: &State, events: &mut Vec<Event>) {
    let Some(dialog) = &state.dialog else {
        return;
    };

    egui::Window::new("Fire Detection")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| match dialog {
            Dialog::Alert { message } => {
                ui.label(message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    events.push(Event::AlertDismissed);
                }
            }
            Dialog::ConfirmReset => {
                ui.label(RESET_PROMPT);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        events.push(Event::ResetConfirmed);
                    }
                    if ui.button("Cancel").clicked() {
                        events.push(Event::ResetCancelled);
                    }
                });
            }
        });
}

pub fn preview_id() -> egui::Id {
    egui::Id::new("selected_file_preview")
}

/// The icon plus the space the burst rises into above it.
pub fn burst_area(icon: egui::Rect) -> egui::Rect {
    icon.expand2(egui::vec2(8.0, 0.0))
        .with_min_y(icon.min.y - RISE_PX)
}

fn paint_dot(painter: &egui::Painter, origin: egui::Pos2, dot: Dot) {
    let [r, g, b] = dot.color;
    let alpha = (dot.alpha.clamp(0.0, 1.0) * 255.0) as u8;
    painter.circle_filled(
        origin + egui::vec2(dot.x, dot.y),
        dot.radius,
        Color32::from_rgba_unmultiplied(r, g, b, alpha),
    );
}

/// Fades in over `fade`, holds, then fades out so it is gone at `total`.
pub fn notice_opacity(elapsed: Duration, total: Duration, fade: Duration) -> f32 {
    if elapsed >= total {
        return 0.0;
    }
    let fade_secs = fade.as_secs_f32().max(f32::EPSILON);
    let fade_in = elapsed.as_secs_f32() / fade_secs;
    let fade_out = (total - elapsed).as_secs_f32() / fade_secs;
    fade_in.min(fade_out).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::{burst_area, notice_opacity, ICON_SIZE};
    use crate::particles::burst::FireBurst;
    use eframe::egui;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn test_burst_stays_inside_its_area_for_the_whole_rise() {
        let icon = egui::Rect::from_min_size(egui::pos2(300.0, 400.0), egui::vec2(ICON_SIZE, ICON_SIZE));
        let area = burst_area(icon);
        let burst = FireBurst::new(
            20,
            Duration::from_millis(100),
            Duration::from_secs(3),
            &mut StdRng::seed_from_u64(11),
        );

        let mut highest = f32::MAX;
        for ms in (0..5000).step_by(25) {
            for dot in burst.sample(Duration::from_millis(ms), icon.width(), icon.height()) {
                let center = icon.min + egui::vec2(dot.x, dot.y);
                assert!(area.contains(center), "{:?} outside {:?}", center, area);
                highest = highest.min(center.y);
            }
        }

        // Particles get well above the icon itself before they vanish.
        assert!(highest < icon.min.y - 30.0);
    }

    #[test]
    fn test_notice_opacity_fades_in_holds_and_fades_out() {
        let total = Duration::from_millis(2200);
        let fade = Duration::from_millis(400);
        let at = |ms| notice_opacity(Duration::from_millis(ms), total, fade);

        assert_eq!(at(0), 0.0);
        assert!((at(200) - 0.5).abs() < 1e-4);
        assert_eq!(at(1000), 1.0);
        assert!((at(2000) - 0.5).abs() < 1e-4);
        assert_eq!(at(2200), 0.0);
        assert_eq!(at(5000), 0.0);
    }
}
