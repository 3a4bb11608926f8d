use eframe::egui::{self, Align, Color32, Context, Layout, RichText};

use constellation::SceneMode;
use constellation::scene::ClickTarget;
use constellation::scene::connections::ChainState;
use constellation::scene::freeze::FreezeState;

use super::super::ConstellationApp;

fn chain_label(state: ChainState) -> &'static str {
    match state {
        ChainState::None => "chain: idle",
        ChainState::HasDtAi => "chain: DT → AI",
        ChainState::HasAiSi => "chain: AI → Spatial Intelligence",
        ChainState::HasSiIon => "chain: complete",
    }
}

impl ConstellationApp {
    /// Lays out all panels and returns the click collected on the canvas, if any.
    pub(in crate::app) fn show(&mut self, ctx: &Context) -> Option<ClickTarget> {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("constellation");
                    ui.separator();

                    let mut mode = self.scene.mode();
                    for candidate in [SceneMode::Graph, SceneMode::Orbit] {
                        ui.selectable_value(&mut mode, candidate, candidate.label());
                    }
                    self.scene.set_mode(mode);

                    if ui.button("Reset scene").clicked() {
                        self.scene.reset();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("t = {:.1}s", self.scene.elapsed()));
                        match self.scene.mode() {
                            SceneMode::Graph => {
                                ui.label(chain_label(self.scene.chain_state()));
                            }
                            SceneMode::Orbit => {
                                let text = match self.scene.freeze_state() {
                                    FreezeState::Idle => "click the sun to freeze".to_owned(),
                                    FreezeState::Frozen(index) => {
                                        format!("body {} frozen", index + 1)
                                    }
                                };
                                ui.label(text);
                            }
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| self.draw_controls(ui));

        let mut click = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                click = self.draw_scene(ui);
            });
        click
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("View");
        ui.checkbox(&mut self.view.show_labels, "Labels");
        ui.checkbox(&mut self.view.animate_pulse, "Pulse effects");
        ui.checkbox(&mut self.view.show_orbit_rings, "Orbit rings");
        if ui.button("Reset camera").clicked() {
            let camera = self.camera_mut();
            camera.yaw = 0.0;
            camera.pitch = 0.0;
            camera.zoom = 1.0;
            camera.pan = egui::Vec2::ZERO;
        }

        ui.separator();
        match self.scene.mode() {
            SceneMode::Graph => self.draw_node_list(ui),
            SceneMode::Orbit => self.draw_body_list(ui),
        }
    }

    fn draw_node_list(&mut self, ui: &mut egui::Ui) {
        ui.heading("Nodes");
        ui.add(
            egui::TextEdit::singleline(&mut self.view.search)
                .hint_text("Search nodes")
                .desired_width(f32::INFINITY),
        );
        let matches = self.cached_search_matches();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for node in self.scene.nodes() {
                let mut text = RichText::new(node.name);
                if node.connected {
                    text = text.color(Color32::from_rgb(0, 255, 255)).strong();
                }
                if matches.as_ref().is_some_and(|set| set.contains(node.name)) {
                    text = text.underline();
                }

                let response = ui.selectable_label(false, text);
                if response.clicked() {
                    let target = if node.is_center {
                        ClickTarget::Center
                    } else {
                        ClickTarget::Node(node.name.to_owned())
                    };
                    self.scene.click(&target);
                }
            }
        });

        ui.separator();
        ui.label(format!("edges: {}", self.scene.edge_segments().len()));
        if self.view.last_update_changed {
            ui.label("drawing...");
        }
    }

    fn draw_body_list(&self, ui: &mut egui::Ui) {
        ui.heading("Bodies");
        let bodies = self.scene.bodies();
        if bodies.is_empty() {
            ui.label("waiting for first frame");
            return;
        }

        for body in bodies {
            let status = if body.frozen { "frozen" } else { "orbiting" };
            ui.label(format!(
                "#{}  r = {:.0}  ({:.2}, {:.2})  {status}",
                body.index + 1,
                body.distance,
                body.position.x,
                body.position.y
            ));
        }
    }
}
