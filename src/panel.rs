//! Live parameter panel (egui).

use crate::params::{ranges, ParamRange, Rgb, WaterParams};

/// Panel width in points
const PANEL_WIDTH: f32 = 340.0;

/// Everything the panel may edit, borrowed for one frame
pub struct PanelModel<'a> {
    pub water: &'a mut WaterParams,
    pub background: &'a mut Rgb,
    /// Once the environment map is up the solid background is hidden
    pub env_map_loaded: bool,
    pub pending_assets: usize,
}

/// Debug panel toggled with `H`
pub struct DebugPanel {
    visible: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl DebugPanel {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Build the panel for this frame. Returns `true` if any value changed.
    pub fn show(&self, ctx: &egui::Context, model: PanelModel<'_>) -> bool {
        if !self.visible {
            return false;
        }

        let mut changed = false;
        egui::Window::new("Debug")
            .default_width(PANEL_WIDTH)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .show(ctx, |ui| {
                let w = &mut *model.water;

                ui.heading("Big waves");
                changed |= slider(
                    ui,
                    &mut w.big_waves_elevation,
                    ranges::BIG_WAVES_ELEVATION,
                    "Elevation",
                );
                changed |= slider(
                    ui,
                    &mut w.big_waves_frequency[0],
                    ranges::BIG_WAVES_FREQUENCY,
                    "Frequency X",
                );
                changed |= slider(
                    ui,
                    &mut w.big_waves_frequency[1],
                    ranges::BIG_WAVES_FREQUENCY,
                    "Frequency Z",
                );
                changed |= slider(ui, &mut w.big_waves_speed, ranges::BIG_WAVES_SPEED, "Speed");

                ui.separator();
                ui.heading("Colors");
                changed |= color(ui, &mut w.depth_color, "Depth color");
                changed |= color(ui, &mut w.surface_color, "Surface color");
                changed |= slider(ui, &mut w.color_offset, ranges::COLOR_OFFSET, "Color offset");
                changed |= slider(
                    ui,
                    &mut w.color_multiplier,
                    ranges::COLOR_MULTIPLIER,
                    "Color multiplier",
                );

                ui.separator();
                ui.heading("Small waves");
                changed |= slider(
                    ui,
                    &mut w.small_waves_elevation,
                    ranges::SMALL_WAVES_ELEVATION,
                    "Elevation",
                );
                changed |= slider(
                    ui,
                    &mut w.small_waves_frequency,
                    ranges::SMALL_WAVES_FREQUENCY,
                    "Frequency",
                );
                changed |= slider(ui, &mut w.small_waves_speed, ranges::SMALL_WAVES_SPEED, "Speed");
                changed |= slider(
                    ui,
                    &mut w.small_waves_iterations,
                    ranges::SMALL_WAVES_ITERATIONS,
                    "Iterations",
                );

                ui.separator();
                if model.env_map_loaded {
                    ui.label("Background: environment map");
                } else {
                    changed |= color(ui, model.background, "Background");
                }
                if model.pending_assets > 0 {
                    ui.label(format!("Loading {} asset(s)...", model.pending_assets));
                }
            });

        changed
    }
}

fn slider(ui: &mut egui::Ui, value: &mut f32, range: ParamRange, label: &str) -> bool {
    ui.add(
        egui::Slider::new(value, range.min..=range.max)
            .step_by(range.step as f64)
            .text(label),
    )
    .changed()
}

fn color(ui: &mut egui::Ui, value: &mut Rgb, label: &str) -> bool {
    ui.horizontal(|ui| {
        let changed = ui.color_edit_button_rgb(&mut value.0).changed();
        ui.label(format!("{} {}", label, value));
        changed
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_panel(panel: &DebugPanel, water: &mut WaterParams, background: &mut Rgb) -> bool {
        let ctx = egui::Context::default();
        let mut changed = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changed = panel.show(
                ctx,
                PanelModel {
                    water: &mut *water,
                    background: &mut *background,
                    env_map_loaded: false,
                    pending_assets: 1,
                },
            );
        });
        changed
    }

    #[test]
    fn test_panel_without_input_leaves_params_alone() {
        let panel = DebugPanel::default();
        let mut water = WaterParams::default();
        let mut background = Rgb::from_hex_u32(0xa8feff);

        assert!(!run_panel(&panel, &mut water, &mut background));
        assert_eq!(water.big_waves_elevation, 0.1);
        assert_eq!(water.small_waves_iterations, 3.0);
        assert_eq!(background, Rgb::from_hex_u32(0xa8feff));
    }

    #[test]
    fn test_toggle_hides_panel() {
        let mut panel = DebugPanel::default();
        assert!(panel.is_visible());
        panel.toggle();
        assert!(!panel.is_visible());

        let mut water = WaterParams::default();
        let mut background = Rgb::BLACK;
        assert!(!run_panel(&panel, &mut water, &mut background));
    }
}
