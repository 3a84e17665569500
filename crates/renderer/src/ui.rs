//! egui panels drawn every frame.
//!
//! Widget state is a plain `UiState` value: the frame loop passes the current
//! value into `draw_panels` and keeps whatever comes back. Only the radius
//! leaves this module; the settings panel is self-contained.

use egui::load::SizedTexture;

use crate::types::CircleParameter;

pub const IMAGE_PANEL_TITLE: &str = "Circle Image";
pub const SETTINGS_PANEL_TITLE: &str = "Settings";

/// Widgets in the settings panel. None of these feed the raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsState {
    pub feature_x: bool,
    pub value: f32,
    pub counter: u32,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            feature_x: false,
            value: 0.5,
            counter: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UiState {
    pub radius: CircleParameter,
    pub settings: SettingsState,
}

impl UiState {
    pub fn with_radius(radius: CircleParameter) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}

/// Draws the image and settings panels and returns the edited state.
///
/// `image` is `None` until the display texture exists; the panel then shows a
/// placeholder label instead of the picture.
pub fn draw_panels(ctx: &egui::Context, state: UiState, image: Option<SizedTexture>) -> UiState {
    let mut next = state;

    egui::Window::new(IMAGE_PANEL_TITLE)
        .default_pos([16.0, 16.0])
        .resizable(false)
        .show(ctx, |ui| {
            match image {
                Some(texture) => {
                    ui.image(texture);
                }
                None => {
                    ui.label("texture not ready");
                }
            }

            let mut radius = next.radius.get();
            let slider = egui::Slider::new(&mut radius, CircleParameter::MIN..=CircleParameter::MAX)
                .text("Circle Radius");
            if ui.add(slider).changed() {
                next.radius = CircleParameter::new(radius);
            }
        });

    egui::Window::new(SETTINGS_PANEL_TITLE)
        .default_pos([360.0, 16.0])
        .show(ctx, |ui| {
            ui.label("Application Settings");
            ui.separator();
            ui.checkbox(&mut next.settings.feature_x, "Enable Feature X");
            ui.add(egui::Slider::new(&mut next.settings.value, 0.0..=1.0).text("Value"));
            ui.horizontal(|ui| {
                if ui.button("Button").clicked() {
                    next.settings.counter += 1;
                }
                ui.label(format!("Counter = {}", next.settings.counter));
            });
        });

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(state: UiState, image: Option<SizedTexture>, frames: usize) -> UiState {
        let ctx = egui::Context::default();
        let mut current = state;
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                current = draw_panels(ctx, current, image);
            });
        }
        current
    }

    #[test]
    fn defaults_match_the_initial_widgets() {
        let state = UiState::default();
        assert_eq!(state.radius.get(), 100.0);
        assert!(!state.settings.feature_x);
        assert_eq!(state.settings.value, 0.5);
        assert_eq!(state.settings.counter, 0);
    }

    #[test]
    fn with_radius_keeps_settings_defaults() {
        let state = UiState::with_radius(CircleParameter::new(42.0));
        assert_eq!(state.radius.get(), 42.0);
        assert_eq!(state.settings, SettingsState::default());
    }

    #[test]
    fn idle_frames_leave_state_untouched() {
        let state = UiState {
            radius: CircleParameter::new(64.0),
            settings: SettingsState {
                feature_x: true,
                value: 0.25,
                counter: 7,
            },
        };
        assert_eq!(run_frames(state, None, 5), state);
    }

    #[test]
    fn idle_frames_with_texture_leave_radius_untouched() {
        let texture = SizedTexture::new(egui::TextureId::User(1), egui::vec2(300.0, 300.0));
        let state = UiState::default();
        let after = run_frames(state, Some(texture), 5);
        assert!(!after.radius.differs_from(state.radius));
    }
}
