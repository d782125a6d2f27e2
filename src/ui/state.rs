use shellmorph::config::ViewConfig;
use shellmorph::shell::SceneConfig;

/// Everything the control panel edits between frames.
pub struct UiState {
    pub scene: SceneConfig,
    pub vsync_enabled: bool,
    pub show_stats: bool,
    pub show_help: bool,
}

impl UiState {
    pub fn from_view(view: &ViewConfig) -> Self {
        Self {
            scene: view.scene(),
            vsync_enabled: view.vsync,
            show_stats: true,
            show_help: true,
        }
    }

    /// Folds the current controls back into a persisted view section.
    pub fn to_view(&self) -> ViewConfig {
        ViewConfig {
            pitch_deg: self.scene.pitch_deg,
            roll_deg: self.scene.roll_deg,
            shell_opacity: self.scene.shell_opacity,
            vsync: self.vsync_enabled,
        }
    }

    /// Multispiral bands have no meaning on an archimedean spiral.
    pub fn set_archimedean(&mut self, enabled: bool) {
        self.scene.archimedean = enabled;
        if enabled {
            self.scene.multispiral = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_roundtrip() {
        let view = ViewConfig {
            pitch_deg: 30.0,
            roll_deg: 200.0,
            shell_opacity: 0.5,
            vsync: false,
        };
        let state = UiState::from_view(&view);
        let back = state.to_view();
        assert_eq!(back.pitch_deg, 30.0);
        assert_eq!(back.roll_deg, 200.0);
        assert_eq!(back.shell_opacity, 0.5);
        assert!(!back.vsync);
    }

    #[test]
    fn test_archimedean_clears_multispiral() {
        let mut state = UiState::from_view(&ViewConfig::default());
        state.scene.multispiral = true;
        state.set_archimedean(true);
        assert!(!state.scene.multispiral);
        state.set_archimedean(false);
        assert!(!state.scene.multispiral);
    }
}
