//! View settings and editor UI state.

use serde::{Deserialize, Serialize};

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change per zoom-in/zoom-out step.
pub const ZOOM_STEP: f64 = 0.1;

/// Canvas view settings, persisted alongside the element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    /// Zoom factor (1.0 = 100%).
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Whether the alignment grid is shown.
    #[serde(default)]
    pub show_grid: bool,
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            show_grid: false,
        }
    }
}

impl ViewSettings {
    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        // Round off float drift from repeated steps.
        self.zoom = ((zoom.clamp(MIN_ZOOM, MAX_ZOOM)) * 100.0).round() / 100.0;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = default_zoom();
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

/// Editor color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Transient editor UI state (panels, modals, loading indicator, theme).
///
/// Owned by the application shell and passed to whatever needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub sidebar_collapsed: bool,
    pub show_property_panel: bool,
    pub show_export_modal: bool,
    /// Loading message while a long operation runs.
    pub loading: Option<String>,
    pub theme: Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Create the initial UI state.
    pub fn new() -> Self {
        Self {
            sidebar_collapsed: false,
            show_property_panel: true,
            show_export_modal: false,
            loading: None,
            theme: Theme::default(),
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn toggle_property_panel(&mut self) {
        self.show_property_panel = !self.show_property_panel;
    }

    pub fn toggle_export_modal(&mut self) {
        self.show_export_modal = !self.show_export_modal;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Show the loading indicator with a message.
    pub fn set_loading(&mut self, message: impl Into<String>) {
        self.loading = Some(message.into());
    }

    pub fn clear_loading(&mut self) {
        self.loading = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
