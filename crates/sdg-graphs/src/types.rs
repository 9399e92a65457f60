//! Chart configuration types.

use sdg_config::GraphsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// The four chart kinds shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Totals per entity.
    Bar,
    /// Quartiles and fences per entity.
    Box,
    /// One line per entity over time.
    Line,
    /// Entity by period mean matrix.
    Heatmap,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => write!(f, "bar"),
            Self::Box => write!(f, "box"),
            Self::Line => write!(f, "line"),
            Self::Heatmap => write!(f, "heatmap"),
        }
    }
}

/// Color scheme for chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Ten-color categorical palette.
    Default,
    /// Lighter hues for dark backgrounds.
    Dark,
    /// Pastel hues.
    Light,
    /// High-contrast hues.
    Vibrant,
    /// Shades of gray.
    Monochrome,
    /// Explicit `#rrggbb` colors.
    Custom(Vec<String>),
}

impl ColorScheme {
    /// Parses a configured scheme name or a comma-separated list of hex colors.
    ///
    /// Unknown names fall back to [`ColorScheme::Default`].
    pub fn from_setting(setting: &str) -> Self {
        let setting = setting.trim();
        if setting.contains('#') {
            return Self::Custom(
                setting
                    .split(',')
                    .map(|color| color.trim().to_string())
                    .filter(|color| !color.is_empty())
                    .collect(),
            );
        }

        match setting.to_ascii_lowercase().as_str() {
            "default" | "" => Self::Default,
            "dark" => Self::Dark,
            "light" => Self::Light,
            "vibrant" => Self::Vibrant,
            "monochrome" => Self::Monochrome,
            other => {
                warn!("Unknown color scheme '{}', using default", other);
                Self::Default
            }
        }
    }
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name.
    pub family: String,
    /// Size in points.
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12,
        }
    }
}

/// Margins around the plotting area, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Space above the chart.
    pub top: u32,
    /// Space right of the chart.
    pub right: u32,
    /// Space for the x axis labels.
    pub bottom: u32,
    /// Space for the y axis labels.
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 60,
            left: 70,
        }
    }
}

/// Visual styling shared by every chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Series palette.
    pub color_scheme: ColorScheme,
    /// Background in `#rrggbb` form, white when unset.
    pub background_color: Option<String>,
    /// Caption font.
    pub title_font: FontConfig,
    /// Axis description font.
    pub axis_font: FontConfig,
    /// Chart margins.
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#ffffff".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 20,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

/// Everything a renderer needs besides the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Chart caption.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// X axis description.
    pub x_label: Option<String>,
    /// Y axis description.
    pub y_label: Option<String>,
    /// Styling.
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Chart".to_string(),
            width: 800,
            height: 450,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    /// Builds a chart configuration from the `graphs` section of the settings.
    pub fn from_settings(settings: &GraphsConfig, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: settings.width,
            height: settings.height,
            x_label: Some(settings.entity_axis_label.clone()),
            y_label: Some(settings.value_axis_label.clone()),
            style: StyleConfig {
                color_scheme: ColorScheme::from_setting(&settings.color_scheme),
                background_color: Some(settings.background_color.clone()),
                ..StyleConfig::default()
            },
        }
    }

    /// Replaces the axis descriptions.
    #[must_use]
    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }
}
