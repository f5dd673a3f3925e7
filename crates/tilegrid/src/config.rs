//! Configuration types for workspace layout and rendering.
//!
//! This module provides configuration structures that control how boxes are
//! laid out and styled. All types implement [`serde::Deserialize`] so they
//! can be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Grid size, minimal box size and the pointer hit-test zones.
//! - [`StyleConfig`] - Colors used by the SVG export.
//!
//! # Example
//!
//! ```
//! # use tilegrid::config::AppConfig;
//! let config: AppConfig = toml::from_str("[layout]\ngrid_size = 20").unwrap();
//! assert_eq!(config.layout().grid_size(), 20);
//! assert_eq!(config.layout().min_box_grid_width(), 12);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use tilegrid_core::color::Color;

use crate::solver::vertex::DEFAULT_MERGE_TOLERANCE;

/// Largest accepted `grid_size`, `min_box_grid_width` and `min_box_grid_height`.
pub const MAX_GRID_SIZE: i32 = 1024;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Sizes that drive the workspace layout.
///
/// Grid sizes are in grid cells, everything else in screen pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    grid_size: i32,
    min_box_grid_width: i32,
    min_box_grid_height: i32,
    box_spacing: i32,
    border_size: i32,
    corner_size: i32,
    title_size: i32,
    merge_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_size: 16,
            min_box_grid_width: 12,
            min_box_grid_height: 8,
            box_spacing: 8,
            border_size: 8,
            corner_size: 12,
            title_size: 32,
            merge_tolerance: DEFAULT_MERGE_TOLERANCE,
        }
    }
}

impl LayoutConfig {
    /// Size of one grid cell in pixels
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Minimal box width in grid cells; also the horizontal minimal spacing
    pub fn min_box_grid_width(&self) -> i32 {
        self.min_box_grid_width
    }

    /// Minimal box height in grid cells; also the vertical minimal spacing
    pub fn min_box_grid_height(&self) -> i32 {
        self.min_box_grid_height
    }

    /// Gap between the geometry of neighbouring boxes, in pixels
    pub fn box_spacing(&self) -> i32 {
        self.box_spacing
    }

    pub fn border_size(&self) -> i32 {
        self.border_size
    }

    pub fn corner_size(&self) -> i32 {
        self.corner_size
    }

    pub fn title_size(&self) -> i32 {
        self.title_size
    }

    /// Relative tolerance under which stack endpoints are merged
    pub fn merge_tolerance(&self) -> f64 {
        self.merge_tolerance
    }

    pub fn with_grid_size(mut self, grid_size: i32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_min_box_grid_size(mut self, width: i32, height: i32) -> Self {
        self.min_box_grid_width = width;
        self.min_box_grid_height = height;
        self
    }

    pub fn with_box_spacing(mut self, box_spacing: i32) -> Self {
        self.box_spacing = box_spacing;
        self
    }

    /// Checks that every size is usable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("grid_size", self.grid_size),
            ("min_box_grid_width", self.min_box_grid_width),
            ("min_box_grid_height", self.min_box_grid_height),
        ];
        if let Some((name, value)) = positive.into_iter().find(|(_, value)| *value < 1) {
            return Err(format!("`{name}` must be at least 1, got {value}"));
        }
        if let Some((name, value)) = positive
            .into_iter()
            .find(|(_, value)| *value > MAX_GRID_SIZE)
        {
            return Err(format!(
                "`{name}` must be at most {MAX_GRID_SIZE}, got {value}"
            ));
        }

        let non_negative = [
            ("box_spacing", self.box_spacing),
            ("border_size", self.border_size),
            ("corner_size", self.corner_size),
            ("title_size", self.title_size),
        ];
        if let Some((name, value)) = non_negative.into_iter().find(|(_, value)| *value < 0) {
            return Err(format!("`{name}` must not be negative, got {value}"));
        }

        if !(self.merge_tolerance.is_finite() && (0.0..1.0).contains(&self.merge_tolerance)) {
            return Err(format!(
                "`merge_tolerance` must be in [0, 1), got {}",
                self.merge_tolerance
            ));
        }
        Ok(())
    }
}

/// Visual styling configuration for the SVG export.
///
/// Colors are CSS color strings. Fields that are not set fall back to the
/// workspace palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    box_fill_color: Option<String>,

    #[serde(default)]
    box_stroke_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed container background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, String> {
        parse_color("background", self.background_color.as_deref(), "#0c1b1d")
    }

    /// Returns the parsed box fill [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn box_fill_color(&self) -> Result<Color, String> {
        parse_color("box fill", self.box_fill_color.as_deref(), "#505050")
    }

    /// Returns the parsed box outline [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn box_stroke_color(&self) -> Result<Color, String> {
        parse_color("box stroke", self.box_stroke_color.as_deref(), "#202020")
    }
}

fn parse_color(name: &str, value: Option<&str>, fallback: &str) -> Result<Color, String> {
    Color::new(value.unwrap_or(fallback))
        .map_err(|err| format!("Invalid {name} color in config: {err}"))
}
