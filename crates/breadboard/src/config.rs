//! Configuration types for Breadboard diagrams.
//!
//! This module provides configuration structures that control grid placement
//! and the defaults used when components are rebuilt from a project file. All
//! types implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining grid and component settings.
//! - [`GridConfig`] - Grid cell size used for snapping component positions.
//! - [`ComponentConfig`] - Size given to components loaded from a project file.
//!
//! # Example
//!
//! ```
//! # use breadboard::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.grid().size(), 20.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use breadboard_core::geometry::{GRID_SIZE, Size};

/// Top-level configuration combining grid and component settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Grid configuration section.
    #[serde(default)]
    grid: GridConfig,

    /// Component defaults section.
    #[serde(default)]
    component: ComponentConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(grid: GridConfig, component: ComponentConfig) -> Self {
        Self { grid, component }
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the component defaults.
    pub fn component(&self) -> &ComponentConfig {
        &self.component
    }

    /// Checks that every configured value is usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.grid.size.is_finite() && self.grid.size > 0.0) {
            return Err(format!(
                "grid.size must be a positive number, got {}",
                self.grid.size
            ));
        }
        if !self.component.default_size().is_positive() {
            return Err(format!(
                "component.width and component.height must be positive, got {}x{}",
                self.component.width, self.component.height
            ));
        }
        Ok(())
    }
}

/// Grid placement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Distance between grid lines.
    #[serde(default = "default_grid_size")]
    size: f32,
}

impl GridConfig {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    /// Returns the grid cell size.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_grid_size(),
        }
    }
}

/// Defaults for components rebuilt from a project file.
///
/// Project files do not store component sizes, so every loaded component gets
/// this size.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    #[serde(default = "default_component_width")]
    width: f32,

    #[serde(default = "default_component_height")]
    height: f32,
}

impl ComponentConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the size of a component loaded from a project file.
    pub fn default_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            width: default_component_width(),
            height: default_component_height(),
        }
    }
}

fn default_grid_size() -> f32 {
    GRID_SIZE
}

fn default_component_width() -> f32 {
    100.0
}

fn default_component_height() -> f32 {
    50.0
}
