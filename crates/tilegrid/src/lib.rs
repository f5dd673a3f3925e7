//! Tilegrid - An adaptive stack-to-grid layout engine for tiling document workspaces.
//!
//! Boxes are described by resolution-independent stack rectangles. For each
//! axis the [`solver`] picks the scaffold of the stack segments, sizes the
//! grid space around it and projects every segment onto integer grid lines.
//! The [`workspace`] keeps the stack, grid and screen representations of all
//! boxes in sync while they are added, moved, resized and closed.

pub mod config;
pub mod export;
pub mod scene;
pub mod solver;
pub mod workspace;

mod error;

pub use tilegrid_core::{bound, color, geometry, scale, segment};

pub use error::TilegridError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use scene::Scene;
use workspace::Workspace;

/// Builder for laying out and rendering Tilegrid scenes.
///
/// # Examples
///
/// ```rust,no_run
/// use tilegrid::{LayoutBuilder, config::AppConfig, scene::Scene};
///
/// let source = r#"
/// [[boxes]]
/// title = "Notes"
/// stack = [0.0, 0.0, 1.0, 1.0]
/// "#;
///
/// let scene = Scene::from_toml(source).expect("Failed to parse");
/// let builder = LayoutBuilder::new(AppConfig::default());
///
/// let workspace = builder.build(&scene).expect("Failed to lay out");
/// let svg = builder.render_svg(&workspace).expect("Failed to render");
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Lay out a scene into a workspace.
    ///
    /// The workspace is created with the scene's container size, then the
    /// scene's boxes and actions are replayed onto it.
    ///
    /// # Errors
    ///
    /// Returns `TilegridError::Config` if the layout configuration is invalid,
    /// or `TilegridError::Scene` if an action refers to a missing box.
    pub fn build(&self, scene: &Scene) -> Result<Workspace, TilegridError> {
        self.config
            .layout()
            .validate()
            .map_err(TilegridError::Config)?;

        let container = scene.container();
        info!(
            width = container.width(),
            height = container.height(),
            boxes = scene.boxes().len(),
            actions = scene.actions().len();
            "Building workspace"
        );

        let mut workspace = Workspace::new(self.config.layout().clone())
            .with_container(container.width(), container.height());
        scene.replay(&mut workspace)?;

        debug!(boxes = workspace.len(); "Scene replayed");
        trace!(workspace:?; "Workspace built");

        Ok(workspace)
    }

    /// Render a workspace to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `TilegridError::Export` if a style color is invalid.
    pub fn render_svg(&self, workspace: &Workspace) -> Result<String, TilegridError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let output = exporter.export_workspace(workspace)?;

        info!("SVG rendered successfully");
        Ok(output)
    }

    /// Render a workspace to a plain text report.
    ///
    /// With `with_diagnostics`, the report ends with the solver state of both
    /// axes.
    ///
    /// # Errors
    ///
    /// Returns `TilegridError::Export` if the report cannot be written.
    pub fn render_report(
        &self,
        workspace: &Workspace,
        with_diagnostics: bool,
    ) -> Result<String, TilegridError> {
        let exporter = export::report::TextReport::new().with_diagnostics(with_diagnostics);
        let output = exporter.export_workspace(workspace)?;

        info!(with_diagnostics; "Report rendered successfully");
        Ok(output)
    }
}
