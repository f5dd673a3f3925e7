//! Plain text listing of a workspace.

use std::fmt::Write;

use super::{Error, Exporter};
use crate::workspace::{Axis, Workspace};

/// Text exporter listing each axis and each box, optionally followed by the
/// solver diagnostics of both axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport {
    with_diagnostics: bool,
}

impl TextReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(mut self, with_diagnostics: bool) -> Self {
        self.with_diagnostics = with_diagnostics;
        self
    }

    fn write_axis(out: &mut String, name: &str, axis: &Axis) -> std::fmt::Result {
        let layout = axis.layout();
        writeln!(
            out,
            "{name}: grid space {} minimal span {}",
            layout.grid_space(),
            layout.minimal_span()
        )
    }

    fn write_report(&self, workspace: &Workspace) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let (width, height) = workspace.container_size();
        let (min_width, min_height) = workspace.minimum_size();
        writeln!(out, "container: {width}x{height}")?;
        writeln!(
            out,
            "grid: {}x{} cells of {}px",
            workspace.horizontal().scale().grid_count(),
            workspace.vertical().scale().grid_count(),
            workspace.config().grid_size()
        )?;
        writeln!(out, "minimum size: {min_width}x{min_height}")?;
        Self::write_axis(&mut out, "horizontal", workspace.horizontal())?;
        Self::write_axis(&mut out, "vertical", workspace.vertical())?;

        writeln!(out, "boxes:")?;
        for (id, document_box) in workspace.boxes() {
            write!(
                out,
                "  {id} \"{}\" grid {} screen {} geometry {}",
                document_box.title(),
                document_box.grid_rect(),
                document_box.screen_rect(),
                document_box.geometry()
            )?;
            if document_box.is_wide() {
                write!(out, " wide")?;
            }
            writeln!(out)?;
        }

        if self.with_diagnostics {
            for (name, axis) in [
                ("horizontal", workspace.horizontal()),
                ("vertical", workspace.vertical()),
            ] {
                writeln!(out, "{name} solver:")?;
                write!(out, "{}", axis.scaffold().diagnostics(axis.layout()))?;
            }
        }
        Ok(out)
    }
}

impl Exporter for TextReport {
    fn export_workspace(&self, workspace: &Workspace) -> Result<String, Error> {
        self.write_report(workspace)
            .map_err(|err| Error::Render(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tilegrid_core::geometry::StackRect;

    use super::*;
    use crate::config::LayoutConfig;

    fn workspace() -> Workspace {
        let mut workspace = Workspace::new(LayoutConfig::default()).with_container(640, 480);
        let left = workspace.insert_box(StackRect::new(0.0, 0.0, 0.5, 1.0));
        workspace.set_title(left, "Left").unwrap();
        let right = workspace.insert_box(StackRect::new(0.5, 0.0, 1.0, 1.0));
        workspace.set_title(right, "Right").unwrap();
        workspace
    }

    #[test]
    fn test_report_lists_axes_and_boxes() {
        let report = TextReport::new().export_workspace(&workspace()).unwrap();
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[0], "container: 640x480");
        assert_eq!(lines[1], "grid: 40x30 cells of 16px");
        assert_eq!(lines[2], "minimum size: 384x128");
        assert_eq!(lines[3], "horizontal: grid space [0, 40] minimal span 24");
        assert_eq!(lines[4], "vertical: grid space [0, 30] minimal span 8");
        assert_eq!(lines[5], "boxes:");
        assert_eq!(
            lines[6],
            "  #0 \"Left\" grid (0, 0) - (20, 30) screen 320x480 at (0, 0) geometry 308x464 at (8, 8)"
        );
        assert!(lines[7].starts_with("  #1 \"Right\" grid (20, 0) - (40, 30)"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_report_marks_wide_boxes() {
        let mut workspace = workspace();
        let id = workspace.boxes().map(|(id, _)| id).next().unwrap();
        workspace.toggle_wide_mode(id).unwrap();
        let report = TextReport::new().export_workspace(&workspace).unwrap();
        assert!(report.lines().any(|line| line.contains("\"Left\"") && line.ends_with(" wide")));
    }

    #[test]
    fn test_report_with_diagnostics() {
        let report = TextReport::new()
            .with_diagnostics(true)
            .export_workspace(&workspace())
            .unwrap();
        assert!(report.contains("horizontal solver:\n"));
        assert!(report.contains("vertical solver:\n"));
        assert!(report.contains("grid space: [0, 40]"));
        assert!(report.contains("scaffold: "));
    }
}
