//! SVG rendering of a workspace.

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use tilegrid_core::{color::Color, geometry::Rect};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    workspace::{DocumentBox, Workspace},
};

const FONT_FAMILY: &str = "Arial, sans-serif";
const FONT_SIZE: i32 = 14;

/// Builder for an [`Svg`] exporter.
#[derive(Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves the configured colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);
        Ok(Svg {
            background_color: style.background_color().map_err(Error::Style)?,
            fill_color: style.box_fill_color().map_err(Error::Style)?,
            stroke_color: style.box_stroke_color().map_err(Error::Style)?,
        })
    }
}

/// SVG exporter drawing every box geometry, bottom box first.
#[derive(Debug, Clone)]
pub struct Svg {
    background_color: Color,
    fill_color: Color,
    stroke_color: Color,
}

impl Svg {
    /// Renders the workspace into an SVG document.
    ///
    /// The canvas covers the container, grown to fit boxes that overflow a
    /// container smaller than the workspace minimum size.
    pub fn render_workspace(&self, workspace: &Workspace) -> Document {
        let (container_width, container_height) = workspace.container_size();
        let (width, height) = workspace.boxes().fold(
            (container_width, container_height),
            |(width, height), (_, document_box)| {
                let geometry = document_box.geometry();
                (width.max(geometry.right()), height.max(geometry.bottom()))
            },
        );
        debug!(width, height; "SVG canvas size");

        let doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);
        let mut doc = self.add_background(doc, width, height);

        let title_size = workspace.config().title_size();
        let border_size = workspace.config().border_size();
        for (id, document_box) in workspace.boxes() {
            let geometry = document_box.geometry();
            if geometry.width() <= 0 || geometry.height() <= 0 {
                continue;
            }
            let group = self
                .render_box(document_box, title_size, border_size)
                .set("id", format!("box-{}", id.index()));
            doc = doc.add(group);
        }

        info!(boxes = workspace.len(); "SVG rendered");
        doc
    }

    fn add_background(&self, doc: Document, width: i32, height: i32) -> Document {
        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", &self.background_color)
            .set("fill-opacity", self.background_color.alpha());
        doc.add(background)
    }

    fn render_box(
        &self,
        document_box: &DocumentBox,
        title_size: i32,
        border_size: i32,
    ) -> svg_element::Group {
        let geometry = document_box.geometry();
        let mut group = svg_element::Group::new().add(self.render_frame(geometry));

        // Title separator, only when the box is taller than its title strip
        if geometry.height() > title_size {
            let separator = svg_element::Line::new()
                .set("x1", geometry.x())
                .set("y1", geometry.y() + title_size)
                .set("x2", geometry.right())
                .set("y2", geometry.y() + title_size)
                .set("stroke", &self.stroke_color)
                .set("stroke-width", 1);
            group = group.add(separator);
        }

        if !document_box.title().is_empty() {
            let title = svg_element::Text::new(document_box.title())
                .set("x", geometry.x() + border_size)
                .set("y", geometry.y() + title_size.min(geometry.height()) / 2)
                .set("dominant-baseline", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", FONT_SIZE)
                .set("fill", "white");
            group = group.add(title);
        }

        if document_box.is_wide() {
            group = group.set("class", "wide");
        }
        group
    }

    fn render_frame(&self, geometry: Rect) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", geometry.x())
            .set("y", geometry.y())
            .set("width", geometry.width())
            .set("height", geometry.height())
            .set("fill", &self.fill_color)
            .set("fill-opacity", self.fill_color.alpha())
            .set("stroke", &self.stroke_color)
            .set("stroke-width", 1)
    }
}

impl Exporter for Svg {
    fn export_workspace(&self, workspace: &Workspace) -> Result<String, Error> {
        Ok(self.render_workspace(workspace).to_string())
    }
}

#[cfg(test)]
mod tests {
    use tilegrid_core::geometry::StackRect;

    use super::*;
    use crate::config::LayoutConfig;

    fn workspace() -> Workspace {
        let mut workspace = Workspace::new(LayoutConfig::default()).with_container(640, 480);
        let id = workspace.insert_box(StackRect::new(0.0, 0.0, 0.5, 1.0));
        workspace.set_title(id, "Quotes").unwrap();
        workspace.insert_box(StackRect::new(0.5, 0.0, 1.0, 1.0));
        workspace
    }

    #[test]
    fn test_render_boxes_and_titles() {
        let svg = SvgBuilder::new().build().unwrap();
        let output = svg.export_workspace(&workspace()).unwrap();

        assert!(output.contains("viewBox=\"0 0 640 480\""));
        assert!(output.contains("id=\"box-0\""));
        assert!(output.contains("id=\"box-1\""));
        assert!(output.contains("Quotes"));
        assert!(output.contains("width=\"308\""));
    }

    #[test]
    fn test_canvas_grows_with_overflowing_boxes() {
        let mut workspace = Workspace::new(LayoutConfig::default()).with_container(160, 160);
        workspace.add_box();
        let svg = SvgBuilder::new().build().unwrap();
        let output = svg.export_workspace(&workspace).unwrap();
        assert!(output.contains("viewBox=\"0 0 184 160\""));
    }

    #[test]
    fn test_invalid_style_color() {
        let style: StyleConfig = toml::from_str("box_fill_color = \"not-a-color\"").unwrap();
        let result = SvgBuilder::new().with_style(&style).build();
        assert!(matches!(result, Err(Error::Style(_))));
    }
}
