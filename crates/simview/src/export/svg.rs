//! SVG rendering of a [`DiagramView`].
//!
//! The document uses the canvas as its view box. All diagram content sits in
//! a single group carrying the view's zoom transform: connections first, then
//! blocks on top.

use std::{borrow::Cow, io};

use log::{debug, info};
use svg::{self, node::element as svg_element};

use simview_core::{color::Color, geometry::Point};

use super::Exporter;
use crate::{
    SimviewError,
    config::StyleConfig,
    view::{DiagramView, PlacedBlock, ViewEdge},
};

/// Maximum number of characters shown for a block name
pub const NAME_LIMIT: usize = 13;

const ARROW_MARKER_ID: &str = "arrow";
const GLOW_FILTER_ID: &str = "glow";
const EDGE_COLOR: &str = "rgba(0, 212, 255, 0.5)";
const ARROW_COLOR: &str = "rgba(0, 212, 255, 0.8)";
const FONT_FAMILY: &str = "Courier New";
const CORNER_RADIUS: f32 = 8.0;

/// Height of a self-loop arc above the block outline.
const LOOP_HEIGHT: f32 = 36.0;

/// Shortens `name` to [`NAME_LIMIT`] characters followed by `…`.
///
/// # Examples
///
/// ```
/// use simview::export::svg::truncate_name;
///
/// assert_eq!(truncate_name("Gain"), "Gain");
/// assert_eq!(truncate_name("Discrete-Time Integrator"), "Discrete-Time…");
/// ```
pub fn truncate_name(name: &str) -> Cow<'_, str> {
    match name.char_indices().nth(NAME_LIMIT) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &name[..cut])),
        None => Cow::Borrowed(name),
    }
}

/// Builder for the [`Svg`] exporter.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the background color from `style`
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Style`] if the configured background color
    /// cannot be parsed.
    pub fn build(self) -> Result<Svg, SimviewError> {
        let background = match self.style {
            Some(style) => style.background_color().map_err(SimviewError::Style)?,
            None => None,
        };
        Ok(Svg { background })
    }
}

/// SVG exporter.
#[derive(Debug, Clone, Default)]
pub struct Svg {
    background: Option<Color>,
}

impl Svg {
    /// Renders `view` to an SVG document.
    pub fn render_view(&self, view: &DiagramView<'_>) -> svg::Document {
        let canvas = view.canvas();
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background),
            );
        }

        doc = doc.add(Self::definitions());

        let mut main_group = svg_element::Group::new()
            .set("class", "diagram")
            .set("transform", view.transform().to_svg_transform());

        for edge in view.edges() {
            main_group = main_group.add(self.render_edge(view, edge));
        }
        for placed in view.blocks() {
            main_group = main_group.add(self.render_block(view, placed));
        }

        debug!(
            blocks = view.blocks().len(),
            edges = view.edges().len();
            "SVG document rendered"
        );
        doc.add(main_group)
    }

    /// Renders `view` to an SVG string.
    pub fn render_to_string(&self, view: &DiagramView<'_>) -> String {
        self.render_view(view).to_string()
    }

    fn definitions() -> svg_element::Definitions {
        let marker = svg_element::Marker::new()
            .set("id", ARROW_MARKER_ID)
            .set("viewBox", "0 -5 10 10")
            .set("refX", 10)
            .set("refY", 0)
            .set("markerWidth", 7)
            .set("markerHeight", 7)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M0,-5L10,0L0,5")
                    .set("fill", ARROW_COLOR),
            );

        let glow = svg_element::Filter::new()
            .set("id", GLOW_FILTER_ID)
            .add(
                svg_element::FilterEffectGaussianBlur::new()
                    .set("stdDeviation", 3)
                    .set("result", "blur"),
            )
            .add(
                svg_element::FilterEffectMerge::new()
                    .add(svg_element::FilterEffectMergeNode::new().set("in", "blur"))
                    .add(svg_element::FilterEffectMergeNode::new().set("in", "SourceGraphic")),
            );

        svg_element::Definitions::new().add(marker).add(glow)
    }

    fn render_edge(&self, view: &DiagramView<'_>, edge: &ViewEdge) -> Box<dyn svg::Node> {
        let marker = format!("url(#{ARROW_MARKER_ID})");

        if edge.is_self_loop() {
            let (center, _) = edge.centers();
            let path = svg_element::Path::new()
                .set("d", Self::self_loop_path_data(center, view))
                .set("fill", "none")
                .set("stroke", EDGE_COLOR)
                .set("stroke-width", 2)
                .set("marker-end", marker);
            return Box::new(path);
        }

        let (start, end) = edge.clipped(view.block_size());
        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("stroke", EDGE_COLOR)
            .set("stroke-width", 2)
            .set("marker-end", marker);
        Box::new(line)
    }

    /// Arc leaving and re-entering the top edge of the block at `center`.
    fn self_loop_path_data(center: Point, view: &DiagramView<'_>) -> String {
        let size = view.block_size();
        let top = center.y() - size.height() / 2.0;
        let left = center.x() - size.width() / 4.0;
        let right = center.x() + size.width() / 4.0;
        let peak = top - LOOP_HEIGHT;

        format!("M {left} {top} C {left} {peak}, {right} {peak}, {right} {top}")
    }

    fn render_block(&self, view: &DiagramView<'_>, placed: &PlacedBlock<'_>) -> svg_element::Group {
        let size = view.block_size();
        let (width, height) = (size.width(), size.height());
        let top_left = placed
            .position()
            .sub_point(Point::new(width / 2.0, height / 2.0));
        let style = placed.style();
        let block = placed.block();

        let outline = svg_element::Rectangle::new()
            .set("width", width)
            .set("height", height)
            .set("rx", CORNER_RADIUS)
            .set("ry", CORNER_RADIUS)
            .set("fill", style.fill())
            .set("stroke", style.stroke())
            .set("stroke-width", 1.5)
            .set("filter", format!("url(#{GLOW_FILTER_ID})"));

        let type_label = svg_element::Text::new(block.block_type())
            .set("x", width / 2.0)
            .set("y", height * 0.35)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("fill", style.stroke())
            .set("font-size", 10)
            .set("font-family", FONT_FAMILY)
            .set("font-weight", "bold");

        let name_label = svg_element::Text::new(truncate_name(block.name()))
            .set("x", width / 2.0)
            .set("y", height * 0.68)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("fill", style.name_color())
            .set("font-size", 8)
            .set("font-family", FONT_FAMILY);

        svg_element::Group::new()
            .set("class", "block")
            .set("data-id", block.id().to_string())
            .set(
                "transform",
                format!("translate({}, {})", top_left.x(), top_left.y()),
            )
            .add(outline)
            .add(type_label)
            .add(name_label)
    }
}

impl Exporter for Svg {
    fn export_view(
        &self,
        view: &DiagramView<'_>,
        writer: &mut dyn io::Write,
    ) -> Result<(), SimviewError> {
        let doc = self.render_view(view);
        write!(writer, "{doc}")?;
        info!("SVG written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use simview_core::{
        geometry::Size,
        model::{Block, Connection, Diagram},
    };

    use super::*;
    use crate::{layout::compute_layout, style::StyleMap};

    fn render(diagram: &Diagram, svg: &Svg) -> String {
        let canvas = Size::new(800.0, 600.0);
        let layout = compute_layout(diagram.blocks(), diagram.connections(), canvas);
        let mut view = DiagramView::new(
            diagram,
            &layout,
            &StyleMap::default(),
            canvas,
            Size::new(100.0, 48.0),
        );
        view.fit_to_canvas();
        svg.render_to_string(&view)
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name(""), "");
        assert_eq!(truncate_name("ThirteenChars"), "ThirteenChars");
        assert_eq!(truncate_name("FourteenChars!"), "FourteenChars…");
        assert_eq!(truncate_name("ÄÖÜäöüßÄÖÜäöüß"), "ÄÖÜäöüßÄÖÜäöü…");
    }

    #[test]
    fn test_document_structure() {
        let diagram = Diagram::new(
            vec![
                Block::new("1", "Inport", "In1"),
                Block::new("2", "Gain", "VeryLongGainBlockName"),
                Block::new("3", "Lookup", "Table"),
            ],
            vec![
                Connection::new("1", "2"),
                Connection::new("2", "3"),
                Connection::new("2", "ghost"),
            ],
        );

        let output = render(&diagram, &Svg::default());

        assert!(output.contains(r#"viewBox="0 0 800 600""#));
        assert!(output.contains(r#"id="arrow""#));
        assert!(output.contains(r#"id="glow""#));
        assert_eq!(output.matches(r#"class="block""#).count(), 3);
        assert_eq!(output.matches("<line").count(), 2);
        assert!(output.contains("VeryLongGainB…"));
        assert!(!output.contains("<rect width=\"100%\""));
    }

    #[test]
    fn test_self_loop_renders_as_path() {
        let diagram = Diagram::new(
            vec![Block::new("a", "Integrator", "x")],
            vec![Connection::new("a", "a")],
        );

        let output = render(&diagram, &Svg::default());

        assert_eq!(output.matches("<line").count(), 0);
        assert!(output.contains(r#"marker-end="url(#arrow)""#));
    }

    #[test]
    fn test_background_from_style() {
        let style: StyleConfig = serde_json::from_str(r##"{"background_color": "#0a0e1a"}"##).unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();
        let diagram = Diagram::new(vec![Block::new("a", "Gain", "K")], Vec::new());

        let output = render(&diagram, &svg);

        assert!(output.contains(r#"height="100%""#));
    }

    #[test]
    fn test_invalid_background_is_style_error() {
        let style: StyleConfig = serde_json::from_str(r#"{"background_color": "nope"}"#).unwrap();
        assert!(matches!(
            SvgBuilder::new().with_style(&style).build(),
            Err(SimviewError::Style(_))
        ));
    }

    #[test]
    fn test_export_view_writes_document() {
        let canvas = Size::new(400.0, 300.0);
        let diagram = Diagram::new(vec![Block::new("a", "Gain", "K")], Vec::new());
        let layout = compute_layout(diagram.blocks(), diagram.connections(), canvas);
        let view = DiagramView::new(
            &diagram,
            &layout,
            &StyleMap::default(),
            canvas,
            Size::new(100.0, 48.0),
        );

        let mut buffer = Vec::new();
        Svg::default().export_view(&view, &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("<svg"));
        assert!(output.contains(r#"data-id="a""#));
    }
}
