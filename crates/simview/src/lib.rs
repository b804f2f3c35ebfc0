//! SimView - Layout and rendering for converted block diagrams
//!
//! This library takes the response of a model-to-C conversion service, lays
//! out the block diagram it carries, and renders it to SVG. Diagrams with
//! source coordinates are rescaled into the canvas; diagrams without them are
//! arranged into topological layers.

pub mod config;
pub mod export;
pub mod layout;
pub mod response;
pub mod style;
pub mod view;

mod error;
mod structure;

pub use simview_core::{color, geometry, identifier, model};

pub use error::SimviewError;

use log::{debug, info, trace};

use config::AppConfig;
use export::svg::SvgBuilder;
use layout::Layout;
use model::Diagram;
use response::{ConversionResponse, ConversionResult};
use style::StyleMap;
use view::DiagramView;

/// Builder for decoding, laying out and rendering converted diagrams.
///
/// # Examples
///
/// ```rust
/// use simview::{DiagramBuilder, config::AppConfig};
///
/// let body = r#"{
///     "success": true,
///     "c_code": "int main(void) { return 0; }",
///     "diagram": {
///         "blocks": [
///             {"id": 1, "type": "Inport", "name": "In1", "x": 0, "y": 0},
///             {"id": 2, "type": "Gain", "name": "K", "x": 0, "y": 0}
///         ],
///         "connections": [{"from": 1, "to": 2}]
///     }
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let result = builder.decode(body).expect("Failed to decode");
///
/// let svg = builder
///     .render_svg(result.diagram())
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode a conversion service response.
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Decode`] for malformed JSON and
    /// [`SimviewError::Service`] if the service reported a failed conversion.
    pub fn decode(&self, body: &str) -> Result<ConversionResult, SimviewError> {
        info!(bytes = body.len(); "Decoding conversion response");
        let result = ConversionResponse::from_json(body)?.into_result()?;
        debug!(
            blocks = result.diagram().blocks().len(),
            connections = result.diagram().connections().len();
            "Conversion response decoded"
        );
        Ok(result)
    }

    /// Compute block positions for `diagram`.
    ///
    /// Layout never fails; malformed input degrades to a best-effort layout.
    pub fn layout(&self, diagram: &Diagram) -> Layout {
        let layout_config = self.config.layout();
        layout::Engine::from_config(layout_config).compute(
            diagram.blocks(),
            diagram.connections(),
            layout_config.canvas(),
        )
    }

    /// Lay out `diagram` and prepare it for rendering, fitted to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Style`] if a configured block color is invalid.
    pub fn view<'a>(&self, diagram: &'a Diagram) -> Result<DiagramView<'a>, SimviewError> {
        let styles = StyleMap::from_config(self.config.style()).map_err(SimviewError::Style)?;
        let layout = self.layout(diagram);
        trace!(layout:?; "Computed layout");

        let layout_config = self.config.layout();
        let mut view = DiagramView::new(
            diagram,
            &layout,
            &styles,
            layout_config.canvas(),
            layout_config.block_size(),
        );
        view.fit_to_canvas();
        Ok(view)
    }

    /// Render `diagram` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`SimviewError::Style`] if a configured color is invalid.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, SimviewError> {
        let view = self.view(diagram)?;
        let svg = SvgBuilder::new().with_style(self.config.style()).build()?;

        let output = svg.render_to_string(&view);
        info!(bytes = output.len(); "SVG rendered successfully");
        Ok(output)
    }
}
