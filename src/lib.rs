//! schemadoc: generate a browsable data dictionary and ER diagram from a
//! database catalog.

pub mod cli;
pub mod layout;
pub mod measure;
pub mod model;
pub mod paths;
pub mod provider;
pub mod scene;
pub mod site;
pub mod svg;

use layout::LayoutEngine;
use model::DatabaseMetadata;
use svg::SvgRenderer;

/// A rendered ER diagram and the canvas dimensions it occupies, ready for
/// embedding into a page.
pub struct RenderedDiagram {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

/// Lay out and render the ER diagram for one metadata snapshot.
pub fn render_diagram(metadata: &DatabaseMetadata) -> RenderedDiagram {
    let scene = LayoutEngine::default().layout(metadata);
    let svg = SvgRenderer::default().render(&scene);
    RenderedDiagram {
        svg,
        width: scene.width,
        height: scene.height,
    }
}
