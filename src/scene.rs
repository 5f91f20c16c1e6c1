//! Renderer-agnostic scene graph produced by one layout pass.
//!
//! Scene objects are owned by a single pass and discarded after rendering;
//! nothing here refers back into the metadata model except by `TableKey`.

use crate::model::TableKey;

/// Canvas size used when a snapshot has no base tables to draw.
pub const EMPTY_CANVAS_WIDTH: f64 = 800.0;
pub const EMPTY_CANVAS_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One visible column row inside a table box.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRow {
    pub name: String,
    pub type_desc: String,
    pub primary_key: bool,
    pub foreign_key: bool,
    pub nullable: bool,
}

/// A positioned table box with its visible rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBox {
    pub key: TableKey,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rows: Vec<SceneRow>,
    /// Count of columns beyond the visible cap, if any.
    pub overflow: Option<usize>,
}

/// A routed foreign-key connector: cubic curve from the source table's
/// right edge to the target table's left edge, anchored to column rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConnector {
    /// Constraint name, shown as the hover title.
    pub label: String,
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Heading drawn above each schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaLabel {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub boxes: Vec<SceneBox>,
    pub labels: Vec<SchemaLabel>,
    pub connectors: Vec<SceneConnector>,
    pub width: f64,
    pub height: f64,
}

impl Scene {
    /// The sentinel scene for a snapshot with no base tables. Renderers
    /// special-case this into a placeholder graphic.
    pub fn empty() -> Self {
        Scene {
            boxes: Vec::new(),
            labels: Vec::new(),
            connectors: Vec::new(),
            width: EMPTY_CANVAS_WIDTH,
            height: EMPTY_CANVAS_HEIGHT,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
