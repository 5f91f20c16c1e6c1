//! SVG rendering of a laid-out scene.
//!
//! A pure transform: identical scenes produce byte-identical documents.
//! Each table box is wrapped in a link to its site page; connectors carry
//! the constraint name as a hover title.

use crate::measure::truncate_display;
use crate::paths::table_page;
use crate::scene::{Scene, SceneBox, SceneConnector};
use std::fmt::Write;

/// Column names wider than this many display cells are shortened.
const NAME_DISPLAY_CELLS: usize = 20;

const STYLES: &str = r#"<style>
  .table-box { cursor: pointer; }
  .table-box:hover { filter: drop-shadow(0 4px 8px rgba(0,0,0,0.2)); }
  .table-header { fill: #2c3e50; stroke: #34495e; stroke-width: 2; }
  .table-body { fill: white; stroke: #34495e; stroke-width: 2; }
  .table-name { fill: white; font-family: 'Segoe UI', Arial, sans-serif; font-size: 14px; font-weight: bold; }
  .schema-name { fill: #95a5a6; font-family: 'Segoe UI', Arial, sans-serif; font-size: 11px; }
  .schema-label { fill: #2c3e50; font-family: 'Segoe UI', Arial, sans-serif; font-size: 16px; font-weight: bold; }
  .column-name { fill: #2c3e50; font-family: 'Consolas', 'Courier New', monospace; font-size: 12px; }
  .column-type { fill: #7f8c8d; font-family: 'Consolas', 'Courier New', monospace; font-size: 11px; }
  .pk-icon { fill: #f39c12; font-weight: bold; font-size: 12px; }
  .fk-icon { fill: #3498db; font-weight: bold; font-size: 12px; }
  .relationship-line { stroke: #3498db; stroke-width: 2; fill: none; opacity: 0.6; }
  .relationship-line:hover { stroke-width: 3; opacity: 1; }
</style>"#;

const MARKER_DEFS: &str = r##"<defs>
  <marker id="arrowhead" markerWidth="10" markerHeight="10" refX="8" refY="3" orient="auto">
    <polygon points="0 0, 10 3, 0 6" fill="#3498db" />
  </marker>
  <marker id="many" markerWidth="15" markerHeight="10" refX="0" refY="5" orient="auto">
    <line x1="0" y1="5" x2="10" y2="0" stroke="#3498db" stroke-width="2"/>
    <line x1="0" y1="5" x2="10" y2="10" stroke="#3498db" stroke-width="2"/>
  </marker>
</defs>"##;

pub struct SvgRenderer {
    header_height: f64,
    row_height: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            header_height: 35.0,
            row_height: 25.0,
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, scene: &Scene) -> String {
        if scene.is_empty() {
            return render_placeholder(scene);
        }

        let mut svg = String::new();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" height="{}" style="border: 1px solid #ddd; background: #f9f9f9;">"#,
            scene.width, scene.height, scene.height
        )
        .unwrap();
        svg.push_str(STYLES);
        svg.push('\n');
        svg.push_str(MARKER_DEFS);
        svg.push('\n');

        for label in &scene.labels {
            writeln!(
                &mut svg,
                r#"<text class="schema-label" x="{}" y="{}">{}</text>"#,
                label.x,
                label.y,
                escape_xml(&label.name)
            )
            .unwrap();
        }

        // Connectors first so they sit behind the boxes.
        for conn in &scene.connectors {
            self.render_connector(&mut svg, conn);
        }
        for bx in &scene.boxes {
            self.render_box(&mut svg, bx);
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_connector(&self, svg: &mut String, conn: &SceneConnector) {
        writeln!(
            svg,
            r#"<path class="relationship-line" d="M {},{} C {},{} {},{} {},{}" marker-start="url(#many)" marker-end="url(#arrowhead)"><title>{}</title></path>"#,
            conn.from.x,
            conn.from.y,
            conn.ctrl1.x,
            conn.ctrl1.y,
            conn.ctrl2.x,
            conn.ctrl2.y,
            conn.to.x,
            conn.to.y,
            escape_xml(&conn.label)
        )
        .unwrap();
    }

    fn render_box(&self, svg: &mut String, bx: &SceneBox) {
        writeln!(
            svg,
            r#"<a href="tables/{}">"#,
            table_page(&bx.key.schema, &bx.key.name)
        )
        .unwrap();
        writeln!(
            svg,
            r#"<g class="table-box" transform="translate({},{})">"#,
            bx.x, bx.y
        )
        .unwrap();

        // Header: rounded top, squared-off lower half.
        writeln!(
            svg,
            r#"<rect class="table-header" width="{}" height="{}" rx="5" ry="5"/>"#,
            bx.width, self.header_height
        )
        .unwrap();
        writeln!(
            svg,
            r#"<rect class="table-header" width="{}" height="{}" y="{}"/>"#,
            bx.width,
            self.header_height / 2.0,
            self.header_height / 2.0
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text class="schema-name" x="10" y="15">{}</text>"#,
            escape_xml(&bx.key.schema)
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text class="table-name" x="10" y="30">{}</text>"#,
            escape_xml(&bx.key.name)
        )
        .unwrap();

        writeln!(
            svg,
            r#"<rect class="table-body" y="{}" width="{}" height="{}"/>"#,
            self.header_height,
            bx.width,
            bx.height - self.header_height
        )
        .unwrap();

        let mut row_y = self.header_height + 20.0;
        for row in &bx.rows {
            if row.primary_key {
                writeln!(svg, r##"<text class="pk-icon" x="10" y="{}">&#128273;</text>"##, row_y)
                    .unwrap();
            } else if row.foreign_key {
                writeln!(svg, r##"<text class="fk-icon" x="10" y="{}">&#128279;</text>"##, row_y)
                    .unwrap();
            }

            let name_x = if row.primary_key || row.foreign_key {
                30.0
            } else {
                10.0
            };
            writeln!(
                svg,
                r#"<text class="column-name" x="{}" y="{}">{}</text>"#,
                name_x,
                row_y,
                escape_xml(&truncate_display(&row.name, NAME_DISPLAY_CELLS))
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="column-type" x="{}" y="{}" text-anchor="end">{}</text>"#,
                bx.width - 10.0,
                row_y,
                escape_xml(&row.type_desc)
            )
            .unwrap();

            row_y += self.row_height;
        }

        if let Some(n) = bx.overflow {
            writeln!(
                svg,
                r#"<text class="column-type" x="{}" y="{}" text-anchor="middle">... {} more columns</text>"#,
                bx.width / 2.0,
                row_y,
                n
            )
            .unwrap();
        }

        writeln!(svg, "</g>").unwrap();
        writeln!(svg, "</a>").unwrap();
    }
}

fn render_placeholder(scene: &Scene) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="100%" height="{h}">
<rect width="{w}" height="{h}" fill="#f9f9f9" stroke="#ddd"/>
<text x="{cx}" y="{cy}" text-anchor="middle" font-family="Arial" font-size="18" fill="#95a5a6">No tables available for ER diagram</text>
</svg>
"##,
        w = scene.width,
        h = scene.height,
        cx = scene.width / 2.0,
        cy = scene.height / 2.0,
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::model::{Column, DatabaseMetadata, Table};

    fn table(schema: &str, name: &str, columns: Vec<Column>) -> Table {
        Table {
            schema: schema.to_string(),
            name: name.to_string(),
            columns,
            ..Table::default()
        }
    }

    fn column(name: &str) -> Column {
        Column {
            name: name.to_string(),
            data_type: "int".to_string(),
            ..Column::default()
        }
    }

    fn render(tables: Vec<Table>) -> String {
        let md = DatabaseMetadata {
            tables,
            ..DatabaseMetadata::default()
        };
        let scene = LayoutEngine::default().layout(&md);
        SvgRenderer::default().render(&scene)
    }

    #[test]
    fn test_render_basic() {
        let svg = render(vec![table("sales", "Customer", vec![column("CustomerId")])]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("Customer"));
        assert!(svg.contains(r#"<a href="tables/sales_Customer.html">"#));
    }

    #[test]
    fn test_render_empty_placeholder() {
        let svg = render(vec![]);

        assert!(svg.contains("No tables available for ER diagram"));
        assert!(svg.contains(r#"viewBox="0 0 800 400""#));
        assert!(!svg.contains("table-box"));
        assert!(!svg.contains("relationship-line"));
    }

    #[test]
    fn test_render_escapes_names() {
        let svg = render(vec![table("main", "a<b", vec![column("x\"y&z")])]);

        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains("x&quot;y&amp;z"));
        assert!(!svg.contains("a<b"));
    }

    #[test]
    fn test_render_overflow_row() {
        let svg = render(vec![table(
            "main",
            "wide",
            (0..20).map(|i| column(&format!("c{}", i))).collect(),
        )]);

        assert!(svg.contains("... 5 more columns"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let build = || {
            render(vec![
                table("b", "two", vec![column("id")]),
                table("a", "one", vec![column("id")]),
            ])
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_connector_title_rendered() {
        use crate::model::{ColumnPair, ForeignKey};

        let mut order = table("sales", "Order", vec![column("CustomerId")]);
        order.foreign_keys = vec![ForeignKey {
            name: "FK_Order_Customer".to_string(),
            referenced_schema: "sales".to_string(),
            referenced_table: "Customer".to_string(),
            column_mappings: vec![ColumnPair {
                column: "CustomerId".to_string(),
                referenced_column: "CustomerId".to_string(),
            }],
            ..ForeignKey::default()
        }];
        let svg = render(vec![order, table("sales", "Customer", vec![column("CustomerId")])]);

        assert!(svg.contains("<title>FK_Order_Customer</title>"));
        assert!(svg.contains(r#"class="relationship-line""#));
    }
}
