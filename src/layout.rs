//! Placement and routing for the entity-relationship diagram.
//!
//! Base tables are grouped into one vertical column per schema, schemas
//! left to right and tables top to bottom, both in lexicographic order.
//! Foreign keys route as horizontal cubic curves anchored to the rows of
//! their first mapped column pair. The result is fully deterministic for
//! a given snapshot: sorted traversal everywhere, no randomness.

use crate::model::{DatabaseMetadata, Table, TableKey};
use crate::scene::{Point, Scene, SceneBox, SceneConnector, SceneRow, SchemaLabel};
use std::collections::BTreeMap;

pub struct LayoutEngine {
    pub table_width: f64,
    pub row_height: f64,
    pub header_height: f64,
    /// Outer canvas padding and inter-table stacking gap.
    pub padding: f64,
    /// Horizontal gap between schema columns.
    pub schema_spacing: f64,
    /// Vertical space reserved above each column for the schema label.
    pub schema_label_offset: f64,
    pub footer_margin: f64,
    /// Maximum rows drawn per table; the rest collapse into an overflow row.
    pub row_cap: usize,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            table_width: 250.0,
            row_height: 25.0,
            header_height: 35.0,
            padding: 20.0,
            schema_spacing: 100.0,
            schema_label_offset: 50.0,
            footer_margin: 10.0,
            row_cap: 15,
        }
    }
}

impl LayoutEngine {
    /// Rendered height of a table with `column_count` columns.
    pub fn table_height(&self, column_count: usize) -> f64 {
        let visible = column_count.min(self.row_cap);
        self.header_height + visible as f64 * self.row_height + self.footer_margin
    }

    /// Vertical center of row `row` in a box whose top edge is at `top`.
    fn row_center_y(&self, top: f64, row: usize) -> f64 {
        top + self.header_height + (row as f64 + 0.5) * self.row_height
    }

    /// Row a connector anchors to for `column` in `table`: the column's
    /// position clamped to the visible rows, or row 0 for absent names.
    fn anchor_row(&self, table: &Table, column: &str) -> usize {
        table
            .column_index(column)
            .unwrap_or(0)
            .min(self.row_cap - 1)
    }

    pub fn layout(&self, metadata: &DatabaseMetadata) -> Scene {
        let mut groups: BTreeMap<&str, Vec<&Table>> = BTreeMap::new();
        for table in metadata.base_tables() {
            groups.entry(table.schema.as_str()).or_default().push(table);
        }
        if groups.is_empty() {
            return Scene::empty();
        }
        for tables in groups.values_mut() {
            tables.sort_by(|a, b| a.name.cmp(&b.name));
        }

        // Place: one vertical band per schema, tables stacked inside it.
        let mut placed: Vec<(&Table, Point)> = Vec::new();
        let mut positions: BTreeMap<TableKey, Point> = BTreeMap::new();
        let mut labels = Vec::new();
        let mut schema_x = self.padding;
        let mut tallest_column: f64 = 0.0;

        for (i, (schema, tables)) in groups.iter().enumerate() {
            if i > 0 {
                schema_x += self.table_width + self.schema_spacing;
            }
            labels.push(SchemaLabel {
                name: (*schema).to_string(),
                x: schema_x,
                y: self.padding + 30.0,
            });

            let mut y = self.padding + self.schema_label_offset;
            for &table in tables {
                let pos = Point { x: schema_x, y };
                positions.insert(table.key(), pos);
                placed.push((table, pos));
                y += self.table_height(table.columns.len()) + self.padding;
            }
            tallest_column = tallest_column.max(y);
        }

        let width = schema_x + self.table_width + 2.0 * self.padding;
        let height = tallest_column + self.padding;

        let boxes = placed
            .iter()
            .map(|&(table, pos)| self.build_box(table, pos))
            .collect();

        // Connectors, in placement order so output is reproducible.
        let by_key: BTreeMap<TableKey, &Table> =
            placed.iter().map(|(t, _)| (t.key(), *t)).collect();
        let mut connectors = Vec::new();

        for &(table, pos) in &placed {
            for fk in &table.foreign_keys {
                let first = match fk.column_mappings.first() {
                    Some(m) => m,
                    // Malformed key; provider validation owns the failure.
                    None => continue,
                };
                let target_key = fk.referenced_key();
                let target = match by_key.get(&target_key) {
                    Some(t) => *t,
                    // Referenced table filtered out or cross-database.
                    None => continue,
                };
                let target_pos = positions[&target_key];

                let from = Point {
                    x: pos.x + self.table_width,
                    y: self.row_center_y(pos.y, self.anchor_row(table, &first.column)),
                };
                let to = Point {
                    x: target_pos.x,
                    y: self.row_center_y(
                        target_pos.y,
                        self.anchor_row(target, &first.referenced_column),
                    ),
                };
                let mid_x = (from.x + to.x) / 2.0;

                connectors.push(SceneConnector {
                    label: fk.name.clone(),
                    from,
                    ctrl1: Point { x: mid_x, y: from.y },
                    ctrl2: Point { x: mid_x, y: to.y },
                    to,
                });
            }
        }

        Scene {
            boxes,
            labels,
            connectors,
            width,
            height,
        }
    }

    fn build_box(&self, table: &Table, pos: Point) -> SceneBox {
        let visible = table.columns.len().min(self.row_cap);
        let rows = table.columns[..visible]
            .iter()
            .map(|c| SceneRow {
                name: c.name.clone(),
                type_desc: c.short_type(),
                primary_key: c.primary_key,
                foreign_key: table.is_fk_column(&c.name),
                nullable: c.nullable,
            })
            .collect();
        let overflow = table
            .columns
            .len()
            .checked_sub(self.row_cap)
            .filter(|n| *n > 0);

        SceneBox {
            key: table.key(),
            x: pos.x,
            y: pos.y,
            width: self.table_width,
            height: self.table_height(table.columns.len()),
            rows,
            overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnPair, ForeignKey, TableKind};

    fn column(name: &str, primary_key: bool) -> Column {
        Column {
            name: name.to_string(),
            data_type: "int".to_string(),
            primary_key,
            ..Column::default()
        }
    }

    fn table(schema: &str, name: &str, columns: Vec<Column>) -> Table {
        Table {
            schema: schema.to_string(),
            name: name.to_string(),
            columns,
            ..Table::default()
        }
    }

    fn fk(name: &str, schema: &str, table: &str, column: &str, referenced: &str) -> ForeignKey {
        ForeignKey {
            name: name.to_string(),
            referenced_schema: schema.to_string(),
            referenced_table: table.to_string(),
            column_mappings: vec![ColumnPair {
                column: column.to_string(),
                referenced_column: referenced.to_string(),
            }],
            ..ForeignKey::default()
        }
    }

    fn metadata(tables: Vec<Table>) -> DatabaseMetadata {
        DatabaseMetadata {
            tables,
            ..DatabaseMetadata::default()
        }
    }

    fn overlaps(a: &SceneBox, b: &SceneBox) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn test_empty_model_yields_sentinel() {
        let scene = LayoutEngine::default().layout(&metadata(vec![]));
        assert!(scene.is_empty());
        assert!(scene.connectors.is_empty());
        assert_eq!(scene.width, crate::scene::EMPTY_CANVAS_WIDTH);
        assert_eq!(scene.height, crate::scene::EMPTY_CANVAS_HEIGHT);
    }

    #[test]
    fn test_boxes_never_overlap_and_canvas_contains_them() {
        let md = metadata(vec![
            table("a", "t1", vec![column("id", true)]),
            table("a", "t2", (0..12).map(|i| column(&format!("c{}", i), i == 0)).collect()),
            table("b", "t3", vec![]),
            table("b", "t4", vec![column("id", true), column("x", false)]),
        ]);
        let scene = LayoutEngine::default().layout(&md);

        assert_eq!(scene.boxes.len(), 4);
        assert!(scene.connectors.is_empty());
        for (i, a) in scene.boxes.iter().enumerate() {
            for b in &scene.boxes[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.key, b.key);
            }
            assert!(a.x + a.width < scene.width);
            assert!(a.y + a.height < scene.height);
        }
    }

    #[test]
    fn test_schema_columns_ordered_regardless_of_input_order() {
        let shuffled = metadata(vec![
            table("zoo", "t", vec![]),
            table("app", "t", vec![]),
            table("mid", "t", vec![]),
        ]);
        let scene = LayoutEngine::default().layout(&shuffled);

        let x_of = |schema: &str| {
            scene
                .boxes
                .iter()
                .find(|b| b.key.schema == schema)
                .map(|b| b.x)
                .unwrap()
        };
        assert!(x_of("app") < x_of("mid"));
        assert!(x_of("mid") < x_of("zoo"));
    }

    #[test]
    fn test_tables_sorted_by_name_within_schema() {
        let md = metadata(vec![
            table("sales", "Order", vec![]),
            table("sales", "Customer", vec![]),
        ]);
        let scene = LayoutEngine::default().layout(&md);

        assert_eq!(scene.boxes[0].key.name, "Customer");
        assert_eq!(scene.boxes[1].key.name, "Order");
        assert!(scene.boxes[0].y < scene.boxes[1].y);
        assert_eq!(scene.boxes[0].x, scene.boxes[1].x);
    }

    #[test]
    fn test_row_cap_and_overflow() {
        let md = metadata(vec![table(
            "main",
            "wide",
            (0..20).map(|i| column(&format!("c{}", i), false)).collect(),
        )]);
        let scene = LayoutEngine::default().layout(&md);

        let bx = &scene.boxes[0];
        assert_eq!(bx.rows.len(), 15);
        assert_eq!(bx.overflow, Some(5));
        let engine = LayoutEngine::default();
        assert_eq!(bx.height, engine.table_height(20));
        assert_eq!(engine.table_height(20), engine.table_height(15));
    }

    #[test]
    fn test_zero_column_table_gets_header_only_box() {
        let engine = LayoutEngine::default();
        let md = metadata(vec![table("main", "empty", vec![])]);
        let scene = engine.layout(&md);

        assert_eq!(
            scene.boxes[0].height,
            engine.header_height + engine.footer_margin
        );
        assert!(scene.boxes[0].rows.is_empty());
        assert_eq!(scene.boxes[0].overflow, None);
    }

    #[test]
    fn test_fk_to_missing_table_is_dropped() {
        let mut child = table("main", "child", vec![column("parent_id", false)]);
        child.foreign_keys = vec![fk("fk_child_0", "main", "gone", "parent_id", "id")];
        let scene = LayoutEngine::default().layout(&metadata(vec![child]));

        assert_eq!(scene.boxes.len(), 1);
        assert!(scene.connectors.is_empty());
    }

    #[test]
    fn test_fk_to_view_is_dropped() {
        let mut child = table("main", "child", vec![column("v_id", false)]);
        child.foreign_keys = vec![fk("fk_child_0", "main", "v", "v_id", "id")];
        let mut view = table("main", "v", vec![column("id", true)]);
        view.kind = TableKind::View;

        let scene = LayoutEngine::default().layout(&metadata(vec![child, view]));
        assert_eq!(scene.boxes.len(), 1);
        assert!(scene.connectors.is_empty());
    }

    #[test]
    fn test_fk_with_no_mappings_is_skipped() {
        let mut child = table("main", "child", vec![column("id", true)]);
        child.foreign_keys = vec![ForeignKey {
            name: "broken".to_string(),
            referenced_schema: "main".to_string(),
            referenced_table: "parent".to_string(),
            ..ForeignKey::default()
        }];
        let parent = table("main", "parent", vec![column("id", true)]);

        let scene = LayoutEngine::default().layout(&metadata(vec![child, parent]));
        assert_eq!(scene.boxes.len(), 2);
        assert!(scene.connectors.is_empty());
    }

    #[test]
    fn test_order_customer_scenario() {
        let engine = LayoutEngine::default();
        let mut order = table(
            "sales",
            "Order",
            vec![column("OrderId", true), column("CustomerId", false)],
        );
        order.foreign_keys = vec![fk(
            "FK_Order_Customer",
            "sales",
            "Customer",
            "CustomerId",
            "CustomerId",
        )];
        let customer = table("sales", "Customer", vec![column("CustomerId", true)]);

        let scene = engine.layout(&metadata(vec![order, customer]));

        assert_eq!(scene.boxes.len(), 2);
        assert_eq!(scene.boxes[0].key.name, "Customer");
        assert_eq!(scene.boxes[1].key.name, "Order");
        assert_eq!(scene.connectors.len(), 1);

        let conn = &scene.connectors[0];
        assert_eq!(conn.label, "FK_Order_Customer");

        let order_box = &scene.boxes[1];
        let customer_box = &scene.boxes[0];
        // Anchored at Order's CustomerId row (index 1) on the right edge.
        assert_eq!(conn.from.x, order_box.x + order_box.width);
        assert_eq!(
            conn.from.y,
            order_box.y + engine.header_height + 1.5 * engine.row_height
        );
        // ...and at Customer's CustomerId row (index 0) on the left edge.
        assert_eq!(conn.to.x, customer_box.x);
        assert_eq!(
            conn.to.y,
            customer_box.y + engine.header_height + 0.5 * engine.row_height
        );
        // Symmetric S-curve: both control points at the horizontal midpoint.
        let mid_x = (conn.from.x + conn.to.x) / 2.0;
        assert_eq!(conn.ctrl1, Point { x: mid_x, y: conn.from.y });
        assert_eq!(conn.ctrl2, Point { x: mid_x, y: conn.to.y });
    }

    #[test]
    fn test_anchor_row_clamped_to_visible_rows() {
        let engine = LayoutEngine::default();
        let mut child = table(
            "main",
            "wide",
            (0..20).map(|i| column(&format!("c{}", i), false)).collect(),
        );
        child.foreign_keys = vec![fk("fk_wide_0", "main", "parent", "c19", "id")];
        let parent = table("main", "parent", vec![column("id", true)]);

        let scene = engine.layout(&metadata(vec![child, parent]));
        let conn = &scene.connectors[0];
        let child_box = scene.boxes.iter().find(|b| b.key.name == "wide").unwrap();

        // c19 sits past the cap, so the anchor clamps to the last visible row.
        assert_eq!(
            conn.from.y,
            child_box.y + engine.header_height + 14.5 * engine.row_height
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let build = || {
            let mut order = table(
                "sales",
                "Order",
                vec![column("OrderId", true), column("CustomerId", false)],
            );
            order.foreign_keys = vec![fk(
                "FK_Order_Customer",
                "sales",
                "Customer",
                "CustomerId",
                "CustomerId",
            )];
            metadata(vec![
                order,
                table("sales", "Customer", vec![column("CustomerId", true)]),
                table("ops", "Audit", vec![column("Id", true)]),
            ])
        };

        let a = LayoutEngine::default().layout(&build());
        let b = LayoutEngine::default().layout(&build());
        assert_eq!(a, b);
    }

    #[test]
    fn test_views_never_become_boxes() {
        let mut view = table("main", "v_orders", vec![column("id", true)]);
        view.kind = TableKind::View;
        let scene = LayoutEngine::default().layout(&metadata(vec![
            view,
            table("main", "orders", vec![column("id", true)]),
        ]));

        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.boxes[0].key.name, "orders");
    }
}
