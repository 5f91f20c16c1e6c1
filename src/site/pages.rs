//! Per-page HTML renderers. Each returns a complete document; the
//! generator decides where it lands on disk.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::html::{escape, page, yes_no};
use crate::model::{
    DatabaseMetadata, Function, Job, Procedure, Table, TableKind, User,
};
use crate::paths::{sanitize_file_name, table_page};

pub fn index(md: &DatabaseMetadata) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"card\">\n<h2>Database</h2>\n<div class=\"summary-grid\">\n");
    for (value, label) in [
        (md.base_tables().count(), "Tables"),
        (md.views().count(), "Views"),
        (md.procedures.len(), "Stored Procedures"),
        (md.functions.len(), "Functions"),
        (md.users.len(), "Users"),
        (md.jobs.len(), "Jobs"),
    ] {
        write!(
            body,
            "<div class=\"summary-item\"><div class=\"value\">{}</div><div class=\"label\">{}</div></div>\n",
            value, label
        )
        .unwrap();
    }
    body.push_str("</div>\n</div>\n");

    // Tables and views, grouped by schema in the diagram's order.
    let mut by_schema: BTreeMap<&str, Vec<&Table>> = BTreeMap::new();
    for table in &md.tables {
        by_schema.entry(table.schema.as_str()).or_default().push(table);
    }
    for tables in by_schema.values_mut() {
        tables.sort_by(|a, b| a.name.cmp(&b.name));
    }

    body.push_str("<div class=\"card\">\n<h2>Tables &amp; Views</h2>\n");
    for (schema, tables) in &by_schema {
        write!(body, "<h3>{}</h3>\n", escape(schema)).unwrap();
        body.push_str("<table>\n<tr><th>Name</th><th>Type</th><th>Columns</th><th>Rows</th></tr>\n");
        for table in tables {
            let rows = match table.kind {
                TableKind::Base => table.row_count.to_string(),
                TableKind::View => "-".to_string(),
            };
            write!(
                body,
                "<tr><td><a href=\"tables/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                table_page(&table.schema, &table.name),
                escape(&table.name),
                table.kind.label(),
                table.columns.len(),
                rows
            )
            .unwrap();
        }
        body.push_str("</table>\n");
    }
    body.push_str("</div>\n");

    if !md.procedures.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Stored Procedures</h2>\n<table>\n<tr><th>Name</th><th>Parameters</th></tr>\n");
        for proc in &md.procedures {
            write!(
                body,
                "<tr><td><a href=\"procedures/{}\">{}.{}</a></td><td>{}</td></tr>\n",
                table_page(&proc.schema, &proc.name),
                escape(&proc.schema),
                escape(&proc.name),
                proc.parameters.len()
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    if !md.functions.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Functions</h2>\n<table>\n<tr><th>Name</th><th>Type</th><th>Parameters</th></tr>\n");
        for func in &md.functions {
            write!(
                body,
                "<tr><td><a href=\"functions/{}\">{}.{}</a></td><td>{}</td><td>{}</td></tr>\n",
                table_page(&func.schema, &func.name),
                escape(&func.schema),
                escape(&func.name),
                escape(&func.kind),
                func.parameters.len()
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    if !md.users.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Users</h2>\n<table>\n<tr><th>Name</th><th>Type</th><th>Roles</th></tr>\n");
        for user in &md.users {
            write!(
                body,
                "<tr><td><a href=\"users/{}.html\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                sanitize_file_name(&user.name),
                escape(&user.name),
                escape(&user.kind),
                escape(&user.roles.join(", "))
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    if !md.jobs.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Jobs</h2>\n<table>\n<tr><th>Name</th><th>Enabled</th><th>Description</th></tr>\n");
        for job in &md.jobs {
            write!(
                body,
                "<tr><td><a href=\"jobs/{}.html\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                sanitize_file_name(&job.name),
                escape(&job.name),
                yes_no(job.enabled),
                escape(&job.description)
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    page(
        &md.database_name,
        &format!("Data dictionary - {}", md.server_name),
        0,
        &body,
    )
}

pub fn diagram(md: &DatabaseMetadata, svg: &str) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"card\">\n<h2>Entity-Relationship Diagram</h2>\n");
    body.push_str("<p class=\"muted\">Click a table to open its page. Hover a relationship for the constraint name.</p>\n");
    body.push_str("<div class=\"diagram-wrap\">\n");
    // The renderer escapes its own text content.
    body.push_str(svg);
    body.push_str("</div>\n</div>\n");

    page(
        &format!("{} - ER Diagram", md.database_name),
        &md.server_name,
        0,
        &body,
    )
}

pub fn statistics(md: &DatabaseMetadata) -> String {
    let mut body = String::new();

    match &md.statistics {
        None => {
            body.push_str("<div class=\"card\"><h2>Statistics</h2><p class=\"muted\">No statistics were collected for this database.</p></div>\n");
        }
        Some(stats) => {
            body.push_str("<div class=\"card\">\n<h2>Storage</h2>\n<div class=\"summary-grid\">\n");
            write!(
                body,
                "<div class=\"summary-item\"><div class=\"value\">{:.2} MB</div><div class=\"label\">Database Size</div></div>\n",
                stats.database_size_mb
            )
            .unwrap();
            write!(
                body,
                "<div class=\"summary-item\"><div class=\"value\">{:.2} MB</div><div class=\"label\">Unallocated</div></div>\n",
                stats.unallocated_mb
            )
            .unwrap();
            body.push_str("</div>\n</div>\n");

            body.push_str("<div class=\"card\">\n<h2>Objects</h2>\n<div class=\"summary-grid\">\n");
            for (value, label) in [
                (stats.total_tables, "Tables"),
                (stats.total_views, "Views"),
                (stats.total_indexes, "Indexes"),
                (stats.total_triggers, "Triggers"),
            ] {
                write!(
                    body,
                    "<div class=\"summary-item\"><div class=\"value\">{}</div><div class=\"label\">{}</div></div>\n",
                    value, label
                )
                .unwrap();
            }
            body.push_str("</div>\n</div>\n");

            if !stats.largest_tables.is_empty() {
                body.push_str("<div class=\"card\">\n<h2>Largest Tables</h2>\n<table>\n<tr><th>Table</th><th>Rows</th></tr>\n");
                for t in &stats.largest_tables {
                    write!(
                        body,
                        "<tr><td><a href=\"tables/{}\">{}.{}</a></td><td>{}</td></tr>\n",
                        table_page(&t.schema, &t.name),
                        escape(&t.schema),
                        escape(&t.name),
                        t.row_count
                    )
                    .unwrap();
                }
                body.push_str("</table>\n</div>\n");
            }
        }
    }

    page(
        &format!("{} - Statistics", md.database_name),
        &md.server_name,
        0,
        &body,
    )
}

pub fn table(table: &Table, md: &DatabaseMetadata) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"card\">\n<h2>Overview</h2>\n<div class=\"summary-grid\">\n");
    write!(
        body,
        "<div class=\"summary-item\"><div class=\"value\">{}</div><div class=\"label\">Type</div></div>\n",
        table.kind.label()
    )
    .unwrap();
    write!(
        body,
        "<div class=\"summary-item\"><div class=\"value\">{}</div><div class=\"label\">Columns</div></div>\n",
        table.columns.len()
    )
    .unwrap();
    if table.kind == TableKind::Base {
        write!(
            body,
            "<div class=\"summary-item\"><div class=\"value\">{}</div><div class=\"label\">Rows</div></div>\n",
            table.row_count
        )
        .unwrap();
    }
    body.push_str("</div>\n</div>\n");

    body.push_str("<div class=\"card\">\n<h2>Columns</h2>\n<table>\n<tr><th>#</th><th>Name</th><th>Type</th><th>Nullable</th><th>Identity</th><th>Default</th><th>Key</th></tr>\n");
    for (i, col) in table.columns.iter().enumerate() {
        let mut key = String::new();
        if col.primary_key {
            key.push_str("<span class=\"badge\">PK</span>");
        }
        if table.is_fk_column(&col.name) {
            key.push_str("<span class=\"badge\">FK</span>");
        }
        write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            escape(&col.name),
            escape(&col.short_type()),
            yes_no(col.nullable),
            yes_no(col.identity),
            escape(col.default_value.as_deref().unwrap_or("")),
            key
        )
        .unwrap();
    }
    body.push_str("</table>\n</div>\n");

    if !table.foreign_keys.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Foreign Keys</h2>\n<table>\n<tr><th>Name</th><th>Columns</th><th>References</th><th>On Delete</th><th>On Update</th></tr>\n");
        for fk in &table.foreign_keys {
            let mappings = fk
                .column_mappings
                .iter()
                .map(|m| format!("{} &rarr; {}", escape(&m.column), escape(&m.referenced_column)))
                .collect::<Vec<_>>()
                .join(", ");
            write!(
                body,
                "<tr><td>{}</td><td>{}</td><td><a href=\"{}\">{}.{}</a></td><td>{}</td><td>{}</td></tr>\n",
                escape(&fk.name),
                mappings,
                table_page(&fk.referenced_schema, &fk.referenced_table),
                escape(&fk.referenced_schema),
                escape(&fk.referenced_table),
                escape(&fk.on_delete),
                escape(&fk.on_update)
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    let referencing: Vec<&Table> = md
        .tables
        .iter()
        .filter(|t| {
            t.foreign_keys
                .iter()
                .any(|fk| fk.referenced_key() == table.key())
        })
        .collect();
    if !referencing.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Referenced By</h2>\n<table>\n<tr><th>Table</th><th>Constraint</th></tr>\n");
        for t in referencing {
            for fk in t
                .foreign_keys
                .iter()
                .filter(|fk| fk.referenced_key() == table.key())
            {
                write!(
                    body,
                    "<tr><td><a href=\"{}\">{}.{}</a></td><td>{}</td></tr>\n",
                    table_page(&t.schema, &t.name),
                    escape(&t.schema),
                    escape(&t.name),
                    escape(&fk.name)
                )
                .unwrap();
            }
        }
        body.push_str("</table>\n</div>\n");
    }

    if !table.indexes.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Indexes</h2>\n<table>\n<tr><th>Name</th><th>Unique</th><th>Primary Key</th><th>Columns</th></tr>\n");
        for idx in &table.indexes {
            let cols = idx
                .columns
                .iter()
                .map(|c| {
                    if c.descending {
                        format!("{} DESC", escape(&c.name))
                    } else {
                        escape(&c.name)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&idx.name),
                yes_no(idx.unique),
                yes_no(idx.primary_key),
                cols
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    if !table.triggers.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Triggers</h2>\n");
        for trg in &table.triggers {
            write!(
                body,
                "<h3>{} <span class=\"badge\">{}</span> <span class=\"badge\">{}</span></h3>\n<pre>{}</pre>\n",
                escape(&trg.name),
                escape(&trg.timing),
                escape(&trg.events),
                escape(&trg.definition)
            )
            .unwrap();
        }
        body.push_str("</div>\n");
    }

    if !table.check_constraints.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Check Constraints</h2>\n<table>\n<tr><th>Name</th><th>Definition</th></tr>\n");
        for check in &table.check_constraints {
            write!(
                body,
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(&check.name),
                escape(&check.definition)
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    if let Some(definition) = &table.definition {
        write!(
            body,
            "<div class=\"card\">\n<h2>Definition</h2>\n<pre>{}</pre>\n</div>\n",
            escape(definition)
        )
        .unwrap();
    }

    page(
        &format!("{}.{}", table.schema, table.name),
        &format!("{} in {}", table.kind.label(), md.database_name),
        1,
        &body,
    )
}

pub fn user(user: &User) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"card\">\n<h2>Roles</h2>\n");
    if user.roles.is_empty() {
        body.push_str("<p class=\"muted\">No role memberships.</p>\n");
    } else {
        for role in &user.roles {
            write!(body, "<span class=\"badge\">{}</span>\n", escape(role)).unwrap();
        }
    }
    body.push_str("</div>\n");

    if !user.permissions.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Permissions</h2>\n<table>\n<tr><th>Object</th><th>Permission</th><th>Grant</th></tr>\n");
        for perm in &user.permissions {
            write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&perm.object_name),
                escape(&perm.permission),
                escape(&perm.grant_type)
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    page(&user.name, &format!("User - {}", user.kind), 1, &body)
}

pub fn job(job: &Job) -> String {
    let mut body = String::new();

    write!(
        body,
        "<div class=\"card\">\n<h2>Job</h2>\n<p>Enabled: {}</p>\n<p>{}</p>\n</div>\n",
        yes_no(job.enabled),
        escape(&job.description)
    )
    .unwrap();

    if !job.schedules.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Schedules</h2>\n<table>\n<tr><th>Name</th><th>Enabled</th><th>Frequency</th><th>Start Time</th></tr>\n");
        for s in &job.schedules {
            write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&s.name),
                yes_no(s.enabled),
                escape(&s.frequency),
                escape(&s.start_time)
            )
            .unwrap();
        }
        body.push_str("</table>\n</div>\n");
    }

    if !job.steps.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Steps</h2>\n");
        for step in &job.steps {
            write!(
                body,
                "<h3>{}. {} <span class=\"badge\">{}</span></h3>\n<pre>{}</pre>\n",
                step.step_id,
                escape(&step.name),
                escape(&step.subsystem),
                escape(&step.command)
            )
            .unwrap();
        }
        body.push_str("</div>\n");
    }

    page(&job.name, "Scheduled job", 1, &body)
}

pub fn procedure(proc: &Procedure) -> String {
    let mut body = String::new();
    push_parameters(&mut body, &proc.parameters);
    write!(
        body,
        "<div class=\"card\">\n<h2>Definition</h2>\n<pre>{}</pre>\n</div>\n",
        escape(&proc.definition)
    )
    .unwrap();

    page(
        &format!("{}.{}", proc.schema, proc.name),
        "Stored procedure",
        1,
        &body,
    )
}

pub fn function(func: &Function) -> String {
    let mut body = String::new();
    push_parameters(&mut body, &func.parameters);
    write!(
        body,
        "<div class=\"card\">\n<h2>Definition</h2>\n<pre>{}</pre>\n</div>\n",
        escape(&func.definition)
    )
    .unwrap();

    page(
        &format!("{}.{}", func.schema, func.name),
        &format!("Function - {}", func.kind),
        1,
        &body,
    )
}

fn push_parameters(body: &mut String, parameters: &[crate::model::Parameter]) {
    if parameters.is_empty() {
        return;
    }
    body.push_str("<div class=\"card\">\n<h2>Parameters</h2>\n<table>\n<tr><th>Name</th><th>Type</th><th>Direction</th></tr>\n");
    for p in parameters {
        write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&p.name),
            escape(&p.data_type),
            if p.output { "OUTPUT" } else { "INPUT" }
        )
        .unwrap();
    }
    body.push_str("</table>\n</div>\n");
}
