//! SQLite catalog introspection.
//!
//! Walks `sqlite_master` for every attached database, so `ATTACH`ed files
//! show up as separate schemas. SQLite has no users, jobs, procedures, or
//! functions; those collections load empty.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Connection;

use super::{CatalogProvider, ProviderError};
use crate::model::{
    Column, ColumnPair, DatabaseMetadata, DatabaseStatistics, ForeignKey, Index, IndexColumn,
    Table, TableKey, TableKind, TableSize, Trigger,
};

pub struct SqliteProvider;

impl CatalogProvider for SqliteProvider {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load(&self, connection: &str) -> Result<DatabaseMetadata, ProviderError> {
        let conn =
            Connection::open(connection).map_err(|e| ProviderError::Connect(e.to_string()))?;
        let metadata = read_metadata(&conn, connection)?;
        metadata
            .validate()
            .map_err(|e| ProviderError::MalformedModel(e.to_string()))?;
        Ok(metadata)
    }
}

pub(crate) fn read_metadata(
    conn: &Connection,
    source: &str,
) -> Result<DatabaseMetadata, ProviderError> {
    let mut tables = Vec::new();
    for schema in database_list(conn)? {
        tables.extend(read_tables(conn, &schema)?);
    }
    resolve_implicit_references(&mut tables);

    let statistics = read_statistics(conn, &tables)?;
    let database_name = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("main")
        .to_string();

    Ok(DatabaseMetadata {
        database_name,
        server_name: format!("SQLite {}", rusqlite::version()),
        tables,
        users: Vec::new(),
        jobs: Vec::new(),
        procedures: Vec::new(),
        functions: Vec::new(),
        statistics: Some(statistics),
    })
}

fn database_list(conn: &Connection) -> Result<Vec<String>, ProviderError> {
    let mut stmt = conn.prepare("PRAGMA database_list")?;
    let names: Vec<String> = stmt
        .query_map([], |row| row.get(1))?
        .collect::<Result<_, _>>()?;
    Ok(names.into_iter().filter(|n| n != "temp").collect())
}

fn read_tables(conn: &Connection, schema: &str) -> Result<Vec<Table>, ProviderError> {
    let sql = format!(
        "SELECT name, type, sql FROM {}.sqlite_master \
         WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' ORDER BY name",
        quote_ident(schema)
    );
    let mut stmt = conn.prepare(&sql)?;
    let raw: Vec<(String, String, Option<String>)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<_, _>>()?;

    let mut tables = Vec::new();
    for (name, kind, sql_text) in raw {
        let kind = if kind == "view" {
            TableKind::View
        } else {
            TableKind::Base
        };
        let is_base = kind == TableKind::Base;

        let columns = read_columns(conn, schema, &name)?;
        let foreign_keys = if is_base {
            read_foreign_keys(conn, schema, &name)?
        } else {
            Vec::new()
        };
        let indexes = if is_base {
            read_indexes(conn, schema, &name)?
        } else {
            Vec::new()
        };
        let triggers = read_triggers(conn, schema, &name)?;
        let row_count = if is_base {
            count_rows(conn, schema, &name)?
        } else {
            0
        };

        tables.push(Table {
            schema: schema.to_string(),
            name,
            kind,
            columns,
            foreign_keys,
            indexes,
            triggers,
            // Not exposed through the pragma surface.
            check_constraints: Vec::new(),
            row_count,
            definition: if is_base { None } else { sql_text },
        });
    }
    Ok(tables)
}

fn read_columns(conn: &Connection, schema: &str, table: &str) -> Result<Vec<Column>, ProviderError> {
    let sql = format!(
        "PRAGMA {}.table_info({})",
        quote_ident(schema),
        quote_ident(table)
    );
    let mut stmt = conn.prepare(&sql)?;
    let raw: Vec<(String, String, i64, Option<String>, i64)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(1)?, // name
                row.get(2)?, // declared type
                row.get(3)?, // notnull
                row.get(4)?, // default
                row.get(5)?, // pk ordinal (0 = not part of the pk)
            ))
        })?
        .collect::<Result<_, _>>()?;

    let mut columns: Vec<Column> = raw
        .into_iter()
        .map(|(name, declared, not_null, default_value, pk)| {
            let (data_type, max_length, precision, scale) = split_declared_type(&declared);
            Column {
                name,
                data_type,
                max_length,
                precision,
                scale,
                nullable: not_null == 0,
                primary_key: pk > 0,
                identity: false,
                default_value,
            }
        })
        .collect();

    // A lone INTEGER PRIMARY KEY aliases the rowid and auto-assigns.
    if columns.iter().filter(|c| c.primary_key).count() == 1 {
        if let Some(c) = columns.iter_mut().find(|c| c.primary_key) {
            if c.data_type.eq_ignore_ascii_case("integer") {
                c.identity = true;
            }
        }
    }

    Ok(columns)
}

fn read_foreign_keys(
    conn: &Connection,
    schema: &str,
    table: &str,
) -> Result<Vec<ForeignKey>, ProviderError> {
    let sql = format!(
        "PRAGMA {}.foreign_key_list({})",
        quote_ident(schema),
        quote_ident(table)
    );
    let mut stmt = conn.prepare(&sql)?;
    let raw: Vec<(i64, String, String, Option<String>, String, String)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?, // constraint id
                row.get(2)?, // referenced table
                row.get(3)?, // local column
                row.get(4)?, // referenced column; NULL for an implicit pk reference
                row.get(5)?, // on_update
                row.get(6)?, // on_delete
            ))
        })?
        .collect::<Result<_, _>>()?;

    // The pragma emits one row per column pair; group them back into
    // constraints by id. SQLite does not surface constraint names, so one
    // is synthesized from the table and the id.
    let mut grouped: std::collections::BTreeMap<i64, ForeignKey> = std::collections::BTreeMap::new();
    for (id, parent, from, to, on_update, on_delete) in raw {
        let entry = grouped.entry(id).or_insert_with(|| ForeignKey {
            name: format!("fk_{}_{}", table, id),
            // References never cross the owning database in SQLite.
            referenced_schema: schema.to_string(),
            referenced_table: parent.clone(),
            column_mappings: Vec::new(),
            on_delete: on_delete.clone(),
            on_update: on_update.clone(),
        });
        entry.column_mappings.push(ColumnPair {
            column: from,
            referenced_column: to.unwrap_or_default(),
        });
    }
    Ok(grouped.into_values().collect())
}

/// Fill in referenced columns that the pragma left NULL: an implicit
/// reference targets the parent table's primary key.
fn resolve_implicit_references(tables: &mut [Table]) {
    let pk_by_key: HashMap<TableKey, String> = tables
        .iter()
        .filter_map(|t| {
            let pk = t.columns.iter().find(|c| c.primary_key)?;
            Some((t.key(), pk.name.clone()))
        })
        .collect();

    for table in tables.iter_mut() {
        for fk in &mut table.foreign_keys {
            let target = fk.referenced_key();
            for mapping in &mut fk.column_mappings {
                if mapping.referenced_column.is_empty() {
                    if let Some(pk) = pk_by_key.get(&target) {
                        mapping.referenced_column = pk.clone();
                    }
                }
            }
        }
    }
}

fn read_indexes(conn: &Connection, schema: &str, table: &str) -> Result<Vec<Index>, ProviderError> {
    let sql = format!(
        "PRAGMA {}.index_list({})",
        quote_ident(schema),
        quote_ident(table)
    );
    let mut stmt = conn.prepare(&sql)?;
    let list: Vec<(String, i64, String)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(1)?, // name
                row.get(2)?, // unique
                row.get(3)?, // origin: c = CREATE INDEX, u = UNIQUE, pk
            ))
        })?
        .collect::<Result<_, _>>()?;

    let mut indexes = Vec::new();
    for (name, unique, origin) in list {
        let info_sql = format!(
            "PRAGMA {}.index_xinfo({})",
            quote_ident(schema),
            quote_ident(&name)
        );
        let mut info = conn.prepare(&info_sql)?;
        let raw: Vec<(Option<String>, i64, i64)> = info
            .query_map([], |row| {
                Ok((
                    row.get(2)?, // column name; NULL for rowid or expressions
                    row.get(3)?, // desc
                    row.get(5)?, // key: 1 for key columns, 0 for auxiliary
                ))
            })?
            .collect::<Result<_, _>>()?;

        let columns = raw
            .into_iter()
            .filter(|(_, _, key)| *key != 0)
            .filter_map(|(name, desc, _)| {
                name.map(|name| IndexColumn {
                    name,
                    descending: desc != 0,
                })
            })
            .collect();

        indexes.push(Index {
            name,
            unique: unique != 0,
            primary_key: origin == "pk",
            columns,
            included_columns: Vec::new(),
        });
    }
    Ok(indexes)
}

fn read_triggers(
    conn: &Connection,
    schema: &str,
    table: &str,
) -> Result<Vec<Trigger>, ProviderError> {
    let sql = format!(
        "SELECT name, sql FROM {}.sqlite_master \
         WHERE type = 'trigger' AND tbl_name = ?1 ORDER BY name",
        quote_ident(schema)
    );
    let mut stmt = conn.prepare(&sql)?;
    let raw: Vec<(String, Option<String>)> = stmt
        .query_map(rusqlite::params![table], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<_, _>>()?;

    Ok(raw
        .into_iter()
        .map(|(name, sql_text)| {
            let definition = sql_text.unwrap_or_default();
            Trigger {
                timing: trigger_timing(&definition),
                events: trigger_events(&definition),
                name,
                definition,
            }
        })
        .collect())
}

/// The clause between CREATE TRIGGER and the target table, where the
/// timing and event keywords live.
fn trigger_head(definition: &str) -> String {
    let upper = definition.to_uppercase();
    upper.split(" ON ").next().unwrap_or("").to_string()
}

fn trigger_timing(definition: &str) -> String {
    let head = trigger_head(definition);
    if head.contains("INSTEAD OF") {
        "INSTEAD OF"
    } else if head.contains("BEFORE") {
        "BEFORE"
    } else {
        "AFTER"
    }
    .to_string()
}

fn trigger_events(definition: &str) -> String {
    let head = trigger_head(definition);
    ["INSERT", "UPDATE", "DELETE"]
        .iter()
        .filter(|ev| head.contains(*ev))
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn count_rows(conn: &Connection, schema: &str, table: &str) -> Result<i64, ProviderError> {
    let sql = format!(
        "SELECT COUNT(*) FROM {}.{}",
        quote_ident(schema),
        quote_ident(table)
    );
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

fn read_statistics(
    conn: &Connection,
    tables: &[Table],
) -> Result<DatabaseStatistics, ProviderError> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |r| r.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |r| r.get(0))?;
    let freelist: i64 = conn.query_row("PRAGMA freelist_count", [], |r| r.get(0))?;
    const MB: f64 = 1024.0 * 1024.0;

    let mut largest: Vec<TableSize> = tables
        .iter()
        .filter(|t| t.kind == TableKind::Base)
        .map(|t| TableSize {
            schema: t.schema.clone(),
            name: t.name.clone(),
            row_count: t.row_count,
        })
        .collect();
    largest.sort_by(|a, b| {
        b.row_count
            .cmp(&a.row_count)
            .then_with(|| a.schema.cmp(&b.schema))
            .then_with(|| a.name.cmp(&b.name))
    });
    largest.truncate(10);

    Ok(DatabaseStatistics {
        database_size_mb: page_count as f64 * page_size as f64 / MB,
        unallocated_mb: freelist as f64 * page_size as f64 / MB,
        total_tables: tables.iter().filter(|t| t.kind == TableKind::Base).count() as i64,
        total_views: tables.iter().filter(|t| t.kind == TableKind::View).count() as i64,
        total_indexes: tables.iter().map(|t| t.indexes.len()).sum::<usize>() as i64,
        total_triggers: tables.iter().map(|t| t.triggers.len()).sum::<usize>() as i64,
        largest_tables: largest,
    })
}

/// Parse a declared type like `VARCHAR(50)` or `DECIMAL(10,2)` into a base
/// name plus length or precision/scale.
fn split_declared_type(declared: &str) -> (String, Option<i64>, Option<i64>, Option<i64>) {
    let declared = declared.trim();
    let open = match declared.find('(') {
        Some(i) => i,
        None => return (declared.to_string(), None, None, None),
    };
    let base = declared[..open].trim().to_string();
    let inner = declared[open + 1..].trim_end_matches(')');
    let parts: Vec<Option<i64>> = inner
        .split(',')
        .map(|p| p.trim().parse::<i64>().ok())
        .collect();
    match parts.as_slice() {
        [Some(len)] => (base, Some(*len), None, None),
        [Some(p), Some(s)] => (base, None, Some(*p), Some(*s)),
        _ => (base, None, None, None),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
