//! Schema reflection
//!
//! The climate tables are created and populated outside this service. At
//! startup each expected table is looked up with `PRAGMA table_info` and
//! turned into an [`Entity`] handle. A missing table or column is fatal.

use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Expected shape of one mapped table.
#[derive(Debug, Clone, Copy)]
pub struct EntityDescriptor {
    /// Entity name used in logs and errors
    pub name: &'static str,
    pub table: &'static str,
    /// Columns the queries rely on; others are reflected but unused
    pub required: &'static [&'static str],
}

pub const MEASUREMENT: EntityDescriptor = EntityDescriptor {
    name: "Measurement",
    table: "measurement",
    required: &["station", "date", "prcp", "tobs"],
};

pub const STATION: EntityDescriptor = EntityDescriptor {
    name: "Station",
    table: "station",
    required: &["station", "name", "latitude", "longitude", "elevation"],
};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("table '{table}' not found (expected by {entity})")]
    MissingTable {
        entity: &'static str,
        table: &'static str,
    },

    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("reflection failed: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// One reflected column
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub name: String,
    /// Declared type as written in the DDL (may be empty in SQLite)
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Queryable handle for a reflected table
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub name: &'static str,
    pub table: String,
    pub columns: Vec<Column>,
}

impl Entity {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Quoted table identifier for SQL text.
    pub fn table_ident(&self) -> String {
        quote_ident(&self.table)
    }

    /// Quoted column identifier, using the name as stored in the database.
    pub fn column_ident(&self, name: &str) -> Result<String, SchemaError> {
        self.column(name)
            .map(|c| quote_ident(&c.name))
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.table.clone(),
                column: name.to_string(),
            })
    }
}

/// The two mapped entities
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub measurement: Entity,
    pub station: Entity,
}

impl Schema {
    /// Reflect both climate tables from a live pool.
    pub async fn reflect(pool: &SqlitePool) -> Result<Self, SchemaError> {
        let schema = Self {
            measurement: reflect_entity(pool, &MEASUREMENT).await?,
            station: reflect_entity(pool, &STATION).await?,
        };

        tracing::info!(
            measurement_columns = schema.measurement.columns.len(),
            station_columns = schema.station.columns.len(),
            "Schema reflected"
        );
        Ok(schema)
    }
}

/// Reflect one table and check it carries every required column.
pub async fn reflect_entity(
    pool: &SqlitePool,
    descriptor: &EntityDescriptor,
) -> Result<Entity, SchemaError> {
    let sql = format!("PRAGMA table_info({})", quote_ident(descriptor.table));
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    if rows.is_empty() {
        return Err(SchemaError::MissingTable {
            entity: descriptor.name,
            table: descriptor.table,
        });
    }

    let columns = rows
        .iter()
        .map(|r| {
            Ok(Column {
                name: r.try_get("name")?,
                decl_type: r.try_get("type")?,
                not_null: r.try_get::<i64, _>("notnull")? != 0,
                primary_key: r.try_get::<i64, _>("pk")? != 0,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    let entity = Entity {
        name: descriptor.name,
        table: descriptor.table.to_string(),
        columns,
    };

    for required in descriptor.required {
        entity.column_ident(required)?;
    }

    tracing::debug!(entity = entity.name, table = %entity.table, "Mapped entity");
    Ok(entity)
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
