//! Table metadata for the tables endpoint.
//!
//! These are gateway-issued queries, not caller statements, and they are
//! parameterized at the sqlx boundary.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};

/// One column of a user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One user table with its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    pub schema: String,
    pub columns: Vec<ColumnDescription>,
}

/// Lists base tables outside the system schemas, with column metadata.
pub async fn list_tables(pool: &PgPool) -> Result<Vec<TableDescription>, sqlx::Error> {
    let table_rows = sqlx::query(
        "SELECT table_schema, table_name \
         FROM information_schema.tables \
         WHERE table_type = 'BASE TABLE' \
           AND table_schema NOT IN ('pg_catalog', 'information_schema') \
         ORDER BY table_schema, table_name",
    )
    .fetch_all(pool)
    .await?;

    let mut tables = Vec::with_capacity(table_rows.len());
    for table_row in table_rows {
        let schema: String = table_row.try_get("table_schema")?;
        let name: String = table_row.try_get("table_name")?;

        let column_rows = sqlx::query(
            "SELECT column_name, data_type, is_nullable, column_default \
             FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 \
             ORDER BY ordinal_position",
        )
        .bind(&schema)
        .bind(&name)
        .fetch_all(pool)
        .await?;

        let mut columns = Vec::with_capacity(column_rows.len());
        for row in column_rows {
            let is_nullable: String = row.try_get("is_nullable")?;
            columns.push(ColumnDescription {
                name: row.try_get("column_name")?,
                data_type: row.try_get("data_type")?,
                nullable: is_nullable.eq_ignore_ascii_case("yes"),
                default: row.try_get("column_default")?,
            });
        }

        tables.push(TableDescription { schema, name, columns });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_serializes_type_field() {
        let column = ColumnDescription {
            name: "id".to_string(),
            data_type: "integer".to_string(),
            nullable: false,
            default: Some("nextval('t_id_seq')".to_string()),
        };
        let json = serde_json::to_string(&column).unwrap();
        assert!(json.contains("\"type\":\"integer\""));
        assert!(json.contains("\"nullable\":false"));
        assert!(json.contains("nextval"));
    }

    #[test]
    fn missing_default_is_omitted() {
        let column = ColumnDescription {
            name: "name".to_string(),
            data_type: "text".to_string(),
            nullable: true,
            default: None,
        };
        let json = serde_json::to_string(&column).unwrap();
        assert!(!json.contains("default"));
    }
}
