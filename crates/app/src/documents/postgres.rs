//! `PostgreSQL` document store.
//!
//! Every collection shares the `documents` table; a document body is a JSONB
//! object and decimal fields are compared as `numeric` so range filters stay
//! exact.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, query, query_as, types::Json};
use uuid::Uuid;

use crate::documents::{
    decimal::DECIMAL_KEY,
    errors::DocumentStoreError,
    filter::{Condition, Filter},
    models::{Document, with_id, without_id},
    store::DocumentStore,
};

const INSERT_DOCUMENT_SQL: &str = include_str!("sql/insert_document.sql");
const FIND_DOCUMENT_SQL: &str = include_str!("sql/find_document.sql");
const UPDATE_DOCUMENT_SQL: &str = include_str!("sql/update_document.sql");
const DELETE_DOCUMENT_SQL: &str = include_str!("sql/delete_document.sql");

/// Matches the text forms `numeric` accepts, so a malformed value is skipped
/// instead of failing the cast.
const NUMERIC_PATTERN: &str = r"^\s*[-+]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?\s*$";

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    collection: String,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Self {
        Self {
            pool,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, document: Document) -> Result<Uuid, DocumentStoreError> {
        let id = Uuid::now_v7();

        query(INSERT_DOCUMENT_SQL)
            .bind(id)
            .bind(&self.collection)
            .bind(Json(without_id(document)))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Document>, DocumentStoreError> {
        let row: Option<(Uuid, Json<Document>)> = query_as(FIND_DOCUMENT_SQL)
            .bind(&self.collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, Json(body))| with_id(body, id)))
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>, DocumentStoreError> {
        let mut builder = find_query(&self.collection, filter);

        let rows: Vec<(Uuid, Json<Document>)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(body))| with_id(body, id))
            .collect())
    }

    async fn update_one(&self, id: Uuid, set: Document) -> Result<u64, DocumentStoreError> {
        let rows_affected = query(UPDATE_DOCUMENT_SQL)
            .bind(&self.collection)
            .bind(id)
            .bind(Json(without_id(set)))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn delete_one(&self, id: Uuid) -> Result<u64, DocumentStoreError> {
        let rows_affected = query(DELETE_DOCUMENT_SQL)
            .bind(&self.collection)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Compile a [`Filter`] into a parameterised select over one collection.
fn find_query<'a>(collection: &'a str, filter: &'a Filter) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
    builder.push_bind(collection);

    for (field, condition) in filter.clauses() {
        match condition {
            Condition::Eq(value) => {
                builder.push(" AND body -> ");
                builder.push_bind(field);
                builder.push(" = ");
                builder.push_bind(Json(value));
            }
            Condition::Range { gte, lte } => {
                if let Some(min) = gte {
                    builder.push(" AND ");
                    push_numeric(&mut builder, field);
                    builder.push(" >= ");
                    builder.push_bind(*min);
                }

                if let Some(max) = lte {
                    builder.push(" AND ");
                    push_numeric(&mut builder, field);
                    builder.push(" <= ");
                    builder.push_bind(*max);
                }
            }
        }
    }

    builder.push(" ORDER BY id");
    builder
}

/// Push an expression reading `field` as `numeric`, whether it is stored as
/// a decimal wrapper, a JSON number or a numeric string. Anything else reads
/// as `NULL` and so never satisfies a bound.
fn push_numeric<'a>(builder: &mut QueryBuilder<'a, Postgres>, field: &'a str) {
    builder.push("(CASE WHEN jsonb_typeof(body -> ");
    builder.push_bind(field);
    builder.push(") = 'number' THEN (body ->> ");
    builder.push_bind(field);
    builder.push(")::numeric WHEN COALESCE(body -> ");
    builder.push_bind(field);
    builder.push(" ->> ");
    builder.push_bind(DECIMAL_KEY);
    builder.push(", body ->> ");
    builder.push_bind(field);
    builder.push(") ~ ");
    builder.push_bind(NUMERIC_PATTERN);
    builder.push(" THEN (COALESCE(body -> ");
    builder.push_bind(field);
    builder.push(" ->> ");
    builder.push_bind(DECIMAL_KEY);
    builder.push(", body ->> ");
    builder.push_bind(field);
    builder.push("))::numeric END)");
}
