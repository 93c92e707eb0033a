use super::{map_json, map_slug_write, map_sqlx};
use crate::application::ports::time::Clock;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    CollectionView, Document, DocumentReadRepository, DocumentWriteRepository, FieldName,
    FilterValue, RecordId, SchemaName, SlugLookup, SlugQuery,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

/// Documents are stored as JSON bodies; slug values are mirrored into
/// `document_slugs`, whose unique constraint rejects duplicates per schema
/// and field.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: Arc<SqlitePool>,
    clock: Arc<dyn Clock>,
}

impl SqliteDocumentStore {
    pub fn new(pool: Arc<SqlitePool>, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: i64,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = DomainError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let fields: Map<String, Value> = serde_json::from_str(&row.body).map_err(map_json)?;
        Ok(Document {
            id: Some(RecordId::new(row.id)?),
            fields,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, view: &CollectionView) {
    let CollectionView::Where { field, value } = view else {
        return;
    };

    // json_extract alone is loosely typed (true = 1), so the JSON type is
    // matched as well, the same way `FilterValue::matches` does.
    let path = format!("$.{}", field.as_str());
    builder.push(" AND json_type(d.body, ");
    builder.push_bind(path.clone());
    builder.push(") = ");

    match value {
        FilterValue::Bool(flag) => {
            builder.push_bind(if *flag { "true" } else { "false" });
        }
        FilterValue::Int(number) => {
            builder.push_bind("integer");
            builder.push(" AND json_extract(d.body, ");
            builder.push_bind(path);
            builder.push(") = ");
            builder.push_bind(*number);
        }
        FilterValue::Text(text) => {
            builder.push_bind("text");
            builder.push(" AND json_extract(d.body, ");
            builder.push_bind(path);
            builder.push(") = ");
            builder.push_bind(text.clone());
        }
    }
}

#[async_trait]
impl SlugLookup for SqliteDocumentStore {
    async fn slug_taken(&self, query: SlugQuery<'_>) -> DomainResult<bool> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT EXISTS(SELECT 1 FROM document_slugs s JOIN documents d ON d.id = s.document_id WHERE s.schema_name = ",
        );
        builder.push_bind(query.schema.as_str().to_string());
        builder.push(" AND s.field = ");
        builder.push_bind(query.field.as_str().to_string());
        builder.push(" AND s.slug = ");
        builder.push_bind(query.candidate.to_string());

        if let Some(exclude) = query.exclude {
            builder.push(" AND s.document_id <> ");
            builder.push_bind(i64::from(exclude));
        }

        push_filter(&mut builder, query.view);
        builder.push(")");

        let taken: i64 = builder
            .build_query_scalar()
            .fetch_one(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(taken != 0)
    }
}

#[async_trait]
impl DocumentWriteRepository for SqliteDocumentStore {
    async fn persist(
        &self,
        schema: &SchemaName,
        unique_fields: &[FieldName],
        document: &Document,
    ) -> DomainResult<Document> {
        let now = self.clock.now();
        let body = serde_json::to_string(&document.fields).map_err(map_json)?;
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = match document.id {
            None => sqlx::query_as::<_, DocumentRow>(
                "INSERT INTO documents (schema_name, body, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id, body, created_at, updated_at",
            )
            .bind(schema.as_str())
            .bind(body.as_str())
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?,
            Some(id) => sqlx::query_as::<_, DocumentRow>(
                "UPDATE documents SET body = ?, updated_at = ? WHERE id = ? AND schema_name = ? RETURNING id, body, created_at, updated_at",
            )
            .bind(body.as_str())
            .bind(now)
            .bind(i64::from(id))
            .bind(schema.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("document not found".into()))?,
        };

        sqlx::query("DELETE FROM document_slugs WHERE document_id = ?")
            .bind(row.id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        for field in unique_fields {
            let Some(slug) = document.get_str(field.as_str()) else {
                continue;
            };
            sqlx::query(
                "INSERT INTO document_slugs (document_id, schema_name, field, slug) VALUES (?, ?, ?, ?)",
            )
            .bind(row.id)
            .bind(schema.as_str())
            .bind(field.as_str())
            .bind(slug)
            .execute(&mut *tx)
            .await
            .map_err(|err| map_slug_write(err, field))?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Document::try_from(row)
    }

    async fn delete(&self, schema: &SchemaName, id: RecordId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("DELETE FROM document_slugs WHERE document_id = ?")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        let result = sqlx::query("DELETE FROM documents WHERE id = ? AND schema_name = ?")
            .bind(i64::from(id))
            .bind(schema.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("document not found".into()));
        }
        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentReadRepository for SqliteDocumentStore {
    async fn find_by_id(&self, schema: &SchemaName, id: RecordId) -> DomainResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at, updated_at FROM documents WHERE id = ? AND schema_name = ?",
        )
        .bind(i64::from(id))
        .bind(schema.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Document::try_from).transpose()
    }

    async fn find_by_slug(
        &self,
        schema: &SchemaName,
        field: &FieldName,
        slug: &str,
    ) -> DomainResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT d.id, d.body, d.created_at, d.updated_at FROM documents d JOIN document_slugs s ON s.document_id = d.id WHERE s.schema_name = ? AND s.field = ? AND s.slug = ?",
        )
        .bind(schema.as_str())
        .bind(field.as_str())
        .bind(slug)
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Document::try_from).transpose()
    }
}
