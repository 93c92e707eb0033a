use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::slug_conflict;
use crate::application::ports::time::Clock;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    Document, DocumentReadRepository, DocumentWriteRepository, FieldName, RecordId, SchemaName,
    SlugLookup, SlugQuery,
};

#[derive(Default)]
struct StoreState {
    next_id: i64,
    collections: HashMap<SchemaName, BTreeMap<RecordId, Document>>,
}

/// Process-local document store. Enforces slug uniqueness per schema and
/// field on every write, like a unique index would.
pub struct InMemoryDocumentStore {
    clock: Arc<dyn Clock>,
    state: RwLock<StoreState>,
}

impl InMemoryDocumentStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub async fn len(&self, schema: &SchemaName) -> usize {
        self.state
            .read()
            .await
            .collections
            .get(schema)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

fn holds_value(document: &Document, field: &FieldName, value: &str) -> bool {
    document.get_str(field.as_str()) == Some(value)
}

#[async_trait]
impl SlugLookup for InMemoryDocumentStore {
    async fn slug_taken(&self, query: SlugQuery<'_>) -> DomainResult<bool> {
        let state = self.state.read().await;
        let Some(collection) = state.collections.get(query.schema) else {
            return Ok(false);
        };

        Ok(collection.values().any(|doc| {
            doc.id != query.exclude
                && query.view.contains(&doc.fields)
                && holds_value(doc, query.field, query.candidate)
        }))
    }
}

#[async_trait]
impl DocumentWriteRepository for InMemoryDocumentStore {
    async fn persist(
        &self,
        schema: &SchemaName,
        unique_fields: &[FieldName],
        document: &Document,
    ) -> DomainResult<Document> {
        let now = self.clock.now();
        let mut state = self.state.write().await;
        let StoreState {
            next_id,
            collections,
        } = &mut *state;
        let collection = collections.entry(schema.clone()).or_default();

        for field in unique_fields {
            let Some(value) = document.get_str(field.as_str()) else {
                continue;
            };
            let clash = collection
                .values()
                .any(|other| other.id != document.id && holds_value(other, field, value));
            if clash {
                return Err(slug_conflict(field));
            }
        }

        let mut saved = document.clone();
        match document.id {
            Some(id) => {
                let existing = collection
                    .get(&id)
                    .ok_or_else(|| DomainError::NotFound("document not found".into()))?;
                saved.created_at = existing.created_at;
            }
            None => {
                *next_id += 1;
                saved.id = Some(RecordId::new(*next_id)?);
                saved.created_at = Some(now);
            }
        }
        saved.updated_at = Some(now);

        if let Some(id) = saved.id {
            collection.insert(id, saved.clone());
        }
        Ok(saved)
    }

    async fn delete(&self, schema: &SchemaName, id: RecordId) -> DomainResult<()> {
        let mut state = self.state.write().await;
        state
            .collections
            .get_mut(schema)
            .and_then(|collection| collection.remove(&id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("document not found".into()))
    }
}

#[async_trait]
impl DocumentReadRepository for InMemoryDocumentStore {
    async fn find_by_id(&self, schema: &SchemaName, id: RecordId) -> DomainResult<Option<Document>> {
        let state = self.state.read().await;
        Ok(state
            .collections
            .get(schema)
            .and_then(|collection| collection.get(&id))
            .cloned())
    }

    async fn find_by_slug(
        &self,
        schema: &SchemaName,
        field: &FieldName,
        slug: &str,
    ) -> DomainResult<Option<Document>> {
        let state = self.state.read().await;
        Ok(state.collections.get(schema).and_then(|collection| {
            collection
                .values()
                .find(|doc| holds_value(doc, field, slug))
                .cloned()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::CollectionView;
    use crate::infrastructure::time::FixedClock;
    use chrono::{TimeZone, Utc};

    fn store() -> InMemoryDocumentStore {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        InMemoryDocumentStore::new(Arc::new(clock))
    }

    fn pages() -> SchemaName {
        SchemaName::new("pages").unwrap()
    }

    fn slug_field() -> FieldName {
        FieldName::new("slug").unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_timestamps() {
        let store = store();
        let saved = store
            .persist(&pages(), &[slug_field()], &Document::new().with("slug", "a"))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(RecordId(1)));
        assert!(saved.created_at.is_some());
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(store.len(&pages()).await, 1);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = store();
        let doc = Document::new().with("slug", "a");
        store.persist(&pages(), &[slug_field()], &doc).await.unwrap();
        let err = store
            .persist(&pages(), &[slug_field()], &doc)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref msg) if msg.contains("`slug`")));
    }

    #[tokio::test]
    async fn update_of_own_slug_is_not_a_conflict() {
        let store = store();
        let saved = store
            .persist(&pages(), &[slug_field()], &Document::new().with("slug", "a"))
            .await
            .unwrap();
        let again = store
            .persist(&pages(), &[slug_field()], &saved.clone().with("title", "A"))
            .await
            .unwrap();
        assert_eq!(again.id, saved.id);
        assert_eq!(again.get_str("title"), Some("A"));
    }

    #[tokio::test]
    async fn lookup_honours_view_and_exclusion() {
        let store = store();
        let draft = store
            .persist(
                &pages(),
                &[slug_field()],
                &Document::new().with("slug", "front-page").with("is_draft", true),
            )
            .await
            .unwrap();

        let schema = pages();
        let field = slug_field();
        let all = CollectionView::All;
        let published = CollectionView::filtered(FieldName::new("is_draft").unwrap(), false);

        let taken = |view, exclude| {
            store.slug_taken(SlugQuery {
                schema: &schema,
                field: &field,
                candidate: "front-page",
                view,
                exclude,
            })
        };

        assert!(taken(&all, None).await.unwrap());
        assert!(!taken(&published, None).await.unwrap());
        assert!(!taken(&all, draft.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let store = store();
        let saved = store
            .persist(&pages(), &[slug_field()], &Document::new().with("slug", "a"))
            .await
            .unwrap();
        store.delete(&pages(), saved.id.unwrap()).await.unwrap();
        assert!(store.find_by_slug(&pages(), &slug_field(), "a").await.unwrap().is_none());
        assert!(matches!(
            store.delete(&pages(), saved.id.unwrap()).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
