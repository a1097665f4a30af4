#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Definition store tests across persistence backends.

use std::sync::Arc;

use vetrina_kernel::StoreError;
use vetrina_kernel::store::{DefinitionStore, FileBackend, MemoryBackend, SettingsBackend};
use vetrina_test_utils::{definition, taxonomy};

async fn file_store(dir: &tempfile::TempDir) -> DefinitionStore {
    let backend: Arc<dyn SettingsBackend> =
        Arc::new(FileBackend::new(dir.path().join("settings.json")));
    DefinitionStore::load(backend).await.unwrap()
}

#[tokio::test]
async fn test_file_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = file_store(&dir).await;
    let added = store
        .add_definition(definition("projects", "Project", "Projects"))
        .await
        .unwrap();
    store
        .add_taxonomy("projects", taxonomy("project_tags", "Tag", "Tags"))
        .await
        .unwrap();

    let reopened = file_store(&dir).await;
    assert_eq!(reopened.revision(), 2);
    assert_eq!(reopened.definition("projects"), Some(&added));
    assert_eq!(reopened.record(), store.record());
}

#[tokio::test]
async fn test_insertion_order_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = file_store(&dir).await;
    for (slug, singular, plural) in [
        ("zebras", "Zebra", "Zebras"),
        ("apples", "Apple", "Apples"),
        ("mangos", "Mango", "Mangos"),
    ] {
        store
            .add_definition(definition(slug, singular, plural))
            .await
            .unwrap();
    }

    let reopened = file_store(&dir).await;
    let slugs: Vec<&str> = reopened.definitions().map(|d| d.slug.as_str()).collect();
    assert_eq!(slugs, vec!["zebras", "apples", "mangos"]);
    assert_eq!(reopened.position_of("mangos"), Some(2));
}

#[tokio::test]
async fn test_delete_definition_cascades_to_taxonomies() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = DefinitionStore::load(backend.clone()).await.unwrap();
    store
        .add_definition(definition("projects", "Project", "Projects"))
        .await
        .unwrap();
    store
        .add_taxonomy("projects", taxonomy("project_tags", "Tag", "Tags"))
        .await
        .unwrap();
    store
        .add_taxonomy("projects", taxonomy("project_types", "Type", "Types"))
        .await
        .unwrap();

    let removed = store.delete_definition("projects").await.unwrap().unwrap();
    assert_eq!(removed.definition.slug, "projects");
    assert_eq!(removed.taxonomies.len(), 2);

    assert!(store.definition("projects").is_none());
    assert_eq!(store.taxonomies().count(), 0);

    let persisted = backend.read().await.unwrap().unwrap();
    assert!(persisted.taxonomies.is_empty());
    assert!(persisted.post_types.is_empty());
}

#[tokio::test]
async fn test_unknown_owner_leaves_store_unchanged() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = DefinitionStore::load(backend.clone()).await.unwrap();
    store
        .add_definition(definition("projects", "Project", "Projects"))
        .await
        .unwrap();
    let before = store.record().clone();

    let err = store
        .add_taxonomy("missing", taxonomy("tags", "Tag", "Tags"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownOwner { ref owner } if owner == "missing"));
    assert_eq!(store.record(), &before);
    assert_eq!(backend.read().await.unwrap().unwrap(), before);
}

#[tokio::test]
async fn test_duplicate_slug_leaves_store_unchanged() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = DefinitionStore::load(backend.clone()).await.unwrap();
    store
        .add_definition(definition("projects", "Project", "Projects"))
        .await
        .unwrap();
    let before = store.record().clone();

    let err = store
        .add_definition(definition("Projects", "Other", "Others"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug { ref slug, owner: None } if slug == "projects"));
    assert_eq!(store.record(), &before);
    assert_eq!(store.definition("projects").unwrap().singular_label, "Project");
}

#[tokio::test]
async fn test_second_writer_gets_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = file_store(&dir).await;
    let mut second = file_store(&dir).await;

    first
        .add_definition(definition("projects", "Project", "Projects"))
        .await
        .unwrap();

    let err = second
        .add_definition(definition("events", "Event", "Events"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict {
            expected: 0,
            current: 1
        }
    ));
    assert!(second.definition("events").is_none());

    second.reload().await.unwrap();
    second
        .add_definition(definition("events", "Event", "Events"))
        .await
        .unwrap();

    let reopened = file_store(&dir).await;
    assert_eq!(reopened.definitions().count(), 2);
    assert_eq!(reopened.revision(), 2);
}

#[tokio::test]
async fn test_seed_defaults_only_on_empty_store() {
    let mut store = DefinitionStore::load(Arc::new(MemoryBackend::new()))
        .await
        .unwrap();
    assert!(store.seed_defaults().await.unwrap());
    assert!(!store.seed_defaults().await.unwrap());

    let services = store.definition("services").unwrap();
    assert_eq!(services.icon, "dashicons-superhero");
    let categories = store.taxonomy("services", "services_categories").unwrap();
    assert_eq!(categories.url_slug, "services-categories");
    assert!(categories.is_hierarchical);
}
