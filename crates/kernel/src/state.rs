//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::content::{ContentStore, MemoryContentStore};
use crate::editor::EditorSurface;
use crate::registry::{Registrar, TypeRegistry};
use crate::render::Renderer;
use crate::store::{DefinitionStore, SettingsBackend, open_backend};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Definition store. Admin mutations hold the lock for the whole
    /// validate, persist and re-register cycle.
    store: Mutex<DefinitionStore>,

    /// Registered content types and taxonomies.
    registry: TypeRegistry,

    registrar: Registrar,

    /// Items and terms.
    content: Arc<dyn ContentStore>,

    renderer: Renderer,

    editor: EditorSurface,

    config: Config,
}

impl AppState {
    /// Create state with the configured settings backend and an in-memory
    /// content store.
    pub async fn new(config: &Config) -> Result<Self> {
        let backend = open_backend(config)
            .await
            .context("failed to open settings backend")?;
        let content: Arc<dyn ContentStore> = Arc::new(MemoryContentStore::new());
        Self::from_parts(config, backend, content).await
    }

    /// Create state from explicit collaborators.
    ///
    /// Loads the store, seeds defaults when configured, and registers every
    /// stored definition.
    pub async fn from_parts(
        config: &Config,
        backend: Arc<dyn SettingsBackend>,
        content: Arc<dyn ContentStore>,
    ) -> Result<Self> {
        let mut store = DefinitionStore::load(backend)
            .await
            .context("failed to load settings")?;

        if config.seed_defaults {
            store
                .seed_defaults()
                .await
                .context("failed to seed default definitions")?;
        }

        let registry = TypeRegistry::new();
        let registrar = Registrar::new(
            Arc::new(registry.clone()),
            config.type_prefix.clone(),
            config.menu_position_base,
            config.menu_position_step,
        );
        let summary = registrar.register_all(&store);

        let renderer = Renderer::new(registry.clone(), content.clone(), config.type_prefix.clone());
        let editor = EditorSurface::new(registry.clone(), content.clone(), renderer.clone());

        info!(
            backend = store.backend_name(),
            content_types = summary.content_types,
            taxonomies = summary.taxonomies,
            "application state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                store: Mutex::new(store),
                registry,
                registrar,
                content,
                renderer,
                editor,
                config: config.clone(),
            }),
        })
    }

    /// Get the definition store.
    pub fn store(&self) -> &Mutex<DefinitionStore> {
        &self.inner.store
    }

    /// Get the type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.inner.registry
    }

    /// Get the registrar.
    pub fn registrar(&self) -> &Registrar {
        &self.inner.registrar
    }

    /// Get the content store.
    pub fn content(&self) -> &Arc<dyn ContentStore> {
        &self.inner.content
    }

    /// Get the renderer.
    pub fn renderer(&self) -> &Renderer {
        &self.inner.renderer
    }

    /// Get the editor surface.
    pub fn editor(&self) -> &EditorSurface {
        &self.inner.editor
    }

    /// Bearer token required on admin routes, if any.
    pub fn admin_token(&self) -> Option<&str> {
        self.inner.config.admin_token.as_deref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
