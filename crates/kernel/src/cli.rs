//! Command-line interface.
//!
//! `serve` runs the HTTP server. The other commands work on the settings
//! store directly without starting the server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::models::Feature;
use crate::registry::{Registrar, TypeRegistry};
use crate::store::{DefinitionStore, open_backend};

/// Vetrina content type manager.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// List stored content types and taxonomies.
    List,
    /// Create the default "services" content type if the store is empty.
    Seed,
}

async fn open_store(config: &Config) -> Result<DefinitionStore> {
    let backend = open_backend(config).await?;
    DefinitionStore::load(backend)
        .await
        .context("failed to load settings")
}

/// Print stored definitions with their registration details.
pub async fn cmd_list(config: &Config) -> Result<()> {
    let store = open_store(config).await?;
    if store.is_empty() {
        println!("No content types defined.");
        return Ok(());
    }

    let registrar = Registrar::new(
        std::sync::Arc::new(TypeRegistry::new()),
        config.type_prefix.clone(),
        config.menu_position_base,
        config.menu_position_step,
    );

    println!(
        "{:<24} {:<28} {:<6} {:<20} FEATURES",
        "SLUG", "NAME", "MENU", "URL"
    );
    println!("{}", "-".repeat(96));

    for (index, definition) in store.definitions().enumerate() {
        let features: Vec<&str> = definition
            .supported_features
            .iter()
            .map(Feature::as_str)
            .collect();
        let url = format!("/{}/", definition.url_slug);
        println!(
            "{:<24} {:<28} {:<6} {:<20} {}",
            definition.slug,
            registrar.content_type_name(&definition.slug),
            registrar.menu_position(index),
            url,
            features.join(",")
        );

        for taxonomy in store.taxonomies_for(&definition.slug) {
            println!(
                "  - {:<20} {:<28} {:<6} /{}/",
                taxonomy.slug,
                registrar.taxonomy_name(&taxonomy.slug),
                "",
                taxonomy.url_slug
            );
        }
    }

    println!("\nrevision {}", store.revision());
    Ok(())
}

/// Seed the default definitions.
pub async fn cmd_seed(config: &Config) -> Result<()> {
    let mut store = open_store(config).await?;
    if store.seed_defaults().await? {
        println!("Default \"services\" content type created.");
    } else {
        println!("Store already has content types; nothing seeded.");
    }
    Ok(())
}
