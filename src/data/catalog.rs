//! Item catalog
//!
//! Authored item definitions, one JSON file per item, grouped into a folder
//! per kind:
//!
//! ```text
//! assets/items/
//!   Personal Ranged Weapon/kessler-carbine.json
//!   Material/cobalt-ore.json
//! ```
//!
//! Any malformed file fails the whole load. A catalog that loads is valid.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::items::{Item, ItemError, ItemId, ItemKind};
use crate::save::{AssetResolver, SerializedItem};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid item in {path}: {source}")]
    InvalidItem { path: PathBuf, source: ItemError },
    #[error("{path} is a {found} but sits in the {folder} folder")]
    WrongFolder { path: PathBuf, folder: ItemKind, found: ItemKind },
    #[error("item id {id} used by both '{first}' and '{second}'")]
    DuplicateId { id: ItemId, first: String, second: String },
    #[error("slug '{slug}' used by both '{first}' and '{second}'")]
    DuplicateSlug { slug: String, first: String, second: String },
    #[error("kind {0:?} has no usable display name")]
    MissingDisplayName(ItemKind),
    #[error("no catalog item with slug '{0}'")]
    UnknownSlug(String),
}

/// All authored items, grouped by kind
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    by_kind: HashMap<ItemKind, Vec<usize>>,
    by_slug: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Build a catalog from in-memory items
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut catalog = Self { items, ..Default::default() };
        catalog.validate()?;
        catalog.reindex();
        Ok(catalog)
    }

    /// Load every kind folder under `root`.
    ///
    /// Missing folders just mean no items of that kind.
    pub fn load_from_dir(root: &Path, resolver: &dyn AssetResolver) -> Result<Self, CatalogError> {
        let mut items = Vec::new();

        for kind in ItemKind::ALL {
            let dir = root.join(kind.display_name());
            if !dir.is_dir() {
                log::debug!("No catalog folder for {}", kind);
                continue;
            }
            let loaded = Self::load_kind(&dir, kind, resolver)?;
            log::debug!("Loaded {} {} items", loaded.len(), kind);
            items.extend(loaded);
        }

        let catalog = Self::from_items(items)?;
        log::info!("Item catalog loaded: {} items from {}", catalog.len(), root.display());
        Ok(catalog)
    }

    fn load_kind(dir: &Path, kind: ItemKind, resolver: &dyn AssetResolver) -> Result<Vec<Item>, CatalogError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| CatalogError::Io { path, source }
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err(dir))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // Directory order is platform dependent
        paths.sort();

        let mut items = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(io_err(&path))?;
            let record: SerializedItem = serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;
            if record.kind != kind {
                return Err(CatalogError::WrongFolder { path, folder: kind, found: record.kind });
            }
            let item = record
                .to_item(resolver)
                .map_err(|source| CatalogError::InvalidItem { path: path.clone(), source })?;
            items.push(item);
        }
        Ok(items)
    }

    /// Write every item back out in the folder layout `load_from_dir` reads
    pub fn export_to_dir(&self, root: &Path) -> Result<(), CatalogError> {
        for item in &self.items {
            let dir = root.join(item.kind_name());
            fs::create_dir_all(&dir).map_err(|source| CatalogError::Io { path: dir.clone(), source })?;

            let path = dir.join(format!("{}.json", item.slug));
            let json = serde_json::to_string_pretty(&SerializedItem::from_item(item))
                .map_err(|source| CatalogError::Parse { path: path.clone(), source })?;
            fs::write(&path, json).map_err(|source| CatalogError::Io { path, source })?;
        }
        Ok(())
    }

    /// Check kind labels and item identity
    pub fn validate(&self) -> Result<(), CatalogError> {
        for kind in ItemKind::ALL {
            let name = kind.display_name();
            if name.is_empty() || ItemKind::from_display_name(name) != Some(kind) {
                return Err(CatalogError::MissingDisplayName(kind));
            }
        }

        let mut ids: HashMap<ItemId, &str> = HashMap::new();
        let mut slugs: HashMap<&str, &str> = HashMap::new();
        for item in &self.items {
            if let Some(first) = ids.insert(item.id, &item.name) {
                return Err(CatalogError::DuplicateId {
                    id: item.id,
                    first: first.to_string(),
                    second: item.name.clone(),
                });
            }
            if let Some(first) = slugs.insert(&item.slug, &item.name) {
                return Err(CatalogError::DuplicateSlug {
                    slug: item.slug.clone(),
                    first: first.to_string(),
                    second: item.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.by_kind.clear();
        self.by_slug.clear();
        for (index, item) in self.items.iter().enumerate() {
            self.by_kind.entry(item.kind()).or_default().push(index);
            self.by_slug.insert(item.slug.clone(), index);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items of a kind, in load order
    pub fn items_of_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.by_kind
            .get(&kind)
            .map(|indices| indices.iter().map(|&i| &self.items[i]).collect())
            .unwrap_or_default()
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Item> {
        self.by_slug.get(slug).map(|&i| &self.items[i])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// A fresh copy of a catalog item, ready to hand to an inventory
    pub fn instantiate(&self, slug: &str) -> Result<Item, CatalogError> {
        self.find_by_slug(slug)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownSlug(slug.to_string()))
    }
}
