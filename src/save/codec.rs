//! Item codec
//!
//! Converts live items to and from [`SerializedItem`], a flat record with no
//! live handles. Encoding copies the shared base fields once and then
//! attaches the variant payload; decoding rebuilds the base, checks the
//! payload against the kind, and re-resolves the image path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::items::{ImageHandle, Item, ItemBonus, ItemError, ItemId, ItemKind, ItemVariant, Rarity};

/// Resolves image paths into live handles
pub trait AssetResolver {
    /// Look up an image. `path` has its extension already stripped.
    fn resolve_image(&self, path: &str) -> Option<ImageHandle>;
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl AssetResolver for NullResolver {
    fn resolve_image(&self, _path: &str) -> Option<ImageHandle> {
        None
    }
}

/// Resolves images against files under an asset root, trying common extensions
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    const EXTENSIONS: [&'static str; 3] = ["png", "jpg", "jpeg"];

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for FsResolver {
    fn resolve_image(&self, path: &str) -> Option<ImageHandle> {
        FsResolver::EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{path}.{ext}")))
            .find(|candidate| candidate.is_file())
            .map(ImageHandle::new)
    }
}

/// Drop a trailing file extension, keeping any directories
pub fn strip_extension(path: &str) -> String {
    let p = Path::new(path);
    match (p.extension(), p.file_stem()) {
        (Some(_), Some(stem)) => match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                format!("{}/{}", parent.to_string_lossy(), stem.to_string_lossy())
            }
            _ => stem.to_string_lossy().into_owned(),
        },
        _ => path.to_string(),
    }
}

/// Flat, storable form of an [`Item`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedItem {
    pub name: String,
    pub id: ItemId,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub level: i32,
    pub value: i64,
    #[serde(default)]
    pub power_consumption: i32,
    pub max_stack: u32,
    pub current_stack: u32,
    #[serde(default)]
    pub bonuses: Vec<ItemBonus>,
    #[serde(flatten)]
    pub variant: ItemVariant,
}

impl SerializedItem {
    /// Encode an item: base fields, then the variant payload
    pub fn from_item(item: &Item) -> Self {
        let mut record = SerializedItem::base_of(item);
        record.variant = item.variant().clone();
        record
    }

    /// Copy of the shared base fields with an empty payload
    fn base_of(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            id: item.id,
            brand: item.brand.clone(),
            slug: item.slug.clone(),
            description: item.description.clone(),
            image_path: item.image_path.clone(),
            kind: item.kind(),
            rarity: item.rarity,
            level: item.level,
            value: item.value,
            power_consumption: item.power_consumption,
            max_stack: item.max_stack(),
            current_stack: item.current_stack(),
            bonuses: item.bonuses.clone(),
            variant: ItemVariant::Base,
        }
    }

    /// Decode into a live item.
    ///
    /// Fails only on data-integrity problems (payload/kind mismatch, stack
    /// overflow). A missing image just leaves the handle empty.
    pub fn to_item(&self, resolver: &dyn AssetResolver) -> Result<Item, ItemError> {
        let mut item = self.base_item(resolver)?;
        item.set_variant(self.variant.clone())?;
        Ok(item)
    }

    fn base_item(&self, resolver: &dyn AssetResolver) -> Result<Item, ItemError> {
        let mut item = Item::new(self.id, self.name.clone(), self.kind);
        item.brand = self.brand.clone();
        item.slug = self.slug.clone();
        item.description = self.description.clone();
        item.image_path = self.image_path.clone();
        item.rarity = self.rarity;
        item.level = self.level;
        item.value = self.value;
        item.power_consumption = self.power_consumption;
        item.set_stack(self.current_stack, self.max_stack)?;
        item.bonuses = self.bonuses.clone();

        if !self.image_path.is_empty() {
            item.image = resolver.resolve_image(&strip_extension(&self.image_path));
            if item.image.is_none() {
                log::debug!("Image '{}' for '{}' not found", self.image_path, self.name);
            }
        }
        Ok(item)
    }
}
