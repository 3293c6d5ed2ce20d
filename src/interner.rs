//! Make and model registries.
//!
//! Makes and models are interned as the feed is scanned: the first time a
//! normalized name is seen a new entry is appended, every later lookup returns
//! the same handle. Handles are indices, so an entry's identity never changes
//! once it has been handed out.
//!
//! Lookups are linear scans over the registry (makes) or over one make's
//! models. A personal catalog has a handful of cameras, so a map would buy
//! nothing; the handle-based API would not change if one were added.

use crate::naming::{GENERIC_MAKE, GENERIC_MODEL, normalize_name, slugify};
use crate::types::{Make, MakeId, Model, ModelId};

#[derive(Debug, Default)]
pub struct Registry {
    makes: Vec<Make>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the make for `raw`, creating it on first sight.
    ///
    /// Names are trimmed; a blank name becomes [`GENERIC_MAKE`]. Matching is
    /// exact and case-sensitive.
    pub fn intern_make(&mut self, raw: &str) -> MakeId {
        let name = normalize_name(raw, GENERIC_MAKE);
        if let Some(index) = self.makes.iter().position(|m| m.name == name) {
            return MakeId(index);
        }

        let id = MakeId(self.makes.len());
        tracing::debug!(make = %name, "new make");
        self.makes.push(Make {
            slug: slugify(&name),
            name,
            models: Vec::new(),
            works: Vec::new(),
        });
        id
    }

    /// Return the model for `raw` within `make`, creating it on first sight.
    ///
    /// Uniqueness is scoped to the make: the same model name under two makes
    /// gives two models.
    pub fn intern_model(&mut self, raw: &str, make: MakeId) -> ModelId {
        let name = normalize_name(raw, GENERIC_MODEL);
        let owner = &mut self.makes[make.0];
        if let Some(index) = owner.models.iter().position(|m| m.name == name) {
            return ModelId { make, index };
        }

        let index = owner.models.len();
        tracing::debug!(make = %owner.name, model = %name, "new model");
        owner.models.push(Model {
            slug: slugify(&name),
            name,
            make,
            works: Vec::new(),
        });
        ModelId { make, index }
    }

    pub fn make(&self, id: MakeId) -> &Make {
        &self.makes[id.0]
    }

    pub(crate) fn make_mut(&mut self, id: MakeId) -> &mut Make {
        &mut self.makes[id.0]
    }

    pub(crate) fn model_mut(&mut self, id: ModelId) -> &mut Model {
        &mut self.makes[id.make.0].models[id.index]
    }

    pub(crate) fn len(&self) -> usize {
        self.makes.len()
    }

    pub(crate) fn into_makes(self) -> Vec<Make> {
        self.makes
    }
}
