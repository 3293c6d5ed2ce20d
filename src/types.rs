//! Shared data model for the works graph.
//!
//! The graph is index-based: works live in the [`Catalog`]'s work list, makes
//! in its make list, and each model inside the make that owns it. Cross links
//! ([`WorkId`], [`MakeId`], [`ModelId`]) are plain copyable handles, so a work
//! can point at its make and model without shared ownership.
//!
//! ```text
//! Catalog
//! ├── works:   [Work, Work, ...]         ← owns every work, encounter order
//! ├── makes:   [Make, ...]               ← first-seen order
//! │   └── models: [Model, ...]           ← owned by their make
//! │       └── works: [WorkId, ...]       ← secondary index
//! └── no_make: [WorkId, ...]             ← works without a make
//! ```

/// Handle to a finalized work in [`Catalog::works`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkId(pub(crate) usize);

/// Handle to a make in [`Catalog::makes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MakeId(pub(crate) usize);

/// Handle to a model, scoped to the make that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId {
    pub(crate) make: MakeId,
    pub(crate) index: usize,
}

impl ModelId {
    /// The make this model belongs to.
    pub fn make(self) -> MakeId {
        self.make
    }
}

/// One photographic work read from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    /// Feed id, [`Work::UNSET_ID`] until an `<id>` is read.
    pub id: i64,
    pub filename: String,
    /// `small` URL variant.
    pub thumbnail_url: String,
    pub medium_url: String,
    pub large_url: String,
    pub make: Option<MakeId>,
    pub model: Option<ModelId>,
}

impl Work {
    pub const UNSET_ID: i64 = -1;

    pub fn new() -> Self {
        Self {
            id: Self::UNSET_ID,
            filename: String::new(),
            thumbnail_url: String::new(),
            medium_url: String::new(),
            large_url: String::new(),
            make: None,
            model: None,
        }
    }
}

impl Default for Work {
    fn default() -> Self {
        Self::new()
    }
}

/// A camera manufacturer, unique by name within one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Make {
    pub name: String,
    pub slug: String,
    pub models: Vec<Model>,
    pub works: Vec<WorkId>,
}

/// A camera model, unique by name within its make.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub slug: String,
    /// Back-reference to the owning make (lookup only).
    pub make: MakeId,
    pub works: Vec<WorkId>,
}

/// The finished works graph handed to the renderer.
///
/// Built once by [`crate::builder::WorkGraphBuilder`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub(crate) works: Vec<Work>,
    pub(crate) makes: Vec<Make>,
    pub(crate) no_make: Vec<WorkId>,
}

impl Catalog {
    /// All works in encounter order.
    pub fn works(&self) -> &[Work] {
        &self.works
    }

    /// All makes in first-seen order.
    pub fn makes(&self) -> &[Make] {
        &self.makes
    }

    /// Works that never resolved a make.
    pub fn no_make(&self) -> &[WorkId] {
        &self.no_make
    }

    pub fn work(&self, id: WorkId) -> &Work {
        &self.works[id.0]
    }

    pub fn make(&self, id: MakeId) -> &Make {
        &self.makes[id.0]
    }

    pub fn model(&self, id: ModelId) -> &Model {
        &self.makes[id.make.0].models[id.index]
    }

    /// Iterate makes together with their handles.
    pub fn make_ids(&self) -> impl Iterator<Item = (MakeId, &Make)> {
        self.makes.iter().enumerate().map(|(i, m)| (MakeId(i), m))
    }

    /// Iterate one make's models together with their handles.
    pub fn model_ids(&self, make: MakeId) -> impl Iterator<Item = (ModelId, &Model)> {
        self.makes[make.0]
            .models
            .iter()
            .enumerate()
            .map(move |(index, m)| (ModelId { make, index }, m))
    }

    /// Resolve a list of work handles.
    pub fn resolve<'a>(&'a self, ids: &'a [WorkId]) -> impl Iterator<Item = &'a Work> + 'a {
        ids.iter().map(|id| self.work(*id))
    }

    pub fn model_count(&self) -> usize {
        self.makes.iter().map(|m| m.models.len()).sum()
    }
}
