//! # Works Gallery
//!
//! Turns an XML feed of photographic works into a small static site that
//! browses the works by camera make and model.
//!
//! # Architecture: Parse, Then Render
//!
//! ```text
//! 1. Open     URL or path   →  buffered reader   (HTTP GET or local file)
//! 2. Build    reader        →  Catalog           (single streaming pass)
//! 3. Render   Catalog       →  pages in memory   (index, makes, models, nomake)
//! 4. Write    pages         →  output directory
//! ```
//!
//! The feed is parsed once, without building a document tree. Tokens flow
//! from [`tokens`] through a [`context::ContextStack`] into the
//! [`builder::WorkGraphBuilder`], which finalizes each work as soon as its
//! `</work>` closes. Nothing is written until the whole feed has parsed and
//! every page has rendered, so a malformed feed leaves no partial site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Opens the feed from an `http(s)://` URL or a local file |
//! | [`tokens`] | `quick-xml` events flattened into start, end and text tokens |
//! | [`context`] | Open-element stack, end-tag matching, `<url type>` discrimination |
//! | [`interner`] | Deduplicating registry of makes and their models |
//! | [`builder`] | Streaming state machine that links works, makes and models |
//! | [`types`] | The finished graph: [`types::Catalog`], works, makes, models |
//! | [`naming`] | Name normalization and slugs for page file names |
//! | [`render`] | Maud templates for every page, and writing them to disk |
//! | [`config`] | Optional `config.toml` layered over stock defaults |
//! | [`site`] | The end-to-end build used by the CLI |
//! | [`output`] | CLI output formatting of the catalog and written pages |
//!
//! # Graph Ownership
//!
//! The graph is cyclic in spirit (a work knows its make, a make lists its
//! works) but is stored without shared pointers: the [`types::Catalog`] owns
//! flat vectors and every cross-reference is a typed index (`WorkId`,
//! `MakeId`, `ModelId`). Models live inside their make, so a model can never
//! belong to two makes.

pub mod builder;
pub mod config;
pub mod context;
pub mod interner;
pub mod naming;
pub mod output;
pub mod render;
pub mod site;
pub mod source;
pub mod tokens;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
