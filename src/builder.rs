//! Streaming construction of the works graph.
//!
//! [`WorkGraphBuilder`] consumes [`Token`]s one at a time and assembles a
//! [`Catalog`] without ever holding the document. It is a two-state machine:
//!
//! ```text
//!            <work>                      </work>
//!   Idle ──────────────▶ InWork(pending) ──────────▶ Idle   (work finalized)
//! ```
//!
//! While a work is open, text tokens are routed by the innermost element:
//!
//! | Element    | Effect |
//! |------------|--------|
//! | `id`       | parsed as an integer, failure is fatal |
//! | `filename` | trimmed and stored |
//! | `model`    | trimmed and held as the pending model name |
//! | `make`     | make interned; a pending model is interned under it |
//! | `url`      | stored in the field named by the size discriminator |
//!
//! Other text (indentation, wrapper elements) is ignored.
//!
//! ## Model before make
//!
//! A model is only meaningful inside its make, so the feed is expected to
//! list `<model>` before `<make>` within a work (as camera EXIF dumps do). The
//! model name waits until the make text arrives and is resolved then. A
//! model with no make after it stays unlinked when the work closes.
//!
//! ## Finalization
//!
//! On `</work>` the work is appended to the catalog and, in the same step,
//! to its make's and model's work lists, or to the no-make list when it
//! never resolved a make. Nothing is visible before that.
//!
//! ## Strictness
//!
//! Every inconsistency aborts the parse: unbalanced tags, a `<work>` inside
//! a `<work>`, a non-numeric id, field text outside any work, and elements
//! left open at end of input.

use crate::context::{ContextStack, StructuralError, UrlKind};
use crate::interner::Registry;
use crate::tokens::{Token, TokenError, TokenStream};
use crate::types::{Catalog, MakeId, Work, WorkId};
use std::io::BufRead;
use thiserror::Error;

/// Element that delimits one work.
pub const WORK_ELEMENT: &str = "work";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("malformed XML: {0}")]
    Structural(#[from] StructuralError),
    #[error("malformed XML: <work> opened inside another <work>")]
    NestedWork,
    #[error("malformed XML: feed ended while <{0}> was still open")]
    Unclosed(String),
    #[error("invalid <{field}> value {value:?}: {reason}")]
    FieldFormat {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("<{field}> value {value:?} found outside any <work>")]
    OrphanField { field: &'static str, value: String },
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Elements whose text populates a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Filename,
    Make,
    Model,
    Url,
}

impl Field {
    fn from_element(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "filename" => Some(Self::Filename),
            "make" => Some(Self::Make),
            "model" => Some(Self::Model),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    fn element(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Filename => "filename",
            Self::Make => "make",
            Self::Model => "model",
            Self::Url => "url",
        }
    }
}

/// A work under construction.
#[derive(Debug)]
struct PendingWork {
    work: Work,
    /// Model name read before its make (`ModelPending`).
    model_name: Option<String>,
}

#[derive(Debug)]
enum BuildState {
    Idle,
    InWork(Box<PendingWork>),
}

/// Single-use builder owning the registries and in-progress state of one
/// parse.
#[derive(Debug)]
pub struct WorkGraphBuilder {
    context: ContextStack,
    registry: Registry,
    works: Vec<Work>,
    no_make: Vec<WorkId>,
    state: BuildState,
}

impl Default for WorkGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkGraphBuilder {
    pub fn new() -> Self {
        Self {
            context: ContextStack::new(),
            registry: Registry::new(),
            works: Vec::new(),
            no_make: Vec::new(),
            state: BuildState::Idle,
        }
    }

    /// Apply one token.
    pub fn feed(&mut self, token: Token) -> Result<(), FeedError> {
        match token {
            Token::Start { name, attributes } => self.start(&name, &attributes),
            Token::End { name } => self.end(&name),
            Token::Text(text) => self.text(&text),
        }
    }

    /// Close the parse and hand out the finished graph.
    pub fn finish(self) -> Result<Catalog, FeedError> {
        if let Some(open) = self.context.current() {
            return Err(FeedError::Unclosed(open.to_string()));
        }
        tracing::debug!(
            works = self.works.len(),
            makes = self.registry.len(),
            no_make = self.no_make.len(),
            "works graph complete"
        );
        Ok(Catalog {
            works: self.works,
            makes: self.registry.into_makes(),
            no_make: self.no_make,
        })
    }

    fn start(&mut self, name: &str, attributes: &[(String, String)]) -> Result<(), FeedError> {
        if name == WORK_ELEMENT {
            if let BuildState::InWork(_) = self.state {
                return Err(FeedError::NestedWork);
            }
            self.state = BuildState::InWork(Box::new(PendingWork {
                work: Work::new(),
                model_name: None,
            }));
        }
        self.context.push(name, attributes);
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), FeedError> {
        let closed = self.context.pop(name)?;
        if closed == WORK_ELEMENT {
            self.finalize();
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), FeedError> {
        let Some(field) = self.context.current().and_then(Field::from_element) else {
            return Ok(());
        };
        // URL text only counts when the opening tag named a size.
        let url_kind = match field {
            Field::Url => match self.context.take_url_kind() {
                Some(kind) => Some(kind),
                None => return Ok(()),
            },
            _ => None,
        };

        let BuildState::InWork(pending) = &mut self.state else {
            return Err(FeedError::OrphanField {
                field: field.element(),
                value: text.trim().to_string(),
            });
        };
        let work = &mut pending.work;

        match field {
            Field::Id => {
                let value = text.trim();
                work.id = value.parse().map_err(|e: std::num::ParseIntError| {
                    FeedError::FieldFormat {
                        field: field.element(),
                        value: value.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            }
            Field::Filename => work.filename = text.trim().to_string(),
            Field::Model => pending.model_name = Some(text.trim().to_string()),
            Field::Make => {
                let make = self.registry.intern_make(text);
                assign_make(work, make);
                if let Some(model_name) = pending.model_name.take() {
                    work.model = Some(self.registry.intern_model(&model_name, make));
                }
            }
            Field::Url => {
                let value = text.trim().to_string();
                match url_kind {
                    Some(UrlKind::Thumbnail) => work.thumbnail_url = value,
                    Some(UrlKind::Medium) => work.medium_url = value,
                    Some(UrlKind::Large) => work.large_url = value,
                    None => {}
                }
            }
        }
        Ok(())
    }

    /// Link the open work into the graph and return to `Idle`.
    fn finalize(&mut self) {
        let BuildState::InWork(pending) = std::mem::replace(&mut self.state, BuildState::Idle)
        else {
            return;
        };
        let PendingWork { work, model_name } = *pending;

        if let Some(model) = model_name {
            tracing::warn!(work = work.id, model = %model, "model without a following make, left unlinked");
        }

        let id = WorkId(self.works.len());
        match work.make {
            None => self.no_make.push(id),
            Some(make) => {
                self.registry.make_mut(make).works.push(id);
                if let Some(model) = work.model {
                    self.registry.model_mut(model).works.push(id);
                }
            }
        }
        tracing::debug!(work = work.id, filename = %work.filename, "work finalized");
        self.works.push(work);
    }
}

/// Set the work's make, dropping a model that belongs to a different make.
fn assign_make(work: &mut Work, make: MakeId) {
    if work.model.is_some_and(|model| model.make() != make) {
        tracing::warn!(work = work.id, "make changed after model was resolved, model dropped");
        work.model = None;
    }
    work.make = Some(make);
}

/// Parse a complete feed into a [`Catalog`].
pub fn build_catalog<R: BufRead>(reader: R) -> Result<Catalog, FeedError> {
    let mut builder = WorkGraphBuilder::new();
    for token in TokenStream::from_reader(reader) {
        builder.feed(token?)?;
    }
    builder.finish()
}
