//! Shared test utilities for the works-gallery test suite.
//!
//! Provides feed builders that produce small XML documents in the fixed works
//! schema, plus lookup helpers and graph assertions over a built [`Catalog`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let xml = feed(&[work_xml(1, "a.jpg", Some("D90"), Some("Nikon"), &[("small", "a.jpg")])]);
//! let catalog = build_catalog(xml.as_bytes()).unwrap();
//!
//! let make = find_make(&catalog, "Nikon");
//! assert_eq!(model_names(make), vec!["D90"]);
//! assert_graph_partition(&catalog);
//! ```

use std::collections::HashSet;
use std::path::Path;

use crate::types::{Catalog, Make, Model, WorkId};

// =========================================================================
// Feed builders
// =========================================================================

/// XML for one `<work>`. `None` omits the element; `Some("")` emits it empty.
///
/// The model is written before the make, matching the order the builder
/// resolves them in.
pub fn work_xml(
    id: i64,
    filename: &str,
    model: Option<&str>,
    make: Option<&str>,
    urls: &[(&str, &str)],
) -> String {
    let mut xml = format!("<work><id>{id}</id><filename>{filename}</filename><exif>");
    if let Some(model) = model {
        xml.push_str(&format!("<model>{model}</model>"));
    }
    if let Some(make) = make {
        xml.push_str(&format!("<make>{make}</make>"));
    }
    xml.push_str("</exif><urls>");
    for (kind, url) in urls {
        xml.push_str(&format!(r#"<url type="{kind}">{url}</url>"#));
    }
    xml.push_str("</urls></work>");
    xml
}

/// Wrap works in the root `<works>` element.
pub fn feed(works: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<works>\n{}\n</works>\n",
        works.join("\n")
    )
}

/// Path of the bundled sample feed.
pub fn fixture_feed() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/works.xml")
}

// =========================================================================
// Catalog lookups: panic with the available names on a miss
// =========================================================================

/// Find a make by name. Panics if not found.
pub fn find_make<'a>(catalog: &'a Catalog, name: &str) -> &'a Make {
    catalog
        .makes()
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("make '{name}' not found. Available: {:?}", make_names(catalog)))
}

/// Find a model by name within a make. Panics if not found.
pub fn find_model<'a>(make: &'a Make, name: &str) -> &'a Model {
    make.models
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| {
            panic!(
                "model '{name}' not found in make '{}'. Available: {:?}",
                make.name,
                model_names(make)
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All make names in first-seen order.
pub fn make_names(catalog: &Catalog) -> Vec<&str> {
    catalog.makes().iter().map(|m| m.name.as_str()).collect()
}

/// A make's model names in first-seen order.
pub fn model_names(make: &Make) -> Vec<&str> {
    make.models.iter().map(|m| m.name.as_str()).collect()
}

/// Feed ids of the given works, in list order.
pub fn work_ids(catalog: &Catalog, ids: &[WorkId]) -> Vec<i64> {
    catalog.resolve(ids).map(|w| w.id).collect()
}

// =========================================================================
// Graph assertions
// =========================================================================

/// Assert the linking invariants of a finished graph:
///
/// - each work with a make is listed exactly once under that make and
///   under no other make
/// - each work with a model is listed exactly once under that model, and
///   the model belongs to the work's make
/// - the no-make list and the make lists are disjoint and together cover
///   every work
pub fn assert_graph_partition(catalog: &Catalog) {
    let mut linked: HashSet<WorkId> = HashSet::new();

    for (make_id, make) in catalog.make_ids() {
        for id in &make.works {
            assert!(linked.insert(*id), "work {id:?} listed under two makes");
            assert_eq!(catalog.work(*id).make, Some(make_id));
        }
        for (model_id, model) in catalog.model_ids(make_id) {
            assert_eq!(model.make, make_id);
            for id in &model.works {
                assert_eq!(catalog.work(*id).model, Some(model_id));
                assert_eq!(
                    model.works.iter().filter(|w| *w == id).count(),
                    1,
                    "work {id:?} listed twice under model '{}'",
                    model.name
                );
            }
        }
    }

    for id in catalog.no_make() {
        assert!(catalog.work(*id).make.is_none());
        assert!(!linked.contains(id), "work {id:?} in both no-make and a make");
        linked.insert(*id);
    }

    assert_eq!(linked.len(), catalog.works().len(), "not every work is linked");

    for (index, work) in catalog.works().iter().enumerate() {
        if let Some(model) = work.model {
            assert_eq!(Some(model.make()), work.make, "model outside the work's make");
            let listed = &catalog.model(model).works;
            assert_eq!(
                listed.iter().filter(|id| id.0 == index).count(),
                1,
                "work {index} not listed under its model"
            );
        }
    }
}
