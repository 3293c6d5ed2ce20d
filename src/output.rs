//! CLI output formatting for the build stages.
//!
//! Output is a content inventory: makes and models are shown by name with
//! their work counts, and file names appear only where pages are written.
//!
//! # Output Format
//!
//! ## Catalog
//!
//! ```text
//! Makes
//! 001 Canon (3 works)
//!     001 Canon EOS 20D (2 works)
//!     002 Canon EOS 400D DIGITAL (1 work)
//! 002 Panasonic (1 work)
//!     001 DMC-FZ30 (1 work)
//!
//! No make (1 work)
//!
//! Parsed 5 works, 2 makes, 3 models
//! ```
//!
//! ## Site
//!
//! ```text
//! Welcome to Photos! → index.html (5 thumbnails)
//! All photos taken with a Canon → Canon.html (3 thumbnails)
//! ...
//! Wrote 7 pages to site
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::render::RenderedPage;
use crate::types::Catalog;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// ```text
/// 001 Canon (3 works)
/// ```
fn entity_header(index: usize, name: &str, works: usize) -> String {
    format!("{} {} ({})", format_index(index), name, plural(works, "work"))
}

// ============================================================================
// Catalog
// ============================================================================

pub fn format_catalog_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();

    if !catalog.makes().is_empty() {
        lines.push("Makes".to_string());
        for (i, make) in catalog.makes().iter().enumerate() {
            lines.push(entity_header(i + 1, &make.name, make.works.len()));
            for (j, model) in make.models.iter().enumerate() {
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    entity_header(j + 1, &model.name, model.works.len())
                ));
            }
        }
        lines.push(String::new());
    }

    if !catalog.no_make().is_empty() {
        lines.push(format!("No make ({})", plural(catalog.no_make().len(), "work")));
        lines.push(String::new());
    }

    lines.push(format!(
        "Parsed {}, {}, {}",
        plural(catalog.works().len(), "work"),
        plural(catalog.makes().len(), "make"),
        plural(catalog.model_count(), "model"),
    ));

    lines
}

pub fn print_catalog_output(catalog: &Catalog) {
    for line in format_catalog_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Site
// ============================================================================

pub fn format_site_output(pages: &[RenderedPage], output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|page| {
            format!(
                "{} \u{2192} {} ({})",
                page.title,
                page.filename,
                plural(page.thumbnails, "thumbnail")
            )
        })
        .collect();

    lines.push(format!(
        "Wrote {} to {}",
        plural(pages.len(), "page"),
        output_dir.display()
    ));
    lines
}

pub fn print_site_output(pages: &[RenderedPage], output_dir: &Path) {
    for line in format_site_output(pages, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_catalog;
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "work"), "1 work");
        assert_eq!(plural(0, "work"), "0 works");
        assert_eq!(plural(3, "model"), "3 models");
    }

    #[test]
    fn catalog_output_lists_makes_and_models() {
        let xml = feed(&[
            work_xml(1, "a.jpg", Some("EOS 20D"), Some("Canon"), &[]),
            work_xml(2, "b.jpg", Some("EOS 20D"), Some("Canon"), &[]),
            work_xml(3, "c.jpg", Some("D90"), Some("Nikon"), &[]),
            work_xml(4, "d.jpg", None, None, &[]),
        ]);
        let catalog = build_catalog(xml.as_bytes()).unwrap();

        let lines = format_catalog_output(&catalog);
        assert_eq!(
            lines,
            vec![
                "Makes",
                "001 Canon (2 works)",
                "    001 EOS 20D (2 works)",
                "002 Nikon (1 work)",
                "    001 D90 (1 work)",
                "",
                "No make (1 work)",
                "",
                "Parsed 4 works, 2 makes, 2 models",
            ]
        );
    }

    #[test]
    fn catalog_output_for_empty_feed() {
        let catalog = build_catalog(feed(&[]).as_bytes()).unwrap();
        assert_eq!(
            format_catalog_output(&catalog),
            vec!["Parsed 0 works, 0 makes, 0 models"]
        );
    }

    #[test]
    fn site_output_lists_pages() {
        let pages = vec![
            RenderedPage {
                filename: "index.html".to_string(),
                title: "Welcome to Photos!".to_string(),
                thumbnails: 2,
                html: String::new(),
            },
            RenderedPage {
                filename: "Nikon.html".to_string(),
                title: "All photos taken with a Nikon".to_string(),
                thumbnails: 1,
                html: String::new(),
            },
        ];

        let lines = format_site_output(&pages, Path::new("site"));
        assert_eq!(
            lines,
            vec![
                "Welcome to Photos! \u{2192} index.html (2 thumbnails)",
                "All photos taken with a Nikon \u{2192} Nikon.html (1 thumbnail)",
                "Wrote 2 pages to site",
            ]
        );
    }
}
