//! Open-element path tracking for the streaming parser.
//!
//! The builder never holds a document tree. Instead it keeps the path of
//! open element names from the root to the current position and asks "what
//! element am I directly inside" whenever text arrives.
//!
//! Opening a `url` element also inspects its attributes for the size
//! discriminator and raises a one-shot [`UrlKind`] flag. The flag is consumed
//! by the next text token inside that element and dropped when the element
//! closes, so an empty `<url/>` never leaks into a later value.

use thiserror::Error;

/// Element whose attributes carry the URL size discriminator.
pub const URL_ELEMENT: &str = "url";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("closing element </{0}> without any open element")]
    UnmatchedEnd(String),
    #[error("closing element </{found}> while <{open}> is open")]
    MismatchedEnd { open: String, found: String },
}

/// Which URL field of a work the next text token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Thumbnail,
    Medium,
    Large,
}

impl UrlKind {
    /// Map a discriminator attribute value (`small`, `medium`, `large`).
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value {
            "small" => Some(Self::Thumbnail),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ContextStack {
    path: Vec<String>,
    pending_url: Option<UrlKind>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter an element. For `url` elements, the first attribute value that
    /// names a size raises the pending URL flag.
    pub fn push(&mut self, name: &str, attributes: &[(String, String)]) {
        if name == URL_ELEMENT {
            self.pending_url = attributes
                .iter()
                .find_map(|(_, value)| UrlKind::from_discriminator(value));
        }
        self.path.push(name.to_string());
    }

    /// Leave an element, checking it matches the innermost open one.
    pub fn pop(&mut self, name: &str) -> Result<String, StructuralError> {
        let Some(open) = self.path.pop() else {
            return Err(StructuralError::UnmatchedEnd(name.to_string()));
        };
        if open != name {
            return Err(StructuralError::MismatchedEnd {
                open,
                found: name.to_string(),
            });
        }
        if open == URL_ELEMENT {
            self.pending_url = None;
        }
        Ok(open)
    }

    /// Innermost open element.
    pub fn current(&self) -> Option<&str> {
        self.path.last().map(|s| s.as_str())
    }

    /// Consume the pending URL flag, if any.
    pub fn take_url_kind(&mut self) -> Option<UrlKind> {
        self.pending_url.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(key: &str, value: &str) -> Vec<(String, String)> {
        vec![(key.to_string(), value.to_string())]
    }

    #[test]
    fn current_tracks_innermost() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.current(), None);
        stack.push("works", &[]);
        stack.push("work", &[]);
        stack.push("id", &[]);
        assert_eq!(stack.current(), Some("id"));
        stack.pop("id").unwrap();
        assert_eq!(stack.current(), Some("work"));
    }

    #[test]
    fn pop_on_empty_is_unmatched() {
        let mut stack = ContextStack::new();
        assert_eq!(
            stack.pop("work"),
            Err(StructuralError::UnmatchedEnd("work".to_string()))
        );
    }

    #[test]
    fn pop_with_wrong_name_is_mismatched() {
        let mut stack = ContextStack::new();
        stack.push("work", &[]);
        stack.push("make", &[]);
        assert_eq!(
            stack.pop("model"),
            Err(StructuralError::MismatchedEnd {
                open: "make".to_string(),
                found: "model".to_string(),
            })
        );
    }

    #[test]
    fn url_push_raises_matching_flag() {
        let mut stack = ContextStack::new();
        stack.push("url", &attr("type", "medium"));
        assert_eq!(stack.take_url_kind(), Some(UrlKind::Medium));
        assert_eq!(stack.take_url_kind(), None);
    }

    #[test]
    fn url_without_known_discriminator_raises_nothing() {
        let mut stack = ContextStack::new();
        stack.push("url", &attr("type", "xlarge"));
        assert_eq!(stack.take_url_kind(), None);
    }

    #[test]
    fn discriminator_attribute_name_is_not_checked() {
        let mut stack = ContextStack::new();
        stack.push("url", &attr("size", "large"));
        assert_eq!(stack.take_url_kind(), Some(UrlKind::Large));
    }

    #[test]
    fn closing_url_drops_unconsumed_flag() {
        let mut stack = ContextStack::new();
        stack.push("url", &attr("type", "small"));
        stack.pop("url").unwrap();
        assert_eq!(stack.take_url_kind(), None);
    }

    #[test]
    fn other_elements_ignore_attributes() {
        let mut stack = ContextStack::new();
        stack.push("image", &attr("type", "small"));
        assert_eq!(stack.take_url_kind(), None);
    }
}
