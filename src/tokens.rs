//! XML token stream over the works feed.
//!
//! Wraps a `quick-xml` [`Reader`] and flattens its events into three
//! [`Token`] kinds: start-tag (with attributes), end-tag, and text. The
//! stream is single-pass and never buffers more than one element.
//!
//! A few normalizations happen here so the builder sees a stable stream:
//!
//! - Empty elements (`<make/>`) are expanded into a start and an end token.
//! - Adjacent text and CDATA pieces are merged into one text token, so a
//!   comment inside `<filename>` does not split the value.
//! - Text is unescaped but not trimmed. Whitespace-only text is still a
//!   token; an element with no content at all produces none.
//! - End-tag matching is left to [`crate::context::ContextStack`], which
//!   turns mismatches into structural errors.

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use std::io::BufRead;
use std::str;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("XML read error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("invalid XML attribute: {0}")]
    Attr(#[from] AttrError),
    #[error("element name is not valid UTF-8: {0}")]
    Utf8(#[from] str::Utf8Error),
}

/// One item of the feed as seen by the graph builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

/// Pull-based token source over any buffered reader.
pub struct TokenStream<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    text: String,
    /// Tag read while text was still being accumulated.
    held: Option<Token>,
    done: bool,
}

impl<R: BufRead> TokenStream<R> {
    pub fn from_reader(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.trim_text(false);

        Self {
            reader,
            buf: Vec::with_capacity(4096),
            text: String::new(),
            held: None,
            done: false,
        }
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenError> {
        if let Some(token) = self.held.take() {
            return Ok(Some(token));
        }

        while !self.done {
            self.buf.clear();
            let tag = match self.reader.read_event_into(&mut self.buf)? {
                XmlEvent::Start(ref e) => Some(Token::Start {
                    name: local_name(e)?,
                    attributes: attributes(e)?,
                }),
                XmlEvent::End(ref e) => Some(Token::End {
                    name: str::from_utf8(e.local_name().as_ref())?.to_string(),
                }),
                XmlEvent::Text(ref e) => {
                    self.text.push_str(&e.unescape()?);
                    None
                }
                XmlEvent::CData(ref e) => {
                    self.text.push_str(str::from_utf8(e.as_ref())?);
                    None
                }
                XmlEvent::Eof => {
                    self.done = true;
                    None
                }
                // Declarations, comments, processing instructions.
                _ => None,
            };

            if let Some(tag) = tag {
                if self.text.is_empty() {
                    return Ok(Some(tag));
                }
                self.held = Some(tag);
                return Ok(Some(Token::Text(std::mem::take(&mut self.text))));
            }
        }

        if self.text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::Text(std::mem::take(&mut self.text))))
        }
    }
}

impl<R: BufRead> Iterator for TokenStream<R> {
    type Item = Result<Token, TokenError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String, TokenError> {
    Ok(str::from_utf8(e.local_name().as_ref())?.to_string())
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, TokenError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        attrs.push((key, value));
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(xml: &str) -> Vec<Token> {
        TokenStream::from_reader(xml.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn start(name: &str) -> Token {
        Token::Start {
            name: name.to_string(),
            attributes: vec![],
        }
    }

    fn end(name: &str) -> Token {
        Token::End {
            name: name.to_string(),
        }
    }

    fn text(value: &str) -> Token {
        Token::Text(value.to_string())
    }

    #[test]
    fn start_text_end() {
        assert_eq!(
            tokens("<id>42</id>"),
            vec![start("id"), text("42"), end("id")]
        );
    }

    #[test]
    fn empty_element_expands() {
        assert_eq!(tokens("<make/>"), vec![start("make"), end("make")]);
    }

    #[test]
    fn empty_pair_has_no_text() {
        assert_eq!(tokens("<make></make>"), vec![start("make"), end("make")]);
    }

    #[test]
    fn whitespace_text_is_kept() {
        assert_eq!(
            tokens("<make>  </make>"),
            vec![start("make"), text("  "), end("make")]
        );
    }

    #[test]
    fn attributes_are_captured() {
        let toks = tokens(r#"<url type="small">a.jpg</url>"#);
        assert_eq!(
            toks[0],
            Token::Start {
                name: "url".to_string(),
                attributes: vec![("type".to_string(), "small".to_string())],
            }
        );
    }

    #[test]
    fn entities_are_unescaped() {
        assert_eq!(
            tokens("<model>A &amp; B</model>")[1],
            text("A & B")
        );
    }

    #[test]
    fn cdata_and_comment_merge_with_text() {
        assert_eq!(
            tokens("<filename>a<!-- note --><![CDATA[<b>]]>.jpg</filename>"),
            vec![start("filename"), text("a<b>.jpg"), end("filename")]
        );
    }

    #[test]
    fn namespace_prefix_is_dropped() {
        assert_eq!(tokens("<x:work></x:work>"), vec![start("work"), end("work")]);
    }

    #[test]
    fn unmatched_end_is_passed_through() {
        assert_eq!(tokens("</work>"), vec![end("work")]);
    }

    #[test]
    fn mismatched_end_is_passed_through() {
        assert_eq!(tokens("<a></b>"), vec![start("a"), end("b")]);
    }

    #[test]
    fn declaration_is_skipped() {
        assert_eq!(
            tokens("<?xml version=\"1.0\"?><works/>"),
            vec![start("works"), end("works")]
        );
    }
}
