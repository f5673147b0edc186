//! RTF (Rich Text Format) codec module.
//!
//! This module converts raw RTF source text into a structured, nested
//! document tree and an in-memory content sequence back into valid RTF
//! source, for the subset used by nested note documents: plain text,
//! paragraph breaks, and single embedded PNG images.
//!
//! # Architecture
//!
//! The codec is organized into several components:
//! - **Lexer**: Tokenizes RTF input into group braces, command words,
//!   literal runs, and escapes
//! - **Parser**: Rebuilds brace nesting into a tree of groups, classifying
//!   merged runs by depth
//! - **Writer**: Serializes an ordered content sequence into escaped RTF
//! - **Document**: Consumes a decoded tree into text and image items
//!
//! Every call is a pure function of its input: no I/O, no shared state, and
//! nothing to cancel — a call either completes or reports a parse error.
//!
//! # Example
//!
//! ```rust
//! use longan::rtf;
//!
//! let root = rtf::decode("{\\rtf1 Hello}")?;
//! assert_eq!(root.children().len(), 2);
//! # Ok::<(), longan::rtf::RtfError>(())
//! ```

mod document;
mod error;
mod lexer;
mod parser;
mod picture;
mod types;
mod writer;

// Re-exports
pub use document::RtfDocument;
pub use error::{RtfError, RtfResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use picture::{
    DEFAULT_DPI, Picture, TWIPS_PER_INCH, TWIPS_PER_PIXEL, decode_hex_payload,
};
pub use types::{ContentItem, Group, Node};
pub use writer::{RtfWriter, encode};

/// Decode RTF source text into its document tree.
///
/// The returned group is the single outermost group of the document; its
/// direct children sit at depth 1. Any well-formed brace structure decodes,
/// regardless of header shape.
pub fn decode(source: &str) -> RtfResult<Group> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_encode_round_trip_text() {
        let header = "{\\rtf1\\ansi\\pard {\\fonttbl\\f0\\fswiss Consolas;}\\f0 ";
        let items = vec![ContentItem::Text("some note text".to_string())];

        let root = decode(&encode(header, &items)).unwrap();
        let texts: Vec<&str> = root
            .children()
            .iter()
            .filter_map(Node::as_text)
            .collect();
        assert_eq!(texts, vec!["some note text"]);
    }

    #[test]
    fn test_brace_balance_matches_source() {
        let source = "{a{b}{c{d}}}";
        let root = decode(source).unwrap();

        fn count_groups(group: &Group) -> usize {
            1 + group
                .children()
                .iter()
                .filter_map(Node::as_group)
                .map(count_groups)
                .sum::<usize>()
        }
        assert_eq!(
            count_groups(&root),
            source.matches('{').count()
        );
    }

    mod property_tests {
        use super::*;
        use crate::rtf::RtfDocument;
        use proptest::prelude::*;

        const HEADER: &str = "{\\rtf1\\ansi\\pard {\\fonttbl\\f0\\fswiss Consolas;}\\f0 ";

        /// Strategy for text outside `{}\`, ASCII only, surviving the
        /// document-final trailing-whitespace trim.
        fn plain_text_strategy() -> impl Strategy<Value = String> {
            proptest::string::string_regex(r#"[a-zA-Z0-9 _.,:;!?()'"=/*+-]{1,64}"#)
                .unwrap()
                .prop_map(|s| s.trim_end().to_string())
                .prop_filter("must survive the trailing trim", |s| !s.is_empty())
        }

        /// Strategy for text built from letters and the escaped specials.
        fn specials_text_strategy() -> impl Strategy<Value = String> {
            proptest::string::string_regex(r"[a-z{}\\]{1,32}").unwrap()
        }

        /// Strategy for an embedded image item.
        fn image_strategy() -> impl Strategy<Value = ContentItem> {
            (1u32..=64, 1u32..=64, prop::collection::vec(any::<u8>(), 1..64)).prop_map(
                |(width, height, data)| ContentItem::Image {
                    width,
                    height,
                    data,
                },
            )
        }

        fn root_text(root: &Group) -> String {
            root.children().iter().filter_map(Node::as_text).collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_plain_text_round_trip(s in plain_text_strategy()) {
                let rtf = encode(HEADER, &[ContentItem::Text(s.clone())]);
                let root = decode(&rtf).unwrap();
                prop_assert_eq!(root_text(&root), s);
            }

            #[test]
            fn prop_escaped_specials_round_trip(s in specials_text_strategy()) {
                let rtf = encode(HEADER, &[ContentItem::Text(s.clone())]);
                let root = decode(&rtf).unwrap();
                prop_assert_eq!(root_text(&root), s);
            }

            #[test]
            fn prop_unicode_round_trip(c in prop::char::range('\u{A0}', '\u{D7FF}')) {
                let s = format!("x{}", c);
                let rtf = encode(HEADER, &[ContentItem::Text(s.clone())]);
                prop_assert!(
                    rtf.contains(&format!("\\u{}?", c as u32)),
                    "unicode escape not found in encoded output"
                );

                let root = decode(&rtf).unwrap();
                prop_assert_eq!(root_text(&root), s);
            }

            #[test]
            fn prop_document_items_round_trip(
                lead in plain_text_strategy(),
                image in image_strategy(),
                tail in plain_text_strategy(),
            ) {
                let items = vec![ContentItem::Text(lead), image, ContentItem::Text(tail)];
                let doc = RtfDocument::parse(&encode(HEADER, &items)).unwrap();
                prop_assert_eq!(doc.items(), items.as_slice());
            }
        }
    }
}
