//! RTF tree builder.
//!
//! Consumes the token stream and reconstructs the brace-nesting structure
//! into a tree of groups. Adjacent literal-class tokens are coalesced into a
//! single run before classification; nesting depth decides whether a run is
//! document text or opaque command payload.

use super::error::{RtfError, RtfResult};
use super::lexer::{Token, TokenKind};
use super::types::{Group, Node};

/// RTF tree builder.
pub struct Parser<'a> {
    /// Token stream
    tokens: Vec<Token<'a>>,
    /// Current position in the token stream
    pos: usize,
    /// Set by `\*`; the next command token is discarded
    skip_next_command: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a token stream.
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            pos: 0,
            skip_next_command: false,
        }
    }

    /// Parse the token stream into the document root group.
    ///
    /// The document is the single outermost group; a stray `}`, an
    /// unterminated `{`, or leftover content outside the root are parse
    /// errors.
    pub fn parse(mut self) -> RtfResult<Group> {
        let mut root: Option<Group> = None;
        let mut stray_content = false;

        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::GroupOpen => {
                    let group = self.parse_group(1, token.offset)?;
                    if root.is_some() {
                        return Err(RtfError::MalformedDocument(
                            "multiple top-level groups".to_string(),
                        ));
                    }
                    root = Some(group);
                },
                TokenKind::GroupClose => {
                    return Err(RtfError::UnmatchedGroupClose {
                        offset: token.offset,
                    });
                },
                TokenKind::Comment => self.skip_next_command = true,
                TokenKind::Command(_) if self.skip_next_command => {
                    self.skip_next_command = false;
                },
                TokenKind::Command(_)
                | TokenKind::EscapedChar(_)
                | TokenKind::UnicodeEscape(_) => stray_content = true,
                // Whitespace-only runs around the document group are noise.
                TokenKind::Literal(run) => {
                    if !run.trim().is_empty() {
                        stray_content = true;
                    }
                },
            }
        }

        match root {
            Some(_) if stray_content => Err(RtfError::MalformedDocument(
                "content outside the document group".to_string(),
            )),
            Some(group) => Ok(group),
            None => Err(RtfError::MalformedDocument(
                "no top-level group".to_string(),
            )),
        }
    }

    /// Parse the contents of one group, positioned just past its `{`.
    ///
    /// `depth` is the nesting depth of the content (1 for the root group's
    /// own children); `open_offset` is the byte offset of the opening brace,
    /// reported if the group never closes.
    fn parse_group(&mut self, depth: usize, open_offset: usize) -> RtfResult<Group> {
        let mut group = Group::new();
        let mut run = String::new();

        loop {
            let Some(token) = self.advance() else {
                return Err(RtfError::UnterminatedGroup {
                    offset: open_offset,
                });
            };

            match token.kind {
                TokenKind::GroupClose => {
                    Self::flush_run(&mut run, depth, &mut group);
                    return Ok(group);
                },
                TokenKind::GroupOpen => {
                    Self::flush_run(&mut run, depth, &mut group);
                    let child = self.parse_group(depth + 1, token.offset)?;
                    group.push(Node::Group(child));
                },
                TokenKind::Comment => self.skip_next_command = true,
                TokenKind::Command(word) => {
                    Self::flush_run(&mut run, depth, &mut group);
                    if self.skip_next_command {
                        self.skip_next_command = false;
                    } else {
                        group.push(Node::Cmd(word.to_owned()));
                    }
                },
                TokenKind::Literal(text) => run.push_str(text),
                TokenKind::EscapedChar(ch) => run.push(ch),
                TokenKind::UnicodeEscape(code) => {
                    let ch = char::from_u32(code).ok_or(RtfError::MalformedUnicodeEscape {
                        offset: token.offset,
                    })?;
                    run.push(ch);
                },
            }
        }
    }

    /// Flush the coalesced run into the group, classified by depth.
    fn flush_run(run: &mut String, depth: usize, group: &mut Group) {
        if run.is_empty() {
            return;
        }
        let text = std::mem::take(run);
        group.push(if depth == 1 {
            Node::Text(text)
        } else {
            Node::CmdParam(text)
        });
    }

    /// Take the next token, if any.
    #[inline]
    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtf::decode;

    #[test]
    fn test_depth_sensitive_classification() {
        let root = decode("{A{B}}").unwrap();
        assert_eq!(root.len(), 2);
        assert_eq!(root.children()[0], Node::Text("A".to_string()));

        let inner = root.children()[1].as_group().unwrap();
        assert_eq!(inner.children(), &[Node::CmdParam("B".to_string())]);
    }

    #[test]
    fn test_nesting_mirrors_braces() {
        let root = decode("{a{b{c}}{d}}").unwrap();
        assert_eq!(root.len(), 3);

        let b = root.children()[1].as_group().unwrap();
        assert_eq!(b.len(), 2);
        assert!(b.children()[1].as_group().is_some());

        let d = root.children()[2].as_group().unwrap();
        assert_eq!(d.children(), &[Node::CmdParam("d".to_string())]);
    }

    #[test]
    fn test_commands_are_not_coalesced() {
        let root = decode(r"{a\par b}").unwrap();
        assert_eq!(root.children(), &[
            Node::Text("a".to_string()),
            Node::Cmd("par".to_string()),
            Node::Text("b".to_string()),
        ]);
    }

    #[test]
    fn test_escapes_coalesce_with_literals() {
        let root = decode(r"{a\{b\}c\\d}").unwrap();
        assert_eq!(root.children(), &[Node::Text("a{b}c\\d".to_string())]);
    }

    #[test]
    fn test_unicode_escape_resolves_and_merges_trailing_text() {
        let root = decode(r"{\u233?tail}").unwrap();
        assert_eq!(root.children(), &[Node::Text("étail".to_string())]);
    }

    #[test]
    fn test_comment_discards_next_command_only() {
        let root = decode(r"{\*\foo bar}").unwrap();
        assert_eq!(root.children(), &[Node::Text("bar".to_string())]);
    }

    #[test]
    fn test_comment_inside_nested_group() {
        let root = decode(r"{x{\*\panose 1234}y}").unwrap();
        assert_eq!(root.len(), 3);
        let inner = root.children()[1].as_group().unwrap();
        assert_eq!(inner.children(), &[Node::CmdParam("1234".to_string())]);
    }

    #[test]
    fn test_unmatched_group_close() {
        let err = decode("rtf1}").unwrap_err();
        assert_eq!(err, RtfError::UnmatchedGroupClose { offset: 4 });
    }

    #[test]
    fn test_unterminated_group() {
        let err = decode("{rtf1").unwrap_err();
        assert_eq!(err, RtfError::UnterminatedGroup { offset: 0 });

        let err = decode("{a{b}").unwrap_err();
        assert_eq!(err, RtfError::UnterminatedGroup { offset: 0 });
    }

    #[test]
    fn test_no_top_level_group() {
        assert!(matches!(
            decode("just text"),
            Err(RtfError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_content_outside_document_group() {
        assert!(matches!(
            decode("{a}{b}"),
            Err(RtfError::MalformedDocument(_))
        ));
        assert!(matches!(
            decode("{a}tail"),
            Err(RtfError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_trailing_whitespace_after_document_is_ignored() {
        assert!(decode("{a} \n").is_ok());
    }
}
