//! RTF document consumption.
//!
//! This is the layer above the raw tree: it enforces the header shape this
//! codec's documents carry, then walks the remaining children into an
//! ordered sequence of content items (text runs and embedded PNG images)
//! that can be handed straight back to [`encode`](super::encode).

use super::picture::{DEFAULT_DPI, Picture, decode_hex_payload};
use super::types::{ContentItem, Group, Node};
use crate::common::{Error, Result};
use smallvec::SmallVec;
use std::path::Path;

/// What a recognized command word means to the document layer.
///
/// The codec itself never interprets command words; consumers dispatch them
/// through this table instead of an open-coded match per word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    /// Paragraph break
    Par,
    /// Introduces an embedded picture group
    Pict,
    /// Marks the picture payload as PNG
    Pngblip,
    /// Picture width in twips
    PictureWidth,
    /// Picture height in twips
    PictureHeight,
    /// Known word with no content effect (header and formatting vocabulary)
    Ignored,
}

/// Command vocabulary, keyed by word stem (numeric suffixes split off).
static COMMANDS: phf::Map<&'static str, CommandKind> = phf::phf_map! {
    "par" => CommandKind::Par,
    "pict" => CommandKind::Pict,
    "pngblip" => CommandKind::Pngblip,
    "picw" => CommandKind::PictureWidth,
    "pich" => CommandKind::PictureHeight,
    // Header and formatting words the original documents carry.
    "rtf" => CommandKind::Ignored,
    "ansi" => CommandKind::Ignored,
    "ansicpg" => CommandKind::Ignored,
    "pard" => CommandKind::Ignored,
    "fonttbl" => CommandKind::Ignored,
    "f" => CommandKind::Ignored,
    "fswiss" => CommandKind::Ignored,
    "fnil" => CommandKind::Ignored,
    "fcharset" => CommandKind::Ignored,
    "deff" => CommandKind::Ignored,
    "deflang" => CommandKind::Ignored,
    "nouicompat" => CommandKind::Ignored,
    "viewkind" => CommandKind::Ignored,
    "uc" => CommandKind::Ignored,
    "sa" => CommandKind::Ignored,
    "sl" => CommandKind::Ignored,
    "slmult" => CommandKind::Ignored,
    "fs" => CommandKind::Ignored,
    "lang" => CommandKind::Ignored,
};

/// Split a command word into its alphabetic stem and numeric suffix.
///
/// `picw150` becomes `("picw", Some(150))`; a word with no digits keeps a
/// `None` parameter.
fn split_command_word(word: &str) -> (&str, Option<i32>) {
    let stem_len = word
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(word.len());
    let (stem, digits) = word.split_at(stem_len);
    (stem, digits.parse().ok())
}

/// Classify a command word through the vocabulary table.
fn classify_command(word: &str) -> (Option<CommandKind>, Option<i32>) {
    let (stem, param) = split_command_word(word);
    (COMMANDS.get(stem).copied(), param)
}

/// A consumed RTF document: ordered text and image content.
///
/// This is the entry point for reading the documents this codec supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtfDocument {
    /// Ordered content items
    items: Vec<ContentItem>,
}

impl RtfDocument {
    /// Decode RTF source and consume the tree into content items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::rtf::RtfDocument;
    ///
    /// let rtf = "{\\rtf1\\ansi\\pard {\\fonttbl\\f0\\fswiss Consolas;}\\f0 Hello\\par}";
    /// let doc = RtfDocument::parse(rtf)?;
    /// assert_eq!(doc.text(), "Hello\n");
    /// # Ok::<(), longan::common::Error>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let root = super::decode(input)?;
        Self::from_tree(&root)
    }

    /// Read and parse an RTF document from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    /// Consume an already-decoded tree into content items.
    ///
    /// The first five children of the root must be the commands `rtf1`,
    /// `ansi`, `pard`, a four-element group (font-table placeholder), and
    /// `f0`; any other shape is rejected as an unsupported document. This is
    /// a policy of the document layer — [`decode`](super::decode) itself
    /// accepts any well-formed brace structure.
    pub fn from_tree(root: &Group) -> Result<Self> {
        check_header(root)?;

        let mut extractor = Extractor::default();
        for node in &root.children()[5..] {
            extractor.visit(node)?;
        }
        Ok(Self {
            items: extractor.finish(),
        })
    }

    /// Get the ordered content items.
    #[inline]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Consume the document into its content items.
    #[inline]
    pub fn into_items(self) -> Vec<ContentItem> {
        self.items
    }

    /// Get all text content, paragraph breaks included.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| match item {
                ContentItem::Text(text) => Some(text.as_str()),
                ContentItem::Image { .. } => None,
            })
            .collect()
    }

    /// Number of embedded images.
    pub fn image_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, ContentItem::Image { .. }))
            .count()
    }
}

/// Enforce the five-element header contract.
fn check_header(root: &Group) -> Result<()> {
    let children = root.children();
    let shape_ok = children.len() >= 5
        && children[0].as_cmd() == Some("rtf1")
        && children[1].as_cmd() == Some("ansi")
        && children[2].as_cmd() == Some("pard")
        && children[3].as_group().is_some_and(|g| g.len() == 4)
        && children[4].as_cmd() == Some("f0");

    if shape_ok {
        Ok(())
    } else {
        Err(Error::Unsupported(
            "document header does not match the rtf1/ansi/pard/fonttbl/f0 shape".to_string(),
        ))
    }
}

/// Tree walker accumulating content items.
#[derive(Default)]
struct Extractor {
    /// Finished items in document order
    items: Vec<ContentItem>,
    /// Text accumulated since the last image
    text: String,
}

impl Extractor {
    fn visit(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Text(text) => self.text.push_str(text),
            Node::Cmd(word) => {
                if let (Some(CommandKind::Par), _) = classify_command(word) {
                    self.text.push('\n');
                }
                // Everything else is header vocabulary or unknown; neither
                // contributes content.
            },
            // Payload runs are consumed by their enclosing picture group.
            Node::CmdParam(_) => {},
            Node::Group(group) => {
                if has_command(group, CommandKind::Pict) {
                    // Only PNG payloads are supported; a pict group carrying
                    // any other format is skipped whole.
                    if has_command(group, CommandKind::Pngblip) {
                        self.flush_text();
                        self.items.push(assemble_image(group)?);
                    }
                } else {
                    // Walk other groups (this is how `{\par }` groups written
                    // by the serializer take effect).
                    for child in group.children() {
                        self.visit(child)?;
                    }
                }
            },
        }
        Ok(())
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.items.push(ContentItem::Text(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<ContentItem> {
        self.flush_text();
        self.items
    }
}

/// Whether a group's direct children include a command of the given kind.
fn has_command(group: &Group, kind: CommandKind) -> bool {
    group
        .children()
        .iter()
        .filter_map(Node::as_cmd)
        .any(|word| classify_command(word).0 == Some(kind))
}

/// Reassemble a picture group into an image content item.
///
/// The image bytes are the hex-decoded concatenation of every payload run in
/// the group; pixel dimensions come from `\picw`/`\pich` twips, falling back
/// to the PNG IHDR header when the commands are absent.
fn assemble_image(group: &Group) -> Result<ContentItem> {
    let mut picture = Picture::new(Vec::new());
    let mut runs = SmallVec::<[&str; 4]>::new();

    for child in group.children() {
        match child {
            Node::CmdParam(run) => runs.push(run.as_str()),
            Node::Cmd(word) => match classify_command(word) {
                (Some(CommandKind::PictureWidth), param) => picture.width = param,
                (Some(CommandKind::PictureHeight), param) => picture.height = param,
                _ => {},
            },
            Node::Group(_) | Node::Text(_) => {},
        }
    }

    picture.data = decode_hex_payload(&runs.concat())?;

    let (width, height) = match (
        picture.width_pixels(DEFAULT_DPI),
        picture.height_pixels(DEFAULT_DPI),
    ) {
        (Some(w), Some(h)) => (w, h),
        _ => picture.png_dimensions().unwrap_or((0, 0)),
    };

    Ok(ContentItem::Image {
        width,
        height,
        data: picture.data,
    })
}
