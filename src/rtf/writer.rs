//! RTF writer/serializer.
//!
//! Walks an ordered sequence of content items and produces valid escaped RTF
//! source, the inverse of the decoder for the supported subset. Encoding is
//! total: any well-formed item sequence serializes without error.

use super::picture::TWIPS_PER_PIXEL;
use super::types::ContentItem;

/// RTF writer accumulating output into a string buffer.
pub struct RtfWriter {
    /// Output buffer, seeded with the document header
    buf: String,
}

impl RtfWriter {
    /// Create a writer seeded with the caller-supplied document header.
    ///
    /// The header is emitted verbatim; the writer never inspects it.
    pub fn new(header: &str) -> Self {
        Self {
            buf: header.to_owned(),
        }
    }

    /// Write one content item.
    pub fn write_item(&mut self, item: &ContentItem) {
        match item {
            ContentItem::Text(text) => self.write_text(text),
            ContentItem::Image {
                width,
                height,
                data,
            } => self.write_image(*width, *height, data),
        }
    }

    /// Write plain text with proper escaping.
    ///
    /// Backslashes and braces are escaped, line breaks become `{\par }`
    /// command groups, and anything past 0x7F is written as a decimal
    /// `\uN?` fallback escape. Carriage returns are dropped; the decoder
    /// treats them as noise.
    pub fn write_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\\' => self.buf.push_str("\\\\"),
                '{' => self.buf.push_str("\\{"),
                '}' => self.buf.push_str("\\}"),
                '\n' => self.buf.push_str("{\\par }"),
                '\r' => {},
                c if (c as u32) > 0x7F => {
                    self.write_control_word("u", Some(c as u32 as i64));
                    self.buf.push('?');
                },
                c => self.buf.push(c),
            }
        }
    }

    /// Write an embedded PNG image group.
    ///
    /// Pixel dimensions are scaled to twips with the fixed factor; the image
    /// bytes are emitted as lowercase hex.
    pub fn write_image(&mut self, width: u32, height: u32, data: &[u8]) {
        self.buf.push('{');
        self.write_control_word("pict", None);
        self.write_control_word("pngblip", None);
        self.write_control_word("picw", Some(i64::from(width) * i64::from(TWIPS_PER_PIXEL)));
        self.write_control_word("pich", Some(i64::from(height) * i64::from(TWIPS_PER_PIXEL)));
        self.buf.push(' ');
        self.buf.push_str(&hex::encode(data));
        self.buf.push('}');
    }

    /// Trim trailing whitespace and close the document group.
    pub fn finish(mut self) -> String {
        let trimmed = self.buf.trim_end().len();
        self.buf.truncate(trimmed);
        self.buf.push('}');
        self.buf
    }

    /// Write a control word with an optional numeric parameter.
    fn write_control_word(&mut self, word: &str, param: Option<i64>) {
        self.buf.push('\\');
        self.buf.push_str(word);
        if let Some(p) = param {
            let mut digits = itoa::Buffer::new();
            self.buf.push_str(digits.format(p));
        }
    }
}

/// Encode a document: the header verbatim, each content item in order, then
/// trailing whitespace trimmed and the closing brace appended.
pub fn encode(header: &str, items: &[ContentItem]) -> String {
    let mut writer = RtfWriter::new(header);
    for item in items {
        writer.write_item(item);
    }
    writer.finish()
}
