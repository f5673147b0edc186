//! Embedded picture payloads.
//!
//! The codec carries a single image form: a nested `\pict\pngblip` group
//! whose payload runs are hex-encoded PNG bytes. Dimensions travel in twips
//! (1/20 point, 1/1440 inch) via `\picw`/`\pich`.

use super::error::{RtfError, RtfResult};

/// Twips per inch (RTF's native length unit is 1/20 point).
pub const TWIPS_PER_INCH: i32 = 1440;

/// DPI assumed when converting between pixels and twips.
pub const DEFAULT_DPI: u32 = 96;

/// Fixed twip-per-pixel factor at the default DPI.
pub const TWIPS_PER_PIXEL: i32 = TWIPS_PER_INCH / DEFAULT_DPI as i32;

/// PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Extracted picture from an RTF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Image data (hex-encoded in RTF, decoded here)
    pub data: Vec<u8>,
    /// Picture width in twips
    pub width: Option<i32>,
    /// Picture height in twips
    pub height: Option<i32>,
}

impl Picture {
    /// Create a picture without dimension commands.
    #[inline]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            width: None,
            height: None,
        }
    }

    /// Convert the width from twips to pixels at the given DPI.
    #[inline]
    pub fn width_pixels(&self, dpi: u32) -> Option<u32> {
        self.width
            .map(|tw| (tw.max(0) as u32 * dpi) / TWIPS_PER_INCH as u32)
    }

    /// Convert the height from twips to pixels at the given DPI.
    #[inline]
    pub fn height_pixels(&self, dpi: u32) -> Option<u32> {
        self.height
            .map(|tw| (tw.max(0) as u32 * dpi) / TWIPS_PER_INCH as u32)
    }

    /// Whether the payload starts with the PNG signature.
    #[inline]
    pub fn is_png(&self) -> bool {
        self.data.starts_with(&PNG_SIGNATURE)
    }

    /// Read the pixel dimensions from the PNG IHDR chunk, if present.
    ///
    /// Used as a fallback when the picture group carries no `\picw`/`\pich`
    /// commands.
    pub fn png_dimensions(&self) -> Option<(u32, u32)> {
        if !self.is_png() || self.data.len() < 24 || &self.data[12..16] != b"IHDR" {
            return None;
        }

        let width = u32::from_be_bytes(self.data[16..20].try_into().ok()?);
        let height = u32::from_be_bytes(self.data[20..24].try_into().ok()?);
        Some((width, height))
    }
}

/// Decode a reassembled hex payload run into raw bytes.
///
/// Interior ASCII whitespace is stripped first; line breaks never reach the
/// payload (the lexer drops them), but hand-authored sources may space-group
/// their hex digits. An odd digit count or a non-hex character is an
/// [`RtfError::InvalidHexPayload`] whose offset points into the stripped
/// payload.
pub fn decode_hex_payload(payload: &str) -> RtfResult<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    hex::decode(&compact).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => {
            RtfError::InvalidHexPayload { offset: index }
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            RtfError::InvalidHexPayload {
                offset: compact.len(),
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PNG header: signature, IHDR length, "IHDR", dimensions.
    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn test_decode_hex_payload() {
        assert_eq!(decode_hex_payload("deadbeef").unwrap(), vec![
            0xDE, 0xAD, 0xBE, 0xEF
        ]);
    }

    #[test]
    fn test_decode_hex_payload_strips_whitespace() {
        assert_eq!(decode_hex_payload("de ad be ef").unwrap(), vec![
            0xDE, 0xAD, 0xBE, 0xEF
        ]);
    }

    #[test]
    fn test_decode_hex_payload_odd_length() {
        assert_eq!(
            decode_hex_payload("abc").unwrap_err(),
            RtfError::InvalidHexPayload { offset: 3 }
        );
    }

    #[test]
    fn test_decode_hex_payload_invalid_character() {
        assert_eq!(
            decode_hex_payload("abxy").unwrap_err(),
            RtfError::InvalidHexPayload { offset: 2 }
        );
    }

    #[test]
    fn test_twip_pixel_conversion() {
        let mut picture = Picture::new(Vec::new());
        picture.width = Some(1440); // 1 inch
        picture.height = Some(720);

        assert_eq!(picture.width_pixels(DEFAULT_DPI), Some(96));
        assert_eq!(picture.height_pixels(DEFAULT_DPI), Some(48));
        assert_eq!(picture.width_pixels(72), Some(72));
    }

    #[test]
    fn test_png_detection_and_dimensions() {
        let picture = Picture::new(png_header(2, 3));
        assert!(picture.is_png());
        assert_eq!(picture.png_dimensions(), Some((2, 3)));

        let not_png = Picture::new(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert!(!not_png.is_png());
        assert_eq!(not_png.png_dimensions(), None);
    }
}
