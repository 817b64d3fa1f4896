use crate::error::{HexError, ReadContext};

/// Every character in the dictionary and text bank is stored shifted up by this amount.
pub const CHAR_OFFSET: i32 = 20;

/// Wraps a word into the signed 16-bit range the Hugo engine works in.
pub fn overflow(num: u16) -> i32 {
    let num = num as i32;
    if num > 32767 {
        ((num + 32768) % 65536) - 32768
    } else {
        num
    }
}

/// Decodes one text byte. The result wraps modulo 2^16, so bytes below the offset
/// land at the top of the BMP rather than failing.
pub fn decode_char(b: u8) -> char {
    let code = ((b as i32 - CHAR_OFFSET) as u16) as u32;
    // U+FFEC..U+FFFF and 0..=235 are never surrogates
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Bounds-checked little-endian view of a whole story file.
#[derive(Debug, Clone, Copy)]
pub struct StoryBytes<'a> {
    bytes: &'a [u8],
}

impl<'a> StoryBytes<'a> {
    pub fn new(bytes: &'a [u8]) -> StoryBytes<'a> {
        StoryBytes { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    pub fn byte_at(&self, offset: usize, context: ReadContext) -> Result<u8, HexError> {
        self.get(offset)
            .ok_or(HexError::UnexpectedEndOfBuffer { context, offset })
    }

    pub fn word_at(&self, offset: usize, context: ReadContext) -> Result<u16, HexError> {
        let lo = self.byte_at(offset, context)?;
        let hi = self.byte_at(offset + 1, context)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Word read with the signed overflow rule applied.
    pub fn signed_word_at(&self, offset: usize, context: ReadContext) -> Result<i32, HexError> {
        Ok(overflow(self.word_at(offset, context)?))
    }

    pub fn slice(&self, start: usize, end: usize, context: ReadContext) -> Result<&'a [u8], HexError> {
        if end > self.bytes.len() {
            return Err(HexError::UnexpectedEndOfBuffer {
                context,
                offset: end,
            });
        }
        Ok(self.bytes.get(start..end).unwrap_or(&[]))
    }

    /// Decodes `len` characters starting at `offset`.
    pub fn decode_text(&self, offset: usize, len: usize, context: ReadContext) -> Result<String, HexError> {
        let raw = self.slice(offset, offset + len, context)?;
        Ok(raw.iter().map(|b| decode_char(*b)).collect())
    }

    /// Like [`StoryBytes::decode_text`] but stops quietly at the end of the buffer.
    pub fn decode_text_lossy(&self, offset: usize, len: usize) -> String {
        let end = (offset + len).min(self.bytes.len());
        self.bytes
            .get(offset..end)
            .unwrap_or(&[])
            .iter()
            .map(|b| decode_char(*b))
            .collect()
    }
}
