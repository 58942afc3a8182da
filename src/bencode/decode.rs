use bytes::Bytes;
use tracing::{debug, trace};

use super::error::BencodeError;
use super::value::{Dict, Value};

/// Maximum number of nested lists/dictionaries accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Number of input bytes quoted in error messages.
pub const SNIPPET_LEN: usize = 32;

/// Text encoding applied to byte-string values while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// 7-bit ASCII; any byte above 0x7f rejects the string.
    Ascii,
}

impl TextEncoding {
    fn decode(self, raw: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(raw).ok().map(str::to_owned),
            TextEncoding::Ascii if raw.is_ascii() => {
                std::str::from_utf8(raw).ok().map(str::to_owned)
            }
            TextEncoding::Ascii => None,
        }
    }
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail with [`BencodeError::TrailingData`] if bytes follow the outermost value.
    pub check_trailer: bool,
    /// Interpret byte strings (not dictionary keys) as text when they are valid
    /// in this encoding. Invalid strings are returned as raw bytes.
    pub text_encoding: Option<TextEncoding>,
    /// Maximum container nesting.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            check_trailer: true,
            text_encoding: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decodes a single bencode value, rejecting trailing data.
///
/// # Examples
///
/// ```
/// use canonical_bencode::{decode, BencodeError, Value};
///
/// assert_eq!(decode(b"i-5e").unwrap(), Value::Integer(-5));
/// assert_eq!(decode(b"4:spam").unwrap().as_str(), Some("spam"));
/// assert!(matches!(decode(b"4:spamgarbage"), Err(BencodeError::TrailingData { .. })));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    Decoder::new(data).decode()
}

/// A cursor over an immutable byte buffer.
///
/// The cursor only moves forward. With trailer checks disabled, repeated calls
/// to [`Decoder::decode`] read consecutive values from the same buffer.
///
/// ```
/// use canonical_bencode::{Decoder, TextEncoding, Value};
///
/// let mut decoder = Decoder::new(b"4:spamgarbage").check_trailer(false);
/// assert_eq!(decoder.decode().unwrap(), Value::string("spam"));
/// assert_eq!(decoder.position(), 6);
///
/// let value = Decoder::new(b"l3:abce")
///     .text_encoding(TextEncoding::Utf8)
///     .decode()
///     .unwrap();
/// assert_eq!(value, Value::List(vec![Value::Text("abc".into())]));
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            pos: 0,
            options,
        }
    }

    pub fn check_trailer(mut self, check: bool) -> Self {
        self.options.check_trailer = check;
        self
    }

    pub fn text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.options.text_encoding = Some(encoding);
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Offset of the cursor; after a successful decode, the end of that value.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Decodes the value at the cursor.
    ///
    /// # Errors
    ///
    /// Any malformed input aborts the decode; no partial value is returned.
    pub fn decode(&mut self) -> Result<Value, BencodeError> {
        let value = self.decode_value(0)?;

        if self.options.check_trailer && self.pos != self.data.len() {
            return Err(BencodeError::TrailingData {
                offset: self.pos,
                snippet: self.snippet(self.pos),
            });
        }

        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn snippet(&self, offset: usize) -> String {
        let end = self.data.len().min(offset.saturating_add(SNIPPET_LEN));
        self.data[offset.min(end)..end].escape_ascii().to_string()
    }

    fn malformed(&self, offset: usize) -> BencodeError {
        BencodeError::MalformedField {
            offset,
            snippet: self.snippet(offset),
        }
    }

    fn format_error(&self, offset: usize) -> BencodeError {
        BencodeError::FormatError {
            offset,
            snippet: self.snippet(offset),
        }
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        match self.peek().ok_or(BencodeError::UnexpectedEof)? {
            b'i' => self.decode_integer().map(Value::Integer),
            b'0'..=b'9' => {
                let raw = self.decode_bytes()?;
                Ok(self.make_string(raw))
            }
            b'l' | b'd' if depth >= self.options.max_depth => {
                Err(BencodeError::NestingTooDeep {
                    depth: self.options.max_depth,
                })
            }
            b'l' => self.decode_list(depth),
            b'd' => self.decode_dict(depth),
            _ => Err(self.format_error(self.pos)),
        }
    }

    /// Consumes the digit run at the cursor and the `terminator` that must follow it.
    ///
    /// `token_start` is the offset reported if the token is malformed.
    fn take_digits(
        &mut self,
        token_start: usize,
        terminator: u8,
    ) -> Result<&'a [u8], BencodeError> {
        let start = self.pos;
        let data = self.data;
        while self.pos < data.len() && data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        if self.pos == start || self.peek() != Some(terminator) {
            return Err(self.malformed(token_start));
        }

        let digits = &data[start..self.pos];
        self.pos += 1;
        Ok(digits)
    }

    fn decode_integer(&mut self) -> Result<i64, BencodeError> {
        let token_start = self.pos;
        self.pos += 1;

        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        self.take_digits(token_start, b'e')?;
        // Everything between 'i' and 'e': an optional sign and the digits.
        let text = &self.data[token_start + 1..self.pos - 1];

        std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| self.malformed(token_start))
    }

    fn decode_bytes(&mut self) -> Result<&'a [u8], BencodeError> {
        let token_start = self.pos;
        let digits = self.take_digits(token_start, b':')?;

        let len = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| self.malformed(token_start))?;

        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(BencodeError::UnexpectedEof)?;

        let raw = &self.data[self.pos..end];
        self.pos = end;
        Ok(raw)
    }

    fn make_string(&self, raw: &[u8]) -> Value {
        match self.options.text_encoding {
            Some(encoding) => match encoding.decode(raw) {
                Some(text) => Value::Text(text),
                None => {
                    trace!(
                        "byte string of {} bytes is not valid {:?}, keeping raw bytes",
                        raw.len(),
                        encoding
                    );
                    Value::Bytes(Bytes::copy_from_slice(raw))
                }
            },
            None => Value::Bytes(Bytes::copy_from_slice(raw)),
        }
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut list = Vec::new();

        loop {
            match self.peek() {
                None => return Err(BencodeError::UnexpectedEof),
                Some(b'e') => break,
                Some(_) => list.push(self.decode_value(depth + 1)?),
            }
        }

        self.pos += 1;
        Ok(Value::List(list))
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut dict = Dict::new();

        loop {
            let key_offset = self.pos;
            match self.peek() {
                None => return Err(BencodeError::UnexpectedEof),
                Some(b'e') => break,
                Some(b'0'..=b'9') => {}
                Some(_) => return Err(self.format_error(key_offset)),
            }

            let key = Bytes::copy_from_slice(self.decode_bytes()?);
            let value = self.decode_value(depth + 1)?;

            if dict.contains_key(&key) {
                debug!(
                    "duplicate dictionary key \"{}\" at offset {}, keeping last value",
                    key.escape_ascii(),
                    key_offset
                );
            }
            dict.insert(key, value);
        }

        self.pos += 1;
        Ok(Value::Dict(dict))
    }
}
