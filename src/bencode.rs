//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format BitTorrent uses for `.torrent` files
//! and tracker responses. Encoded output is canonical: the same value tree
//! always produces the same bytes, so the output can be hashed.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ## Decoding
//!
//! ```
//! use canonical_bencode::{decode, Value};
//!
//! let value = decode(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(value.get(b"spam").and_then(Value::as_list).map(Vec::len), Some(2));
//! ```
//!
//! ## Encoding
//!
//! Anything implementing [`ToBencode`] can be encoded: [`Value`] trees,
//! integers, strings, byte buffers, sequences and maps with byte-like keys.
//!
//! ```
//! use canonical_bencode::{encode, Dict, Value};
//!
//! let mut info = Dict::new();
//! info.insert("piece length".into(), Value::Integer(16384));
//! info.insert("name".into(), Value::string("example.txt"));
//!
//! // Keys come out sorted regardless of insertion order.
//! assert_eq!(
//!     encode(&Value::Dict(info)).unwrap(),
//!     b"d4:name11:example.txt12:piece lengthi16384ee"
//! );
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::MalformedField`] - Bad length prefix or integer
//! - [`BencodeError::FormatError`] - A byte that cannot start a value
//! - [`BencodeError::TrailingData`] - Extra data after the value
//! - [`BencodeError::NestingTooDeep`] - Container nesting over the limit
//! - [`BencodeError::UnsupportedType`] - A value with no bencode form
//! - [`BencodeError::Io`] - File or handle failure in [`read`]/[`write`]
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod stream;
mod value;

pub use decode::{decode, DecodeOptions, Decoder, TextEncoding, DEFAULT_MAX_DEPTH, SNIPPET_LEN};
pub use encode::{encode, encode_to, ToBencode};
pub use error::BencodeError;
pub use stream::{read, read_from, write, write_to};
pub use value::{Dict, Value};
