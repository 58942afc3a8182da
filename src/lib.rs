//! canonical-bencode - a strict, canonical bencode codec
//!
//! Decodes bencoded buffers into [`Value`] trees with precise error reporting
//! and encodes values back to canonical bytes suitable for hashing.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding and file helpers

pub mod bencode;

pub use bencode::{
    decode, encode, encode_to, read, read_from, write, write_to, BencodeError, DecodeOptions,
    Decoder, Dict, TextEncoding, ToBencode, Value,
};
