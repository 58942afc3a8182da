//! File and handle convenience wrappers around [`decode`] and [`encode`].
//!
//! Handles opened here are owned by the call and closed when it returns,
//! including on error. Handles passed in by the caller stay open.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use super::decode::decode;
use super::encode::{encode, encode_to, ToBencode};
use super::error::BencodeError;
use super::value::Value;

/// Reads and decodes the file at `path`, rejecting trailing data.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> Result<(), canonical_bencode::BencodeError> {
/// let metainfo = canonical_bencode::read("release.torrent")?;
/// let name = metainfo.get(b"info").and_then(|info| info.get(b"name"));
/// # Ok(())
/// # }
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<Value, BencodeError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    debug!("decoding bencode from {}", path.display());
    read_from(&mut file)
}

/// Reads `reader` to its end and decodes the contents, rejecting trailing data.
pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Value, BencodeError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    debug!("read {} bytes of bencode", data.len());
    decode(&data)
}

/// Encodes `value` into the file at `path`, creating or truncating it.
///
/// The value is encoded before the file is opened, so an unsupported value
/// leaves any existing file untouched.
pub fn write<P, T>(path: P, value: &T) -> Result<(), BencodeError>
where
    P: AsRef<Path>,
    T: ToBencode + ?Sized,
{
    let path = path.as_ref();
    let data = encode(value)?;
    let mut file = File::create(path)?;
    file.write_all(&data)?;
    file.flush()?;
    debug!("wrote {} bytes of bencode to {}", data.len(), path.display());
    Ok(())
}

/// Encodes `value` and writes it to `writer`, flushing but not closing it.
pub fn write_to<W, T>(writer: &mut W, value: &T) -> Result<(), BencodeError>
where
    W: Write + ?Sized,
    T: ToBencode + ?Sized,
{
    encode_to(writer, value)?;
    writer.flush()?;
    Ok(())
}
