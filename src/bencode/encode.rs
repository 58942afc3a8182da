use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::io::Write;

use bytes::Bytes;
use indexmap::IndexMap;

use super::error::BencodeError;
use super::value::Value;

/// Types with a bencode representation.
///
/// Implement [`to_bencode`](ToBencode::to_bencode) on domain objects that know
/// how to describe themselves as a [`Value`]; the encoder recurses into the
/// returned value. The provided [`write_bencode`](ToBencode::write_bencode)
/// is overridden by the built-in impls to skip the intermediate tree.
///
/// Raw bytes are `[u8]`, `Vec<u8>` or [`Bytes`]; `u8` itself is deliberately not
/// `ToBencode`, so a byte buffer never turns into a list of integers.
///
/// # Examples
///
/// ```
/// use canonical_bencode::{encode, BencodeError, Dict, ToBencode, Value};
///
/// struct Track {
///     title: String,
///     length: u32,
/// }
///
/// impl ToBencode for Track {
///     fn to_bencode(&self) -> Result<Value, BencodeError> {
///         let mut dict = Dict::new();
///         dict.insert("title".into(), self.title.to_bencode()?);
///         dict.insert("length".into(), self.length.to_bencode()?);
///         Ok(Value::Dict(dict))
///     }
/// }
///
/// let track = Track { title: "Intro".into(), length: 93 };
/// assert_eq!(encode(&track).unwrap(), b"d6:lengthi93e5:title5:Introe");
/// ```
pub trait ToBencode {
    fn to_bencode(&self) -> Result<Value, BencodeError>;

    /// Appends the canonical encoding of `self` to `out`.
    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        self.to_bencode()?.write_bencode(out)
    }
}

/// Encodes a value to canonical bencode.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted by raw bytes)
///
/// # Errors
///
/// Returns [`BencodeError::UnsupportedType`] if any part of `value` has no
/// bencode representation.
///
/// # Examples
///
/// ```
/// use canonical_bencode::encode;
/// use std::collections::HashMap;
///
/// assert_eq!(encode(&-5).unwrap(), b"i-5e");
/// assert_eq!(encode("spam").unwrap(), b"4:spam");
/// assert_eq!(encode(&vec![1, 2, 3]).unwrap(), b"li1ei2ei3ee");
///
/// let dict = HashMap::from([("spam", "eggs"), ("cow", "moo")]);
/// assert_eq!(encode(&dict).unwrap(), b"d3:cow3:moo4:spam4:eggse");
/// ```
pub fn encode<T: ToBencode + ?Sized>(value: &T) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    value.write_bencode(&mut buf)?;
    Ok(buf)
}

/// Encodes `value` and writes the bytes to `writer`.
///
/// Nothing is written if encoding fails.
pub fn encode_to<W, T>(writer: &mut W, value: &T) -> Result<(), BencodeError>
where
    W: Write + ?Sized,
    T: ToBencode + ?Sized,
{
    let buf = encode(value)?;
    writer.write_all(&buf)?;
    Ok(())
}

fn write_integer(out: &mut Vec<u8>, i: i64) -> Result<(), BencodeError> {
    write!(out, "i{}e", i)?;
    Ok(())
}

fn write_bytes(out: &mut Vec<u8>, b: &[u8]) -> Result<(), BencodeError> {
    write!(out, "{}:", b.len())?;
    out.extend_from_slice(b);
    Ok(())
}

fn write_list<'a, T, I>(out: &mut Vec<u8>, items: I) -> Result<(), BencodeError>
where
    T: ToBencode + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    out.push(b'l');
    for item in items {
        item.write_bencode(out)?;
    }
    out.push(b'e');
    Ok(())
}

/// Writes a dictionary with its keys in ascending raw-byte order.
fn write_dict<'a, K, V, I>(out: &mut Vec<u8>, entries: I) -> Result<(), BencodeError>
where
    K: AsRef<[u8]> + ?Sized + 'a,
    V: ToBencode + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut entries: Vec<(&[u8], &V)> = entries
        .into_iter()
        .map(|(k, v)| (k.as_ref(), v))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    out.push(b'd');
    for (key, value) in entries {
        write_bytes(out, key)?;
        value.write_bencode(out)?;
    }
    out.push(b'e');
    Ok(())
}

fn dict_value<'a, K, V, I>(entries: I) -> Result<Value, BencodeError>
where
    K: AsRef<[u8]> + ?Sized + 'a,
    V: ToBencode + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| {
            v.to_bencode()
                .map(|v| (Bytes::copy_from_slice(k.as_ref()), v))
        })
        .collect()
}

impl ToBencode for Value {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        Ok(self.clone())
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        match self {
            Value::Integer(i) => write_integer(out, *i),
            Value::Bytes(b) => write_bytes(out, b),
            Value::Text(s) => write_bytes(out, s.as_bytes()),
            Value::List(l) => write_list(out, l),
            Value::Dict(d) => write_dict(out, d),
        }
    }
}

impl<T: ToBencode + ?Sized> ToBencode for &T {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        (**self).to_bencode()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        (**self).write_bencode(out)
    }
}

impl<T: ToBencode + ?Sized> ToBencode for Box<T> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        (**self).to_bencode()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        (**self).write_bencode(out)
    }
}

impl ToBencode for bool {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        Ok(Value::from(*self))
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_integer(out, i64::from(*self))
    }
}

macro_rules! impl_lossless_integer {
    ($($t:ty),*) => {$(
        impl ToBencode for $t {
            fn to_bencode(&self) -> Result<Value, BencodeError> {
                Ok(Value::Integer(i64::from(*self)))
            }

            fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
                write_integer(out, i64::from(*self))
            }
        }
    )*};
}

// Types that may not fit in an i64 are checked at encode time.
macro_rules! impl_checked_integer {
    ($($t:ty),*) => {$(
        impl ToBencode for $t {
            fn to_bencode(&self) -> Result<Value, BencodeError> {
                i64::try_from(*self)
                    .map(Value::Integer)
                    .map_err(|_| BencodeError::unsupported(self))
            }

            fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
                let i = i64::try_from(*self).map_err(|_| BencodeError::unsupported(self))?;
                write_integer(out, i)
            }
        }
    )*};
}

impl_lossless_integer!(i8, i16, i32, i64, u16, u32);
impl_checked_integer!(isize, i128, u64, usize, u128);

impl ToBencode for str {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        Ok(Value::string(self))
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_bytes(out, self.as_bytes())
    }
}

impl ToBencode for String {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        self.as_str().to_bencode()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_bytes(out, self.as_bytes())
    }
}

impl ToBencode for [u8] {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        Ok(Value::from(self))
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_bytes(out, self)
    }
}

impl ToBencode for Vec<u8> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        self.as_slice().to_bencode()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_bytes(out, self)
    }
}

impl ToBencode for Bytes {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        Ok(Value::Bytes(self.clone()))
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_bytes(out, self)
    }
}

impl<T: ToBencode> ToBencode for [T] {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        self.iter().map(ToBencode::to_bencode).collect()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_list(out, self)
    }
}

impl<T: ToBencode> ToBencode for Vec<T> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        self.as_slice().to_bencode()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_list(out, self)
    }
}

impl<T: ToBencode> ToBencode for VecDeque<T> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        self.iter().map(ToBencode::to_bencode).collect()
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_list(out, self)
    }
}

impl<K: AsRef<[u8]>, V: ToBencode> ToBencode for BTreeMap<K, V> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        dict_value(self)
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_dict(out, self)
    }
}

impl<K: AsRef<[u8]>, V: ToBencode, S: BuildHasher> ToBencode for HashMap<K, V, S> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        dict_value(self)
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_dict(out, self)
    }
}

impl<K: AsRef<[u8]>, V: ToBencode, S: BuildHasher> ToBencode for IndexMap<K, V, S> {
    fn to_bencode(&self) -> Result<Value, BencodeError> {
        dict_value(self)
    }

    fn write_bencode(&self, out: &mut Vec<u8>) -> Result<(), BencodeError> {
        write_dict(out, self)
    }
}
