//! Wire encoding: an endian-aware writer over a growable buffer plus the
//! recursive payload encoder. Each value emits exactly its payload; type ids
//! and names are written by the enclosing context, matching how the format
//! nests.

use std::convert::TryFrom;

use crate::error::{Error, Result};
use crate::{Compound, Endian, List, Tag, Value};

pub(crate) struct Encoder {
    out: Vec<u8>,
    endian: Endian,
}

impl Encoder {
    pub(crate) fn new(endian: Endian) -> Encoder {
        Encoder {
            out: Vec::new(),
            endian,
        }
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.out
    }

    fn tag(&mut self, tag: Tag) {
        self.out.push(tag.into());
    }

    fn i8(&mut self, v: i8) {
        self.out.push(v as u8);
    }

    fn u16(&mut self, v: u16) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn i16(&mut self, v: i16) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn i32(&mut self, v: i32) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn i64(&mut self, v: i64) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn f32(&mut self, v: f32) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    fn f64(&mut self, v: f64) {
        match self.endian {
            Endian::Big => self.out.extend_from_slice(&v.to_be_bytes()),
            Endian::Little => self.out.extend_from_slice(&v.to_le_bytes()),
        }
    }

    /// u16 length prefix then modified UTF-8 bytes. The prefix counts encoded
    /// bytes, not characters.
    fn string(&mut self, s: &str) -> Result<()> {
        let encoded = cesu8::to_java_cesu8(s);
        let len = u16::try_from(encoded.len()).map_err(|_| Error::LenOverflow {
            what: "string",
            len: encoded.len(),
        })?;
        self.u16(len);
        self.out.extend_from_slice(&encoded);
        Ok(())
    }

    /// i32 element count for the array and list tags.
    fn len(&mut self, what: &'static str, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::LenOverflow { what, len })?;
        self.i32(len);
        Ok(())
    }
}

/// Encode a full standalone root tag: compound id, empty name, payload. This
/// is the uncompressed, unframed "content" of a document on disk.
pub(crate) fn encode_root(root: &Compound, endian: Endian) -> Result<Vec<u8>> {
    let mut enc = Encoder::new(endian);
    enc.tag(Tag::Compound);
    enc.u16(0);
    write_compound(&mut enc, root)?;
    Ok(enc.into_bytes())
}

/// Payload-only encoding of one value into `enc`.
pub(crate) fn write_payload(enc: &mut Encoder, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => enc.i8(*v),
        Value::Short(v) => enc.i16(*v),
        Value::Int(v) => enc.i32(*v),
        Value::Long(v) => enc.i64(*v),
        Value::Float(v) => enc.f32(*v),
        Value::Double(v) => enc.f64(*v),
        Value::String(s) => enc.string(s)?,
        Value::ByteArray(vs) => {
            enc.len("byte array", vs.len())?;
            for v in vs {
                enc.i8(*v);
            }
        }
        Value::IntArray(vs) => {
            enc.len("int array", vs.len())?;
            for v in vs {
                enc.i32(*v);
            }
        }
        Value::LongArray(vs) => {
            enc.len("long array", vs.len())?;
            for v in vs {
                enc.i64(*v);
            }
        }
        Value::List(list) => write_list(enc, list)?,
        Value::Compound(c) => write_compound(enc, c)?,
    }
    Ok(())
}

/// Element type id, i32 count, then each element's payload with no
/// per-element type or name.
fn write_list(enc: &mut Encoder, list: &List) -> Result<()> {
    enc.tag(list.element_tag());
    enc.len("list", list.len())?;
    for v in list.iter() {
        write_payload(enc, v)?;
    }
    Ok(())
}

/// For each member: type id, name, payload. Terminated by an End marker.
fn write_compound(enc: &mut Encoder, compound: &Compound) -> Result<()> {
    for (name, value) in compound.iter() {
        enc.tag(value.tag());
        enc.string(name)?;
        write_payload(enc, value)?;
    }
    enc.tag(Tag::End);
    Ok(())
}
