//! Wire decoding: a bounds-checked cursor over a byte slice plus the
//! recursive tag parser. Every read checks the remaining buffer first, so a
//! wrong-endianness or wrong-offset parse attempt fails with a cheap
//! [`Error::UnexpectedEod`] rather than crashing or allocating wildly.

use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::{Compound, Endian, List, Tag, Value};

pub(crate) struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(buf: &'a [u8], endian: Endian) -> Decoder<'a> {
        Decoder {
            buf,
            pos: 0,
            endian,
        }
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(Error::UnexpectedEod(field))?;
        if end > self.buf.len() {
            return Err(Error::UnexpectedEod(field));
        }
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Take `count * width` bytes, guarding the multiply.
    fn take_mul(&mut self, count: usize, width: usize, field: &'static str) -> Result<&'a [u8]> {
        let n = count
            .checked_mul(width)
            .ok_or(Error::UnexpectedEod(field))?;
        self.take(n, field)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    fn i8(&mut self, field: &'static str) -> Result<i8> {
        Ok(self.u8(field)? as i8)
    }

    fn u16(&mut self, field: &'static str) -> Result<u16> {
        let bs = self.take(2, field)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u16(bs),
            Endian::Little => LittleEndian::read_u16(bs),
        })
    }

    fn i16(&mut self, field: &'static str) -> Result<i16> {
        let bs = self.take(2, field)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_i16(bs),
            Endian::Little => LittleEndian::read_i16(bs),
        })
    }

    fn i32(&mut self, field: &'static str) -> Result<i32> {
        let bs = self.take(4, field)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_i32(bs),
            Endian::Little => LittleEndian::read_i32(bs),
        })
    }

    fn i64(&mut self, field: &'static str) -> Result<i64> {
        let bs = self.take(8, field)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_i64(bs),
            Endian::Little => LittleEndian::read_i64(bs),
        })
    }

    fn f32(&mut self, field: &'static str) -> Result<f32> {
        let bs = self.take(4, field)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_f32(bs),
            Endian::Little => LittleEndian::read_f32(bs),
        })
    }

    fn f64(&mut self, field: &'static str) -> Result<f64> {
        let bs = self.take(8, field)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_f64(bs),
            Endian::Little => LittleEndian::read_f64(bs),
        })
    }

    fn tag(&mut self) -> Result<Tag> {
        let b = self.u8("tag id")?;
        Tag::try_from(b).map_err(|_| Error::InvalidTag(b))
    }

    /// A length-prefixed count for the array tags. A negative count can never
    /// be satisfied by the buffer, so it is reported the same way as running
    /// out of data, which lets layout detection discard the attempt.
    fn array_count(&mut self, field: &'static str) -> Result<usize> {
        let n = self.i32(field)?;
        usize::try_from(n).map_err(|_| Error::UnexpectedEod(field))
    }

    fn string(&mut self, field: &'static str) -> Result<String> {
        let len = self.u16(field)? as usize;
        let bytes = self.take(len, field)?;
        Ok(cesu8::from_java_cesu8(bytes)
            .map_err(|_| Error::Nonunicode(bytes.to_vec()))?
            .into_owned())
    }

    fn skip_string(&mut self, field: &'static str) -> Result<()> {
        let len = self.u16(field)? as usize;
        self.take(len, field)?;
        Ok(())
    }
}

/// Parse the standalone root tag at the start of `buf`. The root must be a
/// compound; its name is conventionally empty and is skipped unread.
pub(crate) fn read_root(buf: &[u8], endian: Endian) -> Result<Compound> {
    let mut dec = Decoder::new(buf, endian);
    let tag = dec.tag()?;
    if tag != Tag::Compound {
        return Err(Error::RootNotCompound(tag));
    }
    dec.skip_string("root name")?;
    read_compound_body(&mut dec)
}

/// Member loop of a compound: (tag, name, payload) triples until an End tag.
/// Duplicate names overwrite, last write wins.
fn read_compound_body(dec: &mut Decoder) -> Result<Compound> {
    let mut compound = Compound::new();
    loop {
        let tag = dec.tag()?;
        if tag == Tag::End {
            return Ok(compound);
        }
        let name = dec.string("member name")?;
        let value = read_payload(dec, tag)?;
        compound.insert(name, value);
    }
}

/// Payload-only parse for one tag type. Type id and name, where present, are
/// consumed by the enclosing context.
fn read_payload(dec: &mut Decoder, tag: Tag) -> Result<Value> {
    match tag {
        // End is consumed by the compound loop and never reaches here from
        // valid data.
        Tag::End => Err(Error::InvalidTag(Tag::End.into())),
        Tag::Byte => Ok(Value::Byte(dec.i8("byte payload")?)),
        Tag::Short => Ok(Value::Short(dec.i16("short payload")?)),
        Tag::Int => Ok(Value::Int(dec.i32("int payload")?)),
        Tag::Long => Ok(Value::Long(dec.i64("long payload")?)),
        Tag::Float => Ok(Value::Float(dec.f32("float payload")?)),
        Tag::Double => Ok(Value::Double(dec.f64("double payload")?)),
        Tag::String => Ok(Value::String(dec.string("string payload")?)),
        Tag::ByteArray => {
            let count = dec.array_count("byte array length")?;
            let bytes = dec.take(count, "byte array payload")?;
            Ok(Value::ByteArray(bytes.iter().map(|b| *b as i8).collect()))
        }
        Tag::IntArray => {
            let count = dec.array_count("int array length")?;
            let bytes = dec.take_mul(count, 4, "int array payload")?;
            let mut out = vec![0i32; count];
            match dec.endian {
                Endian::Big => BigEndian::read_i32_into(bytes, &mut out),
                Endian::Little => LittleEndian::read_i32_into(bytes, &mut out),
            }
            Ok(Value::IntArray(out))
        }
        Tag::LongArray => {
            let count = dec.array_count("long array length")?;
            let bytes = dec.take_mul(count, 8, "long array payload")?;
            let mut out = vec![0i64; count];
            match dec.endian {
                Endian::Big => BigEndian::read_i64_into(bytes, &mut out),
                Endian::Little => LittleEndian::read_i64_into(bytes, &mut out),
            }
            Ok(Value::LongArray(out))
        }
        Tag::List => {
            let element_tag = dec.tag()?;
            let count = dec.array_count("list length")?;
            if element_tag == Tag::End && count > 0 {
                // A non-empty list of End markers carries no representable
                // payload.
                return Err(Error::InvalidTag(Tag::End.into()));
            }
            let mut values = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                values.push(read_payload(dec, element_tag)?);
            }
            // Keep the declared element tag even when the list is empty so an
            // unmutated document re-encodes byte-for-byte.
            Ok(Value::List(List::new(element_tag, values)?))
        }
        Tag::Compound => Ok(Value::Compound(read_compound_body(dec)?)),
    }
}
