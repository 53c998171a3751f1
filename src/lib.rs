//! anynbt parses and writes NBT data from both *Minecraft: Java Edition* and
//! *Minecraft: Bedrock Edition*, without being told up front which of the two
//! produced the file. The game editions disagree on byte order and on whether
//! an 8-byte frame precedes the root tag, so reading an arbitrary `.dat` file
//! means choosing between several valid-looking interpretations.
//!
//! * For reading and writing whole files, including compression and layout
//!   detection, see [`NbtFile`].
//! * For the in-memory tag tree see [`Value`], [`List`] and [`Compound`].
//! * For checking a decoded document against an expected shape see [`schema`].
//!
//! # Quick example
//!
//! Building a document, writing it out and reading it back:
//!
//! ```
//! use anynbt::{Compound, NbtFile, Value};
//!
//! # fn main() -> anynbt::error::Result<()> {
//! let mut root = Compound::new();
//! root.insert("Level", Value::Int(7));
//!
//! let file = NbtFile::new(root);
//! let bytes = file.to_bytes()?;
//!
//! let back = NbtFile::read(&bytes)?;
//! assert_eq!(back.root.get("Level"), Some(&Value::Int(7)));
//! # Ok(())
//! # }
//! ```
//!
//! # Layout detection
//!
//! [`NbtFile::read`] decompresses the input if needed, then tries each known
//! layout in turn: Bedrock with its 8-byte header, Bedrock without, and Java.
//! Every attempt that parses is scored by how rich a tree it produced, and the
//! best-scoring interpretation wins. Files with a non-zero Bedrock header have
//! those bytes preserved so writing the file back keeps third-party tools
//! happy.

pub mod error;
pub mod schema;

mod compound;
mod de;
mod detect;
mod file;
mod ser;
mod value;

pub use compound::*;
pub use detect::ReadOpts;
pub use file::*;
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag type. This carries no payload and no name, only the wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// Terminates the member stream of a Compound.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// An array of Byte (i8).
    ByteArray = 7,
    /// A Unicode string.
    String = 8,
    /// A list of payloads sharing one element type.
    List = 9,
    /// A struct-like mapping of names to values.
    Compound = 10,
    /// An array of Int (i32).
    IntArray = 11,
    /// An array of Long (i64).
    LongArray = 12,
}

// Written out by hand rather than derived through a conversion crate. The tag
// set is fixed, so the small amount of repetition costs nothing in practice.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
            Tag::LongArray => 12,
        }
    }
}

/// Byte order used for every multi-byte field in a document. A document never
/// mixes byte orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Java edition byte order.
    Big,
    /// Bedrock edition byte order.
    Little,
}

impl Endian {
    pub fn opposite(self) -> Endian {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }
}
