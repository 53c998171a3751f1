//! Contains the Error and Result types used throughout the crate.

use crate::schema::SchemaReport;
use crate::Tag;

/// Errors that can occur while decoding, encoding or validating NBT data.
#[derive(Debug)]
pub enum Error {
    /// Filesystem-level failure reading or writing a file.
    Io(std::io::Error),
    /// The compressed stream was corrupt. Surfaced immediately, never retried.
    Decode(std::io::Error),
    /// No candidate layout produced a usable tree. Wraps the last underlying
    /// parse error for diagnostics.
    Format(Box<Error>),
    /// A field read would have gone past the end of the buffer. Names the
    /// field being read at the time.
    UnexpectedEod(&'static str),
    /// A tag id outside 0..=12.
    InvalidTag(u8),
    /// String bytes were not valid modified UTF-8. Carries the raw bytes.
    Nonunicode(Vec<u8>),
    /// A checked numeric constructor was given a value outside the tag's
    /// inclusive range.
    Range { tag: Tag, value: i64 },
    /// A list was constructed with an element of the wrong type.
    ListMixed { expected: Tag, found: Tag },
    /// The root tag of a document was something other than a Compound.
    RootNotCompound(Tag),
    /// A length did not fit its wire-format prefix.
    LenOverflow { what: &'static str, len: usize },
    /// The document did not match the expected schema. Carries every missing
    /// and extraneous member found, not just the first.
    Schema(SchemaReport),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for buffer exhaustion during a parse attempt. Layout detection
    /// uses this class of error to cheaply reject wrong candidates.
    pub fn is_eod(&self) -> bool {
        matches!(self, Error::UnexpectedEod(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Decode(e) => write!(f, "corrupt compressed stream: {}", e),
            Error::Format(e) => write!(f, "unrecognised nbt layout: {}", e),
            Error::UnexpectedEod(field) => {
                write!(f, "eof: ran out of input reading {}", field)
            }
            Error::InvalidTag(t) => write!(f, "invalid nbt tag value: {}", t),
            Error::Nonunicode(data) => write!(
                f,
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            Error::Range { tag, value } => {
                write!(f, "value {} out of range for {:?}", value, tag)
            }
            Error::ListMixed { expected, found } => write!(
                f,
                "mixed list: declared element type {:?}, found {:?}",
                expected, found
            ),
            Error::RootNotCompound(tag) => {
                write!(f, "invalid nbt: root tag was {:?}, not a compound", tag)
            }
            Error::LenOverflow { what, len } => {
                write!(f, "{} length {} does not fit the wire format", what, len)
            }
            Error::Schema(report) => write!(f, "{}", report),
        }
    }
}

impl std::error::Error for Error {}
