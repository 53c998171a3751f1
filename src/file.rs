//! Whole-file reading and writing: compression sniffing, the Bedrock frame,
//! and the [`NbtFile`] aggregate tying the tag tree to enough layout metadata
//! to reproduce the original bytes on write.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::detect::{self, ReadOpts, HEADER_LEN};
use crate::error::{Error, Result};
use crate::{ser, Compound, Endian, Tag};

/// Compression wrapping applied to a file. Detected from magic bytes and
/// treated as an opaque whole-buffer transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zlib,
}

impl Compression {
    /// Sniff the compression from the first two bytes. Anything that is not
    /// a gzip or zlib magic is treated as uncompressed.
    pub fn detect(bytes: &[u8]) -> Compression {
        match bytes {
            [0x1f, 0x8b, ..] => Compression::Gzip,
            [0x78, 0x9c, ..] | [0x78, 0xda, ..] => Compression::Zlib,
            _ => Compression::None,
        }
    }

    pub(crate) fn decompress(self, bytes: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(bytes.to_vec()),
            Compression::Gzip => {
                let mut decoder = flate2::write::GzDecoder::new(vec![]);
                decoder.write_all(bytes).map_err(Error::Decode)?;
                decoder.finish().map_err(Error::Decode)
            }
            Compression::Zlib => {
                let mut decoder = flate2::write::ZlibDecoder::new(vec![]);
                decoder.write_all(bytes).map_err(Error::Decode)?;
                decoder.finish().map_err(Error::Decode)
            }
        }
    }

    pub(crate) fn compress(self, bytes: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(bytes.to_vec()),
            Compression::Gzip => {
                let mut encoder =
                    flate2::write::GzEncoder::new(vec![], flate2::Compression::default());
                encoder.write_all(bytes)?;
                Ok(encoder.finish()?)
            }
            Compression::Zlib => {
                let mut encoder =
                    flate2::write::ZlibEncoder::new(vec![], flate2::Compression::default());
                encoder.write_all(bytes)?;
                Ok(encoder.finish()?)
            }
        }
    }
}

/// The raw 8 bytes of a non-standard Bedrock frame, kept verbatim for
/// write-back compatibility with the tools that produced them. Only the
/// checksum byte is ever rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedrockPrefix([u8; HEADER_LEN]);

impl BedrockPrefix {
    /// Offset of the content-length checksum byte within the frame.
    const CHECKSUM_OFFSET: usize = 4;

    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> BedrockPrefix {
        BedrockPrefix(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.0
    }

    /// The content-length low byte some Bedrock tooling expects at offset 4.
    pub fn checksum_byte(&self) -> u8 {
        self.0[Self::CHECKSUM_OFFSET]
    }

    /// A copy of the prefix with the checksum byte tracking `content_len`.
    /// All other bytes are untouched.
    pub fn patched(&self, content_len: usize) -> BedrockPrefix {
        let mut bytes = self.0;
        bytes[Self::CHECKSUM_OFFSET] = (content_len & 0xff) as u8;
        BedrockPrefix(bytes)
    }
}

/// Framing state of a document, decided when the file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// No frame precedes the root tag (Bedrock headerless, or Java).
    None,
    /// A content-free all-zero frame that can be regenerated on write.
    Zero,
    /// A non-zero frame captured verbatim; written back with only its
    /// checksum byte patched.
    Prefix(BedrockPrefix),
}

impl Frame {
    /// Whether an 8-byte frame precedes the root tag on disk.
    pub fn has_header(&self) -> bool {
        !matches!(self, Frame::None)
    }

    /// True only for the all-zero frame, which carries no information and is
    /// regenerated rather than preserved.
    pub fn is_regenerable(&self) -> bool {
        matches!(self, Frame::Zero)
    }

    pub fn prefix(&self) -> Option<&BedrockPrefix> {
        match self {
            Frame::Prefix(p) => Some(p),
            _ => None,
        }
    }
}

/// Result of the cheap format sniff, for pre-flight display without a full
/// parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub compression: Compression,
    pub little_endian: bool,
    pub bedrock_header: bool,
}

/// One decoded NBT document plus the layout metadata needed to reproduce its
/// original byte layout on write.
///
/// The file owns its tree exclusively. Shared read-only access from several
/// threads is fine; concurrent mutation is the caller's problem to serialise.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
    /// The document body.
    pub root: Compound,
    pub compression: Compression,
    pub endian: Endian,
    pub frame: Frame,
    detected_score: Option<i64>,
}

impl NbtFile {
    /// A new document with Java conventions: big-endian, unframed,
    /// uncompressed.
    pub fn new(root: Compound) -> NbtFile {
        NbtFile {
            root,
            compression: Compression::None,
            endian: Endian::Big,
            frame: Frame::None,
            detected_score: None,
        }
    }

    /// Decode a document from raw file bytes, detecting compression and
    /// layout.
    pub fn read(bytes: &[u8]) -> Result<NbtFile> {
        NbtFile::read_with_opts(bytes, ReadOpts::default())
    }

    /// Like [`NbtFile::read`], but hinted layouts are attempted first.
    pub fn read_with_opts(bytes: &[u8], opts: ReadOpts) -> Result<NbtFile> {
        let compression = Compression::detect(bytes);
        let payload = compression.decompress(bytes)?;
        let det = detect::detect(&payload, opts)?;

        let frame = if det.layout.header {
            // The winning attempt consumed the header offset, so the payload
            // is known to hold at least these 8 bytes.
            let mut head = [0u8; HEADER_LEN];
            head.copy_from_slice(&payload[..HEADER_LEN]);
            if head.iter().all(|b| *b == 0) {
                Frame::Zero
            } else {
                Frame::Prefix(BedrockPrefix::from_bytes(head))
            }
        } else {
            Frame::None
        };

        Ok(NbtFile {
            root: det.root,
            compression,
            endian: det.layout.endian,
            frame,
            detected_score: Some(det.score),
        })
    }

    /// Read and decode the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<NbtFile> {
        let bytes = fs::read(path)?;
        NbtFile::read(&bytes)
    }

    /// Encode this document back to file bytes: root tag under the recorded
    /// byte order, then framing, then compression.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let content = ser::encode_root(&self.root, self.endian)?;

        let framed = match &self.frame {
            Frame::None => content,
            Frame::Zero => {
                let mut out = vec![0u8; HEADER_LEN];
                out.extend_from_slice(&content);
                out
            }
            Frame::Prefix(prefix) => {
                let prefix = prefix.patched(content.len());
                let mut out = prefix.as_bytes().to_vec();
                out.extend_from_slice(&content);
                out
            }
        };

        self.compression.compress(&framed)
    }

    /// Encode and write this document to `path`.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    pub fn little_endian(&self) -> bool {
        self.endian == Endian::Little
    }

    /// The winning layout's detection score, when this file came from
    /// [`NbtFile::read`]. Lets callers sanity-check ambiguous detections.
    pub fn detected_score(&self) -> Option<i64> {
        self.detected_score
    }
}

/// How many bytes [`detect_format`] looks at.
const SNIFF_LEN: usize = 16;

/// Cheaply guess a file's format from at most its first 16 bytes, without a
/// full parse. Compressed input reports Java conventions since answering
/// accurately would mean decompressing; the result is a pre-flight guess,
/// not ground truth.
pub fn detect_format(bytes: &[u8]) -> FormatInfo {
    let compression = Compression::detect(bytes);
    if compression != Compression::None {
        return FormatInfo {
            compression,
            little_endian: false,
            bedrock_header: false,
        };
    }

    let compound_id = u8::from(Tag::Compound);

    if bytes.len() > HEADER_LEN && bytes[0] != compound_id && bytes[HEADER_LEN] == compound_id {
        return FormatInfo {
            compression,
            little_endian: true,
            bedrock_header: true,
        };
    }

    let mut little_endian = false;
    if bytes.len() >= 3 && bytes[0] == compound_id {
        // The root name is conventionally empty or short, so whichever byte
        // order reads the smaller name length is the more plausible one.
        // Ties go to Java.
        let be = u16::from_be_bytes([bytes[1], bytes[2]]);
        let le = u16::from_le_bytes([bytes[1], bytes[2]]);
        little_endian = le < be;
    }

    FormatInfo {
        compression,
        little_endian,
        bedrock_header: false,
    }
}

/// [`detect_format`] for a file on disk, reading only the sniff window.
pub fn detect_format_path(path: impl AsRef<Path>) -> Result<FormatInfo> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    fs::File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(detect_format(&head))
}
