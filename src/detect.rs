//! Layout detection. The same byte stream can parse under several
//! (byte order, header, offset) assumptions, and only one is right for a
//! given file. Each candidate is attempted as an independent, side-effect-free
//! parse of the whole tree, scored, and the best score wins. A later
//! candidate may outscore an earlier success, so there is no short-circuit.

use log::debug;

use crate::de;
use crate::error::{Error, Result};
use crate::{Compound, Endian};

/// Byte length of the Bedrock frame preceding the root tag.
pub(crate) const HEADER_LEN: usize = 8;

/// Caller hints for [`crate::NbtFile::read_with_opts`]. A hint does not
/// force an interpretation; it moves matching candidates to the front of the
/// attempt order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOpts {
    pub endian: Option<Endian>,
    pub header: Option<bool>,
}

impl ReadOpts {
    pub fn new() -> ReadOpts {
        ReadOpts::default()
    }

    pub fn endian(mut self, endian: Endian) -> ReadOpts {
        self.endian = Some(endian);
        self
    }

    pub fn header(mut self, header: bool) -> ReadOpts {
        self.header = Some(header);
        self
    }

    fn mismatches(&self, layout: Layout) -> usize {
        let mut n = 0;
        if matches!(self.endian, Some(e) if e != layout.endian) {
            n += 1;
        }
        if matches!(self.header, Some(h) if h != layout.header) {
            n += 1;
        }
        n
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub endian: Endian,
    pub header: bool,
}

impl Layout {
    fn offset(self) -> usize {
        if self.header {
            HEADER_LEN
        } else {
            0
        }
    }

    fn opposite_endian(self) -> Layout {
        Layout {
            endian: self.endian.opposite(),
            header: self.header,
        }
    }
}

pub(crate) struct Detection {
    pub root: Compound,
    pub layout: Layout,
    pub score: i64,
}

/// The fixed attempt order: Bedrock-with-header is the most constrained and
/// least likely to false-positive, so it goes first; Java last.
const CANDIDATES: [Layout; 3] = [
    Layout {
        endian: Endian::Little,
        header: true,
    },
    Layout {
        endian: Endian::Little,
        header: false,
    },
    Layout {
        endian: Endian::Big,
        header: false,
    },
];

/// Try every candidate layout against `payload` (already decompressed) and
/// return the best-scoring successful parse. Fails with [`Error::Format`]
/// wrapping the last parse error if nothing succeeds.
pub(crate) fn detect(payload: &[u8], opts: ReadOpts) -> Result<Detection> {
    let mut candidates = CANDIDATES;
    // Hinted combinations are tried first; the sort is stable so the fixed
    // priority order breaks ties.
    candidates.sort_by_key(|c| opts.mismatches(*c));

    let mut best: Option<Detection> = None;
    let mut last_err: Option<Error> = None;

    for (i, layout) in candidates.iter().enumerate() {
        let is_last = i + 1 == candidates.len();
        match attempt(payload, *layout) {
            Ok(mut det) => {
                if det.root.is_empty() && !is_last {
                    // A wrong byte order often "succeeds" with zero members.
                    // Retry the same offset with the opposite order; a richer
                    // tree from the retry wins.
                    if let Ok(retry) = attempt(payload, layout.opposite_endian()) {
                        if !retry.root.is_empty() && retry.score > det.score {
                            det = retry;
                        }
                    }
                }
                match &best {
                    Some(b) if b.score >= det.score => {}
                    _ => best = Some(det),
                }
            }
            Err(e) => last_err = Some(e),
        }
    }

    match best {
        Some(det) => {
            debug!(
                "detected nbt layout: endian={:?} header={} score={}",
                det.layout.endian, det.layout.header, det.score
            );
            Ok(det)
        }
        None => Err(Error::Format(Box::new(
            last_err.unwrap_or(Error::UnexpectedEod("root tag")),
        ))),
    }
}

/// One parse attempt. The score rewards a richer root and mildly penalises
/// the bytes consumed by a header, so a real zero-offset parse beats a
/// spurious low-member one.
fn attempt(payload: &[u8], layout: Layout) -> Result<Detection> {
    let offset = layout.offset();
    if payload.len() < offset {
        return Err(Error::UnexpectedEod("bedrock header"));
    }
    let root = de::read_root(&payload[offset..], layout.endian)?;
    let score = root.len() as i64 * 1000 - offset as i64;
    Ok(Detection {
        root,
        layout,
        score,
    })
}
