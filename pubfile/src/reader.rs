//! Decoding pub catalogs from a byte buffer.
//!
//! [`decode`] validates the magic tag, exposes the header as read, then walks
//! the records with the payload type's [`Schema`](crate::schema::Schema).
//! A buffer that ends mid-record is not an error: the complete records are
//! returned and [`DecodeStatus::Truncated`] says where reading stopped.
//!
//! ```
//! use pubfile::{Item, PubFile, Record};
//!
//! let mut file = PubFile::<Item>::new(1);
//! file.push(Record::new("Sword", Item::default()));
//! file.push(Record::eof());
//! let bytes = file.encode().unwrap();
//!
//! let decoded = PubFile::<Item>::decode(&bytes).unwrap();
//! assert!(!decoded.status.is_truncated());
//! assert_eq!(decoded.file.records.len(), 2);
//! ```

use std::fmt;

use log::{debug, warn};

use crate::format::{PubData, PubFile, Record};
use crate::header::{is_sentinel, Header, HEADER_SIZE};
use crate::number::decode_number;

/// Errors raised while decoding or encoding a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PubError {
    /// The magic tag names a different catalog kind.
    FormatMismatch { expected: [u8; 3], found: [u8; 3] },
    /// The magic tag names no known catalog kind.
    UnknownMagic([u8; 3]),
    /// Fewer bytes than a full header.
    ShortHeader(usize),
    /// A payload slice ends before the bytes a field or schema needs.
    ShortPayload { expected: usize, found: usize },
    /// A value does not fit its field and overflow is rejected.
    FieldOverflow {
        field: &'static str,
        value: u64,
        limit: u64,
    },
    /// A record other than the sentinel has no data to write.
    MissingPayload { index: usize, name: String },
    /// The sentinel record is followed by further records.
    MisplacedSentinel { index: usize },
    /// A field table is inconsistent.
    Schema(String),
}

impl fmt::Display for PubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PubError::FormatMismatch { expected, found } => write!(
                f,
                "bad magic: expected {}, found {}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(found)
            ),
            PubError::UnknownMagic(found) => {
                write!(f, "unknown magic {:?}", String::from_utf8_lossy(found))
            }
            PubError::ShortHeader(n) => write!(f, "short header: {} bytes", n),
            PubError::ShortPayload { expected, found } => {
                write!(f, "short payload: need {} bytes, got {}", expected, found)
            }
            PubError::FieldOverflow {
                field,
                value,
                limit,
            } => write!(f, "{} = {} does not fit (limit {})", field, value, limit),
            PubError::MissingPayload { index, name } => {
                write!(f, "record {} ({:?}) has no data", index, name)
            }
            PubError::MisplacedSentinel { index } => {
                write!(f, "sentinel record at {} is not last", index)
            }
            PubError::Schema(m) => write!(f, "{}", m),
        }
    }
}

impl std::error::Error for PubError {}

pub type Result<T> = std::result::Result<T, PubError>;

/// Whether every declared record was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    Complete,
    /// The buffer ended before `declared` records; `offset` is where the
    /// first incomplete record starts.
    Truncated {
        declared: u32,
        decoded: usize,
        offset: usize,
    },
}

impl DecodeStatus {
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeStatus::Truncated { .. })
    }
}

/// A (possibly partial) catalog and how reading ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub file: PubFile<T>,
    pub status: DecodeStatus,
}

impl<T> Decoded<T> {
    pub fn into_file(self) -> PubFile<T> {
        self.file
    }
}

/// Bounded forward cursor over the record area.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let out = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(out)
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }
}

/// Read one record, or `None` if the buffer ends inside it.
fn read_record<T: PubData>(cur: &mut Cursor<'_>) -> Option<Record<T>> {
    let len = decode_number(cur.take(1)?) as usize;
    let name = String::from_utf8_lossy(cur.take(len)?).into_owned();
    if is_sentinel(&name) {
        return Some(Record { name, data: None });
    }
    let payload = cur.take(T::SCHEMA.data_size)?;
    Some(Record {
        name,
        data: Some(T::read(payload)),
    })
}

/// Decode a catalog of payload type `T` from `buf`.
pub fn decode<T: PubData>(buf: &[u8]) -> Result<Decoded<T>> {
    let schema = T::SCHEMA;
    if buf.len() >= 3 && buf[0..3] != schema.magic {
        let mut found = [0u8; 3];
        found.copy_from_slice(&buf[0..3]);
        return Err(PubError::FormatMismatch {
            expected: schema.magic,
            found,
        });
    }
    let header = Header::parse(buf).ok_or(PubError::ShortHeader(buf.len()))?;

    let mut cur = Cursor {
        buf,
        pos: HEADER_SIZE,
    };
    let mut records: Vec<Record<T>> = Vec::with_capacity(header.count.min(4096) as usize);
    let mut status = DecodeStatus::Complete;
    for _ in 0..header.count {
        if cur.is_empty() {
            status = DecodeStatus::Truncated {
                declared: header.count,
                decoded: records.len(),
                offset: cur.pos,
            };
            break;
        }
        let start = cur.pos;
        match read_record::<T>(&mut cur) {
            Some(r) => {
                debug!("{} record {}: {:?}", schema.kind, records.len(), r.name);
                records.push(r);
            }
            None => {
                status = DecodeStatus::Truncated {
                    declared: header.count,
                    decoded: records.len(),
                    offset: start,
                };
                break;
            }
        }
    }

    if let DecodeStatus::Truncated {
        declared,
        decoded,
        offset,
    } = status
    {
        warn!(
            "{} truncated at byte {}: {} of {} records",
            schema.kind, offset, decoded, declared
        );
    } else if !cur.is_empty() {
        debug!(
            "{}: {} trailing bytes after last record",
            schema.kind,
            buf.len() - cur.pos
        );
    }
    if let Some(i) = records.iter().position(Record::is_sentinel) {
        if i + 1 != records.len() {
            warn!("{}: sentinel at {} is followed by records", schema.kind, i);
        }
    }

    Ok(Decoded {
        file: PubFile {
            magic: header.magic,
            checksum: header.checksum,
            declared_count: header.count,
            version: header.version,
            records,
        },
        status,
    })
}
