//! In-memory catalog types shared by every pub format.

use crate::header::{is_sentinel, SENTINEL};
use crate::reader::{self, DecodeStatus, Decoded, PubError, Result};
use crate::schema::Schema;
use crate::writer::{self, EncodeOptions};
use crate::{Class, Item, Npc, Skill};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Payload type of one catalog kind.
///
/// Implementors read a payload of exactly `SCHEMA.data_size` bytes and
/// write one into a buffer of that size.
pub trait PubData: Sized {
    const SCHEMA: &'static Schema;

    fn read(payload: &[u8]) -> Self;

    fn write(&self, payload: &mut [u8], opts: &EncodeOptions) -> Result<()>;
}

/// One named entry. Sentinel records carry no data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))
)]
pub struct Record<T> {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub data: Option<T>,
}

impl<T> Record<T> {
    pub fn new<S: Into<String>>(name: S, data: T) -> Self {
        Record {
            name: name.into(),
            data: Some(data),
        }
    }

    /// The closing `eof` record.
    pub fn eof() -> Self {
        Record {
            name: SENTINEL.to_string(),
            data: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        is_sentinel(&self.name)
    }
}

/// A decoded or caller-assembled catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PubFile<T> {
    #[cfg_attr(feature = "serde", serde(with = "magic_str"))]
    pub magic: [u8; 3],
    /// Checksum halves as read; ignored when encoding.
    #[cfg_attr(feature = "serde", serde(default))]
    pub checksum: [u32; 2],
    /// Count from the header; the writer emits `records.len()` instead.
    #[cfg_attr(feature = "serde", serde(default))]
    pub declared_count: u32,
    pub version: u8,
    pub records: Vec<Record<T>>,
}

impl<T: PubData> PubFile<T> {
    pub fn new(version: u8) -> Self {
        PubFile {
            magic: T::SCHEMA.magic,
            checksum: [0, 0],
            declared_count: 0,
            version,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: Record<T>) {
        self.records.push(record);
    }

    /// First record whose name equals `name` exactly.
    pub fn get(&self, name: &str) -> Option<&Record<T>> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Records carrying a payload, in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &T)> {
        self.records
            .iter()
            .filter_map(|r| r.data.as_ref().map(|d| (r.name.as_str(), d)))
    }

    pub fn decode(buf: &[u8]) -> Result<Decoded<T>> {
        reader::decode(buf)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        writer::encode(self)
    }

    pub fn encode_with_options(&self, opts: EncodeOptions) -> Result<Vec<u8>> {
        writer::encode_with_options(self, opts)
    }
}

/// The four catalog kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PubKind {
    Item,
    Npc,
    Class,
    Skill,
}

impl PubKind {
    pub const ALL: [PubKind; 4] = [PubKind::Item, PubKind::Npc, PubKind::Class, PubKind::Skill];

    pub fn schema(self) -> &'static Schema {
        match self {
            PubKind::Item => Item::SCHEMA,
            PubKind::Npc => Npc::SCHEMA,
            PubKind::Class => Class::SCHEMA,
            PubKind::Skill => Skill::SCHEMA,
        }
    }

    pub fn magic(self) -> [u8; 3] {
        self.schema().magic
    }

    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.magic()[..] == *magic)
    }

    /// Kind named by the first three bytes of `buf`.
    pub fn detect(buf: &[u8]) -> Option<Self> {
        buf.get(0..3).and_then(Self::from_magic)
    }
}

/// A decoded catalog of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyPub {
    Item(Decoded<Item>),
    Npc(Decoded<Npc>),
    Class(Decoded<Class>),
    Skill(Decoded<Skill>),
}

/// Header-level facts about a decoded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub kind: PubKind,
    pub version: u8,
    pub checksum: [u32; 2],
    pub declared_count: u32,
    pub records: usize,
    pub truncated: bool,
}

fn summarize<T: PubData>(kind: PubKind, d: &Decoded<T>) -> Summary {
    Summary {
        kind,
        version: d.file.version,
        checksum: d.file.checksum,
        declared_count: d.file.declared_count,
        records: d.file.records.len(),
        truncated: d.status.is_truncated(),
    }
}

impl AnyPub {
    pub fn kind(&self) -> PubKind {
        match self {
            AnyPub::Item(_) => PubKind::Item,
            AnyPub::Npc(_) => PubKind::Npc,
            AnyPub::Class(_) => PubKind::Class,
            AnyPub::Skill(_) => PubKind::Skill,
        }
    }

    pub fn status(&self) -> DecodeStatus {
        match self {
            AnyPub::Item(d) => d.status,
            AnyPub::Npc(d) => d.status,
            AnyPub::Class(d) => d.status,
            AnyPub::Skill(d) => d.status,
        }
    }

    pub fn summary(&self) -> Summary {
        let kind = self.kind();
        match self {
            AnyPub::Item(d) => summarize(kind, d),
            AnyPub::Npc(d) => summarize(kind, d),
            AnyPub::Class(d) => summarize(kind, d),
            AnyPub::Skill(d) => summarize(kind, d),
        }
    }
}

/// Decode `buf` as whichever catalog its magic names.
pub fn decode_any(buf: &[u8]) -> Result<AnyPub> {
    let kind = match PubKind::detect(buf) {
        Some(k) => k,
        None if buf.len() < 3 => return Err(PubError::ShortHeader(buf.len())),
        None => {
            let mut found = [0u8; 3];
            found.copy_from_slice(&buf[0..3]);
            return Err(PubError::UnknownMagic(found));
        }
    };
    Ok(match kind {
        PubKind::Item => AnyPub::Item(reader::decode(buf)?),
        PubKind::Npc => AnyPub::Npc(reader::decode(buf)?),
        PubKind::Class => AnyPub::Class(reader::decode(buf)?),
        PubKind::Skill => AnyPub::Skill(reader::decode(buf)?),
    })
}

#[cfg(feature = "serde")]
mod magic_str {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(magic: &[u8; 3], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&String::from_utf8_lossy(magic))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 3], D::Error> {
        let s = String::deserialize(d)?;
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return Err(D::Error::custom(format!("magic must be 3 bytes, got {:?}", s)));
        }
        let mut magic = [0u8; 3];
        magic.copy_from_slice(bytes);
        Ok(magic)
    }
}
