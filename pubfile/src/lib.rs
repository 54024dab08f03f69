//! Byte-exact reader and writer for EO pub catalogs.
//!
//! A pub file is a 10-byte header (magic, checksum, record count, version)
//! followed by named records with a fixed-size payload per catalog kind,
//! closed by an `eof` record. Four kinds share the framing:
//!
//! | Kind  | Magic | Payload |
//! |-------|-------|---------|
//! | item  | `EIF` | 58      |
//! | npc   | `ENF` | 39      |
//! | class | `ECF` | 14      |
//! | skill | `ESF` | 51      |
//!
//! Every number is stored in the base-253 encoding of [`number`], which
//! never produces a zero byte.
//!
//! Build a catalog and encode it
//!
//! ```
//! use pubfile::{Item, ItemSpec, ItemType, PubFile, Record};
//!
//! let mut items = PubFile::<Item>::new(1);
//! items.push(Record::new(
//!     "Wooden Sword",
//!     Item {
//!         item_type: ItemType::Weapon,
//!         min_damage: 2,
//!         max_damage: 5,
//!         spec: ItemSpec::Equipment { doll_graphic: 1, gender: 0, dual_wield_doll_graphic: 0 },
//!         ..Item::default()
//!     },
//! ));
//! items.push(Record::eof());
//! let bytes = items.encode().expect("encode");
//! assert_eq!(&bytes[0..3], b"EIF");
//! ```
//!
//! Decode any catalog by its magic
//!
//! ```
//! # use pubfile::{Class, PubFile, Record};
//! # let mut classes = PubFile::<Class>::new(1);
//! # classes.push(Record::eof());
//! # let bytes = classes.encode().unwrap();
//! let any = pubfile::decode_any(&bytes).expect("decode");
//! let summary = any.summary();
//! println!("{:?}: {} records", summary.kind, summary.records);
//! ```
//!
//! The library does no file I/O and keeps no state; every call is an
//! independent transform over the buffer it is given.

pub mod class;
pub mod format;
pub mod header;
pub mod item;
pub mod npc;
pub mod number;
pub mod reader;
pub mod schema;
pub mod skill;
pub mod writer;

pub use class::{Class, ClassFile, StatGroup, CLASS_SCHEMA};
pub use format::{decode_any, AnyPub, PubData, PubFile, PubKind, Record, Summary};
pub use header::{crc32_ieee, verify_checksum, Header, SENTINEL};
pub use item::{
    Item, ItemAliases, ItemFile, ItemSize, ItemSpec, ItemSpecial, ItemSubtype, ItemType,
    ITEM_SCHEMA,
};
pub use npc::{Npc, NpcFile, NpcType, NPC_SCHEMA};
pub use reader::{decode, DecodeStatus, Decoded, PubError};
pub use schema::{Element, Field, FieldRole, Schema};
pub use skill::{
    Skill, SkillFile, SkillNature, SkillType, TargetRestrict, TargetType, SKILL_SCHEMA,
};
pub use writer::{encode, encode_with_options, EncodeOptions, Overflow};

/// Crate-level result type using [`PubError`].
pub type Result<T> = std::result::Result<T, crate::reader::PubError>;
