//! Field tables describing the fixed payload of each catalog kind.
//!
//! A [`Schema`] lists every byte range of a record payload. Ranges shared by
//! several names form an alias group; which name applies depends on a
//! discriminant elsewhere in the same payload.

use crate::number::{decode_number, encode_number_into, limit};
use crate::reader::{PubError, Result};
use crate::writer::{EncodeOptions, Overflow};

/// How a field's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// An ordinary number.
    Value,
    /// One of several names for the same bytes. `canonical` marks the member
    /// a flat view treats as authoritative.
    Alias { group: char, canonical: bool },
    /// Padding; written as an encoded zero and skipped on read.
    Unused,
}

/// One named range inside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub role: FieldRole,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Field {
            name,
            offset,
            width,
            role: FieldRole::Value,
        }
    }

    pub const fn alias(
        name: &'static str,
        offset: usize,
        width: usize,
        group: char,
        canonical: bool,
    ) -> Self {
        Field {
            name,
            offset,
            width,
            role: FieldRole::Alias { group, canonical },
        }
    }

    pub const fn unused(offset: usize, width: usize) -> Self {
        Field {
            name: "unused",
            offset,
            width,
            role: FieldRole::Unused,
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.width
    }

    /// Decode this field, or `None` if `payload` ends before it.
    pub fn read(&self, payload: &[u8]) -> Option<u32> {
        payload.get(self.range()).map(decode_number)
    }

    /// Payloads handed out by the cursor always span the whole schema.
    pub(crate) fn read_u32(&self, payload: &[u8]) -> u32 {
        self.read(payload).unwrap_or(0)
    }

    pub(crate) fn read_u8(&self, payload: &[u8]) -> u8 {
        debug_assert_eq!(self.width, 1);
        self.read_u32(payload) as u8
    }

    pub(crate) fn read_u16(&self, payload: &[u8]) -> u16 {
        debug_assert!(self.width <= 2);
        self.read_u32(payload) as u16
    }

    /// Encode `value` into this field's bytes of `payload`.
    pub fn write(&self, payload: &mut [u8], value: u32, opts: &EncodeOptions) -> Result<()> {
        let limit = limit(self.width);
        if u64::from(value) >= limit && opts.overflow == Overflow::Reject {
            return Err(PubError::FieldOverflow {
                field: self.name,
                value: u64::from(value),
                limit,
            });
        }
        let found = payload.len();
        let bytes = payload
            .get_mut(self.range())
            .ok_or(PubError::ShortPayload {
                expected: self.offset + self.width,
                found,
            })?;
        encode_number_into(value, bytes);
        Ok(())
    }
}

/// Payload layout of one catalog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub kind: &'static str,
    pub magic: [u8; 3],
    pub data_size: usize,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Members of alias group `group`, in table order.
    pub fn alias_group(&self, group: char) -> impl Iterator<Item = &'static Field> + '_ {
        self.fields
            .iter()
            .filter(move |f| matches!(f.role, FieldRole::Alias { group: g, .. } if g == group))
    }

    /// The authoritative member of alias group `group`.
    pub fn canonical(&self, group: char) -> Option<&'static Field> {
        self.alias_group(group)
            .find(|f| matches!(f.role, FieldRole::Alias { canonical: true, .. }))
    }

    /// Every named value of `payload`, alias members included.
    pub fn values(&self, payload: &[u8]) -> Result<Vec<(&'static str, u32)>> {
        if payload.len() < self.data_size {
            return Err(PubError::ShortPayload {
                expected: self.data_size,
                found: payload.len(),
            });
        }
        Ok(self
            .fields
            .iter()
            .filter(|f| f.role != FieldRole::Unused)
            .map(|f| (f.name, f.read_u32(payload)))
            .collect())
    }

    /// Validate the table: every field in bounds, every byte covered, and
    /// overlaps only between members of one alias group sharing a range.
    pub fn check(&self) -> Result<()> {
        let mut owner: Vec<Option<&Field>> = vec![None; self.data_size];
        for f in self.fields {
            if f.width == 0 || f.width > 4 || f.offset + f.width > self.data_size {
                return Err(PubError::Schema(format!(
                    "{}: field {} out of bounds",
                    self.kind, f.name
                )));
            }
            for slot in &mut owner[f.range()] {
                let Some(prev) = *slot else {
                    *slot = Some(f);
                    continue;
                };
                let same_group = match (prev.role, f.role) {
                    (FieldRole::Alias { group: a, .. }, FieldRole::Alias { group: b, .. }) => {
                        a == b
                    }
                    _ => false,
                };
                if !same_group || prev.range() != f.range() {
                    return Err(PubError::Schema(format!(
                        "{}: {} overlaps {}",
                        self.kind, f.name, prev.name
                    )));
                }
            }
        }
        if let Some(gap) = owner.iter().position(Option::is_none) {
            return Err(PubError::Schema(format!(
                "{}: byte {} not covered",
                self.kind, gap
            )));
        }
        let mut groups: Vec<char> = self
            .fields
            .iter()
            .filter_map(|f| match f.role {
                FieldRole::Alias { group, .. } => Some(group),
                _ => None,
            })
            .collect();
        groups.sort_unstable();
        groups.dedup();
        for g in groups {
            let n = self
                .alias_group(g)
                .filter(|f| matches!(f.role, FieldRole::Alias { canonical: true, .. }))
                .count();
            if n != 1 {
                return Err(PubError::Schema(format!(
                    "{}: alias group {} has {} canonical members",
                    self.kind, g, n
                )));
            }
        }
        Ok(())
    }

    /// A payload with every byte set to an encoded zero.
    pub(crate) fn blank_payload(&self) -> Vec<u8> {
        vec![1u8; self.data_size]
    }
}

/// Declare a code-backed enum that keeps unrecognised codes.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $($(#[$vmeta])* $variant,)+
            Unknown($repr),
        }

        impl $name {
            pub fn from_code(code: $repr) -> Self {
                match code {
                    $($code => $name::$variant,)+
                    other => $name::Unknown(other),
                }
            }

            pub fn code(self) -> $repr {
                match self {
                    $($name::$variant => $code,)+
                    $name::Unknown(c) => c,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::from_code(0)
            }
        }
    };
}

pub(crate) use code_enum;

code_enum! {
    /// Elemental affinity shared by items, NPCs and skills.
    pub enum Element: u16 {
        None = 0,
        Light = 1,
        Dark = 2,
        Earth = 3,
        Wind = 4,
        Water = 5,
        Fire = 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BAD_OVERLAP: &[Field] = &[Field::new("a", 0, 2), Field::new("b", 1, 1)];
    static GAP: &[Field] = &[Field::new("a", 0, 1), Field::new("b", 2, 1)];
    static GROUP: &[Field] = &[
        Field::alias("x", 0, 2, 'A', true),
        Field::alias("y", 0, 2, 'A', false),
        Field::new("z", 2, 1),
    ];

    fn schema(fields: &'static [Field], data_size: usize) -> Schema {
        Schema {
            kind: "test",
            magic: *b"TST",
            data_size,
            fields,
        }
    }

    #[test]
    fn check_catches_overlap_and_gap() {
        assert!(schema(BAD_OVERLAP, 2).check().is_err());
        assert!(schema(GAP, 3).check().is_err());
        assert!(schema(GROUP, 3).check().is_ok());
        assert!(schema(GROUP, 4).check().is_err());
    }

    #[test]
    fn alias_lookup() {
        let s = schema(GROUP, 3);
        assert_eq!(s.alias_group('A').count(), 2);
        assert_eq!(s.canonical('A').map(|f| f.name), Some("x"));
        assert!(s.canonical('B').is_none());
    }

    #[test]
    fn write_respects_overflow_policy() {
        let f = Field::new("v", 0, 1);
        let mut p = [0u8; 1];
        let err = f.write(&mut p, 253, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, PubError::FieldOverflow { field: "v", .. }));
        let wrap = EncodeOptions {
            overflow: Overflow::Wrap,
        };
        f.write(&mut p, 254, &wrap).unwrap();
        assert_eq!(f.read(&p), Some(1));
    }

    #[test]
    fn short_payloads_are_errors() {
        let s = schema(GROUP, 3);
        assert_eq!(
            s.values(&[1, 1]).unwrap_err(),
            PubError::ShortPayload {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(s.values(&[1, 2, 3]).unwrap().len(), 3);

        let z = s.field("z").unwrap();
        assert_eq!(z.read(&[1, 1]), None);
        let mut p = [1u8; 2];
        assert_eq!(
            z.write(&mut p, 5, &EncodeOptions::default()).unwrap_err(),
            PubError::ShortPayload {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(p, [1, 1]);
    }

    #[test]
    fn unknown_codes_survive() {
        assert_eq!(Element::from_code(3), Element::Earth);
        assert_eq!(Element::from_code(40), Element::Unknown(40));
        assert_eq!(Element::Unknown(40).code(), 40);
    }
}
