//! Class catalog (`ECF`).

use crate::format::{PubData, PubFile};
use crate::reader::Result;
use crate::schema::{code_enum, Field, Schema};
use crate::writer::EncodeOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type ClassFile = PubFile<Class>;

const PARENT_TYPE: Field = Field::new("parent_type", 0, 1);
const STAT_GROUP: Field = Field::new("stat_group", 1, 1);
const STR: Field = Field::new("str", 2, 2);
const INT: Field = Field::new("int", 4, 2);
const WIS: Field = Field::new("wis", 6, 2);
const AGI: Field = Field::new("agi", 8, 2);
const CON: Field = Field::new("con", 10, 2);
const CHA: Field = Field::new("cha", 12, 2);

const CLASS_FIELDS: &[Field] = &[PARENT_TYPE, STAT_GROUP, STR, INT, WIS, AGI, CON, CHA];

/// Layout of the 14-byte class payload.
pub const CLASS_SCHEMA: Schema = Schema {
    kind: "class",
    magic: *b"ECF",
    data_size: 14,
    fields: CLASS_FIELDS,
};

code_enum! {
    /// Formula set used to derive combat stats.
    pub enum StatGroup: u8 {
        Melee = 0,
        Rogue = 1,
        Caster = 2,
        Archer = 3,
        Peasant = 4,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Class {
    pub parent_type: u8,
    pub stat_group: StatGroup,
    pub strength: u16,
    pub intelligence: u16,
    pub wisdom: u16,
    pub agility: u16,
    pub constitution: u16,
    pub charisma: u16,
}

impl PubData for Class {
    const SCHEMA: &'static Schema = &CLASS_SCHEMA;

    fn read(p: &[u8]) -> Self {
        Class {
            parent_type: PARENT_TYPE.read_u8(p),
            stat_group: StatGroup::from_code(STAT_GROUP.read_u8(p)),
            strength: STR.read_u16(p),
            intelligence: INT.read_u16(p),
            wisdom: WIS.read_u16(p),
            agility: AGI.read_u16(p),
            constitution: CON.read_u16(p),
            charisma: CHA.read_u16(p),
        }
    }

    fn write(&self, p: &mut [u8], opts: &EncodeOptions) -> Result<()> {
        PARENT_TYPE.write(p, self.parent_type.into(), opts)?;
        STAT_GROUP.write(p, self.stat_group.code().into(), opts)?;
        STR.write(p, self.strength.into(), opts)?;
        INT.write(p, self.intelligence.into(), opts)?;
        WIS.write(p, self.wisdom.into(), opts)?;
        AGI.write(p, self.agility.into(), opts)?;
        CON.write(p, self.constitution.into(), opts)?;
        CHA.write(p, self.charisma.into(), opts)
    }
}
