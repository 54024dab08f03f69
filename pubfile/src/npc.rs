//! NPC catalog (`ENF`).

use crate::format::{PubData, PubFile};
use crate::reader::Result;
use crate::schema::{code_enum, Element, Field, Schema};
use crate::writer::EncodeOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type NpcFile = PubFile<Npc>;

const GRAPHIC_ID: Field = Field::new("graphic_id", 0, 2);
const RACE: Field = Field::new("race", 2, 1);
const BOSS: Field = Field::new("boss", 3, 2);
const CHILD: Field = Field::new("child", 5, 2);
const TYPE: Field = Field::new("type", 7, 2);
const BEHAVIOR_ID: Field = Field::new("behavior_id", 9, 2);
const HP: Field = Field::new("hp", 11, 3);
const TP: Field = Field::new("tp", 14, 2);
const MIN_DAMAGE: Field = Field::new("min_damage", 16, 2);
const MAX_DAMAGE: Field = Field::new("max_damage", 18, 2);
const ACCURACY: Field = Field::new("accuracy", 20, 2);
const EVADE: Field = Field::new("evade", 22, 2);
const ARMOR: Field = Field::new("armor", 24, 2);
const RETURN_DAMAGE: Field = Field::new("return_damage", 26, 1);
const ELEMENT: Field = Field::new("element", 27, 2);
const ELEMENT_DAMAGE: Field = Field::new("element_damage", 29, 2);
const ELEMENT_WEAKNESS: Field = Field::new("element_weakness", 31, 2);
const ELEMENT_WEAKNESS_DAMAGE: Field = Field::new("element_weakness_damage", 33, 2);
const LEVEL: Field = Field::new("level", 35, 1);
const EXPERIENCE: Field = Field::new("experience", 36, 3);

const NPC_FIELDS: &[Field] = &[
    GRAPHIC_ID,
    RACE,
    BOSS,
    CHILD,
    TYPE,
    BEHAVIOR_ID,
    HP,
    TP,
    MIN_DAMAGE,
    MAX_DAMAGE,
    ACCURACY,
    EVADE,
    ARMOR,
    RETURN_DAMAGE,
    ELEMENT,
    ELEMENT_DAMAGE,
    ELEMENT_WEAKNESS,
    ELEMENT_WEAKNESS_DAMAGE,
    LEVEL,
    EXPERIENCE,
];

/// Layout of the 39-byte NPC payload.
pub const NPC_SCHEMA: Schema = Schema {
    kind: "npc",
    magic: *b"ENF",
    data_size: 39,
    fields: NPC_FIELDS,
};

code_enum! {
    pub enum NpcType: u16 {
        Friendly = 0,
        Pet = 1,
        Aggressive = 2,
        Unknown3 = 3,
        Unknown4 = 4,
        Unknown5 = 5,
        Shop = 6,
        Inn = 7,
        Unknown8 = 8,
        Bank = 9,
        Barber = 10,
        Guild = 11,
        Priest = 12,
        Lawyer = 13,
        Trainer = 14,
        Quest = 15,
    }
}

/// One NPC record's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Npc {
    pub graphic_id: u16,
    pub race: u8,
    /// Non-zero marks a boss.
    pub boss: u16,
    /// Non-zero marks a boss's child.
    pub child: u16,
    pub npc_type: NpcType,
    /// Shop, quest or skill-master id, depending on `npc_type`.
    pub behavior_id: u16,
    pub hp: u32,
    pub tp: u16,
    pub min_damage: u16,
    pub max_damage: u16,
    pub accuracy: u16,
    pub evade: u16,
    pub armor: u16,
    pub return_damage: u8,
    pub element: Element,
    pub element_damage: u16,
    pub element_weakness: Element,
    pub element_weakness_damage: u16,
    pub level: u8,
    pub experience: u32,
}

impl Npc {
    pub fn is_boss(&self) -> bool {
        self.boss != 0
    }
}

impl PubData for Npc {
    const SCHEMA: &'static Schema = &NPC_SCHEMA;

    fn read(p: &[u8]) -> Self {
        Npc {
            graphic_id: GRAPHIC_ID.read_u16(p),
            race: RACE.read_u8(p),
            boss: BOSS.read_u16(p),
            child: CHILD.read_u16(p),
            npc_type: NpcType::from_code(TYPE.read_u16(p)),
            behavior_id: BEHAVIOR_ID.read_u16(p),
            hp: HP.read_u32(p),
            tp: TP.read_u16(p),
            min_damage: MIN_DAMAGE.read_u16(p),
            max_damage: MAX_DAMAGE.read_u16(p),
            accuracy: ACCURACY.read_u16(p),
            evade: EVADE.read_u16(p),
            armor: ARMOR.read_u16(p),
            return_damage: RETURN_DAMAGE.read_u8(p),
            element: Element::from_code(ELEMENT.read_u16(p)),
            element_damage: ELEMENT_DAMAGE.read_u16(p),
            element_weakness: Element::from_code(ELEMENT_WEAKNESS.read_u16(p)),
            element_weakness_damage: ELEMENT_WEAKNESS_DAMAGE.read_u16(p),
            level: LEVEL.read_u8(p),
            experience: EXPERIENCE.read_u32(p),
        }
    }

    fn write(&self, p: &mut [u8], opts: &EncodeOptions) -> Result<()> {
        let values: &[(Field, u32)] = &[
            (GRAPHIC_ID, self.graphic_id.into()),
            (RACE, self.race.into()),
            (BOSS, self.boss.into()),
            (CHILD, self.child.into()),
            (TYPE, self.npc_type.code().into()),
            (BEHAVIOR_ID, self.behavior_id.into()),
            (HP, self.hp),
            (TP, self.tp.into()),
            (MIN_DAMAGE, self.min_damage.into()),
            (MAX_DAMAGE, self.max_damage.into()),
            (ACCURACY, self.accuracy.into()),
            (EVADE, self.evade.into()),
            (ARMOR, self.armor.into()),
            (RETURN_DAMAGE, self.return_damage.into()),
            (ELEMENT, self.element.code().into()),
            (ELEMENT_DAMAGE, self.element_damage.into()),
            (ELEMENT_WEAKNESS, self.element_weakness.code().into()),
            (ELEMENT_WEAKNESS_DAMAGE, self.element_weakness_damage.into()),
            (LEVEL, self.level.into()),
            (EXPERIENCE, self.experience),
        ];
        for &(field, value) in values {
            field.write(p, value, opts)?;
        }
        Ok(())
    }
}
