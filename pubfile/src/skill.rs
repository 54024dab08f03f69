//! Skill catalog (`ESF`).

use crate::format::{PubData, PubFile};
use crate::reader::Result;
use crate::schema::{code_enum, Element, Field, Schema};
use crate::writer::EncodeOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type SkillFile = PubFile<Skill>;

const ICON_ID: Field = Field::new("icon_id", 0, 2);
const GRAPHIC_ID: Field = Field::new("graphic_id", 2, 2);
const TP_COST: Field = Field::new("tp_cost", 4, 2);
const SP_COST: Field = Field::new("sp_cost", 6, 2);
const CAST_TIME: Field = Field::new("cast_time", 8, 1);
const NATURE: Field = Field::new("nature", 9, 1);
const TYPE: Field = Field::new("type", 11, 3);
const ELEMENT: Field = Field::new("element", 14, 1);
const ELEMENT_POWER: Field = Field::new("element_power", 15, 2);
const TARGET_RESTRICT: Field = Field::new("target_restrict", 17, 1);
const TARGET_TYPE: Field = Field::new("target_type", 18, 1);
const TARGET_TIME: Field = Field::new("target_time", 19, 1);
const MAX_SKILL_LEVEL: Field = Field::new("max_skill_level", 21, 2);
const MIN_DAMAGE: Field = Field::new("min_damage", 23, 2);
const MAX_DAMAGE: Field = Field::new("max_damage", 25, 2);
const ACCURACY: Field = Field::new("accuracy", 27, 2);
const EVADE: Field = Field::new("evade", 29, 2);
const ARMOR: Field = Field::new("armor", 31, 2);
const RETURN_DAMAGE: Field = Field::new("return_damage", 33, 1);
const HP_HEAL: Field = Field::new("hp_heal", 34, 2);
const TP_HEAL: Field = Field::new("tp_heal", 36, 2);
const SP_HEAL: Field = Field::new("sp_heal", 38, 1);
const STR: Field = Field::new("str", 39, 2);
const INT: Field = Field::new("int", 41, 2);
const WIS: Field = Field::new("wis", 43, 2);
const AGI: Field = Field::new("agi", 45, 2);
const CON: Field = Field::new("con", 47, 2);
const CHA: Field = Field::new("cha", 49, 2);

const SKILL_FIELDS: &[Field] = &[
    ICON_ID,
    GRAPHIC_ID,
    TP_COST,
    SP_COST,
    CAST_TIME,
    NATURE,
    Field::unused(10, 1),
    TYPE,
    ELEMENT,
    ELEMENT_POWER,
    TARGET_RESTRICT,
    TARGET_TYPE,
    TARGET_TIME,
    Field::unused(20, 1),
    MAX_SKILL_LEVEL,
    MIN_DAMAGE,
    MAX_DAMAGE,
    ACCURACY,
    EVADE,
    ARMOR,
    RETURN_DAMAGE,
    HP_HEAL,
    TP_HEAL,
    SP_HEAL,
    STR,
    INT,
    WIS,
    AGI,
    CON,
    CHA,
];

/// Layout of the 51-byte skill payload.
pub const SKILL_SCHEMA: Schema = Schema {
    kind: "skill",
    magic: *b"ESF",
    data_size: 51,
    fields: SKILL_FIELDS,
};

code_enum! {
    pub enum SkillNature: u8 {
        Spell = 0,
        Skill = 1,
    }
}

code_enum! {
    pub enum SkillType: u32 {
        Heal = 0,
        Attack = 1,
        Bard = 2,
    }
}

code_enum! {
    pub enum TargetRestrict: u8 {
        Npc = 0,
        Friendly = 1,
        Opponent = 2,
    }
}

code_enum! {
    pub enum TargetType: u8 {
        Normal = 0,
        SelfOnly = 1,
        Reserved2 = 2,
        Group = 3,
    }
}

/// One skill record's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Skill {
    pub icon_id: u16,
    pub graphic_id: u16,
    pub tp_cost: u16,
    pub sp_cost: u16,
    pub cast_time: u8,
    pub nature: SkillNature,
    pub skill_type: SkillType,
    pub element: Element,
    pub element_power: u16,
    pub target_restrict: TargetRestrict,
    pub target_type: TargetType,
    pub target_time: u8,
    pub max_skill_level: u16,
    pub min_damage: u16,
    pub max_damage: u16,
    pub accuracy: u16,
    pub evade: u16,
    pub armor: u16,
    pub return_damage: u8,
    pub hp_heal: u16,
    pub tp_heal: u16,
    pub sp_heal: u8,
    pub strength: u16,
    pub intelligence: u16,
    pub wisdom: u16,
    pub agility: u16,
    pub constitution: u16,
    pub charisma: u16,
}

impl PubData for Skill {
    const SCHEMA: &'static Schema = &SKILL_SCHEMA;

    fn read(p: &[u8]) -> Self {
        Skill {
            icon_id: ICON_ID.read_u16(p),
            graphic_id: GRAPHIC_ID.read_u16(p),
            tp_cost: TP_COST.read_u16(p),
            sp_cost: SP_COST.read_u16(p),
            cast_time: CAST_TIME.read_u8(p),
            nature: SkillNature::from_code(NATURE.read_u8(p)),
            skill_type: SkillType::from_code(TYPE.read_u32(p)),
            element: Element::from_code(ELEMENT.read_u16(p)),
            element_power: ELEMENT_POWER.read_u16(p),
            target_restrict: TargetRestrict::from_code(TARGET_RESTRICT.read_u8(p)),
            target_type: TargetType::from_code(TARGET_TYPE.read_u8(p)),
            target_time: TARGET_TIME.read_u8(p),
            max_skill_level: MAX_SKILL_LEVEL.read_u16(p),
            min_damage: MIN_DAMAGE.read_u16(p),
            max_damage: MAX_DAMAGE.read_u16(p),
            accuracy: ACCURACY.read_u16(p),
            evade: EVADE.read_u16(p),
            armor: ARMOR.read_u16(p),
            return_damage: RETURN_DAMAGE.read_u8(p),
            hp_heal: HP_HEAL.read_u16(p),
            tp_heal: TP_HEAL.read_u16(p),
            sp_heal: SP_HEAL.read_u8(p),
            strength: STR.read_u16(p),
            intelligence: INT.read_u16(p),
            wisdom: WIS.read_u16(p),
            agility: AGI.read_u16(p),
            constitution: CON.read_u16(p),
            charisma: CHA.read_u16(p),
        }
    }

    fn write(&self, p: &mut [u8], opts: &EncodeOptions) -> Result<()> {
        let values: &[(Field, u32)] = &[
            (ICON_ID, self.icon_id.into()),
            (GRAPHIC_ID, self.graphic_id.into()),
            (TP_COST, self.tp_cost.into()),
            (SP_COST, self.sp_cost.into()),
            (CAST_TIME, self.cast_time.into()),
            (NATURE, self.nature.code().into()),
            (TYPE, self.skill_type.code()),
            (ELEMENT, self.element.code().into()),
            (ELEMENT_POWER, self.element_power.into()),
            (TARGET_RESTRICT, self.target_restrict.code().into()),
            (TARGET_TYPE, self.target_type.code().into()),
            (TARGET_TIME, self.target_time.into()),
            (MAX_SKILL_LEVEL, self.max_skill_level.into()),
            (MIN_DAMAGE, self.min_damage.into()),
            (MAX_DAMAGE, self.max_damage.into()),
            (ACCURACY, self.accuracy.into()),
            (EVADE, self.evade.into()),
            (ARMOR, self.armor.into()),
            (RETURN_DAMAGE, self.return_damage.into()),
            (HP_HEAL, self.hp_heal.into()),
            (TP_HEAL, self.tp_heal.into()),
            (SP_HEAL, self.sp_heal.into()),
            (STR, self.strength.into()),
            (INT, self.intelligence.into()),
            (WIS, self.wisdom.into()),
            (AGI, self.agility.into()),
            (CON, self.constitution.into()),
            (CHA, self.charisma.into()),
        ];
        for &(field, value) in values {
            field.write(p, value, opts)?;
        }
        Ok(())
    }
}
