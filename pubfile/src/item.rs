//! Item catalog (`EIF`).
//!
//! Bytes 32-36 of an item payload are shared by several unrelated values.
//! Which one applies depends on the item's type, so they are read into an
//! [`ItemSpec`] variant chosen by [`ItemType`]. [`ItemSpec::aliases`] gives
//! the flat view where every name reads the same bytes.

use crate::format::{PubData, PubFile};
use crate::reader::Result;
use crate::schema::{code_enum, Element, Field, Schema};
use crate::writer::EncodeOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type ItemFile = PubFile<Item>;

const GRAPHIC_ID: Field = Field::new("graphic_id", 0, 2);
const TYPE: Field = Field::new("type", 2, 1);
const SUBTYPE: Field = Field::new("subtype", 3, 1);
const SPECIAL: Field = Field::new("special", 4, 1);
const HP: Field = Field::new("hp", 5, 2);
const TP: Field = Field::new("tp", 7, 2);
const MIN_DAMAGE: Field = Field::new("min_damage", 9, 2);
const MAX_DAMAGE: Field = Field::new("max_damage", 11, 2);
const ACCURACY: Field = Field::new("accuracy", 13, 2);
const EVADE: Field = Field::new("evade", 15, 2);
const ARMOR: Field = Field::new("armor", 17, 2);
const STR: Field = Field::new("str", 20, 1);
const INT: Field = Field::new("int", 21, 1);
const WIS: Field = Field::new("wis", 22, 1);
const AGI: Field = Field::new("agi", 23, 1);
const CON: Field = Field::new("con", 24, 1);
const CHA: Field = Field::new("cha", 25, 1);
const LIGHT_RESISTANCE: Field = Field::new("light_resistance", 26, 1);
const DARK_RESISTANCE: Field = Field::new("dark_resistance", 27, 1);
const EARTH_RESISTANCE: Field = Field::new("earth_resistance", 28, 1);
const AIR_RESISTANCE: Field = Field::new("air_resistance", 29, 1);
const WATER_RESISTANCE: Field = Field::new("water_resistance", 30, 1);
const FIRE_RESISTANCE: Field = Field::new("fire_resistance", 31, 1);
const DOLL_GRAPHIC: Field = Field::alias("doll_graphic", 32, 3, 'A', true);
const GENDER: Field = Field::alias("gender", 35, 1, 'B', true);
const SCROLL_Y: Field = Field::alias("scroll_y", 36, 1, 'C', true);
const LEVEL_REQUIREMENT: Field = Field::new("level_requirement", 37, 2);
const CLASS_REQUIREMENT: Field = Field::new("class_requirement", 39, 2);
const STR_REQUIREMENT: Field = Field::new("str_requirement", 41, 2);
const INT_REQUIREMENT: Field = Field::new("int_requirement", 43, 2);
const WIS_REQUIREMENT: Field = Field::new("wis_requirement", 45, 2);
const AGI_REQUIREMENT: Field = Field::new("agi_requirement", 47, 2);
const CON_REQUIREMENT: Field = Field::new("con_requirement", 49, 2);
const CHA_REQUIREMENT: Field = Field::new("cha_requirement", 51, 2);
const ELEMENT: Field = Field::new("element", 53, 1);
const ELEMENT_DAMAGE: Field = Field::new("element_damage", 54, 1);
const WEIGHT: Field = Field::new("weight", 55, 1);
const SIZE: Field = Field::new("size", 57, 1);

const ITEM_FIELDS: &[Field] = &[
    GRAPHIC_ID,
    TYPE,
    SUBTYPE,
    SPECIAL,
    HP,
    TP,
    MIN_DAMAGE,
    MAX_DAMAGE,
    ACCURACY,
    EVADE,
    ARMOR,
    Field::unused(19, 1),
    STR,
    INT,
    WIS,
    AGI,
    CON,
    CHA,
    LIGHT_RESISTANCE,
    DARK_RESISTANCE,
    EARTH_RESISTANCE,
    AIR_RESISTANCE,
    WATER_RESISTANCE,
    FIRE_RESISTANCE,
    Field::alias("scroll_map", 32, 3, 'A', false),
    DOLL_GRAPHIC,
    Field::alias("exp_reward", 32, 3, 'A', false),
    Field::alias("hair_color", 32, 3, 'A', false),
    Field::alias("effect", 32, 3, 'A', false),
    Field::alias("key", 32, 3, 'A', false),
    Field::alias("beer_potency", 32, 3, 'A', false),
    GENDER,
    Field::alias("scroll_x", 35, 1, 'B', false),
    SCROLL_Y,
    Field::alias("dual_wield_doll_graphic", 36, 1, 'C', false),
    LEVEL_REQUIREMENT,
    CLASS_REQUIREMENT,
    STR_REQUIREMENT,
    INT_REQUIREMENT,
    WIS_REQUIREMENT,
    AGI_REQUIREMENT,
    CON_REQUIREMENT,
    CHA_REQUIREMENT,
    ELEMENT,
    ELEMENT_DAMAGE,
    WEIGHT,
    Field::unused(56, 1),
    SIZE,
];

/// Layout of the 58-byte item payload.
pub const ITEM_SCHEMA: Schema = Schema {
    kind: "item",
    magic: *b"EIF",
    data_size: 58,
    fields: ITEM_FIELDS,
};

code_enum! {
    /// Item type; selects the meaning of the shared bytes.
    pub enum ItemType: u8 {
        Static = 0,
        Unknown1 = 1,
        Money = 2,
        Heal = 3,
        Teleport = 4,
        Spell = 5,
        ExpReward = 6,
        StatReward = 7,
        SkillReward = 8,
        Key = 9,
        Weapon = 10,
        Shield = 11,
        Armor = 12,
        Hat = 13,
        Boots = 14,
        Gloves = 15,
        Accessory = 16,
        Belt = 17,
        Necklace = 18,
        Ring = 19,
        Armlet = 20,
        Bracer = 21,
        Beer = 22,
        EffectPotion = 23,
        HairDye = 24,
        CureCurse = 25,
    }
}

impl ItemType {
    /// Types drawn on the character, which carry a doll graphic.
    pub fn is_equipment(self) -> bool {
        (10..=21).contains(&self.code())
    }
}

code_enum! {
    pub enum ItemSubtype: u8 {
        None = 0,
        Ranged = 1,
        Arrows = 2,
        Wings = 3,
        TwoHanded = 4,
    }
}

code_enum! {
    pub enum ItemSpecial: u8 {
        Normal = 0,
        Rare = 1,
        Legendary = 2,
        Unique = 3,
        Lore = 4,
        Cursed = 5,
    }
}

code_enum! {
    /// Inventory footprint in grid cells.
    pub enum ItemSize: u8 {
        Size1x1 = 0,
        Size1x2 = 1,
        Size1x3 = 2,
        Size1x4 = 3,
        Size2x1 = 4,
        Size2x2 = 5,
        Size2x3 = 6,
        Size2x4 = 7,
    }
}

/// Type-dependent contents of the shared bytes 32-36.
///
/// Variants that name a single group-A value still carry bytes 35 and 36 as
/// `spec2` and `spec3` so a decoded item writes back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemSpec {
    Teleport { map: u32, x: u8, y: u8 },
    Equipment {
        doll_graphic: u32,
        gender: u8,
        dual_wield_doll_graphic: u8,
    },
    ExpReward {
        experience: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        spec2: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        spec3: u8,
    },
    Key {
        key: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        spec2: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        spec3: u8,
    },
    Beer {
        potency: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        spec2: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        spec3: u8,
    },
    EffectPotion {
        effect: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        spec2: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        spec3: u8,
    },
    HairDye {
        color: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        spec2: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        spec3: u8,
    },
    /// Types that give the bytes no meaning.
    Raw { spec1: u32, spec2: u8, spec3: u8 },
}

impl Default for ItemSpec {
    fn default() -> Self {
        ItemSpec::Raw {
            spec1: 0,
            spec2: 0,
            spec3: 0,
        }
    }
}

/// Every name the shared bytes are known by, all read from the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemAliases {
    pub scroll_map: u32,
    pub doll_graphic: u32,
    pub exp_reward: u32,
    pub hair_color: u32,
    pub effect: u32,
    pub key: u32,
    pub beer_potency: u32,
    pub gender: u8,
    pub scroll_x: u8,
    pub scroll_y: u8,
    pub dual_wield_doll_graphic: u8,
}

impl ItemSpec {
    /// Interpret the raw shared values for an item of type `item_type`.
    pub fn from_raw(item_type: ItemType, spec1: u32, spec2: u8, spec3: u8) -> Self {
        match item_type {
            ItemType::Teleport => ItemSpec::Teleport {
                map: spec1,
                x: spec2,
                y: spec3,
            },
            t if t.is_equipment() => ItemSpec::Equipment {
                doll_graphic: spec1,
                gender: spec2,
                dual_wield_doll_graphic: spec3,
            },
            ItemType::ExpReward => ItemSpec::ExpReward {
                experience: spec1,
                spec2,
                spec3,
            },
            ItemType::Key => ItemSpec::Key {
                key: spec1,
                spec2,
                spec3,
            },
            ItemType::Beer => ItemSpec::Beer {
                potency: spec1,
                spec2,
                spec3,
            },
            ItemType::EffectPotion => ItemSpec::EffectPotion {
                effect: spec1,
                spec2,
                spec3,
            },
            ItemType::HairDye => ItemSpec::HairDye {
                color: spec1,
                spec2,
                spec3,
            },
            _ => ItemSpec::Raw {
                spec1,
                spec2,
                spec3,
            },
        }
    }

    /// The values written to groups A, B and C.
    pub fn raw(&self) -> (u32, u8, u8) {
        match *self {
            ItemSpec::Teleport { map, x, y } => (map, x, y),
            ItemSpec::Equipment {
                doll_graphic,
                gender,
                dual_wield_doll_graphic,
            } => (doll_graphic, gender, dual_wield_doll_graphic),
            ItemSpec::ExpReward {
                experience: spec1,
                spec2,
                spec3,
            }
            | ItemSpec::Key {
                key: spec1,
                spec2,
                spec3,
            }
            | ItemSpec::Beer {
                potency: spec1,
                spec2,
                spec3,
            }
            | ItemSpec::EffectPotion {
                effect: spec1,
                spec2,
                spec3,
            }
            | ItemSpec::HairDye {
                color: spec1,
                spec2,
                spec3,
            }
            | ItemSpec::Raw {
                spec1,
                spec2,
                spec3,
            } => (spec1, spec2, spec3),
        }
    }

    pub fn aliases(&self) -> ItemAliases {
        let (a, b, c) = self.raw();
        ItemAliases {
            scroll_map: a,
            doll_graphic: a,
            exp_reward: a,
            hair_color: a,
            effect: a,
            key: a,
            beer_potency: a,
            gender: b,
            scroll_x: b,
            scroll_y: c,
            dual_wield_doll_graphic: c,
        }
    }
}

/// One item record's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    pub graphic_id: u16,
    pub item_type: ItemType,
    pub subtype: ItemSubtype,
    pub special: ItemSpecial,
    pub hp: u16,
    pub tp: u16,
    pub min_damage: u16,
    pub max_damage: u16,
    pub accuracy: u16,
    pub evade: u16,
    pub armor: u16,
    pub strength: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub agility: u8,
    pub constitution: u8,
    pub charisma: u8,
    pub light_resistance: u8,
    pub dark_resistance: u8,
    pub earth_resistance: u8,
    pub air_resistance: u8,
    pub water_resistance: u8,
    pub fire_resistance: u8,
    pub spec: ItemSpec,
    pub level_requirement: u16,
    pub class_requirement: u16,
    pub strength_requirement: u16,
    pub intelligence_requirement: u16,
    pub wisdom_requirement: u16,
    pub agility_requirement: u16,
    pub constitution_requirement: u16,
    pub charisma_requirement: u16,
    pub element: Element,
    pub element_damage: u8,
    pub weight: u8,
    pub size: ItemSize,
}

impl PubData for Item {
    const SCHEMA: &'static Schema = &ITEM_SCHEMA;

    fn read(p: &[u8]) -> Self {
        let item_type = ItemType::from_code(TYPE.read_u8(p));
        Item {
            graphic_id: GRAPHIC_ID.read_u16(p),
            item_type,
            subtype: ItemSubtype::from_code(SUBTYPE.read_u8(p)),
            special: ItemSpecial::from_code(SPECIAL.read_u8(p)),
            hp: HP.read_u16(p),
            tp: TP.read_u16(p),
            min_damage: MIN_DAMAGE.read_u16(p),
            max_damage: MAX_DAMAGE.read_u16(p),
            accuracy: ACCURACY.read_u16(p),
            evade: EVADE.read_u16(p),
            armor: ARMOR.read_u16(p),
            strength: STR.read_u8(p),
            intelligence: INT.read_u8(p),
            wisdom: WIS.read_u8(p),
            agility: AGI.read_u8(p),
            constitution: CON.read_u8(p),
            charisma: CHA.read_u8(p),
            light_resistance: LIGHT_RESISTANCE.read_u8(p),
            dark_resistance: DARK_RESISTANCE.read_u8(p),
            earth_resistance: EARTH_RESISTANCE.read_u8(p),
            air_resistance: AIR_RESISTANCE.read_u8(p),
            water_resistance: WATER_RESISTANCE.read_u8(p),
            fire_resistance: FIRE_RESISTANCE.read_u8(p),
            spec: ItemSpec::from_raw(
                item_type,
                DOLL_GRAPHIC.read_u32(p),
                GENDER.read_u8(p),
                SCROLL_Y.read_u8(p),
            ),
            level_requirement: LEVEL_REQUIREMENT.read_u16(p),
            class_requirement: CLASS_REQUIREMENT.read_u16(p),
            strength_requirement: STR_REQUIREMENT.read_u16(p),
            intelligence_requirement: INT_REQUIREMENT.read_u16(p),
            wisdom_requirement: WIS_REQUIREMENT.read_u16(p),
            agility_requirement: AGI_REQUIREMENT.read_u16(p),
            constitution_requirement: CON_REQUIREMENT.read_u16(p),
            charisma_requirement: CHA_REQUIREMENT.read_u16(p),
            element: Element::from_code(ELEMENT.read_u16(p)),
            element_damage: ELEMENT_DAMAGE.read_u8(p),
            weight: WEIGHT.read_u8(p),
            size: ItemSize::from_code(SIZE.read_u8(p)),
        }
    }

    fn write(&self, p: &mut [u8], opts: &EncodeOptions) -> Result<()> {
        let (spec1, spec2, spec3) = self.spec.raw();
        let values: &[(Field, u32)] = &[
            (GRAPHIC_ID, self.graphic_id.into()),
            (TYPE, self.item_type.code().into()),
            (SUBTYPE, self.subtype.code().into()),
            (SPECIAL, self.special.code().into()),
            (HP, self.hp.into()),
            (TP, self.tp.into()),
            (MIN_DAMAGE, self.min_damage.into()),
            (MAX_DAMAGE, self.max_damage.into()),
            (ACCURACY, self.accuracy.into()),
            (EVADE, self.evade.into()),
            (ARMOR, self.armor.into()),
            (STR, self.strength.into()),
            (INT, self.intelligence.into()),
            (WIS, self.wisdom.into()),
            (AGI, self.agility.into()),
            (CON, self.constitution.into()),
            (CHA, self.charisma.into()),
            (LIGHT_RESISTANCE, self.light_resistance.into()),
            (DARK_RESISTANCE, self.dark_resistance.into()),
            (EARTH_RESISTANCE, self.earth_resistance.into()),
            (AIR_RESISTANCE, self.air_resistance.into()),
            (WATER_RESISTANCE, self.water_resistance.into()),
            (FIRE_RESISTANCE, self.fire_resistance.into()),
            (DOLL_GRAPHIC, spec1),
            (GENDER, spec2.into()),
            (SCROLL_Y, spec3.into()),
            (LEVEL_REQUIREMENT, self.level_requirement.into()),
            (CLASS_REQUIREMENT, self.class_requirement.into()),
            (STR_REQUIREMENT, self.strength_requirement.into()),
            (INT_REQUIREMENT, self.intelligence_requirement.into()),
            (WIS_REQUIREMENT, self.wisdom_requirement.into()),
            (AGI_REQUIREMENT, self.agility_requirement.into()),
            (CON_REQUIREMENT, self.constitution_requirement.into()),
            (CHA_REQUIREMENT, self.charisma_requirement.into()),
            (ELEMENT, self.element.code().into()),
            (ELEMENT_DAMAGE, self.element_damage.into()),
            (WEIGHT, self.weight.into()),
            (SIZE, self.size.code().into()),
        ];
        for &(field, value) in values {
            field.write(p, value, opts)?;
        }
        Ok(())
    }
}
