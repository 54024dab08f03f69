mod common;

use common::raw_pub;
use pubfile::number::{decode_number, encode_number};
use pubfile::{FieldRole, Item, ItemSpec, ItemType, PubFile, ITEM_SCHEMA};

const X: u32 = 48_213;

/// Payload of a weapon whose shared bytes hold `X` in group A, 2 in B and 7 in C.
fn weapon_payload() -> Vec<u8> {
    let mut p = vec![1u8; ITEM_SCHEMA.data_size];
    p[2] = encode_number(ItemType::Weapon.code().into(), 1)[0];
    p[32..35].copy_from_slice(&encode_number(X, 3));
    p[35] = encode_number(2, 1)[0];
    p[36] = encode_number(7, 1)[0];
    p
}

#[test]
fn flat_view_exposes_every_alias() {
    let values = ITEM_SCHEMA.values(&weapon_payload()).unwrap();
    let group_a: Vec<_> = ITEM_SCHEMA.alias_group('A').map(|f| f.name).collect();
    assert_eq!(
        group_a,
        [
            "scroll_map",
            "doll_graphic",
            "exp_reward",
            "hair_color",
            "effect",
            "key",
            "beer_potency"
        ]
    );
    for name in group_a {
        let (_, v) = values.iter().find(|(n, _)| *n == name).unwrap();
        assert_eq!(*v, X, "{name}");
    }
}

#[test]
fn doll_graphic_survives_reencode() {
    let buf = raw_pub(b"EIF", 1, &[("Blade", Some(weapon_payload()))]);
    let d = PubFile::<Item>::decode(&buf).unwrap();
    let item = d.file.records[0].data.unwrap();
    assert_eq!(
        item.spec,
        ItemSpec::Equipment {
            doll_graphic: X,
            gender: 2,
            dual_wield_doll_graphic: 7,
        }
    );
    let aliases = item.spec.aliases();
    assert_eq!(aliases.scroll_map, X);
    assert_eq!(aliases.exp_reward, X);
    assert_eq!(aliases.beer_potency, X);
    assert_eq!(aliases.scroll_x, 2);
    assert_eq!(aliases.scroll_y, 7);

    let out = d.file.encode().unwrap();
    let payload = &out[10 + 1 + 5..];
    assert_eq!(decode_number(&payload[32..35]), X);
    let reread = PubFile::<Item>::decode(&out).unwrap();
    match reread.file.records[0].data.unwrap().spec {
        ItemSpec::Equipment { doll_graphic, .. } => assert_eq!(doll_graphic, X),
        other => panic!("expected equipment, got {:?}", other),
    }
}

#[test]
fn spec_variant_is_authoritative_over_type() {
    // The type byte and the `spec` field are written independently; the bytes carry
    // whatever the `ItemSpec` variant holds.
    let item = Item {
        item_type: ItemType::Teleport,
        spec: ItemSpec::Beer {
            potency: 9,
            spec2: 4,
            spec3: 0,
        },
        ..Item::default()
    };
    let mut f = PubFile::<Item>::new(1);
    f.push(pubfile::Record::new("Odd", item));
    let out = f.encode().unwrap();
    let d = PubFile::<Item>::decode(&out).unwrap();
    assert_eq!(
        d.file.records[0].data.unwrap().spec,
        ItemSpec::Teleport { map: 9, x: 4, y: 0 }
    );
}

#[test]
fn single_value_types_reencode_byte_identical() {
    for t in [
        ItemType::ExpReward,
        ItemType::Key,
        ItemType::Beer,
        ItemType::EffectPotion,
        ItemType::HairDye,
    ] {
        let mut p = vec![1u8; ITEM_SCHEMA.data_size];
        p[2] = encode_number(t.code().into(), 1)[0];
        p[32..35].copy_from_slice(&encode_number(500, 3));
        p[35] = 3;
        p[36] = 8;
        let buf = raw_pub(b"EIF", 1, &[("Thing", Some(p.clone()))]);
        let d = PubFile::<Item>::decode(&buf).unwrap();
        let item = d.file.records[0].data.unwrap();
        assert_eq!(item.spec.raw(), (500, 2, 7), "{t:?}");
        let out = d.file.encode().unwrap();
        assert_eq!(&out[16..], &p[..], "{t:?}");
    }
}

#[test]
fn unrecognised_types_keep_raw_bytes() {
    let mut p = weapon_payload();
    p[2] = encode_number(77, 1)[0];
    let buf = raw_pub(b"EIF", 1, &[("Mystery", Some(p.clone()))]);
    let d = PubFile::<Item>::decode(&buf).unwrap();
    let item = d.file.records[0].data.unwrap();
    assert_eq!(item.item_type, ItemType::Unknown(77));
    assert_eq!(
        item.spec,
        ItemSpec::Raw {
            spec1: X,
            spec2: 2,
            spec3: 7
        }
    );
    let out = d.file.encode().unwrap();
    assert_eq!(&out[18..], &p[..]);
}

#[test]
fn canonical_members_are_marked() {
    let canonical: Vec<_> = ITEM_SCHEMA
        .fields
        .iter()
        .filter(|f| matches!(f.role, FieldRole::Alias { canonical: true, .. }))
        .map(|f| f.name)
        .collect();
    assert_eq!(canonical, ["doll_graphic", "gender", "scroll_y"]);
}
