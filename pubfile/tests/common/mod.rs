#![allow(dead_code)]

use pubfile::number::encode_number;
use pubfile::{EncodeOptions, Item, PubData, ITEM_SCHEMA};

/// Assemble a raw pub buffer: header with `count`, then the given records.
/// A record with `None` payload is written as a bare name.
pub fn raw_pub(magic: &[u8; 3], count: u32, records: &[(&str, Option<Vec<u8>>)]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(magic);
    buf.extend_from_slice(&[1, 1, 1, 1]);
    buf.extend_from_slice(&encode_number(count, 2));
    buf.push(1);
    for (name, payload) in records {
        buf.extend_from_slice(&encode_number(name.len() as u32, 1));
        buf.extend_from_slice(name.as_bytes());
        if let Some(p) = payload {
            buf.extend_from_slice(p);
        }
    }
    buf
}

pub fn item_payload(item: &Item) -> Vec<u8> {
    let mut p = vec![1u8; ITEM_SCHEMA.data_size];
    item.write(&mut p, &EncodeOptions::default()).expect("item payload");
    p
}
