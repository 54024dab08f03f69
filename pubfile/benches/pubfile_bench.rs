use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pubfile::{crc32_ieee, Item, ItemFile, ItemSpec, ItemType, PubFile, Record};

/// Generate an item catalog of `n` records followed by the sentinel.
/// Cycles through equipment, teleport scrolls and plain items.
fn generate_items(n: usize) -> ItemFile {
    let mut f = PubFile::<Item>::new(1);
    for i in 0..n {
        let (item_type, spec) = match i % 3 {
            0 => (
                ItemType::Weapon,
                ItemSpec::Equipment {
                    doll_graphic: (i % 300) as u32,
                    gender: 0,
                    dual_wield_doll_graphic: 0,
                },
            ),
            1 => (
                ItemType::Teleport,
                ItemSpec::Teleport {
                    map: (i % 280) as u32,
                    x: (i % 200) as u8,
                    y: (i % 100) as u8,
                },
            ),
            _ => (ItemType::Static, ItemSpec::default()),
        };
        f.push(Record::new(
            format!("Item {i}"),
            Item {
                graphic_id: (i % 60_000) as u16,
                item_type,
                hp: (i % 1_000) as u16,
                weight: (i % 200) as u8,
                spec,
                ..Item::default()
            },
        ));
    }
    f.push(Record::eof());
    f
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for n in [100, 1_000, 10_000] {
        let items = generate_items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| items.encode().unwrap());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for n in [100, 1_000, 10_000] {
        let bytes = generate_items(n).encode().unwrap();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &bytes, |b, bytes| {
            b.iter(|| PubFile::<Item>::decode(bytes).unwrap());
        });
    }
    group.finish();
}

fn bench_crc(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32");
    for n in [1_000, 10_000] {
        let bytes = generate_items(n).encode().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &bytes, |b, bytes| {
            b.iter(|| crc32_ieee(bytes));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_crc);
criterion_main!(benches);
