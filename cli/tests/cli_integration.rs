use pubfile::{Class, Npc, NpcType, PubFile, Record, StatGroup};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn pubtool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pubtool"))
        .args(args)
        .env_remove("PUBTOOL_LOG")
        .output()
        .expect("run pubtool")
}

fn arg(p: &Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn classes() -> PubFile<Class> {
    let mut f = PubFile::<Class>::new(1);
    f.push(Record::new(
        "Priest",
        Class {
            stat_group: StatGroup::Caster,
            wisdom: 3,
            ..Class::default()
        },
    ));
    f.push(Record::new(
        "Warrior",
        Class {
            stat_group: StatGroup::Melee,
            strength: 4,
            constitution: 2,
            ..Class::default()
        },
    ));
    f.push(Record::eof());
    f
}

#[test]
fn build_stat_dump_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "classes.json", &classes());
    let ecf = dir.path().join("dat001.ecf");

    let out = pubtool(&["build", "--input", arg(&input), "--output", arg(&ecf)]);
    assert!(out.status.success(), "build failed: {:?}", out);
    let bytes = fs::read(&ecf).unwrap();
    assert_eq!(&bytes[0..3], b"ECF");
    assert_eq!(bytes, classes().encode().unwrap());

    let out = pubtool(&["stat", "--file", arg(&ecf), "--verify"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("class (ECF)"), "{stdout}");
    assert!(stdout.contains("records:  3 of 3 declared"), "{stdout}");
    assert!(stdout.contains("verify:   valid"), "{stdout}");

    let json = dir.path().join("dump.json");
    let out = pubtool(&["dump", "--file", arg(&ecf), "--output", arg(&json)]);
    assert!(out.status.success());
    let dumped: PubFile<Class> = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(dumped.records, classes().records);
    assert_eq!(dumped.declared_count, 3);

    // A dump builds back into the same bytes.
    let rebuilt = dir.path().join("rebuilt.ecf");
    let out = pubtool(&["build", "-i", arg(&json), "-o", arg(&rebuilt)]);
    assert!(out.status.success());
    assert_eq!(fs::read(&rebuilt).unwrap(), bytes);
}

#[test]
fn dump_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let ecf = dir.path().join("dat001.ecf");
    fs::write(&ecf, classes().encode().unwrap()).unwrap();

    let out = pubtool(&["dump", "--file", arg(&ecf)]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["magic"], "ECF");
    assert_eq!(v["records"][1]["name"], "Warrior");
    assert_eq!(v["records"][2]["name"], "eof");
}

#[test]
fn overflow_needs_wrap_flag() {
    let dir = tempfile::tempdir().unwrap();
    let mut npcs = PubFile::<Npc>::new(1);
    npcs.push(Record::new(
        "Apozen",
        Npc {
            npc_type: NpcType::Aggressive,
            hp: 20_000_000,
            ..Npc::default()
        },
    ));
    npcs.push(Record::eof());
    let input = write_json(dir.path(), "npcs.json", &npcs);
    let enf = dir.path().join("dat001.enf");

    let out = pubtool(&["build", "--input", arg(&input), "--output", arg(&enf)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("hp = 20000000"));
    assert!(!enf.exists());

    let out = pubtool(&[
        "build",
        "--input",
        arg(&input),
        "--output",
        arg(&enf),
        "--wrap-overflow",
    ]);
    assert!(out.status.success(), "{:?}", out);
    let decoded = PubFile::<Npc>::decode(&fs::read(&enf).unwrap()).unwrap();
    assert_eq!(
        decoded.file.records[0].data.unwrap().hp,
        20_000_000 % 16_194_277
    );
}

#[test]
fn stat_reports_truncation() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = classes().encode().unwrap();
    let ecf = dir.path().join("short.ecf");
    // Drop the sentinel and the last byte of the Warrior payload.
    fs::write(&ecf, &bytes[..bytes.len() - 5]).unwrap();

    let out = pubtool(&["stat", "--file", arg(&ecf), "--json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["truncated"], true);
    assert_eq!(v["records"], 1);
    assert_eq!(v["declared_count"], 3);
}

#[test]
fn schema_prints_field_table() {
    let out = pubtool(&["schema", "--kind", "npc"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("npc (ENF), 39-byte payload"));
    assert!(stdout.contains("experience"));

    let out = pubtool(&["schema", "--kind", "potion"]);
    assert!(!out.status.success());
}

#[test]
fn unknown_magic_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.pub");
    fs::write(&path, b"XYZ\x01\x01\x01\x01\x01\x01\x01").unwrap();
    let out = pubtool(&["stat", "--file", arg(&path)]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("XYZ"));
}

#[test]
fn run_from_args_parses_and_fails_cleanly() {
    assert!(pubfile_cli::run_from_args(["pubtool"]).is_err());
    assert!(pubfile_cli::run_from_args(["pubtool", "schema", "--kind", "skill"]).is_ok());
    assert!(
        pubfile_cli::run_from_args(["pubtool", "stat", "--file", "/nonexistent/dat001.eif"])
            .is_err()
    );
}
