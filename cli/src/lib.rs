use anyhow::{anyhow, Context, Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use pubfile::{
    verify_checksum, AnyPub, Class, DecodeStatus, EncodeOptions, FieldRole, Item, Npc, Overflow,
    PubData, PubFile, PubKind, Schema, Skill,
};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "pubtool")]
#[command(about = "Inspect, dump and build EO pub catalogs")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Item,
    Npc,
    Class,
    Skill,
}

impl From<KindArg> for PubKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Item => PubKind::Item,
            KindArg::Npc => PubKind::Npc,
            KindArg::Class => PubKind::Class,
            KindArg::Skill => PubKind::Skill,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print header facts and record counts of a pub file
    Stat {
        /// The pub file to read
        #[clap(long, short)]
        file: PathBuf,
        /// Recompute the checksum and compare it with the stored one
        #[clap(long, action, default_value = "false")]
        verify: bool,
        /// Print the summary as a JSON object
        #[clap(long, action, default_value = "false")]
        json: bool,
    },
    /// Decode a pub file and write it as JSON
    Dump {
        /// The pub file to read
        #[clap(long, short)]
        file: PathBuf,
        /// The file to write the JSON to, defaults to stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Encode a JSON catalog into a pub file; the kind is taken from its "magic"
    Build {
        /// The JSON catalog to read
        #[clap(long, short)]
        input: PathBuf,
        /// The pub file to write
        #[clap(long, short)]
        output: PathBuf,
        /// Wrap numbers that do not fit their field instead of failing
        #[clap(long, action, default_value = "false")]
        wrap_overflow: bool,
    },
    /// Print the payload field table of a catalog kind
    Schema {
        #[clap(long, short, value_enum)]
        kind: KindArg,
    },
}

/// Allow PUBTOOL_LOG to override RUST_LOG.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("PUBTOOL_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}

pub fn run() -> Result<()> {
    init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn execute(cmd: Cli) -> Result<()> {
    // CLI flags take precedence over RUST_LOG; with neither, default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    match cmd.command {
        Commands::Stat { file, verify, json } => {
            let input = read_input(&file)?;
            let text = stat(input.as_bytes(), verify, json)?;
            println!("{text}");
        }
        Commands::Dump { file, output } => {
            let input = read_input(&file)?;
            let any = decode_file(input.as_bytes(), &file)?;
            let json = to_json(&any)?;
            match output {
                Some(out) => {
                    write_atomic(&out, json.as_bytes())?;
                    info!("Wrote {} records to {}", any.summary().records, out.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Build {
            input,
            output,
            wrap_overflow,
        } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let opts = EncodeOptions {
                overflow: if wrap_overflow {
                    Overflow::Wrap
                } else {
                    Overflow::Reject
                },
            };
            let bytes = build(&text, opts)
                .with_context(|| format!("Failed to build from {}", input.display()))?;
            write_atomic(&output, &bytes)?;
            info!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
        Commands::Schema { kind } => {
            println!("{}", schema_table(PubKind::from(kind).schema()));
        }
    }

    Ok(())
}

/// Bytes of an input file, owned or mapped.
enum Input {
    Owned(Vec<u8>),
    #[cfg(feature = "mmap")]
    Mapped(memmap2::Mmap),
}

impl Input {
    fn as_bytes(&self) -> &[u8] {
        match self {
            Input::Owned(v) => v.as_slice(),
            #[cfg(feature = "mmap")]
            Input::Mapped(m) => m,
        }
    }
}

#[cfg(not(feature = "mmap"))]
fn read_input(path: &Path) -> Result<Input> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Input::Owned(bytes))
}

#[cfg(feature = "mmap")]
fn read_input(path: &Path) -> Result<Input> {
    let f = fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    // Zero-length maps are rejected on some platforms.
    if f.metadata()?.len() == 0 {
        return Ok(Input::Owned(Vec::new()));
    }
    // SAFETY: the map is read-only and dropped before the command returns.
    let map = unsafe { memmap2::MmapOptions::new().map(&f) }
        .with_context(|| format!("Failed to map {}", path.display()))?;
    debug!("Mapped {} ({} bytes)", path.display(), map.len());
    Ok(Input::Mapped(map))
}

fn decode_file(buf: &[u8], path: &Path) -> Result<AnyPub> {
    let any = pubfile::decode_any(buf)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    if let DecodeStatus::Truncated {
        declared, decoded, ..
    } = any.status()
    {
        warn!(
            "{} is truncated: {decoded} of {declared} records",
            path.display()
        );
    }
    Ok(any)
}

/// Header facts of `buf`, as text or JSON.
fn stat(buf: &[u8], verify: bool, json: bool) -> Result<String> {
    let any = pubfile::decode_any(buf)?;
    let s = any.summary();
    let schema = s.kind.schema();
    let checksum_ok = if verify { verify_checksum(buf) } else { None };

    if json {
        let mut obj = serde_json::json!({
            "kind": schema.kind,
            "magic": String::from_utf8_lossy(&schema.magic),
            "version": s.version,
            "declared_count": s.declared_count,
            "records": s.records,
            "checksum": s.checksum,
            "truncated": s.truncated,
        });
        if let DecodeStatus::Truncated { offset, .. } = any.status() {
            obj["truncated_at"] = offset.into();
        }
        if verify {
            obj["checksum_valid"] = checksum_ok.unwrap_or(false).into();
        }
        return Ok(serde_json::to_string_pretty(&obj)?);
    }

    let mut lines = vec![
        format!(
            "kind:     {} ({})",
            schema.kind,
            String::from_utf8_lossy(&schema.magic)
        ),
        format!("version:  {}", s.version),
        format!("records:  {} of {} declared", s.records, s.declared_count),
        format!("checksum: {} {}", s.checksum[0], s.checksum[1]),
    ];
    lines.push(match any.status() {
        DecodeStatus::Complete => "status:   complete".to_string(),
        DecodeStatus::Truncated { offset, .. } => {
            format!("status:   truncated at byte {offset}")
        }
    });
    if verify {
        let verdict = match checksum_ok {
            Some(true) => "valid",
            Some(false) => "MISMATCH",
            None => "unreadable",
        };
        lines.push(format!("verify:   {verdict}"));
    }
    Ok(lines.join("\n"))
}

fn to_json(any: &AnyPub) -> Result<String> {
    let json = match any {
        AnyPub::Item(d) => serde_json::to_string_pretty(&d.file)?,
        AnyPub::Npc(d) => serde_json::to_string_pretty(&d.file)?,
        AnyPub::Class(d) => serde_json::to_string_pretty(&d.file)?,
        AnyPub::Skill(d) => serde_json::to_string_pretty(&d.file)?,
    };
    Ok(json)
}

/// Encode a JSON catalog, choosing the record type from its magic.
fn build(json: &str, opts: EncodeOptions) -> Result<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let magic = value
        .get("magic")
        .and_then(|m| m.as_str())
        .ok_or_else(|| anyhow!("Catalog has no \"magic\" string"))?;
    let kind = PubKind::from_magic(magic.as_bytes())
        .ok_or_else(|| anyhow!("Unknown catalog magic {magic:?}"))?;
    debug!("Building {} catalog", kind.schema().kind);
    match kind {
        PubKind::Item => encode_as::<Item>(value, opts),
        PubKind::Npc => encode_as::<Npc>(value, opts),
        PubKind::Class => encode_as::<Class>(value, opts),
        PubKind::Skill => encode_as::<Skill>(value, opts),
    }
}

fn encode_as<T: PubData + DeserializeOwned>(
    value: serde_json::Value,
    opts: EncodeOptions,
) -> Result<Vec<u8>> {
    let file: PubFile<T> = serde_json::from_value(value)?;
    Ok(file.encode_with_options(opts)?)
}

fn schema_table(schema: &Schema) -> String {
    let mut out = format!(
        "{} ({}), {}-byte payload\n{:>6}  {:>5}  {:<28}  role",
        schema.kind,
        String::from_utf8_lossy(&schema.magic),
        schema.data_size,
        "offset",
        "width",
        "field"
    );
    for f in schema.fields {
        let role = match f.role {
            FieldRole::Value => String::new(),
            FieldRole::Alias {
                group,
                canonical: true,
            } => format!("alias {group} (canonical)"),
            FieldRole::Alias { group, .. } => format!("alias {group}"),
            FieldRole::Unused => "unused".to_string(),
        };
        out.push_str(&format!(
            "\n{:>6}  {:>5}  {:<28}  {}",
            f.offset, f.width, f.name, role
        ));
    }
    out
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move into {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubfile::{ItemSpec, ItemType, Record};

    fn sample_items() -> PubFile<Item> {
        let mut f = PubFile::<Item>::new(2);
        f.push(Record::new(
            "Scroll of Aeven",
            Item {
                item_type: ItemType::Teleport,
                spec: ItemSpec::Teleport { map: 5, x: 10, y: 12 },
                ..Item::default()
            },
        ));
        f.push(Record::eof());
        f
    }

    #[test]
    fn build_picks_kind_from_magic() {
        let json = serde_json::to_string(&sample_items()).unwrap();
        let bytes = build(&json, EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[0..3], b"EIF");
        assert_eq!(bytes, sample_items().encode().unwrap());
    }

    #[test]
    fn build_rejects_unknown_magic() {
        let err = build(r#"{"magic":"XYZ","version":1,"records":[]}"#, EncodeOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("XYZ"));
        assert!(build(r#"{"version":1}"#, EncodeOptions::default()).is_err());
    }

    #[test]
    fn stat_reports_counts() {
        let bytes = sample_items().encode().unwrap();
        let text = stat(&bytes, true, false).unwrap();
        assert!(text.contains("item (EIF)"));
        assert!(text.contains("records:  2 of 2 declared"));
        assert!(text.contains("status:   complete"));
        assert!(text.contains("verify:   valid"));
    }

    #[test]
    fn stat_json_marks_truncation() {
        let bytes = sample_items().encode().unwrap();
        let cut = &bytes[..bytes.len() - 2];
        let v: serde_json::Value = serde_json::from_str(&stat(cut, false, true).unwrap()).unwrap();
        assert_eq!(v["truncated"], true);
        assert_eq!(v["records"], 1);
        assert!(v.get("truncated_at").is_some());
    }

    #[test]
    fn schema_table_lists_aliases() {
        let table = schema_table(PubKind::Item.schema());
        assert!(table.starts_with("item (EIF), 58-byte payload"));
        assert!(table.contains("alias A (canonical)"));
        assert!(table.contains("scroll_map"));
        assert!(table.contains("unused"));
    }

    #[test]
    fn write_atomic_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dat001.eif");
        fs::write(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!dir.path().join("dat001.eif.tmp").exists());
    }
}
