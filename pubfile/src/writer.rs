use log::debug;

use crate::format::{PubData, PubFile};
use crate::header::{patch_checksum, CHECKSUM_RANGE};
use crate::number::{encode_number, encode_number_into, CHAR_MAX, SHORT_MAX};
use crate::reader::{PubError, Result};

/// What to do with a value too large for its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Fail with [`PubError::FieldOverflow`].
    #[default]
    Reject,
    /// Keep the low digits, i.e. store `value % 253^width`.
    Wrap,
}

/// Options controlling catalog emission.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Applies to payload fields only. Name lengths and the record count
    /// are always rejected when too large since wrapping them breaks framing.
    pub overflow: Overflow,
}

/// Encode `file` with default options (overflow rejected).
pub fn encode<T: PubData>(file: &PubFile<T>) -> Result<Vec<u8>> {
    encode_with_options(file, EncodeOptions::default())
}

/// Encode `file` with explicit [`EncodeOptions`].
pub fn encode_with_options<T: PubData>(file: &PubFile<T>, opts: EncodeOptions) -> Result<Vec<u8>> {
    let schema = T::SCHEMA;
    if file.magic != schema.magic {
        return Err(PubError::FormatMismatch {
            expected: schema.magic,
            found: file.magic,
        });
    }
    let count = file.records.len();
    if count as u64 >= u64::from(SHORT_MAX) {
        return Err(PubError::FieldOverflow {
            field: "record count",
            value: count as u64,
            limit: u64::from(SHORT_MAX),
        });
    }

    let mut out = Vec::with_capacity(10 + count * (schema.data_size + 16));
    out.extend_from_slice(&schema.magic);
    out.extend_from_slice(&encode_number(0, CHECKSUM_RANGE.len()));
    out.extend_from_slice(&encode_number(count as u32, 2));
    out.push(file.version);

    let mut payload = schema.blank_payload();
    for (index, record) in file.records.iter().enumerate() {
        let name = record.name.as_bytes();
        if name.len() as u64 >= u64::from(CHAR_MAX) {
            return Err(PubError::FieldOverflow {
                field: "name length",
                value: name.len() as u64,
                limit: u64::from(CHAR_MAX),
            });
        }
        let mut len = [0u8; 1];
        encode_number_into(name.len() as u32, &mut len);
        out.extend_from_slice(&len);
        out.extend_from_slice(name);

        if record.is_sentinel() {
            if index + 1 != count {
                return Err(PubError::MisplacedSentinel { index });
            }
            continue;
        }
        let data = record.data.as_ref().ok_or_else(|| PubError::MissingPayload {
            index,
            name: record.name.clone(),
        })?;
        payload.fill(1);
        data.write(&mut payload, &opts)?;
        out.extend_from_slice(&payload);
    }

    patch_checksum(&mut out);
    debug!(
        "{}: encoded {} records into {} bytes",
        schema.kind,
        count,
        out.len()
    );
    Ok(out)
}
