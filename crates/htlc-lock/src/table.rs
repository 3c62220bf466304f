//! Offset-table wire format of the HTLC records.
//!
//! A table is `total_size: u32le`, then one `u32le` offset per field, then
//! the field payloads back to back. Offsets are absolute from the start of
//! the table; field `i` spans `offsets[i]..offsets[i + 1]` and the last
//! field ends at `total_size`.

use crate::constants::{TABLE_HEADER_BYTES, TABLE_OFFSET_BYTES};
use crate::error::HtlcError;

fn read_u32_le(b: &[u8], off: usize) -> Result<u32, HtlcError> {
    if off + 4 > b.len() {
        return Err(HtlcError::decode("unexpected EOF (u32le)"));
    }
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&b[off..off + 4]);
    Ok(u32::from_le_bytes(raw))
}

/// Splits a table with exactly `N` fields into its payload slices.
pub fn parse_table<const N: usize>(b: &[u8]) -> Result<[&[u8]; N], HtlcError> {
    let total = read_u32_le(b, 0)? as usize;
    if total != b.len() {
        return Err(HtlcError::decode("table total_size mismatch"));
    }

    let mut fields: [&[u8]; N] = [&b[0..0]; N];
    let header_len = TABLE_HEADER_BYTES + N * TABLE_OFFSET_BYTES;
    if N == 0 {
        if total != TABLE_HEADER_BYTES {
            return Err(HtlcError::decode("table field count mismatch"));
        }
        return Ok(fields);
    }
    if total < header_len {
        return Err(HtlcError::decode("table offsets truncated"));
    }

    let mut offsets = [0usize; N];
    for (i, slot) in offsets.iter_mut().enumerate() {
        *slot = read_u32_le(b, TABLE_HEADER_BYTES + i * TABLE_OFFSET_BYTES)? as usize;
    }
    if offsets.first().copied() != Some(header_len) {
        return Err(HtlcError::decode("table field count mismatch"));
    }

    for i in 0..N {
        let start = offsets[i];
        let end = if i + 1 < N { offsets[i + 1] } else { total };
        if end > total {
            return Err(HtlcError::decode("table offset out of bounds"));
        }
        if start > end {
            return Err(HtlcError::decode("table offsets not monotonic"));
        }
        fields[i] = &b[start..end];
    }
    Ok(fields)
}

pub fn encode_table(fields: &[&[u8]]) -> Vec<u8> {
    let header_len = TABLE_HEADER_BYTES + fields.len() * TABLE_OFFSET_BYTES;
    let total = header_len + fields.iter().map(|f| f.len()).sum::<usize>();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&(total as u32).to_le_bytes());
    let mut offset = header_len;
    for f in fields {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += f.len();
    }
    for f in fields {
        out.extend_from_slice(f);
    }
    out
}

/// Copies a fixed-width field, rejecting any other length.
pub fn fixed_field<const W: usize>(
    field: &[u8],
    msg: &'static str,
) -> Result<[u8; W], HtlcError> {
    if field.len() != W {
        return Err(HtlcError::decode(msg));
    }
    let mut out = [0u8; W];
    out.copy_from_slice(field);
    Ok(out)
}
