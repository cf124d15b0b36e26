//! CSV report formatter.
//!
//! One row per resolved duplicate pair; spreadsheet-friendly.

use std::io::Write;

use crate::engine::hash_to_hex;

use super::report::ResolvedDuplicate;

/// Write resolved duplicates as CSV to `writer`.
///
/// Columns: `keep`, `discard`, `identity`.
pub fn write_duplicates_csv<W: Write>(
    writer: W,
    resolved: &[ResolvedDuplicate],
) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["keep", "discard", "identity"])?;
    for dup in resolved {
        out.write_record([
            dup.keep.to_string_lossy().as_ref(),
            dup.discard.to_string_lossy().as_ref(),
            hash_to_hex(&dup.hash).as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
