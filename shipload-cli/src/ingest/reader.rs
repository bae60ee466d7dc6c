//! Read shipping spreadsheets into [`Aggregates`]
//!
//! Each file is consumed completely before the next one is opened. Physical
//! line 1 of every file is the header and is skipped, even when it is empty.
//! Rows may carry more columns than needed; a row missing a required column
//! or an empty line anywhere after the header aborts the read.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::path::Path;

use super::aggregate::{Aggregates, ShipmentRowOutcome};
use super::types::{FileRole, ShipmentColumns, SourceFile};

/// Read all sources in order into a fresh set of aggregates
pub fn read_sources(sources: &[SourceFile], columns: &ShipmentColumns) -> Result<Aggregates> {
    let mut aggregates = Aggregates::new();
    for source in sources {
        read_source(source, columns, &mut aggregates)?;
    }
    Ok(aggregates)
}

/// Read one source file, routing every row by the file's role.
///
/// Every row must hold every configured column, including the origin and
/// destination of shipment rows that are not the first for their id. Those
/// values are ignored, but a short later row still aborts the load.
///
/// Returns the number of data rows consumed.
pub fn read_source(
    source: &SourceFile,
    columns: &ShipmentColumns,
    aggregates: &mut Aggregates,
) -> Result<usize> {
    let path = &source.path;
    log::debug!("Reading {} file: {}", source.role, path.display());

    let data = fs::read(path)
        .with_context(|| format!("Failed to open {} file: {}", source.role, path.display()))?;

    // The csv reader drops empty lines on its own, so they are found by
    // scanning the bytes between consecutive records.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let width = columns.required_width(source.role);
    let mut record = StringRecord::new();
    let mut record_end = 0usize;
    let mut header_pending = true;
    let mut rows = 0usize;

    loop {
        let more = reader
            .read_record(&mut record)
            .with_context(|| format!("Failed to read CSV row in {}", path.display()))?;

        if let Some((line, count)) = blank_lines_from(&data, record_end) {
            let first_reportable = if header_pending && line == 1 {
                header_pending = false;
                (count > 1).then_some(line + 1)
            } else {
                Some(line)
            };
            if let Some(line) = first_reportable {
                bail!(
                    "Malformed row at {}:{}: expected at least {} columns, found 0 (blank line)",
                    path.display(),
                    line,
                    width
                );
            }
        }

        if !more {
            break;
        }
        record_end = reader.position().byte() as usize;

        if header_pending {
            header_pending = false;
            continue;
        }

        match source.role {
            FileRole::Products => {
                let name = field(&record, columns.product_name, width, path)?;
                if !aggregates.add_product(name) {
                    log::trace!("Duplicate product '{}' in {}", name, path.display());
                }
            }
            FileRole::Shipments => {
                let shipment_id = field(&record, columns.shipment_id, width, path)?;
                let origin = field(&record, columns.origin, width, path)?;
                let destination = field(&record, columns.destination, width, path)?;
                let product = field(&record, columns.product, width, path)?;

                let outcome = aggregates.add_shipment_row(shipment_id, origin, destination, product);
                if outcome == ShipmentRowOutcome::ConflictingRoute {
                    log::warn!(
                        "Shipment '{}' at {}:{} has route {} -> {} differing from its first row; keeping the first",
                        shipment_id,
                        path.display(),
                        line_number(&record),
                        origin,
                        destination
                    );
                }
            }
        }
        rows += 1;
    }

    aggregates.rows_read += rows;
    log::info!("Read {} rows from {}", rows, path.display());
    Ok(rows)
}

/// Field at `index`, failing with the file and line when the row is too short
fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    width: usize,
    path: &Path,
) -> Result<&'r str> {
    match record.get(index) {
        Some(value) => Ok(value),
        None => bail!(
            "Malformed row at {}:{}: expected at least {} columns, found {} (missing column {})",
            path.display(),
            line_number(record),
            width,
            record.len(),
            index
        ),
    }
}

fn line_number(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

/// Empty lines starting at byte `offset`, the end of the previous record.
///
/// Returns the line number of the first one and how many follow in a row.
fn blank_lines_from(data: &[u8], offset: usize) -> Option<(u64, usize)> {
    let mut start = offset;
    // A CRLF terminator can end between its two bytes.
    if start > 0 && data.get(start - 1) == Some(&b'\r') && data.get(start) == Some(&b'\n') {
        start += 1;
    }

    let mut count = 0usize;
    let mut i = start;
    while let Some(&byte) = data.get(i) {
        match byte {
            b'\n' => i += 1,
            b'\r' if data.get(i + 1) == Some(&b'\n') => i += 2,
            b'\r' => i += 1,
            _ => break,
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }
    let line = data[..start].iter().filter(|&&b| b == b'\n').count() as u64 + 1;
    Some((line, count))
}
