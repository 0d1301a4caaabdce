//! CSV manifest codec.
//!
//! The on-disk format is a literal four-column table (`File Path, Bytes, MD5,
//! Timestamp`); planner output adds a fifth `Origin` column. Deserialization
//! hands the header back separately so callers can compare it against an
//! expected one.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use stowage_core::digest::Digest;
use stowage_core::error::{Error, Result};
use stowage_core::record::{FileRecord, MANIFEST_HEADER, MANIFEST_HEADER_WITH_ORIGIN};

/// Streaming manifest writer.
pub struct ManifestWriter<W: Write> {
    wtr: csv::Writer<W>,
    with_origin: bool,
}

impl ManifestWriter<File> {
    pub fn to_path(path: &Path, with_origin: bool) -> Result<Self> {
        let f = File::create(path)?;
        Self::to_writer(f, with_origin)
    }
}

impl<W: Write> ManifestWriter<W> {
    /// Wrap a writer and emit the header row immediately.
    pub fn to_writer(writer: W, with_origin: bool) -> Result<Self> {
        let mut wtr = csv::Writer::from_writer(writer);
        if with_origin {
            wtr.write_record(MANIFEST_HEADER_WITH_ORIGIN)
        } else {
            wtr.write_record(MANIFEST_HEADER)
        }
        .map_err(map_csv_err)?;
        Ok(Self { wtr, with_origin })
    }

    pub fn write_record(&mut self, rec: &FileRecord) -> Result<()> {
        let bytes = rec.size_bytes.to_string();
        let digest = rec.digest.to_hex();
        if self.with_origin {
            self.wtr.write_record([
                rec.relative_path.as_str(),
                bytes.as_str(),
                digest.as_str(),
                rec.timestamp.as_str(),
                rec.origin.as_deref().unwrap_or(""),
            ])
        } else {
            self.wtr.write_record([
                rec.relative_path.as_str(),
                bytes.as_str(),
                digest.as_str(),
                rec.timestamp.as_str(),
            ])
        }
        .map_err(map_csv_err)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

/// Write a whole record set to `path` in one call.
pub fn write_manifest(path: &Path, records: &[FileRecord], with_origin: bool) -> Result<()> {
    let mut writer = ManifestWriter::to_path(path, with_origin)?;
    for rec in records {
        writer.write_record(rec)?;
    }
    writer.flush()
}

/// Read a manifest, returning the header row separately from the records.
pub fn read_manifest(path: &Path) -> Result<(Vec<String>, Vec<FileRecord>)> {
    let f = File::open(path)?;
    read_manifest_from(f)
}

pub fn read_manifest_from<R: Read>(reader: R) -> Result<(Vec<String>, Vec<FileRecord>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let header: Vec<String> = rdr
        .headers()
        .map_err(map_csv_err)?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(map_csv_err)?;
        records.push(parse_row(&row)?);
    }
    Ok((header, records))
}

fn parse_row(row: &csv::StringRecord) -> Result<FileRecord> {
    if row.len() != 4 && row.len() != 5 {
        return Err(Error::Format(format!(
            "expected 4 or 5 columns, got {}",
            row.len()
        )));
    }
    let size: u64 = row[1]
        .parse()
        .map_err(|e| Error::Format(format!("bad Bytes value '{}': {e}", &row[1])))?;
    let digest = Digest::from_hex(&row[2])?;
    let mut rec = FileRecord::new(row[0].to_string(), size, digest, row[3].to_string());
    if row.len() == 5 && !row[4].is_empty() {
        rec.origin = Some(row[4].to_string());
    }
    Ok(rec)
}

fn map_csv_err(e: csv::Error) -> Error {
    if e.is_io_error() {
        if let csv::ErrorKind::Io(ioe) = e.into_kind() {
            Error::Io(ioe)
        } else {
            Error::Format("unclassified csv I/O error".to_string())
        }
    } else {
        Error::Format(e.to_string())
    }
}
