use std::{fs::File, path::Path};

use parquet::{
    arrow::ArrowWriter,
    basic::Compression,
    file::properties::WriterProperties,
};

use crate::{error::ExportError, tables::Table};

/// Writes `table` to `path` as a single Parquet row group, replacing any
/// existing file.
///
/// Columns are written in the order of the table's Arrow schema with Snappy
/// compression. Missing parent directories are created.
///
/// # Arguments
///
/// * `table` - The column table to export
/// * `path` - Destination file, conventionally `exports/<stage>.parquet`
///
/// # Errors
///
/// - `ExportError::Misaligned` - The table's columns differ in length;
///   nothing is written
/// - `ExportError::IoError` - The directory or file cannot be created
/// - `ExportError::ArrowError` / `ExportError::ParquetError` - Building the
///   record batch or encoding the file failed
pub fn write_parquet<T: Table>(table: &T, path: &Path) -> Result<(), ExportError> {
    if !table.is_aligned() {
        return Err(ExportError::Misaligned(T::NAME));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let batch = table.to_record_batch()?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
