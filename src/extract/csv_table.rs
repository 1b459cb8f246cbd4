use crate::constants::REPORT_ID;
use crate::extract::error::ExtractionError;
use crate::extract::flat_record::{FlatRecord, FlatTable};
use log::info;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use std::path::Path;

/// Reads a flat CSV table with a `report_id` column.
///
/// Every column is read as text so that identifiers and notation strings keep
/// their exact spelling. Empty cells become absent attributes.
pub fn read_flat_table(path: &Path, table_name: &str) -> Result<FlatTable, ExtractionError> {
    if !path.is_file() {
        return Err(ExtractionError::MissingFile(path.to_path_buf()));
    }
    info!("Attempting to extract CSV data from: {}", path.display());

    let data = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let table = data_frame_to_table(&data, table_name)?;
    info!("Extracted {} rows from {}", table.len(), path.display());
    Ok(table)
}

pub(crate) fn data_frame_to_table(
    data: &DataFrame,
    table_name: &str,
) -> Result<FlatTable, ExtractionError> {
    let id_column = data
        .column(REPORT_ID)
        .map_err(|_| ExtractionError::MissingColumn {
            table: table_name.to_string(),
            column: REPORT_ID.to_string(),
        })?
        .str()?;

    let attribute_columns = data
        .get_columns()
        .iter()
        .filter(|column| column.name().as_str() != REPORT_ID)
        .map(|column| -> Result<_, ExtractionError> {
            Ok((column.name().to_string(), column.str()?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let records = (0..data.height())
        .map(|row| -> Result<FlatRecord, ExtractionError> {
            let report_id =
                id_column
                    .get(row)
                    .ok_or_else(|| ExtractionError::MissingIdentifier {
                        table: table_name.to_string(),
                        column: REPORT_ID.to_string(),
                        line: row + 2,
                    })?;
            let mut record = FlatRecord::new(report_id);
            for (name, values) in attribute_columns.iter() {
                record.insert(name.as_str(), values.get(row).unwrap_or_default());
            }
            Ok(record)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FlatTable::new(table_name, records))
}
