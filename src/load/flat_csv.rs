use crate::extract::flat_record::{FlatRecord, FlatTable};
use crate::load::error::LoadError;
use crate::load::projector::project_fields;
use crate::load::traits::Artifact;
use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use std::io::Write;

/// A flat table written as CSV over its projected column set.
#[derive(Debug)]
pub struct FlatCsv<'a> {
    table: &'a FlatTable,
}

impl<'a> FlatCsv<'a> {
    pub fn new(table: &'a FlatTable) -> Self {
        Self { table }
    }

    /// Missing attributes become nulls, which are written as empty cells.
    pub fn to_data_frame(&self) -> Result<DataFrame, LoadError> {
        let columns = project_fields(self.table)
            .into_iter()
            .map(|name| {
                let values: Vec<Option<&str>> = self
                    .table
                    .iter()
                    .map(|record: &FlatRecord| record.raw(&name))
                    .collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

impl Artifact for FlatCsv<'_> {
    fn file_name(&self) -> String {
        format!("{}.csv", self.table.name())
    }

    fn row_count(&self) -> usize {
        self.table.len()
    }

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), LoadError> {
        let mut data = self.to_data_frame()?;
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut data)?;
        Ok(())
    }
}
