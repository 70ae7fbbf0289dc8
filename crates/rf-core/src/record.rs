//! Typed measurement records and the working set viewed over them.

use serde::Serialize;

use crate::coords::LatLon;
use crate::error::Result;
use crate::schema::Schema;
use crate::table::RawTable;

/// One row of the input. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub plmn: Option<String>,
    /// Values aligned with `Schema::metrics`.
    pub metrics: Vec<Option<f64>>,
}

impl MeasurementRecord {
    pub fn coords(&self) -> Option<LatLon> {
        Some(LatLon::new(self.latitude?, self.longitude?))
    }

    pub fn metric(&self, column: usize) -> Option<f64> {
        self.metrics.get(column).copied().flatten()
    }

    /// Coordinates and the selected metric are all present.
    pub fn is_usable(&self, column: usize) -> bool {
        self.coords().is_some() && self.metric(column).is_some()
    }
}

/// A schema-validated upload. Immutable once built; every pipeline run starts
/// from here.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    records: Vec<MeasurementRecord>,
}

impl Dataset {
    pub fn from_table(table: &RawTable) -> Result<Self> {
        let schema = Schema::validate(&table.headers)?;
        let mut bad_cells = 0usize;
        let mut number = |cell: &str| -> Option<f64> {
            if cell.is_empty() {
                return None;
            }
            match cell.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v),
                Ok(_) => None,
                Err(_) => {
                    bad_cells += 1;
                    None
                }
            }
        };

        let mut records = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let latitude = number(table.cell(row, schema.latitude));
            let longitude = number(table.cell(row, schema.longitude));
            let plmn = schema
                .plmn
                .map(|col| table.cell(row, col))
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let metrics = schema.metrics.iter().map(|m| number(table.cell(row, m.source))).collect();
            records.push(MeasurementRecord { latitude, longitude, plmn, metrics });
        }

        if bad_cells > 0 {
            tracing::warn!(bad_cells, "non-numeric cells treated as missing");
        }
        tracing::debug!(rows = records.len(), "dataset loaded");
        Ok(Self { schema, records })
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_table(&RawTable::from_csv_str(text)?)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// A working set holding every row.
    pub fn working_set(&self) -> WorkingSet<'_> {
        WorkingSet { dataset: self, rows: (0..self.records.len()).collect() }
    }
}

/// Rows of a `Dataset` still under consideration, in source order.
/// Transitions only ever drop rows.
#[derive(Debug, Clone)]
pub struct WorkingSet<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> WorkingSet<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MeasurementRecord> + '_ {
        let records = self.dataset.records();
        self.rows.iter().map(move |&i| &records[i])
    }

    /// Keep only rows whose record satisfies `keep`.
    pub fn retain<F: FnMut(&MeasurementRecord) -> bool>(mut self, mut keep: F) -> Self {
        let records = self.dataset.records();
        self.rows.retain(|&i| keep(&records[i]));
        self
    }

    /// Drop rows missing coordinates or the selected metric.
    pub fn usable(self, column: usize) -> Self {
        self.retain(|r| r.is_usable(column))
    }

    /// Present values of the selected metric, in row order.
    pub fn values(&self, column: usize) -> impl Iterator<Item = f64> + '_ {
        self.iter().filter_map(move |r| r.metric(column))
    }
}

impl PartialEq for WorkingSet<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.rows == other.rows
    }
}
