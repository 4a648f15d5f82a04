//! Dataset file formats: row-major JSON and `p1..pK,x1..xK` CSV.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{matrix_rows, Dataset};
use crate::errors::RpError;

/// On-disk JSON representation of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFile {
    /// Price vectors, one row per observation.
    pub prices: Vec<Vec<f64>>,
    /// Chosen bundles, one row per observation.
    pub bundles: Vec<Vec<f64>>,
}

impl DatasetFile {
    /// Converts into a validated dataset.
    pub fn into_dataset(self) -> Result<Dataset, RpError> {
        Dataset::from_rows(&self.prices, &self.bundles)
    }
}

impl From<&Dataset> for DatasetFile {
    fn from(dataset: &Dataset) -> Self {
        Self {
            prices: matrix_rows(dataset.prices()),
            bundles: matrix_rows(dataset.bundles()),
        }
    }
}

/// Parses a dataset from JSON.
pub fn dataset_from_json(json: &str) -> Result<Dataset, RpError> {
    let file: DatasetFile = serde_json::from_str(json)
        .map_err(|err| RpError::serde("dataset-deserialize", err.to_string()))?;
    file.into_dataset()
}

/// Serialises a dataset to pretty JSON.
pub fn dataset_to_json(dataset: &Dataset) -> Result<String, RpError> {
    serde_json::to_string_pretty(&DatasetFile::from(dataset))
        .map_err(|err| RpError::serde("dataset-serialize", err.to_string()))
}

/// Parses a dataset from CSV with a `p1..pK,x1..xK` header.
pub fn dataset_from_csv<R: Read>(reader: R) -> Result<Dataset, RpError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| RpError::serde("csv-header", err.to_string()))?
        .clone();
    let goods = csv_goods(&headers)?;

    let mut prices = Vec::new();
    let mut bundles = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|err| {
            RpError::serde("csv-record", err.to_string()).with_context("record", line)
        })?;
        if record.len() != 2 * goods {
            return Err(RpError::dataset("ragged-rows", "csv record has the wrong arity")
                .with_context("record", line)
                .with_context("expected", 2 * goods)
                .with_context("found", record.len()));
        }
        let values = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field.parse::<f64>().map_err(|err| {
                    RpError::serde("csv-number", err.to_string())
                        .with_context("record", line)
                        .with_context("column", column)
                })
            })
            .collect::<Result<Vec<f64>, RpError>>()?;
        let (price, bundle) = values.split_at(goods);
        prices.push(price.to_vec());
        bundles.push(bundle.to_vec());
    }
    Dataset::from_rows(&prices, &bundles)
}

/// Serialises a dataset as CSV with a `p1..pK,x1..xK` header.
pub fn dataset_to_csv(dataset: &Dataset) -> Result<String, RpError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header: Vec<String> = (1..=dataset.goods()).map(|k| format!("p{k}")).collect();
    header.extend((1..=dataset.goods()).map(|k| format!("x{k}")));
    writer
        .write_record(&header)
        .map_err(|err| RpError::serde("csv-write", err.to_string()))?;
    for observation in 0..dataset.observations() {
        let row: Vec<String> = dataset
            .prices()
            .row(observation)
            .iter()
            .chain(dataset.bundles().row(observation).iter())
            .map(|value| value.to_string())
            .collect();
        writer
            .write_record(&row)
            .map_err(|err| RpError::serde("csv-write", err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| RpError::serde("csv-write", err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| RpError::serde("csv-write", err.to_string()))
}

/// Loads a dataset, choosing the format from the file extension.
pub fn load_dataset(path: &Path) -> Result<Dataset, RpError> {
    let bytes = fs::read(path).map_err(|err| {
        RpError::io("dataset-read", err.to_string()).with_context("path", path.display())
    })?;
    if is_csv(path) {
        dataset_from_csv(bytes.as_slice())
    } else {
        let json = String::from_utf8(bytes)
            .map_err(|err| RpError::serde("dataset-utf8", err.to_string()))?;
        dataset_from_json(&json)
    }
}

/// Writes a dataset, choosing the format from the file extension.
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<(), RpError> {
    let body = if is_csv(path) {
        dataset_to_csv(dataset)?
    } else {
        dataset_to_json(dataset)?
    };
    fs::write(path, body).map_err(|err| {
        RpError::io("dataset-write", err.to_string()).with_context("path", path.display())
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn csv_goods(headers: &csv::StringRecord) -> Result<usize, RpError> {
    let total = headers.len();
    if total == 0 || total % 2 != 0 {
        return Err(RpError::dataset(
            "csv-header",
            "csv header must list K price columns followed by K bundle columns",
        )
        .with_context("columns", total));
    }
    let goods = total / 2;
    for (column, name) in headers.iter().enumerate() {
        let (prefix, index) = if column < goods {
            ('p', column + 1)
        } else {
            ('x', column - goods + 1)
        };
        let expected = format!("{prefix}{index}");
        if !name.eq_ignore_ascii_case(&expected) {
            return Err(RpError::dataset("csv-header", "unexpected csv column name")
                .with_context("column", column)
                .with_context("expected", expected)
                .with_context("found", name));
        }
    }
    Ok(goods)
}
