//! The bundled sample dataset.
//!
//! A fixed, illustrative customer table users can download and feed back
//! into the workflow.

use crate::dataset::DatasetError;
use holomine_core::session::DatasetInput;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name the sample is offered under.
pub const SAMPLE_FILE_NAME: &str = "sample-data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub income: u32,
    pub purchases: u32,
}

impl SampleRecord {
    fn new(id: u32, name: &str, age: u32, income: u32, purchases: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
            income,
            purchases,
        }
    }
}

pub fn sample_records() -> Vec<SampleRecord> {
    vec![
        SampleRecord::new(1, "Customer A", 25, 50000, 120),
        SampleRecord::new(2, "Customer B", 35, 75000, 200),
        SampleRecord::new(3, "Customer C", 45, 90000, 150),
        SampleRecord::new(4, "Customer D", 28, 55000, 180),
        SampleRecord::new(5, "Customer E", 38, 80000, 220),
        SampleRecord::new(6, "Customer F", 52, 95000, 140),
        SampleRecord::new(7, "Customer G", 29, 60000, 190),
        SampleRecord::new(8, "Customer H", 41, 85000, 210),
    ]
}

/// The sample serialized as pretty-printed JSON.
pub fn sample_dataset_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&sample_records())
}

/// The sample as an in-memory dataset, ready for `select_input`.
pub fn sample_dataset_input() -> Result<DatasetInput, serde_json::Error> {
    Ok(DatasetInput::new(
        SAMPLE_FILE_NAME,
        sample_dataset_json()?.into_bytes(),
    ))
}

/// Writes the sample to `path`.
pub async fn export_sample_dataset(path: &Path) -> Result<(), DatasetError> {
    let json = sample_dataset_json()?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("[SampleData] Wrote sample dataset to {}", path.display());
    Ok(())
}
