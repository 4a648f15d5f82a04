#![deny(missing_docs)]
#![doc = "Dataset, error, configuration and provenance types shared by the revpref crates."]

pub mod config;
pub mod dataset;
pub mod errors;
pub mod hash;
pub mod io;
pub mod provenance;
pub mod rng;
pub mod synthetic;

pub use config::{Axiom, CheckConfig, NormalizationCheck};
pub use dataset::{validate_pair, Dataset};
pub use errors::{ErrorInfo, RpError};
pub use hash::{dataset_hash, hash_json};
pub use io::{load_dataset, save_dataset, DatasetFile};
pub use provenance::{CheckProvenance, SchemaVersion, REPORT_SCHEMA};
pub use rng::{derive_substream_seed, RngHandle};
