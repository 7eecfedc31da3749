#![doc = include_str!("../README.md")]

pub mod dataset;
pub mod export;
pub mod import;
pub mod record;
pub mod strand;

pub use dataset::Dataset;
pub use export::ExportError;
pub use record::{NO_CALL, RecordSet, VariantRecord};
pub use strand::{MinusStrandTable, StrandSource, flip_alleles};
