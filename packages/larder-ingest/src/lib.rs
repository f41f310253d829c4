pub mod columns;
pub mod lots;
pub mod thresholds;

mod error;

pub use error::{Error, Result};
pub use lots::{LotFile, read_lots};
pub use thresholds::{ThresholdFile, read_thresholds};
