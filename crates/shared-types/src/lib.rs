pub mod types;

pub use types::{
    BiasType, DetectionMethod, Issue, ScanResult, Severity, SeverityLabel, UnknownBiasType,
    WordCell,
};
