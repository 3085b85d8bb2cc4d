pub mod generator;
pub mod manifest;
pub mod precomputed;
pub mod source;

pub use generator::{GenerateReport, GeneratorConfig, ManifestGenerator, ScanResult};
pub use manifest::{Manifest, DEFAULT_MANIFEST_PATH};
pub use precomputed::{PrecomputedAggregate, DEFAULT_AGGREGATE_PATH};
pub use source::{ContentSource, FsSource, FsSourceConfig, MemorySource};
