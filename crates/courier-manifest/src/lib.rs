pub mod loader;
pub mod types;

pub use loader::{load_manifest, parse_manifest, ManifestError, MAX_MANIFEST_BYTES};
pub use types::{AssetEntry, Manifest, Transfer};
