pub mod entry;

pub use entry::{Entry, ImageRef, Index, LinkRef, RelatedRef, SiteManifest};

// where the site manifest lives, relative to the site root
pub const SITE_MANIFEST_PATH: &str = "data/site.json";
