//! Configuration module

mod site;

pub use site::BrandConfig;
pub use site::HighlightConfig;
pub use site::LinkConfig;
pub use site::SiteConfig;
