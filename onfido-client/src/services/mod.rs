pub mod client;
pub mod documents;
pub mod iter;
pub mod metrics;

pub use client::Client;
pub use documents::sniff_content_type;
pub use iter::DocumentIter;
