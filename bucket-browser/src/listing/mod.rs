//! Directory-style views over flat bucket listings

mod entry;
pub mod path;
mod size;
mod view;

pub use entry::{classify, EntryKind, Icon};
pub use size::human_bytes;
pub use view::{build_bucket_page, BucketPage, DisplayEntry, ListingRequest, DISPLAY_TIME_ZONE};
