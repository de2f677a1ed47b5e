pub mod merge;
pub mod segments;

pub use merge::merge_contacts;
pub use segments::{estimate_cost, message_length, page_count, DEFAULT_COST_PER_SEGMENT};
