pub mod normalize;
pub mod slug;

pub use normalize::{normalize_name, normalize_name_loose};
pub use slug::{make_conference_slug, parse_conference_slug};
