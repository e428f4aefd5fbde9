pub mod conference;
pub mod category;
pub mod section;
pub mod presentation;
pub mod presenter;
pub mod conflict;

pub use conference::*;
pub use category::*;
pub use section::*;
pub use presentation::*;
pub use presenter::*;
pub use conflict::*;
