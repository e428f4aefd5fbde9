pub mod conferences;
pub mod categories;
pub mod sections;
pub mod presentations;
pub mod presenters;
pub mod presenter_roles;
pub mod conflicts;

pub use conferences::*;
pub use categories::*;
pub use sections::*;
pub use presentations::*;
pub use presenters::*;
pub use presenter_roles::*;
pub use conflicts::*;
