pub mod aliases;
pub mod render;
pub mod report;
pub mod util;
pub mod version;

pub use aliases::*;
pub use render::*;
pub use report::*;
pub use util::*;
pub use version::*;
