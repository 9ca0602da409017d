pub mod path;
pub mod reference;

pub use path::*;
pub use reference::*;
