pub mod assets;
pub mod error;
pub mod load;
pub mod result;
pub mod validate;
pub mod visitor;

pub use assets::*;
pub use error::*;
pub use load::*;
pub use result::*;
pub use validate::*;
pub use visitor::*;
