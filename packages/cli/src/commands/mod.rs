pub mod apply;
pub mod export;
pub mod import;
pub mod init;
pub mod new;
pub mod serve;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use export::{export, ExportArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};
pub use new::{new_page, NewArgs};
pub use serve::{serve, ServeArgs};
pub use validate::{validate, ValidateArgs};
