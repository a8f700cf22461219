//! CLI command implementations

pub mod new;
pub mod table;

pub use new::{NewArgs, NewCommand};
pub use table::{TableArgs, TableCommand};
