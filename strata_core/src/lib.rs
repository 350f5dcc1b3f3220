mod apply;
mod catalog;
mod error;
mod runner;
mod state;
mod statement;

pub use apply::*;
pub use catalog::*;
pub use error::*;
pub use runner::*;
pub use state::*;
pub use statement::*;
