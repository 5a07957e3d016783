//! Command implementations for tsync-cli

pub mod check;
pub mod setup;
pub mod sync;

pub use check::run_check;
pub use setup::run_setup;
pub use sync::run_sync;
