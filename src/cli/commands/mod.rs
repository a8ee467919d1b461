mod command_result;
pub mod dedupe;
pub mod detect;
pub mod generate;
pub mod helper;
pub mod init;
pub mod replace;
pub mod setup;
pub mod sync;
pub mod translate;
pub mod validate;
pub mod workflow;

pub use command_result::*;
