pub use error::{Error, Result};

pub mod arch;
pub mod command;
pub mod env;
mod error;
pub mod os;
pub mod target;

pub use arch::Arch;
pub use command::Command;
pub use os::TargetOs;
pub use target::Target;
