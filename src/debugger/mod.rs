//! Default logging primitive: `DEBUG`-pattern filtered namespace debuggers

pub mod color;
pub mod config;
#[allow(clippy::module_inception)]
pub mod debugger;
pub mod filter;
pub mod provider;

pub use color::{select_color, PALETTE};
pub use config::{parse_env_flag, DebugConfig, DEFAULT_ENV_VAR};
pub use debugger::Debugger;
pub use filter::DebugFilter;
pub use provider::DebugProvider;
