#[macro_use]
extern crate log;

mod common;
mod error;
pub mod replay;
pub mod timeline;

pub use common::option::{ReplayOpts, DUMP_ARG, SCRIPT_ARG};
pub use common::time_point::{Breakpoint, TimePoint, Timestamp, Value};
pub use common::*;
pub use error::*;
pub use timeline::UsageTimeline;
