pub mod aggregate;
pub mod cli;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod parse;
pub mod progress;
pub mod stats;
pub mod util;
pub mod window;
