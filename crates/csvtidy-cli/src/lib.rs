//! Pipeline orchestration and command-line support for `csvtidy`.
//!
//! - [`pipeline`]: the DETECT → ANALYZE → CLEAN → VALIDATE run for one file
//! - [`batch`]: input expansion and one isolated run per file
//! - [`run_log`]: the append-only cleaning log owned by each run
//! - [`logging`]: console diagnostics for the binary
//!
//! # Example
//!
//! ```ignore
//! use csvtidy_cli::pipeline::execute;
//!
//! let ok = execute("data/customers.csv".as_ref(), None, false);
//! std::process::exit(if ok { 0 } else { 1 });
//! ```

pub mod batch;
pub mod logging;
pub mod pipeline;
pub mod run_log;
