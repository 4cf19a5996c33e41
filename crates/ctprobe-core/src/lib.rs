//! Request-encoding probes for a single HTTP endpoint.
//!
//! `ctprobe-core` sends the same `conductor=1` parameter to one target in four
//! different shapes and reports which of them the server answers with `200 OK`.
//!
//! # Run Flow
//!
//! ```text
//! ProbeRunner::run()
//!     ↓
//! 1. Banner (tool + target)
//!     ↓
//! 2. For each probe, in fixed order:
//!     → fresh client (no proxy, fixed timeout)
//!     → send, report status / headers / body
//!     → any error becomes a failed outcome
//!     ↓
//! 3. Summary table
//!     ↓
//! 4. Diagnosis lines from conclude()
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use ctprobe_core::{ProbeConfig, ProbeRunner, Reporter};
//!
//! # fn main() -> ctprobe_core::Result<()> {
//! let mut reporter = Reporter::stdout();
//! let results = ProbeRunner::new(ProbeConfig::with_defaults()?).run(&mut reporter)?;
//! println!("all ok: {}", results.all_succeeded());
//! # Ok(())
//! # }
//! ```

pub mod conclusion;
pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use conclusion::{Conclusion, conclude};
pub use config::{ConductorPayload, DEFAULT_TARGET, DEFAULT_TIMEOUT, ProbeConfig};
pub use error::{ProbeError, Result};
pub use probe::{Probe, ProbeExchange, ProbeKind, run_probe, standard_probes};
pub use report::Reporter;
pub use runner::{ProbeResults, ProbeRunner};
