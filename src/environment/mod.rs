//! Browser environment and fingerprint signals
//!
//! Stateless, on-demand probes of the ambient environment: devtools and
//! debugger presence, automation/headless/VM heuristics, and the canvas
//! fingerprint with its similarity check. Nothing here caches across calls;
//! the UI layer polls at moments of its choosing (page load, submission).
//!
//! Every probe degrades rather than throws when an API is missing — an
//! exotic environment yields a partial score or an empty fingerprint, never
//! an exception.

pub mod ambient;
pub mod automation;
pub mod canvas;
pub mod devtools;
pub mod similarity;

pub use automation::{automation_report, detect_automation, detect_vm, AutomationReport};
pub use canvas::canvas_fingerprint;
pub use devtools::{detect_debugger_timing, detect_dev_tools};
pub use similarity::{calculate_similarity, validate_fingerprint, DEFAULT_SIMILARITY_THRESHOLD};
