//! Dashboard core: payload model, filter engine and presentation shell
//!
//! ```text
//! Payload ──► filter (stage counts, concepts, filtered list)
//!    │
//!    ▼
//!  Shell (selection + notification) ──► clipboard / snapshot
//! ```

pub mod filter;
pub mod notify;
pub mod payload;
pub mod shell;
pub mod stage;

pub use filter::ConceptMatch;
pub use payload::{ChangeDirection, Payload, ScanResult};
pub use shell::{Shell, SnapshotOutcome};
