//! Analysis generation
//!
//! The report pipeline hands final content synthesis to an
//! [`AnalysisGenerator`]. The trait is the seam where a real text-generation
//! backend would plug in; the shipped [`MockAnalysisGenerator`] serves canned
//! write-ups for the demo watchlist and a generic fallback for anything else.

pub mod error;
pub mod generator;
pub mod mock;

pub use error::{AnalysisError, Result};
pub use generator::AnalysisGenerator;
pub use mock::MockAnalysisGenerator;
