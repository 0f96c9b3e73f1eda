//! cable-domain: tipos de dominio validados del rastreador de cables.
//!
//! Este crate no hace I/O: solo define los tipos que circulan entre el
//! parser, el libro de conteos y el estimador de supervivencia, con sus
//! invariantes verificados en los constructores.

pub mod errors;
pub mod observation;
pub mod survival;
pub mod test_event;
pub mod usage;

pub use errors::DomainError;
pub use observation::FailureObservation;
pub use survival::{PredictionSummary, SurvivalCurve, SurvivalPoint};
pub use test_event::{PartRole, TestEvent, TIMESTAMP_FORMAT};
pub use usage::UsageCounterRow;
