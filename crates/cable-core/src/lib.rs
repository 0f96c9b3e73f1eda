//! cable-core: motor de ingesta de uso y estimación de supervivencia.
//!
//! Flujo: logs crudos → parser → guard de ingesta (descarta duplicados) →
//! libro de conteos + hoja de logs, y aparte el corpus `Events` →
//! estimador Kaplan–Meier por tipo de conector → resúmenes de reemplazo.
//!
//! El core opera contra el trait `SheetStore`; el backend durable vive en
//! `cable-persistence` y el in-memory de acá es su par de paridad.

pub mod analyze;
pub mod errors;
pub mod ingest;
pub mod ledger;
pub mod observations;
pub mod parser;
pub mod report;
pub mod sheets;
pub mod store;
pub mod survival;

pub use analyze::{run_analysis, AnalysisReport};
pub use errors::{CoreError, StoreError};
pub use ingest::{run_ingest, IngestReport, RawLogFile};
pub use ledger::{already_seen, UsageLedger};
pub use observations::record;
pub use parser::parse_log;
pub use report::render_replacement_table;
pub use store::{InMemorySheetStore, Sheet, SheetStore};
pub use survival::{estimate, summarize};
