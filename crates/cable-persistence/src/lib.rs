//! cable-persistence
//!
//! Backend durable del seam `SheetStore` del core: un libro de hojas
//! nombradas serializado como documento JSON en disco, con la misma
//! semántica observable que el `InMemorySheetStore` del core (paridad 1:1,
//! verificada en tests).
//!
//! Módulos:
//! - `workbook`: el store sobre archivo (bootstrap si falta, commit
//!   atómico vía archivo temporal + rename).
//! - `config`: ruta del libro desde entorno / `.env`.
//! - `error`: taxonomía de errores de persistencia y su mapeo al
//!   `StoreError` del core.

pub mod config;
pub mod error;
pub mod workbook;

pub use config::{init_dotenv, WorkbookConfig};
pub use error::PersistenceError;
pub use workbook::WorkbookStore;
