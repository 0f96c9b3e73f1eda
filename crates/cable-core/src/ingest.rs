//! Corrida de ingesta batch: archivos crudos → contadores + logs espejo.
//!
//! Secuencia por archivo: parsear (saltar con warning si no hay evento),
//! deduplicar contra el historial completo de logs (todas las hojas
//! `CableTester Logs - *`, más los eventos ya aceptados en esta misma
//! corrida), y recién entonces aplicar las tres actualizaciones de conteo y
//! espejar el evento en la hoja de logs de su tipo.
//!
//! Consistencia write-after-read: el historial previo se lee completo al
//! inicio; los contadores se escriben al final de la corrida. El caller
//! serializa corridas contra el mismo libro.

use std::collections::{BTreeMap, HashSet};

use log::{info, warn};
use uuid::Uuid;

use crate::errors::{CoreError, StoreError};
use crate::ledger::{already_seen, UsageLedger};
use crate::parser::parse_log;
use crate::sheets::{self, LOGS_SHEET_PREFIX};
use crate::store::SheetStore;

/// Texto completo de un archivo de log, ya leído por el caller.
#[derive(Debug, Clone)]
pub struct RawLogFile {
    pub name: String,
    pub text: String,
}

/// Conteos visibles al usuario de una corrida de ingesta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub run_id: Uuid,
    pub files_seen: usize,
    pub ingested: usize,
    pub skipped_parse: usize,
    pub skipped_duplicate: usize,
}

/// Claves de timestamp de todos los eventos ya registrados, a través de
/// todos los tipos de prueba.
fn load_timestamp_history<S: SheetStore>(store: &S) -> Result<HashSet<String>, StoreError> {
    let mut history = HashSet::new();
    for name in store.sheet_names()? {
        if !name.starts_with(LOGS_SHEET_PREFIX) {
            continue;
        }
        let Some(sheet) = store.read_sheet(&name)? else { continue };
        for (i, cells) in sheet.rows.iter().enumerate() {
            let key = sheets::decode_log_timestamp(&name, i, cells)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            history.insert(key);
        }
    }
    Ok(history)
}

fn load_ledger<S: SheetStore>(store: &S, test_type: &str) -> Result<UsageLedger, StoreError> {
    let name = sheets::count_sheet_name(test_type);
    let Some(sheet) = store.read_sheet(&name)? else {
        return Ok(UsageLedger::new());
    };
    let mut rows = Vec::with_capacity(sheet.rows.len());
    for (i, cells) in sheet.rows.iter().enumerate() {
        let row = sheets::decode_count_row(&name, i, cells).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        rows.push(row);
    }
    Ok(UsageLedger::from_rows(rows))
}

/// Procesa un lote de archivos contra el libro. Errores por archivo se
/// recuperan localmente; solo las fallas del store abortan.
pub fn run_ingest<S: SheetStore>(store: &mut S, files: &[RawLogFile]) -> Result<IngestReport, StoreError> {
    let run_id = Uuid::new_v4();
    info!("ingest run {run_id}: {} file(s)", files.len());

    let mut history = load_timestamp_history(store)?;
    // Un ledger por tipo de prueba, rehidratado la primera vez que aparece
    let mut ledgers: BTreeMap<String, UsageLedger> = BTreeMap::new();
    let mut report = IngestReport {
        run_id,
        files_seen: files.len(),
        ingested: 0,
        skipped_parse: 0,
        skipped_duplicate: 0,
    };

    for file in files {
        let event = match parse_log(&file.text) {
            Ok(ev) => ev,
            Err(CoreError::ParseFailure { reason }) => {
                warn!("ingest run {run_id}: skipping {}: {reason}", file.name);
                report.skipped_parse += 1;
                continue;
            }
            Err(other) => {
                warn!("ingest run {run_id}: skipping {}: {other}", file.name);
                report.skipped_parse += 1;
                continue;
            }
        };

        let key = event.timestamp_key();
        if already_seen(history.iter().map(String::as_str), &key) {
            info!("ingest run {run_id}: duplicate event {key} in {}, skipping", file.name);
            report.skipped_duplicate += 1;
            continue;
        }

        let test_type = event.test_type().to_string();
        if !ledgers.contains_key(&test_type) {
            let loaded = load_ledger(store, &test_type)?;
            ledgers.insert(test_type.clone(), loaded);
        }
        let ledger = ledgers.get_mut(&test_type).ok_or_else(|| {
            StoreError::Corrupt(format!("ledger for {test_type} vanished mid-run"))
        })?;
        ledger.apply_event(&event).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        store.append_row(
            &sheets::logs_sheet_name(&test_type),
            &sheets::logs_header(),
            sheets::encode_log_row(&event),
        )?;
        history.insert(key);
        report.ingested += 1;
    }

    for (test_type, ledger) in &ledgers {
        store.write_sheet(
            &sheets::count_sheet_name(test_type),
            sheets::count_header(),
            ledger.encode_rows(),
        )?;
    }

    info!(
        "ingest run {run_id}: ingested={} parse_skipped={} duplicates={}",
        report.ingested, report.skipped_parse, report.skipped_duplicate
    );
    Ok(report)
}
