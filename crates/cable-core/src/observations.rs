//! Corpus de observaciones de falla/censura (hoja `Events`).
//!
//! Append-only y sin deduplicación: registrar dos veces el mismo evento
//! físico es un error de uso a atajar aguas arriba, no acá. Las
//! correcciones son filas nuevas.

use std::collections::BTreeMap;

use cable_domain::FailureObservation;
use log::debug;

use crate::errors::StoreError;
use crate::sheets::{self, EVENTS_SHEET};
use crate::store::SheetStore;

/// Agrega una observación a la hoja `Events`, creándola con encabezado si
/// no existía.
pub fn record<S: SheetStore>(store: &mut S, obs: &FailureObservation) -> Result<(), StoreError> {
    debug!(
        "recording observation: connector={} serial={} cycles={} observed={}",
        obs.connector_type(),
        obs.serial_number(),
        obs.cycles(),
        obs.observed()
    );
    store.append_row(EVENTS_SHEET, &sheets::events_header(), sheets::encode_observation_row(obs))
}

/// Lee todas las observaciones persistidas. Hoja ausente: corpus vacío
/// (el libro recién arrancado todavía no registró eventos).
pub fn load_all<S: SheetStore>(store: &S) -> Result<Vec<FailureObservation>, StoreError> {
    let Some(sheet) = store.read_sheet(EVENTS_SHEET)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(sheet.rows.len());
    for (i, cells) in sheet.rows.iter().enumerate() {
        let obs = sheets::decode_observation_row(EVENTS_SHEET, i, cells)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        out.push(obs);
    }
    Ok(out)
}

/// Agrupa por tipo de conector, en orden estable de clave.
pub fn group_by_connector(observations: Vec<FailureObservation>) -> BTreeMap<String, Vec<FailureObservation>> {
    let mut groups: BTreeMap<String, Vec<FailureObservation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.connector_type().to_string()).or_default().push(obs);
    }
    groups
}
