//! Convenciones de hojas y filas tipadas.
//!
//! Cada hoja tiene un esquema fijo: un struct de fila con `encode` a celdas
//! de texto y `decode` validado. La indexación posicional de celdas queda
//! confinada a este módulo; una fila que no cumple la forma se rechaza con
//! hoja e índice, en vez de leerse a ciegas.
//!
//! Hojas del libro:
//! - `Cable Tester Count - {TYPE}`: contadores de uso por ítem.
//! - `CableTester Logs - {TYPE}`: espejo append-only de eventos aceptados.
//! - `Events`: observaciones de falla/censura (corpus del estimador).
//! - `Predictions`: últimos resúmenes, reemplazada completa por análisis.

use cable_domain::{FailureObservation, PredictionSummary, TestEvent, UsageCounterRow};

use crate::errors::CoreError;

pub const EVENTS_SHEET: &str = "Events";
pub const PREDICTIONS_SHEET: &str = "Predictions";
pub const LOGS_SHEET_PREFIX: &str = "CableTester Logs - ";
pub const COUNT_SHEET_PREFIX: &str = "Cable Tester Count - ";

pub fn count_sheet_name(test_type: &str) -> String {
    format!("{COUNT_SHEET_PREFIX}{test_type}")
}

pub fn logs_sheet_name(test_type: &str) -> String {
    format!("{LOGS_SHEET_PREFIX}{test_type}")
}

pub fn count_header() -> Vec<String> {
    ["Part Number", "Serial Number", "Usage Count"].map(str::to_string).to_vec()
}

pub fn logs_header() -> Vec<String> {
    ["Timestamp", "Test Type", "Test Set SN", "Coax SN", "Signal SN"].map(str::to_string).to_vec()
}

pub fn events_header() -> Vec<String> {
    ["connector_type", "serial_number", "cycles", "observed"].map(str::to_string).to_vec()
}

pub fn predictions_header() -> Vec<String> {
    ["connector_type", "median_cycles", "cycles_80_survival", "cycles_90_survival"]
        .map(str::to_string)
        .to_vec()
}

fn schema_err(sheet: &str, row: usize, reason: impl Into<String>) -> CoreError {
    CoreError::SheetSchema { sheet: sheet.to_string(), row, reason: reason.into() }
}

fn expect_width(sheet: &str, row: usize, cells: &[String], want: usize) -> Result<(), CoreError> {
    if cells.len() != want {
        return Err(schema_err(sheet, row, format!("expected {want} cells, got {}", cells.len())));
    }
    Ok(())
}

fn parse_u64(sheet: &str, row: usize, field: &str, cell: &str) -> Result<u64, CoreError> {
    cell.trim()
        .parse::<u64>()
        .map_err(|_| schema_err(sheet, row, format!("{field} is not a non-negative integer: {cell:?}")))
}

/// Fila de una hoja de conteo.
pub fn encode_count_row(row: &UsageCounterRow) -> Vec<String> {
    vec![
        row.part_number().to_string(),
        row.serial_number().to_string(),
        row.usage_count().to_string(),
    ]
}

pub fn decode_count_row(sheet: &str, index: usize, cells: &[String]) -> Result<UsageCounterRow, CoreError> {
    expect_width(sheet, index, cells, 3)?;
    let count = parse_u64(sheet, index, "Usage Count", &cells[2])?;
    UsageCounterRow::with_count(&cells[0], &cells[1], count)
        .map_err(|e| schema_err(sheet, index, e.to_string()))
}

/// Fila espejo de un evento aceptado en su hoja de logs.
pub fn encode_log_row(event: &TestEvent) -> Vec<String> {
    vec![
        event.timestamp_key(),
        event.test_type().to_string(),
        event.test_set_sn().to_string(),
        event.coax_sn().to_string(),
        event.signal_sn().to_string(),
    ]
}

/// Clave de timestamp de una fila de logs (para el guard de ingesta).
pub fn decode_log_timestamp(sheet: &str, index: usize, cells: &[String]) -> Result<String, CoreError> {
    expect_width(sheet, index, cells, 5)?;
    Ok(cells[0].clone())
}

/// Fila de la hoja `Events`: una observación de falla/censura.
pub fn encode_observation_row(obs: &FailureObservation) -> Vec<String> {
    vec![
        obs.connector_type().to_string(),
        obs.serial_number().to_string(),
        obs.cycles().to_string(),
        if obs.observed() { "1".to_string() } else { "0".to_string() },
    ]
}

pub fn decode_observation_row(sheet: &str, index: usize, cells: &[String]) -> Result<FailureObservation, CoreError> {
    expect_width(sheet, index, cells, 4)?;
    let cycles = parse_u64(sheet, index, "cycles", &cells[2])?;
    let observed = match cells[3].trim() {
        "1" => true,
        "0" => false,
        other => return Err(schema_err(sheet, index, format!("observed must be 0 or 1, got {other:?}"))),
    };
    FailureObservation::new(&cells[0], &cells[1], cycles, observed)
        .map_err(|e| schema_err(sheet, index, e.to_string()))
}

/// Fila de la hoja `Predictions`. Umbral no alcanzado se persiste como
/// celda vacía.
pub fn encode_prediction_row(summary: &PredictionSummary) -> Vec<String> {
    let cell = |v: Option<u64>| v.map(|c| c.to_string()).unwrap_or_default();
    vec![
        summary.connector_type.clone(),
        cell(summary.median_cycles),
        cell(summary.cycles_80_survival),
        cell(summary.cycles_90_survival),
    ]
}

pub fn decode_prediction_row(sheet: &str, index: usize, cells: &[String]) -> Result<PredictionSummary, CoreError> {
    expect_width(sheet, index, cells, 4)?;
    let opt = |field: &str, cell: &String| -> Result<Option<u64>, CoreError> {
        if cell.trim().is_empty() {
            Ok(None)
        } else {
            parse_u64(sheet, index, field, cell).map(Some)
        }
    };
    Ok(PredictionSummary {
        connector_type: cells[0].clone(),
        median_cycles: opt("median_cycles", &cells[1])?,
        cycles_80_survival: opt("cycles_80_survival", &cells[2])?,
        cycles_90_survival: opt("cycles_90_survival", &cells[3])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_follow_per_type_convention() {
        assert_eq!(count_sheet_name("ATP"), "Cable Tester Count - ATP");
        assert_eq!(logs_sheet_name("ATP"), "CableTester Logs - ATP");
    }

    #[test]
    fn observation_row_round_trips() {
        let obs = FailureObservation::new("RF-A", "77", 150, false).unwrap();
        let cells = encode_observation_row(&obs);
        let back = decode_observation_row(EVENTS_SHEET, 0, &cells).unwrap();
        assert_eq!(back, obs);
    }

    #[test]
    fn short_row_is_rejected_with_context() {
        let err = decode_count_row("Cable Tester Count - ATP", 4, &["a".to_string()]).unwrap_err();
        match err {
            CoreError::SheetSchema { sheet, row, .. } => {
                assert_eq!(sheet, "Cable Tester Count - ATP");
                assert_eq!(row, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let cells = vec!["ATP TESTER".to_string(), "9".to_string(), "many".to_string()];
        assert!(decode_count_row("Cable Tester Count - ATP", 1, &cells).is_err());
    }

    #[test]
    fn prediction_row_empty_cells_decode_as_none() {
        let cells = vec!["RF-A".to_string(), String::new(), "100".to_string(), String::new()];
        let s = decode_prediction_row(PREDICTIONS_SHEET, 0, &cells).unwrap();
        assert_eq!(s.median_cycles, None);
        assert_eq!(s.cycles_80_survival, Some(100));
        assert_eq!(s.cycles_90_survival, None);
    }
}
