//! Corrida de análisis: observaciones → curvas → hoja `Predictions`.
//!
//! Las curvas se recomputan completas desde el corpus vigente en cada
//! corrida; la hoja `Predictions` se reemplaza entera (nunca se parchea).
//! Un tipo de conector sin observaciones se omite del resultado y se
//! reporta, sin abortar la corrida.

use log::{info, warn};
use uuid::Uuid;

use cable_domain::{PredictionSummary, SurvivalCurve};

use crate::errors::{CoreError, StoreError};
use crate::observations::{group_by_connector, load_all};
use crate::sheets::{self, PREDICTIONS_SHEET};
use crate::store::SheetStore;
use crate::survival::{estimate, summarize};

/// Resultado de una corrida de análisis.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    /// Resúmenes recomputados, en orden estable por tipo de conector.
    pub summaries: Vec<PredictionSummary>,
    /// Curvas detrás de cada resumen (mismo orden), para reportes.
    pub curves: Vec<SurvivalCurve>,
    /// Tipos de conector omitidos por falta de datos.
    pub omitted: Vec<String>,
}

/// Estima y resume cada tipo de conector presente en la hoja `Events` y
/// reemplaza la hoja `Predictions` con los resúmenes nuevos.
pub fn run_analysis<S: SheetStore>(store: &mut S) -> Result<AnalysisReport, StoreError> {
    let run_id = Uuid::new_v4();
    let observations = load_all(store)?;
    info!("analysis run {run_id}: {} observation(s)", observations.len());

    let mut summaries = Vec::new();
    let mut curves = Vec::new();
    let mut omitted = Vec::new();
    for (connector_type, group) in group_by_connector(observations) {
        match estimate(&connector_type, &group) {
            Ok(curve) => {
                summaries.push(summarize(&curve));
                curves.push(curve);
            }
            Err(CoreError::InsufficientData { connector_type }) => {
                warn!("analysis run {run_id}: {connector_type} omitted, insufficient data");
                omitted.push(connector_type);
            }
            Err(other) => return Err(StoreError::Corrupt(other.to_string())),
        }
    }

    let rows = summaries.iter().map(sheets::encode_prediction_row).collect();
    store.write_sheet(PREDICTIONS_SHEET, sheets::predictions_header(), rows)?;

    info!(
        "analysis run {run_id}: {} summarized, {} omitted",
        summaries.len(),
        omitted.len()
    );
    Ok(AnalysisReport { run_id, summaries, curves, omitted })
}
