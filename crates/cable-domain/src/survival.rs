//! Curva de supervivencia y resumen de reemplazo.
//!
//! Invariantes de `SurvivalCurve`, verificados en el constructor:
//! - ciclos estrictamente crecientes entre puntos;
//! - probabilidad no creciente, arrancando en S(0) = 1.0;
//! - probabilidades en [0, 1].
//!
//! La curva se recomputa completa en cada análisis a partir de las
//! observaciones vigentes; nunca se parchea incrementalmente.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Un escalón de la función de supervivencia.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    pub cycle: u64,
    pub survival: f64,
}

/// Función escalonada de supervivencia para un tipo de conector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    connector_type: String,
    points: Vec<SurvivalPoint>,
}

impl SurvivalCurve {
    /// Valida la forma de la curva. `points` no incluye el ancla S(0)=1.0,
    /// que queda implícita: la curva vale 1.0 antes del primer punto.
    pub fn new(connector_type: &str, points: Vec<SurvivalPoint>) -> Result<Self, DomainError> {
        if connector_type.trim().is_empty() {
            return Err(DomainError::ValidationError("empty connector type".to_string()));
        }
        let mut prev_cycle: Option<u64> = None;
        let mut prev_survival = 1.0f64;
        for p in &points {
            if !(0.0..=1.0).contains(&p.survival) {
                return Err(DomainError::ValidationError(format!(
                    "survival out of [0,1] at cycle {}: {}",
                    p.cycle, p.survival
                )));
            }
            if let Some(prev) = prev_cycle {
                if p.cycle <= prev {
                    return Err(DomainError::ValidationError(format!(
                        "cycles not strictly increasing: {} after {}",
                        p.cycle, prev
                    )));
                }
            }
            if p.survival > prev_survival {
                return Err(DomainError::ValidationError(format!(
                    "survival increased at cycle {}: {} > {}",
                    p.cycle, p.survival, prev_survival
                )));
            }
            prev_cycle = Some(p.cycle);
            prev_survival = p.survival;
        }
        Ok(SurvivalCurve {
            connector_type: connector_type.to_string(),
            points,
        })
    }

    pub fn connector_type(&self) -> &str {
        &self.connector_type
    }

    pub fn points(&self) -> &[SurvivalPoint] {
        &self.points
    }

    /// Primer ciclo muestreado con S ≤ `threshold`, sin interpolación.
    /// `None` si la curva nunca baja hasta el umbral (cola dominada por
    /// censura).
    pub fn first_cycle_at_or_below(&self, threshold: f64) -> Option<u64> {
        self.points.iter().find(|p| p.survival <= threshold).map(|p| p.cycle)
    }
}

/// Resumen escalar por tipo de conector, derivado de su curva.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub connector_type: String,
    /// Primer ciclo con S ≤ 0.5; `None` si la curva nunca llega.
    pub median_cycles: Option<u64>,
    /// Primer ciclo con S ≤ 0.8.
    pub cycles_80_survival: Option<u64>,
    /// Primer ciclo con S ≤ 0.9.
    pub cycles_90_survival: Option<u64>,
}

impl PredictionSummary {
    pub fn from_curve(curve: &SurvivalCurve) -> Self {
        PredictionSummary {
            connector_type: curve.connector_type().to_string(),
            median_cycles: curve.first_cycle_at_or_below(0.5),
            cycles_80_survival: curve.first_cycle_at_or_below(0.8),
            cycles_90_survival: curve.first_cycle_at_or_below(0.9),
        }
    }
}
