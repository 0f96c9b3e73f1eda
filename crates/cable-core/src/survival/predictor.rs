//! Predictor de reemplazo: resúmenes escalares de una curva.
//!
//! Para los umbrales {0.9, 0.8, 0.5} devuelve el menor ciclo muestreado con
//! S ≤ umbral, o indefinido si la curva nunca llega (cola dominada por
//! censura). El cruce usa los puntos de la curva tal cual, sin
//! interpolación.

use cable_domain::{PredictionSummary, SurvivalCurve};

pub fn summarize(curve: &SurvivalCurve) -> PredictionSummary {
    PredictionSummary::from_curve(curve)
}
