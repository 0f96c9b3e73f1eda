//! Estimador producto-límite de Kaplan–Meier.
//!
//! Para un tipo de conector con observaciones `(cycles, observed)`:
//! 1. se ordenan los valores distintos de `cycles`: t_1 < ... < t_k;
//! 2. en cada t_i, d_i = fallas observadas en t_i y n_i = observaciones con
//!    `cycles >= t_i` (el risk set);
//! 3. S(t_i) = S(t_{i-1}) * (1 - d_i / n_i), con S arrancando en 1.
//!
//! Los empates en el mismo `cycles` se agregan en d_i y n_i antes del
//! factor multiplicativo, nunca evento por evento. Un punto solo de
//! censuras no baja la curva pero sí achica el risk set de los puntos
//! siguientes. La curva resultante es escalonada, plana entre puntos.

use cable_domain::{FailureObservation, SurvivalCurve, SurvivalPoint};

use crate::errors::CoreError;

/// Curva de supervivencia para un tipo de conector. Cero observaciones es
/// `InsufficientData` (se omite del análisis, no es falla de la corrida);
/// todo censurado produce la curva idénticamente 1.0.
pub fn estimate(connector_type: &str, observations: &[FailureObservation]) -> Result<SurvivalCurve, CoreError> {
    if observations.is_empty() {
        return Err(CoreError::InsufficientData { connector_type: connector_type.to_string() });
    }

    let mut cycle_values: Vec<u64> = observations.iter().map(FailureObservation::cycles).collect();
    cycle_values.sort_unstable();
    cycle_values.dedup();

    let mut survival = 1.0f64;
    let mut points = Vec::with_capacity(cycle_values.len());
    for t in cycle_values {
        let deaths = observations.iter().filter(|o| o.cycles() == t && o.observed()).count();
        let at_risk = observations.iter().filter(|o| o.cycles() >= t).count();
        if deaths > 0 {
            survival *= 1.0 - deaths as f64 / at_risk as f64;
        }
        points.push(SurvivalPoint { cycle: t, survival });
    }

    SurvivalCurve::new(connector_type, points).map_err(|e| CoreError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(cycles: u64, observed: bool) -> FailureObservation {
        FailureObservation::new("RF-A", "7", cycles, observed).unwrap()
    }

    #[test]
    fn empty_corpus_is_insufficient_data() {
        let err = estimate("RF-A", &[]).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientData { ref connector_type } if connector_type == "RF-A"));
    }

    #[test]
    fn worked_scenario_two_deaths_then_censor() {
        // 3 en riesgo a t=100, 2 fallas: S(100) = 1 - 2/3. La censura en
        // t=200 no baja la curva.
        let curve = estimate("RF-A", &[obs(100, true), obs(100, true), obs(200, false)]).unwrap();
        let pts = curve.points();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].cycle, 100);
        assert!((pts[0].survival - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(pts[1].cycle, 200);
        assert!((pts[1].survival - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_censored_curve_is_identically_one() {
        let curve = estimate("RF-A", &[obs(50, false), obs(80, false)]).unwrap();
        assert!(curve.points().iter().all(|p| p.survival == 1.0));
    }

    #[test]
    fn censoring_shrinks_later_risk_sets() {
        // t=10: 4 en riesgo, 1 falla -> 3/4. Censura en t=20 deja 2 en
        // riesgo a t=30, 1 falla -> 3/4 * 1/2 = 3/8.
        let curve = estimate("RF-A", &[obs(10, true), obs(20, false), obs(30, true), obs(30, false)]).unwrap();
        let pts = curve.points();
        assert_eq!(pts.len(), 3);
        assert!((pts[0].survival - 0.75).abs() < 1e-12);
        assert!((pts[1].survival - 0.75).abs() < 1e-12);
        assert!((pts[2].survival - 0.375).abs() < 1e-12);
    }

    #[test]
    fn tied_failures_are_aggregated_not_sequential() {
        // 2 fallas empatadas sobre 2 en riesgo: un solo factor (1 - 2/2) = 0,
        // no (1 - 1/2) dos veces.
        let curve = estimate("RF-A", &[obs(40, true), obs(40, true)]).unwrap();
        assert_eq!(curve.points().len(), 1);
        assert_eq!(curve.points()[0].survival, 0.0);
    }

    #[test]
    fn estimate_is_order_independent() {
        let a = vec![obs(10, true), obs(20, false), obs(30, true)];
        let mut b = a.clone();
        b.reverse();
        let ca = estimate("RF-A", &a).unwrap();
        let cb = estimate("RF-A", &b).unwrap();
        assert_eq!(ca, cb);
    }

    #[test]
    fn curve_is_non_increasing_and_from_one() {
        let corpus = vec![obs(5, true), obs(9, false), obs(12, true), obs(12, true), obs(40, false)];
        let curve = estimate("RF-A", &corpus).unwrap();
        let mut prev = 1.0f64;
        for p in curve.points() {
            assert!(p.survival <= prev);
            prev = p.survival;
        }
    }
}
