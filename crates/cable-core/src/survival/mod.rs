//! Estimación de supervivencia y predicción de reemplazo.

pub mod estimator;
pub mod predictor;

pub use estimator::estimate;
pub use predictor::summarize;
