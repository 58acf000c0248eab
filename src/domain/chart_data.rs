// Chart payload domain models
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload shape violations. Treated like a failed fetch by the presenter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("time/value length mismatch: {time} labels, {value} values")]
    LengthMismatch { time: usize, value: usize },
    #[error("expected exactly 3 {field}, got {actual}")]
    WrongArity { field: &'static str, actual: usize },
    #[error("non-finite number in {field} at index {index}")]
    NonFinite { field: &'static str, index: usize },
    #[error("slice '{name}' has invalid value {value}")]
    InvalidSlice { name: String, value: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPayload {
    pub time: Vec<String>,
    pub value: Vec<f64>,
}

impl TimeSeriesPayload {
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.time.len() != self.value.len() {
            return Err(ShapeError::LengthMismatch {
                time: self.time.len(),
                value: self.value.len(),
            });
        }
        check_finite("value", &self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSlice {
    pub name: String,
    pub value: f64,
    pub color: String,
}

impl CompositionSlice {
    pub fn new(name: &str, value: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            value,
            color: color.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(ShapeError::InvalidSlice {
                name: self.name.clone(),
                value: self.value,
            });
        }
        Ok(())
    }

    /// Demonstration energy mix shown until a backend source exists.
    pub fn demo_set() -> Vec<CompositionSlice> {
        vec![
            CompositionSlice::new("生产设备", 1048.0, "#3498db"),
            CompositionSlice::new("暖通空调", 735.0, "#1abc9c"),
            CompositionSlice::new("照明系统", 580.0, "#f1c40f"),
            CompositionSlice::new("其他用电", 484.0, "#95a5a6"),
        ]
    }
}

/// Raw comparison payload as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayload {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Validated comparison, indexed [current, prior period, prior year].
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub labels: [String; 3],
    pub current: f64,
    pub prior_period: f64,
    pub prior_year: f64,
}

impl ComparisonPayload {
    pub fn validate(self) -> Result<Comparison, ShapeError> {
        if self.values.len() != 3 {
            return Err(ShapeError::WrongArity {
                field: "values",
                actual: self.values.len(),
            });
        }
        check_finite("values", &self.values)?;

        let labels: [String; 3] =
            self.labels
                .try_into()
                .map_err(|labels: Vec<String>| ShapeError::WrongArity {
                    field: "labels",
                    actual: labels.len(),
                })?;

        Ok(Comparison {
            labels,
            current: self.values[0],
            prior_period: self.values[1],
            prior_year: self.values[2],
        })
    }
}

impl Comparison {
    pub fn values(&self) -> [f64; 3] {
        [self.current, self.prior_period, self.prior_year]
    }
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), ShapeError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ShapeError::NonFinite { field, index }),
        None => Ok(()),
    }
}
