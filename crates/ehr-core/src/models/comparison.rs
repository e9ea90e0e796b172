//! Comparison operators for lab thresholds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EhrError;

/// Operator applied as `lab value <op> threshold`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Comparison {
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `=`, exact floating-point equality
    Equal,
}

impl Comparison {
    /// Evaluate `value <op> threshold`.
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > threshold,
            Comparison::LessThan => value < threshold,
            Comparison::Equal => value == threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::GreaterThan => ">",
            Comparison::LessThan => "<",
            Comparison::Equal => "=",
        }
    }
}

impl FromStr for Comparison {
    type Err = EhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Comparison::GreaterThan),
            "<" => Ok(Comparison::LessThan),
            "=" => Ok(Comparison::Equal),
            other => Err(EhrError::InvalidArgument(format!(
                "Invalid comparison operator: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
