use serde::{Deserialize, Serialize};

use super::Keyed;

/// A named business figure, such as revenue or operating expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetric {
    pub name: String,
    pub amount: f64,
    pub description: String,
}

impl BusinessMetric {
    pub fn new(name: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            description: description.into(),
        }
    }
}

impl Keyed for BusinessMetric {
    fn key(&self) -> &str {
        &self.name
    }
}
