use serde::{Deserialize, Serialize};

/// A feature column name with the value supplied for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureValue {
    pub name: String,
    pub value: f64,
}

/// Outcome of fitting a linear model and evaluating it once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub target: String,
    pub features: Vec<FeatureValue>,
    pub value: f64,
    /// One coefficient per feature, in feature order.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Coefficient of determination on the training rows.
    pub r_squared: f64,
    /// Rows used for the fit after dropping incomplete ones.
    pub rows_used: usize,
}

impl Prediction {
    /// Plain-text description of the prediction.
    pub fn summary_text(&self) -> String {
        let features = self
            .features
            .iter()
            .map(|f| format!("{}: {:.2}", f.name, f.value))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Target: {}\nFeatures: {}\nPrediction: {:.4}\n",
            self.target, features, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_text_formats_values() {
        let prediction = Prediction {
            target: "y".to_string(),
            features: vec![
                FeatureValue {
                    name: "a".to_string(),
                    value: 5.0,
                },
                FeatureValue {
                    name: "b".to_string(),
                    value: 6.5,
                },
            ],
            value: 12.000_04,
            coefficients: vec![1.0, 1.0],
            intercept: 0.0,
            r_squared: 1.0,
            rows_used: 10,
        };
        assert_eq!(
            prediction.summary_text(),
            "Target: y\nFeatures: a: 5.00, b: 6.50\nPrediction: 12.0000\n"
        );
    }

    #[test]
    fn prediction_serializes() {
        let prediction = Prediction {
            target: "y".to_string(),
            features: vec![],
            value: 1.5,
            coefficients: vec![],
            intercept: 1.5,
            r_squared: 0.0,
            rows_used: 3,
        };
        let json = serde_json::to_string(&prediction).expect("serialize prediction");
        let round: Prediction = serde_json::from_str(&json).expect("deserialize prediction");
        assert_eq!(round, prediction);
    }
}
