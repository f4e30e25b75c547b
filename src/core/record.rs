use serde::{Deserialize, Serialize};

/// Categorical target value of a record.
pub type Label = String;

/// Feature payload carried by a record.
///
/// The core never looks inside a payload; it only hands it to a
/// [`FeaturePipeline`](crate::pipelines::FeaturePipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Numeric(Vec<f64>),
    Text(String),
}

/// One labelled observation of the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub features: Payload,
    pub label: Label,
}

impl Record {
    pub fn new<L: Into<Label>>(features: Payload, label: L) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }

    pub fn numeric<L: Into<Label>>(values: Vec<f64>, label: L) -> Self {
        Self::new(Payload::Numeric(values), label)
    }

    pub fn text<T: Into<String>, L: Into<Label>>(text: T, label: L) -> Self {
        Self::new(Payload::Text(text.into()), label)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_payload_reads_numbers_and_text() {
        let numeric: Record =
            serde_json::from_str(r#"{"features":[1.0,2.5],"label":"pos"}"#).unwrap();
        assert_eq!(numeric.features, Payload::Numeric(vec![1.0, 2.5]));

        let text: Record =
            serde_json::from_str(r#"{"features":"great food","label":"neg"}"#).unwrap();
        assert_eq!(text.features, Payload::Text("great food".into()));
        assert_eq!(text.label(), "neg");
    }
}
