use crate::core::{Payload, Record};
use crate::error::{Error, Result};
use crate::pipelines::FeaturePipeline;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stateless bag-of-words vectorizer for text payloads.
///
/// Lowercased alphanumeric tokens are hashed (FNV-1a) into `n_features`
/// buckets; each row is L2-normalised. Numeric payloads are rejected.
#[derive(Debug, Clone)]
pub struct HashingVectorizer {
    n_features: usize,
}

impl HashingVectorizer {
    pub fn new(n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(Error::config("n_features should be a positive integer"));
        }
        Ok(Self { n_features })
    }

    fn bucket(&self, token: &str) -> usize {
        let hash = token.bytes().fold(FNV_OFFSET, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
        });
        (hash % self.n_features as u64) as usize
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.n_features];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            row[self.bucket(&token.to_lowercase())] += 1.0;
        }
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.iter_mut().for_each(|v| *v /= norm);
        }
        row
    }
}

impl FeaturePipeline for HashingVectorizer {
    fn name(&self) -> &'static str {
        "hashing_vectorizer"
    }

    fn fit_transform(&mut self, records: &[Record]) -> Result<Vec<Vec<f64>>> {
        self.transform(records)
    }

    fn transform(&self, records: &[Record]) -> Result<Vec<Vec<f64>>> {
        records
            .iter()
            .map(|r| match &r.features {
                Payload::Text(text) => Ok(self.vectorize(text)),
                Payload::Numeric(_) => {
                    Err(Error::data("hashing vectorizer expects text payloads"))
                }
            })
            .collect()
    }

    fn is_fitted(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tokens_land_in_same_buckets() {
        let v = HashingVectorizer::new(64).unwrap();
        let rows = v
            .transform(&[
                Record::text("Great food", "pos"),
                Record::text("great, FOOD!", "pos"),
            ])
            .unwrap();
        assert_eq!(rows[0], rows[1]);
        let norm: f64 = rows[0].iter().map(|x| x * x).sum();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text_is_a_zero_row() {
        let v = HashingVectorizer::new(8).unwrap();
        let rows = v.transform(&[Record::text("", "x")]).unwrap();
        assert_eq!(rows[0], vec![0.0; 8]);
    }

    #[test]
    fn zero_buckets_is_rejected() {
        assert!(matches!(HashingVectorizer::new(0), Err(Error::Config(_))));
    }
}
