//! Metric maps whose undefined (`NaN`) values are stored as JSON `null` and
//! read back as `NaN`, so a checkpoint survives a load/save cycle unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

pub fn serialize<S>(map: &BTreeMap<String, f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    map.iter()
        .map(|(k, v)| (k.as_str(), v.is_finite().then_some(*v)))
        .collect::<BTreeMap<&str, Option<f64>>>()
        .serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or(f64::NAN)))
        .collect())
}
