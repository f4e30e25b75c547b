/// One named metric value computed for a timepoint.
///
/// Undefined metrics carry `NaN` rather than being dropped so every
/// timepoint reports the same columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.value.is_nan()
    }
}
