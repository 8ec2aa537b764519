use serde::{Deserialize, Serialize};

/// One piece of an aligned line: a run of the source text and the reading
/// to print above it, if any.
///
/// Concatenating the `base` fields of a line's units, in order, gives back
/// the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentUnit {
    pub base: String,
    pub reading: Option<String>,
}

impl AlignmentUnit {
    pub fn plain(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            reading: None,
        }
    }

    /// An annotated unit. A reading that is empty or equal to the base is
    /// stored as `None`.
    pub fn annotated(base: impl Into<String>, reading: impl Into<String>) -> Self {
        let base = base.into();
        let reading = reading.into();
        let reading = (!reading.is_empty() && reading != base).then_some(reading);
        Self { base, reading }
    }

    pub fn is_annotated(&self) -> bool {
        self.reading.is_some()
    }

    /// The reading worth printing: present, non-empty and different from the base.
    pub fn visible_reading(&self) -> Option<&str> {
        self.reading
            .as_deref()
            .filter(|r| !r.is_empty() && *r != self.base)
    }
}

/// Concatenate the bases of `units`.
pub fn reconstruct(units: &[AlignmentUnit]) -> String {
    units.iter().map(|u| u.base.as_str()).collect()
}
