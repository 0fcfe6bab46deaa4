use crate::core::DataRecord;

/// Key used for the aggregate of records dropped by a cap.
pub const OTHERS_LABEL: &str = "Others";

/// Transforms the data source output before it reaches the row pipeline.
///
/// `value_of` is the chart's value accessor; ordering and aggregation go
/// through it rather than the raw record value.
pub trait CapStrategy: Send + Sync {
    fn apply(
        &self,
        records: Vec<DataRecord>,
        value_of: &dyn Fn(&DataRecord) -> f64,
    ) -> Vec<DataRecord>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCap;

impl CapStrategy for NoCap {
    fn apply(
        &self,
        records: Vec<DataRecord>,
        _value_of: &dyn Fn(&DataRecord) -> f64,
    ) -> Vec<DataRecord> {
        records
    }
}

/// Keeps the `cap` largest records, optionally folding the rest into one
/// aggregate row.
#[derive(Debug, Clone)]
pub struct TopN {
    cap: usize,
    others_label: Option<String>,
}

impl TopN {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            others_label: Some(OTHERS_LABEL.to_owned()),
        }
    }

    #[must_use]
    pub fn with_others_label(mut self, label: impl Into<String>) -> Self {
        self.others_label = Some(label.into());
        self
    }

    /// Drops the aggregate row entirely.
    #[must_use]
    pub fn without_others(mut self) -> Self {
        self.others_label = None;
        self
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl CapStrategy for TopN {
    fn apply(
        &self,
        mut records: Vec<DataRecord>,
        value_of: &dyn Fn(&DataRecord) -> f64,
    ) -> Vec<DataRecord> {
        // stable: ties keep data-source order
        records.sort_by(|left, right| value_of(right).total_cmp(&value_of(left)));
        if records.len() <= self.cap {
            return records;
        }

        let rest = records.split_off(self.cap);
        if let Some(label) = &self.others_label {
            let total = rest.iter().map(value_of).sum();
            records.push(DataRecord::new(label.clone(), total));
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::{CapStrategy, TopN};
    use crate::core::DataRecord;

    fn sample() -> Vec<DataRecord> {
        vec![
            DataRecord::new("a", 3.0),
            DataRecord::new("b", 9.0),
            DataRecord::new("c", 1.0),
            DataRecord::new("d", 5.0),
        ]
    }

    #[test]
    fn top_n_aggregates_the_tail() {
        let capped = TopN::new(2).apply(sample(), &|r: &DataRecord| r.value);
        let keys: Vec<&str> = capped.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "d", "Others"]);
        assert_eq!(capped[2].value, 4.0);
    }

    #[test]
    fn top_n_can_drop_the_tail() {
        let capped = TopN::new(1)
            .without_others()
            .apply(sample(), &|r: &DataRecord| r.value);
        assert_eq!(capped, vec![DataRecord::new("b", 9.0)]);
    }

    #[test]
    fn cap_larger_than_input_only_sorts() {
        let capped = TopN::new(10).apply(sample(), &|r: &DataRecord| r.value);
        assert_eq!(capped.len(), 4);
        assert_eq!(capped[0].key, "b");
    }

    #[test]
    fn top_n_ranks_by_accessed_value() {
        let inverted = |r: &DataRecord| 10.0 - r.value;
        let capped = TopN::new(1).apply(sample(), &inverted);
        assert_eq!(capped[0].key, "c");
        assert_eq!(capped[1], DataRecord::new("Others", 7.0 + 1.0 + 5.0));
    }
}
