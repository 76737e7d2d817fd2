//! The batch of records moved by a single run.

use serde_json::Value;

/// An ordered batch of JSON records read from the source.
///
/// Read once, written once, never mutated in between. Schema is whatever
/// the input carries; the sink is schemaless.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    records: Vec<Value>,
    bytes: u64,
}

impl RecordBatch {
    #[must_use]
    pub fn new(records: Vec<Value>, bytes: u64) -> Self {
        Self { records, bytes }
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total size of the source payload the batch was decoded from.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preserves_input_order() {
        let batch = RecordBatch::new(vec![json!({"a": 1}), json!({"a": 2})], 16);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records()[0], json!({"a": 1}));
        assert_eq!(batch.records()[1], json!({"a": 2}));
        assert_eq!(batch.bytes(), 16);
    }
}
