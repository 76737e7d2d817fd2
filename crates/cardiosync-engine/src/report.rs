//! Collection reporting: fetch stored records through the query cache and
//! summarize them field by field.
//!
//! The summary view mirrors what the dataset's dashboards showed: record
//! counts, numeric ranges, and distribution bars for low-cardinality
//! fields. The raw view lists documents as JSON lines.

use std::collections::BTreeMap;
use std::sync::Arc;

use bson::Document;
use futures::TryStreamExt;
use serde_json::Value;

use cardiosync_types::{Credential, JobError, ReportParameters};

use crate::cache::QueryCache;
use crate::sink::connect;

/// Distinct-value ceiling below which a text field is shown as a
/// distribution instead of a distinct count.
const CATEGORICAL_LIMIT: usize = 12;
const BAR_WIDTH: usize = 40;

/// Fetch every document of the collection, serving repeated calls from the
/// cache until its TTL lapses.
///
/// # Errors
///
/// Returns [`JobError::StoreQuery`] if the connection or the query fails.
pub async fn fetch_records(
    credential: &Credential,
    params: &ReportParameters,
    cache: &QueryCache<Vec<Value>>,
) -> Result<Arc<Vec<Value>>, JobError> {
    let key = format!("{}/{}", params.db_name, params.collection_name);
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(query = %key, "Serving collection from cache");
        return Ok(hit);
    }

    let store_query =
        |message: String| JobError::store_query(&params.db_name, &params.collection_name, message);

    let client = connect(credential).await.map_err(store_query)?;
    let find_result = client
        .database(&params.db_name)
        .collection::<Document>(&params.collection_name)
        .find(None, None)
        .await;
    let documents: Result<Vec<Document>, _> = match find_result {
        Ok(cursor) => cursor.try_collect().await,
        Err(e) => Err(e),
    };
    client.shutdown().await;

    let documents = documents.map_err(|e| store_query(e.to_string()))?;
    let records = documents
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| store_query(format!("document decode failed: {e}")))?;

    tracing::info!(query = %key, records = records.len(), "Fetched collection");
    Ok(cache.put(&key, records))
}

/// How a field's values are summarized.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldProfile {
    /// Numeric field: range and mean.
    Numeric { min: f64, max: f64, mean: f64 },
    /// Low-cardinality field: per-value counts, descending.
    Distribution { counts: Vec<(String, u64)> },
    /// Mixed-type, high-cardinality, or structured values.
    Opaque,
}

/// Summary of one field across the record set.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    pub present: u64,
    pub profile: FieldProfile,
}

/// Summary of the whole record set.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub records: usize,
    pub fields: Vec<FieldSummary>,
}

#[derive(Default)]
struct FieldAccumulator {
    present: u64,
    numbers: Vec<f64>,
    labels: BTreeMap<String, u64>,
    complex: u64,
}

impl FieldAccumulator {
    fn observe(&mut self, value: &Value) {
        self.present += 1;
        match value {
            Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    self.numbers.push(f);
                }
            }
            Value::String(s) => *self.labels.entry(s.clone()).or_default() += 1,
            Value::Bool(b) => *self.labels.entry(b.to_string()).or_default() += 1,
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => self.complex += 1,
        }
    }

    fn profile(self) -> FieldProfile {
        // Mixed or structured fields fall through to the opaque profile.
        if self.complex == 0 && self.labels.is_empty() && !self.numbers.is_empty() {
            let min = self.numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = self
                .numbers
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let mean = self.numbers.iter().sum::<f64>() / self.numbers.len() as f64;
            return FieldProfile::Numeric { min, max, mean };
        }
        if self.complex == 0
            && self.numbers.is_empty()
            && !self.labels.is_empty()
            && self.labels.len() <= CATEGORICAL_LIMIT
        {
            let mut counts: Vec<(String, u64)> = self.labels.into_iter().collect();
            counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            return FieldProfile::Distribution { counts };
        }
        FieldProfile::Opaque
    }
}

impl DatasetSummary {
    /// Derive per-field summaries from a record set.
    #[must_use]
    pub fn compute(records: &[Value]) -> Self {
        let mut accumulators: BTreeMap<String, FieldAccumulator> = BTreeMap::new();
        for record in records {
            let Some(object) = record.as_object() else {
                continue;
            };
            for (name, value) in object {
                accumulators.entry(name.clone()).or_default().observe(value);
            }
        }

        let fields = accumulators
            .into_iter()
            .map(|(name, acc)| {
                let present = acc.present;
                FieldSummary {
                    name,
                    present,
                    profile: acc.profile(),
                }
            })
            .collect();

        Self {
            records: records.len(),
            fields,
        }
    }
}

/// Render the summary view.
#[must_use]
pub fn render(database: &str, collection: &str, summary: &DatasetSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Collection {database}.{collection}\n"));
    out.push_str(&format!("Records: {}\n\n", summary.records));

    for field in &summary.fields {
        match &field.profile {
            FieldProfile::Numeric { min, max, mean } => {
                out.push_str(&format!(
                    "{:20} n={:<6} min={:<10} max={:<10} mean={:.2}\n",
                    field.name,
                    field.present,
                    trim_float(*min),
                    trim_float(*max),
                    mean
                ));
            }
            FieldProfile::Distribution { counts } => {
                out.push_str(&format!("{:20} n={}\n", field.name, field.present));
                let top = counts.first().map_or(1, |(_, c)| (*c).max(1));
                for (label, count) in counts {
                    let width = (count * BAR_WIDTH as u64 / top) as usize;
                    out.push_str(&format!(
                        "  {:18} {:>6}  {}\n",
                        label,
                        count,
                        "#".repeat(width.max(1))
                    ));
                }
            }
            FieldProfile::Opaque => {
                out.push_str(&format!(
                    "{:20} n={:<6} (no compact profile)\n",
                    field.name, field.present
                ));
            }
        }
    }
    out
}

/// Render the raw listing view: one document per line.
#[must_use]
pub fn render_raw(records: &[Value], limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(records.len()).min(records.len());
    let mut out = String::new();
    for record in &records[..shown] {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    if shown < records.len() {
        out.push_str(&format!("... {} more record(s)\n", records.len() - shown));
    }
    out
}

fn trim_float(v: f64) -> String {
    if (v.fract()).abs() < f64::EPSILON {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Value> {
        vec![
            json!({"age": 63, "sex": "male", "chol": 233.5, "risk": "high"}),
            json!({"age": 41, "sex": "female", "chol": 204.0, "risk": "low"}),
            json!({"age": 57, "sex": "male", "chol": 192.0, "risk": "low"}),
        ]
    }

    #[test]
    fn numeric_fields_get_range_and_mean() {
        let summary = DatasetSummary::compute(&sample());
        assert_eq!(summary.records, 3);
        let age = summary.fields.iter().find(|f| f.name == "age").unwrap();
        assert_eq!(age.present, 3);
        match &age.profile {
            FieldProfile::Numeric { min, max, mean } => {
                assert_eq!(*min, 41.0);
                assert_eq!(*max, 63.0);
                assert!((mean - 53.666).abs() < 0.01);
            }
            other => panic!("expected numeric profile, got {other:?}"),
        }
    }

    #[test]
    fn low_cardinality_text_fields_get_distributions() {
        let summary = DatasetSummary::compute(&sample());
        let sex = summary.fields.iter().find(|f| f.name == "sex").unwrap();
        match &sex.profile {
            FieldProfile::Distribution { counts } => {
                assert_eq!(counts[0], ("male".to_string(), 2));
                assert_eq!(counts[1], ("female".to_string(), 1));
            }
            other => panic!("expected distribution profile, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_lower_the_present_count() {
        let records = vec![json!({"age": 60}), json!({"age": 55, "thal": "fixed"})];
        let summary = DatasetSummary::compute(&records);
        let thal = summary.fields.iter().find(|f| f.name == "thal").unwrap();
        assert_eq!(thal.present, 1);
    }

    #[test]
    fn mixed_type_field_is_opaque() {
        let records = vec![json!({"x": 1}), json!({"x": "one"})];
        let summary = DatasetSummary::compute(&records);
        let x = summary.fields.iter().find(|f| f.name == "x").unwrap();
        assert!(matches!(x.profile, FieldProfile::Opaque));
    }

    #[test]
    fn render_draws_bars_for_distributions() {
        let summary = DatasetSummary::compute(&sample());
        let text = render("HealthDB", "HeartAttack", &summary);
        assert!(text.contains("Records: 3"));
        assert!(text.contains("male"));
        assert!(text.contains('#'));
    }

    #[test]
    fn render_raw_respects_the_limit() {
        let records = sample();
        let text = render_raw(&records, Some(2));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("1 more record(s)"));
    }

    #[test]
    fn render_raw_without_limit_lists_everything() {
        let records = sample();
        let text = render_raw(&records, None);
        assert_eq!(text.lines().count(), 3);
    }
}
