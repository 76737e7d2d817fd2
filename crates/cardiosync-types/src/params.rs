//! Named job parameter resolution from the process argument list.
//!
//! Parameters arrive as `--name value` or `--name=value` pairs. Resolution
//! happens before any network client is constructed, so a missing parameter
//! surfaces immediately.

use std::collections::BTreeMap;

use crate::error::JobError;

/// Parameters required by the `run` and `check` flows.
pub const REQUIRED_JOB_PARAMS: [&str; 6] = [
    "job_name",
    "source_path",
    "db_name",
    "collection_name",
    "secret_name",
    "region_name",
];

/// Parameters required by the `report` flow.
pub const REQUIRED_REPORT_PARAMS: [&str; 4] =
    ["db_name", "collection_name", "secret_name", "region_name"];

/// Resolve a fixed set of required names from an argument list.
///
/// Unknown parameters are ignored; the last occurrence of a name wins.
///
/// # Errors
///
/// Returns [`JobError::MissingParameter`] for the first required name (in
/// `required` order) that is absent.
pub fn resolve_options(
    args: &[String],
    required: &[&str],
) -> Result<BTreeMap<String, String>, JobError> {
    let mut values: BTreeMap<String, String> = BTreeMap::new();

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        let Some(stripped) = arg.strip_prefix("--") else {
            continue;
        };
        if let Some((name, value)) = stripped.split_once('=') {
            values.insert(name.to_string(), value.to_string());
        } else if let Some(value) = iter.peek() {
            if !value.starts_with("--") {
                values.insert(stripped.to_string(), (*value).clone());
                iter.next();
            }
        }
    }

    for name in required {
        if !values.contains_key(*name) {
            return Err(JobError::missing_parameter(*name));
        }
    }

    values.retain(|name, _| required.contains(&name.as_str()));
    Ok(values)
}

/// The six resolved parameters of a load job. Immutable once built.
#[derive(Debug, Clone)]
pub struct JobParameters {
    pub job_name: String,
    pub source_path: String,
    pub db_name: String,
    pub collection_name: String,
    pub secret_name: String,
    pub region_name: String,
}

impl JobParameters {
    /// Resolve the required job parameters from an argument list.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::MissingParameter`] if any required name is absent.
    pub fn from_args(args: &[String]) -> Result<Self, JobError> {
        let mut values = resolve_options(args, &REQUIRED_JOB_PARAMS)?;
        let mut take = |name: &str| values.remove(name).expect("required name resolved");
        Ok(Self {
            job_name: take("job_name"),
            source_path: take("source_path"),
            db_name: take("db_name"),
            collection_name: take("collection_name"),
            secret_name: take("secret_name"),
            region_name: take("region_name"),
        })
    }
}

/// The resolved parameters of a report invocation.
#[derive(Debug, Clone)]
pub struct ReportParameters {
    pub db_name: String,
    pub collection_name: String,
    pub secret_name: String,
    pub region_name: String,
}

impl ReportParameters {
    /// Resolve the required report parameters from an argument list.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::MissingParameter`] if any required name is absent.
    pub fn from_args(args: &[String]) -> Result<Self, JobError> {
        let mut values = resolve_options(args, &REQUIRED_REPORT_PARAMS)?;
        let mut take = |name: &str| values.remove(name).expect("required name resolved");
        Ok(Self {
            db_name: take("db_name"),
            collection_name: take("collection_name"),
            secret_name: take("secret_name"),
            region_name: take("region_name"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn resolves_space_separated_pairs() {
        let argv = args(&[
            "--job_name",
            "heart_load",
            "--source_path",
            "s3://bucket/heart/",
            "--db_name",
            "HealthDB",
            "--collection_name",
            "HeartAttack",
            "--secret_name",
            "prod/mongo",
            "--region_name",
            "us-east-1",
        ]);
        let params = JobParameters::from_args(&argv).unwrap();
        assert_eq!(params.job_name, "heart_load");
        assert_eq!(params.source_path, "s3://bucket/heart/");
        assert_eq!(params.db_name, "HealthDB");
        assert_eq!(params.collection_name, "HeartAttack");
        assert_eq!(params.secret_name, "prod/mongo");
        assert_eq!(params.region_name, "us-east-1");
    }

    #[test]
    fn resolves_equals_separated_pairs() {
        let argv = args(&["--db_name=HealthDB", "--collection_name=HeartAttack"]);
        let values = resolve_options(&argv, &["db_name", "collection_name"]).unwrap();
        assert_eq!(values["db_name"], "HealthDB");
        assert_eq!(values["collection_name"], "HeartAttack");
    }

    #[test]
    fn last_occurrence_wins() {
        let argv = args(&["--db_name", "first", "--db_name", "second"]);
        let values = resolve_options(&argv, &["db_name"]).unwrap();
        assert_eq!(values["db_name"], "second");
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let argv = args(&["--db_name", "HealthDB", "--TempDir", "/tmp/glue"]);
        let values = resolve_options(&argv, &["db_name"]).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values["db_name"], "HealthDB");
    }

    #[test]
    fn missing_parameter_names_the_first_absent_one() {
        let argv = args(&["--job_name", "heart_load", "--db_name", "HealthDB"]);
        let err = JobParameters::from_args(&argv).unwrap_err();
        match err {
            JobError::MissingParameter { name } => assert_eq!(name, "source_path"),
            other => panic!("expected MissingParameter, got {other}"),
        }
    }

    #[test]
    fn flag_followed_by_flag_is_not_a_value() {
        let argv = args(&["--db_name", "--collection_name", "HeartAttack"]);
        let err = resolve_options(&argv, &["db_name", "collection_name"]).unwrap_err();
        assert!(matches!(err, JobError::MissingParameter { name } if name == "db_name"));
    }

    #[test]
    fn every_single_missing_parameter_is_reported_by_name() {
        for dropped in REQUIRED_JOB_PARAMS {
            let argv: Vec<String> = REQUIRED_JOB_PARAMS
                .iter()
                .filter(|name| **name != dropped)
                .flat_map(|name| [format!("--{name}"), "value".to_string()])
                .collect();
            let err = JobParameters::from_args(&argv).unwrap_err();
            match err {
                JobError::MissingParameter { name } => assert_eq!(name, dropped),
                other => panic!("expected MissingParameter for '{dropped}', got {other}"),
            }
        }
    }

    #[test]
    fn report_parameters_resolve_their_own_set() {
        let argv = args(&[
            "--db_name",
            "HealthDB",
            "--collection_name",
            "HeartAttack",
            "--secret_name",
            "prod/mongo",
            "--region_name",
            "us-east-1",
        ]);
        let params = ReportParameters::from_args(&argv).unwrap();
        assert_eq!(params.secret_name, "prod/mongo");
    }
}
