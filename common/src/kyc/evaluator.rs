// Status evaluation
// Turns a stored record and an evaluation date into a query result

use chrono::NaiveDate;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::kyc::{is_future, parse_date, KycQueryResult, KycRecord, KycResult, KycStatus};

/// Which stored date decides whether a record is expired
///
/// `LastUpdated` keeps the historical ledger behavior: a record whose
/// LastUpdated date lies after today is reported as Expired.
/// `ExpiryDate` reports a record as Expired once today is after its
/// ExpiryDate; the record stays OK through the expiry day itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", clap(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ComparisonField {
    #[default]
    LastUpdated,
    ExpiryDate,
}

impl ComparisonField {
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::LastUpdated => crate::config::COLUMN_LAST_UPDATED,
            Self::ExpiryDate => crate::config::COLUMN_EXPIRY_DATE,
        }
    }

    // Raw stored value of the comparison field
    fn value<'a>(&self, record: &'a KycRecord) -> &'a str {
        match self {
            Self::LastUpdated => &record.last_updated,
            Self::ExpiryDate => &record.expiry_date,
        }
    }
}

/// Derives KycStatus and Source visibility for a record
///
/// Pure: the same record and date always give the same result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusEvaluator {
    comparison_field: ComparisonField,
}

impl StatusEvaluator {
    pub fn new(comparison_field: ComparisonField) -> Self {
        Self { comparison_field }
    }

    #[inline]
    pub fn get_comparison_field(&self) -> ComparisonField {
        self.comparison_field
    }

    /// Compute the status only
    /// Fails with InvalidDate if the comparison field does not parse
    pub fn status(&self, record: &KycRecord, today: &NaiveDate) -> KycResult<KycStatus> {
        let raw = self.comparison_field.value(record);
        let date = parse_date(raw).map_err(|e| {
            debug!(
                "cannot evaluate KYC record {}: {} is not a valid date",
                record.enroll_id,
                self.comparison_field.column_name()
            );
            e
        })?;

        let expired = match self.comparison_field {
            ComparisonField::LastUpdated => is_future(&date, today),
            ComparisonField::ExpiryDate => is_future(today, &date),
        };

        if log::log_enabled!(log::Level::Trace) {
            trace!(
                "KYC record {} {} {} against {}: expired = {}",
                record.enroll_id,
                self.comparison_field.column_name(),
                date,
                today,
                expired
            );
        }

        Ok(if expired {
            KycStatus::Expired
        } else {
            KycStatus::Ok
        })
    }

    /// Build the query result for a record
    pub fn evaluate(&self, record: KycRecord, today: &NaiveDate) -> KycResult<KycQueryResult> {
        let status = self.status(&record, today)?;
        Ok(KycQueryResult::from_record(record, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyc::KycError;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(last_updated: &str, expiry_date: &str) -> KycRecord {
        KycRecord::new("E1", "Alice", last_updated, "BankA", expiry_date, "SourceX")
    }

    #[test]
    fn test_last_updated_in_past_is_ok() {
        let evaluator = StatusEvaluator::default();
        let result = evaluator
            .evaluate(record("2020-01-01", "2030-01-01"), &ymd(2021, 6, 1))
            .unwrap();
        assert_eq!(result.kyc_status, KycStatus::Ok);
        assert_eq!(result.source, "SourceX");
    }

    #[test]
    fn test_last_updated_in_future_is_expired() {
        let evaluator = StatusEvaluator::default();
        let result = evaluator
            .evaluate(record("2099-01-01", "2030-01-01"), &ymd(2021, 6, 1))
            .unwrap();
        assert_eq!(result.kyc_status, KycStatus::Expired);
        assert_eq!(result.source, "");
        // Other fields pass through
        assert_eq!(result.last_updated, "2099-01-01");
        assert_eq!(result.expiry_date, "2030-01-01");
        assert_eq!(result.bank_name, "BankA");
    }

    #[test]
    fn test_last_updated_today_is_ok() {
        let evaluator = StatusEvaluator::new(ComparisonField::LastUpdated);
        let status = evaluator
            .status(&record("2021-06-01", "2030-01-01"), &ymd(2021, 6, 1))
            .unwrap();
        assert_eq!(status, KycStatus::Ok);

        let status = evaluator
            .status(&record("2021-06-02", "2030-01-01"), &ymd(2021, 6, 1))
            .unwrap();
        assert_eq!(status, KycStatus::Expired);
    }

    #[test]
    fn test_expiry_date_policy() {
        let evaluator = StatusEvaluator::new(ComparisonField::ExpiryDate);
        let today = ymd(2021, 6, 1);

        // Expiry in the future: still valid, even with a future LastUpdated
        let status = evaluator
            .status(&record("2099-01-01", "2030-01-01"), &today)
            .unwrap();
        assert_eq!(status, KycStatus::Ok);

        // Expiry day itself is still valid
        let status = evaluator
            .status(&record("2020-01-01", "2021-06-01"), &today)
            .unwrap();
        assert_eq!(status, KycStatus::Ok);

        // Day after expiry
        let status = evaluator
            .status(&record("2020-01-01", "2021-05-31"), &today)
            .unwrap();
        assert_eq!(status, KycStatus::Expired);
    }

    #[test]
    fn test_invalid_comparison_field_fails() {
        let evaluator = StatusEvaluator::default();
        let err = evaluator
            .evaluate(record("not-a-date", "2030-01-01"), &ymd(2021, 6, 1))
            .unwrap_err();
        assert_eq!(err, KycError::InvalidDate("not-a-date".to_string()));
    }

    #[test]
    fn test_only_comparison_field_is_parsed() {
        // ExpiryDate is garbage but LastUpdated decides
        let evaluator = StatusEvaluator::new(ComparisonField::LastUpdated);
        let result = evaluator
            .evaluate(record("2020-01-01", "garbage"), &ymd(2021, 6, 1))
            .unwrap();
        assert_eq!(result.kyc_status, KycStatus::Ok);
        assert_eq!(result.expiry_date, "garbage");

        let evaluator = StatusEvaluator::new(ComparisonField::ExpiryDate);
        assert_eq!(
            evaluator.status(&record("2020-01-01", "garbage"), &ymd(2021, 6, 1)),
            Err(KycError::InvalidDate("garbage".to_string()))
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let evaluator = StatusEvaluator::default();
        let today = ymd(2021, 6, 1);
        let first = evaluator.evaluate(record("2099-01-01", "2030-01-01"), &today);
        let second = evaluator.evaluate(record("2099-01-01", "2030-01-01"), &today);
        assert_eq!(first, second);
    }
}
