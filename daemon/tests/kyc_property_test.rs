#![allow(clippy::disallowed_methods)]

// Properties of the KYC table checked over generated records and dates

mod common;

use chrono::Duration;
use kyc_common::{
    kyc::{format_date, ComparisonField, KycError, KycRecord, KycStatus, StatusEvaluator},
    time::EvaluationDate,
};
use kyc_daemon::core::{
    operation::QueryKycRequest,
    storage::{KycProvider, MemoryStorage, TableProvider},
};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = EvaluationDate> {
    // 1970-01-01 plus up to ~200 years
    (0i64..73_000).prop_map(|days| {
        EvaluationDate::from_ymd_opt(1970, 1, 1).unwrap() + Duration::days(days)
    })
}

fn field_strategy() -> impl Strategy<Value = ComparisonField> {
    prop_oneof![Just(ComparisonField::LastUpdated), Just(ComparisonField::ExpiryDate)]
}

prop_compose! {
    fn record_strategy()(
        enroll_id in "[A-Z][0-9]{1,4}",
        user_name in "[a-zA-Z ]{0,16}",
        last_updated in date_strategy(),
        bank_name in "[a-zA-Z]{0,12}",
        expiry_date in date_strategy(),
        source in "[a-zA-Z0-9]{1,12}",
    ) -> KycRecord {
        KycRecord::new(
            enroll_id,
            user_name,
            format_date(&last_updated),
            bank_name,
            format_date(&expiry_date),
            source,
        )
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_evaluation_is_deterministic(
        record in record_strategy(),
        today in date_strategy(),
        field in field_strategy(),
    ) {
        let evaluator = StatusEvaluator::new(field);
        let first = evaluator.evaluate(record.clone(), &today).unwrap();
        let second = evaluator.evaluate(record, &today).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_source_redacted_iff_expired(
        record in record_strategy(),
        today in date_strategy(),
        field in field_strategy(),
    ) {
        let result = StatusEvaluator::new(field).evaluate(record.clone(), &today).unwrap();
        prop_assert_eq!(result.kyc_status == KycStatus::Expired, result.source.is_empty());
        if result.kyc_status == KycStatus::Ok {
            prop_assert_eq!(result.source, record.source);
        }
        // Every other field is returned as stored
        prop_assert_eq!(result.enroll_id, record.enroll_id);
        prop_assert_eq!(result.last_updated, record.last_updated);
        prop_assert_eq!(result.expiry_date, record.expiry_date);
    }

    #[test]
    fn prop_last_updated_policy_matches_date_order(
        record in record_strategy(),
        today in date_strategy(),
    ) {
        let status = StatusEvaluator::new(ComparisonField::LastUpdated)
            .status(&record, &today)
            .unwrap();
        let last_updated = kyc_common::kyc::parse_date(&record.last_updated).unwrap();
        prop_assert_eq!(status.is_expired(), last_updated > today);
    }

    #[test]
    fn prop_query_is_idempotent(record in record_strategy(), today in date_strategy()) {
        runtime().block_on(async {
            let ledger = common::ledger_with(MemoryStorage::new(), ComparisonField::LastUpdated);
            ledger.init(&[]).await.unwrap();
            ledger.write(&record).await.unwrap();

            let request = QueryKycRequest::new(record.enroll_id.clone());
            let first = ledger.query_at(&request, &today).await.unwrap();
            let second = ledger.query_at(&request, &today).await.unwrap();
            assert_eq!(first, second);

            // Queries never change the stored record
            let stored = ledger.get_storage().read().await.get_kyc_record(&record.enroll_id).await.unwrap();
            assert_eq!(stored, record);
        });
    }

    #[test]
    fn prop_insert_and_replace_are_exclusive(
        first in record_strategy(),
        second in record_strategy(),
    ) {
        runtime().block_on(async {
            let mut storage = MemoryStorage::new();
            storage.create_table(&kyc_common::kyc::TableSchema::kyc()).await.unwrap();

            let mut second = second;
            second.enroll_id = first.enroll_id.clone();

            // Replace never creates
            let err = storage.replace_kyc_record(&first).await.unwrap_err();
            assert_eq!(err.as_kyc_error(), Some(&KycError::NotFound(first.enroll_id.clone())));

            // Insert never overwrites
            storage.insert_kyc_record(&first).await.unwrap();
            let err = storage.insert_kyc_record(&second).await.unwrap_err();
            assert_eq!(err.as_kyc_error(), Some(&KycError::DuplicateKey(first.enroll_id.clone())));
            assert_eq!(storage.get_kyc_record(&first.enroll_id).await.unwrap(), first.clone());

            storage.replace_kyc_record(&second).await.unwrap();
            assert_eq!(storage.get_kyc_record(&first.enroll_id).await.unwrap(), second);
            assert_eq!(storage.count_kyc_records().await.unwrap(), 1);
        });
    }
}
