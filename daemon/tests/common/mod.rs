// Shared helpers for the KYC integration tests
#![allow(dead_code)]

use std::sync::Arc;

use kyc_common::{
    kyc::{ComparisonField, KycQueryResult, StatusEvaluator},
    time::{EvaluationDate, FixedClock},
};
use kyc_daemon::core::{
    ledger::KycLedger,
    storage::{MemoryStorage, Storage},
};

// Every scenario is evaluated on this date
pub fn evaluation_date() -> EvaluationDate {
    EvaluationDate::from_ymd_opt(2021, 6, 1).unwrap()
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn ledger_with<S: Storage>(storage: S, field: ComparisonField) -> KycLedger<S> {
    KycLedger::new(
        storage,
        StatusEvaluator::new(field),
        Arc::new(FixedClock::new(evaluation_date())),
    )
}

// Memory ledger with the KYC table created
pub async fn memory_ledger(field: ComparisonField) -> KycLedger<MemoryStorage> {
    let ledger = ledger_with(MemoryStorage::new(), field);
    ledger.init(&[]).await.unwrap();
    ledger
}

pub async fn query(ledger: &KycLedger<impl Storage>, enroll_id: &str) -> KycQueryResult {
    let payload = ledger.invoke("query", &args(&[enroll_id])).await.unwrap();
    KycQueryResult::from_json_bytes(&payload).unwrap()
}
