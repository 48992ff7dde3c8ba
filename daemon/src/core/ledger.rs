// KycLedger - entry point of the KYC table
//
// Routes named operations to the table store. Status and Source redaction
// are derived on every query from the stored record and the clock, nothing
// derived is ever written back.

use std::sync::Arc;

use kyc_common::{
    config::KYC_TABLE_NAME,
    kyc::{KycError, KycQueryResult, KycRecord, StatusEvaluator, TableSchema},
    time::{Clock, EvaluationDate},
};
use log::{debug, info, warn};
use tokio::sync::RwLock;

use crate::core::{
    error::LedgerError,
    operation::{expect_init_args, KycOperation, QueryKycRequest},
    storage::{KycProvider, Storage, TableProvider},
};

pub struct KycLedger<S: Storage> {
    storage: Arc<RwLock<S>>,
    evaluator: StatusEvaluator,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> KycLedger<S> {
    pub fn new(storage: S, evaluator: StatusEvaluator, clock: Arc<dyn Clock>) -> Self {
        Self::with_shared_storage(Arc::new(RwLock::new(storage)), evaluator, clock)
    }

    // Share a storage already used elsewhere
    pub fn with_shared_storage(
        storage: Arc<RwLock<S>>,
        evaluator: StatusEvaluator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            evaluator,
            clock,
        }
    }

    #[inline]
    pub fn get_storage(&self) -> &Arc<RwLock<S>> {
        &self.storage
    }

    #[inline]
    pub fn get_evaluator(&self) -> &StatusEvaluator {
        &self.evaluator
    }

    /// Create the KYC table, takes no argument
    ///
    /// # Errors
    /// * `ArgumentCount` - Any argument was given
    /// * `Schema` - The table exists already or the backend refused it
    pub async fn init(&self, args: &[String]) -> Result<(), LedgerError> {
        expect_init_args(args)?;

        let mut storage = self.storage.write().await;
        storage
            .create_table(&TableSchema::kyc())
            .await
            .map_err(|e| match e {
                LedgerError::Kyc(e) => LedgerError::Kyc(e),
                e => KycError::Schema(format!("failed creating {} table: {}", KYC_TABLE_NAME, e)).into(),
            })?;

        info!("{} table created", KYC_TABLE_NAME);
        Ok(())
    }

    /// Run a named operation
    ///
    /// Write and update return an empty payload, query returns the JSON
    /// encoded result.
    pub async fn invoke(&self, function: &str, args: &[String]) -> Result<Vec<u8>, LedgerError> {
        debug!("invoke {} with {} arguments", function, args.len());

        let operation = KycOperation::parse(function, args).map_err(|e| {
            warn!("rejected call to {}: {}", function, e);
            e
        })?;

        let payload = match self.execute(operation).await? {
            Some(result) => result.to_json_bytes()?,
            None => Vec::new(),
        };
        Ok(payload)
    }

    /// Run a parsed operation, only a query has a result
    pub async fn execute(
        &self,
        operation: KycOperation,
    ) -> Result<Option<KycQueryResult>, LedgerError> {
        let kind = operation.kind();
        let result = match operation {
            KycOperation::Write(record) => self.write(&record).await.map(|_| None),
            KycOperation::Update(record) => self.update(&record).await.map(|_| None),
            KycOperation::Query(request) => self.query(&request).await.map(Some),
        };

        if let Err(e) = &result {
            warn!("{} failed: {}", kind, e);
        }
        result
    }

    /// Insert a new record
    ///
    /// # Errors
    /// * `DuplicateKey` - A record already exists under this enrollment ID
    pub async fn write(&self, record: &KycRecord) -> Result<(), LedgerError> {
        let mut storage = self.storage.write().await;
        storage.insert_kyc_record(record).await?;
        debug!("KYC record {} written", record.enroll_id);
        Ok(())
    }

    /// Replace an existing record
    ///
    /// # Errors
    /// * `NotFound` - No record exists under this enrollment ID
    pub async fn update(&self, record: &KycRecord) -> Result<(), LedgerError> {
        let mut storage = self.storage.write().await;
        storage.replace_kyc_record(record).await?;
        debug!("KYC record {} updated", record.enroll_id);
        Ok(())
    }

    /// Query a record, evaluated against today's date from the clock
    pub async fn query(&self, request: &QueryKycRequest) -> Result<KycQueryResult, LedgerError> {
        self.query_at(request, &self.clock.today()).await
    }

    /// Query a record, evaluated against the given date
    ///
    /// # Errors
    /// * `NotFound` - No record exists under this enrollment ID
    /// * `InvalidDate` - The comparison field of the stored record does not parse
    pub async fn query_at(
        &self,
        request: &QueryKycRequest,
        today: &EvaluationDate,
    ) -> Result<KycQueryResult, LedgerError> {
        let record = {
            let storage = self.storage.read().await;
            storage.get_kyc_record(&request.enroll_id).await?
        };

        Ok(self.evaluator.evaluate(record, today)?)
    }

    pub async fn count_records(&self) -> Result<u64, LedgerError> {
        let storage = self.storage.read().await;
        storage.count_kyc_records().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;
    use kyc_common::{kyc::KycStatus, time::FixedClock};

    fn today() -> EvaluationDate {
        EvaluationDate::from_ymd_opt(2021, 6, 1).unwrap()
    }

    fn ledger(storage: MemoryStorage) -> KycLedger<MemoryStorage> {
        KycLedger::new(
            storage,
            StatusEvaluator::default(),
            Arc::new(FixedClock::new(today())),
        )
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let ledger = ledger(MemoryStorage::new());
        ledger.init(&[]).await.unwrap();
        let err = ledger.init(&[]).await.unwrap_err();
        assert!(matches!(err.as_kyc_error(), Some(KycError::Schema(_))));
    }

    #[tokio::test]
    async fn test_init_rejects_arguments() {
        let ledger = ledger(MemoryStorage::new());
        let err = ledger.init(&args(&["KYC"])).await.unwrap_err();
        assert!(matches!(
            err.as_kyc_error(),
            Some(KycError::ArgumentCount { expected: 0, provided: 1, .. })
        ));
        assert!(!ledger.get_storage().read().await.has_table(KYC_TABLE_NAME).await.unwrap());
    }

    #[tokio::test]
    async fn test_init_refused_by_backend() {
        let ledger = ledger(MemoryStorage::new().reject_table_definitions());
        let err = ledger.init(&[]).await.unwrap_err();
        assert!(matches!(err.as_kyc_error(), Some(KycError::Schema(_))));
    }

    #[tokio::test]
    async fn test_invoke_payloads() {
        let ledger = ledger(MemoryStorage::new());
        ledger.init(&[]).await.unwrap();

        let payload = ledger
            .invoke("write", &args(&["E1", "Alice", "2020-01-01", "B1", "2030-01-01", "S1"]))
            .await
            .unwrap();
        assert!(payload.is_empty());

        let payload = ledger.invoke("query", &args(&["E1"])).await.unwrap();
        let result = KycQueryResult::from_json_bytes(&payload).unwrap();
        assert_eq!(result.kyc_status, KycStatus::Ok);
        assert_eq!(result.source, "S1");
        assert_eq!(ledger.count_records().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_arity_checked_before_storage() {
        // No table: an arity error must win over the schema error
        let ledger = ledger(MemoryStorage::new());
        let err = ledger.invoke("write", &args(&["E1"])).await.unwrap_err();
        assert!(matches!(err.as_kyc_error(), Some(KycError::ArgumentCount { .. })));
    }

    #[tokio::test]
    async fn test_query_at_other_date() {
        let ledger = ledger(MemoryStorage::new());
        ledger.init(&[]).await.unwrap();
        ledger
            .invoke("write", &args(&["E3", "Carol", "2099-12-31", "B3", "2100-01-01", "S3"]))
            .await
            .unwrap();

        let request = QueryKycRequest::new("E3");
        assert!(ledger.query(&request).await.unwrap().is_expired());

        let later = EvaluationDate::from_ymd_opt(2099, 12, 31).unwrap();
        let result = ledger.query_at(&request, &later).await.unwrap();
        assert_eq!(result.kyc_status, KycStatus::Ok);
        assert_eq!(result.source, "S3");
    }
}
