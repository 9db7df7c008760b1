//! In-memory stand-ins for every external seam, for unit and router tests.

use crate::{
    abstract_trait::{
        cache::CacheBackendTrait,
        external::{AccountBalanceClientTrait, PdfRendererClientTrait, UserProfileClientTrait},
        transaction::repository::{
            command::TransactionCommandRepositoryTrait, query::TransactionQueryRepositoryTrait,
        },
    },
    domain::requests::{
        filter::{FilterValue, TransactionColumn, TransactionFilter},
        transaction::UpdateBalanceRequest,
    },
    errors::{CacheError, ClientError, RepositoryError},
    model::transaction::{NewTransactionModel, TransactionModel},
};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;

pub fn transaction(id: &str, user_id: &str, created_at: NaiveDateTime) -> TransactionModel {
    TransactionModel {
        transaction_id: id.to_string(),
        user_id: user_id.to_string(),
        account_number: 1001,
        amount: Decimal::new(2500, 2),
        transfer_to: 2002,
        status: "approved".to_string(),
        transaction_type: "debit".to_string(),
        comment: Some("groceries".to_string()),
        created_at,
        updated_at: created_at,
    }
}

/// `count` rows for `user_id`, one second apart, ids `tx-0`, `tx-1`, ...
pub fn transactions_for(user_id: &str, count: usize) -> Vec<TransactionModel> {
    let start = Utc::now().naive_utc() - ChronoDuration::hours(1);
    (0..count)
        .map(|i| {
            transaction(
                &format!("tx-{i}"),
                user_id,
                start + ChronoDuration::seconds(i as i64),
            )
        })
        .collect()
}

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    rows: Mutex<Vec<TransactionModel>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
}

impl InMemoryTransactionRepository {
    pub fn with_rows(rows: Vec<TransactionModel>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<TransactionModel> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

fn matches(row: &TransactionModel, filter: &TransactionFilter) -> bool {
    filter.conditions().iter().all(|(column, value)| match (column, value) {
        (TransactionColumn::TransactionId, FilterValue::Text(v)) => &row.transaction_id == v,
        (TransactionColumn::UserId, FilterValue::Text(v)) => &row.user_id == v,
        (TransactionColumn::AccountNumber, FilterValue::Integer(v)) => row.account_number == *v,
        _ => false,
    })
}

#[async_trait]
impl TransactionQueryRepositoryTrait for InMemoryTransactionRepository {
    async fn health_check(&self) -> bool {
        !self.fail_reads.load(Ordering::SeqCst)
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TransactionModel>, i64), RepositoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("store unavailable".into()));
        }

        let mut matched: Vec<TransactionModel> = self
            .rows()
            .into_iter()
            .filter(|row| matches(row, filter))
            .collect();
        matched.sort_by_key(|row| row.created_at);

        let total = matched.len() as i64;
        let page = if limit > 0 {
            matched
                .into_iter()
                .skip(offset.max(0) as usize)
                .take(limit as usize)
                .collect()
        } else {
            matched
        };

        Ok((page, total))
    }
}

#[async_trait]
impl TransactionCommandRepositoryTrait for InMemoryTransactionRepository {
    async fn insert(&self, transaction: &NewTransactionModel) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("store unavailable".into()));
        }

        let mut rows = self
            .rows
            .lock()
            .map_err(|_| RepositoryError::Custom("poisoned".into()))?;

        if rows
            .iter()
            .any(|row| row.transaction_id == transaction.transaction_id)
        {
            return Err(RepositoryError::AlreadyExists(
                transaction.transaction_id.clone(),
            ));
        }

        let now = Utc::now().naive_utc();
        rows.push(TransactionModel {
            transaction_id: transaction.transaction_id.clone(),
            user_id: transaction.user_id.clone(),
            account_number: transaction.account_number,
            amount: transaction.amount,
            transfer_to: transaction.transfer_to,
            status: transaction.status.clone(),
            transaction_type: transaction.transaction_type.clone(),
            comment: transaction.comment.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCacheBackend {
    entries: Mutex<HashMap<String, (String, Duration)>>,
    failing: bool,
    reads: AtomicUsize,
}

impl InMemoryCacheBackend {
    /// A backend whose every call fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (value.to_string(), Duration::from_secs(60)));
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).map(|(value, _)| value.clone()))
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).map(|(_, ttl)| *ttl))
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheBackendTrait for InMemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(CacheError::Unavailable("in-memory backend set to fail".into()));
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        if self.failing {
            return Err(CacheError::Unavailable("in-memory backend set to fail".into()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::Unavailable("poisoned".into()))?;
        entries.insert(key.to_string(), (value, ttl));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    Profile(Map<String, Value>),
    Unavailable,
    Undecodable,
    NotAnObject,
}

pub struct StubUserProfileClient {
    outcome: ProfileOutcome,
    tokens: Mutex<Vec<String>>,
}

impl StubUserProfileClient {
    pub fn new(outcome: ProfileOutcome) -> Self {
        Self {
            outcome,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn with_name(name: &str) -> Self {
        let mut profile = Map::new();
        profile.insert("name".into(), Value::String(name.to_string()));
        Self::new(ProfileOutcome::Profile(profile))
    }

    pub fn calls(&self) -> Vec<String> {
        self.tokens
            .lock()
            .map(|tokens| tokens.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserProfileClientTrait for StubUserProfileClient {
    async fn fetch_profile(&self, token: &str) -> Result<Map<String, Value>, ClientError> {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.push(token.to_string());
        }

        match &self.outcome {
            ProfileOutcome::Profile(profile) => Ok(profile.clone()),
            ProfileOutcome::Unavailable => Err(ClientError::UnexpectedStatus(503)),
            ProfileOutcome::Undecodable => Err(ClientError::Decode(
                <serde_json::Error as serde::de::Error>::custom("expected value"),
            )),
            ProfileOutcome::NotAnObject => {
                Err(ClientError::InvalidPayload("data is not an object".into()))
            }
        }
    }
}

pub struct StubPdfRendererClient {
    pdf: Option<Vec<u8>>,
    template_id: String,
    renders: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl StubPdfRendererClient {
    pub fn returning(pdf: &[u8]) -> Self {
        Self {
            pdf: Some(pdf.to_vec()),
            template_id: "template-1".to_string(),
            renders: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            pdf: None,
            template_id: "template-1".to_string(),
            renders: Mutex::new(Vec::new()),
        }
    }

    pub fn renders(&self) -> Vec<(String, Map<String, Value>)> {
        self.renders
            .lock()
            .map(|renders| renders.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PdfRendererClientTrait for StubPdfRendererClient {
    async fn register_template(
        &self,
        _file_name: &str,
        _html: Vec<u8>,
    ) -> Result<String, ClientError> {
        Ok(self.template_id.clone())
    }

    async fn generate_pdf(
        &self,
        template_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<Vec<u8>, ClientError> {
        if let Ok(mut renders) = self.renders.lock() {
            renders.push((template_id.to_string(), fields.clone()));
        }
        self.pdf.clone().ok_or(ClientError::UnexpectedStatus(500))
    }
}

/// Forwards every balance update to a channel so tests can await delivery.
pub struct RecordingBalanceClient {
    sender: mpsc::UnboundedSender<UpdateBalanceRequest>,
    fail: bool,
}

impl RecordingBalanceClient {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<UpdateBalanceRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                fail: false,
            },
            receiver,
        )
    }

    /// Records the call, then reports a delivery failure.
    pub fn failing() -> (Self, mpsc::UnboundedReceiver<UpdateBalanceRequest>) {
        let (client, receiver) = Self::new();
        (Self { fail: true, ..client }, receiver)
    }
}

#[async_trait]
impl AccountBalanceClientTrait for RecordingBalanceClient {
    async fn update_balance(&self, req: &UpdateBalanceRequest) -> Result<(), ClientError> {
        let _ = self.sender.send(req.clone());
        if self.fail {
            Err(ClientError::UnexpectedStatus(502))
        } else {
            Ok(())
        }
    }
}
