#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionColumn {
    TransactionId,
    UserId,
    AccountNumber,
}

impl TransactionColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionColumn::TransactionId => "transaction_id",
            TransactionColumn::UserId => "user_id",
            TransactionColumn::AccountNumber => "account_number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

/// Equality-AND filter over transaction columns. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    conditions: Vec<(TransactionColumn, FilterValue)>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.conditions
            .push((TransactionColumn::UserId, FilterValue::Text(user_id.into())));
        self
    }

    pub fn transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.conditions.push((
            TransactionColumn::TransactionId,
            FilterValue::Text(transaction_id.into()),
        ));
        self
    }

    pub fn account_number(mut self, account_number: i64) -> Self {
        self.conditions.push((
            TransactionColumn::AccountNumber,
            FilterValue::Integer(account_number),
        ));
        self
    }

    pub fn conditions(&self) -> &[(TransactionColumn, FilterValue)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
