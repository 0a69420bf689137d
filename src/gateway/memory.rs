//! In-memory Gateway
//!
//! Holds tables of JSON rows and answers queries with the same semantics as
//! the REST store. Tables can be scripted to fail, and responses can be held
//! behind a gate so callers can observe in-flight states.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

use super::{Gateway, GatewayError, GatewayResult, Query, NOT_SINGLE_MESSAGE};

/// Content store backed by process memory
#[derive(Default)]
pub struct MemoryGateway {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    /// Table name → error message returned for any access
    failures: RwLock<HashMap<String, String>>,
    /// When set, every call waits for a permit before answering
    gate: Option<Arc<Semaphore>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows
    pub fn with_table(mut self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.get_mut().insert(table.to_string(), rows);
        self
    }

    /// Make every call touching `table` fail with `message`
    pub fn with_failure(mut self, table: &str, message: &str) -> Self {
        self.failures
            .get_mut()
            .insert(table.to_string(), message.to_string());
        self
    }

    /// Hold every response until [`MemoryGateway::release`] lets it through
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let `calls` held responses complete
    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    /// Snapshot of a table's rows
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }

    async fn check_failure(&self, table: &str) -> GatewayResult<()> {
        match self.failures.read().await.get(table) {
            Some(message) => Err(GatewayError::Api {
                status: 400,
                code: None,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Apply a column projection to a row.
///
/// `*` keeps the whole row. Embedded resources (`alias:table(...)`) keep the
/// row's value under `alias` when present.
fn project(columns: &str, row: &Value) -> Value {
    let items = split_top_level(columns);
    if items.iter().any(|item| item == "*") {
        return row.clone();
    }

    let mut out = serde_json::Map::new();
    for item in items {
        let name = item
            .split(|c| c == ':' || c == '(')
            .next()
            .unwrap_or_default()
            .trim();
        if let Some(value) = row.get(name) {
            out.insert(name.to_string(), value.clone());
        }
    }
    Value::Object(out)
}

/// Split on commas that are not inside parentheses
fn split_top_level(columns: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in columns.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                items.push(current.trim().to_string());
                current.clear();
            }
            c if c.is_whitespace() && depth == 0 => {}
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        items.push(current.trim().to_string());
    }
    items
}

#[async_trait]
impl Gateway for MemoryGateway {
    fn name(&self) -> &str {
        "memory"
    }

    async fn select(&self, query: &Query) -> GatewayResult<Value> {
        self.wait_for_gate().await;
        self.check_failure(&query.table).await?;

        let tables = self.tables.read().await;
        let mut rows: Vec<&Value> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| order.compare(a, b));
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        if query.single {
            return match rows.as_slice() {
                [row] => Ok(project(&query.columns, row)),
                _ => Err(GatewayError::NotSingle {
                    message: NOT_SINGLE_MESSAGE.to_string(),
                }),
            };
        }

        Ok(Value::Array(
            rows.into_iter()
                .map(|row| project(&query.columns, row))
                .collect(),
        ))
    }

    async fn insert(&self, table: &str, record: Value) -> GatewayResult<()> {
        self.wait_for_gate().await;
        self.check_failure(table).await?;

        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn health_check(&self) -> GatewayResult<()> {
        Ok(())
    }
}
