use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::database::{DatabaseError, Row, StorageClient};

/// Storage double that records every statement and replays canned results
/// in order. Once the script runs out every call returns no rows.
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Result<Vec<Row>, String>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result; each entry must be a JSON object
    pub fn respond(self, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("scripted row must be an object, got {}", other),
            })
            .collect();
        self.script.lock().unwrap().push_back(Ok(rows));
        self
    }

    /// Queue a failing result
    pub fn fail(self, message: &str) -> Self {
        self.script.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageClient for ScriptedClient {
    async fn execute(&self, statement: &str, values: &[Value]) -> Result<Vec<Row>, DatabaseError> {
        self.calls
            .lock()
            .unwrap()
            .push((statement.to_string(), values.to_vec()));

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(DatabaseError::QueryError(message)),
            None => Ok(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replays_script_and_records_calls() {
        let client = ScriptedClient::new().respond(vec![json!({ "a": 1 })]).fail("down");

        let rows = client.execute("SELECT 1", &[json!(1)]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(client.execute("SELECT 2", &[]).await.is_err());
        assert!(client.execute("SELECT 3", &[]).await.unwrap().is_empty());

        let calls = client.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], ("SELECT 1".to_string(), vec![json!(1)]));
    }
}
