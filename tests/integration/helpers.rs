//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use vectra_core::traits::{DynDataSource, NoticeLevel, Notifier};
use vectra_core::types::TableColumn;
use vectra_plugin::{CrudController, CrudProvider, EventHandler, FnEventHandler, PluginContext};
use vectra_query::MemoryDataSource;

/// The user rows most tests search over.
pub fn users() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "John", "age": 30, "status": 1, "city": "Oslo"}),
        json!({"id": 2, "name": "Jane", "age": 25, "status": 0, "city": "Lima"}),
        json!({"id": 3, "name": "Bob", "age": 35, "status": 1, "city": "Oslo"}),
        json!({"id": 4, "name": "Alice", "age": 28, "status": 2}),
        json!({"id": 5, "name": "Johnny", "age": 41, "status": 1, "city": "Rome"}),
    ]
}

pub fn user_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("id", "ID").with_width(60.0),
        TableColumn::new("name", "Name"),
        TableColumn::new("age", "Age"),
        TableColumn::new("status", "Status"),
        TableColumn::new("city", "City"),
    ]
}

/// A provider-backed screen over [`users`].
pub struct TestScreen {
    pub controller: CrudController,
    pub source: Arc<MemoryDataSource<Value>>,
}

impl TestScreen {
    /// Screen with the given provider, page key `users`, and the user
    /// columns. Plugins are installed but no mount hook has run.
    pub async fn new(provider: CrudProvider) -> Self {
        let source = Arc::new(MemoryDataSource::new(users()));
        let data_source: DynDataSource = source.clone();
        let context = PluginContext::new()
            .with_data_source(data_source)
            .with_page_key("users")
            .with_table_schema(user_columns());

        let mut controller = CrudController::new(Arc::new(provider), context);
        controller.install().await.expect("Failed to install plugins");
        Self { controller, source }
    }

    /// Column props in display order.
    pub fn column_order(&self) -> Vec<String> {
        self.controller
            .context()
            .table_schema
            .iter()
            .map(|c| c.prop.clone())
            .collect()
    }
}

/// Event handler appending `"<event>"` to a shared log.
pub fn event_logger(log: Arc<Mutex<Vec<String>>>) -> Arc<dyn EventHandler> {
    FnEventHandler::shared(move |event, _payload| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(event.to_string());
            Ok(())
        }
    })
}

/// Notifier that records every notice and answers confirmations with a
/// fixed reply.
#[derive(Debug)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(NoticeLevel, String)>>,
    pub confirms: Mutex<Vec<String>>,
    reply: bool,
}

impl RecordingNotifier {
    pub fn new(reply: bool) -> Arc<Self> {
        Arc::new(Self {
            notices: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
            reply,
        })
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices.lock().unwrap().iter().map(|(l, _)| *l).collect()
    }

    pub fn last_message(&self) -> Option<String> {
        self.notices.lock().unwrap().last().map(|(_, m)| m.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.reply
    }
}
