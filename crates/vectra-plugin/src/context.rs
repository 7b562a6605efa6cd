//! Plugin context: the single mutable state shared by every install and
//! hook call of one provider.

use std::any::Any;
use std::collections::HashMap;

use vectra_core::traits::DynDataSource;
use vectra_core::types::{Filters, FormField, SearchField, TableColumn};

use crate::action::{Action, ActionContext};

/// State passed by `&mut` to plugins.
///
/// The public fields are the core section. Plugins keep their own state in
/// the extension area, keyed by plugin name, so independently written
/// plugins cannot overwrite each other's fields. Writes to the same key
/// replace the previous value.
#[derive(Default)]
pub struct PluginContext {
    /// Active data source.
    pub data_source: Option<DynDataSource>,
    /// Search form fields.
    pub search_schema: Vec<SearchField>,
    /// Table columns, in display order.
    pub table_schema: Vec<TableColumn>,
    /// Edit form fields.
    pub form_schema: Vec<FormField>,
    /// Toolbar actions.
    pub actions: Vec<Action>,
    /// Identifier of the screen, used to scope persisted state.
    pub page_key: Option<String>,
    /// Filters of the last submitted search.
    pub search_params: Filters,
    extensions: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl PluginContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_source(mut self, data_source: DynDataSource) -> Self {
        self.data_source = Some(data_source);
        self
    }

    pub fn with_page_key(mut self, page_key: impl Into<String>) -> Self {
        self.page_key = Some(page_key.into());
        self
    }

    pub fn with_search_schema(mut self, schema: Vec<SearchField>) -> Self {
        self.search_schema = schema;
        self
    }

    pub fn with_table_schema(mut self, schema: Vec<TableColumn>) -> Self {
        self.table_schema = schema;
        self
    }

    pub fn with_form_schema(mut self, schema: Vec<FormField>) -> Self {
        self.form_schema = schema;
        self
    }

    /// Stores plugin state under `name`, returning whether a previous value
    /// was replaced.
    pub fn insert_extension<T>(&mut self, name: impl Into<String>, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.extensions.insert(name.into(), Box::new(value)).is_some()
    }

    /// Plugin state under `name`, if present and of type `T`.
    pub fn extension<T: Any>(&self, name: &str) -> Option<&T> {
        self.extensions.get(name)?.downcast_ref()
    }

    /// Mutable plugin state under `name`, if present and of type `T`.
    pub fn extension_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.extensions.get_mut(name)?.downcast_mut()
    }

    /// Removes plugin state.
    pub fn remove_extension(&mut self, name: &str) -> bool {
        self.extensions.remove(name).is_some()
    }

    /// Whether any state is stored under `name`.
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Action with this key.
    pub fn action(&self, key: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.key == key)
    }

    /// Appends an action unless one with the same key exists.
    pub fn add_action(&mut self, action: Action) -> bool {
        if self.action(&action.key).is_some() {
            return false;
        }
        self.actions.push(action);
        true
    }

    /// Snapshot handed to action handlers.
    pub fn action_context(&self) -> ActionContext {
        ActionContext {
            data_source: self.data_source.clone(),
            filters: self.search_params.clone(),
            ..ActionContext::default()
        }
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut extensions: Vec<&String> = self.extensions.keys().collect();
        extensions.sort();
        f.debug_struct("PluginContext")
            .field("data_source", &self.data_source.is_some())
            .field("search_schema", &self.search_schema.len())
            .field("table_schema", &self.table_schema.len())
            .field("form_schema", &self.form_schema.len())
            .field("actions", &self.actions.iter().map(|a| &a.key).collect::<Vec<_>>())
            .field("page_key", &self.page_key)
            .field("extensions", &extensions)
            .finish()
    }
}
