//! Row selection for batch actions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vectra_core::result::AppResult;
use vectra_core::types::RecordId;
use vectra_plugin::{Plugin, PluginContext};

/// Registry name.
pub const NAME: &str = "batch-actions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchActionsOptions {
    /// Show the batch bar while rows are selected.
    pub show_bar: bool,
    /// Pin the batch bar to the viewport.
    pub fixed: bool,
}

impl Default for BatchActionsOptions {
    fn default() -> Self {
        Self {
            show_bar: true,
            fixed: false,
        }
    }
}

/// Selected row identifiers, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSelection {
    pub show_bar: bool,
    pub fixed: bool,
    selected: Vec<RecordId>,
}

impl BatchSelection {
    pub fn new(options: &BatchActionsOptions) -> Self {
        Self {
            show_bar: options.show_bar,
            fixed: options.fixed,
            selected: Vec::new(),
        }
    }

    /// Adds `id`. Returns `false` if it was already selected.
    pub fn select(&mut self, id: RecordId) -> bool {
        if self.is_selected(&id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    /// Removes `id`. Returns `false` if it was not selected.
    pub fn deselect(&mut self, id: &RecordId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.selected.len() != before
    }

    /// Flips `id`, returning whether it is now selected.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.deselect(&id) {
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    /// Selects every id not yet selected, keeping earlier selections first.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        for id in ids {
            self.select(id);
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &[RecordId] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Whether the batch bar should be visible now.
    pub fn bar_visible(&self) -> bool {
        self.show_bar && !self.selected.is_empty()
    }
}

/// Seeds an empty [`BatchSelection`] extension on install. Hosts pass
/// `selected()` to batch actions through `ActionContext::with_selection`.
#[derive(Debug, Clone, Default)]
pub struct BatchActionsPlugin {
    options: BatchActionsOptions,
}

impl BatchActionsPlugin {
    pub fn new(options: BatchActionsOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Plugin for BatchActionsPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn options(&self) -> Option<Value> {
        serde_json::to_value(&self.options).ok()
    }

    async fn install(&self, ctx: &mut PluginContext) -> AppResult<()> {
        ctx.insert_extension(NAME, BatchSelection::new(&self.options));
        Ok(())
    }
}
