//! Expandable table rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vectra_plugin::{HookOutput, HookPoint, Plugin, PluginContext};

/// Registry name.
pub const NAME: &str = "row-expand";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RowExpandOptions {
    /// Keys of rows expanded on mount.
    pub expand_row_keys: Vec<String>,
    /// Only one row may be expanded at a time.
    pub accordion: bool,
}

/// Published as the `row-expand` extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandConfig {
    pub show_expand: bool,
    pub expand_row_keys: Vec<String>,
    pub accordion: bool,
}

impl ExpandConfig {
    /// Expands `key`. In accordion mode every other row collapses.
    pub fn expand(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.accordion {
            self.expand_row_keys.clear();
        } else if self.is_expanded(&key) {
            return;
        }
        self.expand_row_keys.push(key);
    }

    pub fn collapse(&mut self, key: &str) {
        self.expand_row_keys.retain(|k| k != key);
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expand_row_keys.iter().any(|k| k == key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RowExpandPlugin {
    options: RowExpandOptions,
}

impl RowExpandPlugin {
    pub fn new(options: RowExpandOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Plugin for RowExpandPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn options(&self) -> Option<Value> {
        serde_json::to_value(&self.options).ok()
    }

    fn hooks(&self) -> Vec<HookPoint> {
        vec![HookPoint::BeforeMountTable]
    }

    async fn before_mount_table(&self, ctx: &mut PluginContext) -> HookOutput {
        ctx.insert_extension(
            NAME,
            ExpandConfig {
                show_expand: true,
                expand_row_keys: self.options.expand_row_keys.clone(),
                accordion: self.options.accordion,
            },
        );
        Ok(None)
    }
}
