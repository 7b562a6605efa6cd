//! Virtual scrolling settings for large tables.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vectra_plugin::{HookOutput, HookPoint, Plugin, PluginContext};

/// Registry name.
pub const NAME: &str = "virtual-scroll";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualScrollOptions {
    pub enabled: bool,
    /// Row count above which scrolling becomes virtual.
    pub gt: u32,
    /// Rows rendered beyond the viewport on each side.
    pub o_size: u32,
    /// Row height in pixels.
    pub r_height: u32,
}

impl Default for VirtualScrollOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            gt: 100,
            o_size: 5,
            r_height: 40,
        }
    }
}

/// Published as the `virtual-scroll` extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollConfig {
    pub gt: u32,
    pub o_size: u32,
    pub r_height: u32,
}

#[derive(Debug, Clone, Default)]
pub struct VirtualScrollPlugin {
    options: VirtualScrollOptions,
}

impl VirtualScrollPlugin {
    pub fn new(options: VirtualScrollOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Plugin for VirtualScrollPlugin {
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
        if self.options.enabled {
            ctx.insert_extension(
                NAME,
                ScrollConfig {
                    gt: self.options.gt,
                    o_size: self.options.o_size,
                    r_height: self.options.r_height,
                },
            );
        }
        Ok(None)
    }
}
