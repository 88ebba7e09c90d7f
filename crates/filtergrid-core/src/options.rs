//! User configuration carried by the container and snapshotted into every item.

use serde::{Deserialize, Serialize};

/// Default locator of the grid container element.
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".filtr-container";

/// Default selector of the item elements inside the container.
pub const DEFAULT_ITEM_SELECTOR: &str = ".filtr-item";

/// How per-item transition delays are distributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelayMode {
    #[default]
    Progressive,
    Alternate,
}

/// Layout algorithm the facade applies to the items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    #[default]
    SameSize,
    SameWidth,
    SameHeight,
    Packed,
    Horizontal,
    Vertical,
}

/// Configuration snapshot for a grid.
///
/// Deserializes from the camelCase keys a page script would pass, with every
/// key optional:
///
/// ```rust
/// use filtergrid_core::{GridOptions, LayoutMode};
///
/// let options = GridOptions::from_json(r#"{ "layout": "packed", "delay": 25 }"#).unwrap();
/// assert_eq!(options.layout, LayoutMode::Packed);
/// assert_eq!(options.item_selector, ".filtr-item");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    /// Locator of the container element.
    pub selector: String,

    /// Selector of the item elements scanned inside the container.
    pub item_selector: String,

    /// Transition duration in seconds.
    pub animation_duration: f32,

    /// Base delay between item transitions, in milliseconds.
    pub delay: u32,

    pub delay_mode: DelayMode,

    /// CSS easing function name.
    pub easing: String,

    /// Active filter category, `"all"` shows every item.
    pub filter: String,

    pub layout: LayoutMode,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            animation_duration: 0.5,
            delay: 0,
            delay_mode: DelayMode::Progressive,
            easing: "ease-out".to_string(),
            filter: "all".to_string(),
            layout: LayoutMode::SameSize,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON text; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn item_selector(mut self, selector: impl Into<String>) -> Self {
        self.item_selector = selector.into();
        self
    }

    pub fn animation_duration(mut self, seconds: f32) -> Self {
        self.animation_duration = seconds;
        self
    }

    pub fn delay(mut self, millis: u32, mode: DelayMode) -> Self {
        self.delay = millis;
        self.delay_mode = mode;
        self
    }

    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }
}
