use std::cell::RefCell;

use filtergrid_core::{
    FilterContainer, GridError, GridOptions, LifecycleCallbacks, LifecycleEvent, NodeHost,
};
use filtergrid_platform_web::WebHost;
use wasm_bindgen::prelude::*;

thread_local! {
    static GRID: RefCell<Option<FilterContainer<WebHost>>> = const { RefCell::new(None) };
}

fn to_js(err: GridError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("filtergrid demo starting...");
}

/// Lays out every item at the size of the first one and writes the container height.
fn layout(grid: &mut FilterContainer<WebHost>) -> Result<usize, GridError> {
    let columns = grid.calc_columns()?.max(1);
    let rows = grid.len().div_ceil(columns);
    let row_height = grid.items()[0].height();
    grid.update_height(rows as f32 * row_height)?;
    Ok(columns)
}

/// Mounts the grid found by `options_json` (or the defaults) and runs a first layout,
/// destroying a previously mounted grid first. Returns the column count.
#[wasm_bindgen]
pub fn mount_grid(options_json: Option<String>) -> Result<u32, JsValue> {
    let options = match options_json {
        Some(json) => GridOptions::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => GridOptions::default(),
    };
    unmount_grid()?;

    let host = WebHost::new().map_err(|e| to_js(e.into()))?;
    let mut grid = FilterContainer::with_default_locator(host, options).map_err(to_js)?;

    grid.bind_events(
        LifecycleCallbacks::new()
            .on_filtering_start(|event| log::info!("{}", event))
            .on_filtering_end(|event| log::info!("{}", event)),
    )
    .map_err(to_js)?;

    grid.trigger(LifecycleEvent::FilteringStart).map_err(to_js)?;
    let columns = layout(&mut grid).map_err(to_js)?;
    grid.trigger(LifecycleEvent::FilteringEnd).map_err(to_js)?;
    log::info!("mounted grid with {} items in {} columns", grid.len(), columns);

    GRID.with(|slot| *slot.borrow_mut() = Some(grid));
    Ok(columns as u32)
}

/// Re-measures the container and items after a window resize and lays out again.
#[wasm_bindgen]
pub fn relayout() -> Result<u32, JsValue> {
    GRID.with(|slot| {
        let mut slot = slot.borrow_mut();
        let grid = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("grid is not mounted"))?;
        grid.update_width().map_err(to_js)?;
        grid.update_filter_items_dimensions().map_err(to_js)?;
        let columns = layout(grid).map_err(to_js)?;
        Ok(columns as u32)
    })
}

/// Destroys the mounted grid, if any. A failed destroy keeps the grid mounted so
/// the call can be retried.
#[wasm_bindgen]
pub fn unmount_grid() -> Result<(), JsValue> {
    GRID.with(|slot| release(&mut slot.borrow_mut()).map_err(to_js))
}

/// Destroys the grid in `slot` and empties it only once destroy succeeded.
fn release<H: NodeHost>(slot: &mut Option<FilterContainer<H>>) -> Result<(), GridError> {
    if let Some(grid) = slot.as_mut() {
        grid.destroy()?;
        *slot = None;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtergrid_core::{MemoryHost, Size};

    fn mounted(host: &MemoryHost) -> Option<FilterContainer<MemoryHost>> {
        let root = host.create_element("div", &["filtr-container"]);
        host.set_size(root, Size::new(600.0, 0.0)).unwrap();
        host.insert(root, "div", &["filtr-item"], Size::new(200.0, 100.0)).unwrap();
        let grid = FilterContainer::new(host.clone(), ".filtr-container", GridOptions::default());
        Some(grid.unwrap())
    }

    #[test]
    fn test_release_empties_slot() {
        let host = MemoryHost::new();
        let mut slot = mounted(&host);

        release(&mut slot).unwrap();
        assert!(slot.is_none());
        release(&mut slot).unwrap();
    }

    #[test]
    fn test_failed_release_keeps_grid_mounted() {
        let host = MemoryHost::new();
        let mut slot = mounted(&host);
        let item = slot.as_ref().map(|grid| *grid.items()[0].node()).unwrap();
        host.set_detached(item, true).unwrap();

        assert!(release(&mut slot).is_err());
        assert!(slot.is_some());

        host.set_detached(item, false).unwrap();
        release(&mut slot).unwrap();
        assert!(slot.is_none());
    }
}
