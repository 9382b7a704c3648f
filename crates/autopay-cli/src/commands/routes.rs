//! Routes command - Resolve a path to its view

use autopay_state::Route;
use serde_json::json;

use super::print_json;
use crate::display;

pub fn resolve(path: &str, json: bool) -> anyhow::Result<()> {
    let route = Route::resolve(path);

    if json {
        return print_json(&json!({
            "path": path,
            "view": route.title(),
            "found": !matches!(route, Route::NotFound(_)),
        }));
    }

    match route {
        Route::NotFound(path) => {
            display::warning(&format!("404: no view at {}", path));
            display::info("Return to the dashboard at /");
        }
        route => display::success(&format!("{} → {}", route.path(), route.title())),
    }
    Ok(())
}
