//! Dashboard command - Run the terminal dashboard

use autopay_state::{AppState, Route};

use crate::config::AppConfig;
use crate::display;

pub async fn run(state: AppState, route: &str, config: &AppConfig) -> anyhow::Result<()> {
    let initial = Route::resolve(route);
    tracing::info!(route = %initial, "starting dashboard");

    let result = autopay_tui::run_dashboard_tui(
        state,
        initial,
        config.tui.tick_rate(),
        Some(config.tui.export_dir.clone()),
    )
    .await?;

    display::info(&format!(
        "Dashboard closed on {} ({} notices)",
        result.route.title(),
        result.notices_shown
    ));
    Ok(())
}
