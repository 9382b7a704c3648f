//! Settings command - Show or reset payment settings

use autopay_state::AppState;
use autopay_types::SettingField;

use super::print_json;
use crate::display;

pub fn show(state: &mut AppState, reset: bool, json: bool) -> anyhow::Result<()> {
    if reset {
        state.reset_settings();
    }
    let settings = state.settings.settings();

    if json {
        return print_json(settings);
    }

    display::section("Payment Settings");
    for field in SettingField::ALL {
        display::labeled(&format!("{:<30}", field.label()), &settings.display_value(field));
    }
    println!();
    display::info("Settings are held in memory and start from the defaults on every run");
    Ok(())
}
