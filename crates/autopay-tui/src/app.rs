//! Dashboard view state and key handling
//!
//! `App` is a plain state machine: a key goes in, the stores are mutated
//! synchronously and a [`Command`] comes out for anything that has to wait
//! (simulation, wallet). The run loop in `lib.rs` owns the terminal and the
//! spawned tasks.

use std::path::{Path, PathBuf};

use autopay_state::{
    export_json, AppState, LogFilter, Navigator, Notice, Route, SimulationRequest, WalletState,
};
use autopay_types::{
    AgentDraft, AgentRole, AutopayError, PaymentStatus, Result as AutopayResult, ServiceType,
    SettingField, SimulationResult, TokenAmount,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::TuiError;

/// Work the run loop has to carry out after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Simulate(SimulationRequest),
    ConnectWallet,
    DisconnectWallet,
}

/// Where typed characters go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AgentForm,
    Units,
    Search,
    Goto,
}

/// Field of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Role,
    Wallet,
    Limit,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Name, Self::Role, Self::Wallet, Self::Limit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Agent Name",
            Self::Role => "Agent Role",
            Self::Wallet => "Wallet Address",
            Self::Limit => "Spending Limit (tokens)",
        }
    }

    fn offset(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ALL[(index + delta).rem_euclid(len) as usize]
    }
}

/// Registration form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentForm {
    pub draft: AgentDraft,
    pub focus: FormField,
}

impl AgentForm {
    fn new(default_limit: TokenAmount) -> Self {
        Self {
            draft: AgentDraft::new("", "", "", default_limit.whole_tokens().to_string()),
            focus: FormField::Name,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Wallet => Some(&mut self.draft.wallet_address),
            FormField::Limit => Some(&mut self.draft.spending_limit),
            FormField::Role => None,
        }
    }

    fn cycle_role(&mut self) {
        let next = match self.draft.role.parse::<AgentRole>() {
            Ok(role) => role.next(),
            Err(_) => AgentRole::Compute,
        };
        self.draft.role = next.as_str().to_string();
    }
}

/// Simulation form; agents are held by id so removals cannot shift them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationForm {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub service: Option<ServiceType>,
    pub units: String,
}

impl SimulationForm {
    pub fn request(&self) -> SimulationRequest {
        SimulationRequest::new(
            self.sender.clone().unwrap_or_default(),
            self.recipient.clone().unwrap_or_default(),
            self.service.map(|s| s.as_str().to_string()).unwrap_or_default(),
            self.units.clone(),
        )
    }
}

pub struct App {
    pub state: AppState,
    pub route: Route,
    pub mode: InputMode,
    pub agent_form: Option<AgentForm>,
    pub selected_agent: usize,
    pub simulation_form: SimulationForm,
    pub simulating: bool,
    pub log_filter: LogFilter,
    pub selected_setting: usize,
    pub goto_input: String,
    /// Last observed wallet state, refreshed by the run loop
    pub wallet: WalletState,
    export_dir: PathBuf,
}

impl Navigator for App {
    fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.route = route;
        self.mode = InputMode::Normal;
    }
}

fn next_id(ids: &[&str], current: Option<&str>) -> Option<String> {
    let index = match current.and_then(|c| ids.iter().position(|id| *id == c)) {
        Some(i) => (i + 1) % ids.len(),
        None => 0,
    };
    ids.get(index).map(|id| id.to_string())
}

impl App {
    pub fn new(state: AppState, route: Route, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            state,
            route,
            mode: InputMode::Normal,
            agent_form: None,
            selected_agent: 0,
            simulation_form: SimulationForm::default(),
            simulating: false,
            log_filter: LogFilter::default(),
            selected_setting: 0,
            goto_input: String::new(),
            wallet: WalletState::Disconnected,
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn selected_setting_field(&self) -> SettingField {
        SettingField::ALL[self.selected_setting.min(SettingField::ALL.len() - 1)]
    }

    /// Dispatch one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }
        match self.mode {
            InputMode::AgentForm => self.handle_agent_form(key),
            InputMode::Units => {
                self.handle_units(key);
                Command::None
            }
            InputMode::Search => {
                self.handle_search(key);
                Command::None
            }
            InputMode::Goto => {
                self.handle_goto(key);
                Command::None
            }
            InputMode::Normal => self.handle_normal(key),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Command::Quit,
            KeyCode::Char(':') => {
                self.goto_input.clear();
                self.mode = InputMode::Goto;
                return Command::None;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.navigate(Route::TABS[index].clone());
                return Command::None;
            }
            KeyCode::Tab => {
                self.shift_tab(1);
                return Command::None;
            }
            KeyCode::BackTab => {
                self.shift_tab(-1);
                return Command::None;
            }
            _ => {}
        }

        match self.route {
            Route::Dashboard => self.handle_dashboard(key),
            Route::Agents => {
                self.handle_agents(key);
                Command::None
            }
            Route::Simulate => self.handle_simulate(key),
            Route::PaymentLogs => {
                self.handle_logs(key);
                Command::None
            }
            Route::Settings => {
                self.handle_settings(key);
                Command::None
            }
            Route::NotFound(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('h')) {
                    self.navigate(Route::Dashboard);
                }
                Command::None
            }
        }
    }

    fn shift_tab(&mut self, delta: isize) {
        let len = Route::TABS.len() as isize;
        let current = self.route.tab_index().unwrap_or(0) as isize;
        let index = (current + delta).rem_euclid(len) as usize;
        self.navigate(Route::TABS[index].clone());
    }

    fn handle_dashboard(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Char('w') => match self.wallet {
                WalletState::Disconnected => Command::ConnectWallet,
                WalletState::Connecting => {
                    self.state.notify(Notice::from(&AutopayError::Busy {
                        operation: "Wallet connection",
                    }));
                    Command::None
                }
                WalletState::Connected { .. } => Command::DisconnectWallet,
            },
            _ => Command::None,
        }
    }

    // ------------------------------------------------------------------------
    // Agents
    // ------------------------------------------------------------------------

    fn handle_agents(&mut self, key: KeyEvent) {
        let count = self.state.registry.len();
        match key.code {
            KeyCode::Up => self.selected_agent = self.selected_agent.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_agent + 1 < count {
                    self.selected_agent += 1;
                }
            }
            KeyCode::Char('n') => {
                let limit = self.state.settings.settings().default_spending_limit;
                self.agent_form = Some(AgentForm::new(limit));
                self.mode = InputMode::AgentForm;
            }
            KeyCode::Char('d') => {
                let target = self
                    .state
                    .registry
                    .agents()
                    .get(self.selected_agent)
                    .map(|a| a.id.clone());
                if let Some(id) = target {
                    // Errors are already surfaced as notices
                    let _ = self.state.remove_agent(&id);
                    let remaining = self.state.registry.len();
                    self.selected_agent = self.selected_agent.min(remaining.saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    fn handle_agent_form(&mut self, key: KeyEvent) -> Command {
        let Some(form) = self.agent_form.as_mut() else {
            self.mode = InputMode::Normal;
            return Command::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.agent_form = None;
                self.mode = InputMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.offset(1),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.offset(-1),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if form.focus == FormField::Role => {
                form.cycle_role()
            }
            KeyCode::Backspace => {
                if let Some(text) = form.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = form.focused_text() {
                    text.push(c);
                }
            }
            KeyCode::Enter => {
                let draft = form.draft.clone();
                if self.state.register_agent(&draft).is_ok() {
                    self.agent_form = None;
                    self.mode = InputMode::Normal;
                    self.selected_agent = self.state.registry.len().saturating_sub(1);
                }
            }
            _ => {}
        }
        Command::None
    }

    // ------------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------------

    fn handle_simulate(&mut self, key: KeyEvent) -> Command {
        let ids: Vec<&str> = self
            .state
            .registry
            .agents()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        let form = &mut self.simulation_form;
        match key.code {
            KeyCode::Char('s') => form.sender = next_id(&ids, form.sender.as_deref()),
            KeyCode::Char('t') => form.recipient = next_id(&ids, form.recipient.as_deref()),
            KeyCode::Char('v') => {
                form.service = Some(form.service.map_or(ServiceType::Compute, |s| s.next()))
            }
            KeyCode::Char('u') => self.mode = InputMode::Units,
            KeyCode::Char('r') => {
                self.simulation_form = SimulationForm::default();
                self.state.clear_simulation();
            }
            KeyCode::Enter => {
                if self.simulating {
                    self.state.notify(Notice::from(&AutopayError::Busy {
                        operation: "Simulation",
                    }));
                } else {
                    self.simulating = true;
                    return Command::Simulate(self.simulation_form.request());
                }
            }
            _ => {}
        }
        Command::None
    }

    fn handle_units(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => self.simulation_form.units.push(c),
            KeyCode::Backspace => {
                self.simulation_form.units.pop();
            }
            KeyCode::Enter | KeyCode::Esc => self.mode = InputMode::Normal,
            _ => {}
        }
    }

    /// Called by the run loop when a spawned simulation resolves
    pub fn finish_simulation(&mut self, outcome: AutopayResult<SimulationResult>) {
        self.simulating = false;
        let _ = self.state.record_simulation(outcome);
    }

    // ------------------------------------------------------------------------
    // Payment logs
    // ------------------------------------------------------------------------

    fn handle_logs(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('f') => self.mode = InputMode::Search,
            KeyCode::Char('v') => {
                self.log_filter.service = self.log_filter.service.cycle(&ServiceType::ALL)
            }
            KeyCode::Char('t') => {
                self.log_filter.status = self.log_filter.status.cycle(&PaymentStatus::ALL)
            }
            KeyCode::Char('c') => self.log_filter = LogFilter::default(),
            KeyCode::Char('x') => {
                let dir = self.export_dir.clone();
                match self.export_logs(&dir) {
                    Ok(path) => self.state.notify(Notice::info(
                        "Logs Exported",
                        format!("Filtered payment logs written to {}", path.display()),
                    )),
                    Err(err) => {
                        tracing::warn!(error = %err, "log export failed");
                        self.state
                            .notify(Notice::destructive("Export Failed", err.to_string()))
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_search(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.log_filter.search.push(c),
            KeyCode::Backspace => {
                self.log_filter.search.pop();
            }
            KeyCode::Enter | KeyCode::Esc => self.mode = InputMode::Normal,
            _ => {}
        }
    }

    /// Write the filtered view as JSON under `dir`
    pub fn export_logs(&self, dir: &Path) -> Result<PathBuf, TuiError> {
        let records = self.state.filtered_logs(&self.log_filter);
        let json = export_json(&records)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "payment-logs-{}.json",
            self.state.now().format("%Y%m%d-%H%M%S")
        ));
        std::fs::write(&path, json)?;
        tracing::info!(path = %path.display(), count = records.len(), "payment logs exported");
        Ok(path)
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    fn handle_settings(&mut self, key: KeyEvent) {
        let field = self.selected_setting_field();
        match key.code {
            KeyCode::Up => self.selected_setting = self.selected_setting.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_setting + 1 < SettingField::ALL.len() {
                    self.selected_setting += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.state.settings.activate(field);
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                self.state.settings.step(field, 1);
            }
            KeyCode::Char('-') | KeyCode::Left => {
                self.state.settings.step(field, -1);
            }
            KeyCode::Char('s') => self.state.save_settings(),
            KeyCode::Char('r') => self.state.reset_settings(),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Go to route
    // ------------------------------------------------------------------------

    fn handle_goto(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => {
                let route = Route::resolve(&self.goto_input);
                self.goto_input.clear();
                self.navigate(route);
            }
            KeyCode::Backspace => {
                self.goto_input.pop();
            }
            KeyCode::Char(c) => self.goto_input.push(c),
            _ => {}
        }
    }

    /// Key hints for the footer
    pub fn hotkeys(&self) -> &'static str {
        match (self.mode, &self.route) {
            (InputMode::AgentForm, _) => "Tab next field | Space cycle role | Enter register | Esc cancel",
            (InputMode::Units, _) => "digits units | Enter/Esc done",
            (InputMode::Search, _) => "type to search | Enter/Esc done",
            (InputMode::Goto, _) => "type a path, e.g. /logs | Enter go | Esc cancel",
            (_, Route::Dashboard) => "W wallet | 1-5/Tab views | : go to | Q quit",
            (_, Route::Agents) => "N new | D delete | Up/Down select | 1-5 views | Q quit",
            (_, Route::Simulate) => {
                "S sender | T recipient | V service | U units | Enter run | R reset | Q quit"
            }
            (_, Route::PaymentLogs) => {
                "/ search | V service | T status | C clear | X export | Q quit"
            }
            (_, Route::Settings) => {
                "Up/Down select | Space change | +/- adjust | S save | R reset | Q quit"
            }
            (_, Route::NotFound(_)) => "Enter/H return to dashboard | Q quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopay_state::StateConfig;

    fn app() -> App {
        App::new(
            AppState::new(StateConfig::instant()),
            Route::Dashboard,
            std::env::temp_dir().join("autopay-tui-tests"),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Command {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_digit_keys_switch_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.route, Route::PaymentLogs);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.route, Route::Settings);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn test_goto_unknown_route_and_back() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        type_text(&mut app, "/nowhere");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::NotFound("/nowhere".to_string()));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn test_register_agent_through_form() {
        let mut app = app();
        app.navigate(Route::Agents);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, InputMode::AgentForm);

        type_text(&mut app, "OrchestratorX");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "0xabc");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.state.registry.len(), 5);
        let agent = &app.state.registry.agents()[4];
        assert_eq!(agent.role, AgentRole::Storage);
        assert_eq!(agent.spending_limit, TokenAmount::from_tokens(500));
        assert_eq!(app.selected_agent, 4);
    }

    #[test]
    fn test_incomplete_form_stays_open() {
        let mut app = app();
        app.navigate(Route::Agents);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "NoRole");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, InputMode::AgentForm);
        assert_eq!(app.state.registry.len(), 4);
        assert_eq!(
            app.state.notices.latest().map(|n| n.title.as_str()),
            Some("Validation Error")
        );
    }

    #[test]
    fn test_delete_selected_agent() {
        let mut app = app();
        app.navigate(Route::Agents);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.registry.len(), 3);
        assert!(app.state.registry.get("agent-002").is_none());
    }

    #[test]
    fn test_simulate_builds_request() {
        let mut app = app();
        app.navigate(Route::Simulate);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "1x00");
        press(&mut app, KeyCode::Enter);

        let command = press(&mut app, KeyCode::Enter);
        assert_eq!(
            command,
            Command::Simulate(SimulationRequest::new("agent-001", "agent-002", "Compute", "100"))
        );
        assert!(app.simulating);

        // Second trigger while waiting is refused locally
        assert_eq!(press(&mut app, KeyCode::Enter), Command::None);
        assert_eq!(
            app.state.notices.latest().map(|n| n.title.as_str()),
            Some("Busy")
        );
    }

    #[tokio::test]
    async fn test_finish_simulation_records_result() {
        let mut app = app();
        app.simulating = true;
        let request = SimulationRequest::new("agent-001", "agent-002", "Compute", "100");
        let agents = app.state.registry.agents().to_vec();
        let outcome = app.state.simulator.simulate(&agents, &request).await;
        app.finish_simulation(outcome);

        assert!(!app.simulating);
        let result = app.state.last_simulation.as_ref().unwrap();
        assert_eq!(result.amount, TokenAmount::from_tokens(250));
    }

    #[test]
    fn test_log_filters_cycle() {
        let mut app = app();
        app.navigate(Route::PaymentLogs);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "gamma");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.filtered_logs(&app.log_filter).len(), 2);

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.state.log_summary(&app.log_filter).success_rate_display(), "N/A");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.log_filter, LogFilter::default());
    }

    #[test]
    fn test_export_writes_filtered_json() {
        let mut app = app();
        app.log_filter = LogFilter::search("Alpha");
        let dir = std::env::temp_dir().join(format!("autopay-export-{}", std::process::id()));
        let path = app.export_logs(&dir).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("tx-001"));
        assert!(!contents.contains("tx-002"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_settings_keys() {
        let mut app = app();
        app.navigate(Route::Settings);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.state.settings.settings().auto_payment);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(
            app.state.settings.settings().max_transaction_amount,
            TokenAmount::from_tokens(1100)
        );

        press(&mut app, KeyCode::Char('r'));
        assert!(app.state.settings.is_default());
    }

    #[test]
    fn test_wallet_key_depends_on_state() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('w')), Command::ConnectWallet);
        app.wallet = WalletState::Connecting;
        assert_eq!(press(&mut app, KeyCode::Char('w')), Command::None);
        app.wallet = WalletState::Connected {
            address: autopay_state::MOCK_WALLET_ADDRESS.to_string(),
        };
        assert_eq!(press(&mut app, KeyCode::Char('w')), Command::DisconnectWallet);
    }
}
