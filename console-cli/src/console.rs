//! Command dispatch over the console's screens.

use std::sync::Arc;

use console_lib::model::{Organization, User};

use crate::api::{ApiError, DirectoryApi};
use crate::commands::{Command, CommandError, HELP, ScreenKind};
use crate::render;
use crate::screens::{BulkAction, RecordScreen, ScreenEntity, ScreenError};
use crate::settings::{SettingsError, SettingsProvider};

/// Errors surfaced by the console.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Screen(#[from] ScreenError),
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print.
    Output(String),
    Quit,
}

/// The admin console: a users screen, an organizations screen and the
/// settings their preferences persist to.
pub struct Console {
    users: RecordScreen<User>,
    organizations: RecordScreen<Organization>,
    active: ScreenKind,
    settings: SettingsProvider,
}

impl Console {
    pub fn new(api: Arc<dyn DirectoryApi>, settings: SettingsProvider) -> Self {
        Self {
            users: RecordScreen::new(Arc::clone(&api)),
            organizations: RecordScreen::new(api),
            active: ScreenKind::Users,
            settings,
        }
    }

    /// Load both screens and apply their saved preferences.
    pub async fn start(&mut self) -> Result<(), ConsoleError> {
        self.users.load().await?;
        self.organizations.load().await?;

        if let Err(err) = self.users.restore_preferences(&self.settings).await {
            log::warn!("could not restore users preferences: {err}");
        }
        if let Err(err) = self.organizations.restore_preferences(&self.settings).await {
            log::warn!("could not restore organizations preferences: {err}");
        }
        log::info!("console started");
        Ok(())
    }

    /// The active screen as text, followed by its pending notifications.
    pub fn render(&mut self) -> String {
        match self.active {
            ScreenKind::Users => render_screen(&mut self.users),
            ScreenKind::Organizations => render_screen(&mut self.organizations),
        }
    }

    /// Line to print before awaiting `command`, if it is a bulk action
    /// that will run.
    pub fn announce(&self, command: &Command) -> Option<String> {
        let Command::Action(action) = command else {
            return None;
        };
        match self.active {
            ScreenKind::Users => progress(&self.users, *action),
            ScreenKind::Organizations => progress(&self.organizations, *action),
        }
    }

    /// Run one command.
    pub async fn execute(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        log::debug!("command: {command:?}");
        match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => return Ok(Reply::Output(format!("{HELP}\n"))),
            Command::Show(kind) => self.active = kind,
            Command::Reset { all: true } => {
                let cleared = self.settings.clear_all_grid_preferences().await?;
                log::info!("cleared grid preferences of {cleared:?}");
                self.users.reset_layout();
                self.organizations.reset_layout();
            }
            command => {
                let output = match self.active {
                    ScreenKind::Users => dispatch(&mut self.users, command, &self.settings).await?,
                    ScreenKind::Organizations => {
                        dispatch(&mut self.organizations, command, &self.settings).await?
                    }
                };
                if let Some(output) = output {
                    return Ok(Reply::Output(output));
                }
            }
        }
        Ok(Reply::Output(self.render()))
    }
}

fn progress<R: ScreenEntity>(screen: &RecordScreen<R>, action: BulkAction) -> Option<String> {
    let count = screen.grid().selected_ids().len();
    if count == 0 || screen.is_busy() {
        return None;
    }
    Some(format!("{} {}: {count} selected…\n", action.progress(), R::NOUN))
}

fn render_screen<R: ScreenEntity>(screen: &mut RecordScreen<R>) -> String {
    let mut out = render::grid(screen.title(), &screen.view());
    out.push_str(&render::notifications(&screen.take_notifications()));
    out
}

/// Apply a screen command. Returns text to print instead of the screen, if
/// the command produces any.
async fn dispatch<R: ScreenEntity>(
    screen: &mut RecordScreen<R>,
    command: Command,
    settings: &SettingsProvider,
) -> Result<Option<String>, ConsoleError> {
    match command {
        Command::Sort(column) => {
            if !screen.grid_mut().sort_by(&column) {
                return Ok(Some(format!("cannot sort by `{column}`\n")));
            }
            save(screen, settings).await;
        }
        Command::Page(page) => screen.grid_mut().set_page(page.saturating_sub(1)),
        Command::Next => screen.grid_mut().next_page(),
        Command::Previous => screen.grid_mut().previous_page(),
        Command::Size(size) => {
            if !screen.grid_mut().set_page_size(size) {
                let options = &screen.grid().config().page_size_options;
                return Ok(Some(format!("page size must be one of {options:?}\n")));
            }
            save(screen, settings).await;
        }
        Command::Filter(query) => screen.grid_mut().set_filter(&query),
        Command::Toggle(id) => {
            if !screen.grid_mut().toggle(&id) {
                return Ok(Some(format!("row {id} cannot be selected\n")));
            }
        }
        Command::SelectAll => screen.grid_mut().select_all(),
        Command::ClearSelection => screen.grid_mut().clear_selection(),
        Command::Open(id) => {
            let text = match screen.open(id) {
                Some(fields) => render::detail(&fields),
                None => format!("no row with id {id}\n"),
            };
            return Ok(Some(text));
        }
        Command::Action(action) => {
            let outcome = screen.run_action(action).await?;
            log::info!("{action} {}: {outcome:?}", R::NOUN);
        }
        Command::Reset { .. } => {
            if !screen.reset_preferences(settings).await? {
                log::debug!("{}: no saved preferences", R::NOUN);
            }
        }
        Command::Show(_) | Command::Help | Command::Quit => {}
    }
    Ok(None)
}

async fn save<R: ScreenEntity>(screen: &RecordScreen<R>, settings: &SettingsProvider) {
    if let Err(err) = screen.save_preferences(settings).await {
        log::warn!("could not save {} preferences: {err}", R::NOUN);
    }
}
