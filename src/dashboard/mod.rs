//! Interactive dashboard: buffer entries on the left, mapped capture
//! labels on the right, one key per action.
//!
//! The loop is single-threaded. Each key press maps to an [`Action`] that
//! runs the matching synchronous command and reloads state from disk.

mod render;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use sprint_core::{AssessmentConfig, DocumentAdapter, EntryBuffer, Workspace};

use crate::commands;
use crate::google::GoogleAdapter;
use crate::settings::Settings;

/// What the dashboard can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PushAll,
    Refresh,
    DeleteSelected,
    SelectNext,
    SelectPrevious,
}

/// Key bindings.
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('p') => Some(Action::PushAll),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Warning(String),
    Error(String),
}

/// Document adapter built on first use, so browsing the buffer never
/// needs credentials.
pub struct LazyAdapter<F> {
    connect: F,
    adapter: Option<Box<dyn DocumentAdapter>>,
}

impl<F> LazyAdapter<F>
where
    F: FnMut() -> sprint_core::Result<Box<dyn DocumentAdapter>>,
{
    pub fn new(connect: F) -> Self {
        Self {
            connect,
            adapter: None,
        }
    }

    pub fn get(&mut self) -> sprint_core::Result<&dyn DocumentAdapter> {
        let adapter = match self.adapter.take() {
            Some(adapter) => adapter,
            None => (self.connect)()?,
        };
        Ok(&**self.adapter.insert(adapter))
    }
}

/// Dashboard state, reloaded from the workspace after every change.
pub struct Dashboard {
    workspace: Workspace,
    active: Option<String>,
    config: Option<AssessmentConfig>,
    buffer: Option<EntryBuffer>,
    selected: usize,
    status: Option<Status>,
    should_quit: bool,
}

impl Dashboard {
    pub fn load(workspace: Workspace) -> Self {
        let mut dashboard = Self {
            workspace,
            active: None,
            config: None,
            buffer: None,
            selected: 0,
            status: None,
            should_quit: false,
        };
        dashboard.reload();
        dashboard
    }

    pub fn title(&self) -> String {
        match &self.active {
            Some(name) => format!("Sprint Hub — {}", name),
            None => "Sprint Hub — no active sprint".to_string(),
        }
    }

    pub fn entries(&self) -> &[sprint_core::models::BufferEntry] {
        self.buffer.as_ref().map(EntryBuffer::entries).unwrap_or_default()
    }

    /// Labels with a mapping in the active sprint, with their targets.
    pub fn sections(&self) -> Vec<(String, String)> {
        self.config
            .iter()
            .flat_map(|c| c.captures.iter())
            .map(|(label, capture)| (label.clone(), capture.target()))
            .collect()
    }

    pub fn is_mapped(&self, label: &str) -> bool {
        self.config.as_ref().is_some_and(|c| c.capture(label).is_some())
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn apply<F>(&mut self, action: Action, adapter: &mut LazyAdapter<F>)
    where
        F: FnMut() -> sprint_core::Result<Box<dyn DocumentAdapter>>,
    {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Refresh => {
                self.reload();
                if self.status.is_none() {
                    self.status = Some(Status::Info("Refreshed.".to_string()));
                }
            }
            Action::PushAll => self.push_all(adapter),
            Action::DeleteSelected => self.delete_selected(),
            Action::SelectNext => {
                if self.selected + 1 < self.entries().len() {
                    self.selected += 1;
                }
            }
            Action::SelectPrevious => self.selected = self.selected.saturating_sub(1),
        }
    }

    fn reload(&mut self) {
        self.status = None;
        self.config = None;
        self.buffer = None;

        self.active = match self.workspace.get_active() {
            Ok(active) => active,
            Err(e) => {
                self.status = Some(Status::Error(e.to_string()));
                None
            }
        };

        if let Some(name) = self.active.clone() {
            match self.workspace.load_assessment(&name) {
                Ok(config) => self.config = Some(config),
                Err(e) => self.status = Some(Status::Error(e.to_string())),
            }
            match self.workspace.load_buffer(&name) {
                Ok(buffer) => self.buffer = Some(buffer),
                Err(e) => self.status = Some(Status::Error(e.to_string())),
            }
        }

        self.selected = self.selected.min(self.entries().len().saturating_sub(1));
    }

    fn delete_selected(&mut self) {
        let Some(label) = self.entries().get(self.selected).map(|e| e.label.clone()) else {
            self.status = Some(Status::Warning("Nothing selected.".to_string()));
            return;
        };

        let result = commands::remove(&self.workspace, &label);
        self.reload();
        self.status = Some(match result {
            Ok(()) => Status::Info(format!("Deleted '{}'.", label)),
            Err(e) => Status::Error(e.to_string()),
        });
    }

    fn push_all<F>(&mut self, adapter: &mut LazyAdapter<F>)
    where
        F: FnMut() -> sprint_core::Result<Box<dyn DocumentAdapter>>,
    {
        if self.config.is_none() {
            self.status = Some(Status::Error("No active sprint.".to_string()));
            return;
        }
        if self.entries().is_empty() {
            self.status = Some(Status::Warning("Buffer is empty.".to_string()));
            return;
        }

        let result = adapter
            .get()
            .map_err(anyhow::Error::from)
            .and_then(|adapter| commands::push(&self.workspace, adapter));

        self.reload();
        self.status = Some(match result {
            Ok(report) if report.all_ok() => {
                Status::Info(format!("Done: {} pushed, 0 errors.", report.ok_count()))
            }
            Ok(report) => {
                let first_error = report
                    .results
                    .iter()
                    .find(|r| !r.outcome.is_ok())
                    .map(|r| format!(" {}: {}", r.label, r.outcome))
                    .unwrap_or_default();
                Status::Warning(format!(
                    "Done: {} pushed, {} errors.{}",
                    report.ok_count(),
                    report.failed_count(),
                    first_error
                ))
            }
            Err(e) => Status::Error(e.to_string()),
        });
    }
}

/// Run the dashboard until the user quits.
pub fn run(settings: &Settings) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, settings);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, settings: &Settings) -> Result<()> {
    let mut dashboard = Dashboard::load(settings.workspace());
    let mut adapter = LazyAdapter::new(|| {
        GoogleAdapter::from_settings(settings).map(|a| Box::new(a) as Box<dyn DocumentAdapter>)
    });

    while !dashboard.should_quit() {
        terminal.draw(|frame| render::draw(frame, &dashboard))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = action_for_key(key.code) {
                tracing::debug!("Dashboard action {:?}", action);
                dashboard.apply(action, &mut adapter);
            }
        }
    }
    Ok(())
}
