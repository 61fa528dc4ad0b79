use std::{future::Future, time::Duration};

use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::ClientError,
    dashboard::{Dashboard, DashboardView},
    error::{AppError, Result},
    ui::{
        self,
        components::input_select::{self, InputSelectState},
        keymap::AppAction,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filter,
    Transactions,
    ViewMore,
}

impl Focus {
    fn next(self, view_more: bool) -> Self {
        match self {
            Self::Filter => Self::Transactions,
            Self::Transactions if view_more => Self::ViewMore,
            Self::Transactions | Self::ViewMore => Self::Filter,
        }
    }

    fn prev(self, view_more: bool) -> Self {
        match self {
            Self::Filter if view_more => Self::ViewMore,
            Self::Filter | Self::ViewMore => Self::Transactions,
            Self::Transactions => Self::Filter,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub view: DashboardView,
    pub focus: Focus,
    pub select: InputSelectState,
    pub selected_row: usize,
    pub source: String,
}

impl AppState {
    pub fn new(source: String) -> Self {
        Self {
            view: DashboardView::default(),
            focus: Focus::Transactions,
            select: InputSelectState::default(),
            selected_row: 0,
            source,
        }
    }

    fn row_count(&self) -> usize {
        self.view.transactions.as_ref().map_or(0, Vec::len)
    }

    fn select_next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        self.selected_row = (self.selected_row + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Keeps the cursor valid after the list was replaced or refreshed.
    fn refresh(&mut self, view: DashboardView) {
        self.view = view;
        self.selected_row = self
            .selected_row
            .min(self.row_count().saturating_sub(1));
        if self.focus == Focus::ViewMore && !self.view.view_more_visible() {
            self.focus = Focus::Transactions;
        }
    }
}

pub struct App {
    dashboard: Dashboard,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, source: String) -> Self {
        Self {
            dashboard,
            state: AppState::new(source),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        self.spawn("initial load", |dashboard| async move { dashboard.mount().await });

        while !self.should_quit {
            self.state.refresh(self.dashboard.view());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            // The crossterm poll blocks; keep it off the runtime's worker so
            // spawned fetches progress meanwhile.
            let ready = tokio::task::block_in_place(|| event::poll(tick_rate))?;
            if ready {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Runs a dashboard operation in the background. Failures are already
    /// recorded on the affected store; here they are only logged.
    fn spawn<F, Fut>(&self, label: &'static str, operation: F)
    where
        F: FnOnce(Dashboard) -> Fut,
        Fut: Future<Output = std::result::Result<(), ClientError>> + Send + 'static,
    {
        let task = operation(self.dashboard.clone());
        tokio::spawn(async move {
            if let Err(err) = task.await {
                tracing::warn!("{label} failed: {err}");
            }
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.select.open {
            self.handle_dropdown(action);
        } else {
            self.handle_panel(action);
        }
    }

    fn handle_dropdown(&mut self, action: AppAction) {
        let items = input_select::items(self.state.view.employees.as_deref());
        match action {
            AppAction::Cancel => self.state.select.close(),
            AppAction::Input(ch) => self.state.select.push(ch),
            AppAction::Backspace => self.state.select.pop(),
            AppAction::Up => self.state.select.highlight_prev(),
            AppAction::Down => {
                let len = self.state.select.matches(&items).len();
                self.state.select.highlight_next(len);
            }
            AppAction::Submit => {
                let choice = self.state.select.commit(&items);
                self.state.selected_row = 0;
                self.state.focus = Focus::Transactions;
                self.spawn("employee filter", move |dashboard| async move {
                    dashboard.select_employee(choice.as_ref()).await
                });
            }
            _ => {}
        }
    }

    fn handle_panel(&mut self, action: AppAction) {
        let view_more = self.state.view.view_more_visible();
        match action {
            AppAction::NextField => self.state.focus = self.state.focus.next(view_more),
            AppAction::PrevField => self.state.focus = self.state.focus.prev(view_more),
            AppAction::Up => self.state.select_prev(),
            AppAction::Down => self.state.select_next(),
            AppAction::Submit => match self.state.focus {
                Focus::Filter => self.open_filter(),
                Focus::ViewMore => self.view_more(),
                Focus::Transactions => self.toggle_selected(),
            },
            AppAction::Input(ch) => self.handle_char(ch),
            AppAction::Cancel | AppAction::Backspace | AppAction::Quit | AppAction::None => {}
        }
    }

    fn handle_char(&mut self, ch: char) {
        match ch {
            'q' | 'Q' => self.should_quit = true,
            '/' => self.open_filter(),
            'm' | 'M' => self.view_more(),
            'r' | 'R' => {
                let selected = self.state.select.selected.clone();
                self.spawn("retry", move |dashboard| async move {
                    dashboard.retry(&selected).await
                });
            }
            'j' | 'J' => self.state.select_next(),
            'k' | 'K' => self.state.select_prev(),
            ' ' if self.state.focus == Focus::Transactions => self.toggle_selected(),
            _ => {}
        }
    }

    fn open_filter(&mut self) {
        if self.state.view.employees.is_none() || self.state.view.employees_loading {
            return;
        }
        self.state.focus = Focus::Filter;
        self.state.select.open();
    }

    fn view_more(&mut self) {
        if !self.state.view.view_more_enabled() {
            return;
        }
        self.spawn("view more", |dashboard| async move { dashboard.fetch_more().await });
    }

    fn toggle_selected(&mut self) {
        let Some(row) = self
            .state
            .view
            .transactions
            .as_ref()
            .and_then(|rows| rows.get(self.state.selected_row))
        else {
            return;
        };
        let transaction_id = row.transaction.id.clone();
        let new_value = !row.approved;

        self.dashboard
            .set_transaction_approval(&transaction_id, new_value);
        self.state.refresh(self.dashboard.view());
    }
}
