use chrono::{Datelike, Local, NaiveDate};

use crate::calendar::{
    days_in_month, navigate_month, DateKey, DisplayMonth, Event, EventDraft, EventIdSource,
    DEFAULT_EVENT_TIME,
};
use crate::storage::EventStore;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

/// Messages that drive the calendar. Key handlers translate input into
/// these; `AppState::dispatch` is the only place they take effect.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    NavigateMonth(i32),
    OpenCapture(NaiveDate),
    SubmitEvent(EventDraft),
    CloseCapture,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Title,
    Time,
    Description,
}

#[derive(Debug, Clone)]
pub struct CaptureForm {
    pub date: NaiveDate,
    pub title: String,
    pub time_input_buffer: String,
    pub description: String,
    pub active_field: FormField,
    pub time_buffer_touched: bool,
    pub error: Option<String>,
}

impl CaptureForm {
    pub fn new(date: NaiveDate, title: String, default_time: &str) -> Self {
        Self {
            date,
            title,
            time_input_buffer: default_time.to_string(),
            description: String::new(),
            active_field: FormField::Title,
            time_buffer_touched: false,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Title => FormField::Time,
            FormField::Time => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Title => FormField::Description,
            FormField::Time => FormField::Title,
            FormField::Description => FormField::Time,
        };
    }

    /// Expands shorthand like `930` or `9` into `09:30` / `09:00`. Input that
    /// cannot be read as a time is left for validation to reject.
    pub fn normalize_time_input(&mut self) {
        let digits = self.time_input_buffer.replace(':', "");
        let Ok(num) = digits.parse::<u32>() else { return };

        let (hour, minute) = match digits.len() {
            1 | 2 => (num, 0),
            3 | 4 => (num / 100, num % 100),
            _ => return,
        };
        if hour < 24 && minute < 60 {
            self.time_input_buffer = format!("{:02}:{:02}", hour, minute);
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft::new(
            self.title.clone(),
            self.time_input_buffer.clone(),
            self.description.clone(),
        )
    }
}

pub struct AppState {
    pub mode: Mode,
    pub display_month: DisplayMonth,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub store: EventStore,
    pub ids: EventIdSource,
    pub capture: Option<CaptureForm>,
    pub command_buffer: String,
    pub message: Option<String>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub default_event_time: String,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        let today = Local::now().date_naive();
        let ids = EventIdSource::starting_after(store.max_event_id());
        Self {
            mode: Mode::Normal,
            display_month: DisplayMonth::containing(today),
            selected_date: today,
            today,
            store,
            ids,
            capture: None,
            command_buffer: String::new(),
            message: None,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            default_event_time: DEFAULT_EVENT_TIME.to_string(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_default_event_time(mut self, time: impl Into<String>) -> Self {
        self.default_event_time = time.into();
        self
    }

    pub fn dispatch(&mut self, command: AppCommand) {
        tracing::debug!("Dispatching {:?}", command);
        match command {
            AppCommand::NavigateMonth(delta) => self.navigate_month(delta),
            AppCommand::OpenCapture(date) => self.open_capture(date),
            AppCommand::SubmitEvent(draft) => self.submit_event(draft),
            AppCommand::CloseCapture => {
                self.capture = None;
                self.mode = Mode::Normal;
            }
        }
    }

    pub fn events_for_date(&self, date: NaiveDate) -> &[Event] {
        self.store.lookup(&DateKey::from_date(date))
    }

    /// Moves the selection, paging the displayed month when `date` lies
    /// outside it.
    pub fn select_date(&mut self, date: NaiveDate) {
        let target = DisplayMonth::containing(date);
        if target != self.display_month {
            let delta = self.display_month.months_until(target);
            self.dispatch(AppCommand::NavigateMonth(delta.clamp(i32::MIN as i64, i32::MAX as i64) as i32));
        }
        self.selected_date = date;
    }

    fn open_capture(&mut self, date: NaiveDate) {
        self.select_date(date);
        self.capture = Some(CaptureForm::new(date, String::new(), &self.default_event_time));
        self.message = None;
        self.mode = Mode::Insert;
    }

    pub fn submit_capture(&mut self) {
        let Some(form) = self.capture.as_mut() else { return };
        form.normalize_time_input();
        let draft = form.to_draft();
        self.dispatch(AppCommand::SubmitEvent(draft));
    }

    fn navigate_month(&mut self, delta: i32) {
        self.display_month = navigate_month(self.display_month, delta);

        let last_day = days_in_month(self.display_month.year(), self.display_month.month0());
        let day = self.selected_date.day().min(last_day);
        if let Some(date) = self.display_month.day(day) {
            self.selected_date = date;
        }
    }

    fn submit_event(&mut self, draft: EventDraft) {
        let Some(form) = self.capture.as_mut() else {
            tracing::warn!("Ignoring event submission without an open form");
            return;
        };

        if let Err(e) = draft.validate() {
            tracing::debug!("Rejected event form: {}", e);
            form.error = Some(e.to_string());
            return;
        }

        let Some(id) = self.ids.next_id() else {
            tracing::error!("Event ids exhausted, rejecting new event");
            form.error = Some("No event ids left".to_string());
            return;
        };

        let date = form.date;
        let event = draft.into_event(id, date);
        let title = event.title.clone();
        self.store.append_event(DateKey::from_date(date), event);

        self.capture = None;
        self.mode = Mode::Normal;
        self.message = Some(format!("Added '{}' on {}", title, date.format("%B %d, %Y")));
    }
}
