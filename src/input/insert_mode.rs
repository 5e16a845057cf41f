use crossterm::event::KeyCode;
use crate::app::{AppCommand, AppState, FormField};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Esc => {
            state.dispatch(AppCommand::CloseCapture);
            return;
        }
        KeyCode::Enter => {
            state.submit_capture();
            return;
        }
        _ => {}
    }

    let Some(form) = state.capture.as_mut() else {
        return;
    };

    match key {
        KeyCode::Tab => {
            if form.active_field == FormField::Time {
                form.normalize_time_input();
            }
            form.next_field();
        }
        KeyCode::BackTab => {
            if form.active_field == FormField::Time {
                form.normalize_time_input();
            }
            form.prev_field();
        }
        KeyCode::Backspace => {
            match form.active_field {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Time => {
                    form.time_input_buffer.pop();
                    form.time_buffer_touched = true;
                }
                FormField::Description => {
                    form.description.pop();
                }
            }
        }
        KeyCode::Char(c) => {
            match form.active_field {
                FormField::Title => {
                    form.title.push(c);
                }
                FormField::Time => {
                    if c.is_ascii_digit() || c == ':' {
                        if !form.time_buffer_touched {
                            form.time_input_buffer.clear();
                            form.time_buffer_touched = true;
                        }
                        if form.time_input_buffer.len() < 5 {
                            form.time_input_buffer.push(c);
                        }
                    }
                }
                FormField::Description => {
                    form.description.push(c);
                }
            }
        }
        _ => {}
    }
}
