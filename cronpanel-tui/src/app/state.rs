use cronpanel_client::ServiceType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Login,
    Main,
}

/// Fields of a schedule form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Service,
    Action,
    Cron,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Service => FormField::Action,
            FormField::Action => FormField::Cron,
            FormField::Cron => FormField::Service,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Service => FormField::Cron,
            FormField::Action => FormField::Service,
            FormField::Cron => FormField::Action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleAction {
    On,
    Off,
}

impl ScheduleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleAction::On => "on",
            ScheduleAction::Off => "off",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ScheduleAction::On => ScheduleAction::Off,
            ScheduleAction::Off => ScheduleAction::On,
        }
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub token: TextInput,
    pub error: Option<String>,
    /// A login request is in flight.
    pub submitting: bool,
}

/// Create-schedule form for one service type. The service options live in
/// the dashboard's selector for the same type.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub service_type: ServiceType,
    pub focused: FormField,
    pub action: ScheduleAction,
    pub cron: TextInput,
    /// Local validation errors only; server failures go to the status line.
    pub error: Option<String>,
}

impl ScheduleForm {
    pub fn new(service_type: ServiceType) -> Self {
        Self {
            service_type,
            focused: FormField::Service,
            action: ScheduleAction::Off,
            cron: TextInput::new(),
            error: None,
        }
    }
}

/// Pending delete awaiting the operator's yes/no.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub job_id: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::from_str("0 * * *");
        input.move_left();
        input.move_left();
        input.insert('5');
        assert_eq!(input.value, "0 * *5 *");

        input.backspace();
        assert_eq!(input.split_at_cursor(), ("0 * *", " *"));
    }

    #[test]
    fn text_input_handles_multibyte_chars() {
        let mut input = TextInput::from_str("aé");
        input.move_left();
        assert_eq!(input.cursor, 1);
        input.move_right();
        input.backspace();
        assert_eq!(input.value, "a");
    }

    #[test]
    fn form_fields_wrap_around() {
        assert_eq!(FormField::Cron.next(), FormField::Service);
        assert_eq!(FormField::Service.prev(), FormField::Cron);
    }

    #[test]
    fn action_defaults_to_off_and_toggles() {
        let form = ScheduleForm::new(ServiceType::Project);
        assert_eq!(form.action.as_str(), "off");
        assert_eq!(form.action.toggle().as_str(), "on");
    }
}
