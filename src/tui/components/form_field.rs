//! Form field component for the add/edit record forms

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

/// Type of form field, driving input handling and validation
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    Date,
    Number,
    Dropdown,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub required: bool,
    pub is_focused: bool,
    pub cursor_position: usize,
    pub dropdown_options: Vec<String>,
    pub dropdown_state: ListState,
    pub show_dropdown: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            required: false,
            is_focused: false,
            cursor_position: 0,
            dropdown_options: Vec::new(),
            dropdown_state: ListState::default(),
            show_dropdown: false,
            validation_error: None,
        }
    }

    pub fn text(label: &str) -> Self {
        Self::new(label, FormFieldType::Text)
    }

    pub fn date(label: &str) -> Self {
        Self::new(label, FormFieldType::Date).with_placeholder("YYYY-MM-DD")
    }

    pub fn number(label: &str) -> Self {
        Self::new(label, FormFieldType::Number)
    }

    pub fn dropdown(label: &str, options: Vec<String>) -> Self {
        let mut field = Self::new(label, FormFieldType::Dropdown);
        field.dropdown_options = options;
        if !field.dropdown_options.is_empty() {
            field.dropdown_state.select(Some(0));
        }
        field
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = self.value.len();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.value.len();
        self.validation_error = None;
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if !focused {
            self.show_dropdown = false;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_type == FormFieldType::Dropdown {
            return;
        }
        self.value.insert(self.cursor_position, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.value.remove(self.cursor_position);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.len() {
            self.value.remove(self.cursor_position);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.len() {
            self.cursor_position += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn toggle_dropdown(&mut self) {
        if self.field_type == FormFieldType::Dropdown && !self.dropdown_options.is_empty() {
            self.show_dropdown = !self.show_dropdown;
        }
    }

    pub fn dropdown_up(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.dropdown_options.len() - 1
        } else {
            selected - 1
        };
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn dropdown_down(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = (selected + 1) % self.dropdown_options.len();
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn select_dropdown_value(&mut self) {
        if let Some(selected) = self.dropdown_state.selected() {
            if let Some(value) = self.dropdown_options.get(selected) {
                self.value = value.clone();
                self.cursor_position = self.value.len();
                self.show_dropdown = false;
                self.validation_error = None;
            }
        }
    }

    /// Validate field value; records the failure message on the field
    pub fn validate(&mut self) -> bool {
        self.validation_error = None;

        if self.required && self.is_empty() {
            self.validation_error = Some("required".to_string());
            return false;
        }

        if !self.is_empty() {
            match self.field_type {
                FormFieldType::Date => {
                    if chrono::NaiveDate::parse_from_str(self.value.trim(), "%Y-%m-%d").is_err() {
                        self.validation_error = Some("expected YYYY-MM-DD".to_string());
                        return false;
                    }
                }
                FormFieldType::Number => {
                    if self.value.trim().parse::<f64>().is_err() {
                        self.validation_error = Some("expected a number".to_string());
                        return false;
                    }
                }
                _ => {}
            }
        }

        true
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let mut title = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };
        if let Some(ref error) = self.validation_error {
            title = format!("{} ({})", title, error);
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);

        f.render_widget(paragraph, area);

        if self.is_focused && self.field_type != FormFieldType::Dropdown {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Render the dropdown option list when open
    pub fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        if !self.show_dropdown || self.dropdown_options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .dropdown_options
            .iter()
            .map(|option| ListItem::new(option.clone()))
            .collect();

        let block = Block::default()
            .title(self.label.clone())
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        let list = List::new(items)
            .block(block)
            .highlight_style(Styles::selected());

        f.render_stateful_widget(list, area, &mut self.dropdown_state);
    }
}

/// Form container that manages multiple fields and focus traversal
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.fields.len();
        self.update_focus();
    }

    pub fn previous_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.fields.len() - 1
        } else {
            self.current_field - 1
        };
        self.update_focus();
    }

    pub fn current(&self) -> Option<&FormField> {
        self.fields.get(self.current_field)
    }

    pub fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Trimmed value of the field with the given label; empty string when
    /// the field does not exist
    pub fn value_of(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.trim())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, label: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.label == label) {
            field.set_value(value);
        }
    }

    /// Validate every field, focusing the first invalid one
    pub fn validate_all(&mut self) -> bool {
        let mut first_invalid = None;
        for (i, field) in self.fields.iter_mut().enumerate() {
            if !field.validate() && first_invalid.is_none() {
                first_invalid = Some(i);
            }
        }

        if let Some(i) = first_invalid {
            self.current_field = i;
            self.update_focus();
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_fails_validation_when_empty() {
        let mut field = FormField::text("Email").required();
        assert!(!field.validate());
        assert_eq!(field.validation_error.as_deref(), Some("required"));

        field.set_value("alice@example.edu");
        assert!(field.validate());
    }

    #[test]
    fn test_date_field_validation() {
        let mut field = FormField::date("Due Date").with_value("2024-13-01");
        assert!(!field.validate());

        field.set_value("2024-12-01");
        assert!(field.validate());

        // Optional empty date passes
        field.set_value("");
        assert!(field.validate());
    }

    #[test]
    fn test_number_field_validation() {
        let mut field = FormField::number("Amount").with_value("abc");
        assert!(!field.validate());
        field.set_value("1250.50");
        assert!(field.validate());
    }

    #[test]
    fn test_form_value_lookup_and_focus_cycle() {
        let mut form = Form::new(vec![
            FormField::text("First Name").with_value("Alice"),
            FormField::text("Last Name").with_value("Nguyen"),
        ]);

        assert_eq!(form.value_of("First Name"), "Alice");
        assert_eq!(form.value_of("Missing"), "");

        assert_eq!(form.current_field, 0);
        form.next_field();
        assert_eq!(form.current_field, 1);
        form.next_field();
        assert_eq!(form.current_field, 0);
        form.previous_field();
        assert_eq!(form.current_field, 1);
    }

    #[test]
    fn test_validate_all_focuses_first_invalid_field() {
        let mut form = Form::new(vec![
            FormField::text("First Name").with_value("Alice"),
            FormField::text("Email").required(),
            FormField::number("GPA").with_value("oops"),
        ]);

        assert!(!form.validate_all());
        assert_eq!(form.current_field, 1);
    }
}
