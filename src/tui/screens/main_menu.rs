//! Main menu screen listing the six resource sections

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::ResourceKind;
use crate::tui::ui::Styles;

/// Main menu entry
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub title: &'static str,
    pub description: &'static str,
    pub shortcut: char,
    pub kind: ResourceKind,
}

/// Main menu screen state
pub struct MainMenuScreen {
    pub menu_state: ListState,
    pub menu_options: Vec<MenuOption>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let menu_options = vec![
            MenuOption {
                title: "Students",
                description: "Browse, search, and manage student records",
                shortcut: 'S',
                kind: ResourceKind::Students,
            },
            MenuOption {
                title: "Departments",
                description: "Departments, heads, and buildings",
                shortcut: 'D',
                kind: ResourceKind::Departments,
            },
            MenuOption {
                title: "Courses",
                description: "Course catalog with credits and instructors",
                shortcut: 'C',
                kind: ResourceKind::Courses,
            },
            MenuOption {
                title: "Addresses",
                description: "Student home, work, and mailing addresses",
                shortcut: 'A',
                kind: ResourceKind::Addresses,
            },
            MenuOption {
                title: "Enrollments",
                description: "Course enrollments, grades, and attendance",
                shortcut: 'E',
                kind: ResourceKind::Enrollments,
            },
            MenuOption {
                title: "Fees",
                description: "Fee records and payment status",
                shortcut: 'F',
                kind: ResourceKind::Fees,
            },
        ];

        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        Self {
            menu_state,
            menu_options,
        }
    }

    /// Handle key events; returns the section to open, if any
    pub fn handle_event(&mut self, key: KeyEvent) -> Option<ResourceKind> {
        match key.code {
            KeyCode::Up => {
                let selected = self.menu_state.selected().unwrap_or(0);
                let new_selected = if selected == 0 {
                    self.menu_options.len() - 1
                } else {
                    selected - 1
                };
                self.menu_state.select(Some(new_selected));
                None
            }
            KeyCode::Down => {
                let selected = self.menu_state.selected().unwrap_or(0);
                let new_selected = (selected + 1) % self.menu_options.len();
                self.menu_state.select(Some(new_selected));
                None
            }
            KeyCode::Enter => self
                .menu_state
                .selected()
                .and_then(|i| self.menu_options.get(i))
                .map(|option| option.kind),
            KeyCode::Char(c) => {
                let upper_c = c.to_ascii_uppercase();
                self.menu_options
                    .iter()
                    .find(|option| option.shortcut == upper_c)
                    .map(|option| option.kind)
            }
            _ => None,
        }
    }

    /// Draw the main menu screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("University Records Administration")
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .menu_options
            .iter()
            .map(|option| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}] ", option.shortcut), Styles::info()),
                    Span::raw(format!("{:<14}", option.title)),
                    Span::styled(option.description, Styles::inactive()),
                ]))
            })
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .title("Sections")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(menu, chunks[1], &mut self.menu_state);

        let hint = Paragraph::new("↑/↓: Navigate | Enter: Open | Letter: Jump to section | q: Quit")
            .style(Styles::info())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, chunks[2]);
    }
}
