//! Main TUI application state and event loop

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{
    Address, Course, Department, Enrollment, Fee, ResourceKind, Student,
};
use crate::tui::screens::{
    EditorAction, EditorMode, EditorScreen, MainMenuScreen, RecordsAction, RecordsScreen,
};
use crate::tui::ui::centered_rect;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    MainMenu,
    Records(ResourceKind),
    Editor,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    /// Application configuration
    pub config: Config,
    client: ApiClient,

    // Screen states, one list screen per resource collection
    pub main_menu: MainMenuScreen,
    pub students: RecordsScreen<Student>,
    pub departments: RecordsScreen<Department>,
    pub courses: RecordsScreen<Course>,
    pub addresses: RecordsScreen<Address>,
    pub enrollments: RecordsScreen<Enrollment>,
    pub fees: RecordsScreen<Fee>,
    pub editor: Option<EditorScreen>,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config)?;

        Ok(Self {
            current_screen: Screen::MainMenu,
            previous_screen: None,
            config,

            main_menu: MainMenuScreen::new(),
            students: RecordsScreen::new(ResourceKind::Students, client.clone()),
            departments: RecordsScreen::new(ResourceKind::Departments, client.clone()),
            courses: RecordsScreen::new(ResourceKind::Courses, client.clone()),
            addresses: RecordsScreen::new(ResourceKind::Addresses, client.clone()),
            enrollments: RecordsScreen::new(ResourceKind::Enrollments, client.clone()),
            fees: RecordsScreen::new(ResourceKind::Fees, client.clone()),
            editor: None,
            client,

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        })
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.set_status(format!("Ready: {}", self.config.api_url));

        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Ok(event) = crossterm::event::read() {
                if let Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key).await?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts; '?' and 'q' stay available for text entry
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Char('?') if !self.in_text_entry() => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Char('q') if !self.in_text_entry() => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            _ => {}
        }

        if self.show_help_popup {
            return Ok(());
        }

        match self.current_screen {
            Screen::MainMenu => {
                if let Some(kind) = self.main_menu.handle_event(key) {
                    self.open_section(kind).await;
                }
            }
            Screen::Records(kind) => self.handle_records_event(kind, key).await,
            Screen::Editor => self.handle_editor_event(key).await,
        }

        Ok(())
    }

    /// Whether the focused widget consumes plain characters
    fn in_text_entry(&self) -> bool {
        match self.current_screen {
            Screen::MainMenu => false,
            Screen::Editor => true,
            Screen::Records(kind) => match kind {
                ResourceKind::Students => self.students.search_focused,
                ResourceKind::Departments => self.departments.search_focused,
                ResourceKind::Courses => self.courses.search_focused,
                ResourceKind::Addresses => self.addresses.search_focused,
                ResourceKind::Enrollments => self.enrollments.search_focused,
                ResourceKind::Fees => self.fees.search_focused,
            },
        }
    }

    /// Open a resource section, fetching its records on first entry
    async fn open_section(&mut self, kind: ResourceKind) {
        self.navigate_to_screen(Screen::Records(kind));
        let action = match kind {
            ResourceKind::Students => self.students.ensure_loaded().await,
            ResourceKind::Departments => self.departments.ensure_loaded().await,
            ResourceKind::Courses => self.courses.ensure_loaded().await,
            ResourceKind::Addresses => self.addresses.ensure_loaded().await,
            ResourceKind::Enrollments => self.enrollments.ensure_loaded().await,
            ResourceKind::Fees => self.fees.ensure_loaded().await,
        };
        self.apply_records_action(action).await;
    }

    async fn handle_records_event(&mut self, kind: ResourceKind, key: KeyEvent) {
        let action = match kind {
            ResourceKind::Students => self.students.handle_event(key).await,
            ResourceKind::Departments => self.departments.handle_event(key).await,
            ResourceKind::Courses => self.courses.handle_event(key).await,
            ResourceKind::Addresses => self.addresses.handle_event(key).await,
            ResourceKind::Enrollments => self.enrollments.handle_event(key).await,
            ResourceKind::Fees => self.fees.handle_event(key).await,
        };
        self.apply_records_action(action).await;
    }

    async fn apply_records_action(&mut self, action: RecordsAction) {
        match action {
            RecordsAction::None => {}
            RecordsAction::Back => self.navigate_to_screen(Screen::MainMenu),
            RecordsAction::Status(message) => self.set_status(message),
            RecordsAction::Error(message) => self.set_error(message),
            RecordsAction::OpenCreate(kind) => self.open_editor(kind, EditorMode::Create).await,
            RecordsAction::OpenEdit(kind, id) => {
                self.open_editor(kind, EditorMode::Edit(id)).await
            }
        }
    }

    async fn open_editor(&mut self, kind: ResourceKind, mode: EditorMode) {
        match EditorScreen::open(kind, mode, self.client.clone()).await {
            Ok(editor) => {
                self.editor = Some(editor);
                self.navigate_to_screen(Screen::Editor);
            }
            Err(e) => self.set_error(format!("Failed to open form: {}", e)),
        }
    }

    async fn handle_editor_event(&mut self, key: KeyEvent) {
        let action = match self.editor.as_mut() {
            Some(editor) => editor.handle_key(key),
            None => EditorAction::Cancel,
        };

        match action {
            EditorAction::None => {}
            EditorAction::Cancel => self.close_editor(false).await,
            EditorAction::Submit => {
                let client = self.client.clone();
                let result = match self.editor.as_mut() {
                    Some(editor) => editor.submit(&client).await,
                    None => return,
                };
                match result {
                    Ok(message) => {
                        self.close_editor(true).await;
                        self.set_status(message);
                    }
                    Err(message) => self.set_error(message),
                }
            }
        }
    }

    /// Leave the editor, returning to its resource's list screen.
    /// After a successful save the list refetches to show the change.
    async fn close_editor(&mut self, reload: bool) {
        let kind = self.editor.as_ref().map(|editor| editor.kind);
        self.editor = None;

        match kind {
            Some(kind) => {
                self.navigate_to_screen(Screen::Records(kind));
                if reload {
                    let action = match kind {
                        ResourceKind::Students => self.students.refresh().await,
                        ResourceKind::Departments => self.departments.refresh().await,
                        ResourceKind::Courses => self.courses.refresh().await,
                        ResourceKind::Addresses => self.addresses.refresh().await,
                        ResourceKind::Enrollments => self.enrollments.refresh().await,
                        ResourceKind::Fees => self.fees.refresh().await,
                    };
                    // Surface refetch failures only; a success keeps the
                    // save confirmation visible
                    if let RecordsAction::Error(message) = action {
                        self.set_error(message);
                    }
                }
            }
            None => self.navigate_to_screen(Screen::MainMenu),
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::MainMenu => self.main_menu.draw(f, chunks[0]),
            Screen::Records(kind) => match kind {
                ResourceKind::Students => self.students.draw(f, chunks[0]),
                ResourceKind::Departments => self.departments.draw(f, chunks[0]),
                ResourceKind::Courses => self.courses.draw(f, chunks[0]),
                ResourceKind::Addresses => self.addresses.draw(f, chunks[0]),
                ResourceKind::Enrollments => self.enrollments.draw(f, chunks[0]),
                ResourceKind::Fees => self.fees.draw(f, chunks[0]),
            },
            Screen::Editor => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.draw(f, chunks[0]);
                }
            }
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            let screen_name = match self.current_screen {
                Screen::MainMenu => "Main Menu".to_string(),
                Screen::Records(kind) => kind.title().to_string(),
                Screen::Editor => self
                    .editor
                    .as_ref()
                    .map(|editor| editor.title())
                    .unwrap_or_else(|| "Form".to_string()),
            };
            format!("uniadmin - {} | q: Quit | F1/?: Help", screen_name)
        };

        let style = if self.error_message.is_some() {
            Style::default().fg(Color::Red)
        } else if self.status_message.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 70, area);

        f.render_widget(Clear, popup_area);

        let help_content = self.get_context_help();
        let help_popup = Paragraph::new(help_content)
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            q - Quit application\n\
            F1 / ? - Toggle this help\n\n";

        let screen_help = match self.current_screen {
            Screen::MainMenu => {
                "Main Menu:\n\
                ↑/↓ - Navigate sections\n\
                Enter - Open section\n\
                S/D/C/A/E/F - Jump to section"
            }
            Screen::Records(_) => {
                "Record List:\n\
                / - Focus search (type to filter, Enter/ESC to leave)\n\
                ↑/↓ - Select row\n\
                ←/→ or PgUp/PgDn - Previous/next page\n\
                a - Add record\n\
                e or Enter - Edit selected record\n\
                d - Delete selected record (asks for confirmation)\n\
                r - Reload from server\n\
                ESC - Back to main menu"
            }
            Screen::Editor => {
                "Record Form:\n\
                Tab / Shift+Tab - Next/previous field\n\
                ↑/↓ - Move between fields, or options in an open dropdown\n\
                Space - Open dropdown on a choice field\n\
                Enter - Save (on dropdowns: open/pick option)\n\
                ESC - Cancel without saving"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}
