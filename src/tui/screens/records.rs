//! Generic list screen over one resource collection
//!
//! Wraps a `ListView` controller: live search box, paged table, delete
//! gated by a confirmation popup, and add/edit handoff to the editor
//! screen. Instantiated once per resource by the application.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::{ApiClient, RestResource};
use crate::listview::ListView;
use crate::models::{Resource, ResourceKind};
use crate::tui::components::table::{format_header, format_row};
use crate::tui::components::TableRow;
use crate::tui::ui::{centered_rect, Styles};

/// Outcome of a key event, handled by the application shell
#[derive(Debug, Clone, PartialEq)]
pub enum RecordsAction {
    None,
    Back,
    OpenCreate(ResourceKind),
    OpenEdit(ResourceKind, i64),
    Status(String),
    Error(String),
}

pub struct RecordsScreen<R: Resource + TableRow> {
    kind: ResourceKind,
    pub list: ListView<R>,
    pub table_state: ListState,
    pub search_focused: bool,
    pub confirm_delete: Option<i64>,
    pub is_busy: bool,
    loaded_once: bool,
}

impl<R: Resource + TableRow> RecordsScreen<R> {
    pub fn new(kind: ResourceKind, client: ApiClient) -> Self {
        Self {
            kind,
            list: ListView::new(Box::new(RestResource::<R>::new(client))),
            table_state: ListState::default(),
            search_focused: false,
            confirm_delete: None,
            is_busy: false,
            loaded_once: false,
        }
    }

    /// Fetch on first entry to the screen
    pub async fn ensure_loaded(&mut self) -> RecordsAction {
        if self.loaded_once {
            return RecordsAction::None;
        }
        self.refresh().await
    }

    /// Refetch the full record set and report the outcome
    pub async fn refresh(&mut self) -> RecordsAction {
        self.is_busy = true;
        self.list.load().await;
        self.is_busy = false;
        self.loaded_once = true;
        self.sync_after_change();

        match self.list.error() {
            Some(err) => RecordsAction::Error(err.to_string()),
            None => RecordsAction::Status(format!(
                "Loaded {} {}",
                self.list.record_count(),
                R::NAME
            )),
        }
    }

    /// Write an out-of-range page correction back into the controller and
    /// keep the row selection inside the visible page
    fn sync_after_change(&mut self) {
        let (effective_page, page_len) = {
            let view = self.list.view();
            (view.page, view.page_items.len())
        };
        if effective_page != self.list.page() {
            self.list.set_page(effective_page);
        }

        if page_len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(selected.min(page_len - 1)));
        }
    }

    fn selected_id(&self) -> Option<i64> {
        let view = self.list.view();
        self.table_state
            .selected()
            .and_then(|i| view.page_items.get(i))
            .and_then(|record| record.id())
    }

    /// Handle key events for the list screen
    pub async fn handle_event(&mut self, key: KeyEvent) -> RecordsAction {
        // The UI suppresses further input while a call is in flight
        if self.is_busy {
            return RecordsAction::None;
        }

        // Confirmation popup takes over the keyboard until answered
        if let Some(id) = self.confirm_delete {
            return self.handle_confirm_event(key, id).await;
        }

        if self.search_focused {
            return self.handle_search_event(key);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search_focused = true;
                RecordsAction::None
            }
            KeyCode::Up => {
                if let Some(selected) = self.table_state.selected() {
                    if selected > 0 {
                        self.table_state.select(Some(selected - 1));
                    }
                }
                RecordsAction::None
            }
            KeyCode::Down => {
                let page_len = self.list.view().page_items.len();
                if let Some(selected) = self.table_state.selected() {
                    if selected + 1 < page_len {
                        self.table_state.select(Some(selected + 1));
                    }
                } else if page_len > 0 {
                    self.table_state.select(Some(0));
                }
                RecordsAction::None
            }
            KeyCode::Left | KeyCode::PageUp => {
                // Prev is a no-op on the first page
                if self.list.page() > 1 {
                    self.list.set_page(self.list.page() - 1);
                    self.table_state.select(Some(0));
                }
                RecordsAction::None
            }
            KeyCode::Right | KeyCode::PageDown => {
                let total_pages = self.list.view().total_pages;
                if self.list.page() < total_pages {
                    self.list.set_page(self.list.page() + 1);
                    self.table_state.select(Some(0));
                }
                RecordsAction::None
            }
            KeyCode::Char('r') => self.refresh().await,
            KeyCode::Char('a') => RecordsAction::OpenCreate(self.kind),
            KeyCode::Char('e') | KeyCode::Enter => match self.selected_id() {
                Some(id) => RecordsAction::OpenEdit(self.kind, id),
                None => RecordsAction::Error("No record selected".to_string()),
            },
            KeyCode::Char('d') | KeyCode::Delete => {
                match self.selected_id() {
                    Some(id) => self.confirm_delete = Some(id),
                    None => return RecordsAction::Error("No record selected".to_string()),
                }
                RecordsAction::None
            }
            KeyCode::Esc => RecordsAction::Back,
            _ => RecordsAction::None,
        }
    }

    async fn handle_confirm_event(&mut self, key: KeyEvent, id: i64) -> RecordsAction {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.confirm_delete = None;
                self.is_busy = true;
                let deleted = self.list.remove(id).await;
                self.is_busy = false;
                self.sync_after_change();

                if deleted {
                    RecordsAction::Status(format!("{} {} deleted", R::TITLE, id))
                } else {
                    RecordsAction::Error(
                        self.list
                            .error()
                            .unwrap_or("Delete failed")
                            .to_string(),
                    )
                }
            }
            _ => {
                self.confirm_delete = None;
                RecordsAction::Status("Delete cancelled".to_string())
            }
        }
    }

    fn handle_search_event(&mut self, key: KeyEvent) -> RecordsAction {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.search_focused = false;
            }
            KeyCode::Char(c) => {
                let term = format!("{}{}", self.list.search_term(), c);
                self.list.set_search_term(term);
                self.sync_after_change();
            }
            KeyCode::Backspace => {
                let mut term = self.list.search_term().to_string();
                term.pop();
                self.list.set_search_term(term);
                self.sync_after_change();
            }
            _ => {}
        }
        RecordsAction::None
    }

    /// Draw the list screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        // Reflect an out-of-range page correction before rendering
        let effective_page = self.list.view().page;
        if effective_page != self.list.page() {
            self.list.set_page(effective_page);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        self.draw_search_bar(f, chunks[0]);

        let header = Paragraph::new(format_header::<R>()).style(Styles::header());
        f.render_widget(header, chunks[1]);

        self.draw_table(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        if let Some(id) = self.confirm_delete {
            self.draw_confirm_popup(f, area, id);
        }
    }

    fn draw_search_bar(&self, f: &mut Frame, area: Rect) {
        let term = self.list.search_term();
        let (text, style) = if term.is_empty() && !self.search_focused {
            ("Press / to search".to_string(), Styles::inactive())
        } else {
            (term.to_string(), Styles::default())
        };

        let border = if self.search_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let search = Paragraph::new(text).style(style).block(
            Block::default()
                .title(format!("Search {}", self.kind.title()))
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(search, area);

        if self.search_focused {
            let cursor_x = area.x + 1 + term.len() as u16;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, area.y + 1);
            }
        }
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect) {
        let (rows, filtered_count): (Vec<String>, usize) = {
            let view = self.list.view();
            let page_start = view.page_start(self.list.page_size());
            let rows = view
                .page_items
                .iter()
                .enumerate()
                .map(|(i, record)| format_row(page_start + i + 1, *record))
                .collect();
            (rows, view.filtered_count)
        };

        let block = Block::default()
            .title(format!("{} ({})", self.kind.title(), filtered_count))
            .borders(Borders::ALL)
            .border_style(if self.search_focused {
                Styles::inactive_border()
            } else {
                Styles::active_border()
            });

        if rows.is_empty() {
            let message = if self.list.error().is_some() {
                "Failed to load records. Press r to retry."
            } else {
                "No records found"
            };
            let empty = Paragraph::new(message).style(Styles::inactive()).block(block);
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
        let table = List::new(items)
            .block(block)
            .highlight_style(Styles::selected());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let hints = Paragraph::new(
            "/: Search | ↑/↓: Select | ←/→: Page | a: Add | e/Enter: Edit | d: Delete | r: Reload | ESC: Back",
        )
        .style(Styles::info())
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(hints, chunks[0]);

        let (page, total_pages, filtered_count, shown) = {
            let view = self.list.view();
            (
                view.page,
                view.total_pages,
                view.filtered_count,
                view.page_items.len(),
            )
        };
        let page_start = (page - 1) * self.list.page_size();
        let range = if shown == 0 {
            "0-0".to_string()
        } else {
            format!("{}-{}", page_start + 1, page_start + shown)
        };

        let pagination = Paragraph::new(format!(
            "Page {} of {} | Showing {} of {}",
            page, total_pages, range, filtered_count
        ))
        .style(Styles::info())
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(pagination, chunks[1]);
    }

    fn draw_confirm_popup(&self, f: &mut Frame, area: Rect, id: i64) {
        let popup_area = centered_rect(44, 20, area);
        f.render_widget(Clear, popup_area);

        let prompt = Paragraph::new(format!(
            "Delete {} {}?\n\ny: Delete   n/ESC: Cancel",
            R::TITLE,
            id
        ))
        .style(Styles::warning())
        .block(
            Block::default()
                .title("Confirm Delete")
                .borders(Borders::ALL)
                .border_style(Styles::warning()),
        );
        f.render_widget(prompt, popup_area);
    }
}
