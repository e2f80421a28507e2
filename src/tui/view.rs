//! Pure rendering: map App state to ratatui widgets.
//!
//! Nothing here mutates the app. `list_view` computes which rows of the
//! active list are on screen; `render` draws the header, the status
//! line and the list box around those rows.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::model::{SelectionModel, Tab};

use super::state::{App, StatusKind};
use super::theme;

/// Rows taken by the header block.
const HEADER_HEIGHT: u16 = 8;

/// Top and bottom border of the list box.
const BORDER_ROWS: u16 = 2;

// ============================================================================
// LAYOUT
// ============================================================================

/// Screen regions, shared by the renderer and the input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub status: Rect,
    pub list: Rect,
}

impl AppLayout {
    /// Number of list rows visible inside the box.
    pub fn viewport_height(&self) -> usize {
        self.list.height.saturating_sub(BORDER_ROWS) as usize
    }
}

/// Split the terminal area into header, status line and list box.
pub fn layout(area: Rect) -> AppLayout {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT), // title + instructions
        Constraint::Length(1),             // status
        Constraint::Length(1),             // spacer
        Constraint::Min(0),                // list box
        Constraint::Length(1),             // bottom margin
    ])
    .horizontal_margin(2)
    .split(area);

    AppLayout {
        header: chunks[0],
        status: chunks[1],
        list: chunks[3],
    }
}

// ============================================================================
// LIST VIEW
// ============================================================================

/// Draw instructions for the list box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    pub title: &'static str,
    pub rows: Vec<ListRow<'a>>,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow<'a> {
    /// 1-based position in the whole list, not in the viewport.
    pub number: usize,
    pub path: &'a str,
    pub highlighted: bool,
}

/// The slice of the active list that fits in `viewport_height` rows.
pub fn list_view(model: &SelectionModel, viewport_height: usize) -> ListView<'_> {
    let list = model.active_list();
    let start = model.scroll_offset().min(list.len());
    let end = start.saturating_add(viewport_height).min(list.len());
    let selected = model.selected_index();

    let rows = list[start..end]
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let index = start + i;
            ListRow {
                number: index + 1,
                path: path.as_str(),
                highlighted: selected == Some(index),
            }
        })
        .collect();

    ListView {
        title: model.active_tab().title(),
        rows,
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the main screen.
pub fn render(app: &App, frame: &mut Frame) {
    let regions = layout(frame.area());

    frame.render_widget(render_header(), regions.header);
    frame.render_widget(render_status(app), regions.status);

    let view = list_view(&app.model, regions.viewport_height());
    frame.render_widget(render_list(&view, &app.model), regions.list);
}

/// Render the screen shown when there is nothing to manage.
pub fn render_empty(frame: &mut Frame) {
    let text = vec![
        Line::from("No files found in the current directory or assume-unchanged list."),
        Line::from("Press any key to exit."),
    ];
    frame.render_widget(Paragraph::new(text), frame.area());
}

// ============================================================================
// WIDGETS
// ============================================================================

fn render_header() -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Git Assume-Unchanged Manager", theme::STYLE_TITLE)),
        Line::from("---------------------------------------------------"),
        Line::from("Instructions:"),
        Line::from("  - UP/DOWN: Navigate the list"),
        Line::from("  - ENTER: Toggle assume-unchanged"),
        Line::from("  - TAB: Switch between add/remove tabs"),
        Line::from("  - Q: Quit the application"),
    ];
    Paragraph::new(lines).style(theme::STYLE_HEADER)
}

fn render_status(app: &App) -> Paragraph<'_> {
    match &app.status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Success => theme::STYLE_SUCCESS,
                StatusKind::Failure => theme::STYLE_FAILURE,
            };
            Paragraph::new(Span::styled(status.text.as_str(), style))
        }
        None => Paragraph::new(""),
    }
}

fn render_list<'a>(view: &ListView<'a>, model: &SelectionModel) -> Paragraph<'a> {
    let lines: Vec<Line> = view
        .rows
        .iter()
        .map(|row| {
            let line = Line::from(format!("{:<3} {}", row.number, row.path));
            if row.highlighted {
                line.style(theme::STYLE_CURSOR)
            } else {
                line
            }
        })
        .collect();

    let block = Block::bordered()
        .border_style(theme::STYLE_LIST)
        .title(format!(" {} ", view.title))
        .title_bottom(tab_indicator(model));

    Paragraph::new(lines)
        .style(theme::STYLE_LIST)
        .block(block)
}

/// Footer naming both tabs with their counts, active one emphasised.
fn tab_indicator(model: &SelectionModel) -> Line<'static> {
    let style_for = |tab: Tab| {
        if model.active_tab() == tab {
            theme::STYLE_TAB_ACTIVE
        } else {
            theme::STYLE_TAB_INACTIVE
        }
    };

    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("Available ({})", model.available().len()),
            style_for(Tab::Available),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Assumed ({})", model.flagged().len()),
            style_for(Tab::Flagged),
        ),
        Span::raw(" "),
    ])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::StatusLine;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Modifier;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(60, 20);
        Terminal::new(backend).unwrap()
    }

    fn files(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}.txt", prefix, i)).collect()
    }

    fn buffer_content(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn row_reversed(buffer: &Buffer, y: u16) -> bool {
        (0..buffer.area.width).any(|x| buffer[(x, y)].modifier.contains(Modifier::REVERSED))
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = make_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    // -- Layout --

    #[test]
    fn viewport_excludes_borders() {
        let regions = layout(Rect::new(0, 0, 60, 20));
        assert_eq!(regions.list.height, 9);
        assert_eq!(regions.viewport_height(), 7);
    }

    #[test]
    fn tiny_terminal_has_zero_viewport() {
        let regions = layout(Rect::new(0, 0, 20, 5));
        assert_eq!(regions.viewport_height(), 0);
    }

    // -- ListView --

    #[test]
    fn list_view_numbers_rows_absolutely() {
        let mut model = SelectionModel::new(files("f", 10), vec![]);
        for _ in 0..6 {
            model.move_down(3);
        }

        let view = list_view(&model, 3);

        assert_eq!(view.title, "Available to Assume Unchanged");
        let numbers: Vec<usize> = view.rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![5, 6, 7]);
        let highlighted: Vec<&str> = view
            .rows
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.path)
            .collect();
        assert_eq!(highlighted, vec!["f6.txt"]);
    }

    #[test]
    fn list_view_truncates_at_end_of_list() {
        let model = SelectionModel::new(files("f", 2), vec![]);
        let view = list_view(&model, 10);
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn list_view_of_empty_list_has_no_rows() {
        let mut model = SelectionModel::new(files("f", 2), vec![]);
        model.switch_tab();
        let view = list_view(&model, 10);
        assert_eq!(view.title, "Currently Assumed Unchanged");
        assert!(view.rows.is_empty());
    }

    // -- Full render --

    #[test]
    fn renders_header_title_and_rows() {
        let app = App::new(SelectionModel::new(files("f", 3), vec!["x.txt".into()]));
        let content = buffer_content(&draw(&app));

        assert!(content.contains("Git Assume-Unchanged Manager"));
        assert!(content.contains("TAB: Switch between add/remove tabs"));
        assert!(content.contains("Available to Assume Unchanged"));
        assert!(content.contains("1   f0.txt"));
        assert!(content.contains("3   f2.txt"));
        assert!(content.contains("Available (3)"));
        assert!(content.contains("Assumed (1)"));
    }

    #[test]
    fn only_selected_row_is_reversed() {
        let mut app = App::new(SelectionModel::new(files("f", 3), vec![]));
        app.model.move_down(7);
        let buffer = draw(&app);

        let mut reversed_rows = Vec::new();
        for y in 0..buffer.area.height {
            if row_reversed(&buffer, y) {
                reversed_rows.push(row_text(&buffer, y));
            }
        }
        assert_eq!(reversed_rows.len(), 1);
        assert!(reversed_rows[0].contains("2   f1.txt"));
    }

    #[test]
    fn empty_active_list_renders_empty_box() {
        let mut app = App::new(SelectionModel::new(files("f", 1), vec![]));
        app.model.switch_tab();
        let buffer = draw(&app);

        let content = buffer_content(&buffer);
        assert!(content.contains("Currently Assumed Unchanged"));
        assert!(!content.contains("f0.txt"));
        assert!((0..buffer.area.height).all(|y| !row_reversed(&buffer, y)));
    }

    #[test]
    fn status_line_is_rendered() {
        let mut app = App::new(SelectionModel::new(files("f", 1), vec![]));
        app.status = Some(StatusLine {
            kind: StatusKind::Failure,
            text: "Failed to execute command on 'f0.txt'".into(),
        });
        let content = buffer_content(&draw(&app));
        assert!(content.contains("Failed to execute command on 'f0.txt'"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut app = App::new(SelectionModel::new(files("f", 12), files("g", 2)));
        for _ in 0..9 {
            app.model.move_down(7);
        }
        let before = app.clone();

        let first = draw(&app);
        let second = draw(&app);

        assert_eq!(first, second);
        assert_eq!(app, before);
    }

    #[test]
    fn tiny_terminal_renders_without_panic() {
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new(SelectionModel::new(files("f", 5), vec![]));
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }

    #[test]
    fn empty_screen_renders_message() {
        let mut terminal = make_terminal();
        terminal.draw(render_empty).unwrap();
        let content = buffer_content(terminal.backend().buffer());
        assert!(content.contains("No files found"));
        assert!(content.contains("Press any key to exit."));
    }
}
