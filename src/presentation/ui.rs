use crate::application::{App, AppMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_add_field(f, app, chunks[1]);
    render_habit_list(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    match app.mode {
        AppMode::ConfirmingDelete => render_delete_popup(f),
        AppMode::EditingHabit => render_edit_popup(f, app),
        _ => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🌿 나의 습관 목록").style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_add_field(f: &mut Frame, app: &App, area: Rect) {
    let style = if matches!(app.mode, AppMode::AddingHabit) {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let field = Paragraph::new(app.add_input.as_str())
        .block(Block::default().borders(Borders::ALL).title("새 습관 입력"))
        .style(style);
    f.render_widget(field, area);
}

fn render_habit_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .habits
        .iter()
        .map(|habit| {
            let marker = if habit.is_completed { "[x]" } else { "[ ]" };
            let style = if habit.is_completed {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(format!("{marker} {}", habit.name)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("습관 목록"))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    let mut state = ListState::default();
    state.select(if app.habits.is_empty() {
        None
    } else {
        Some(app.selected)
    });
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => {
            "a: 추가하기 | Space: 완료 체크 | Enter: 수정하기 | d: 삭제하기 | q: 종료".to_string()
        }
        AppMode::AddingHabit => format!("새 습관 입력: {} (Enter: 추가하기, Esc: 닫기)", app.add_input),
        AppMode::ConfirmingDelete => "정말 삭제하시겠어요? (Enter: 확인, Esc: 취소)".to_string(),
        AppMode::EditingHabit => format!("수정하기: {} (Enter: 확인, Esc: 취소)", app.edit_input),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("상태"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::AddingHabit => Style::default().fg(Color::Green),
            AppMode::ConfirmingDelete => Style::default().fg(Color::Red),
            AppMode::EditingHabit => Style::default().fg(Color::Yellow),
        });
    f.render_widget(status, area);
}

fn render_delete_popup(f: &mut Frame) {
    let popup_area = centered_popup(f.area());
    f.render_widget(Clear, popup_area);

    let dialog = Paragraph::new("선택된 습관이 모두 삭제됩니다.\n\nEnter: 확인    Esc: 취소")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("정말 삭제하시겠어요?")
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(dialog, popup_area);
}

fn render_edit_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_popup(f.area());
    f.render_widget(Clear, popup_area);

    let dialog = Paragraph::new(format!(
        "수정할 습관 입력: {}\n\nEnter: 확인    Esc: 취소",
        app.edit_input
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("수정하기")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(dialog, popup_area);
}

fn centered_popup(area: Rect) -> Rect {
    Rect {
        x: area.width / 6,
        y: area.height / 4,
        width: area.width * 2 / 3,
        height: area.height / 2,
    }
}
