use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;

use crate::domain::services::AppState;

const HELP_TEXT: &str = "↑/↓ scroll · PgUp/PgDn page · Home/End jump · q quit";

fn start_loop<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(frame.size());

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    app_state.title.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                )
                .alignment(Alignment::Center),
                layout[0],
            );

            frame.render_widget(
                app_state.bubble_list.widget(app_state.scroll.position),
                layout[1],
            );
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[1].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            frame.render_widget(
                Paragraph::new(HELP_TEXT)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                layout[2],
            );
        })?;

        match crossterm::event::read()? {
            Event::Key(KeyEvent {
                kind: KeyEventKind::Release,
                ..
            }) => {}
            Event::Key(KeyEvent {
                code, modifiers, ..
            }) => match (code, modifiers.contains(KeyModifiers::CONTROL)) {
                (KeyCode::Char('c'), true) | (KeyCode::Char('q'), false) | (KeyCode::Esc, _) => {
                    break;
                }
                (KeyCode::Char('d'), true) | (KeyCode::PageDown, _) => {
                    app_state.scroll.down_page();
                }
                (KeyCode::Char('u'), true) | (KeyCode::PageUp, _) => {
                    app_state.scroll.up_page();
                }
                (KeyCode::Down, _) | (KeyCode::Char('j'), false) => {
                    app_state.scroll.down();
                }
                (KeyCode::Up, _) | (KeyCode::Char('k'), false) => {
                    app_state.scroll.up();
                }
                (KeyCode::Home, _) | (KeyCode::Char('g'), false) => {
                    app_state.scroll.first();
                }
                (KeyCode::End, _) | (KeyCode::Char('G'), _) => {
                    app_state.scroll.last();
                }
                _ => (),
            },
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => {
                    app_state.scroll.up();
                }
                MouseEventKind::ScrollDown => {
                    app_state.scroll.down();
                }
                _ => (),
            },
            // Layout is recalculated on the next draw.
            Event::Resize(_, _) => (),
            _ => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub fn start(mut app_state: AppState) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // Bring the latest recommendation into view on open.
    terminal.draw(|frame| {
        let height = frame.size().height.saturating_sub(4);
        app_state.set_rect(Rect::new(0, 3, frame.size().width, height));
    })?;
    app_state.scroll.last();

    let res = start_loop(&mut terminal, &mut app_state);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return res;
}
