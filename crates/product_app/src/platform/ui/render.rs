use product_core::{AppViewModel, BackendStatus, NotificationLevel, ProductCardView};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::constants::*;
use super::input::Focus;
use super::layout::AppLayout;
use super::UiState;

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let layout = AppLayout::split(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        layout.title,
    );
    render_scrape_form(frame, layout.scrape_form, view, ui.focus == Focus::UrlInput);
    render_search_row(frame, layout.search_row, view, ui.focus == Focus::SearchInput);
    render_products(frame, layout.products, view, ui.focus == Focus::Products);
    frame.render_widget(status_line(view, ui), layout.status);
}

fn render_scrape_form(frame: &mut Frame, area: Rect, view: &AppViewModel, focused: bool) {
    let (field, button) = AppLayout::input_with_button(area, 18);
    let title = if view.form.force {
        "Scrape URL [force]"
    } else {
        "Scrape URL"
    };
    render_input(frame, field, title, &view.form.url, URL_PLACEHOLDER, focused);
    render_button(frame, button, view.form.button_label, !view.form.submitting);
}

fn render_search_row(frame: &mut Frame, area: Rect, view: &AppViewModel, focused: bool) {
    let (field, button) = AppLayout::input_with_button(area, 10);
    let title = if view.search.pending {
        "Search (waiting…)"
    } else {
        "Search"
    };
    render_input(
        frame,
        field,
        title,
        &view.search.query,
        SEARCH_PLACEHOLDER,
        focused,
    );
    render_button(frame, button, SEARCH_BUTTON, true);
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    placeholder: &str,
    focused: bool,
) {
    let content = if text.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text.to_string())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(focus_style(focused));
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused && area.width > 2 && area.height > 2 {
        let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let x = area.x + 1 + typed.min(area.width - 3);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Span::styled(label.to_string(), style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn render_products(frame: &mut Frame, area: Rect, view: &AppViewModel, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Products ({})", view.cards.len()))
        .border_style(focus_style(focused));

    if let Some(message) = view.empty_message {
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items = view
        .cards
        .iter()
        .map(|card| ListItem::new(Text::from(card_lines(card))))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(view.selected_index());
    frame.render_stateful_widget(list, area, &mut state);
}

pub(crate) fn card_lines(card: &ProductCardView) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        card.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if card.refetching {
        title.push(Span::styled(
            format!("  [{}]", card.refetch_label),
            Style::default().fg(Color::Yellow),
        ));
    } else if card.reloading {
        title.push(Span::styled(
            format!("  [{RELOADING_LABEL}]"),
            Style::default().fg(Color::Yellow),
        ));
    }

    vec![
        Line::from(title),
        Line::from(vec![
            Span::styled("Price: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(card.price.clone()),
            Span::styled("  Category: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(card.category.clone()),
        ]),
        Line::from(card.description.clone()),
        Line::from(Span::styled(
            format!("Last updated: {}", card.updated),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(
                format!("{}: ", card.source_label),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                card.source_url.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::raw(format!("   [{}]", card.refetch_label)),
        ]),
        Line::default(),
    ]
}

fn status_line(view: &AppViewModel, ui: &UiState) -> Paragraph<'static> {
    if let Some(toast) = &ui.toast {
        let color = match toast.notification.level {
            NotificationLevel::Info => Color::Blue,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        };
        return Paragraph::new(Span::styled(
            toast.notification.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let hint = match ui.focus {
        Focus::UrlInput => HINT_FORM,
        Focus::SearchInput => HINT_SEARCH,
        Focus::Products => HINT_PRODUCTS,
    };
    let backend = match &view.backend {
        BackendStatus::Unknown => Span::styled("backend: ?", Style::default().fg(Color::DarkGray)),
        BackendStatus::Online => Span::styled("backend: online", Style::default().fg(Color::Green)),
        BackendStatus::Unreachable(_) => {
            Span::styled("backend: unreachable", Style::default().fg(Color::Red))
        }
    };
    Paragraph::new(Line::from(vec![backend, Span::raw(" | "), Span::raw(hint)]))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use product_core::{update, AppState, Msg, Notification, Product};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn kettle() -> Product {
        Product {
            id: 1,
            title: Some("Kettle".to_string()),
            price: Some("$20".to_string()),
            category: Some("Home".to_string()),
            description: Some("Steel kettle".to_string()),
            url: "http://x".to_string(),
            contact: None,
            size: None,
            updated_at: None,
            created_at: None,
        }
    }

    fn draw(view: &AppViewModel, ui: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|frame| render(frame, view, ui))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded(products: Vec<Product>) -> AppViewModel {
        let (state, _) = update(
            AppState::new(),
            Msg::ProductsLoaded {
                query: None,
                result: Ok(products),
            },
        );
        state.view()
    }

    #[test]
    fn empty_collection_renders_empty_state() {
        let screen = draw(&loaded(Vec::new()), &UiState::default());
        assert!(screen.contains("No products yet. Scrape a URL to add one."));
        assert!(screen.contains(URL_PLACEHOLDER));
    }

    #[test]
    fn kettle_card_is_rendered() {
        let screen = draw(&loaded(vec![kettle()]), &UiState::default());
        assert!(screen.contains("Kettle"));
        assert!(screen.contains("Price: $20"));
        assert!(screen.contains("Category: Home"));
        assert!(screen.contains("Open Source URL: http://x"));
        assert!(screen.contains("[Refetch]"));
    }

    #[test]
    fn toast_replaces_key_hints() {
        let mut ui = UiState::default();
        ui.show(Notification::error("Error: invalid url"));

        let screen = draw(&AppViewModel::default(), &ui);
        assert!(screen.contains("Error: invalid url"));
        assert!(!screen.contains(HINT_FORM));
    }

    #[test]
    fn card_lines_mark_refetching_cards() {
        let mut card = loaded(vec![kettle()]).cards.remove(0);
        card.refetching = true;
        card.refetch_label = "Refetching...";

        let lines = card_lines(&card);
        let title: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(title, "Kettle  [Refetching...]");
    }

    #[test]
    fn first_of_two_queued_toasts_is_drawn() {
        let mut ui = UiState::default();
        ui.show(Notification::error("Backend unreachable: connection refused"));
        ui.show(Notification::error("Error: connection refused"));

        let screen = draw(&AppViewModel::default(), &ui);
        assert!(screen.contains("Backend unreachable: connection refused"));
        assert!(!screen.contains("Error: connection refused"));
    }

    #[test]
    fn card_lines_mark_reloading_cards() {
        let mut card = loaded(vec![kettle()]).cards.remove(0);
        card.reloading = true;

        let lines = card_lines(&card);
        let title: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(title, "Kettle  [Reloading...]");
    }
}
