use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use product_core::{AppViewModel, Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    UrlInput,
    SearchInput,
    Products,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::UrlInput => Focus::SearchInput,
            Focus::SearchInput => Focus::Products,
            Focus::Products => Focus::UrlInput,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::UrlInput => Focus::Products,
            Focus::SearchInput => Focus::UrlInput,
            Focus::Products => Focus::SearchInput,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Dispatch(Msg),
    FocusNext,
    FocusPrevious,
    Quit,
}

/// Translate a key press into a UI action given the current focus and view.
pub fn map_key(key: KeyEvent, focus: Focus, view: &AppViewModel) -> Option<UiAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Some(UiAction::Quit),
        KeyCode::Char('c') if ctrl => return Some(UiAction::Quit),
        KeyCode::Tab => return Some(UiAction::FocusNext),
        KeyCode::BackTab => return Some(UiAction::FocusPrevious),
        _ => {}
    }

    match focus {
        Focus::UrlInput => match key.code {
            KeyCode::Enter => Some(UiAction::Dispatch(Msg::ScrapeSubmitted)),
            KeyCode::Char('f') if ctrl => Some(UiAction::Dispatch(Msg::ForceToggled)),
            _ => edit_text(&view.form.url, key.code, ctrl)
                .map(|text| UiAction::Dispatch(Msg::UrlInputChanged(text))),
        },
        Focus::SearchInput => match key.code {
            KeyCode::Enter => Some(UiAction::Dispatch(Msg::SearchNowClicked)),
            _ => edit_text(&view.search.query, key.code, ctrl)
                .map(|text| UiAction::Dispatch(Msg::SearchInputChanged(text))),
        },
        Focus::Products => map_products_key(key.code, view),
    }
}

fn map_products_key(code: KeyCode, view: &AppViewModel) -> Option<UiAction> {
    match code {
        KeyCode::Char('q') => Some(UiAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => select_offset(view, -1),
        KeyCode::Down | KeyCode::Char('j') => select_offset(view, 1),
        KeyCode::Home => select_at(view, 0),
        KeyCode::End => select_at(view, view.cards.len().checked_sub(1)?),
        KeyCode::Enter | KeyCode::Char('r') => view
            .selected
            .map(|id| UiAction::Dispatch(Msg::RefetchClicked { id })),
        KeyCode::Char('u') => view
            .selected
            .map(|id| UiAction::Dispatch(Msg::ReloadClicked { id })),
        _ => None,
    }
}

fn select_offset(view: &AppViewModel, offset: isize) -> Option<UiAction> {
    let current = view.selected_index().unwrap_or(0);
    let target = current.checked_add_signed(offset)?;
    select_at(view, target)
}

fn select_at(view: &AppViewModel, index: usize) -> Option<UiAction> {
    let card = view.cards.get(index)?;
    if view.selected == Some(card.id) {
        return None;
    }
    Some(UiAction::Dispatch(Msg::ProductSelected { id: card.id }))
}

/// Controlled-input editing: returns the new text, or `None` if unchanged.
fn edit_text(current: &str, code: KeyCode, ctrl: bool) -> Option<String> {
    match code {
        KeyCode::Char('u') if ctrl => (!current.is_empty()).then(String::new),
        KeyCode::Char(ch) if !ctrl => {
            let mut text = current.to_string();
            text.push(ch);
            Some(text)
        }
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop()?;
            Some(text)
        }
        _ => None,
    }
}
