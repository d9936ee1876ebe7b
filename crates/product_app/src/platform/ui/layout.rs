use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub title: Rect,
    pub scrape_form: Rect,
    pub search_row: Rect,
    pub products: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            title: rows[0],
            scrape_form: rows[1],
            search_row: rows[2],
            products: rows[3],
            status: rows[4],
        }
    }

    /// Split an input row into the text field and a trailing button.
    pub fn input_with_button(area: Rect, button_width: u16) -> (Rect, Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(button_width)])
            .split(area);
        (columns[0], columns[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let layout = AppLayout::split(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.title.height, 1);
        assert_eq!(layout.scrape_form.y, 1);
        assert_eq!(layout.search_row.y, 4);
        assert_eq!(layout.products.y, 7);
        assert_eq!(layout.products.height, 22);
        assert_eq!(layout.status.y, 29);
    }
}
