use tui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Text,
    widgets::{Block, Paragraph, Widget},
};

/// Text placed in the middle of its area, every line centered on its own.
pub struct Centered<'a> {
    block: Option<Block<'a>>,
    text: Text<'a>,
}

impl<'a> Centered<'a> {
    pub fn new<T>(text: T) -> Centered<'a>
    where
        T: Into<Text<'a>>,
    {
        Centered {
            block: None,
            text: text.into(),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Centered<'a> {
        self.block = Some(block);
        self
    }
}

impl<'a> Widget for Centered<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if let Some(block) = self.block {
            block.render(area, buf);
        }

        let text_height = u16::try_from(self.text.height()).unwrap_or(u16::MAX);
        let text_width = u16::try_from(self.text.width()).unwrap_or(u16::MAX);

        let centered_chunk = {
            let (left_padding, right_padding);
            {
                let leftover_width = inner_area.width.saturating_sub(text_width);
                left_padding = leftover_width / 2;
                right_padding = leftover_width.saturating_sub(left_padding);
            }
            let top_padding = inner_area.height.saturating_sub(text_height) / 2;

            let vertically_centered_sub_chunk = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(top_padding),
                    Constraint::Min(text_height.min(inner_area.height)),
                ])
                .split(inner_area)[1];

            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(left_padding),
                    Constraint::Min(text_width.min(inner_area.width)),
                    Constraint::Length(right_padding),
                ])
                .split(vertically_centered_sub_chunk)[1]
        };

        Paragraph::new(self.text)
            .alignment(Alignment::Center)
            .render(centered_chunk, buf);
    }
}
