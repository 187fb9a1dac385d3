//! Document rendering
//!
//! Walks the board's document and draws it with ratatui, recording where
//! every interactive element landed so pointer events can be mapped back
//! to elements.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use taskboard_core::components::DROPPABLE_CLASS;
use taskboard_core::document::{Document, NodeId, Tag};

/// Height of one card: border, people line, description line, border
const CARD_HEIGHT: u16 = 4;
/// Width reserved for form labels
const LABEL_WIDTH: u16 = 14;

/// Screen regions of drawn elements, in paint order
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    regions: Vec<(NodeId, Rect)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn record(&mut self, node: NodeId, area: Rect) {
        self.regions.push((node, area));
    }

    /// Innermost element drawn at (column, row)
    pub fn hit(&self, column: u16, row: u16) -> Option<NodeId> {
        self.regions
            .iter()
            .rev()
            .find(|(_, area)| contains(*area, column, row))
            .map(|(node, _)| *node)
    }

    #[cfg(test)]
    pub fn rect_of(&self, node: NodeId) -> Option<Rect> {
        self.regions
            .iter()
            .rev()
            .find(|(n, _)| *n == node)
            .map(|(_, area)| *area)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Per-frame interaction state that affects styling
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderState {
    pub focus: Option<NodeId>,
    pub dragging: Option<NodeId>,
}

/// Draw the whole document into `area`
pub fn draw_document(frame: &mut Frame, area: Rect, doc: &Document, state: RenderState, hits: &mut HitMap) {
    hits.clear();

    let Some(app) = doc.get_element_by_id("app") else {
        return;
    };

    let forms: Vec<NodeId> = doc
        .children(app)
        .iter()
        .copied()
        .filter(|&n| doc.tag(n) == Some(Tag::Form))
        .collect();
    let sections: Vec<NodeId> = doc
        .children(app)
        .iter()
        .copied()
        .filter(|&n| doc.tag(n) == Some(Tag::Section))
        .collect();

    let total_form_height: u16 = forms.iter().map(|&f| form_height(doc, f)).sum();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(total_form_height), Constraint::Min(CARD_HEIGHT + 2)])
        .split(area);

    let mut y = chunks[0].y;
    for form in forms {
        let height = form_height(doc, form).min(chunks[0].bottom().saturating_sub(y));
        let form_area = Rect::new(chunks[0].x, y, chunks[0].width, height);
        draw_form(frame, form_area, doc, form, state, hits);
        y = y.saturating_add(height);
    }

    if sections.is_empty() {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, sections.len() as u32); sections.len()])
        .split(chunks[1]);
    for (section, column) in sections.into_iter().zip(columns.iter()) {
        draw_section(frame, *column, doc, section, state, hits);
    }
}

fn form_height(doc: &Document, form: NodeId) -> u16 {
    let rows = doc.query_all_tag(form, Tag::Input).len() + doc.query_all_tag(form, Tag::Button).len();
    rows as u16 + 2
}

fn draw_form(frame: &mut Frame, area: Rect, doc: &Document, form: NodeId, state: RenderState, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("New Project")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hits.record(form, area);

    let mut row = inner.y;
    for control in doc.children(form) {
        if row >= inner.bottom() {
            break;
        }
        match doc.tag(*control) {
            Some(Tag::Div) => {
                let label = doc.query_tag(*control, Tag::Label);
                let Some(input) = doc.query_tag(*control, Tag::Input) else {
                    continue;
                };
                let label_area = Rect::new(inner.x, row, LABEL_WIDTH.min(inner.width), 1);
                let input_area = Rect::new(
                    inner.x + label_area.width,
                    row,
                    inner.width.saturating_sub(label_area.width),
                    1,
                );
                let label_text = label.map(|l| doc.text(l)).unwrap_or_default();
                frame.render_widget(
                    Paragraph::new(format!("{label_text}:")).style(Style::default().fg(Color::Gray)),
                    label_area,
                );

                let focused = state.focus == Some(input);
                let style = if focused {
                    Style::default().fg(Color::Black).bg(Color::White)
                } else {
                    Style::default().fg(Color::White).bg(Color::DarkGray)
                };
                let value = doc.value(input);
                frame.render_widget(Paragraph::new(value.to_string()).style(style), input_area);
                if focused {
                    let offset = (value.chars().count() as u16).min(input_area.width.saturating_sub(1));
                    frame.set_cursor_position((input_area.x + offset, row));
                }
                hits.record(input, input_area);
                row += 1;
            }
            Some(Tag::Button) => {
                let label = format!("[ {} ]", doc.text(*control));
                let width = (label.chars().count() as u16).min(inner.width);
                let button_area = Rect::new(inner.x + LABEL_WIDTH.min(inner.width.saturating_sub(width)), row, width, 1);
                let mut style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
                if state.focus == Some(*control) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                frame.render_widget(Paragraph::new(label).style(style), button_area);
                hits.record(*control, button_area);
                row += 1;
            }
            _ => {}
        }
    }
}

fn draw_section(frame: &mut Frame, area: Rect, doc: &Document, section: NodeId, state: RenderState, hits: &mut HitMap) {
    let heading = doc
        .query_tag(section, Tag::Header)
        .and_then(|header| doc.query_tag(header, Tag::H2))
        .map(|h| doc.text(h).to_string())
        .unwrap_or_default();
    let list = doc.query_tag(section, Tag::List);
    let droppable = list.is_some_and(|l| doc.has_class(l, DROPPABLE_CLASS));

    let border = if droppable {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    let block = Block::default().borders(Borders::ALL).title(heading).border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hits.record(section, area);

    let Some(list) = list else {
        return;
    };
    hits.record(list, inner);

    let cards = doc.children(list);
    if cards.is_empty() {
        frame.render_widget(
            Paragraph::new("No projects").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let mut y = inner.y;
    for (index, card) in cards.iter().enumerate() {
        if y + CARD_HEIGHT > inner.bottom() {
            let hidden = cards.len() - index;
            if y < inner.bottom() {
                frame.render_widget(
                    Paragraph::new(format!("... {hidden} more")).style(Style::default().fg(Color::DarkGray)),
                    Rect::new(inner.x, y, inner.width, 1),
                );
            }
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        draw_card(frame, card_area, doc, *card, state.dragging == Some(*card));
        hits.record(*card, card_area);
        y += CARD_HEIGHT;
    }
}

fn draw_card(frame: &mut Frame, area: Rect, doc: &Document, card: NodeId, dragging: bool) {
    let text_of = |tag: Tag| doc.query_tag(card, tag).map(|n| doc.text(n)).unwrap_or_default();

    let border = if dragging {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(text_of(Tag::H2).to_string(), Style::default().add_modifier(Modifier::BOLD)))
        .border_style(border);

    let lines = vec![
        Line::from(Span::styled(text_of(Tag::H3).to_string(), Style::default().fg(Color::Cyan))),
        Line::from(text_of(Tag::Paragraph).to_string()),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw a centered modal with `message`
pub fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 40, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Alert")
        .border_style(Style::default().fg(Color::Red));
    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Press Enter to dismiss", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_prefers_innermost() {
        let mut doc = Document::new();
        let outer = doc.create_element(Tag::Section);
        let inner = doc.create_element(Tag::ListItem);

        let mut hits = HitMap::default();
        hits.record(outer, Rect::new(0, 0, 20, 10));
        hits.record(inner, Rect::new(2, 2, 5, 3));

        assert_eq!(hits.hit(3, 3), Some(inner));
        assert_eq!(hits.hit(10, 8), Some(outer));
        assert_eq!(hits.hit(20, 0), None);
    }

    #[test]
    fn test_centered_fits_small_areas() {
        let area = centered(Rect::new(0, 0, 20, 3), 40, 5);
        assert_eq!(area, Rect::new(0, 0, 20, 3));

        let area = centered(Rect::new(0, 0, 100, 40), 40, 5);
        assert_eq!(area, Rect::new(30, 17, 40, 5));
    }
}
