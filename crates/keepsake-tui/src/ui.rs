//! Rendering routines for the Keepsake TUI.

use crate::app::{App, Card, Dialog, FormField, Page};
use keepsake_core::MemoryRecord;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

// ── Theme colors ──────────────────────────────────────────────────────

const PRIMARY: Color = Color::Rgb(94, 177, 191); // #5EB1BF
const SECONDARY: Color = Color::Rgb(237, 179, 107); // #EDB36B
const TEXT: Color = Color::Rgb(234, 234, 234); // #eaeaea
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c
const BORDER_ACTIVE: Color = Color::Rgb(94, 177, 191); // #5EB1BF

const HEADER_HEIGHT: u16 = 5; // 3 inner lines + 2 border lines

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HERO_ART: [&str; 2] = [
    " █▄▀ █▀▀ █▀▀ █▀█ █▀ ▄▀█ █▄▀ █▀▀",
    " █ █ ██▄ ██▄ █▀▀ ▄█ █▀█ █ █ ██▄",
];

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header bar
            Constraint::Min(0),                // active screen
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    match app.page {
        Page::Home => draw_home(frame, root[1]),
        Page::Submit => draw_submit(frame, app, root[1]),
        Page::Wall => draw_wall(frame, app, root[1]),
    }
    draw_status_bar(frame, app, root[2]);

    if let Some(dialog) = app.dialog.as_ref() {
        draw_dialog(frame, dialog, root[1]);
    }
}

/// Draw the header with the banner and the active slot path.
fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let art_style = Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'_>> = vec![
        Line::from(Span::styled(HERO_ART[0], art_style)),
        Line::from(vec![
            Span::styled(HERO_ART[1], art_style),
            Span::styled(format!("  v{VERSION}"), Style::default().fg(TEXT_MUTED)),
        ]),
    ];
    lines.push(Line::from(vec![
        Span::styled("  slot ", Style::default().fg(TEXT_MUTED)),
        Span::styled(app.slot_path.as_str(), Style::default().fg(TEXT)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the landing screen.
fn draw_home(frame: &mut Frame<'_>, area: Rect) {
    let block = screen_block(" Keepsake ", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  A local time capsule for short memories.",
            Style::default().fg(TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  s", key_style()),
            Span::styled("  share a memory", Style::default().fg(TEXT_MUTED)),
        ]),
        Line::from(vec![
            Span::styled("  w", key_style()),
            Span::styled("  view the memory wall", Style::default().fg(TEXT_MUTED)),
        ]),
        Line::from(vec![
            Span::styled("  q", key_style()),
            Span::styled("  quit", Style::default().fg(TEXT_MUTED)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the submission form.
fn draw_submit(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = screen_block(" Share a Memory ", app.dialog.is_none());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line<'_>> = vec![Line::from("")];
    for field in FormField::ALL {
        lines.push(form_field_line(app, field));
        lines.push(Line::from(""));
    }
    if app.submitting {
        lines.push(Line::from(Span::styled(
            "  Saving your memory...",
            Style::default().fg(SECONDARY),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Build the rendered line for one form field.
fn form_field_line(app: &App, field: FormField) -> Line<'static> {
    let focused = app.form.focus == Some(field) && app.dialog.is_none() && !app.submitting;
    let label_style = if focused {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MUTED)
    };
    let value = app.form.value(field).to_string();
    let mut spans = vec![
        Span::styled(if focused { " " } else { "  " }, label_style),
        Span::styled(format!("{:<12}", field.label()), label_style),
        Span::styled(value.clone(), Style::default().fg(TEXT)),
    ];
    if field == FormField::Year {
        let hint = if focused {
            "  ←/→ to choose"
        } else if value.is_empty() {
            "  (not selected)"
        } else {
            ""
        };
        spans.push(Span::styled(hint, Style::default().fg(TEXT_MUTED)));
    } else if focused {
        spans.push(Span::styled("▏", Style::default().fg(PRIMARY)));
    }
    Line::from(spans)
}

/// Draw the memory wall.
fn draw_wall(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = screen_block(" Memory Wall ", app.dialog.is_none());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.wall.is_empty() {
        let placeholder = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No memories yet. Be the first to share one!",
                Style::default().fg(TEXT_MUTED),
            )),
        ];
        frame.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut selected_offset = 0;
    for (index, card) in app.wall.cards.iter().enumerate() {
        if index == app.wall.selected {
            selected_offset = lines.len();
        }
        lines.extend(card_lines(card, index == app.wall.selected));
    }

    // Keep the selected card in view.
    let scroll = (selected_offset as u16).saturating_sub(1).min(
        (lines.len() as u16).saturating_sub(inner.height),
    );
    let wall = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(wall, inner);
}

/// Build the rendered lines for a single memory card.
///
/// A record without an image renders no image line; one with an image
/// renders exactly one. The emoji badge appears only when present and
/// non-empty, and the details panel only while the card is expanded.
pub fn card_lines(card: &Card, selected: bool) -> Vec<Line<'static>> {
    let record = &card.record;
    let marker_style = if selected {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER)
    };
    let marker = if selected { " ▌" } else { "  " };

    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(record.name.clone(), Style::default().fg(TEXT_MUTED)),
        Span::styled("  ", Style::default()),
        Span::styled(
            format!(" {} ", record.category),
            Style::default().fg(Color::Rgb(20, 20, 20)).bg(SECONDARY),
        ),
    ]));

    let mut title_spans = vec![
        Span::styled(marker, marker_style),
        Span::styled(
            record.title.clone(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(emoji) = record.emoji.as_deref().filter(|emoji| !emoji.is_empty()) {
        title_spans.push(Span::styled(
            format!(" {emoji}"),
            Style::default().fg(TEXT),
        ));
    }
    lines.push(Line::from(title_spans));

    lines.push(Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(record.description.clone(), Style::default().fg(TEXT)),
    ]));

    if record.image.is_some() {
        lines.push(Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled("[image attached]", Style::default().fg(SECONDARY)),
        ]));
    }

    if card.expanded {
        for detail in detail_lines(record) {
            let mut spans = vec![Span::styled(marker, marker_style)];
            spans.push(detail);
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    lines
}

/// Details panel content shown while a card is expanded.
pub fn detail_lines(record: &MemoryRecord) -> [Span<'static>; 2] {
    [
        Span::styled(
            format!("Year: {} | Department: {}", record.year, record.department),
            Style::default().fg(TEXT_MUTED),
        ),
        Span::styled(
            format!("Shared on: {}", record.date_created),
            Style::default().fg(TEXT_MUTED),
        ),
    ]
}

/// Draw a blocking dialog centered over the screen area.
fn draw_dialog(frame: &mut Frame<'_>, dialog: &Dialog, area: Rect) {
    let (title, lines, hint) = match dialog {
        Dialog::ValidationErrors(errors) => {
            let mut lines: Vec<Line<'_>> = vec![
                Line::from(Span::styled(
                    " Please fix the following errors:",
                    Style::default().fg(TEXT),
                )),
                Line::from(""),
            ];
            for error in errors {
                lines.push(Line::from(Span::styled(
                    format!("  • {error}"),
                    Style::default().fg(SECONDARY),
                )));
            }
            (" Invalid Submission ", lines, "Enter/Esc to close")
        }
        Dialog::SubmitError(message) => (
            " Submission Failed ",
            vec![
                Line::from(Span::styled(
                    format!(" {message}"),
                    Style::default().fg(SECONDARY),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    " Nothing was saved. Fix the problem and try again.",
                    Style::default().fg(TEXT_MUTED),
                )),
            ],
            "Enter/Esc to close",
        ),
        Dialog::Saved => (
            " Memory Saved ",
            vec![Line::from(Span::styled(
                " Your memory has been saved to the time capsule!",
                Style::default().fg(TEXT),
            ))],
            "Enter to continue",
        ),
        Dialog::ConfirmWall => (
            " View the Wall? ",
            vec![Line::from(Span::styled(
                " Would you like to view your memory on the Memory Wall?",
                Style::default().fg(TEXT),
            ))],
            "y yes  n no",
        ),
    };

    let width = area.width.saturating_sub(2).min(60);
    let height = (lines.len() as u16 + 4).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let mut content = lines;
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        format!(" {hint}"),
        Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PRIMARY))
        .title(Span::styled(
            title,
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(block),
        popup,
    );
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let shortcuts: Vec<Span<'_>> = match app.page {
        Page::Home => vec![
            Span::styled(" s", key_style()),
            Span::styled(" submit", hint_style()),
            Span::styled("  w", key_style()),
            Span::styled(" wall", hint_style()),
            Span::styled("  q", key_style()),
            Span::styled(" quit", hint_style()),
        ],
        Page::Submit => vec![
            Span::styled(" ↑/↓", key_style()),
            Span::styled(" field", hint_style()),
            Span::styled("  Ctrl+S", key_style()),
            Span::styled(" submit", hint_style()),
            Span::styled("  Esc", key_style()),
            Span::styled(" back", hint_style()),
        ],
        Page::Wall => vec![
            Span::styled(" ↑/↓", key_style()),
            Span::styled(" select", hint_style()),
            Span::styled("  Enter", key_style()),
            Span::styled(" expand", hint_style()),
            Span::styled("  r", key_style()),
            Span::styled(" reload", hint_style()),
            Span::styled("  Esc", key_style()),
            Span::styled(" back", hint_style()),
        ],
    };

    let right_text = format!(" {} ", app.status);
    let right_len = right_text.len() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len,
        ..area
    };

    let status_color = match app.status.as_str() {
        "saving" => SECONDARY,
        "idle" => TEXT_MUTED,
        _ => PRIMARY,
    };
    frame.render_widget(Paragraph::new(Line::from(shortcuts)), left_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(status_color),
        ))),
        right_area,
    );
}

/// Bordered block for the active screen.
fn screen_block(title: &'static str, active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if active { BORDER_ACTIVE } else { BORDER }))
        .title(Span::styled(
            title,
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ))
}

fn key_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}

fn hint_style() -> Style {
    Style::default().fg(BORDER)
}

#[cfg(test)]
mod tests {
    use super::{card_lines, detail_lines};
    use crate::app::Card;
    use keepsake_core::MemoryRecord;
    use pretty_assertions::assert_eq;

    fn record() -> MemoryRecord {
        MemoryRecord {
            id: 1714521600000,
            name: "Sam".to_string(),
            year: "Junior".to_string(),
            department: "CS".to_string(),
            title: "Finals Week".to_string(),
            description: "Survived on no sleep".to_string(),
            category: "Pain".to_string(),
            emoji: None,
            image: None,
            date_created: "5/1/2024".to_string(),
            timestamp: 1714521600000,
        }
    }

    fn rendered_text(card: &Card) -> String {
        card_lines(card, false)
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
                    + "\n"
            })
            .collect()
    }

    #[test]
    fn collapsed_card_shows_content_without_details() {
        let card = Card {
            record: record(),
            expanded: false,
        };
        let text = rendered_text(&card);
        assert!(text.contains("Sam"));
        assert!(text.contains("Pain"));
        assert!(text.contains("Finals Week"));
        assert!(text.contains("Survived on no sleep"));
        assert!(!text.contains("Year: Junior"));
        assert!(!text.contains("Shared on:"));
    }

    #[test]
    fn expanded_card_appends_the_details_panel() {
        let card = Card {
            record: record(),
            expanded: true,
        };
        let text = rendered_text(&card);
        assert!(text.contains("Year: Junior | Department: CS"));
        assert!(text.contains("Shared on: 5/1/2024"));
    }

    #[test]
    fn toggling_back_removes_exactly_the_details_lines() {
        let expanded = Card {
            record: record(),
            expanded: true,
        };
        let collapsed = Card {
            record: record(),
            expanded: false,
        };
        let expanded_lines = card_lines(&expanded, false);
        let collapsed_lines = card_lines(&collapsed, false);
        assert_eq!(expanded_lines.len(), collapsed_lines.len() + 2);
    }

    #[test]
    fn image_line_appears_exactly_once_iff_image_present() {
        let without = Card {
            record: record(),
            expanded: false,
        };
        assert_eq!(rendered_text(&without).matches("[image attached]").count(), 0);

        let mut with_image = record();
        with_image.image = Some("data:image/png;base64,AAAA".to_string());
        let with = Card {
            record: with_image,
            expanded: false,
        };
        assert_eq!(rendered_text(&with).matches("[image attached]").count(), 1);
    }

    #[test]
    fn emoji_badge_appears_only_when_non_empty() {
        let mut with_emoji = record();
        with_emoji.emoji = Some("💀".to_string());
        let card = Card {
            record: with_emoji,
            expanded: false,
        };
        assert!(rendered_text(&card).contains("💀"));

        let mut empty_emoji = record();
        empty_emoji.emoji = Some(String::new());
        let card = Card {
            record: empty_emoji,
            expanded: false,
        };
        assert!(!rendered_text(&card).contains("💀"));
    }

    #[test]
    fn detail_lines_use_the_original_wording() {
        let record = record();
        let [meta, shared] = detail_lines(&record);
        assert_eq!(meta.content.as_ref(), "Year: Junior | Department: CS");
        assert_eq!(shared.content.as_ref(), "Shared on: 5/1/2024");
    }
}
