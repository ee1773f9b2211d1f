//! View Rendering
//!
//! Buffer-level drawing for the three surface states: the welcome
//! screen, the in-flight indicator, and a flattened element list.
//! Everything is line-oriented: elements render top to bottom with a
//! blank line between them, wrapped to the available width.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::screen::{Element, Screen};
use crate::theme;

/// Idle state: the original app's welcome copy.
pub fn render_welcome(buf: &mut Buffer, area: Rect) {
    if area.height < 4 {
        return;
    }
    let y = area.y + area.height / 3;
    buf.set_string(
        area.x + 2,
        y,
        "Welcome to",
        Style::default().fg(theme::BODY),
    );
    buf.set_string(
        area.x + 2,
        y + 1,
        "Adaptive Interface",
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    );
    buf.set_string(
        area.x + 2,
        y + 3,
        "[Enter] Start   [Esc] Quit",
        Style::default().fg(theme::DIM_GRAY),
    );
}

/// Awaiting state indicator.
pub fn render_loading(buf: &mut Buffer, area: Rect) {
    if area.height == 0 {
        return;
    }
    buf.set_string(
        area.x + 2,
        area.y + area.height / 2,
        "Contacting agent...",
        Style::default().fg(theme::ACCENT_DEEP),
    );
}

/// Displaying state: draw the element list, highlighting the focused
/// element. Returns the number of lines used.
pub fn render_screen(buf: &mut Buffer, area: Rect, screen: &Screen) -> u16 {
    let width = area.width.saturating_sub(4) as usize;
    if width < 10 || area.height < 2 {
        return 0;
    }

    let mut y = area.y + 1;
    let bottom = area.y + area.height;

    for (index, element) in screen.elements().iter().enumerate() {
        if y >= bottom {
            break;
        }
        let focused = screen.focused() == Some(index);
        y = render_element(buf, area.x + 2, y, bottom, width, element, focused);
        y += 1; // blank line between elements
    }
    y.saturating_sub(area.y)
}

fn render_element(
    buf: &mut Buffer,
    x: u16,
    mut y: u16,
    bottom: u16,
    width: usize,
    element: &Element,
    focused: bool,
) -> u16 {
    match element {
        Element::Text { content } => {
            for line in textwrap::wrap(content, width) {
                if y >= bottom {
                    break;
                }
                buf.set_string(x, y, line.as_ref(), Style::default().fg(theme::BODY));
                y += 1;
            }
        }
        Element::Button { title, .. } => {
            let label = format!("[ {title} ]");
            let style = if focused {
                Style::default()
                    .fg(theme::FOCUS)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme::ACCENT)
            };
            buf.set_string(x, y, &label, style);
            y += 1;
        }
        Element::Input {
            field,
            placeholder,
            value,
            ..
        } => {
            let label = field.as_deref().unwrap_or("field");
            let body = if value.is_empty() && !focused {
                format!("{label} > {placeholder}")
            } else if focused {
                format!("{label} > {value}_")
            } else {
                format!("{label} > {value}")
            };
            let style = if focused {
                Style::default().fg(theme::INPUT_GREEN).add_modifier(Modifier::BOLD)
            } else if value.is_empty() {
                Style::default().fg(theme::DIM_GRAY)
            } else {
                Style::default().fg(theme::INPUT_GREEN)
            };
            for line in textwrap::wrap(&body, width) {
                if y >= bottom {
                    break;
                }
                buf.set_string(x, y, line.as_ref(), style);
                y += 1;
            }
        }
        Element::Image { source } => {
            let placeholder = format!("[image: {source}]");
            buf.set_string(x, y, &placeholder, Style::default().fg(theme::DIM_GRAY));
            y += 1;
        }
    }
    y
}

/// Bottom status line: key hints or the last turn error.
pub fn render_status(buf: &mut Buffer, area: Rect, hint: &str, error: Option<&str>) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height - 1;
    match error {
        Some(error) => {
            let line = format!(" error: {error}");
            buf.set_string(area.x, y, &line, Style::default().fg(theme::ERROR_RED));
        }
        None => {
            buf.set_string(area.x, y, hint, Style::default().fg(theme::DIM_GRAY));
        }
    }
}
