//! Plain-text rendering of screens.

use std::fmt::Display;
use std::fmt::Write;

use console_lib::Notification;
use console_lib::grid::{Alignment, CheckState, GridView, PageInfo, Tone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const GAP: &str = "  ";
const ELLIPSIS: char = '…';

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    }
}

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push(ELLIPSIS);
    }
    out
}

/// Pad `text` to exactly `width` columns.
fn fit(text: &str, width: usize, align: Alignment) -> String {
    let text = truncate(text, width);
    let pad = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{text}{}", " ".repeat(pad)),
        Alignment::Right => format!("{}{text}", " ".repeat(pad)),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

fn footer(info: &PageInfo, selected: usize) -> String {
    let rows = match info.range {
        Some((first, last)) => format!("Rows {first}-{last} of {}", info.total_count),
        None => "No rows".to_string(),
    };
    let mut line = rows;
    if let Some(size) = info.page_size {
        let options: Vec<String> = info
            .size_options
            .iter()
            .map(|option| {
                if *option == size {
                    format!("({option})")
                } else {
                    option.to_string()
                }
            })
            .collect();
        let _ = write!(
            line,
            " | Page {}/{} | Size {}",
            (info.page_index + 1).min(info.page_count.max(1)),
            info.page_count.max(1),
            options.join(" ")
        );
    }
    let _ = write!(line, " | {selected} selected");
    line
}

/// Render one grid page as a text table with a pagination footer.
pub fn grid<K: Display>(title: &str, view: &GridView<K>) -> String {
    let keys: Vec<String> = view.rows.iter().map(|row| row.key.to_string()).collect();
    let key_width = keys.iter().map(|k| k.width()).max().unwrap_or(0).max(2);

    let headers: Vec<String> = view
        .header
        .iter()
        .map(|cell| match cell.sorted {
            Some(direction) => format!("{} {}", cell.label, direction.indicator()),
            None => cell.label.clone(),
        })
        .collect();

    let widths: Vec<usize> = view
        .header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell.width {
            Some(width) => usize::from(width),
            None => view
                .rows
                .iter()
                .map(|row| row.cells.get(i).map_or(0, |c| c.width()))
                .max()
                .unwrap_or(0)
                .max(headers[i].width()),
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{title}");
    if !view.filter.is_empty() {
        let _ = write!(out, " (filter: {})", view.filter);
    }
    out.push('\n');

    let mut line = format!("{}{GAP}{}", checkbox(view.select_all), fit("Id", key_width, Alignment::Right));
    for ((cell, label), width) in view.header.iter().zip(&headers).zip(&widths) {
        line.push_str(GAP);
        line.push_str(&fit(label, *width, cell.align));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    if view.rows.is_empty() {
        out.push_str("No records.\n");
    }

    for (row, key) in view.rows.iter().zip(&keys) {
        let check = if !row.eligible {
            "   "
        } else if row.selected {
            checkbox(CheckState::Checked)
        } else {
            checkbox(CheckState::Unchecked)
        };
        let mut line = format!("{check}{GAP}{}", fit(key, key_width, Alignment::Right));
        for ((cell, text), width) in view.header.iter().zip(&row.cells).zip(&widths) {
            line.push_str(GAP);
            line.push_str(&fit(text, *width, cell.align));
        }
        if let Some(annotation) = &row.annotation {
            let marker = match annotation.tone {
                Tone::Warning => "!",
                Tone::Highlight => "*",
                Tone::Muted | Tone::Normal => "",
            };
            if let Some(note) = &annotation.note {
                let _ = write!(line, "{GAP}{marker}({note})");
            } else if !marker.is_empty() {
                let _ = write!(line, "{GAP}{marker}");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&footer(&view.pagination, view.selected_count));
    out.push('\n');
    out
}

/// Render queued notifications, one per line.
pub fn notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| format!("[{}] {}\n", n.severity, n.message))
        .collect()
}

/// Render a record as aligned label/value lines.
pub fn detail(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(label, _)| label.width()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{}{GAP}{value}\n", fit(label, width, Alignment::Left)))
        .collect()
}

#[cfg(test)]
mod tests {
    use console_lib::grid::{Column, Grid, GridConfig};
    use console_lib::model::User;

    use super::*;

    fn sample() -> Grid<User> {
        let mut protected = User::new(3, "Root", "Admin", "root@example.com");
        protected.protected = true;
        let rows = vec![
            User::new(1, "Grace", "Hopper", "grace@example.com"),
            User::new(2, "Ada", "Lovelace", "ada@example.com"),
            protected,
        ];
        Grid::new(vec![
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").width(10),
        ])
        .with_config(GridConfig::default().with_page_sizes([2, 10]).with_default_page_size(2))
        .with_rows(rows)
        .eligibility(|user: &User| !user.protected)
    }

    #[test]
    fn test_fit_pads_by_display_width() {
        assert_eq!(fit("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(fit("ab", 4, Alignment::Right), "  ab");
        assert_eq!(fit("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(fit("日本", 6, Alignment::Left), "日本  ");
        assert_eq!(fit("abcdef", 4, Alignment::Left), "abc…");
    }

    #[test]
    fn test_grid_table() {
        let mut grid = sample();
        grid.sort_by("name");
        grid.toggle(&2);
        let text = grid_text(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Users");
        assert_eq!(lines[1], "[-]  Id  Name ▲        Email");
        assert_eq!(lines[2], "[x]   2  Ada Lovelace  ada@examp…");
        assert_eq!(lines[3], "[ ]   1  Grace Hopper  grace@exa…");
        assert_eq!(lines[4], "Rows 1-2 of 3 | Page 1/2 | Size (2) 10 | 1 selected");
    }

    #[test]
    fn test_ineligible_rows_have_no_checkbox() {
        let mut grid = sample();
        grid.next_page();
        let text = grid_text(&grid);
        assert!(text.lines().any(|line| line.starts_with("      3  Root Admin")));
    }

    #[test]
    fn test_empty_grid() {
        let mut grid = sample();
        grid.set_filter("nobody");
        let text = grid_text(&grid);
        assert!(text.contains("(filter: nobody)"));
        assert!(text.contains("No records."));
        assert!(text.contains("No rows | Page 1/1"));
    }

    #[test]
    fn test_notifications_and_detail() {
        let text = notifications(&[Notification::success("Delete users: 2 succeeded, 0 failed")]);
        assert_eq!(text, "[success] Delete users: 2 succeeded, 0 failed\n");

        let text = detail(&[("Id", "7".to_string()), ("Email", "a@b.c".to_string())]);
        assert_eq!(text, "Id     7\nEmail  a@b.c\n");
    }

    fn grid_text(grid: &Grid<User>) -> String {
        super::grid("Users", &grid.view())
    }
}
