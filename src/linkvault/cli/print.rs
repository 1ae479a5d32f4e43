use chrono::{DateTime, Utc};
use colored::Colorize;
use linkvault::model::Note;
use std::path::Path;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

/// One row per note: index, relative path, tags, then modification time
/// right-aligned.
pub(super) fn print_notes(root: &Path, notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for (i, note) in notes.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let location = relative_name(root, note);
        let tags: Vec<String> = note.tags().iter().map(|t| format!("#{}", t)).collect();
        let label = if tags.is_empty() {
            location
        } else {
            format!("{} {}", location, tags.join(" "))
        };

        let time_ago = note
            .modified()
            .map(format_time_ago)
            .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        println!(
            "{}{}{}{}",
            idx_str.dimmed(),
            colorize_label(&label_display),
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

/// Tags after the first `#` are cyan.
fn colorize_label(label: &str) -> String {
    match label.find(" #") {
        Some(split) => format!("{}{}", &label[..split], label[split..].cyan()),
        None => label.to_string(),
    }
}

pub(super) fn print_note(root: &Path, note: &Note) {
    println!("{}", note.name().bold());
    println!("{}", relative_name(root, note).dimmed());
    if let Some(error) = note.frontmatter_error() {
        print_warning(&format!("Frontmatter ignored: {}", error));
    }
    if !note.metadata().is_empty() {
        for (key, value) in note.metadata().iter() {
            println!("{}: {}", key.cyan(), value);
        }
    }
    println!("--------------------------------");
    println!("{}", note.body());
}

/// Each link target, green when a note answers to it, red otherwise.
pub(super) fn print_links(links: &[(String, bool)]) {
    if links.is_empty() {
        println!("No links found.");
        return;
    }
    for (target, exists) in links {
        let link = format!("[[{}]]", target);
        if *exists {
            println!("  {}", link.green());
        } else {
            println!("  {} {}", link.red(), "(missing)".dimmed());
        }
    }
}

pub(super) fn print_config(entries: &[(&str, Option<String>)]) {
    for (key, value) in entries {
        match value {
            Some(value) => println!("{} = {}", key, value),
            None => println!("{} = {}", key, "(unset)".dimmed()),
        }
    }
}

fn relative_name(root: &Path, note: &Note) -> String {
    note.path()
        .strip_prefix(root)
        .unwrap_or(note.path())
        .display()
        .to_string()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
