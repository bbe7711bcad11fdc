//! Rendering of the signup form.

use crossterm::style::Stylize;
use signup::{
    Feedback, FieldKind, FieldView, QueryAdapter, SUCCESS_INDICATOR, Sink, Status, job_type_label,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, Focus};

/// Width of the label column.
const LABEL_WIDTH: usize = 15;

/// Width of a text input box, without its brackets.
const INPUT_WIDTH: usize = 28;

/// Narrowest rule drawn around the alert panel.
const MIN_RULE_WIDTH: usize = 24;

const CURSOR: char = '_';

const HELP: &str = "tab/shift+tab move · ←/→ choose · space toggle · enter submit · esc quit";

/// Renders the whole screen.
pub fn render<Q: QueryAdapter, S: Sink>(app: &App<Q, S>) -> String {
    let mut lines = vec![String::new(), format!("  {}", "Sign up".bold()), String::new()];

    for view in app.form().views() {
        let focused = app.focus() == Focus::Field(view.name);
        field_lines(&view, focused, &mut lines);
    }

    lines.push(String::new());
    lines.push(submit_line(app.form().submit_label(), app.focus() == Focus::Submit));

    if let Some(notice) = app.notice() {
        lines.push(String::new());
        lines.push(format!("  {}", notice.yellow()));
    }

    if let Some(alert) = app.alert() {
        lines.push(String::new());
        alert_lines(alert, usize::from(app.width()), &mut lines);
    }

    lines.push(String::new());
    let query = app.form().query().read();
    let search = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };
    lines.push(format!("  {} {}", "query:".dim(), search));
    lines.push(format!("  {}", HELP.dim()));

    lines.join("\n")
}

fn field_lines(view: &FieldView, focused: bool, lines: &mut Vec<String>) {
    let marker = if focused { ">".cyan().bold().to_string() } else { " ".to_string() };

    let line = match view.kind {
        FieldKind::Text => {
            let text = view.value.as_text().unwrap_or_default();
            let input = if focused {
                fit(&format!("{text}{CURSOR}"), INPUT_WIDTH)
            } else if text.is_empty() {
                fit(view.placeholder, INPUT_WIDTH).dim().to_string()
            } else {
                fit(text, INPUT_WIDTH)
            };
            format!(
                "{marker} {} [{input}]{}",
                label(view),
                indicator(&view.feedback)
            )
        }
        FieldKind::Select => {
            let value = view.value.as_text().unwrap_or_default();
            let choice = job_type_label(value).unwrap_or(value);
            let choice = fit(choice, INPUT_WIDTH - 4);
            let choice = if value.is_empty() {
                choice.dim().to_string()
            } else {
                choice
            };
            format!(
                "{marker} {} < {choice} >{}",
                label(view),
                indicator(&view.feedback)
            )
        }
        FieldKind::Checkbox => {
            let mark = if view.value.as_bool().unwrap_or(false) { "x" } else { " " };
            let text = match view.status {
                Some(Status::Invalid) => view.label.red().to_string(),
                _ => view.label.to_string(),
            };
            format!("{marker} [{mark}] {text}")
        }
    };
    lines.push(line);

    if let Feedback::Invalid(message) = &view.feedback {
        let indent = " ".repeat(2 + LABEL_WIDTH + 2);
        lines.push(format!("{indent}{}", message.as_str().red()));
    }
}

fn label(view: &FieldView) -> String {
    let padded = pad(view.label, LABEL_WIDTH);
    match view.status {
        Some(Status::Valid) => padded.green().to_string(),
        Some(Status::Invalid) => padded.red().to_string(),
        None => padded,
    }
}

fn indicator(feedback: &Feedback) -> String {
    match feedback {
        Feedback::Valid => format!(" {}", SUCCESS_INDICATOR.green()),
        Feedback::Hidden | Feedback::Invalid(_) => String::new(),
    }
}

fn submit_line(label: &str, focused: bool) -> String {
    let button = format!("[ {label} ]");
    if focused {
        format!("{} {}", ">".cyan().bold(), button.reverse())
    } else {
        format!("  {button}")
    }
}

fn alert_lines(record: &str, width: usize, lines: &mut Vec<String>) {
    let rule_width = width.saturating_sub(4).max(MIN_RULE_WIDTH);
    let title = " Submitted ";
    let top = format!(
        "┌{title}{}",
        "─".repeat(rule_width.saturating_sub(title.width() + 1))
    );
    lines.push(format!("  {}", top.green()));
    for line in record.lines() {
        lines.push(format!("  {} {line}", "│".green()));
    }
    lines.push(format!(
        "  {} {}",
        "└".green(),
        "press any key to continue".dim()
    ));
}

/// Pads `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// Fits `text` into exactly `width` display columns, keeping its end visible.
fn fit(text: &str, width: usize) -> String {
    let mut kept = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        kept.push(c);
    }
    let mut out: String = kept.into_iter().rev().collect();
    out.push_str(&" ".repeat(width - used));
    out
}
