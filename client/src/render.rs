//! Plain-text rendering of frames for the terminal.

use crate::controller::{Frame, Notice, NoticeLevel};
use shelf_engine::{Book, FieldErrors};
use std::fmt::Write;

/// Shown in place of the list when the page is empty.
pub const EMPTY_PAGE: &str = "No books found \u{2014} add one.";

/// Render a frame: status line, toast, one line per book, page indicator.
pub fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();

    if let Some(status) = &frame.status {
        let _ = writeln!(out, "{}", notice_line(status));
    }
    if let Some(toast) = &frame.toast {
        let _ = writeln!(out, "{}", notice_line(toast));
    }

    if frame.items.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_PAGE);
    } else {
        for book in &frame.items {
            let _ = writeln!(out, "{}", book_line(book));
        }
    }

    if frame.total_pages > 1 {
        let pages: Vec<String> = (1..=frame.total_pages)
            .map(|p| {
                if p == frame.page {
                    format!("[{}]", p)
                } else {
                    p.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "Pages: {}", pages.join(" "));
    }

    out
}

/// `#<id>  <title> — by <author>`
pub fn book_line(book: &Book) -> String {
    format!("#{}  {} \u{2014} by {}", book.id, book.title, book.author)
}

/// Confirmation text shown before deleting.
pub fn delete_prompt(book: &Book) -> String {
    format!(
        "Are you sure you want to delete \"{}\" by {}?",
        book.title, book.author
    )
}

/// One line per failing field.
pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    if let Some(msg) = &errors.title {
        let _ = writeln!(out, "title: {}", msg);
    }
    if let Some(msg) = &errors.author {
        let _ = writeln!(out, "author: {}", msg);
    }
    out
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Degraded => "warn",
        NoticeLevel::Loading => "..",
    };
    format!("[{}] {}", tag, notice.message)
}
