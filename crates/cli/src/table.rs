//! Fixed-width table rendering for book lists.

use bookshelf_core::Book;

const TITLE_WIDTH: usize = 40;
const AUTHOR_WIDTH: usize = 25;
const YEAR_WIDTH: usize = 10;
const GENRE_WIDTH: usize = 15;
const STATUS_WIDTH: usize = 10;
const RULE_WIDTH: usize = 100;

/// Cut `text` to `keep` characters plus `...` when it is longer than `keep`.
pub fn truncate(text: &str, keep: usize) -> String {
    if text.chars().count() > keep {
        let mut cut: String = text.chars().take(keep).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

fn row(title: &str, author: &str, year: &str, genre: &str, status: &str) -> String {
    format!(
        "{:<tw$} {:<aw$} {:<yw$} {:<gw$} {:<sw$}",
        title,
        author,
        year,
        genre,
        status,
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH,
        yw = YEAR_WIDTH,
        gw = GENRE_WIDTH,
        sw = STATUS_WIDTH,
    )
}

/// Render books as a table, or a short notice when there are none.
pub fn render_books(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books to display.\n".to_string();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&row("Title", "Author", "Year", "Genre", "Status"));
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for book in books {
        let year = book
            .publication_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        out.push_str(&row(
            &truncate(&book.title, TITLE_WIDTH - 3),
            &truncate(&book.author, AUTHOR_WIDTH - 3),
            &year,
            &truncate(&book.genre, GENRE_WIDTH - 3),
            book.status.as_str(),
        ));
        out.push('\n');
    }
    out
}
