//! The interactive menu loop.
//!
//! Reads from any `BufRead` and writes to any `Write`, so the whole loop can
//! be driven from a string in tests. End of input behaves like "Exit".

use std::io::{self, BufRead, Write};

use bookshelf_core::{BookStatus, Catalog, CatalogError, NewBook, SortKey};

use crate::table::render_books;

/// How many genres and authors the statistics screen lists.
const TOP_N: usize = 5;

pub struct Menu<'a, R, W> {
    catalog: &'a Catalog,
    input: R,
    output: W,
}

enum Flow {
    Continue,
    Exit,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("\nEnter your choice (1-8): ")? else {
                break;
            };
            if let Flow::Exit = self.dispatch(choice.trim())? {
                break;
            }
        }
        writeln!(self.output, "Thank you for using Personal Library Manager!")
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== Library Menu =====")?;
        writeln!(self.output, "1. Add a book")?;
        writeln!(self.output, "2. Remove a book")?;
        writeln!(self.output, "3. Search for books")?;
        writeln!(self.output, "4. List all books")?;
        writeln!(self.output, "5. View library statistics")?;
        writeln!(self.output, "6. Update book status")?;
        writeln!(self.output, "7. Save library")?;
        writeln!(self.output, "8. Exit")
    }

    /// Print `message` and read one line without its line ending.
    /// `None` means input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        let outcome = match choice {
            "1" => self.add_book(),
            "2" => self.remove_book(),
            "3" => self.search_books(),
            "4" => self.list_books(),
            "5" => self.show_stats(),
            "6" => self.update_status(),
            "7" => self.save(),
            "8" => {
                writeln!(self.output, "All changes are already saved.")?;
                return Ok(Flow::Exit);
            }
            _ => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                Ok(Some(()))
            }
        }?;

        // A prompt hit end of input.
        Ok(match outcome {
            Some(()) => Flow::Continue,
            None => Flow::Exit,
        })
    }

    fn add_book(&mut self) -> io::Result<Option<()>> {
        let Some(title) = self.prompt("Enter book title: ")? else {
            return Ok(None);
        };
        let Some(author) = self.prompt("Enter author name: ")? else {
            return Ok(None);
        };
        let Some(isbn) = self.prompt("Enter ISBN (optional): ")? else {
            return Ok(None);
        };
        let Some(genre) = self.prompt("Enter genre (optional): ")? else {
            return Ok(None);
        };
        let Some(year) = self.prompt("Enter publication year (optional): ")? else {
            return Ok(None);
        };
        let Some(status) = self.prompt(
            "Enter status (Available, Borrowed, Read) or press Enter for 'Available': ",
        )?
        else {
            return Ok(None);
        };
        let Some(notes) = self.prompt("Enter any notes (optional): ")? else {
            return Ok(None);
        };

        let input = NewBook {
            title,
            author,
            isbn,
            genre,
            publication_year: parse_year(&year),
            status: (!status.is_empty()).then(|| BookStatus::from(status)),
            notes,
        };

        match self.catalog.add(input) {
            Ok(book) => writeln!(self.output, "Added: {}", book)?,
            Err(e) => writeln!(self.output, "Could not add book: {}", e)?,
        }
        Ok(Some(()))
    }

    fn remove_book(&mut self) -> io::Result<Option<()>> {
        let Some(identifier) = self.prompt("Enter the title or ISBN of the book to remove: ")?
        else {
            return Ok(None);
        };

        match self.catalog.remove(&identifier) {
            Ok(book) => writeln!(self.output, "Removed: {}", book)?,
            Err(e) => self.report(e)?,
        }
        Ok(Some(()))
    }

    fn search_books(&mut self) -> io::Result<Option<()>> {
        let Some(query) = self.prompt("Enter search term (title, author, genre, or ISBN): ")?
        else {
            return Ok(None);
        };

        let results = self.catalog.search(&query);
        writeln!(
            self.output,
            "\nFound {} books matching '{}':",
            results.len(),
            query
        )?;
        write!(self.output, "{}", render_books(&results))?;
        Ok(Some(()))
    }

    fn list_books(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\nSort by:")?;
        writeln!(self.output, "1. Title")?;
        writeln!(self.output, "2. Author")?;
        writeln!(self.output, "3. Publication Year")?;
        writeln!(self.output, "4. Date Added")?;
        let Some(choice) = self.prompt("Enter your choice (1-4) or press Enter for Title: ")?
        else {
            return Ok(None);
        };

        let key = sort_choice(choice.trim());
        let books = self.catalog.list(key);
        if books.is_empty() {
            writeln!(self.output, "Library is empty.")?;
            return Ok(Some(()));
        }

        writeln!(self.output, "\nListing all books sorted by {}:", key.as_str())?;
        write!(self.output, "{}", render_books(&books))?;
        Ok(Some(()))
    }

    fn show_stats(&mut self) -> io::Result<Option<()>> {
        let stats = self.catalog.stats();
        writeln!(self.output, "\n===== Library Statistics =====")?;
        writeln!(self.output, "Total books: {}", stats.total_books)?;

        let Some(breakdown) = stats.breakdown else {
            return Ok(Some(()));
        };

        writeln!(
            self.output,
            "Top genre: {}",
            breakdown.top_genre.as_deref().unwrap_or("N/A")
        )?;
        writeln!(
            self.output,
            "Top author: {}",
            breakdown.top_author.as_deref().unwrap_or("N/A")
        )?;

        writeln!(self.output, "\nBooks by status:")?;
        for (status, count) in &breakdown.statuses {
            writeln!(self.output, "  {}: {}", status, count)?;
        }

        writeln!(self.output, "\nBooks by genre:")?;
        for (genre, count) in top_counts(&breakdown.genres) {
            writeln!(self.output, "  {}: {}", genre, count)?;
        }

        writeln!(self.output, "\nBooks by author:")?;
        for (author, count) in top_counts(&breakdown.authors) {
            writeln!(self.output, "  {}: {}", author, count)?;
        }
        Ok(Some(()))
    }

    fn update_status(&mut self) -> io::Result<Option<()>> {
        let Some(identifier) = self.prompt("Enter the title or ISBN of the book to update: ")?
        else {
            return Ok(None);
        };
        let labels = BookStatus::KNOWN
            .iter()
            .map(|s| s.as_str().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.output, "Available statuses: {}", labels)?;
        let Some(status) = self.prompt("Enter new status: ")? else {
            return Ok(None);
        };

        match self.catalog.update_status(&identifier, status) {
            Ok(book) => writeln!(
                self.output,
                "Updated status of '{}' to '{}'",
                book.title, book.status
            )?,
            Err(e) => self.report(e)?,
        }
        Ok(Some(()))
    }

    fn save(&mut self) -> io::Result<Option<()>> {
        if self.catalog.save() {
            writeln!(self.output, "Library saved to {}", self.catalog.file_path())?;
        } else {
            writeln!(self.output, "Error saving library, see log for details")?;
        }
        Ok(Some(()))
    }

    fn report(&mut self, error: CatalogError) -> io::Result<()> {
        match error {
            CatalogError::NotFound(identifier) => writeln!(
                self.output,
                "Book '{}' not found in library.",
                identifier
            ),
            other => writeln!(self.output, "{}", other),
        }
    }
}

/// Digits-only input becomes a year; anything else (blank, signs, words,
/// overflow) means no year.
pub fn parse_year(input: &str) -> Option<i32> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Menu number to sort key, Title for anything unrecognized.
pub fn sort_choice(choice: &str) -> SortKey {
    match choice {
        "2" => SortKey::Author,
        "3" => SortKey::Year,
        "4" => SortKey::DateAdded,
        _ => SortKey::Title,
    }
}

/// Up to five entries, highest count first; ties keep key order.
fn top_counts(counts: &std::collections::BTreeMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut entries: Vec<_> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries.truncate(TOP_N);
    entries
}
