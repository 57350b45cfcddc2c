use std::io::{BufRead, Write};

use clap::Args;
use tracing::debug;

use crate::catalog::store::{Catalog, CatalogConfig, CatalogStats, DEFAULT_CAPACITY};
use crate::cli::OutputFormat;
use crate::core::book::{sample_books, Book};
use crate::utils::validation::{validate_isbn, validate_text_field};

#[derive(Args)]
pub struct ShellArgs {
    /// Number of hash buckets (must be at least 1)
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Start with an empty catalog instead of the sample books
    #[arg(long)]
    pub empty: bool,
}

const MENU: &str = "\
1. Add a book
2. Find a book by ISBN
3. Remove a book
4. Display all books
5. Count the number of books
6. Get books by author
7. Display all books sorted by ISBN
8. Show index statistics
9. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Find,
    Remove,
    DisplayAll,
    Count,
    ByAuthor,
    DisplaySorted,
    Stats,
    Exit,
}

impl MenuChoice {
    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Find),
            "3" => Some(Self::Remove),
            "4" => Some(Self::DisplayAll),
            "5" => Some(Self::Count),
            "6" => Some(Self::ByAuthor),
            "7" => Some(Self::DisplaySorted),
            "8" => Some(Self::Stats),
            "9" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub fn run(args: ShellArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut catalog = Catalog::with_config(&CatalogConfig {
        capacity: args.capacity,
    })?;

    if !args.empty {
        for book in sample_books() {
            catalog.insert(book)?;
        }
    }

    if verbose {
        eprintln!(
            "Started catalog with {} books in {} buckets",
            catalog.count_books(),
            catalog.capacity()
        );
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(&mut catalog, stdin.lock(), stdout.lock(), format).run()
}

/// Menu-driven session over any line reader and writer
pub struct Shell<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            catalog,
            input,
            output,
            format,
        }
    }

    /// Run until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice (1-9): ")? else {
                break;
            };

            let keep_going = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Exit) => false,
                Some(choice) => self.dispatch(choice)?,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
            writeln!(self.output)?;
        }

        debug!(books = self.catalog.count_books(), "Shell session finished");
        self.output.flush()?;
        Ok(())
    }

    /// Carry out one menu action. Returns false when input ran out mid-action.
    fn dispatch(&mut self, choice: MenuChoice) -> anyhow::Result<bool> {
        match choice {
            MenuChoice::Add => self.add_book(),
            MenuChoice::Find => self.find_book(),
            MenuChoice::Remove => self.remove_book(),
            MenuChoice::DisplayAll => {
                writeln!(self.output, "All books in the catalog:")?;
                for book in self.catalog.list_all() {
                    write_book(&mut self.output, book, self.format)?;
                }
                Ok(true)
            }
            MenuChoice::Count => {
                writeln!(
                    self.output,
                    "Number of books in the catalog: {}",
                    self.catalog.count_books()
                )?;
                Ok(true)
            }
            MenuChoice::ByAuthor => self.books_by_author(),
            MenuChoice::DisplaySorted => {
                writeln!(self.output, "All books sorted by ISBN:")?;
                for book in self.catalog.list_sorted() {
                    write_book(&mut self.output, book, self.format)?;
                }
                Ok(true)
            }
            MenuChoice::Stats => {
                write_stats(&mut self.output, &self.catalog.stats(), self.format)?;
                Ok(true)
            }
            MenuChoice::Exit => Ok(false),
        }
    }

    fn add_book(&mut self) -> anyhow::Result<bool> {
        let Some(isbn) = self.prompt_isbn("Enter the ISBN: ")? else {
            return Ok(false);
        };
        // Reject duplicates before asking for the rest
        if self.catalog.find_book(&isbn).is_some() {
            writeln!(self.output, "A book with ISBN {isbn} already exists.")?;
            return Ok(true);
        }

        let Some(raw_title) = self.prompt("Enter the title: ")? else {
            return Ok(false);
        };
        let title = match validate_text_field("Title", &raw_title) {
            Ok(title) => title,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(true);
            }
        };

        let Some(raw_author) = self.prompt("Enter the author: ")? else {
            return Ok(false);
        };
        let author = match validate_text_field("Author", &raw_author) {
            Ok(author) => author,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(true);
            }
        };

        match self.catalog.add_book(isbn, title, author) {
            Ok(()) => writeln!(self.output, "Book added to the catalog.")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(true)
    }

    fn find_book(&mut self) -> anyhow::Result<bool> {
        let Some(isbn) = self.prompt_isbn("Enter the ISBN to find: ")? else {
            return Ok(false);
        };
        match self.catalog.find_book(&isbn) {
            Some(book) => {
                writeln!(self.output, "Book with ISBN {isbn} found:")?;
                write_book(&mut self.output, book, self.format)?;
            }
            None => writeln!(self.output, "Book with ISBN {isbn} not found.")?,
        }
        Ok(true)
    }

    fn remove_book(&mut self) -> anyhow::Result<bool> {
        let Some(isbn) = self.prompt_isbn("Enter the ISBN to remove: ")? else {
            return Ok(false);
        };
        match self.catalog.remove_book(&isbn) {
            Ok(_) => writeln!(self.output, "Book with ISBN {isbn} removed.")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(true)
    }

    fn books_by_author(&mut self) -> anyhow::Result<bool> {
        let Some(raw_author) = self.prompt("Enter the author: ")? else {
            return Ok(false);
        };
        let author = match validate_text_field("Author", &raw_author) {
            Ok(author) => author,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(true);
            }
        };

        let books: Vec<&Book> = self.catalog.books_by_author(&author).collect();
        if books.is_empty() {
            writeln!(self.output, "No books by {author}.")?;
        } else {
            writeln!(self.output, "Books by {author}:")?;
            for book in books {
                write_book(&mut self.output, book, self.format)?;
            }
        }
        Ok(true)
    }

    /// Prompt for an ISBN, asking again after an invalid entry.
    /// None means end of input.
    fn prompt_isbn(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            match validate_isbn(&raw) {
                Ok(isbn) => return Ok(Some(isbn)),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Print a prompt and read one line. None means end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

fn write_book<W: Write>(out: &mut W, book: &Book, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{book}")?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(book)?)?,
        OutputFormat::Tsv => writeln!(out, "{}\t{}\t{}", book.isbn, book.title, book.author)?,
    }
    Ok(())
}

fn write_stats<W: Write>(
    out: &mut W,
    stats: &CatalogStats,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Index statistics:")?;
            writeln!(out, "  Books:            {}", stats.count)?;
            writeln!(out, "  Buckets:          {}", stats.capacity)?;
            writeln!(out, "  Occupied buckets: {}", stats.occupied_buckets)?;
            writeln!(out, "  Longest bucket:   {}", stats.longest_bucket)?;
            writeln!(out, "  Tree height:      {}", stats.tree_height)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(stats)?)?,
        OutputFormat::Tsv => {
            writeln!(out, "count\tcapacity\toccupied_buckets\tlongest_bucket\ttree_height")?;
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                stats.count,
                stats.capacity,
                stats.occupied_buckets,
                stats.longest_bucket,
                stats.tree_height
            )?;
        }
    }
    Ok(())
}
