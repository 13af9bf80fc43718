use crate::core::library::Library;
use crate::core::{Book, Clock, Member};
use crate::utils::error::{DeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// One desk operation, encoded as a JSON object tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddBook {
        isbn: String,
        title: String,
        author: String,
        year: i32,
    },
    AddMember {
        member_id: String,
        name: String,
        email: String,
    },
    Borrow {
        isbn: String,
        member_id: String,
    },
    Return {
        isbn: String,
    },
    Overdue,
    Search {
        author: String,
    },
    MemberBooks {
        member_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookView {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub available: bool,
    pub borrowed_by: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year(),
            available: book.is_available(),
            borrowed_by: book.borrowed_by().map(str::to_string),
            due_date: book.due_date(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<BookView>>,
}

impl Response {
    fn done() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    fn refused(error: &DeskError) -> Self {
        Self {
            ok: false,
            reason: Some(error.to_string()),
            ..Self::default()
        }
    }

    fn listing(books: Vec<&Book>) -> Self {
        Self {
            ok: true,
            books: Some(books.into_iter().map(BookView::from).collect()),
            ..Self::default()
        }
    }
}

/// Applies [`Command`]s to a library it owns.
pub struct Session<C: Clock> {
    library: Library<C>,
}

impl<C: Clock> Session<C> {
    pub fn new(library: Library<C>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &Library<C> {
        &self.library
    }

    pub fn into_library(self) -> Library<C> {
        self.library
    }

    pub fn execute(&mut self, command: Command) -> Response {
        match command {
            Command::AddBook {
                isbn,
                title,
                author,
                year,
            } => {
                self.library.add_book(Book::new(isbn, title, author, year));
                Response::done()
            }
            Command::AddMember {
                member_id,
                name,
                email,
            } => {
                let registered = self.library.clock().now();
                self.library
                    .add_member(Member::registered_at(member_id, name, email, registered));
                Response::done()
            }
            Command::Borrow { isbn, member_id } => {
                match self.library.try_borrow_book(&isbn, &member_id) {
                    Ok(due_date) => Response {
                        due_date: Some(due_date),
                        ..Response::done()
                    },
                    Err(e) => {
                        tracing::debug!("Borrow refused: {}", e);
                        Response::refused(&e)
                    }
                }
            }
            Command::Return { isbn } => match self.library.try_return_book(&isbn) {
                Ok(_) => Response::done(),
                Err(e) => {
                    tracing::debug!("Return refused: {}", e);
                    Response::refused(&e)
                }
            },
            Command::Overdue => Response::listing(self.library.get_overdue_books()),
            Command::Search { author } => {
                Response::listing(self.library.search_books_by_author(&author))
            }
            Command::MemberBooks { member_id } => {
                Response::listing(self.library.get_member_borrowed_books(&member_id))
            }
        }
    }

    /// Parses and executes one JSON line.
    pub fn execute_line(&mut self, line: &str) -> Response {
        match serde_json::from_str::<Command>(line) {
            Ok(command) => self.execute(command),
            Err(e) => {
                let error = DeskError::from(e);
                tracing::warn!("Skipping malformed command: {}", error);
                Response::refused(&error)
            }
        }
    }

    /// Reads commands one per line and writes one JSON response per line.
    /// Blank lines are ignored. Returns the number of commands handled.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> Result<usize> {
        let mut handled = 0;

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let response = self.execute_line(trimmed);
            serde_json::to_writer(&mut writer, &response)?;
            writer.write_all(b"\n")?;
            handled += 1;
        }

        writer.flush()?;
        tracing::info!("Session finished after {} commands", handled);
        Ok(handled)
    }
}
