use crate::config::DeskConfig;
use crate::core::{Book, Clock, Member, SystemClock};
use crate::utils::error::{DeskError, Result};
use chrono::{DateTime, Days, Utc};
use std::collections::HashMap;

pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

/// The circulation desk: owns every book and member and is the only place
/// loan state changes.
#[derive(Debug)]
pub struct Library<C: Clock = SystemClock> {
    books: HashMap<String, Book>,
    members: HashMap<String, Member>,
    loan_period_days: u32,
    clock: C,
}

impl Library<SystemClock> {
    pub fn new() -> Self {
        Self::with_loan_period(DEFAULT_LOAN_PERIOD_DAYS)
    }

    pub fn with_loan_period(loan_period_days: u32) -> Self {
        Self::with_clock(SystemClock, loan_period_days)
    }

    pub fn from_config(config: &DeskConfig) -> Self {
        Self::with_loan_period(config.loan_period_days())
    }
}

impl Default for Library<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Library<C> {
    pub fn with_clock(clock: C, loan_period_days: u32) -> Self {
        Self {
            books: HashMap::new(),
            members: HashMap::new(),
            loan_period_days,
            clock,
        }
    }

    pub fn loan_period_days(&self) -> u32 {
        self.loan_period_days
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Inserts or replaces the book stored under its ISBN.
    pub fn add_book(&mut self, book: Book) {
        tracing::debug!("Registering book {} ({})", book.isbn(), book.title());
        if self.books.insert(book.isbn().to_string(), book).is_some() {
            tracing::debug!("Replaced an existing catalog entry");
        }
    }

    /// Inserts or replaces the member stored under its ID.
    pub fn add_member(&mut self, member: Member) {
        tracing::debug!("Registering member {}", member.member_id());
        if self
            .members
            .insert(member.member_id().to_string(), member)
            .is_some()
        {
            tracing::debug!("Replaced an existing member entry");
        }
    }

    pub fn borrow_book(&mut self, isbn: &str, member_id: &str) -> bool {
        match self.try_borrow_book(isbn, member_id) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Borrow refused: {}", e);
                false
            }
        }
    }

    /// Lends `isbn` to `member_id` and returns the due date.
    ///
    /// Nothing is modified unless every check passes.
    pub fn try_borrow_book(&mut self, isbn: &str, member_id: &str) -> Result<DateTime<Utc>> {
        let book = self.books.get_mut(isbn).ok_or_else(|| DeskError::UnknownBook {
            isbn: isbn.to_string(),
        })?;
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| DeskError::UnknownMember {
                member_id: member_id.to_string(),
            })?;

        if let Some(holder) = book.borrowed_by() {
            return Err(DeskError::BookUnavailable {
                isbn: isbn.to_string(),
                borrowed_by: holder.to_string(),
            });
        }

        let due_date = self
            .clock
            .now()
            .checked_add_days(Days::new(u64::from(self.loan_period_days)))
            .ok_or_else(|| DeskError::DueDateOverflow {
                isbn: isbn.to_string(),
                days: self.loan_period_days,
            })?;

        book.check_out(member_id, due_date);
        member.record_loan(isbn);

        tracing::info!("Book {} lent to {} until {}", isbn, member_id, due_date);
        Ok(due_date)
    }

    pub fn return_book(&mut self, isbn: &str) -> bool {
        match self.try_return_book(isbn) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Return refused: {}", e);
                false
            }
        }
    }

    /// Closes the loan on `isbn` and returns the ID of the member who held it.
    ///
    /// A borrower that is no longer registered, or whose loan list does not
    /// mention the book, is logged and skipped; the book is still checked in.
    pub fn try_return_book(&mut self, isbn: &str) -> Result<String> {
        let book = self.books.get_mut(isbn).ok_or_else(|| DeskError::UnknownBook {
            isbn: isbn.to_string(),
        })?;
        let loan = book.check_in().ok_or_else(|| DeskError::NotOnLoan {
            isbn: isbn.to_string(),
        })?;

        match self.members.get_mut(&loan.member_id) {
            Some(member) => {
                if !member.release_loan(isbn) {
                    tracing::warn!(
                        "Member {} did not list {} among their loans",
                        loan.member_id,
                        isbn
                    );
                }
            }
            None => {
                tracing::warn!(
                    "Borrower {} of {} is not registered; checking the book in anyway",
                    loan.member_id,
                    isbn
                );
            }
        }

        tracing::info!("Book {} returned by {}", isbn, loan.member_id);
        Ok(loan.member_id)
    }

    pub fn get_overdue_books(&self) -> Vec<&Book> {
        let now = self.clock.now();
        let overdue: Vec<&Book> = self
            .books
            .values()
            .filter(|book| book.is_overdue_at(now))
            .collect();
        tracing::debug!("Found {} overdue books", overdue.len());
        overdue
    }

    /// Case-insensitive substring match on the author field.
    pub fn search_books_by_author(&self, author: &str) -> Vec<&Book> {
        let needle = author.to_lowercase();
        let matches: Vec<&Book> = self
            .books
            .values()
            .filter(|book| book.author().to_lowercase().contains(&needle))
            .collect();
        tracing::debug!("Author search '{}' matched {} books", author, matches.len());
        matches
    }

    /// Books on loan to `member_id`, in borrow order. Unknown members have none.
    pub fn get_member_borrowed_books(&self, member_id: &str) -> Vec<&Book> {
        let Some(member) = self.members.get(member_id) else {
            return Vec::new();
        };

        member
            .borrowed_books()
            .iter()
            .filter_map(|isbn| self.books.get(isbn))
            .collect()
    }
}
