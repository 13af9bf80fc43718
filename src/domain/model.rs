use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active loan: who has the book and when it is due back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loan {
    pub member_id: String,
    pub due_date: DateTime<Utc>,
}

/// A catalog item. Loan state is only changed through [`crate::Library`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    isbn: String,
    title: String,
    author: String,
    year: i32,
    #[serde(skip_deserializing)]
    loan: Option<Loan>,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            year,
            loan: None,
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    pub fn loan(&self) -> Option<&Loan> {
        self.loan.as_ref()
    }

    pub fn borrowed_by(&self) -> Option<&str> {
        self.loan.as_ref().map(|loan| loan.member_id.as_str())
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.loan.as_ref().map(|loan| loan.due_date)
    }

    /// True when on loan and the due date is strictly before `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.loan.as_ref().is_some_and(|loan| loan.due_date < now)
    }

    pub(crate) fn check_out(&mut self, member_id: &str, due_date: DateTime<Utc>) {
        self.loan = Some(Loan {
            member_id: member_id.to_string(),
            due_date,
        });
    }

    pub(crate) fn check_in(&mut self) -> Option<Loan> {
        self.loan.take()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    member_id: String,
    name: String,
    email: String,
    #[serde(skip_deserializing)]
    borrowed_books: Vec<String>,
    registration_date: DateTime<Utc>,
}

impl Member {
    pub fn new(
        member_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::registered_at(member_id, name, email, Utc::now())
    }

    pub fn registered_at(
        member_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        registration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            email: email.into(),
            borrowed_books: Vec::new(),
            registration_date,
        }
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// ISBNs currently on loan, in borrow order.
    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed_books
    }

    pub fn registration_date(&self) -> DateTime<Utc> {
        self.registration_date
    }

    pub(crate) fn record_loan(&mut self, isbn: &str) {
        self.borrowed_books.push(isbn.to_string());
    }

    /// Removes the first entry equal to `isbn`. Returns false if it was not listed.
    pub(crate) fn release_loan(&mut self, isbn: &str) -> bool {
        match self.borrowed_books.iter().position(|held| held == isbn) {
            Some(index) => {
                self.borrowed_books.remove(index);
                true
            }
            None => false,
        }
    }
}
