pub mod library;

pub use crate::domain::model::{Book, Loan, Member};
pub use crate::domain::ports::{Clock, ManualClock, SystemClock};
