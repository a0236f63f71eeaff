use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Book awaiting insertion. The store assigns `bookid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub publisher: String,
    /// List price, always a positive whole amount.
    pub price: i64,
}

/// Customer awaiting insertion. The store assigns `custid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    /// `None` is written as SQL `NULL`, never as an empty string.
    pub phone: Option<String>,
}

/// Order linking an existing customer to an existing book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub book_id: i64,
    pub sale_price: i64,
    pub order_date: NaiveDate,
}

/// Persisted book projected to what order synthesis needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    pub id: i64,
    pub list_price: i64,
}

/// Persisted customer projected to its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: i64,
}

/// Current population of books and customers, in the order the store yielded them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisites {
    pub books: Vec<BookRef>,
    pub customers: Vec<CustomerRef>,
}

impl Prerequisites {
    pub fn new(books: Vec<BookRef>, customers: Vec<CustomerRef>) -> Self {
        Self { books, customers }
    }

    pub fn book(&self, id: i64) -> Option<&BookRef> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn has_customer(&self, id: i64) -> bool {
        self.customers.iter().any(|customer| customer.id == id)
    }
}
