use serde::{Deserialize, Serialize};

/// One page of records together with the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub records: Vec<T>,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn new(total: u64, records: Vec<T>, page: u64, size: u64) -> Self {
        Self {
            total,
            records,
            page,
            size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn into_parts(self) -> (u64, Vec<T>) {
        (self.total, self.records)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            total: self.total,
            records: self.records.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
        }
    }
}
