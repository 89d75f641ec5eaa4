pub mod adapter;
pub mod error;
pub mod sql;

pub use adapter::Adapter;
pub use sql::base::{
    adapter::{DatabaseKind, SqlAdapter},
    requests::{FetchRowsRequest, FetchRowsRequestBuilder, ScopedQuery},
};
