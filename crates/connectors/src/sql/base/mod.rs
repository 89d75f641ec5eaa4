pub mod adapter;
pub mod error;
pub mod filter;
pub mod query;
pub mod requests;
pub mod row;
