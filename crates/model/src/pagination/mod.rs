pub mod column;
pub mod page;
pub mod request;
