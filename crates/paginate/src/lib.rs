pub mod compile;
pub mod error;
pub mod paginator;
pub mod scope;
pub mod settings;

pub use compile::CompiledQuery;
pub use error::{PaginateError, SettingsError};
pub use paginator::{Paginator, paginate};
pub use scope::{JoinRelation, Scope, Where};
pub use settings::PaginateSettings;
