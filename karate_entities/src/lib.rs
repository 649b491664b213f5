pub mod schema;
pub mod domain;
pub mod queries;
pub mod mock;
pub mod prelude;
