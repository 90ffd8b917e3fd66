//! CLI commands.

mod cat;
mod footer;
mod inspect;
mod schema;

pub use cat::CatCommand;
pub use footer::FooterCommand;
pub use inspect::InspectCommand;
pub use schema::SchemaCommand;
