mod probe;
pub mod schema;
mod serve;

pub use probe::probe;
pub use serve::serve;
