pub mod error;
pub mod pokemon;
pub mod session;

pub use error::Error;
pub use pokemon::Pokemon;
pub use session::Session;
