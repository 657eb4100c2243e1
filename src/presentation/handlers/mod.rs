mod ask;
mod error;
mod extract;
mod health;
mod multipart_files;
mod upload;

pub use ask::ask_handler;
pub use error::{ErrorResponse, error_response};
pub use extract::extract_handler;
pub use health::{health_handler, ping_handler, root_handler};
pub use upload::upload_handler;
