mod app;
mod session;
mod ws_handler;

pub use app::*;
pub use session::*;
pub use ws_handler::*;
