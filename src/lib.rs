// Library surface for the binary, headless integration tests and reuse.
pub mod animation;
pub mod app;
pub mod app_dirs;
pub mod audio;
pub mod config;
pub mod corpus;
pub mod error;
pub mod input;
pub mod runtime;
pub mod session;
pub mod sprites;
pub mod stats;
pub mod timer;
pub mod ui;
pub mod util;
pub mod validator;

pub use app::App;
pub use error::{GameError, Result};
