mod client;
mod control_plane;
mod dev_backend;
mod dto;
mod error;
mod models;
mod session;

pub use client::*;
pub use control_plane::*;
pub use dev_backend::*;
pub use dto::*;
pub use error::*;
pub use models::*;
pub use session::*;
