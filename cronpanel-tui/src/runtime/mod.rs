use std::sync::Arc;

use cronpanel_client::{ControlPlane, Session};

use crate::session_store::SessionStore;

mod action_queue;
mod actions;
mod event_loop;
mod views;

pub use event_loop::run_app;

/// Everything the runtime needs besides the app state.
#[derive(Clone)]
pub struct Context {
    pub backend: Arc<dyn ControlPlane>,
    pub session: Session,
    pub store: SessionStore,
}
