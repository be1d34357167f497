use crate::sync::{ResourceKind, SyncCompletion};
use cronpanel_client::{ApiError, Credential, ServiceType};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Requests raised by key handlers and timers, run on the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    Sync(ResourceKind),
    RefreshAll,
    SubmitLogin,
    CreateSchedule(ServiceType),
    ConfirmDelete,
    Logout,
}

/// Results of spawned requests, applied on the UI loop.
#[derive(Debug)]
pub(super) enum Completion {
    Sync(SyncCompletion),
    Login {
        credential: Credential,
        result: Result<(), ApiError>,
    },
    Created {
        service: ServiceType,
        result: Result<(), ApiError>,
    },
    Deleted {
        job_id: String,
        result: Result<(), ApiError>,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;
pub(super) type CompletionTx = UnboundedSender<Completion>;
pub(super) type CompletionRx = UnboundedReceiver<Completion>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

pub(super) fn completion_channel() -> (CompletionTx, CompletionRx) {
    mpsc::unbounded_channel()
}
