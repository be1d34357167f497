use crate::app::{App, MutationOutcome, Screen, SESSION_EXPIRED};
use crate::sync::{self, ResourceKind, SyncCompletion, SyncStatus};
use std::time::Instant;
use tracing::{info, warn};

use super::action_queue::{Action, Completion, CompletionTx};
use super::Context;

/// Run an action on the UI loop. Network work is spawned; its result comes
/// back through `completions`.
pub(super) fn run_action(action: Action, app: &mut App, ctx: &Context, completions: &CompletionTx) {
    match action {
        Action::Sync(kind) => start_sync(kind, app, ctx, completions),
        Action::RefreshAll => {
            for kind in ResourceKind::ALL {
                start_sync(kind, app, ctx, completions);
            }
        }
        Action::SubmitLogin => submit_login(app, ctx, completions),
        Action::CreateSchedule(service) => {
            let Some(request) = app.prepare_schedule(service) else {
                return;
            };
            info!(service = %request.service, cron = %request.cron, "creating schedule");
            let backend = ctx.backend.clone();
            let tx = completions.clone();
            tokio::spawn(async move {
                let result = backend.create_schedule(&request).await;
                let _ = tx.send(Completion::Created { service, result });
            });
        }
        Action::ConfirmDelete => {
            let Some(job_id) = app.confirm_delete() else {
                return;
            };
            info!(job_id = %job_id, "deleting schedule");
            let backend = ctx.backend.clone();
            let tx = completions.clone();
            tokio::spawn(async move {
                let result = backend.delete_schedule(&job_id).await;
                let _ = tx.send(Completion::Deleted { job_id, result });
            });
        }
        Action::Logout => {
            info!("logging out");
            forget_credential(ctx);
            app.enter_login(None);
        }
    }
}

/// Loading is rendered here, before the request task exists.
fn start_sync(kind: ResourceKind, app: &mut App, ctx: &Context, completions: &CompletionTx) {
    if app.screen != Screen::Main {
        return;
    }
    let ticket = app.begin_sync(kind);
    let backend = ctx.backend.clone();
    let tx = completions.clone();
    tokio::spawn(async move {
        let result = sync::fetch(kind, backend.as_ref()).await;
        let _ = tx.send(Completion::Sync(SyncCompletion { ticket, result }));
    });
}

fn submit_login(app: &mut App, ctx: &Context, completions: &CompletionTx) {
    let Some(credential) = app.login_submission() else {
        return;
    };
    let backend = ctx.backend.clone();
    let tx = completions.clone();
    tokio::spawn(async move {
        let result = backend.login(&credential).await;
        let _ = tx.send(Completion::Login { credential, result });
    });
}

pub(super) fn apply_completion(
    completion: Completion,
    app: &mut App,
    ctx: &Context,
    completions: &CompletionTx,
) {
    match completion {
        Completion::Sync(completion) => {
            if app.apply_sync(completion) == SyncStatus::SessionRejected {
                expire_session(app, ctx);
            }
        }
        Completion::Login { credential, result } => match result {
            Ok(()) => {
                info!("login accepted");
                ctx.session.set(credential.clone());
                let kinds = app.enter_main(Instant::now());
                if let Err(e) = ctx.store.save(&credential) {
                    warn!(error = %e, "failed to persist session");
                    app.set_status(format!("Logged in, but the session was not saved: {}", e));
                }
                for kind in kinds {
                    start_sync(kind, app, ctx, completions);
                }
            }
            Err(err) => {
                warn!(error = %err, "login rejected");
                app.on_login_rejected(&err);
            }
        },
        Completion::Created { service, result } => {
            if let Err(err) = &result {
                warn!(service = %service, error = %err, "create schedule failed");
            }
            let outcome = app.on_schedule_created(service, result);
            settle_mutation(outcome, app, ctx, completions);
        }
        Completion::Deleted { job_id, result } => {
            if let Err(err) = &result {
                warn!(job_id = %job_id, error = %err, "delete schedule failed");
            }
            let outcome = app.on_schedule_deleted(result);
            settle_mutation(outcome, app, ctx, completions);
        }
    }
}

fn settle_mutation(
    outcome: MutationOutcome,
    app: &mut App,
    ctx: &Context,
    completions: &CompletionTx,
) {
    match outcome {
        MutationOutcome::Resync => start_sync(ResourceKind::Schedules, app, ctx, completions),
        MutationOutcome::Unchanged => {}
        MutationOutcome::SessionRejected => expire_session(app, ctx),
    }
}

/// The server rejected the credential: forget it and return to login.
fn expire_session(app: &mut App, ctx: &Context) {
    if app.screen == Screen::Login {
        return;
    }
    warn!("session rejected by server");
    forget_credential(ctx);
    app.enter_login(Some(SESSION_EXPIRED.to_string()));
}

fn forget_credential(ctx: &Context) {
    ctx.session.clear();
    if let Err(e) = ctx.store.clear() {
        warn!(error = %e, "failed to remove saved session");
    }
}
