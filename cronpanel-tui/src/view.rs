//! Renderable regions the sync engine draws into.
//!
//! The engine only knows these capabilities; the terminal UI reads the
//! resulting state from [`crate::app::Dashboard`] every frame and tests use
//! recording implementations.

use cronpanel_client::ServiceType;

use crate::sync::ResourceKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub text: String,
    /// Set on schedule rows; target of the delete affordance.
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListContent {
    Loading,
    Rows(Vec<Row>),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorContent {
    Loading,
    Options(Vec<SelectOption>),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    Blank,
    Loading,
    Ready(String),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    ServerTime,
    Logs,
    Uptime,
}

pub trait ListRegion {
    fn render_list(&mut self, kind: ResourceKind, content: ListContent);
}

pub trait SelectorRegion {
    fn render_selector(&mut self, service: ServiceType, content: SelectorContent);
}

pub trait TextRegion {
    fn render_text(&mut self, slot: TextSlot, content: TextContent);

    /// The per-kind error slot; `None` clears it.
    fn render_error(&mut self, kind: ResourceKind, message: Option<String>);
}

pub trait DashboardView: ListRegion + SelectorRegion + TextRegion {}

impl<T> DashboardView for T where T: ListRegion + SelectorRegion + TextRegion {}
