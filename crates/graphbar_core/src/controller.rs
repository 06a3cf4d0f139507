//! Event entry points for the widget.
//!
//! # Responsibility
//! - Map the three widget events (submit click, list click, read-only click)
//!   onto `GraphService` operations.
//! - Read raw input values from the surface at event time.
//!
//! # Invariants
//! - List clicks only act on a delete affordance carrying a row identifier.
//! - A submit click while read-only is ignored, mirroring the disabled control.

use crate::model::graph::{GraphInput, InputField};
use crate::notify::Clock;
use crate::repo::graph_repo::{GraphListRepository, RepoResult};
use crate::service::graph_service::{AddOutcome, GraphService};
use crate::view::Surface;
use log::debug;

/// What a click inside the list container landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListClickTarget {
    /// The delete affordance of the row identified by `row_name`.
    DeleteButton { row_name: String },
    /// Anything else inside the container.
    Other,
}

/// Root of the widget: owns the model and dispatches events to it.
pub struct GraphController<R, S, C>
where
    R: GraphListRepository,
    S: Surface,
    C: Clock,
{
    service: GraphService<R, S, C>,
}

impl<R, S, C> GraphController<R, S, C>
where
    R: GraphListRepository,
    S: Surface,
    C: Clock,
{
    pub fn new(service: GraphService<R, S, C>) -> Self {
        Self { service }
    }

    /// Initializes the model and returns a ready controller.
    pub fn start(mut service: GraphService<R, S, C>) -> RepoResult<Self> {
        service.initialize()?;
        Ok(Self::new(service))
    }

    /// Submit click. Returns `None` when ignored because the widget is read-only.
    pub fn on_add_clicked(&mut self) -> RepoResult<Option<AddOutcome>> {
        if self.service.is_read_only() {
            debug!("event=add_click module=controller status=ignored reason=read_only");
            return Ok(None);
        }
        let surface = self.service.surface();
        let input = GraphInput::new(
            surface.input_value(InputField::Name),
            surface.input_value(InputField::Value),
        );
        self.service.add_graph(input).map(Some)
    }

    /// Delegated list click. Returns the number of removed graphs.
    pub fn on_list_clicked(&mut self, target: &ListClickTarget) -> RepoResult<usize> {
        match target {
            ListClickTarget::DeleteButton { row_name } => self.service.delete_graph(row_name),
            ListClickTarget::Other => Ok(0),
        }
    }

    /// Read-only toggle click. Returns the new flag.
    pub fn on_read_only_clicked(&mut self) -> bool {
        self.service.toggle_read_only()
    }

    /// Timer callback for notification lifecycles.
    pub fn on_timer(&mut self) -> Option<u64> {
        self.service.tick_notifications();
        self.service.next_notification_deadline()
    }

    pub fn service(&self) -> &GraphService<R, S, C> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut GraphService<R, S, C> {
        &mut self.service
    }

    pub fn into_service(self) -> GraphService<R, S, C> {
        self.service
    }
}
