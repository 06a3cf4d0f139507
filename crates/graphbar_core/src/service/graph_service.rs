//! Graph list use-case service (the widget model).
//!
//! # Responsibility
//! - Own the authoritative graph list and the session read-only flag.
//! - Mediate between storage, validation, notifications and the view.
//!
//! # Invariants
//! - Every mutation entry point re-renders and persists, even when nothing
//!   changed (a rejected add still renders and saves the unchanged list).
//! - When persisting a changed list fails, the in-memory list and the view are
//!   restored to the last saved list and the inputs are left untouched.
//! - The read-only flag starts `false` and is never persisted.
//! - Insertion order is preserved; new graphs are appended.

use crate::config::{ErrorMessages, FieldLabels, WidgetConfig};
use crate::model::graph::{GraphInput, GraphRecord};
use crate::notify::{Clock, Notification, NotificationCenter, NotificationPhase};
use crate::repo::graph_repo::{GraphListRepository, RepoResult};
use crate::validation::{validate_input, ValidationError};
use crate::view::{GraphView, Surface};
use log::{debug, info, warn};

/// Result of an add attempt that reached persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Rejected with one entry per failed rule, in detection order.
    Rejected(Vec<ValidationError>),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Widget model: graph list plus its collaborators.
pub struct GraphService<R, S, C>
where
    R: GraphListRepository,
    S: Surface,
    C: Clock,
{
    repo: R,
    surface: S,
    clock: C,
    view: GraphView,
    notifications: NotificationCenter,
    labels: FieldLabels,
    messages: ErrorMessages,
    graphs: Vec<GraphRecord>,
    read_only: bool,
}

impl<R, S, C> GraphService<R, S, C>
where
    R: GraphListRepository,
    S: Surface,
    C: Clock,
{
    /// Wires collaborators. Call `initialize` before handling events.
    pub fn new(repo: R, surface: S, clock: C, config: &WidgetConfig) -> Self {
        Self {
            repo,
            surface,
            clock,
            view: GraphView::new(),
            notifications: NotificationCenter::new(config.notifications),
            labels: config.labels.clone(),
            messages: config.messages.clone(),
            graphs: Vec::new(),
            read_only: false,
        }
    }

    /// Loads the stored list, renders it and writes it back in canonical form.
    pub fn initialize(&mut self) -> RepoResult<()> {
        self.graphs = self.repo.load()?;
        self.refresh()?;
        info!(
            "event=widget_init module=service status=ok count={}",
            self.graphs.len()
        );
        Ok(())
    }

    /// Validates `input` and appends it on success.
    ///
    /// Each violation raises one notification. On success the inputs are
    /// cleared. The list is re-rendered and persisted in both cases; a failed
    /// save of the appended list rolls it back and keeps the inputs.
    pub fn add_graph(&mut self, input: GraphInput) -> RepoResult<AddOutcome> {
        let report = validate_input(&input, &self.graphs);
        self.view.mark_validated(&mut self.surface, report.focus);

        if report.is_valid() {
            let name = input.name.clone();
            let mut next = self.graphs.clone();
            next.push(input.into_record());
            self.commit(next)?;
            self.view.clear_inputs(&mut self.surface);
            debug!("event=graph_add module=service status=ok name={name}");
            return Ok(AddOutcome::Added);
        }

        let now_ms = self.clock.now_ms();
        for violation in &report.violations {
            let notification = self.notifications.notify(
                self.labels.label(violation.field),
                violation.error,
                self.messages.message(violation.error),
                now_ms,
            );
            self.surface.show_notification(notification);
        }
        info!(
            "event=graph_add module=service status=rejected errors={}",
            report
                .errors()
                .map(ValidationError::code)
                .collect::<Vec<_>>()
                .join(",")
        );
        self.refresh()?;
        Ok(AddOutcome::Rejected(report.errors().collect()))
    }

    /// Removes every graph named exactly `name`. Returns how many were removed.
    ///
    /// Not gated by the read-only flag.
    pub fn delete_graph(&mut self, name: &str) -> RepoResult<usize> {
        let next: Vec<GraphRecord> = self
            .graphs
            .iter()
            .filter(|graph| graph.name != name)
            .cloned()
            .collect();
        let removed = self.graphs.len() - next.len();
        self.commit(next)?;
        if removed == 0 {
            warn!("event=graph_delete module=service status=noop");
        } else {
            debug!("event=graph_delete module=service status=ok name={name} removed={removed}");
        }
        Ok(removed)
    }

    /// Flips the read-only flag and applies it to the view. Returns the new flag.
    pub fn toggle_read_only(&mut self) -> bool {
        self.read_only = !self.read_only;
        self.view.set_read_only(&mut self.surface, self.read_only);
        info!(
            "event=read_only_toggle module=service status=ok read_only={}",
            self.read_only
        );
        self.read_only
    }

    /// Advances notification lifecycles to the clock's current time.
    pub fn tick_notifications(&mut self) {
        let now_ms = self.clock.now_ms();
        for change in self.notifications.tick(now_ms) {
            match change.phase {
                NotificationPhase::Hiding => self.surface.hide_notification(change.id),
                NotificationPhase::Removed => self.surface.remove_notification(change.id),
                NotificationPhase::Visible => {}
            }
        }
    }

    /// Next time (clock milliseconds) at which `tick_notifications` has work.
    pub fn next_notification_deadline(&self) -> Option<u64> {
        self.notifications.next_deadline()
    }

    pub fn graphs(&self) -> &[GraphRecord] {
        &self.graphs
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.active()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Makes `next` the current list, rolling back if it cannot be persisted.
    fn commit(&mut self, next: Vec<GraphRecord>) -> RepoResult<()> {
        let previous = std::mem::replace(&mut self.graphs, next);
        if let Err(err) = self.refresh() {
            self.graphs = previous;
            self.view.render(&mut self.surface, &self.graphs);
            warn!("event=graph_save module=service status=rolled_back error={err}");
            return Err(err);
        }
        Ok(())
    }

    fn refresh(&mut self) -> RepoResult<()> {
        self.view.render(&mut self.surface, &self.graphs);
        self.repo.save(&self.graphs)
    }
}
