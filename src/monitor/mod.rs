// SPDX-License-Identifier: MPL-2.0
//! Advisory that tells operators when the bundle override is no longer in
//! effect.
//!
//! Another module can install its own bundle strategy after ours; from then on
//! contributed translations silently stop showing up. The monitor checks, on
//! demand, whether the installed strategy is still an
//! [`OverrideBundleFactory`] and, if not, which module put the replacement
//! there. The operator can dismiss the advisory for good; that is the only
//! state the monitor changes, and only a POST through [`admin`] can do it.

pub mod admin;
mod state;

pub use state::MonitorState;

use crate::diagnostics::{self, DiagnosticsHandle, ResolutionEventKind};
use crate::domain::ModuleRef;
use crate::host::{ModuleDirectory, TemplatingHost};
use crate::override_point::OverrideBundleFactory;
use serde::Serialize;
use std::any::Any;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// The strategy found in place of ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offender {
    pub implementation: String,
    /// Module that shipped it, when the host can tell.
    pub module: Option<ModuleRef>,
}

/// Snapshot served by the status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorStatus {
    pub active: bool,
    /// Whether the advisory should be shown.
    pub activated: bool,
    pub disabled: bool,
    pub offending_module: Option<String>,
    pub offending_implementation: Option<String>,
}

pub struct StatusMonitor {
    host: Arc<TemplatingHost>,
    modules: Arc<dyn ModuleDirectory>,
    state: RwLock<MonitorState>,
    state_dir: Option<PathBuf>,
    offender: RwLock<Option<Offender>>,
    context_path: String,
    diagnostics: Option<DiagnosticsHandle>,
}

impl StatusMonitor {
    /// Creates a monitor whose state is kept in `state_dir`, or the default
    /// data directory when `None`.
    pub fn new(
        host: Arc<TemplatingHost>,
        modules: Arc<dyn ModuleDirectory>,
        state_dir: Option<PathBuf>,
    ) -> Self {
        let (state, warning) = MonitorState::load_from(state_dir.clone());
        if let Some(warning) = warning {
            log::warn!("{warning}; the localization advisory stays enabled");
        }
        Self {
            host,
            modules,
            state: RwLock::new(state),
            state_dir,
            offender: RwLock::new(None),
            context_path: String::new(),
            diagnostics: None,
        }
    }

    /// Prefix prepended to redirect targets, e.g. `/app`.
    #[must_use]
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Whether the host still builds bundles through our strategy.
    ///
    /// Compares the installed strategy's type, never its behavior. When it is
    /// foreign, its owner is recorded for [`offender`](Self::offender).
    pub fn is_override_active(&self) -> bool {
        let factory = self.host.bundle_factory();
        let active = (factory.as_ref() as &dyn Any).is::<OverrideBundleFactory>();

        let offender = (!active).then(|| Offender {
            implementation: factory.implementation().to_string(),
            module: self.modules.identify_owner(factory.implementation()),
        });
        if let Some(offender) = &offender {
            log::debug!(
                "Bundle strategy replaced by {} from {}",
                offender.implementation,
                offender
                    .module
                    .as_ref()
                    .map_or("an unknown module", |m| m.name.as_str())
            );
            diagnostics::record(
                self.diagnostics.as_ref(),
                ResolutionEventKind::OverrideReplaced {
                    implementation: offender.implementation.clone(),
                    module: offender.module.as_ref().map(|m| m.name.clone()),
                },
            );
        }
        *self.offender.write().unwrap_or_else(PoisonError::into_inner) = offender;
        active
    }

    /// Whether the advisory should be shown: the override is gone and the
    /// operator has not dismissed it.
    pub fn is_activated(&self) -> bool {
        !self.is_disabled() && !self.is_override_active()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).disabled
    }

    /// Replacement found by the latest check.
    pub fn offender(&self) -> Option<Offender> {
        self.offender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs a check and reports the result.
    pub fn status(&self) -> MonitorStatus {
        let active = self.is_override_active();
        let disabled = self.is_disabled();
        let offender = self.offender();
        MonitorStatus {
            active,
            activated: !active && !disabled,
            disabled,
            offending_module: offender
                .as_ref()
                .and_then(|o| o.module.as_ref())
                .map(|m| m.name.clone()),
            offending_implementation: offender.map(|o| o.implementation),
        }
    }

    /// Stops the advisory for good. Persisting is best effort: the flag holds
    /// for this process even if it could not be written.
    fn dismiss(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.disabled = true;
        if let Err(err) = state.save_to(self.state_dir.clone()) {
            log::warn!("Failed to persist dismissed localization advisory: {err}");
        }
    }

    fn redirect_target(&self, target: &str) -> String {
        format!("{}{target}", self.context_path)
    }
}
