//! Table actions performed by clicking the decision buttons.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use pokernow_protocols::{DomAccessor, DomError, ElementHandle};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::selectors;

/// Delay between opening the raise form and filling it.
const RAISE_FORM_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Call,
    Raise,
    Check,
    Fold,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Call, Action::Raise, Action::Check, Action::Fold];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Call => "Call",
            Action::Raise => "Raise",
            Action::Check => "Check",
            Action::Fold => "Fold",
        }
    }

    fn selector(&self) -> &'static str {
        match self {
            Action::Call => selectors::ACTION_CALL,
            Action::Raise => selectors::ACTION_RAISE,
            Action::Check => selectors::ACTION_CHECK,
            Action::Fold => selectors::ACTION_FOLD,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(Action::Call),
            "raise" => Ok(Action::Raise),
            "check" => Ok(Action::Check),
            "fold" => Ok(Action::Fold),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Raise requires an amount")]
    MissingAmount,

    #[error("{action} failed: {source}")]
    Dom {
        action: Action,
        #[source]
        source: DomError,
    },
}

/// What happened when an action was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Performed,
    /// The button was missing, hidden or disabled.
    Unavailable,
}

/// Discovers and clicks the decision buttons.
#[derive(Debug, Clone, Copy)]
pub struct ActionHelper {
    confirm_timeout: Duration,
}

impl Default for ActionHelper {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl ActionHelper {
    /// `confirm_timeout` bounds the wait for the fold confirmation dialog.
    pub fn new(confirm_timeout: Duration) -> Self {
        Self { confirm_timeout }
    }

    /// Buttons that are present, displayed and not disabled.
    pub async fn available_actions(
        &self,
        dom: &dyn DomAccessor,
    ) -> Result<BTreeMap<Action, ElementHandle>, DomError> {
        let mut available = BTreeMap::new();
        for action in Action::ALL {
            let Some(button) = dom.query(action.selector(), None).await? else {
                continue;
            };
            if dom.is_displayed(&button).await? && dom.attr(&button, "disabled").await?.is_none() {
                available.insert(action, button);
            }
        }
        debug!("Available actions: {:?}", available.keys().collect::<Vec<_>>());
        Ok(available)
    }

    /// Perform `action`. Raise needs `amount`.
    pub async fn perform(
        &self,
        dom: &dyn DomAccessor,
        action: Action,
        amount: Option<u64>,
    ) -> Result<ActionOutcome, ActionError> {
        if action == Action::Raise && amount.is_none() {
            return Err(ActionError::MissingAmount);
        }

        let dom_err = |source| ActionError::Dom { action, source };
        let available = self.available_actions(dom).await.map_err(dom_err)?;
        let Some(button) = available.get(&action) else {
            warn!("Action {} not available", action);
            return Ok(ActionOutcome::Unavailable);
        };

        let result = match (action, amount) {
            (Action::Raise, Some(amount)) => self.raise(dom, button, amount).await,
            (Action::Fold, _) => self.fold(dom, button).await,
            _ => dom.click(button).await,
        };
        result.map_err(dom_err)?;

        info!("Performed {}", action);
        Ok(ActionOutcome::Performed)
    }

    async fn raise(
        &self,
        dom: &dyn DomAccessor,
        button: &ElementHandle,
        amount: u64,
    ) -> Result<(), DomError> {
        dom.click(button).await?;
        tokio::time::sleep(RAISE_FORM_DELAY).await;

        match dom.query(selectors::RAISE_INPUT, None).await? {
            Some(input) => dom.fill(&input, &amount.to_string()).await?,
            None => warn!("Raise amount input not found: {}", selectors::RAISE_INPUT),
        }

        match dom.query(selectors::RAISE_CONFIRM, None).await? {
            Some(confirm) => dom.click(&confirm).await?,
            None => warn!("Raise confirm button not found: {}", selectors::RAISE_CONFIRM),
        }
        Ok(())
    }

    /// Click fold, then accept the confirmation dialog if it shows up in time.
    async fn fold(&self, dom: &dyn DomAccessor, button: &ElementHandle) -> Result<(), DomError> {
        dom.click(button).await?;
        match dom.wait_for(selectors::FOLD_CONFIRM, self.confirm_timeout).await? {
            Some(confirm) => {
                debug!("Accepting fold confirmation");
                dom.click(&confirm).await
            }
            None => {
                debug!("No fold confirmation within {:?}", self.confirm_timeout);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
