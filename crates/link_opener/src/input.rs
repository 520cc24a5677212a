//! Conversion of raw console input events into typed link-opener actions.

use device_host::BrowserAppId;
use thiserror::Error;

use crate::{
    prefs::LinkOpenerPrefs,
    reducer::{is_blank_url, LinkOpenerAction},
};

/// Key name that submits the URL input.
pub const SUBMIT_KEY: &str = "Enter";

#[derive(Debug, Clone, PartialEq)]
/// Raw value reported by the browser selection control.
pub enum SelectionValue {
    /// Text value; the only shape that can name a browser app.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Nothing selected.
    Empty,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("selection value does not name a browser app")]
/// Selection value that cannot be turned into a [`BrowserAppId`].
pub struct InvalidSelection;

impl TryFrom<SelectionValue> for BrowserAppId {
    type Error = InvalidSelection;

    fn try_from(value: SelectionValue) -> Result<Self, Self::Error> {
        match value {
            SelectionValue::Text(text) if !text.is_empty() => Ok(BrowserAppId::new(text)),
            SelectionValue::Text(_) | SelectionValue::Number(_) | SelectionValue::Empty => {
                Err(InvalidSelection)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Input events produced by a link-opener surface.
pub enum LinkOpenerInput {
    /// A key went down in the URL input.
    UrlKeyDown {
        /// Key name, as reported by the surface.
        key: String,
        /// URL input contents at the time of the key press.
        url: String,
    },
    /// The open control was activated.
    OpenPressed {
        /// URL input contents.
        url: String,
    },
    /// The browser selection control changed.
    BrowserChanged(SelectionValue),
    /// The reset control was activated.
    ClearPressed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// What one input event asks the store to do.
pub struct InputPlan {
    /// Actions to reduce, in order.
    pub actions: Vec<LinkOpenerAction>,
    /// Non-blank URL to open on the active device after the actions.
    pub open_url: Option<String>,
    /// Whether the URL input should regain focus afterwards.
    pub focus_url_input: bool,
}

/// Returns whether the open control should be enabled for `url`.
pub fn can_open(url: &str) -> bool {
    !is_blank_url(url)
}

/// Maps one input event to the actions it triggers under `prefs`.
pub fn plan_input(input: LinkOpenerInput, prefs: &LinkOpenerPrefs) -> InputPlan {
    match input {
        LinkOpenerInput::UrlKeyDown { key, url } => {
            if key == SUBMIT_KEY && prefs.submit_on_enter {
                submit(url)
            } else {
                InputPlan::default()
            }
        }
        LinkOpenerInput::OpenPressed { url } => submit(url),
        LinkOpenerInput::BrowserChanged(value) => InputPlan {
            // Non-text values are dropped but still refocus the input.
            actions: BrowserAppId::try_from(value)
                .map(LinkOpenerAction::SetCurrentBrowser)
                .into_iter()
                .collect(),
            open_url: None,
            focus_url_input: prefs.focus_input_after_selection,
        },
        LinkOpenerInput::ClearPressed => InputPlan {
            actions: vec![LinkOpenerAction::ClearBrowser],
            ..InputPlan::default()
        },
    }
}

fn submit(url: String) -> InputPlan {
    InputPlan {
        open_url: Some(url).filter(|url| can_open(url)),
        ..InputPlan::default()
    }
}
