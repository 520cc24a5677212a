//! Link-opener workflow for the device console: browser selection, link dispatch and browser
//! reset for one managed device at a time.

pub mod error;
pub mod input;
pub mod model;
pub mod prefs;
pub mod reducer;
pub mod store;

pub use error::{ClearError, OpenError};
pub use input::{can_open, plan_input, InputPlan, InvalidSelection, LinkOpenerInput, SelectionValue};
pub use model::*;
pub use prefs::{
    load_link_opener_prefs, save_link_opener_prefs, LinkOpenerPrefs, LinkOpenerPrefsError,
    LINK_OPENER_PREFS_KEY,
};
pub use reducer::{
    is_blank_url, open_request, reduce_link_opener, LinkOpenerAction, LinkOpenerEffect,
    OpenRequest,
};
pub use store::{InputOutcome, LinkOpenerFuture, LinkOpenerStore, PendingCommand, SubscriptionId};
