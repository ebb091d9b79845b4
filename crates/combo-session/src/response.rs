use super::types::{FocusRequest, FocusRole, Response};
use super::AutocompleteSession;

impl<T> Response<T> {
    /// Event not handled; the host keeps its default action.
    pub(crate) fn pass() -> Self {
        Self {
            consumed: false,
            confirmed: None,
            removed: None,
            lookup: None,
            focus: None,
            blur: None,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::pass()
        }
    }

    /// Nothing for the host to do.
    pub fn is_empty(&self) -> bool {
        !self.consumed
            && self.confirmed.is_none()
            && self.removed.is_none()
            && self.lookup.is_none()
            && self.focus.is_none()
            && self.blur.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FocusSnapshot {
    input: bool,
    option: Option<usize>,
}

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    pub(super) fn focus_snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            input: self.state.input_focused,
            option: self.state.option_focused,
        }
    }

    /// Fill in the focus move implied by the state change since `before`,
    /// unless the handler already chose one.
    pub(super) fn finish(&self, mut resp: Response<T>, before: FocusSnapshot) -> Response<T> {
        if resp.focus.is_none() {
            resp.focus = focus_request(before, self.focus_snapshot());
        }
        resp
    }
}

fn focus_request(before: FocusSnapshot, after: FocusSnapshot) -> Option<FocusRequest> {
    if after.input && !before.input {
        // Coming from outside the widget selects the text; coming back from an
        // option leaves the caret alone.
        return Some(FocusRequest {
            role: FocusRole::Input,
            select_text: before.option.is_none(),
        });
    }
    match after.option {
        Some(i) if before.option != Some(i) => Some(FocusRequest {
            role: FocusRole::Option(i),
            select_text: false,
        }),
        _ => None,
    }
}
