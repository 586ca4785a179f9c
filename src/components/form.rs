use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Whether a form adds a new record or edits the one with this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

impl FormMode {
    pub fn title(&self, noun: &str) -> String {
        match self {
            FormMode::Create => format!("Add {noun}"),
            FormMode::Edit(id) => format!("Edit {noun} #{id}"),
        }
    }
}

/// Writes a text input's value into a field of the draft held in `state`.
pub fn bind_text<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, String),
) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*state).clone();
        apply(&mut next, input.value());
        state.set(next);
    })
}

pub fn bind_checkbox<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, bool),
) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*state).clone();
        apply(&mut next, input.checked());
        state.set(next);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_title_names_the_record() {
        assert_eq!(FormMode::Create.title("account"), "Add account");
        assert_eq!(FormMode::Edit(7).title("proxy"), "Edit proxy #7");
    }
}
