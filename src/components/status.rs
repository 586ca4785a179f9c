use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or(AttrValue::from("Loading data..."))]
    pub label: AttrValue,
}

#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    if let Some(msg) = &props.error {
        return html! {
            <div class="status error">
                <p>{"❌ Error: "}{msg}</p>
            </div>
        };
    }

    if props.loading {
        html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{props.label.clone()}</p>
            </div>
        }
    } else {
        html! {}
    }
}
