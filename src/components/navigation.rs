use crate::services::feeds::PageRole;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub current: PageRole,
    pub on_select: Callback<PageRole>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    html! {
        <nav class="app-nav">
            {
                PageRole::NAVIGABLE.iter().map(|role| {
                    let role = *role;
                    let onclick = {
                        let callback = props.on_select.clone();
                        Callback::from(move |_: MouseEvent| callback.emit(role))
                    };
                    let class = classes!("nav-link", (role == props.current).then_some("active"));
                    html! {
                        <button type="button" {class} {onclick}>{role.title()}</button>
                    }
                }).collect::<Html>()
            }
        </nav>
    }
}
