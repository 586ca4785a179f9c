use crate::hooks::use_notifications::use_notifications;
use crate::services::notifications::Notifier;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct NotificationHostProps {
    pub notifier: Notifier,
}

impl PartialEq for NotificationHostProps {
    fn eq(&self, other: &Self) -> bool {
        self.notifier.ptr_eq(&other.notifier)
    }
}

/// Stack of transient alerts in the corner of the page.
#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let visible = use_notifications(&props.notifier);

    html! {
        <div class="notification-host" aria-live="polite">
            {
                visible.into_iter().map(|notification| {
                    let on_close = {
                        let notifier = props.notifier.clone();
                        let id = notification.id;
                        Callback::from(move |_: MouseEvent| {
                            notifier.dismiss(id);
                        })
                    };
                    let class = format!("alert alert-{} alert-dismissible", notification.severity.css_class());
                    html! {
                        <div key={notification.id} {class} role="alert">
                            {notification.message}
                            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
                        </div>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}
