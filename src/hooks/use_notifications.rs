use crate::services::notifications::{Notification, Notifier};
use yew::prelude::*;

/// Re-renders whenever the sink changes and returns what is on screen.
#[hook]
pub fn use_notifications(notifier: &Notifier) -> Vec<Notification> {
    let update = use_force_update();

    {
        let notifier = notifier.clone();
        use_effect_with((), move |_| {
            let subscription = notifier.subscribe(move || update.force_update());
            move || drop(subscription)
        });
    }

    notifier.visible()
}
