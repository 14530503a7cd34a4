use yew::prelude::*;

use crate::popups::manager::{PopupKind, PopupManager, PopupPhase};

#[derive(Properties, PartialEq)]
pub struct ThanksPopupProps {
    pub phase: PopupPhase,
}

/// Shown after a successful waitlist signup.
#[function_component(ThanksPopup)]
pub fn thanks_popup(props: &ThanksPopupProps) -> Html {
    let manager = use_context::<PopupManager>().expect("popup context missing");

    let on_backdrop = {
        let manager = manager.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                manager.close(PopupKind::Thanks, true);
            }
        })
    };

    let on_close = {
        let manager = manager.clone();
        Callback::from(move |_: MouseEvent| manager.close(PopupKind::Thanks, true))
    };

    let on_got_it = {
        let manager = manager.clone();
        Callback::from(move |_: MouseEvent| manager.close(PopupKind::Thanks, true))
    };

    let display = if props.phase == PopupPhase::Hidden {
        "display: none;"
    } else {
        "display: block;"
    };

    html! {
        <div
            class={classes!(
                "popup",
                "thanks-popup",
                (props.phase == PopupPhase::Active).then_some("popup--active")
            )}
            style={display}
            onclick={on_backdrop}
        >
            <div class="popup_content">
                <button type="button" class="popup_close" aria-label="Close" onclick={on_close}>{"×"}</button>
                <h2 class="popup_title">{"You're on the list!"}</h2>
                <p class="popup_text">{"Thanks for joining. We'll email you as soon as your spot opens up."}</p>
                <button type="button" class="popup_button" onclick={on_got_it}>{"Got it"}</button>
            </div>
        </div>
    }
}
