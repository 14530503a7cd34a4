use log::info;
use yew::prelude::*;

use crate::popups::manager::{PopupKind, PopupManager, PopupPhase};

#[derive(Properties, PartialEq)]
pub struct ConfirmPopupProps {
    pub phase: PopupPhase,
}

/// Asks the user to check their inbox after requesting a sign-in link.
/// The resend form has no text inputs, so submitting it always succeeds.
#[function_component(ConfirmPopup)]
pub fn confirm_popup(props: &ConfirmPopupProps) -> Html {
    let manager = use_context::<PopupManager>().expect("popup context missing");

    let on_backdrop = {
        let manager = manager.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                manager.close(PopupKind::Confirm, true);
            }
        })
    };

    let on_close = {
        let manager = manager.clone();
        Callback::from(move |_: MouseEvent| manager.close(PopupKind::Confirm, true))
    };

    let onsubmit = Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        info!("Resend link requested");
    });

    let display = if props.phase == PopupPhase::Hidden {
        "display: none;"
    } else {
        "display: block;"
    };

    html! {
        <div
            class={classes!(
                "popup",
                "confirm-popup",
                (props.phase == PopupPhase::Active).then_some("popup--active")
            )}
            style={display}
            onclick={on_backdrop}
        >
            <div class="popup_content">
                <button type="button" class="popup_close" aria-label="Close" onclick={on_close}>{"×"}</button>
                <h2 class="popup_title">{"Check your inbox"}</h2>
                <p class="popup_text">{"We've sent you a sign-in link. Didn't get it?"}</p>
                <form class="confirm-popup_form" onsubmit={onsubmit}>
                    <button type="submit" class="popup_button">{"Resend link"}</button>
                </form>
            </div>
        </div>
    }
}
