use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::popup;
use crate::forms::rules::{self, FieldKind};
use crate::popups::manager::{PopupKind, PopupManager, PopupPhase};

#[derive(Properties, PartialEq)]
pub struct LoginPopupProps {
    pub phase: PopupPhase,
}

/// Email-only login dialog. A valid submit closes this popup and opens the
/// confirmation popup once the close animation has finished.
#[function_component(LoginPopup)]
pub fn login_popup(props: &LoginPopupProps) -> Html {
    let manager = use_context::<PopupManager>().expect("popup context missing");
    let email = use_state(String::new);
    let email_error = use_state(|| None::<&'static str>);
    // Holds the pending confirm-popup timer so unmounting cancels it.
    let chain = use_mut_ref(|| None::<Timeout>);

    let on_backdrop = {
        let manager = manager.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                manager.close(PopupKind::Login, true);
            }
        })
    };

    let on_close = {
        let manager = manager.clone();
        Callback::from(move |_: MouseEvent| manager.close(PopupKind::Login, true))
    };

    let oninput = {
        let email = email.clone();
        let email_error = email_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
            if email_error.is_some() {
                email_error.set(None);
            }
        })
    };

    let onblur = {
        let email_error = email_error.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email_error.set(rules::validate(FieldKind::Email, &input.value()).err());
        })
    };

    let onsubmit = {
        let manager = manager.clone();
        let email = email.clone();
        let email_error = email_error.clone();
        let chain = chain.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match rules::validate(FieldKind::Email, &email) {
                Ok(()) => {
                    email_error.set(None);
                    manager.close(PopupKind::Login, true);
                    let manager = manager.clone();
                    *chain.borrow_mut() =
                        Some(Timeout::new(popup::CONFIRM_CHAIN_DELAY_MS, move || {
                            manager.open_confirm();
                        }));
                }
                Err(message) => email_error.set(Some(message)),
            }
        })
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
                "login-popup",
                (props.phase == PopupPhase::Active).then_some("popup--active")
            )}
            style={display}
            onclick={on_backdrop}
        >
            <div class="popup_content">
                <button type="button" class="popup_close" aria-label="Close" onclick={on_close}>{"×"}</button>
                <h2 class="popup_title">{"Welcome back"}</h2>
                <p class="popup_text">{"Enter your email and we'll send you a sign-in link."}</p>
                <form class="login-popup_form" novalidate=true onsubmit={onsubmit}>
                    <div class={classes!(
                        "input-wrapper",
                        email_error.is_some().then_some("input-wrapper--error")
                    )}>
                        <input
                            type="email"
                            id="login-email"
                            placeholder="Email"
                            value={(*email).clone()}
                            oninput={oninput}
                            onblur={onblur}
                        />
                    </div>
                    if let Some(message) = *email_error {
                        <span class="error-message" data-field-error="login-email">{message}</span>
                    }
                    <button type="submit" class="popup_button">{"Send link"}</button>
                </form>
            </div>
        </div>
    }
}
