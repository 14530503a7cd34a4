use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::popup;
use crate::forms::rules::{self, FieldKind, WaitlistPayload};
use crate::popups::manager::{PopupKind, PopupManager};

#[derive(Properties, PartialEq)]
pub struct WaitlistFormProps {
    /// The form appears twice on the page. The copy revealed inside the
    /// check-in section sets this so its input ids don't collide with the
    /// hero copy.
    #[prop_or_default]
    pub join: bool,
}

/// Waitlist signup form: name and email required, referral code optional.
///
/// Fields validate on blur and clear their error on input. A valid submit
/// logs the payload, resets the fields, closes any open popup and opens
/// the thanks popup shortly after.
#[function_component(WaitlistForm)]
pub fn waitlist_form(props: &WaitlistFormProps) -> Html {
    let manager = use_context::<PopupManager>().expect("popup context missing");

    let name = use_state(String::new);
    let email = use_state(String::new);
    let referral = use_state(String::new);
    let name_error = use_state(|| None::<&'static str>);
    let email_error = use_state(|| None::<&'static str>);
    let referral_error = use_state(|| None::<&'static str>);
    // Holds the pending thanks-popup timer so unmounting cancels it.
    let chain = use_mut_ref(|| None::<Timeout>);

    let (name_id, email_id, referral_id) = if props.join {
        ("name-join", "email-join", "referral-join")
    } else {
        ("name", "email", "referral")
    };

    let oninput = |value: &UseStateHandle<String>, error: &UseStateHandle<Option<&'static str>>| {
        let value = value.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
            if error.is_some() {
                error.set(None);
            }
        })
    };

    let onblur = |kind: FieldKind, error: &UseStateHandle<Option<&'static str>>| {
        let error = error.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            error.set(rules::validate(kind, &input.value()).err());
        })
    };

    let onsubmit = {
        let manager = manager.clone();
        let name = name.clone();
        let email = email.clone();
        let referral = referral.clone();
        let name_error = name_error.clone();
        let email_error = email_error.clone();
        let referral_error = referral_error.clone();
        let chain = chain.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name_check = rules::validate(FieldKind::Name, &name);
            let email_check = rules::validate(FieldKind::Email, &email);
            let referral_check = rules::validate(FieldKind::Referral, &referral);
            name_error.set(name_check.err());
            email_error.set(email_check.err());
            referral_error.set(referral_check.err());
            if name_check.is_err() || email_check.is_err() || referral_check.is_err() {
                return;
            }

            let payload = WaitlistPayload::from_fields(&name, &email, &referral);
            gloo_console::log!(
                "Form data:",
                serde_json::to_string(&payload).unwrap_or_default()
            );

            name.set(String::new());
            email.set(String::new());
            referral.set(String::new());

            manager.close(PopupKind::Login, true);
            manager.close(PopupKind::Confirm, true);
            let manager = manager.clone();
            *chain.borrow_mut() = Some(Timeout::new(popup::THANKS_CHAIN_DELAY_MS, move || {
                manager.open_thanks();
            }));
        })
    };

    html! {
        <form class="hero_form" novalidate=true onsubmit={onsubmit}>
            <div class={classes!(
                "input-wrapper",
                name_error.is_some().then_some("input-wrapper--error")
            )}>
                <input
                    type="text"
                    id={name_id}
                    placeholder="Name"
                    value={(*name).clone()}
                    oninput={oninput(&name, &name_error)}
                    onblur={onblur(FieldKind::Name, &name_error)}
                />
            </div>
            if let Some(message) = *name_error {
                <span class="error-message" data-field-error={name_id}>{message}</span>
            }
            <div class={classes!(
                "input-wrapper",
                email_error.is_some().then_some("input-wrapper--error")
            )}>
                <input
                    type="email"
                    id={email_id}
                    placeholder="Email"
                    value={(*email).clone()}
                    oninput={oninput(&email, &email_error)}
                    onblur={onblur(FieldKind::Email, &email_error)}
                />
            </div>
            if let Some(message) = *email_error {
                <span class="error-message" data-field-error={email_id}>{message}</span>
            }
            <div class={classes!(
                "input-wrapper",
                referral_error.is_some().then_some("input-wrapper--error")
            )}>
                <input
                    type="text"
                    id={referral_id}
                    placeholder="Referral code (optional)"
                    value={(*referral).clone()}
                    oninput={oninput(&referral, &referral_error)}
                    onblur={onblur(FieldKind::Referral, &referral_error)}
                />
            </div>
            if let Some(message) = *referral_error {
                <span class="error-message" data-field-error={referral_id}>{message}</span>
            }
            <button type="submit" class="hero_form-button">{"Join the waitlist"}</button>
        </form>
    }
}
