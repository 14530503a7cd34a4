use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::forms::waitlist::WaitlistForm;
use crate::sections::check_in::CheckIn;
use crate::sections::how_it_works::HowItWorks;

/// Smooth-scrolls the hero waitlist form into the middle of the viewport.
/// Used by the header join button and the closing call-to-action.
pub(crate) fn scroll_to_waitlist_form() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Ok(Some(form)) = document.query_selector(".hero .hero_form") else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    form.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component(Home)]
pub fn home() -> Html {
    let on_turns_click = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        scroll_to_waitlist_form();
    });

    html! {
        <>
            <section class="hero">
                <div class="container">
                    <h1 class="hero_title">{"Show up for the things that matter"}</h1>
                    <p class="hero_subtitle">
                        {"A daily check-in for the habits you keep meaning to keep. \
                          We're letting people in gradually, grab a spot."}
                    </p>
                    <WaitlistForm />
                </div>
            </section>
            <CheckIn />
            <HowItWorks />
            <section class="turns">
                <div class="container">
                    <h2 class="turns_title">{"It turns showing up into something you look forward to"}</h2>
                    <a href="#" class="turns_button" onclick={on_turns_click}>
                        {"Join the waitlist"}
                    </a>
                </div>
            </section>
        </>
    }
}
