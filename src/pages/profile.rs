use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys;
use web_sys::{HtmlDocument, HtmlElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::anim::ring;
use crate::config::ring::{CIRCUMFERENCE, DURATION_MS, START_DELAY_MS};
use crate::config::toast;

/// Counts the progress ring up to its `data-target` percentage once the
/// page has settled. The fill circle reads `--progress-offset` from the
/// section, so the loop only touches that property and the label text.
struct RingRuntime {
    section: HtmlElement,
    number: HtmlElement,
    target: i32,
    start_timer: RefCell<Option<Timeout>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl RingRuntime {
    fn mount(section: HtmlElement) -> Option<Rc<Self>> {
        section
            .query_selector(".profile_progress-bar-fill")
            .ok()
            .flatten()?;
        let number = section
            .query_selector(".profile_progress-number")
            .ok()
            .flatten()
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())?;
        let raw = number
            .get_attribute("data-target")
            .filter(|value| !value.is_empty())
            .or_else(|| number.text_content())
            .unwrap_or_default();
        let target = ring::parse_target(&raw)?;
        let runtime = Rc::new(Self {
            section,
            number,
            target,
            start_timer: RefCell::new(None),
            frame: RefCell::new(None),
        });
        runtime.schedule_start();
        Some(runtime)
    }

    fn schedule_start(self: &Rc<Self>) {
        let runtime = Rc::clone(self);
        *self.start_timer.borrow_mut() = Some(Timeout::new(START_DELAY_MS, move || {
            runtime.start_timer.borrow_mut().take();
            runtime.step(js_sys::Date::now());
        }));
    }

    fn step(self: &Rc<Self>, start: f64) {
        let t = ((js_sys::Date::now() - start) / DURATION_MS).min(1.0);
        let frame = ring::frame(t, self.target);
        let _ = self
            .section
            .style()
            .set_property("--progress-offset", &frame.offset.to_string());
        self.number
            .set_text_content(Some(&format!("{}%", frame.label)));
        if t >= 1.0 {
            return;
        }
        let runtime = Rc::clone(self);
        *self.frame.borrow_mut() = Some(request_animation_frame(move |_| {
            runtime.frame.borrow_mut().take();
            runtime.step(start);
        }));
    }

    fn teardown(&self) {
        self.start_timer.borrow_mut().take();
        self.frame.borrow_mut().take();
    }
}

/// Pending feedback handles for the copy button. Replacing a slot drops
/// the previous handle, which cancels it.
#[derive(Default)]
struct CopyFeedback {
    flash: Option<Timeout>,
    toast_show: Option<AnimationFrame>,
    toast_hide: Option<Timeout>,
    toast_remove: Option<Timeout>,
}

impl CopyFeedback {
    fn clear(&mut self) {
        self.flash.take();
        self.toast_show.take();
        self.toast_hide.take();
        self.toast_remove.take();
    }
}

fn apply_copy_feedback(
    button: &HtmlElement,
    wrapper: &HtmlElement,
    feedback: &Rc<RefCell<CopyFeedback>>,
) {
    let _ = button.class_list().add_1("copied");
    show_copy_toast(wrapper, feedback);
    let button = button.clone();
    let slots = Rc::clone(feedback);
    feedback.borrow_mut().flash = Some(Timeout::new(toast::COPIED_FLASH_MS, move || {
        slots.borrow_mut().flash.take();
        let _ = button.class_list().remove_1("copied");
    }));
}

fn show_copy_toast(wrapper: &HtmlElement, feedback: &Rc<RefCell<CopyFeedback>>) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    // only one toast at a time, wherever the previous one was mounted
    if let Ok(Some(existing)) = document.query_selector(".copy-toast") {
        existing.remove();
    }
    let Ok(toast_node) = document.create_element("div") else {
        return;
    };
    toast_node.set_class_name("copy-toast");
    toast_node.set_text_content(Some("Copied!"));
    let _ = wrapper.append_child(&toast_node);

    let show_target = toast_node.clone();
    let show_slots = Rc::clone(feedback);
    feedback.borrow_mut().toast_show = Some(request_animation_frame(move |_| {
        show_slots.borrow_mut().toast_show.take();
        let _ = show_target.class_list().add_1("copy-toast--show");
    }));

    let hide_slots = Rc::clone(feedback);
    feedback.borrow_mut().toast_hide = Some(Timeout::new(toast::SHOW_MS, move || {
        let _ = toast_node.class_list().remove_1("copy-toast--show");
        let remove_slots = Rc::clone(&hide_slots);
        let mut slots = hide_slots.borrow_mut();
        slots.toast_hide.take();
        slots.toast_remove = Some(Timeout::new(toast::FADE_MS, move || {
            remove_slots.borrow_mut().toast_remove.take();
            toast_node.remove();
        }));
    }));
}

fn fallback_copy(text: &str) -> bool {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    let Some(body) = document.body() else {
        return false;
    };
    let Ok(node) = document.create_element("textarea") else {
        return false;
    };
    let Ok(textarea) = node.dyn_into::<HtmlTextAreaElement>() else {
        return false;
    };
    textarea.set_value(text);
    let style = textarea.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("left", "-999999px");
    let _ = style.set_property("top", "-999999px");
    if body.append_child(&textarea).is_err() {
        return false;
    }
    let _ = textarea.focus();
    textarea.select();
    let copied = document
        .dyn_ref::<HtmlDocument>()
        .map_or(false, |doc| match doc.exec_command("copy") {
            Ok(_) => true,
            Err(err) => {
                gloo_console::error!("Fallback copy failed:", err);
                false
            }
        });
    textarea.remove();
    copied
}

#[function_component(Profile)]
pub fn profile() -> Html {
    let progress_ref = use_node_ref();
    let wrapper_ref = use_node_ref();
    let link_ref = use_node_ref();
    let button_ref = use_node_ref();
    let feedback = use_mut_ref(CopyFeedback::default);

    {
        let progress_ref = progress_ref.clone();
        let feedback = feedback.clone();
        use_effect_with_deps(
            move |_| {
                let ring = progress_ref.cast::<HtmlElement>().and_then(RingRuntime::mount);
                move || {
                    if let Some(ring) = ring {
                        ring.teardown();
                    }
                    feedback.borrow_mut().clear();
                }
            },
            (),
        );
    }

    let oncopy = {
        let wrapper_ref = wrapper_ref.clone();
        let link_ref = link_ref.clone();
        let button_ref = button_ref.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: MouseEvent| {
            let (Some(wrapper), Some(link), Some(button)) = (
                wrapper_ref.cast::<HtmlElement>(),
                link_ref.cast::<HtmlElement>(),
                button_ref.cast::<HtmlElement>(),
            ) else {
                return;
            };
            let text = link.text_content().unwrap_or_default().trim().to_string();
            let Some(window) = web_sys::window() else {
                return;
            };
            if window.is_secure_context() {
                let clipboard = window.navigator().clipboard();
                let feedback = Rc::clone(&feedback);
                spawn_local(async move {
                    match JsFuture::from(clipboard.write_text(&text)).await {
                        Ok(_) => apply_copy_feedback(&button, &wrapper, &feedback),
                        Err(err) => gloo_console::error!("Failed to copy text:", err),
                    }
                });
            } else if fallback_copy(&text) {
                apply_copy_feedback(&button, &wrapper, &feedback);
            }
        })
    };

    html! {
        <section class="profile">
            <div class="container">
                <h1 class="profile_title">{"Your spot in line"}</h1>
                <div
                    class="profile_progress"
                    ref={progress_ref}
                    style={format!("--progress-offset: {};", CIRCUMFERENCE)}
                >
                    <svg class="profile_progress-bar" viewBox="0 0 200 200" aria-hidden="true">
                        <circle class="profile_progress-bar-track" cx="100" cy="100" r="85" />
                        <circle class="profile_progress-bar-fill" cx="100" cy="100" r="85" />
                    </svg>
                    <span class="profile_progress-number" data-target="73">{"0%"}</span>
                </div>
                <p class="profile_progress-description">
                    {"You're ahead of most of the waitlist. Invites go out from the front."}
                </p>
                <div class="profile_refferal">
                    <h2 class="profile_refferal-title">{"Skip ahead"}</h2>
                    <p class="profile_refferal-description">
                        {"Share your link. Every friend who joins moves you up."}
                    </p>
                    <div class="profile_refferal-link-wrapper" ref={wrapper_ref}>
                        <span class="profile_refferal-link" ref={link_ref}>
                            {"https://dailynudge.app/r/7H3X2K"}
                        </span>
                        <button
                            type="button"
                            class="profile_refferal-link-copy"
                            onclick={oncopy}
                            ref={button_ref}
                        >
                            {"Copy"}
                        </button>
                    </div>
                </div>
            </div>
        </section>
    }
}
