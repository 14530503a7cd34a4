//! How-it-works section: when the section top reaches the viewport top the
//! page locks and wheel input collapses the step cards into a deck. Unlike
//! the check-in fly-out this one is reversible, and it can replay after the
//! user scrolls away and comes back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;
use web_sys::{
    Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollToOptions, WheelEvent,
};
use yew::prelude::*;

use crate::anim::hijack::{HijackSession, WheelPolicy};
use crate::anim::stack;
use crate::config::how_it_works;
use crate::scroll_lock::ScrollLock;

const STEPS: [(&str, &str); 4] = [
    (
        "Pick your habits",
        "Choose up to five things you want to show up for. Small ones work best.",
    ),
    (
        "Get one nudge a day",
        "A single reminder at the time you chose. Never a second one.",
    ),
    (
        "Check in with one tap",
        "Done takes a second. Missed takes zero, tomorrow is already waiting.",
    ),
    (
        "Watch the streak grow",
        "Your history builds itself. Share it or keep it to yourself.",
    ),
];

#[function_component(HowItWorks)]
pub fn how_it_works_section() -> Html {
    let section_ref = use_node_ref();

    {
        let section_ref = section_ref.clone();
        use_effect_with_deps(
            move |_| {
                let runtime = section_ref
                    .cast::<HtmlElement>()
                    .map(HowItWorksRuntime::mount);
                move || {
                    if let Some(runtime) = runtime {
                        runtime.teardown();
                    }
                }
            },
            (),
        );
    }

    html! {
        <section class="how-it-works" ref={section_ref}>
            <div class="container">
                <h2 class="how-it-works_title">{"How it works"}</h2>
                <div class="how-it-works_content">
                    {
                        STEPS.iter().enumerate().map(|(index, (title, text))| html! {
                            <div
                                class="how-it-works_content-item-overlay"
                                style={format!("z-index: {};", stack::resting_z_index(index))}
                            >
                                <div class="how-it-works_content-item">
                                    <span class="how-it-works_content-item-number">
                                        { format!("{:02}", index + 1) }
                                    </span>
                                    <h3 class="how-it-works_content-item-title">{ *title }</h3>
                                    <p class="how-it-works_content-item-text">{ *text }</p>
                                </div>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </section>
    }
}

struct HowItWorksRuntime {
    section: HtmlElement,
    cards: Vec<HtmlElement>,
    session: RefCell<HijackSession>,
    lock: RefCell<ScrollLock>,
    observer: RefCell<Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>>,
    wheel: RefCell<Option<EventListener>>,
    scroll: RefCell<Option<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    scroll_frame: RefCell<Option<AnimationFrame>>,
    settle_timer: RefCell<Option<Timeout>>,
    align_timer: RefCell<Option<Timeout>>,
    arming: Cell<bool>,
    generation: Cell<u32>,
}

impl HowItWorksRuntime {
    fn mount(section: HtmlElement) -> Rc<Self> {
        let cards = collect_elements(&section, ".how-it-works_content-item-overlay");
        let runtime = Rc::new(Self {
            section,
            cards,
            session: RefCell::new(HijackSession::new(
                WheelPolicy::Reversible,
                how_it_works::WHEEL_DIVISOR,
            )),
            lock: RefCell::new(ScrollLock::new()),
            observer: RefCell::new(None),
            wheel: RefCell::new(None),
            scroll: RefCell::new(None),
            frame: RefCell::new(None),
            scroll_frame: RefCell::new(None),
            settle_timer: RefCell::new(None),
            align_timer: RefCell::new(None),
            arming: Cell::new(false),
            generation: Cell::new(0),
        });
        if !runtime.cards.is_empty() {
            runtime.observe();
            runtime.attach_scroll_check();
        }
        runtime
    }

    fn observe(self: &Rc<Self>) {
        let runtime = Rc::clone(self);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() && !runtime.session.borrow().has_played() {
                    runtime.check_position();
                }
            }
        }) as Box<dyn FnMut(js_sys::Array)>);

        let thresholds = js_sys::Array::new();
        for threshold in [0.0, 0.1, 0.3, 0.5] {
            thresholds.push(&JsValue::from(threshold));
        }
        let options = IntersectionObserverInit::new();
        options.set_threshold(&thresholds);
        options.set_root_margin("100px 0px");
        let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        else {
            return;
        };
        observer.observe(&self.section);
        *self.observer.borrow_mut() = Some((observer, callback));
    }

    // The observer alone fires too rarely to catch the section top crossing
    // the viewport top, so a passive scroll listener re-checks every frame
    // while the section is anywhere near the viewport.
    fn attach_scroll_check(self: &Rc<Self>) {
        let window = web_sys::window().expect("window available");
        let runtime = Rc::clone(self);
        let listener = EventListener::new(&window, "scroll", move |_event: &Event| {
            runtime.on_scroll();
        });
        *self.scroll.borrow_mut() = Some(listener);
    }

    fn on_scroll(self: &Rc<Self>) {
        if self.arming.get() && !self.session.borrow().is_active() {
            return;
        }
        if self.scroll_frame.borrow().is_some() {
            return;
        }
        let runtime = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            runtime.scroll_frame.borrow_mut().take();
            let rect = runtime.section.get_bounding_client_rect();
            let viewport = window_inner_height();
            let in_range = rect.top() < viewport + how_it_works::SCROLL_CHECK_MARGIN
                && rect.bottom() > -how_it_works::SCROLL_CHECK_MARGIN;
            if in_range || runtime.session.borrow().is_active() {
                runtime.check_position();
            }
        });
        *self.scroll_frame.borrow_mut() = Some(handle);
    }

    /// Decides, from the section's viewport position, whether to arm the
    /// deck, replay it, or reset it after the user scrolled far away.
    fn check_position(self: &Rc<Self>) {
        let rect = self.section.get_bounding_client_rect();
        let viewport = window_inner_height();

        let is_at_top = rect.top() <= how_it_works::TOP_TOLERANCE
            && rect.top() >= -how_it_works::TOP_TOLERANCE
            && rect.bottom() > 0.0;
        let is_near_top = rect.top() < viewport * how_it_works::NEAR_TOP_RATIO
            && rect.top() > -how_it_works::NEAR_TOP_OVERSHOOT
            && rect.bottom() > 0.0;

        {
            let mut session = self.session.borrow_mut();
            // Scrolling back up close to a played section lets it run again.
            if !session.is_active()
                && session.has_played()
                && is_near_top
                && rect.top() > -how_it_works::REQUALIFY_OVERSHOOT
            {
                session.clear_played();
            }
            if session.has_played() && !session.is_active() {
                return;
            }
        }

        if (is_at_top || is_near_top) && !self.session.borrow().is_active() && !self.arming.get() {
            self.arm(rect.top());
        }

        if self.session.borrow().is_active() && (rect.top() > viewport || rect.bottom() < 0.0) {
            self.reset_after_exit();
        }
    }

    /// Locks scroll once the section top is flush with the viewport top,
    /// smooth-scrolling it into place first when it is merely close.
    fn arm(self: &Rc<Self>, rect_top: f64) {
        self.arming.set(true);
        if rect_top.abs() > how_it_works::TOP_TOLERANCE / 2.0 {
            if let Some(window) = web_sys::window() {
                let options = ScrollToOptions::new();
                options.set_top(window.scroll_y().unwrap_or(0.0) + rect_top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }
            let generation = self.generation.get();
            let runtime = Rc::clone(self);
            *self.align_timer.borrow_mut() =
                Some(Timeout::new(how_it_works::ALIGN_DELAY_MS, move || {
                    runtime.align_timer.borrow_mut().take();
                    if runtime.generation.get() != generation {
                        return;
                    }
                    runtime.activate();
                }));
        } else {
            self.activate();
        }
    }

    fn activate(self: &Rc<Self>) {
        self.session.borrow_mut().activate();
        self.arming.set(false);
        self.lock.borrow_mut().lock();
        self.reset_cards();
        self.attach_wheel();
    }

    fn attach_wheel(self: &Rc<Self>) {
        let window = web_sys::window().expect("window available");
        let runtime = Rc::clone(self);
        let listener = EventListener::new_with_options(
            &window,
            "wheel",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                runtime.on_wheel(event);
            },
        );
        *self.wheel.borrow_mut() = Some(listener);
    }

    fn on_wheel(self: &Rc<Self>, event: &Event) {
        if !self.session.borrow().is_active() {
            return;
        }
        event.prevent_default();
        event.stop_propagation();
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        self.session.borrow_mut().feed(wheel.delta_y());
        self.queue_frame();
    }

    fn queue_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let runtime = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            runtime.frame.borrow_mut().take();
            runtime.render_cards();
            if runtime.session.borrow().is_complete() {
                runtime.begin_settle();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn render_cards(&self) {
        if !self.session.borrow().is_active() {
            return;
        }
        let global = self.session.borrow().progress();
        let heights: Vec<f64> = self
            .cards
            .iter()
            .map(|card| f64::from(card.offset_height()))
            .collect();
        for (index, card) in self.cards.iter().enumerate() {
            let frame = stack::frame(index, self.cards.len(), global, &heights);
            let style = card.style();
            let _ = style.set_property("transform", &format!("translateY({}px)", frame.y_offset));
            let _ = style.set_property("z-index", &frame.z_index.to_string());
        }
    }

    /// Once the deck is fully closed, wait a beat, then hand scroll back
    /// and mark the section as played. Scheduled at most once.
    fn begin_settle(self: &Rc<Self>) {
        if self.settle_timer.borrow().is_some() {
            return;
        }
        let generation = self.generation.get();
        let runtime = Rc::clone(self);
        *self.settle_timer.borrow_mut() =
            Some(Timeout::new(how_it_works::SETTLE_DELAY_MS, move || {
                runtime.settle_timer.borrow_mut().take();
                if runtime.generation.get() != generation {
                    return;
                }
                {
                    let mut session = runtime.session.borrow_mut();
                    session.deactivate();
                    session.mark_played();
                }
                runtime.wheel.borrow_mut().take();
                runtime.lock.borrow_mut().unlock();
            }));
    }

    /// The user ended up far from the section while it was armed. Put the
    /// cards back and forget the section ever played.
    fn reset_after_exit(self: &Rc<Self>) {
        {
            let mut session = self.session.borrow_mut();
            session.abort();
            session.clear_played();
        }
        self.generation.set(self.generation.get().wrapping_add(1));
        self.wheel.borrow_mut().take();
        self.frame.borrow_mut().take();
        self.settle_timer.borrow_mut().take();
        self.lock.borrow_mut().unlock();
        self.reset_cards();
    }

    fn reset_cards(&self) {
        for (index, card) in self.cards.iter().enumerate() {
            let style = card.style();
            let _ = style.remove_property("transform");
            let _ = style.set_property("z-index", &stack::resting_z_index(index).to_string());
        }
    }

    fn teardown(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.scroll.borrow_mut().take();
        self.wheel.borrow_mut().take();
        self.frame.borrow_mut().take();
        self.scroll_frame.borrow_mut().take();
        self.settle_timer.borrow_mut().take();
        self.align_timer.borrow_mut().take();
        let mut lock = self.lock.borrow_mut();
        if lock.is_locked() {
            lock.unlock();
        }
    }
}

fn collect_elements(root: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
    let mut elements = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Ok(element) = node.dyn_into::<HtmlElement>() {
                    elements.push(element);
                }
            }
        }
    }
    elements
}

fn window_inner_height() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}
