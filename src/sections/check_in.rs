//! Check-in section: once the section fills the viewport, page scroll is
//! captured and wheel input drives the banner fly-out instead. When every
//! banner has flown off, the descriptions part and the join form grows in
//! between them, then scroll is handed back.

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
    WheelEvent,
};
use yew::prelude::*;

use crate::anim::banner::{self, Offset};
use crate::anim::easing;
use crate::anim::hijack::{HijackSession, WheelPolicy};
use crate::anim::reveal;
use crate::config::check_in;
use crate::forms::waitlist::WaitlistForm;
use crate::scroll_lock::ScrollLock;

const BANNER_LABELS: [&str; 7] = [
    "Morning pages",
    "Daily stretch",
    "Read 20 minutes",
    "Inbox zero",
    "Lights out by 11",
    "Drink water",
    "Touch grass",
];

#[function_component(CheckIn)]
pub fn check_in_section() -> Html {
    let section_ref = use_node_ref();

    {
        let section_ref = section_ref.clone();
        use_effect_with_deps(
            move |_| {
                let runtime = section_ref.cast::<HtmlElement>().map(CheckInRuntime::mount);
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
        <section class="check-in" ref={section_ref}>
            <div class="container">
                <div class="check-in_banners">
                    {
                        BANNER_LABELS.iter().enumerate().map(|(index, label)| html! {
                            <div class={classes!(
                                "check-in_banner",
                                format!("check-in_banner--{}", index + 1)
                            )}>
                                { *label }
                            </div>
                        }).collect::<Html>()
                    }
                </div>
                <div class="check-in_content">
                    <h2 class="check-in_title">{"One small check-in. Every day."}</h2>
                    <p class="check-in_content-description">
                        {"Pick the habits you actually care about and check them off in \
                          seconds. No guilt trips, no 47-step routines."}
                    </p>
                    <div class="hero join" style="display: none;">
                        <h2 class="hero_title">{"Ready when you are"}</h2>
                        <WaitlistForm join=true />
                    </div>
                    <p class="check-in_content-description">
                        {"We'll nudge you at the right moment and stay out of the way the \
                          rest of the time. Your streak, your pace."}
                    </p>
                </div>
            </div>
        </section>
    }
}

/// Imperative driver behind the component. Owns the observer, the wheel
/// capture and every timer, so unmounting tears the whole thing down.
struct CheckInRuntime {
    section: HtmlElement,
    banners: Vec<HtmlElement>,
    session: RefCell<HijackSession>,
    lock: RefCell<ScrollLock>,
    initial_offsets: RefCell<Vec<Offset>>,
    observer: RefCell<Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>>,
    wheel: RefCell<Option<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    reveal_frame: RefCell<Option<AnimationFrame>>,
    settle_timer: RefCell<Option<Timeout>>,
    hide_timer: RefCell<Option<Timeout>>,
    guard_timer: RefCell<Option<Timeout>>,
    arming: Cell<bool>,
    // Bumped on abort and teardown; timers fired for an older generation bail.
    generation: Cell<u32>,
}

impl CheckInRuntime {
    fn mount(section: HtmlElement) -> Rc<Self> {
        let banners = collect_elements(&section, ".check-in_banner");
        let runtime = Rc::new(Self {
            section,
            banners,
            session: RefCell::new(HijackSession::new(
                WheelPolicy::OneWay,
                check_in::WHEEL_DIVISOR,
            )),
            lock: RefCell::new(ScrollLock::new()),
            initial_offsets: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
            wheel: RefCell::new(None),
            frame: RefCell::new(None),
            reveal_frame: RefCell::new(None),
            settle_timer: RefCell::new(None),
            hide_timer: RefCell::new(None),
            guard_timer: RefCell::new(None),
            arming: Cell::new(false),
            generation: Cell::new(0),
        });
        if !runtime.banners.is_empty() {
            runtime.observe();
        }
        runtime
    }

    fn observe(self: &Rc<Self>) {
        let runtime = Rc::clone(self);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                runtime.on_intersection(&entry);
            }
        }) as Box<dyn FnMut(js_sys::Array)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from(1.0));
        options.set_root_margin("0px");
        let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        else {
            return;
        };
        observer.observe(&self.section);
        *self.observer.borrow_mut() = Some((observer, callback));
    }

    fn on_intersection(self: &Rc<Self>, entry: &IntersectionObserverEntry) {
        if entry.is_intersecting() && entry.intersection_ratio() >= 1.0 {
            self.arm();
        } else if !entry.is_intersecting() {
            self.abort_if_armed();
        }
    }

    /// Captures scroll and prepares the fly-out. Skipped while armed, while
    /// the arm guard is running, or after the animation has already played.
    fn arm(self: &Rc<Self>) {
        {
            let session = self.session.borrow();
            if session.is_active() || session.has_played() {
                return;
            }
        }
        if self.arming.get() {
            return;
        }

        self.session.borrow_mut().activate();
        self.arming.set(true);
        self.lock.borrow_mut().lock();
        self.measure_initial_offsets();
        for banner in &self.banners {
            let _ = banner.style().set_property("opacity", "1");
        }
        self.attach_wheel();

        let runtime = Rc::clone(self);
        *self.guard_timer.borrow_mut() = Some(Timeout::new(check_in::ARM_GUARD_MS, move || {
            runtime.guard_timer.borrow_mut().take();
            runtime.arming.set(false);
        }));
    }

    /// Records each banner center relative to the container center. The
    /// fly-out math works in offsets from that shared center.
    fn measure_initial_offsets(&self) {
        let Ok(Some(container)) = self.section.query_selector(".container") else {
            return;
        };
        let rect = container.get_bounding_client_rect();
        let center_x = rect.left() + rect.width() / 2.0;
        let center_y = rect.top() + rect.height() / 2.0;
        *self.initial_offsets.borrow_mut() = self
            .banners
            .iter()
            .map(|banner| {
                let rect = banner.get_bounding_client_rect();
                Offset {
                    x: rect.left() + rect.width() / 2.0 - center_x,
                    y: rect.top() + rect.height() / 2.0 - center_y,
                }
            })
            .collect();
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
            runtime.render_banners();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn render_banners(self: &Rc<Self>) {
        if !self.session.borrow().is_active() {
            return;
        }
        {
            let offsets = self.initial_offsets.borrow();
            if offsets.is_empty() {
                return;
            }
            let eased = easing::ease_in_out_cubic(self.session.borrow().progress());
            for (index, banner) in self.banners.iter().enumerate() {
                let initial = offsets.get(index).copied().unwrap_or_default();
                let frame = banner::frame(initial, index, eased);
                let style = banner.style();
                let _ = style.set_property(
                    "transform",
                    &format!(
                        "translate({}px, {}px) scale({})",
                        frame.x, frame.y, frame.scale
                    ),
                );
                let _ = style.set_property("opacity", &frame.opacity.to_string());
            }
        }
        if self.session.borrow().is_complete() {
            self.begin_settle();
        }
    }

    /// Short pause on the final banner frame, then release the wheel and
    /// start the content reveal. Scheduled at most once.
    fn begin_settle(self: &Rc<Self>) {
        if self.settle_timer.borrow().is_some() {
            return;
        }
        let generation = self.generation.get();
        let runtime = Rc::clone(self);
        *self.settle_timer.borrow_mut() = Some(Timeout::new(check_in::SETTLE_DELAY_MS, move || {
            runtime.settle_timer.borrow_mut().take();
            if runtime.generation.get() != generation {
                return;
            }
            runtime.session.borrow_mut().deactivate();
            runtime.wheel.borrow_mut().take();
            runtime.start_reveal();
        }));
    }

    fn start_reveal(self: &Rc<Self>) {
        let content = self.section.query_selector(".check-in_content").ok().flatten();
        let descriptions = collect_elements(&self.section, ".check-in_content-description");
        let join = self
            .section
            .query_selector(".hero.join")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        let Some(join) = join else {
            self.lock.borrow_mut().unlock();
            return;
        };
        if content.is_none() || descriptions.is_empty() {
            self.lock.borrow_mut().unlock();
            return;
        }

        // The join block starts invisible and collapsed so it takes no room
        // while the descriptions are still moving apart.
        let style = join.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", &format!("scale({})", check_in::JOIN_MIN_SCALE));
        let _ = style.set_property("width", "0");
        let _ = style.set_property("height", "0");
        let _ = style.set_property("overflow", "hidden");

        self.reveal_step(js_sys::Date::now(), descriptions, join);
    }

    fn reveal_step(self: &Rc<Self>, start: f64, descriptions: Vec<HtmlElement>, join: HtmlElement) {
        let t = ((js_sys::Date::now() - start) / check_in::REVEAL_DURATION_MS).min(1.0);

        for (index, description) in descriptions.iter().enumerate() {
            let frame = reveal::description_frame(t, index);
            let style = description.style();
            let _ = style.set_property("transform", &format!("translateY({}px)", frame.y_offset));
            let _ = style.set_property("opacity", &frame.opacity.to_string());
        }

        let frame = reveal::join_frame(t);
        let style = join.style();
        if frame.unclipped {
            let _ = style.remove_property("width");
            let _ = style.remove_property("height");
            let _ = style.remove_property("overflow");
        }
        let _ = style.set_property("opacity", &frame.opacity.to_string());
        let _ = style.set_property("transform", &format!("scale({})", frame.scale));

        if t < 1.0 {
            let runtime = Rc::clone(self);
            let handle = request_animation_frame(move |_| {
                runtime.reveal_frame.borrow_mut().take();
                runtime.reveal_step(start, descriptions, join);
            });
            *self.reveal_frame.borrow_mut() = Some(handle);
        } else {
            self.finish_reveal(descriptions);
        }
    }

    fn finish_reveal(self: &Rc<Self>, descriptions: Vec<HtmlElement>) {
        self.session.borrow_mut().mark_played();
        self.lock.borrow_mut().unlock();

        let generation = self.generation.get();
        let runtime = Rc::clone(self);
        *self.hide_timer.borrow_mut() = Some(Timeout::new(
            check_in::DESCRIPTION_HIDE_DELAY_MS,
            move || {
                runtime.hide_timer.borrow_mut().take();
                if runtime.generation.get() != generation {
                    return;
                }
                for description in &descriptions {
                    let _ = description.style().set_property("display", "none");
                }
            },
        ));
    }

    /// Leaving the section mid-animation resets everything so the fly-out
    /// can play again on the next full entry.
    fn abort_if_armed(self: &Rc<Self>) {
        {
            let session = self.session.borrow();
            if !session.is_active() || session.is_complete() {
                return;
            }
        }
        self.session.borrow_mut().abort();
        self.generation.set(self.generation.get().wrapping_add(1));
        self.wheel.borrow_mut().take();
        self.frame.borrow_mut().take();
        self.settle_timer.borrow_mut().take();
        self.lock.borrow_mut().unlock();
        for banner in &self.banners {
            let style = banner.style();
            let _ = style.remove_property("transform");
            let _ = style.remove_property("opacity");
        }
    }

    fn teardown(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.wheel.borrow_mut().take();
        self.frame.borrow_mut().take();
        self.reveal_frame.borrow_mut().take();
        self.settle_timer.borrow_mut().take();
        self.hide_timer.borrow_mut().take();
        self.guard_timer.borrow_mut().take();
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
