//! Popup orchestration: one popup active at a time, scroll locked while it
//! is up, open/close choreographed through CSS classes.
//!
//! The manager is an explicit context value. Components call
//! [`PopupManager::open`] and friends; the provider component owns the
//! actual state, the scroll lock and every pending timer.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};
use yew::prelude::*;

use crate::config::popup;
use crate::popups::confirm::ConfirmPopup;
use crate::popups::login::LoginPopup;
use crate::popups::thanks::ThanksPopup;
use crate::scroll_lock::ScrollLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupKind {
    Login,
    Thanks,
    Confirm,
}

impl PopupKind {
    pub fn css_class(self) -> &'static str {
        match self {
            PopupKind::Login => "login-popup",
            PopupKind::Thanks => "thanks-popup",
            PopupKind::Confirm => "confirm-popup",
        }
    }

    fn slot(self) -> usize {
        match self {
            PopupKind::Login => 0,
            PopupKind::Thanks => 1,
            PopupKind::Confirm => 2,
        }
    }
}

/// Where a popup node currently is in its open/close transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopupPhase {
    /// `display: none`.
    #[default]
    Hidden,
    /// Displayed but without the active class: the frame before the open
    /// transition, or the close transition playing out.
    Mounted,
    /// Displayed with `popup--active`.
    Active,
}

/// Render-side snapshot of all three popup phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopupPhases {
    phases: [PopupPhase; 3],
}

impl PopupPhases {
    pub fn get(self, kind: PopupKind) -> PopupPhase {
        self.phases[kind.slot()]
    }

    fn set(&mut self, kind: PopupKind, phase: PopupPhase) {
        self.phases[kind.slot()] = phase;
    }
}

/// Handle handed out through context. Cheap to clone.
#[derive(Clone, PartialEq)]
pub struct PopupManager {
    open: Callback<PopupKind>,
    close: Callback<(PopupKind, bool)>,
}

impl PopupManager {
    pub fn open(&self, kind: PopupKind) {
        self.open.emit(kind);
    }

    /// `animate` keeps the node displayed through the close transition
    /// before hiding it.
    pub fn close(&self, kind: PopupKind, animate: bool) {
        self.close.emit((kind, animate));
    }

    pub fn open_login(&self) {
        self.open(PopupKind::Login);
    }

    pub fn open_thanks(&self) {
        self.open(PopupKind::Thanks);
    }

    pub fn open_confirm(&self) {
        self.open(PopupKind::Confirm);
    }
}

struct PopupRuntime {
    active: Option<PopupKind>,
    phases: PopupPhases,
    lock: ScrollLock,
    close_timers: [Option<Timeout>; 3],
    show_frame: Option<AnimationFrame>,
    focus_timer: Option<Timeout>,
}

impl PopupRuntime {
    fn new() -> Self {
        Self {
            active: None,
            phases: PopupPhases::default(),
            lock: ScrollLock::new(),
            close_timers: [None, None, None],
            show_frame: None,
            focus_timer: None,
        }
    }
}

type Runtime = Rc<RefCell<PopupRuntime>>;

fn sync(runtime: &Runtime, view: &UseStateHandle<PopupPhases>) {
    view.set(runtime.borrow().phases);
}

fn open_popup(runtime: &Runtime, view: &UseStateHandle<PopupPhases>, kind: PopupKind) {
    let other = runtime.borrow().active.filter(|k| *k != kind);
    if let Some(other) = other {
        close_popup(runtime, view, other, false);
    }

    {
        let mut rt = runtime.borrow_mut();
        rt.active = Some(kind);
        // a pending hide for this popup would fight the reopen
        rt.close_timers[kind.slot()] = None;
        if rt.phases.get(kind) == PopupPhase::Hidden {
            rt.phases.set(kind, PopupPhase::Mounted);
        }
        rt.lock.lock();
    }
    sync(runtime, view);

    // Two frames between display and the active class, so the open
    // transition starts from the hidden styles.
    let frame = {
        let runtime = runtime.clone();
        let view = view.clone();
        request_animation_frame(move |_| {
            let inner = {
                let runtime = runtime.clone();
                let view = view.clone();
                request_animation_frame(move |_| {
                    {
                        let mut rt = runtime.borrow_mut();
                        if rt.active != Some(kind) {
                            return;
                        }
                        rt.phases.set(kind, PopupPhase::Active);
                    }
                    sync(&runtime, &view);
                })
            };
            runtime.borrow_mut().show_frame = Some(inner);
        })
    };

    let focus = {
        let selector = format!(".{} input", kind.css_class());
        Timeout::new(popup::FOCUS_DELAY_MS, move || {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Ok(Some(input)) = document.query_selector(&selector) {
                if let Some(input) = input.dyn_ref::<HtmlElement>() {
                    let _ = input.focus();
                }
            }
        })
    };

    let mut rt = runtime.borrow_mut();
    rt.show_frame = Some(frame);
    rt.focus_timer = Some(focus);
}

fn close_popup(runtime: &Runtime, view: &UseStateHandle<PopupPhases>, kind: PopupKind, animate: bool) {
    {
        let mut rt = runtime.borrow_mut();
        if rt.phases.get(kind) == PopupPhase::Hidden {
            return;
        }
        rt.phases.set(kind, PopupPhase::Mounted);
    }
    sync(runtime, view);

    let finish = {
        let runtime = runtime.clone();
        let view = view.clone();
        move || {
            {
                let mut rt = runtime.borrow_mut();
                rt.close_timers[kind.slot()] = None;
                rt.phases.set(kind, PopupPhase::Hidden);
                if rt.active == Some(kind) {
                    rt.active = None;
                    rt.lock.unlock();
                }
            }
            sync(&runtime, &view);
        }
    };

    if animate {
        let timer = Timeout::new(popup::CLOSE_ANIMATION_MS, finish);
        runtime.borrow_mut().close_timers[kind.slot()] = Some(timer);
    } else {
        finish();
    }
}

#[derive(Properties, PartialEq)]
pub struct PopupProviderProps {
    pub children: Children,
}

/// Owns popup state and provides the [`PopupManager`] context to everything
/// under it, rendering the popup nodes themselves last.
#[function_component(PopupProvider)]
pub fn popup_provider(props: &PopupProviderProps) -> Html {
    let phases = use_state(PopupPhases::default);
    let runtime: Runtime = use_mut_ref(PopupRuntime::new);

    let open = {
        let phases = phases.clone();
        let runtime = runtime.clone();
        Callback::from(move |kind: PopupKind| {
            open_popup(&runtime, &phases, kind);
        })
    };

    let close = {
        let phases = phases.clone();
        let runtime = runtime.clone();
        Callback::from(move |(kind, animate): (PopupKind, bool)| {
            close_popup(&runtime, &phases, kind, animate);
        })
    };

    let manager = PopupManager { open, close };

    {
        let manager = manager.clone();
        let runtime = runtime.clone();
        use_effect_with_deps(
            move |_| {
                let document = web_sys::window().unwrap().document().unwrap();
                let listener = EventListener::new(&document, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if event.key() != "Escape" {
                        return;
                    }
                    let active = runtime.borrow().active;
                    if let Some(kind) = active {
                        manager.close(kind, true);
                    }
                });
                move || drop(listener)
            },
            (),
        );
    }

    html! {
        <ContextProvider<PopupManager> context={manager}>
            { for props.children.iter() }
            <LoginPopup phase={phases.get(PopupKind::Login)} />
            <ThanksPopup phase={phases.get(PopupKind::Thanks)} />
            <ConfirmPopup phase={phases.get(PopupKind::Confirm)} />
        </ContextProvider<PopupManager>>
    }
}
