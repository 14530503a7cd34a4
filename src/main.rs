use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod scroll_lock;
mod anim {
    pub mod banner;
    pub mod easing;
    pub mod hijack;
    pub mod reveal;
    pub mod ring;
    pub mod stack;
}
mod forms {
    pub mod rules;
    pub mod waitlist;
}
mod popups {
    pub mod confirm;
    pub mod login;
    pub mod manager;
    pub mod thanks;
}
mod sections {
    pub mod check_in;
    pub mod how_it_works;
}
mod pages {
    pub mod home;
    pub mod profile;
}

use pages::{home::Home, profile::Profile};
use popups::manager::{PopupManager, PopupProvider};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/profile")]
    Profile,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::Profile => {
            info!("Rendering Profile page");
            html! { <Profile /> }
        }
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let manager = use_context::<PopupManager>().expect("popup context missing");

    let open_login = {
        let manager = manager.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            manager.open_login();
        })
    };

    let jump_to_form = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        pages::home::scroll_to_waitlist_form();
    });

    html! {
        <header class="header">
            <div class="container">
                <Link<Route> to={Route::Home} classes="header_logo">
                    {"Daily Nudge"}
                </Link<Route>>
                <div class="header_buttons">
                    <button class="header_button-login" onclick={open_login}>
                        {"Log in"}
                    </button>
                    <button class="header_button-join" onclick={jump_to_form}>
                        {"Join"}
                    </button>
                </div>
            </div>
        </header>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <PopupProvider>
                <Nav />
                <Switch<Route> render={switch} />
            </PopupProvider>
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
