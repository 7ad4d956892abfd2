use dioxus::prelude::*;

use ui::{use_session, Action, SessionProvider};
use views::{Feed, Login, Notebook, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/?:recipe")]
    Root { recipe: String },
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/feed")]
    Feed {},
    #[route("/notebook")]
    Notebook {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        dotenvy::dotenv().ok();
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/feed`. A shared link (`/?recipe=<id>`) opens that recipe.
#[component]
fn Root(recipe: String) -> Element {
    let session = use_session();
    let nav = use_navigator();
    use_hook(move || {
        if !recipe.is_empty() {
            session.dispatch(Action::ShowRecipe(Some(recipe)));
        }
    });
    nav.replace(Route::Feed {});
    rsx! {}
}
