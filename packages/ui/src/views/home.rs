use dioxus::prelude::*;

use crate::feed_panel::FeedPanel;
use crate::form::{RecipeForm, Submission};
use crate::recipe_form::RecipeFormDialog;
use crate::session::use_session;
use crate::sidebar::Sidebar;
use crate::state::Action;
use crate::views::{RecipeDetailView, UserProfileView};
use crate::Navbar;

/// The signed-in feed page: navbar, sidebar, feed, and whichever dialog is open.
/// `nav` renders inside the navbar (links to other routes).
#[component]
pub fn HomeView(nav: Element) -> Element {
    let session = use_session();
    let (form, selected_recipe, selected_user) = {
        let state = session.state.read();
        (
            state.form.clone(),
            state.selected_recipe.clone(),
            state.selected_user.clone(),
        )
    };

    let submit = {
        let session = session.clone();
        move |form: RecipeForm| {
            let user_id = session.state.peek().user_id().map(str::to_string);
            let draft = match form.submission(user_id.as_deref()) {
                Ok(Submission::Create(draft)) => draft,
                Ok(Submission::Update { id }) => {
                    tracing::info!("edit submitted for recipe {id}");
                    session.notifier.info("Recipe update feature coming soon!");
                    return;
                }
                Err(e) => {
                    session.notifier.error(e.to_string());
                    return;
                }
            };
            let session = session.clone();
            spawn(async move {
                match session.api.create_recipe(&draft).await {
                    Ok(recipe) => {
                        session.notifier.success("Recipe created successfully!");
                        session.dispatch(Action::CloseForm);
                        session.dispatch(Action::RefreshFeed);
                        session.record(format!("Created recipe \"{}\"", recipe.recipe_name));
                    }
                    Err(e) => {
                        tracing::error!("creating recipe: {e}");
                        session.notifier.error("Error saving recipe. Please try again.");
                    }
                }
            });
        }
    };

    let close_form = {
        let session = session.clone();
        move |_| session.dispatch(Action::CloseForm)
    };
    let close_recipe = {
        let session = session.clone();
        move |_| session.dispatch(Action::ShowRecipe(None))
    };
    let close_user = {
        let session = session.clone();
        move |_| session.dispatch(Action::ShowUser(None))
    };

    rsx! {
        div {
            class: "app-shell",
            Navbar { {nav} }
            div {
                class: "app-body",
                Sidebar {}
                main { class: "app-main", FeedPanel {} }
            }
        }

        if let Some(form) = form {
            RecipeFormDialog {
                title: String::from(if form.is_editing() { "Edit Recipe" } else { "Create New Recipe" }),
                initial: form,
                on_submit: submit,
                on_close: close_form,
            }
        }
        if let Some(id) = selected_recipe {
            RecipeDetailView { key: "{id}", recipe_id: id.clone(), on_close: close_recipe }
        }
        if let Some(id) = selected_user {
            UserProfileView { key: "{id}", user_id: id.clone(), on_close: close_user }
        }
    }
}
