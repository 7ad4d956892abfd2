//! The offline notebook page. Everything here reads and writes the local
//! [`Notebook`](store::Notebook); the server is never contacted.

use dioxus::prelude::*;
use store::notebook::export_filename;
use store::schema::Tier;
use store::{LegacyRecipe, NotebookStats, StoreError};

use crate::browser::{download_json, read_picked_file};
use crate::client::make_notebook;
use crate::details::{format_date, humanize, rating_stars, render_details};
use crate::form::RecipeForm;
use crate::recipe_form::RecipeFormDialog;
use crate::session::use_session;

const IMPORT_INPUT_ID: &str = "notebook-import";

fn format_average(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{unit}"),
        None => "N/A".to_string(),
    }
}

#[component]
fn StatsPanel(stats: NotebookStats) -> Element {
    let bean = stats.most_used_bean.clone().unwrap_or_else(|| "N/A".into());
    let method = stats
        .most_used_brew_method
        .as_deref()
        .map(humanize)
        .unwrap_or_else(|| "N/A".into());

    rsx! {
        dl {
            class: "notebook-stats",
            div { dt { "Total recipes" } dd { "{stats.total}" } }
            div { dt { "Average rating" } dd { {format_average(stats.avg_rating, "/10")} } }
            div { dt { "Average coffee" } dd { {format_average(stats.avg_coffee_amount, "g")} } }
            div { dt { "Average water temp" } dd { {format_average(stats.avg_water_temp, "°C")} } }
            div { dt { "Most used bean" } dd { "{bean}" } }
            div { dt { "Most used method" } dd { "{method}" } }
        }
    }
}

#[component]
fn NotebookEntry(
    recipe: LegacyRecipe,
    expanded: bool,
    on_toggle: EventHandler<()>,
    on_edit: EventHandler<()>,
    on_duplicate: EventHandler<()>,
    on_delete: EventHandler<()>,
) -> Element {
    let view = recipe.to_recipe();
    let stars = view.rating.map(rating_stars);
    let date = view
        .date_created
        .as_deref()
        .and_then(format_date)
        .unwrap_or_default();
    let lines = render_details(&view, if expanded { Tier::Pro } else { Tier::Basic });

    rsx! {
        article {
            class: "recipe-card",
            header {
                class: "recipe-card-header",
                h3 { "{view.recipe_name}" }
                span { class: "recipe-date", "{date}" }
            }
            if let Some(stars) = stars {
                div { class: "recipe-rating", "{stars}" }
            }
            p { class: "recipe-description", "{view.description}" }
            dl {
                class: "recipe-details",
                for line in lines {
                    div {
                        key: "{line.label}",
                        class: "recipe-detail",
                        dt { "{line.label}:" }
                        dd { "{line.value}" }
                    }
                }
            }
            div {
                class: "recipe-actions",
                button {
                    class: "secondary",
                    onclick: move |_| on_toggle.call(()),
                    if expanded { "Less" } else { "Details" }
                }
                button { class: "secondary", onclick: move |_| on_edit.call(()), "Edit" }
                button { class: "secondary", onclick: move |_| on_duplicate.call(()), "Duplicate" }
                button { class: "danger", onclick: move |_| on_delete.call(()), "Delete" }
            }
        }
    }
}

/// The notebook page. `nav` renders in the page header.
#[component]
pub fn NotebookView(nav: Element) -> Element {
    let session = use_session();
    let notifier = session.notifier;
    let mut notebook = use_signal({
        let store = session.store.0.clone();
        move || make_notebook(store)
    });
    let mut query = use_signal(String::new);
    let mut editor = use_signal(|| None::<RecipeForm>);
    let mut expanded = use_signal(|| None::<String>);

    let (visible, stats, total) = {
        let nb = notebook.read();
        let visible: Vec<LegacyRecipe> = nb.search(&query()).into_iter().cloned().collect();
        (visible, nb.stats(), nb.len())
    };

    let save = move |form: RecipeForm| {
        let recipe = match form.to_legacy() {
            Ok(recipe) => recipe,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        let result = match form.editing_id.as_deref() {
            Some(id) => notebook.write().update(id, recipe),
            None => notebook.write().add(recipe),
        };
        match result {
            Ok(()) => {
                notifier.success("Recipe saved successfully!");
                editor.set(None);
            }
            Err(e) => {
                tracing::error!("saving notebook recipe: {e}");
                notifier.error(format!("Error saving recipe: {e}"));
            }
        }
    };

    let export = move |_| {
        let json = notebook.read().export_json();
        match json {
            Ok(json) => {
                let filename = export_filename(chrono::Local::now().date_naive());
                download_json(&filename, &json);
                notifier.success("Recipes exported successfully!");
            }
            Err(StoreError::NothingToExport) => notifier.warning("No recipes to export!"),
            Err(e) => notifier.error(e.to_string()),
        }
    };

    let import = move |_| {
        spawn(async move {
            let Some(contents) = read_picked_file(IMPORT_INPUT_ID).await else {
                return;
            };
            let result = notebook.write().import_json(&contents);
            match result {
                Ok(count) => notifier.success(format!("Successfully imported {count} recipes!")),
                Err(StoreError::NotAnArray) => {
                    notifier.error(StoreError::NotAnArray.to_string())
                }
                Err(e) => {
                    tracing::warn!("notebook import failed: {e}");
                    notifier.error("Error reading file. Please ensure it's a valid JSON file.");
                }
            }
        });
    };

    rsx! {
        div {
            class: "app-shell",
            header {
                class: "navbar",
                div { class: "navbar-brand", span { "Recipe Notebook" } }
                input {
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Search saved recipes...",
                    value: query(),
                    oninput: move |evt| query.set(evt.value()),
                }
                div { class: "navbar-actions", {nav} }
            }

            main {
                class: "app-main notebook",
                div {
                    class: "notebook-toolbar",
                    button {
                        class: "primary",
                        onclick: move |_| editor.set(Some(RecipeForm::default())),
                        "New Recipe"
                    }
                    button { class: "secondary", onclick: export, "Export" }
                    button { class: "secondary", onclick: import, "Import" }
                    input {
                        id: IMPORT_INPUT_ID,
                        r#type: "file",
                        accept: ".json,application/json",
                        style: "display: none",
                    }
                }

                if let Some(stats) = stats {
                    StatsPanel { stats }
                }

                if total == 0 {
                    div {
                        class: "feed-empty",
                        h3 { "No recipes yet" }
                        p { "Create your first recipe to start your notebook." }
                    }
                } else if visible.is_empty() {
                    p { class: "feed-empty", "No recipes match your search." }
                }

                div {
                    class: "recipe-list",
                    for recipe in visible {
                        NotebookEntry {
                            key: "{recipe.id}",
                            expanded: expanded.read().as_deref() == Some(recipe.id.as_str()),
                            on_toggle: {
                                let id = recipe.id.clone();
                                move |_| {
                                    let open = expanded.peek().as_deref() == Some(id.as_str());
                                    expanded.set(if open { None } else { Some(id.clone()) });
                                }
                            },
                            on_edit: {
                                let form = RecipeForm::from_legacy(&recipe);
                                move |_| {
                                    editor.set(Some(form.clone()));
                                    notifier.info("Recipe loaded for editing");
                                }
                            },
                            on_duplicate: {
                                let id = recipe.id.clone();
                                move |_| {
                                    let result = notebook.write().duplicate(&id).map(|_| ());
                                    match result {
                                        Ok(()) => notifier.success("Recipe duplicated successfully!"),
                                        Err(e) => notifier.error(e.to_string()),
                                    }
                                }
                            },
                            on_delete: {
                                let id = recipe.id.clone();
                                move |_| {
                                    let result = notebook.write().delete(&id);
                                    match result {
                                        Ok(()) => notifier.success("Recipe deleted successfully!"),
                                        Err(e) => notifier.error(e.to_string()),
                                    }
                                }
                            },
                            recipe: recipe.clone(),
                        }
                    }
                }
            }
        }

        if let Some(form) = editor() {
            RecipeFormDialog {
                title: String::from(if form.is_editing() { "Edit Recipe" } else { "New Recipe" }),
                show_privacy: false,
                initial: form,
                on_submit: save,
                on_close: move |_| editor.set(None),
            }
        }
    }
}
