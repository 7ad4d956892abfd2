//! Create/edit dialog shared by the feed and the notebook. It edits a local
//! copy of a [`RecipeForm`] and hands it to `on_submit`; validation and
//! persistence are up to the caller.

use dioxus::prelude::*;
use store::schema::{self, estate_slug, CoreField, FieldKind, Section, INDIA_ESTATES};

use crate::details::humanize;
use crate::form::RecipeForm;
use crate::notifications::use_notifier;
use crate::views::ModalOverlay;

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Float | FieldKind::Integer => "number",
    }
}

fn step(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer => "1",
        _ => "any",
    }
}

#[component]
fn CoreInput(
    mut form: Signal<RecipeForm>,
    field: CoreField,
    #[props(default = "text")] kind: &'static str,
) -> Element {
    let value = form.read().value(field.input).to_string();
    let input = field.input;

    rsx! {
        div {
            class: "form-field",
            label { r#for: "{input}", "{field.label} *" }
            if kind == "textarea" {
                textarea {
                    id: "{input}",
                    value: value,
                    oninput: move |evt| form.write().set(input, evt.value()),
                }
            } else {
                input {
                    id: "{input}",
                    r#type: kind,
                    step: "any",
                    value: value,
                    oninput: move |evt| form.write().set(input, evt.value()),
                }
            }
        }
    }
}

#[component]
fn SchemaInput(mut form: Signal<RecipeForm>, input: &'static str) -> Element {
    let notifier = use_notifier();
    let Some(spec) = schema::field_by_input(input) else {
        return rsx! {};
    };
    let value = form.read().value(input).to_string();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        if input == "brewMethod" {
            if let Some(hint) = form.write().set_brew_method(&value) {
                notifier.info(hint);
            }
        } else {
            form.write().set(input, value);
        }
    };

    let control = if spec.name == "india_estate" {
        rsx! {
            select {
                id: "{input}",
                value: value.clone(),
                onchange: on_change,
                option { value: "", "Select estate..." }
                for name in INDIA_ESTATES.iter().copied() {
                    option { key: "{name}", value: estate_slug(name), "{name}" }
                }
            }
        }
    } else if !spec.choices.is_empty() {
        rsx! {
            select {
                id: "{input}",
                value: value.clone(),
                onchange: on_change,
                option { value: "", "Select..." }
                for choice in spec.choices.iter().copied() {
                    option { key: "{choice}", value: choice, "{humanize(choice)}" }
                }
            }
        }
    } else if spec.is_multiline() {
        rsx! {
            textarea {
                id: "{input}",
                value: value.clone(),
                oninput: on_change,
            }
        }
    } else {
        rsx! {
            input {
                id: "{input}",
                r#type: input_type(spec.kind),
                step: step(spec.kind),
                value: value.clone(),
                oninput: on_change,
            }
        }
    };

    rsx! {
        div {
            class: "form-field",
            label { r#for: "{input}", "{spec.label}" }
            {control}
        }
    }
}

/// The recipe dialog.
#[component]
pub fn RecipeFormDialog(
    initial: RecipeForm,
    title: String,
    #[props(default = true)] show_privacy: bool,
    on_submit: EventHandler<RecipeForm>,
    on_close: EventHandler<()>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let snapshot = draft.read().clone();
    let ratio = snapshot.ratio_text();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            wide: true,
            form {
                class: "recipe-form",
                onsubmit: move |evt: Event<FormData>| {
                    evt.prevent_default();
                    on_submit.call(draft.read().clone());
                },
                h2 { "{title}" }

                div {
                    class: "form-mode",
                    label {
                        input {
                            r#type: "checkbox",
                            checked: snapshot.pro_mode,
                            onchange: move |evt| draft.write().pro_mode = evt.checked(),
                        }
                        " Pro mode"
                    }
                }

                fieldset {
                    legend { "Recipe" }
                    CoreInput { form: draft, field: schema::RECIPE_NAME }
                    CoreInput { form: draft, field: schema::DESCRIPTION, kind: "textarea" }
                    CoreInput { form: draft, field: schema::RATING, kind: "number" }
                    CoreInput { form: draft, field: schema::DATE_CREATED, kind: "date" }
                }

                for section in Section::ALL {
                    if !snapshot.visible_fields(section).is_empty() {
                        fieldset {
                            key: "{section.title()}",
                            legend { "{section.title()}" }
                            for spec in snapshot.visible_fields(section) {
                                SchemaInput { key: "{spec.input}", form: draft, input: spec.input }
                            }
                            if section == Section::Brew {
                                p { class: "ratio-display", "Ratio: {ratio}" }
                            }
                        }
                    }
                }

                if show_privacy {
                    label {
                        class: "form-privacy",
                        input {
                            r#type: "checkbox",
                            checked: snapshot.is_public,
                            onchange: move |evt| draft.write().is_public = evt.checked(),
                        }
                        " Public recipe"
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        class: "primary",
                        r#type: "submit",
                        if snapshot.is_editing() { "Update Recipe" } else { "Save Recipe" }
                    }
                    button {
                        class: "secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
