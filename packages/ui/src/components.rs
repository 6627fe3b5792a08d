//! Basic form controls shared by every page.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn--primary",
            ButtonVariant::Outline => "btn--outline",
            ButtonVariant::Danger => "btn--danger",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "".to_string())] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default = false)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let type_attr = r#type;
    rsx! {
        button {
            class: "btn {variant.class()} {class}",
            r#type: "{type_attr}",
            disabled,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default = "".to_string())] id: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = "".to_string())] value: String,
    #[props(default = false)] disabled: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    let type_attr = r#type;
    rsx! {
        input {
            id: "{id}",
            class: "input {class}",
            r#type: "{type_attr}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default = "".to_string())] id: String,
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = "".to_string())] value: String,
    #[props(default = 3)] rows: u32,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "input textarea {class}",
            placeholder: "{placeholder}",
            value: "{value}",
            rows: "{rows}",
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Label(#[props(default = "".to_string())] html_for: String, children: Element) -> Element {
    rsx! {
        label {
            class: "label",
            r#for: "{html_for}",
            {children}
        }
    }
}
