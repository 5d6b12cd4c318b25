//! Field, button and link markup

use super::fragment::{js_string, jsx_attr, jsx_text, Fragment};
use crate::spec::{ButtonSpec, FieldSpec, FieldType, FormSpec, LinkSpec};

/// Label shown on the submit button while a submission is in flight
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Form-wide settings a single fragment depends on
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub loading_state: bool,
}

impl RenderContext {
    pub fn new(spec: &FormSpec) -> Self {
        Self {
            loading_state: spec.loading_state,
        }
    }
}

/// A labeled input bound to the form's validation state
pub fn render_field(field: &FieldSpec) -> Fragment {
    let control = match field.field_type {
        FieldType::Textarea => format!(
            "<Textarea placeholder={} {{...field}} />",
            jsx_attr(&field.placeholder)
        ),
        other => format!(
            "<Input type=\"{}\" placeholder={} {{...field}} />",
            other.as_str(),
            jsx_attr(&field.placeholder)
        ),
    };

    Fragment::seq([
        Fragment::line("<FormField"),
        Fragment::indent(Fragment::seq([
            Fragment::line("control={form.control}"),
            Fragment::line(format!("name=\"{}\"", field.name)),
            Fragment::line("render={({ field }) => ("),
            Fragment::indent(Fragment::block(
                "<FormItem>",
                Fragment::seq([
                    Fragment::line(format!("<FormLabel>{}</FormLabel>", jsx_text(&field.label))),
                    Fragment::block("<FormControl>", Fragment::line(control), "</FormControl>"),
                    Fragment::line("<FormMessage />"),
                ]),
                "</FormItem>",
            )),
            Fragment::line(")}"),
        ])),
        Fragment::line("/>"),
    ])
}

/// A button; only the submit button submits and reacts to the loading state
pub fn render_button(button: &ButtonSpec, is_submit: bool, ctx: &RenderContext) -> Fragment {
    let kind = if is_submit { "submit" } else { "button" };

    if is_submit && ctx.loading_state {
        Fragment::block(
            format!(
                "<Button type=\"{}\" variant=\"{}\" disabled={{isSubmitting}}>",
                kind, button.variant
            ),
            Fragment::line(format!(
                "{{isSubmitting ? {} : {}}}",
                js_string(SUBMITTING_LABEL),
                js_string(&button.name)
            )),
            "</Button>",
        )
    } else {
        Fragment::block(
            format!("<Button type=\"{}\" variant=\"{}\">", kind, button.variant),
            Fragment::line(jsx_text(&button.name)),
            "</Button>",
        )
    }
}

pub fn render_link(link: &LinkSpec) -> Fragment {
    Fragment::line(format!(
        "<Link href={} className=\"text-sm text-blue-600 hover:underline\">{}</Link>",
        jsx_attr(&link.href),
        jsx_text(&link.text)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ButtonVariant;

    #[test]
    fn test_single_line_field() {
        let mut field = FieldSpec::new("email", FieldType::Email);
        field.label = "Email".to_string();
        field.placeholder = "you@example.com".to_string();
        let out = render_field(&field).render();
        assert!(out.starts_with("<FormField\n  control={form.control}\n  name=\"email\"\n"));
        assert!(out.contains(
            "        <Input type=\"email\" placeholder=\"you@example.com\" {...field} />\n"
        ));
        assert!(out.contains("<FormLabel>Email</FormLabel>"));
        assert!(out.ends_with("/>\n"));
    }

    #[test]
    fn test_textarea_field() {
        let field = FieldSpec::new("message", FieldType::Textarea);
        let out = render_field(&field).render();
        assert!(out.contains("<Textarea placeholder=\"\" {...field} />"));
        assert!(!out.contains("<Input"));
    }

    #[test]
    fn test_submit_button_with_loading_state() {
        let ctx = RenderContext {
            loading_state: true,
        };
        let send = ButtonSpec::new("Send", ButtonVariant::Default);
        let out = render_button(&send, true, &ctx).render();
        assert_eq!(
            out,
            "<Button type=\"submit\" variant=\"default\" disabled={isSubmitting}>\n  {isSubmitting ? \"Submitting...\" : \"Send\"}\n</Button>\n"
        );

        let cancel = ButtonSpec::new("Cancel", ButtonVariant::Outline);
        let out = render_button(&cancel, false, &ctx).render();
        assert_eq!(
            out,
            "<Button type=\"button\" variant=\"outline\">\n  Cancel\n</Button>\n"
        );
    }

    #[test]
    fn test_submit_button_without_loading_state() {
        let ctx = RenderContext {
            loading_state: false,
        };
        let out = render_button(&ButtonSpec::new("Go", ButtonVariant::Default), true, &ctx).render();
        assert!(out.starts_with("<Button type=\"submit\" variant=\"default\">"));
        assert!(!out.contains("isSubmitting"));
    }

    #[test]
    fn test_link() {
        let link = LinkSpec {
            text: "Sign in".to_string(),
            href: "/login".to_string(),
        };
        assert_eq!(
            render_link(&link).render(),
            "<Link href=\"/login\" className=\"text-sm text-blue-600 hover:underline\">Sign in</Link>\n"
        );
    }
}
