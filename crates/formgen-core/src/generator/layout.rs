//! Whole-form layout composition

use super::fragment::{jsx_text, Fragment};
use crate::spec::{HorizontalAlign, LayoutStyle, VerticalAlign};

/// Subtitle shown in the card header
const CARD_DESCRIPTION: &str = "Please fill out the form below";

/// Rendered parts of a form, ready to be arranged
#[derive(Debug, Clone)]
pub struct LayoutParts {
    pub title: String,
    pub fields: Vec<Fragment>,
    pub buttons: Vec<Fragment>,
    pub link: Option<Fragment>,
}

/// Arranged form body plus the container styling tokens
#[derive(Debug, Clone)]
pub struct ComposedLayout {
    pub body: Fragment,
    pub container_tokens: Vec<String>,
}

impl ComposedLayout {
    /// Container class list: `flex flex-col <alignment> min-h-screen <width>`
    pub fn container_class(&self) -> String {
        self.container_tokens.join(" ")
    }
}

pub fn horizontal_token(align: Option<HorizontalAlign>) -> Option<&'static str> {
    match align? {
        HorizontalAlign::Left => Some("items-start"),
        HorizontalAlign::Center => Some("mx-auto"),
        HorizontalAlign::Right => Some("items-end"),
    }
}

pub fn vertical_token(align: Option<VerticalAlign>) -> Option<&'static str> {
    match align? {
        VerticalAlign::Top => Some("justify-start"),
        VerticalAlign::Center => Some("justify-center"),
        VerticalAlign::Bottom => Some("justify-end"),
    }
}

/// Arrange the parts in exactly one layout variant
pub fn compose(
    style: LayoutStyle,
    parts: LayoutParts,
    horizontal: Option<HorizontalAlign>,
    vertical: Option<VerticalAlign>,
    width: &str,
) -> ComposedLayout {
    let LayoutParts {
        title,
        fields,
        buttons,
        link,
    } = parts;
    let link = link.unwrap_or(Fragment::Empty);

    let body = match style {
        LayoutStyle::Card => Fragment::block(
            "<Card>",
            Fragment::seq([
                Fragment::block(
                    "<CardHeader>",
                    Fragment::seq([
                        Fragment::line(format!("<CardTitle>{}</CardTitle>", jsx_text(&title))),
                        Fragment::line(format!(
                            "<CardDescription>{}</CardDescription>",
                            CARD_DESCRIPTION
                        )),
                    ]),
                    "</CardHeader>",
                ),
                Fragment::block(
                    "<CardContent className=\"space-y-8\">",
                    Fragment::seq(fields),
                    "</CardContent>",
                ),
                Fragment::block(
                    "<CardFooter className=\"flex justify-between\">",
                    Fragment::seq(buttons.into_iter().chain([link])),
                    "</CardFooter>",
                ),
            ]),
            "</Card>",
        ),
        LayoutStyle::Inline => Fragment::block(
            "<div className=\"flex items-center space-x-4\">",
            Fragment::seq(fields.into_iter().chain(buttons).chain([link])),
            "</div>",
        ),
        LayoutStyle::Default => Fragment::block(
            "<div className=\"space-y-8\">",
            Fragment::seq(fields.into_iter().chain([Fragment::block(
                "<div className=\"flex justify-between items-center\">",
                Fragment::seq(buttons.into_iter().chain([link])),
                "</div>",
            )])),
            "</div>",
        ),
    };

    let mut container_tokens = vec!["flex".to_string(), "flex-col".to_string()];
    container_tokens.extend(horizontal_token(horizontal).map(str::to_string));
    container_tokens.extend(vertical_token(vertical).map(str::to_string));
    container_tokens.push("min-h-screen".to_string());
    container_tokens.extend(width.split_whitespace().map(str::to_string));

    ComposedLayout {
        body,
        container_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(link: bool) -> LayoutParts {
        LayoutParts {
            title: "Contact".to_string(),
            fields: vec![Fragment::line("<FormField a />"), Fragment::line("<FormField b />")],
            buttons: vec![Fragment::line("<Button one />")],
            link: link.then(|| Fragment::line("<Link />")),
        }
    }

    #[test]
    fn test_default_layout_stacks_fields_above_footer() {
        let out = compose(LayoutStyle::Default, parts(true), None, None, "w-full").body.render();
        assert_eq!(
            out,
            "<div className=\"space-y-8\">\n  <FormField a />\n  <FormField b />\n  <div className=\"flex justify-between items-center\">\n    <Button one />\n    <Link />\n  </div>\n</div>\n"
        );
    }

    #[test]
    fn test_card_layout_has_header_body_footer() {
        let out = compose(LayoutStyle::Card, parts(false), None, None, "").body.render();
        assert!(out.starts_with("<Card>\n  <CardHeader>\n    <CardTitle>Contact</CardTitle>"));
        assert!(out.contains("<CardContent className=\"space-y-8\">\n    <FormField a />"));
        assert!(out.contains("<CardFooter className=\"flex justify-between\">\n    <Button one />\n  </CardFooter>"));
        assert!(!out.contains("space-x-4"));
    }

    #[test]
    fn test_inline_layout_is_single_row() {
        let out = compose(LayoutStyle::Inline, parts(true), None, None, "").body.render();
        assert_eq!(
            out,
            "<div className=\"flex items-center space-x-4\">\n  <FormField a />\n  <FormField b />\n  <Button one />\n  <Link />\n</div>\n"
        );
    }

    #[test]
    fn test_alignment_tokens() {
        let layout = compose(
            LayoutStyle::Default,
            parts(false),
            Some(HorizontalAlign::Right),
            Some(VerticalAlign::Top),
            "w-full  max-w-md",
        );
        assert_eq!(
            layout.container_class(),
            "flex flex-col items-end justify-start min-h-screen w-full max-w-md"
        );

        let unaligned = compose(LayoutStyle::Default, parts(false), None, None, "");
        assert_eq!(unaligned.container_class(), "flex flex-col min-h-screen");
    }

    #[test]
    fn test_alignment_lookup_tables() {
        assert_eq!(horizontal_token(Some(HorizontalAlign::Center)), Some("mx-auto"));
        assert_eq!(horizontal_token(None), None);
        assert_eq!(vertical_token(Some(VerticalAlign::Bottom)), Some("justify-end"));
        assert_eq!(vertical_token(Some(VerticalAlign::Center)), Some("justify-center"));
    }
}
