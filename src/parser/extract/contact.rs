use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{ContactInfo, ContactItem, FieldKind, Form, FormField};
use crate::schema::{mint_id, Block};

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(info) = dom::first(section, ".contact-info") {
        blocks.push(Block::ContactInfo(ContactInfo {
            id: mint_id("contact-info"),
            title: dom::first_text(info, ".contact-title"),
            description: dom::first_text(info, ".contact-text"),
            items: dom::all(info, ".contact-item")
                .into_iter()
                .map(|item| ContactItem {
                    id: mint_id("contact-item"),
                    icon: dom::first_text(item, ".contact-icon"),
                    title: dom::first_text(item, "h3"),
                    value: dom::first_text(item, "p"),
                })
                .collect(),
        }));
    }

    if let Some(form) = dom::first(section, ".contact-form form") {
        blocks.push(Block::Form(Form {
            id: mint_id("contact-form"),
            fields: dom::all(form, ".form-group")
                .into_iter()
                .filter_map(form_field)
                .collect(),
            submit_text: dom::first_text(form, r#"button[type="submit"]"#),
        }));
    }

    blocks
}

/// A `.form-group` without an input or textarea is skipped.
fn form_field(group: ElementRef) -> Option<FormField> {
    let control = dom::first(group, "input, textarea")?;
    let (kind, input_type) = match dom::tag_name(control) {
        "textarea" => (FieldKind::Textarea, "textarea".to_string()),
        _ => (FieldKind::Input, dom::attr_or(control, "type", "text")),
    };
    let name = dom::attr(control, "id");
    let name = if name.is_empty() { dom::attr(control, "name") } else { name };

    Some(FormField {
        id: mint_id("form-field"),
        kind,
        input_type,
        label: dom::first_text(group, "label"),
        placeholder: dom::attr(control, "placeholder"),
        required: control.value().attr("required").is_some(),
        name,
    })
}
