//! HTML fragment for the waitlist form
//!
//! Styling is left to the page; the fragment only carries the class names the
//! stylesheet targets.

use crate::form::messages::FORM_TITLE;
use crate::form::state::Field;
use crate::form::view::FormView;
use spool_forms::WaitlistForm;
use std::borrow::Cow;

/// Escapes HTML special characters in a string.
///
/// Returns a borrowed reference if no escaping is needed.
///
/// # Examples
///
/// ```
/// use spool_pages::html_escape;
///
/// assert_eq!(html_escape("Ada"), "Ada");
/// assert_eq!(html_escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
/// ```
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Render the form for `view`
pub fn render_form(view: &FormView) -> String {
	let form = WaitlistForm::new();
	let disabled = if view.inputs_disabled { " disabled" } else { "" };

	let mut html = String::new();
	html.push_str(r#"<div class="waitlist-form">"#);
	html.push_str(&format!(
		r#"<h2 class="form-title">{}</h2>"#,
		html_escape(FORM_TITLE)
	));
	html.push_str("<div>");

	for field in form.fields() {
		let name = html_escape(field.name());
		let value = Field::from_name(field.name())
			.map(|f| view.value(f))
			.unwrap_or_default();
		html.push_str(r#"<div class="form-group">"#);
		html.push_str(&format!(
			r#"<label for="{}">{}</label>"#,
			name,
			html_escape(field.label().unwrap_or(field.name()))
		));
		html.push_str(&format!(
			r#"<input type="{}" id="{}" name="{}" value="{}"{}>"#,
			field.widget().input_type(),
			name,
			name,
			html_escape(value),
			disabled
		));
		html.push_str("</div>");
	}

	let submit_disabled = if view.submit_disabled { " disabled" } else { "" };
	html.push_str(&format!(
		r#"<button type="submit" class="{}"{}>{}</button>"#,
		view.submit_class_attr(),
		submit_disabled,
		html_escape(view.submit_label)
	));

	if let Some(message) = &view.error_banner {
		html.push_str(&format!(
			r#"<div class="form-error" role="alert">{}</div>"#,
			html_escape(message)
		));
	}

	html.push_str("</div></div>");
	html
}
