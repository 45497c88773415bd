use serde::Serialize;
use tera::{Context, Tera};

use crate::error::FormError;
use crate::submission::types::Submission;
use crate::util::text::clean_label;

use super::display::display_value;

const REPORT_NAME: &str = "submissions.md";

const REPORT_TEMPLATE: &str = "# {{ title }}

{{ count }} {% if count == 1 %}response{% else %}responses{% endif %}
{% for s in submissions %}
## Response #{{ s.index }} ({{ s.submitted_at }})

{% for a in s.answers %}- **{{ a.label }}**: {{ a.value }}
{% endfor %}{% endfor %}";

#[derive(Debug, Serialize)]
struct AnswerView {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct SubmissionView {
    index: usize,
    submitted_at: String,
    answers: Vec<AnswerView>,
}

fn submission_views(submissions: &[Submission]) -> Vec<SubmissionView> {
    submissions
        .iter()
        .enumerate()
        .map(|(i, s)| SubmissionView {
            index: i + 1,
            submitted_at: s.submitted_at.to_rfc3339(),
            answers: s
                .responses
                .iter()
                .map(|r| AnswerView {
                    label: clean_label(&r.field_label),
                    value: display_value(&r.value),
                })
                .collect(),
        })
        .collect()
}

/// Markdown digest of a form's submissions using the built-in template.
pub fn render_submissions_report(title: &str, submissions: &[Submission]) -> Result<String, FormError> {
    render_with_template(REPORT_TEMPLATE, title, submissions)
}

/// Same as [`render_submissions_report`] with a caller-supplied tera template.
/// The template sees `title`, `count` and `submissions[].{index, submitted_at, answers[].{label, value}}`.
pub fn render_with_template(
    template: &str,
    title: &str,
    submissions: &[Submission],
) -> Result<String, FormError> {
    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_NAME, template)?;

    let mut ctx = Context::new();
    ctx.insert("title", &clean_label(title));
    ctx.insert("count", &submissions.len());
    ctx.insert("submissions", &submission_views(submissions));
    Ok(tera.render(REPORT_NAME, &ctx)?)
}
