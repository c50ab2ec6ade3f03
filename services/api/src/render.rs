use assessment_report::reports::ReportDocument;
use chrono::{DateTime, Local};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const REPORT_STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;padding:20px}\
h1{margin-bottom:6px}\
h2{margin-top:18px;border-bottom:1px solid #eee;padding-bottom:6px}\
.field{margin:6px 0}\
.label{font-weight:600}";

/// Renders the assembled report as a standalone HTML page.
///
/// The generation time is supplied by the caller; the document itself carries none.
pub(crate) fn render_html(document: &ReportDocument, generated_at: DateTime<Local>) -> String {
    page(document, generated_at).into_string()
}

fn page(document: &ReportDocument, generated_at: DateTime<Local>) -> Markup {
    let header = &document.header;
    let generated = generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Report " (header.session_id) }
                style { (PreEscaped(REPORT_STYLE)) }
            }
            body {
                h1 { (header.title) }
                div { "Session ID: " (header.session_id) }
                div { "Generated: " (generated) }
                @for section in &document.sections {
                    h2 { (section.title) }
                    div {
                        @for field in &section.fields {
                            div class="field" {
                                span class="label" { (field.label) ":" }
                                " "
                                span class="value" { (field.value) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Plain-text rendering used by the CLI.
pub(crate) fn render_text(document: &ReportDocument) -> String {
    let mut out = String::new();
    out.push_str(&document.header.title);
    out.push('\n');
    out.push_str(&format!("Session ID: {}\n", document.header.session_id));

    for section in &document.sections {
        out.push_str(&format!("\n{}\n", section.title));
        if section.fields.is_empty() {
            out.push_str("- (no fields)\n");
        }
        for field in &section.fields {
            out.push_str(&format!("- {}: {}\n", field.label, field.value));
        }
    }

    out
}
