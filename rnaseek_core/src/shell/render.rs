//! Server-side HTML for the site shell. Text that did not come from this crate goes through
//! `ammonia::clean_text`; it escapes whitespace too, so only user and backend strings use it.

use ammonia::clean_text;

use crate::shell::gate::{GateView, LOGIN_REQUIRED_NOTICE};
use crate::shell::navbar::{AccountView, NavView};
use crate::shell::pages::{Block, Page, SITE_DESCRIPTION, SITE_NAME};
use crate::upload::{FormSnapshot, FormState, UploadOutcome};

pub const SUCCESS_NOTICE: &str = "File processed successfully!";

pub fn render_page(page: Page, nav: &NavView, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{site} | {title}</title>\n<meta name=\"description\" content=\"{description}\">\n\
         </head>\n<body>\n{nav}<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n",
        site = SITE_NAME,
        title = page.title(),
        description = SITE_DESCRIPTION,
        nav = render_nav(nav),
        body = body,
    )
}

pub fn render_nav(nav: &NavView) -> String {
    let mut html = String::from("<nav>\n<ul class=\"links\">\n");
    for link in &nav.links {
        push_line(
            &mut html,
            format!(
                "<li><a href=\"{}\" aria-label=\"{label}\">{label}</a></li>",
                link.path(),
                label = link.label()
            ),
        );
    }
    html.push_str("</ul>\n");

    match &nav.account {
        AccountView::Loading => html.push_str("<div class=\"account\">Loading...</div>\n"),
        AccountView::SignedOut => html.push_str(
            "<form class=\"account\" method=\"post\" action=\"/auth/login\">\
             <button type=\"submit\" aria-label=\"Login\">Login</button></form>\n",
        ),
        AccountView::SignedIn { display_name } => push_line(
            &mut html,
            format!(
                "<form class=\"account\" method=\"post\" action=\"/auth/logout\">\
                 <p>Welcome, {}</p><button type=\"submit\" aria-label=\"Sign out\">Sign out</button></form>",
                clean_text(display_name)
            ),
        ),
    }

    if let Some(error) = &nav.error {
        push_line(&mut html, format!("<p class=\"error\">{}</p>", clean_text(error)));
    }

    html.push_str("</nav>\n");
    html
}

pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            Block::Heading(text) => push_line(&mut html, format!("<h2>{}</h2>", text)),
            Block::Paragraph(text) => push_line(&mut html, format!("<p>{}</p>", text)),
            Block::List(items) => {
                html.push_str("<ul>\n");
                for item in items.iter() {
                    push_line(&mut html, format!("<li>{}</li>", item));
                }
                html.push_str("</ul>\n");
            }
        }
    }
    html
}

/// The Tools page body: spinner, login notice, or the upload form.
pub fn render_tools(gate: GateView, form: &FormSnapshot) -> String {
    match gate {
        GateView::Loading => "<div class=\"spinner\" role=\"status\">Loading...</div>\n".to_string(),
        GateView::LoginRequired => format!("<div class=\"notice\">{}</div>\n", LOGIN_REQUIRED_NOTICE),
        GateView::UploadForm => render_upload_form(form),
    }
}

pub fn render_upload_form(form: &FormSnapshot) -> String {
    let mut html = String::new();
    let submitting = form.state == FormState::Submitting;

    html.push_str(
        "<form method=\"post\" action=\"/tools/select\" enctype=\"multipart/form-data\">\n",
    );
    push_line(
        &mut html,
        format!(
            "<input type=\"file\" name=\"file\" accept=\".fastq,.fastq.gz\"{}>",
            disabled(submitting)
        ),
    );
    push_line(
        &mut html,
        format!("<button type=\"submit\"{}>Choose</button>", disabled(submitting)),
    );
    html.push_str("</form>\n");

    push_line(
        &mut html,
        format!(
            "<form method=\"post\" action=\"/tools/submit\"><button type=\"submit\"{}>Submit</button></form>",
            disabled(!form.can_submit)
        ),
    );
    push_line(
        &mut html,
        format!(
            "<form method=\"post\" action=\"/tools/clear\"><button type=\"submit\"{}>Clear</button></form>",
            disabled(!form.can_clear)
        ),
    );

    if let Some(file) = &form.selected_file {
        push_line(&mut html, format!("<p>Selected file: {}</p>", clean_text(&file.name)));
    }
    if submitting {
        html.push_str("<p class=\"status\">Submitting...</p>\n");
    }
    if form.state == FormState::Submitted(UploadOutcome::Success) {
        push_line(&mut html, format!("<p class=\"status\">{}</p>", SUCCESS_NOTICE));
    }
    if let Some(error) = &form.error {
        push_line(
            &mut html,
            format!("<p class=\"error\" style=\"color: red\">{}</p>", clean_text(error)),
        );
    }

    html
}

fn push_line(html: &mut String, line: String) {
    html.push_str(&line);
    html.push('\n');
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}
