//! Rendering records through the page template. Rendering is two explicit
//! passes: literal substitution of the named tokens, then a pattern-based
//! rewrite of any residual ISO-8601- or SQL-shaped timestamp substrings
//! left in the body, so a template can carry stale example dates anywhere
//! in its markup and still pick up the record's own timestamp. The
//! internal-links block replaces `{{INTERNAL_LINKS}}` when the token is
//! present and is appended to the end of the page otherwise.
//!
//! Rendering is a pure function of record, links, and template; all
//! randomness happens during record construction.

use crate::record::PageRecord;
use regex::Regex;
use std::fs;
use std::path::Path;

/// The minimal built-in template used when the configured template file
/// cannot be read.
const DEFAULT_TEMPLATE: &str = "<html><head><title>{{TITLE}}</title></head><body>{{DESCRIPTION}}<br>Date: {{DATE}}<br>{{INTERNAL_LINKS}}</body></html>";

const INTERNAL_LINKS_TOKEN: &str = "{{INTERNAL_LINKS}}";

/// Renders [`PageRecord`]s against a loaded template.
pub struct Renderer {
    template: String,
    iso_timestamps: Regex,
    sql_timestamps: Regex,
}

impl Renderer {
    /// Constructs a renderer around a template string.
    pub fn new(template: String) -> Renderer {
        Renderer {
            template,
            // the patterns are fixed, so compilation cannot fail
            iso_timestamps: Regex::new(
                r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})",
            )
            .unwrap(),
            sql_timestamps: Regex::new(r"\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}").unwrap(),
        }
    }

    /// Reads the template from `path`, falling back to the built-in
    /// minimal template when the file is missing or unreadable.
    pub fn load(path: &Path) -> Renderer {
        match fs::read_to_string(path) {
            Ok(template) => Renderer::new(template),
            Err(err) => {
                log::warn!(
                    "Reading template `{}`: {}; using the built-in template",
                    path.display(),
                    err
                );
                Renderer::new(DEFAULT_TEMPLATE.to_owned())
            }
        }
    }

    /// First pass: literal replacement of the named substitution tokens.
    pub fn substitute_tokens(&self, record: &PageRecord) -> String {
        self.template
            .replace("{{TITLE}}", &record.display_title)
            .replace("{{DESCRIPTION}}", &record.description)
            .replace("{{KEYWORDS}}", &record.keywords)
            .replace("{{DATE}}", &record.date_iso())
            .replace("{{DATE_SQL}}", &record.date_sql())
    }

    /// Second pass: rewrites any remaining ISO-8601-shaped, then
    /// SQL-shaped, timestamp substrings to the record's own encodings.
    pub fn rewrite_timestamps(&self, content: &str, record: &PageRecord) -> String {
        let content = self
            .iso_timestamps
            .replace_all(content, record.date_iso().as_str());
        self.sql_timestamps
            .replace_all(&content, record.date_sql().as_str())
            .into_owned()
    }

    /// Renders one record with its chosen internal links: both substitution
    /// passes, then the links block.
    pub fn render(&self, record: &PageRecord, links: &[&PageRecord]) -> String {
        let content = self.substitute_tokens(record);
        let mut content = self.rewrite_timestamps(&content, record);
        let links_html = links_block(links);
        if content.contains(INTERNAL_LINKS_TOKEN) {
            content = content.replace(INTERNAL_LINKS_TOKEN, &links_html);
        } else {
            content.push('\n');
            content.push_str(&links_html);
        }
        content
    }
}

/// Builds the internal-links block: an unordered list of anchors pointing
/// at the other generated files of the batch.
pub fn links_block(links: &[&PageRecord]) -> String {
    let mut html = String::from("<div class='internal-links'><ul>");
    for link in links {
        html.push_str(&format!(
            "<li><a href='{}'>{}</a></li>",
            link.filename, link.display_title
        ));
    }
    html.push_str("</ul></div>");
    html
}
