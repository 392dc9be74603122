//! Legacy-compatibility targets
//!
//! Outlook's Word-based engine ignores `max-width` divs and media queries, so
//! the universal target frames each cell's content in a presentation table
//! that only `mso` parses. Other targets pass content straight through.

use crate::config::RenderTarget;
use crate::markup::Node;
use crate::schema::ContentAlignment;

/// Wraps cell content for a family of rendering engines
pub trait LegacyCompat: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Return the nodes that replace `content` inside a column cell
    fn wrap_cell(&self, alignment: ContentAlignment, content: Node) -> Vec<Node>;
}

/// Emits `<!--[if mso]>` presentation tables around cell content
pub struct MsoCompat;

impl LegacyCompat for MsoCompat {
    fn name(&self) -> &'static str {
        "mso"
    }

    fn wrap_cell(&self, alignment: ContentAlignment, content: Node) -> Vec<Node> {
        let open = format!(
            "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\"><tr><td valign=\"{}\" width=\"100%\">",
            alignment.as_str()
        );
        vec![
            Node::conditional("mso", open),
            content,
            Node::conditional("mso", "</td></tr></table>"),
        ]
    }
}

/// No legacy markup
pub struct Passthrough;

impl LegacyCompat for Passthrough {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn wrap_cell(&self, _alignment: ContentAlignment, content: Node) -> Vec<Node> {
        vec![content]
    }
}

static MSO: MsoCompat = MsoCompat;
static PASSTHROUGH: Passthrough = Passthrough;

impl RenderTarget {
    pub fn compat(self) -> &'static dyn LegacyCompat {
        match self {
            RenderTarget::Universal => &MSO,
            RenderTarget::Standard => &PASSTHROUGH,
        }
    }
}
