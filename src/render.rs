use std::fmt::Write;

use crate::link;
use crate::types::{GroupRecord, Grant};

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("failed to build link: {0}")]
    Link(#[from] serde_urlencoded::ser::Error),
}

/// `Renderer` turns computed results into response bodies.
pub trait Renderer: Send + Sync {
    /// Plain text list of reveal links, one line per participant.
    fn links(
        &self,
        base_url: &str,
        group_id: &str,
        grants: &[Grant],
    ) -> Result<String, RenderError>;

    /// HTML page telling `participant` who they drew.
    fn reveal(&self, participant: &str, friend: &str) -> Result<String, RenderError>;

    /// HTML overview of a group. Never shows the assignment.
    fn index(&self, group: &GroupRecord) -> Result<String, RenderError>;
}

/// Default pages, in Portuguese like the rest of the public surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pages;

impl Renderer for Pages {
    fn links(
        &self,
        base_url: &str,
        group_id: &str,
        grants: &[Grant],
    ) -> Result<String, RenderError> {
        let mut body = String::new();
        for grant in grants {
            let url = link::capability_link(base_url, group_id, grant)?;
            writeln!(body, "Amigo: {}, Ver Resultado: {}", grant.participant, url)?;
        }
        Ok(body)
    }

    fn reveal(&self, participant: &str, friend: &str) -> Result<String, RenderError> {
        let mut body = String::new();
        writeln!(body, "<html>")?;
        writeln!(
            body,
            "<h2>{}, seu amigo(a) secreto(a) é ...</h2>",
            escape(participant)
        )?;
        writeln!(body, "<h1>{}</h1>", escape(friend))?;
        write!(body, "</html>")?;
        Ok(body)
    }

    fn index(&self, group: &GroupRecord) -> Result<String, RenderError> {
        let status = if group.is_drawn() {
            "Sorteio realizado! Peça seu link para descobrir seu amigo(a) secreto(a)."
        } else {
            "O sorteio ainda não foi realizado."
        };

        let mut body = String::new();
        writeln!(body, "<html>")?;
        writeln!(body, "<h1>Amigo secreto: {}</h1>", escape(&group.id))?;
        writeln!(body, "<p>{}</p>", status)?;
        writeln!(body, "<ul>")?;
        for participant in &group.participants {
            writeln!(body, "<li>{}</li>", escape(participant))?;
        }
        writeln!(body, "</ul>")?;
        write!(body, "</html>")?;
        Ok(body)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
