use crate::types::Grant;

pub const REVEAL_ACTION: &str = "ver-amigo";

/// Build the link a participant opens to see who they drew:
/// `<base>/?acao=ver-amigo&quem-sou=<name>&grupo=<group>&chave=<token>`.
pub fn capability_link(
    base_url: &str,
    group_id: &str,
    grant: &Grant,
) -> Result<String, serde_urlencoded::ser::Error> {
    let query = serde_urlencoded::to_string([
        ("acao", REVEAL_ACTION),
        ("quem-sou", grant.participant.as_str()),
        ("grupo", group_id),
        ("chave", grant.token.as_str()),
    ])?;

    Ok(format!("{}/?{}", base_url.trim_end_matches('/'), query))
}
