use crate::draw::DrawError;
use crate::render::RenderError;

/// Everything that can go wrong while serving a request. `SE` is the internal
/// error of the storage backend.
///
/// Messages are shown to the caller as-is, so none of them may carry a
/// token.
#[derive(thiserror::Error, Debug)]
pub enum Error<SE>
where
    SE: std::error::Error + 'static,
{
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("invalid participants: {0}")]
    Draw(#[from] DrawError),
    #[error("group {0} has not been drawn yet")]
    NotDrawnYet(String),
    #[error("invalid key")]
    InvalidToken,
    #[error("participant not in group: {0}")]
    UnknownParticipant(String),
    #[error("storage error: {0}")]
    Storage(#[source] SE),
    #[error("failed to render response: {0}")]
    Render(#[from] RenderError),
}
