/// Error type shared by scene operations and event handlers.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// An inbound message could not be decoded or reassembled.
    #[error(transparent)]
    Wire(#[from] wire::WireError),
    /// A registry already holds an entity with this id.
    #[error("{kind} `{id}` is already registered")]
    DuplicateEntity { kind: &'static str, id: String },
    /// A host-installed handler reported a failure.
    #[error("handler failed: {0}")]
    Handler(String),
}
