use snare_data::ResourceId;
use thiserror::Error;

/// Failure of a world primitive. None of these are fatal to the caller; the
/// trap code skips the affected step and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("unknown kind {0}")]
    UnknownKind(ResourceId),

    #[error("kind {0} cannot be summoned")]
    NotSummonable(ResourceId),

    #[error("entity cap of {limit} reached")]
    EntityCap { limit: usize },

    #[error("no such entity")]
    NoSuchEntity,

    #[error("entity is already in the world")]
    AlreadyInWorld,

    #[error("mount rejected: {0}")]
    MountRejected(&'static str),

    #[error("missing component: {0}")]
    Component(String),
}

impl From<hecs::ComponentError> for LevelError {
    fn from(err: hecs::ComponentError) -> Self {
        match err {
            hecs::ComponentError::NoSuchEntity => LevelError::NoSuchEntity,
            hecs::ComponentError::MissingComponent(missing) => {
                LevelError::Component(missing.to_string())
            }
        }
    }
}

impl From<hecs::NoSuchEntity> for LevelError {
    fn from(_: hecs::NoSuchEntity) -> Self {
        LevelError::NoSuchEntity
    }
}
