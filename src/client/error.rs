use {
    crate::{
        client::ClientId,
        object::{Interface, ObjectId},
    },
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("The requested client {0} does not exist")]
    ClientDoesNotExist(ClientId),
    #[error("The object id is unknown")]
    UnknownId,
    #[error("The id is already in use")]
    IdAlreadyInUse,
    #[error("The client object id is out of bounds")]
    ClientIdOutOfBounds,
    #[error("Server tried to allocate more than 0x1_00_00_00 ids")]
    TooManyIds,
    #[error(transparent)]
    LookupError(LookupError),
}

#[derive(Debug, Error)]
#[error("There is no `{}` with id {}", .interface.name(), .id)]
pub struct LookupError {
    pub interface: Interface,
    pub id: ObjectId,
}
