use {
    crate::{
        client::{Client, ClientError},
        object::{Interface, Object, ObjectId, Version},
        time::Time,
        wire::{ExtIdleNotificationV1Id, ext_idle_notification_v1::*},
    },
    std::{cell::Cell, rc::Rc, time::Duration},
    thiserror::Error,
};

pub struct ExtIdleNotificationV1 {
    pub id: ExtIdleNotificationV1Id,
    pub client: Rc<Client>,
    pub version: Version,
    pub duration: Duration,
    pub idled: Cell<bool>,
    pub deadline: Cell<Time>,
}

impl ExtIdleNotificationV1 {
    fn detach(&self) {
        self.client.state.idle.remove_notification(self);
    }

    pub fn destroy(&self) -> Result<(), ExtIdleNotificationV1Error> {
        self.detach();
        self.client.remove_obj(self)?;
        Ok(())
    }

    pub fn send_idled(&self) {
        self.client.event(Idled { self_id: self.id });
    }

    pub fn send_resumed(&self) {
        self.client.event(Resumed { self_id: self.id });
    }
}

impl Object for ExtIdleNotificationV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }

    fn break_loops(&self) {
        self.detach();
    }
}

#[derive(Debug, Error)]
pub enum ExtIdleNotificationV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ExtIdleNotificationV1Error, ClientError);
