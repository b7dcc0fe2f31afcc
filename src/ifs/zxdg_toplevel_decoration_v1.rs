use {
    crate::{
        client::{Client, ClientError},
        ifs::xdg_toplevel::{Decoration, XdgToplevel},
        object::{Interface, Object, ObjectId, Version},
        wire::{ZxdgToplevelDecorationV1Id, zxdg_toplevel_decoration_v1::*},
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

pub const CLIENT_SIDE: u32 = 1;
pub const SERVER_SIDE: u32 = 2;

#[allow(dead_code)]
pub const UNCONFIGURED_BUFFER: u32 = 0;
pub const ALREADY_CONSTRUCTED: u32 = 1;
pub const ORPHANED: u32 = 2;

pub struct ZxdgToplevelDecorationV1 {
    pub id: ZxdgToplevelDecorationV1Id,
    pub client: Rc<Client>,
    pub toplevel: Rc<XdgToplevel>,
    pub version: Version,
    requested: Cell<Option<Decoration>>,
}

impl ZxdgToplevelDecorationV1 {
    pub fn new(
        id: ZxdgToplevelDecorationV1Id,
        client: &Rc<Client>,
        toplevel: &Rc<XdgToplevel>,
        version: Version,
    ) -> Self {
        Self {
            id,
            client: client.clone(),
            toplevel: toplevel.clone(),
            version,
            requested: Cell::new(None),
        }
    }

    fn send_configure(&self, mode: u32) {
        self.client.event(Configure {
            self_id: self.id,
            mode,
        })
    }

    /// Applies the client preference, falling back to the compositor
    /// preference, and advertises the resulting mode.
    pub fn do_send_configure(&self) {
        let mode = self
            .requested
            .get()
            .unwrap_or(self.client.state.preferred_decoration.get());
        self.toplevel.decoration.set(mode);
        self.send_configure(match mode {
            Decoration::Client => CLIENT_SIDE,
            Decoration::Server => SERVER_SIDE,
        });
    }

    pub fn set_mode(&self, mode: u32) -> Result<(), ZxdgToplevelDecorationV1Error> {
        let mode = match mode {
            CLIENT_SIDE => Decoration::Client,
            SERVER_SIDE => Decoration::Server,
            _ => return Err(ZxdgToplevelDecorationV1Error::InvalidMode(mode)),
        };
        self.requested.set(Some(mode));
        self.do_send_configure();
        Ok(())
    }

    pub fn unset_mode(&self) {
        self.requested.set(None);
        self.do_send_configure();
    }

    pub fn destroy(&self) -> Result<(), ZxdgToplevelDecorationV1Error> {
        self.toplevel.decoration_object.set(None);
        self.client.remove_obj(self)?;
        Ok(())
    }
}

impl Object for ZxdgToplevelDecorationV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum ZxdgToplevelDecorationV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("{0} is not a valid decoration mode")]
    InvalidMode(u32),
}
efrom!(ZxdgToplevelDecorationV1Error, ClientError);
