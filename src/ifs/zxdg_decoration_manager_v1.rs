use {
    crate::{
        client::{Client, ClientError},
        ifs::zxdg_toplevel_decoration_v1::{ALREADY_CONSTRUCTED, ZxdgToplevelDecorationV1},
        object::{Interface, Object, ObjectId, Version},
        wire::{
            XdgToplevelId, ZxdgDecorationManagerV1Id, ZxdgToplevelDecorationV1Id,
            zxdg_decoration_manager_v1::INTERFACE,
        },
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct ZxdgDecorationManagerV1 {
    pub id: ZxdgDecorationManagerV1Id,
    pub client: Rc<Client>,
    pub version: Version,
}

impl ZxdgDecorationManagerV1 {
    pub fn new(id: ZxdgDecorationManagerV1Id, client: &Rc<Client>, version: Version) -> Self {
        Self {
            id,
            client: client.clone(),
            version,
        }
    }

    pub fn destroy(&self) -> Result<(), ZxdgDecorationManagerV1Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }

    pub fn get_toplevel_decoration(
        &self,
        id: ZxdgToplevelDecorationV1Id,
        toplevel_id: XdgToplevelId,
    ) -> Result<Rc<ZxdgToplevelDecorationV1>, ZxdgDecorationManagerV1Error> {
        let toplevel = self.client.objects.toplevel(toplevel_id)?;
        if toplevel.decoration_object.get().is_some() {
            self.client.protocol_error(
                self,
                ALREADY_CONSTRUCTED,
                "The toplevel already has a decoration object",
            );
            return Err(ZxdgDecorationManagerV1Error::AlreadyConstructed);
        }
        let obj = Rc::new(ZxdgToplevelDecorationV1::new(
            id,
            &self.client,
            &toplevel,
            self.version,
        ));
        self.client.add_client_obj(&obj)?;
        toplevel.decoration_object.set(Some(id));
        obj.do_send_configure();
        Ok(obj)
    }
}

impl Object for ZxdgDecorationManagerV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum ZxdgDecorationManagerV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("The toplevel already has a decoration object")]
    AlreadyConstructed,
}
efrom!(ZxdgDecorationManagerV1Error, ClientError);
