use {
    crate::{
        client::{Client, ClientError},
        ifs::{wl_surface::WlSurface, zxdg_toplevel_decoration_v1::ORPHANED},
        object::{Interface, Object, ObjectId},
        wire::{XdgToplevelId, ZxdgToplevelDecorationV1Id, xdg_toplevel::INTERFACE},
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decoration {
    Client,
    Server,
}

pub struct XdgToplevel {
    pub id: XdgToplevelId,
    pub client: Rc<Client>,
    pub surface: Rc<WlSurface>,
    pub decoration: Cell<Decoration>,
    pub decoration_object: Cell<Option<ZxdgToplevelDecorationV1Id>>,
}

impl XdgToplevel {
    pub fn create(
        id: XdgToplevelId,
        client: &Rc<Client>,
        surface: &Rc<WlSurface>,
    ) -> Result<Rc<Self>, ClientError> {
        let toplevel = Rc::new(Self {
            id,
            client: client.clone(),
            surface: surface.clone(),
            decoration: Cell::new(client.state.preferred_decoration.get()),
            decoration_object: Cell::new(None),
        });
        client.add_client_obj(&toplevel)?;
        client.objects.toplevels.set(id, toplevel.clone());
        Ok(toplevel)
    }

    pub fn destroy(&self) -> Result<(), XdgToplevelError> {
        if let Some(decoration_id) = self.decoration_object.take() {
            // the decoration object must be destroyed first
            if let Ok(decoration) = self.client.objects.get_obj(decoration_id.into()) {
                self.client.protocol_error(
                    &*decoration,
                    ORPHANED,
                    "Toplevel destroyed before its decoration object",
                );
            }
        }
        self.client.objects.toplevels.remove(&self.id);
        self.client.remove_obj(self)?;
        Ok(())
    }
}

impl Object for XdgToplevel {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }

    fn break_loops(&self) {
        self.decoration_object.take();
    }
}

#[derive(Debug, Error)]
pub enum XdgToplevelError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(XdgToplevelError, ClientError);
