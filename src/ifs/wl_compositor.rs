use {
    crate::{
        client::{Client, ClientError},
        ifs::wl_surface::WlSurface,
        object::{Interface, Object, ObjectId, Version},
        wire::{WlCompositorId, WlSurfaceId, wl_compositor::INTERFACE},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct WlCompositor {
    pub id: WlCompositorId,
    pub client: Rc<Client>,
    pub version: Version,
}

impl WlCompositor {
    pub fn new(id: WlCompositorId, client: &Rc<Client>, version: Version) -> Self {
        Self {
            id,
            client: client.clone(),
            version,
        }
    }

    pub fn create_surface(&self, id: WlSurfaceId) -> Result<Rc<WlSurface>, WlCompositorError> {
        let surface = Rc::new(WlSurface::new(id, &self.client));
        self.client.add_client_obj(&surface)?;
        self.client.objects.surfaces.set(id, surface.clone());
        Ok(surface)
    }
}

impl Object for WlCompositor {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum WlCompositorError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlCompositorError, ClientError);
