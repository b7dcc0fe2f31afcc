use {
    crate::{
        client::{Client, ClientError, error::LookupError},
        ifs::{wl_surface::WlSurface, xdg_toplevel::XdgToplevel},
        object::{Object, ObjectId, WL_DISPLAY_ID},
        utils::{copyhashmap::CopyHashMap, numcell::NumCell},
        wire::{WlSurfaceId, XdgToplevelId, wl_display, wl_surface, xdg_toplevel},
    },
    std::rc::Rc,
};

pub const MIN_SERVER_ID: u32 = 0xff000000;

/// The per-client object table. The generic registry resolves ids to
/// objects; hot types additionally live in dedicated maps.
pub struct Objects {
    registry: CopyHashMap<ObjectId, Rc<dyn Object>>,
    pub surfaces: CopyHashMap<WlSurfaceId, Rc<WlSurface>>,
    pub toplevels: CopyHashMap<XdgToplevelId, Rc<XdgToplevel>>,
    next_server_id: NumCell<u32>,
}

impl Objects {
    pub fn new() -> Self {
        Self {
            registry: Default::default(),
            surfaces: Default::default(),
            toplevels: Default::default(),
            next_server_id: NumCell::new(MIN_SERVER_ID),
        }
    }

    pub fn destroy(&self) {
        let objects: Vec<_> = self.registry.lock().values().cloned().collect();
        for obj in objects {
            obj.break_loops();
        }
        self.registry.clear();
        self.surfaces.clear();
        self.toplevels.clear();
    }

    pub fn get_obj(&self, id: ObjectId) -> Result<Rc<dyn Object>, ClientError> {
        match self.registry.get(&id) {
            Some(o) => Ok(o),
            _ => Err(ClientError::UnknownId),
        }
    }

    pub fn add_client_object(&self, obj: Rc<dyn Object>) -> Result<(), ClientError> {
        let id = obj.id();
        if id.raw() == 0 || id.raw() >= MIN_SERVER_ID {
            return Err(ClientError::ClientIdOutOfBounds);
        }
        if self.registry.contains(&id) {
            return Err(ClientError::IdAlreadyInUse);
        }
        self.registry.set(id, obj);
        Ok(())
    }

    pub fn add_server_object(&self, obj: Rc<dyn Object>) {
        let id = obj.id();
        assert!(id.raw() >= MIN_SERVER_ID);
        assert!(!self.registry.contains(&id));
        self.registry.set(id, obj);
    }

    pub fn next_server_id(&self) -> Result<ObjectId, ClientError> {
        let id = self.next_server_id.fetch_add(1);
        if id < MIN_SERVER_ID {
            return Err(ClientError::TooManyIds);
        }
        Ok(ObjectId::from_raw(id))
    }

    pub fn remove_obj(&self, client: &Client, id: ObjectId) -> Result<(), ClientError> {
        if self.registry.remove(&id).is_none() {
            return Err(ClientError::UnknownId);
        }
        if id.raw() < MIN_SERVER_ID {
            client.event(wl_display::DeleteId {
                self_id: WL_DISPLAY_ID,
                id: id.raw(),
            });
        }
        Ok(())
    }

    pub fn surface(&self, id: WlSurfaceId) -> Result<Rc<WlSurface>, ClientError> {
        match self.surfaces.get(&id) {
            Some(s) => Ok(s),
            _ => Err(ClientError::LookupError(LookupError {
                interface: wl_surface::INTERFACE,
                id: id.into(),
            })),
        }
    }

    pub fn toplevel(&self, id: XdgToplevelId) -> Result<Rc<XdgToplevel>, ClientError> {
        match self.toplevels.get(&id) {
            Some(t) => Ok(t),
            _ => Err(ClientError::LookupError(LookupError {
                interface: xdg_toplevel::INTERFACE,
                id: id.into(),
            })),
        }
    }
}
