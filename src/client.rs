pub use {
    error::ClientError,
    objects::{MIN_SERVER_ID, Objects},
};
use {
    crate::{
        clientbuffer::BufferRegistry,
        object::{Interface, Object, ObjectId, WL_DISPLAY_ID},
        state::State,
        utils::{
            buffd::{MsgFormatter, OutMessage},
            errorfmt::ErrorFmt,
            numcell::NumCell,
        },
        wire::wl_display,
    },
    ahash::AHashMap,
    std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        error::Error,
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

mod error;
mod objects;
#[cfg(test)]
mod tests;

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ClientId(u64);

impl ClientId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

pub struct Clients {
    next_client_id: NumCell<u64>,
    clients: RefCell<AHashMap<ClientId, Rc<Client>>>,
}

impl Clients {
    pub fn new() -> Self {
        Self {
            next_client_id: NumCell::new(1),
            clients: Default::default(),
        }
    }

    pub fn id(&self) -> ClientId {
        ClientId(self.next_client_id.fetch_add(1))
    }

    pub fn get(&self, id: ClientId) -> Result<Rc<Client>, ClientError> {
        let clients = self.clients.borrow();
        match clients.get(&id) {
            Some(c) => Ok(c.clone()),
            _ => Err(ClientError::ClientDoesNotExist(id)),
        }
    }

    pub fn spawn(&self, state: &Rc<State>) -> Rc<Client> {
        let id = self.id();
        let data = Rc::new(Client {
            id,
            state: state.clone(),
            objects: Objects::new(),
            buffers: Default::default(),
            events: Default::default(),
            shutdown: Cell::new(false),
        });
        log::info!("Client {} connected", id);
        self.clients.borrow_mut().insert(id, data.clone());
        data
    }

    /// Marks the client for disconnection. The transport flushes the
    /// remaining events and then calls [`Clients::kill`].
    pub fn shutdown(&self, client_id: ClientId) {
        if let Some(client) = self.clients.borrow().get(&client_id)
            && !client.shutdown.replace(true)
        {
            log::info!("Shutting down client {}", client_id);
        }
    }

    pub fn kill(&self, client: ClientId) {
        log::info!("Removing client {}", client);
        let client = self.clients.borrow_mut().remove(&client);
        if let Some(client) = client {
            client.objects.destroy();
            client.buffers.clear();
        }
    }

    pub fn broadcast<B>(&self, mut f: B)
    where
        B: FnMut(&Rc<Client>),
    {
        let clients = self.clients.borrow();
        for client in clients.values() {
            f(client);
        }
    }

    pub fn clear(&self) {
        let clients: Vec<_> = self.clients.borrow_mut().drain().map(|(_, c)| c).collect();
        for client in clients {
            client.objects.destroy();
            client.buffers.clear();
        }
    }
}

impl Drop for Clients {
    fn drop(&mut self) {
        self.clear();
    }
}

pub trait EventFormatter: std::fmt::Debug {
    fn format(self, fmt: &mut MsgFormatter<'_>);
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
}

pub struct Client {
    pub id: ClientId,
    pub state: Rc<State>,
    pub objects: Objects,
    pub buffers: BufferRegistry,
    events: RefCell<VecDeque<OutMessage>>,
    shutdown: Cell<bool>,
}

impl Client {
    pub fn event<T: EventFormatter>(&self, event: T) {
        if log::log_enabled!(log::Level::Trace) {
            self.log_event(&event);
        }
        let mut data = vec![];
        let mut fds = vec![];
        let mut fmt = MsgFormatter::new(&mut data, &mut fds);
        event.format(&mut fmt);
        fmt.write_len();
        self.events.borrow_mut().push_back(OutMessage { data, fds });
    }

    /// Drains the queued events. Called by the transport when flushing.
    pub fn take_events(&self) -> Vec<OutMessage> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.get()
    }

    /// Posts a protocol error on `obj` and schedules the client for
    /// disconnection. Other clients are unaffected.
    pub fn protocol_error(&self, obj: &dyn Object, code: u32, message: &str) {
        log::error!(
            "Client {}: protocol error on {}@{}: {}",
            self.id,
            obj.interface().name(),
            obj.id(),
            message,
        );
        self.event(wl_display::Error {
            self_id: WL_DISPLAY_ID,
            object_id: obj.id(),
            code,
            message: message.to_string(),
        });
        self.state.clients.shutdown(self.id);
    }

    pub fn error(&self, message: impl Error) {
        log::error!(
            "Client {}: A fatal error occurred: {}",
            self.id,
            ErrorFmt(message),
        );
        self.state.clients.shutdown(self.id);
    }

    pub fn log_event<T: EventFormatter>(&self, event: &T) {
        log::trace!(
            "Client {} <= {}@{}.{:?}",
            self.id,
            event.interface().name(),
            event.id(),
            event,
        );
    }

    pub fn add_client_obj<T: Object>(&self, obj: &Rc<T>) -> Result<(), ClientError> {
        self.objects.add_client_object(obj.clone())
    }

    pub fn remove_obj<T: Object>(&self, obj: &T) -> Result<(), ClientError> {
        self.objects.remove_obj(self, obj.id())
    }
}
