use {
    crate::{
        client::{Client, ClientError},
        clientbuffer::{BufferRef, ClientBuffer},
        drm_feedback::DrmFeedback,
        ifs::zwp_linux_dmabuf_feedback_v1::ZwpLinuxDmabufFeedbackV1,
        object::{Interface, Object, ObjectId},
        utils::{clonecell::CloneCell, copyhashmap::CopyHashMap},
        wire::{WlSurfaceId, ZwpLinuxDmabufFeedbackV1Id, wl_surface::INTERFACE},
    },
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
    thiserror::Error,
};

pub struct WlSurface {
    pub id: WlSurfaceId,
    pub client: Rc<Client>,
    pending_buffer: Cell<Option<Option<Rc<ClientBuffer>>>>,
    buffer: CloneCell<Option<Rc<ClientBuffer>>>,
    buffer_ref: RefCell<BufferRef>,
    scanout_feedback: CloneCell<Option<Rc<DrmFeedback>>>,
    pub dmabuf_feedback: CopyHashMap<ZwpLinuxDmabufFeedbackV1Id, Rc<ZwpLinuxDmabufFeedbackV1>>,
}

impl WlSurface {
    pub fn new(id: WlSurfaceId, client: &Rc<Client>) -> Self {
        Self {
            id,
            client: client.clone(),
            pending_buffer: Cell::new(None),
            buffer: Default::default(),
            buffer_ref: Default::default(),
            scanout_feedback: Default::default(),
            dmabuf_feedback: Default::default(),
        }
    }

    /// Latches a buffer into the pending state. Applied by the next
    /// commit; attaching a null buffer removes the content.
    pub fn attach(&self, buffer: Option<Rc<ClientBuffer>>) {
        self.pending_buffer.set(Some(buffer));
    }

    pub fn commit(&self) {
        if let Some(buffer) = self.pending_buffer.take() {
            // the new buffer is referenced before the old reference drops
            // so that re-committing the same buffer never releases it
            let new_ref = match &buffer {
                Some(b) => BufferRef::new(b),
                None => BufferRef::none(),
            };
            self.buffer.set(buffer);
            *self.buffer_ref.borrow_mut() = new_ref;
        }
    }

    pub fn buffer(&self) -> Option<Rc<ClientBuffer>> {
        self.buffer.get()
    }

    /// Takes an additional reference on the current buffer for a consumer
    /// that outlives the next commit, e.g. a retained frame.
    pub fn buffer_ref(&self) -> BufferRef {
        self.buffer_ref.borrow().clone()
    }

    pub fn scanout_feedback(&self) -> Option<Rc<DrmFeedback>> {
        self.scanout_feedback.get()
    }

    /// Called by the backend when the surface starts or stops being a
    /// direct-scanout candidate on some output. Re-advertises the dmabuf
    /// feedback of this surface.
    pub fn set_scanout_feedback(&self, feedback: Option<Rc<DrmFeedback>>) {
        self.scanout_feedback.set(feedback);
        for consumer in self.dmabuf_feedback.lock().values() {
            consumer.resend();
        }
    }

    pub fn destroy(&self) -> Result<(), WlSurfaceError> {
        self.unset();
        self.client.objects.surfaces.remove(&self.id);
        self.client.remove_obj(self)?;
        Ok(())
    }

    fn unset(&self) {
        self.pending_buffer.take();
        self.buffer.take();
        *self.buffer_ref.borrow_mut() = BufferRef::none();
        self.scanout_feedback.take();
        self.dmabuf_feedback.clear();
    }
}

impl Object for WlSurface {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }

    fn break_loops(&self) {
        self.unset();
    }
}

#[derive(Debug, Error)]
pub enum WlSurfaceError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlSurfaceError, ClientError);
