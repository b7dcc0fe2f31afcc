use {
    crate::{
        client::Client,
        clientmem::{ClientMem, ClientMemOffset},
        format::Format,
        gfx_api::{GfxContext, GfxError, GfxFramebuffer, GfxImage, GfxTexture},
        object::WL_DISPLAY_ID,
        rect::Rect,
        scale::Scale,
        utils::copyhashmap::CopyHashMap,
        utils::numcell::NumCell,
        video::dmabuf::DmaBuf,
        wire::{WlBufferId, wl_buffer::Release, wl_display},
    },
    std::{
        cell::{Cell, RefCell},
        fmt::{Debug, Formatter},
        rc::Rc,
    },
    thiserror::Error,
};


/// Pixel content submitted by a client or created by the compositor
/// itself.
///
/// The buffer stays alive while any [`BufferRef`] points to it. When the
/// last reference goes away the buffer is either released back to the
/// client (so it may reuse the storage) or, if the wire resource was
/// destroyed in the meantime, its storage is dropped.
pub struct ClientBuffer {
    pub id: WlBufferId,
    client: Option<Rc<Client>>,
    pub rect: Rect,
    pub format: &'static Format,
    ref_count: NumCell<u32>,
    destroyed: Cell<bool>,
    released: Cell<bool>,
    pub storage: RefCell<Option<ClientBufferStorage>>,
}

pub enum ClientBufferStorage {
    Dmabuf {
        dmabuf: DmaBuf,
        img: Rc<dyn GfxImage>,
        tex: Option<Rc<dyn GfxTexture>>,
        fb: Option<Rc<dyn GfxFramebuffer>>,
    },
    Shm {
        mem: Rc<ClientMemOffset>,
        stride: i32,
    },
    Internal {
        backing: InternalBacking,
        scale: Scale,
    },
    XPixmap {
        pixmap: XPixmap,
    },
}

pub enum InternalBacking {
    Cpu { data: RefCell<Vec<u8>>, stride: i32 },
    Gpu { fb: Rc<dyn GfxFramebuffer> },
}

/// Attributes of an X11 pixmap, captured by the X11 shim while the server
/// was grabbed.
#[derive(Copy, Clone, Debug)]
pub struct XPixmap {
    pub pixmap: u32,
    pub visual: u32,
    pub depth: u8,
}

impl Debug for ClientBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuffer")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("format", &self.format.name)
            .field("ref_count", &self.ref_count.get())
            .field("destroyed", &self.destroyed.get())
            .finish_non_exhaustive()
    }
}

impl ClientBuffer {
    pub fn new_dmabuf(
        id: WlBufferId,
        client: &Rc<Client>,
        format: &'static Format,
        dmabuf: DmaBuf,
        ctx: &Rc<dyn GfxContext>,
    ) -> Result<Rc<Self>, ClientBufferError> {
        let img = ctx.clone().dmabuf_img(&dmabuf)?;
        let width = img.width();
        let height = img.height();
        Ok(Rc::new(Self {
            id,
            client: Some(client.clone()),
            rect: Rect::new_sized(0, 0, width, height).unwrap(),
            format,
            ref_count: NumCell::new(0),
            destroyed: Cell::new(false),
            released: Cell::new(false),
            storage: RefCell::new(Some(ClientBufferStorage::Dmabuf {
                dmabuf,
                img,
                tex: None,
                fb: None,
            })),
        }))
    }

    pub fn new_shm(
        id: WlBufferId,
        client: &Rc<Client>,
        offset: usize,
        width: i32,
        height: i32,
        stride: i32,
        format: &'static Format,
        mem: &Rc<ClientMem>,
    ) -> Result<Rc<Self>, ClientBufferError> {
        let Some(shm_info) = &format.shm_info else {
            return Err(ClientBufferError::UnsupportedShmFormat(format.name));
        };
        let bytes = stride as u64 * height as u64;
        if bytes + offset as u64 > mem.len() as u64 {
            return Err(ClientBufferError::OutOfBounds);
        }
        if (stride as u64) < width as u64 * shm_info.bpp as u64 {
            return Err(ClientBufferError::StrideTooSmall);
        }
        let mem = Rc::new(mem.offset(offset));
        Ok(Rc::new(Self {
            id,
            client: Some(client.clone()),
            rect: Rect::new_sized(0, 0, width, height).unwrap(),
            format,
            ref_count: NumCell::new(0),
            destroyed: Cell::new(false),
            released: Cell::new(false),
            storage: RefCell::new(Some(ClientBufferStorage::Shm { mem, stride })),
        }))
    }

    /// Creates a compositor-internal buffer backed by CPU pixels. Internal
    /// buffers have no wire resource; `release` is a no-op for them.
    pub fn new_internal_cpu(
        data: Vec<u8>,
        width: i32,
        height: i32,
        stride: i32,
        format: &'static Format,
        scale: Scale,
    ) -> Rc<Self> {
        Rc::new(Self {
            id: WlBufferId::NONE,
            client: None,
            rect: Rect::new_sized(0, 0, width, height).unwrap(),
            format,
            ref_count: NumCell::new(0),
            destroyed: Cell::new(false),
            released: Cell::new(false),
            storage: RefCell::new(Some(ClientBufferStorage::Internal {
                backing: InternalBacking::Cpu {
                    data: RefCell::new(data),
                    stride,
                },
                scale,
            })),
        })
    }

    /// Creates a compositor-internal buffer backed by a GPU framebuffer.
    pub fn new_internal_fb(
        fb: Rc<dyn GfxFramebuffer>,
        format: &'static Format,
        scale: Scale,
    ) -> Rc<Self> {
        let (width, height) = fb.size();
        Rc::new(Self {
            id: WlBufferId::NONE,
            client: None,
            rect: Rect::new_sized(0, 0, width, height).unwrap(),
            format,
            ref_count: NumCell::new(0),
            destroyed: Cell::new(false),
            released: Cell::new(false),
            storage: RefCell::new(Some(ClientBufferStorage::Internal {
                backing: InternalBacking::Gpu { fb },
                scale,
            })),
        })
    }

    /// Wraps an X11 pixmap of an Xwayland client.
    pub fn new_x_pixmap(
        pixmap: XPixmap,
        width: i32,
        height: i32,
        format: &'static Format,
    ) -> Rc<Self> {
        Rc::new(Self {
            id: WlBufferId::NONE,
            client: None,
            rect: Rect::new_sized(0, 0, width, height).unwrap(),
            format,
            ref_count: NumCell::new(0),
            destroyed: Cell::new(false),
            released: Cell::new(false),
            storage: RefCell::new(Some(ClientBufferStorage::XPixmap { pixmap })),
        })
    }

    pub fn size(&self) -> (i32, i32) {
        (self.rect.width(), self.rect.height())
    }

    /// The size of the buffer in logical coordinates. Differs from
    /// [`size`](Self::size) only for internal buffers with a device pixel
    /// ratio other than 1.
    pub fn logical_size(&self) -> (i32, i32) {
        let (width, height) = self.size();
        match &*self.storage.borrow() {
            Some(ClientBufferStorage::Internal { scale, .. }) => {
                let [width, height] = scale.logical_size([width, height]);
                (width, height)
            }
            _ => (width, height),
        }
    }

    pub fn has_alpha_channel(&self) -> bool {
        self.format.has_alpha
    }

    pub fn ref_count(&self) -> u32 {
        self.ref_count.get()
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn released(&self) -> bool {
        self.released.get()
    }

    fn ref_(&self) {
        self.ref_count.fetch_add(1);
    }

    fn unref(&self) {
        let prev = self.ref_count.fetch_sub(1);
        assert!(prev > 0, "Client buffer reference count underflow");
        if prev != 1 {
            return;
        }
        if self.destroyed.get() {
            self.storage.borrow_mut().take();
        } else {
            self.release();
        }
    }

    /// Called when the wire resource is destroyed. The pixel storage stays
    /// alive until the renderer drops its last reference; `release` is
    /// never sent afterwards.
    pub fn mark_destroyed(&self) {
        assert!(
            !self.destroyed.replace(true),
            "Client buffer destroyed twice"
        );
        if self.ref_count.get() == 0 {
            self.storage.borrow_mut().take();
        }
    }

    fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        if let Some(client) = &self.client
            && self.id.is_some()
        {
            client.event(Release { self_id: self.id });
        }
    }

    pub fn get_texture(&self) -> Option<Rc<dyn GfxTexture>> {
        match &*self.storage.borrow() {
            Some(ClientBufferStorage::Dmabuf { tex, .. }) => tex.clone(),
            _ => None,
        }
    }

    /// Converts the imported dma-buf image into a sampleable texture. Shm
    /// and internal buffers are uploaded by the renderer instead.
    pub fn update_texture(&self) -> Result<(), ClientBufferError> {
        let storage = &mut *self.storage.borrow_mut();
        if let Some(ClientBufferStorage::Dmabuf { img, tex, .. }) = storage
            && tex.is_none()
        {
            *tex = Some(img.clone().to_texture()?);
        }
        Ok(())
    }

    pub fn update_framebuffer(&self) -> Result<(), ClientBufferError> {
        let storage = &mut *self.storage.borrow_mut();
        if let Some(ClientBufferStorage::Dmabuf { img, fb, .. }) = storage
            && fb.is_none()
        {
            *fb = Some(img.clone().to_framebuffer()?);
        }
        Ok(())
    }
}

/// A counted handle to a [`ClientBuffer`]. The null handle is a valid
/// value.
pub struct BufferRef {
    buffer: Option<Rc<ClientBuffer>>,
}

impl BufferRef {
    pub fn new(buffer: &Rc<ClientBuffer>) -> Self {
        buffer.ref_();
        Self {
            buffer: Some(buffer.clone()),
        }
    }

    pub const fn none() -> Self {
        Self { buffer: None }
    }

    pub fn get(&self) -> Option<&Rc<ClientBuffer>> {
        self.buffer.as_ref()
    }

    pub fn is_some(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.buffer.is_none()
    }

    pub fn size(&self) -> (i32, i32) {
        match &self.buffer {
            Some(b) => b.size(),
            _ => Default::default(),
        }
    }

    pub fn has_alpha_channel(&self) -> bool {
        match &self.buffer {
            Some(b) => b.has_alpha_channel(),
            _ => false,
        }
    }
}

impl Clone for BufferRef {
    fn clone(&self) -> Self {
        if let Some(b) = &self.buffer {
            b.ref_();
        }
        Self {
            buffer: self.buffer.clone(),
        }
    }
}

impl Drop for BufferRef {
    fn drop(&mut self) {
        if let Some(b) = self.buffer.take() {
            b.unref();
        }
    }
}

impl Default for BufferRef {
    fn default() -> Self {
        Self::none()
    }
}

impl PartialEq for BufferRef {
    fn eq(&self, other: &Self) -> bool {
        match (&self.buffer, &other.buffer) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for BufferRef {}

impl Debug for BufferRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.buffer {
            Some(b) => Debug::fmt(b, f),
            _ => f.write_str("BufferRef(None)"),
        }
    }
}

/// The per-client table of wire-backed buffers. Resolves wire ids in O(1)
/// and is the single place that routes wire destroy requests into
/// [`ClientBuffer::mark_destroyed`].
pub struct BufferRegistry {
    buffers: CopyHashMap<WlBufferId, Rc<ClientBuffer>>,
}

impl Default for BufferRegistry {
    fn default() -> Self {
        Self {
            buffers: Default::default(),
        }
    }
}

impl BufferRegistry {
    pub fn register(&self, buffer: &Rc<ClientBuffer>) -> Result<(), ClientBufferError> {
        debug_assert!(buffer.id.is_some());
        if self.buffers.contains(&buffer.id) {
            return Err(ClientBufferError::IdAlreadyInUse(buffer.id));
        }
        self.buffers.set(buffer.id, buffer.clone());
        Ok(())
    }

    pub fn lookup(&self, id: WlBufferId) -> Option<Rc<ClientBuffer>> {
        self.buffers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Handles a destroy request on the buffer resource. A second destroy
    /// for the same id no longer resolves and is reported to the caller.
    pub fn wire_destroy(
        &self,
        client: &Client,
        id: WlBufferId,
    ) -> Result<(), ClientBufferError> {
        let Some(buffer) = self.buffers.remove(&id) else {
            return Err(ClientBufferError::UnknownBuffer(id));
        };
        buffer.mark_destroyed();
        client.event(wl_display::DeleteId {
            self_id: WL_DISPLAY_ID,
            id: id.raw(),
        });
        Ok(())
    }

    /// Tears down all registrations when the client disconnects. Renderer
    /// references drain naturally as the next frames are composed.
    pub fn clear(&self) {
        let buffers: Vec<_> = self.buffers.lock().drain().map(|(_, b)| b).collect();
        for buffer in buffers {
            if !buffer.destroyed() {
                buffer.mark_destroyed();
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientBufferError {
    #[error("The requested memory region is out of bounds for the pool")]
    OutOfBounds,
    #[error("The stride does not fit all pixels in a row")]
    StrideTooSmall,
    #[error("Buffer format {0} is not supported for shm buffers")]
    UnsupportedShmFormat(&'static str),
    #[error("The graphics library could not import the client image")]
    GfxError(#[from] GfxError),
    #[error("There is no buffer with id {0}")]
    UnknownBuffer(WlBufferId),
    #[error("The buffer id {0} is already in use")]
    IdAlreadyInUse(WlBufferId),
}
