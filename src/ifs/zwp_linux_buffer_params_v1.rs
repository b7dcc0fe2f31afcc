use {
    crate::{
        client::ClientError,
        clientbuffer::{ClientBuffer, ClientBufferError},
        ifs::zwp_linux_dmabuf_v1::ZwpLinuxDmabufV1,
        object::{Interface, Object, ObjectId},
        utils::errorfmt::ErrorFmt,
        video::{
            Modifier,
            dmabuf::{DmaBuf, DmaBufPlane, MAX_PLANES, PlaneVec},
        },
        wire::{
            WlBufferId, ZwpLinuxBufferParamsV1Id,
            zwp_linux_buffer_params_v1::{Created, Failed, INTERFACE},
        },
    },
    ahash::AHashMap,
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
    thiserror::Error,
    uapi::OwnedFd,
};

const MAX_PLANE: u32 = MAX_PLANES as u32 - 1;

struct AddedPlane {
    fd: Rc<OwnedFd>,
    plane_idx: u32,
    offset: u32,
    stride: u32,
}

pub struct ZwpLinuxBufferParamsV1 {
    pub id: ZwpLinuxBufferParamsV1Id,
    pub parent: Rc<ZwpLinuxDmabufV1>,
    planes: RefCell<AHashMap<u32, AddedPlane>>,
    used: Cell<bool>,
    modifier: Cell<Option<Modifier>>,
}

impl ZwpLinuxBufferParamsV1 {
    pub fn new(id: ZwpLinuxBufferParamsV1Id, parent: &Rc<ZwpLinuxDmabufV1>) -> Self {
        Self {
            id,
            parent: parent.clone(),
            planes: RefCell::new(Default::default()),
            used: Cell::new(false),
            modifier: Cell::new(None),
        }
    }

    fn send_created(&self, buffer_id: WlBufferId) {
        self.parent.client.event(Created {
            self_id: self.id,
            buffer: buffer_id,
        })
    }

    fn send_failed(&self) {
        self.parent.client.event(Failed { self_id: self.id })
    }

    pub fn destroy(&self) -> Result<(), ZwpLinuxBufferParamsV1Error> {
        self.parent.client.remove_obj(self)?;
        Ok(())
    }

    pub fn add(
        &self,
        fd: Rc<OwnedFd>,
        plane_idx: u32,
        offset: u32,
        stride: u32,
        modifier: Modifier,
    ) -> Result<(), ZwpLinuxBufferParamsV1Error> {
        match self.modifier.get() {
            Some(m) if m != modifier => {
                return Err(ZwpLinuxBufferParamsV1Error::MixedModifiers(modifier, m));
            }
            _ => self.modifier.set(Some(modifier)),
        }
        if plane_idx > MAX_PLANE {
            return Err(ZwpLinuxBufferParamsV1Error::MaxPlane);
        }
        let plane = AddedPlane {
            fd,
            plane_idx,
            offset,
            stride,
        };
        if self.planes.borrow_mut().insert(plane_idx, plane).is_some() {
            return Err(ZwpLinuxBufferParamsV1Error::AlreadySet(plane_idx));
        }
        Ok(())
    }

    fn do_create(
        &self,
        buffer_id: Option<WlBufferId>,
        width: i32,
        height: i32,
        format: u32,
        _flags: u32,
    ) -> Result<Rc<ClientBuffer>, ZwpLinuxBufferParamsV1Error> {
        let client = &self.parent.client;
        let ctx = match client.state.render_ctx.get() {
            Some(ctx) => ctx,
            None => return Err(ZwpLinuxBufferParamsV1Error::NoRenderContext),
        };
        if width <= 0 || height <= 0 {
            return Err(ZwpLinuxBufferParamsV1Error::InvalidDimensions(
                width, height,
            ));
        }
        let formats = ctx.formats();
        let format = match formats.get(&format) {
            Some(f) => f,
            None => return Err(ZwpLinuxBufferParamsV1Error::InvalidFormat(format)),
        };
        let modifier = match self.modifier.get() {
            Some(m) => m,
            _ => return Err(ZwpLinuxBufferParamsV1Error::NoPlanes),
        };
        if !format.read_modifiers.contains(&modifier) {
            return Err(ZwpLinuxBufferParamsV1Error::InvalidModifier(modifier));
        }
        let mut dmabuf = DmaBuf {
            width,
            height,
            format: format.format,
            modifier,
            planes: PlaneVec::new(),
        };
        let mut planes: Vec<_> = self.planes.borrow_mut().drain().map(|v| v.1).collect();
        planes.sort_by_key(|p| p.plane_idx);
        for (i, p) in planes.into_iter().enumerate() {
            if p.plane_idx as usize != i {
                return Err(ZwpLinuxBufferParamsV1Error::MissingPlane(i));
            }
            dmabuf.planes.push(DmaBufPlane {
                offset: p.offset,
                stride: p.stride,
                fd: p.fd,
            });
        }
        let buffer_id = match buffer_id {
            Some(id) => id,
            None => client.objects.next_server_id()?.into(),
        };
        let buffer = ClientBuffer::new_dmabuf(buffer_id, client, format.format, dmabuf, &ctx)?;
        client.buffers.register(&buffer)?;
        Ok(buffer)
    }

    /// The non-immediate creation path: the client learns about failure
    /// through the `failed` event and may retry with different parameters.
    pub fn create(
        &self,
        width: i32,
        height: i32,
        format: u32,
        flags: u32,
    ) -> Result<(), ZwpLinuxBufferParamsV1Error> {
        if self.used.replace(true) {
            return Err(ZwpLinuxBufferParamsV1Error::AlreadyUsed);
        }
        match self.do_create(None, width, height, format, flags) {
            Ok(buffer) => self.send_created(buffer.id),
            Err(e) => {
                log::warn!("Could not create a dmabuf buffer: {}", ErrorFmt(e));
                self.send_failed();
            }
        }
        Ok(())
    }

    pub fn create_immed(
        &self,
        buffer_id: WlBufferId,
        width: i32,
        height: i32,
        format: u32,
        flags: u32,
    ) -> Result<Rc<ClientBuffer>, ZwpLinuxBufferParamsV1Error> {
        if self.used.replace(true) {
            return Err(ZwpLinuxBufferParamsV1Error::AlreadyUsed);
        }
        self.do_create(Some(buffer_id), width, height, format, flags)
    }
}

impl Object for ZwpLinuxBufferParamsV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum ZwpLinuxBufferParamsV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("The params object has already been used")]
    AlreadyUsed,
    #[error("A buffer can contain at most 4 planes")]
    MaxPlane,
    #[error("Tried to add a plane with modifier {0} that differs from a previous modifier {1}")]
    MixedModifiers(u64, u64),
    #[error("The plane {0} was already set")]
    AlreadySet(u32),
    #[error("The compositor has no render context attached")]
    NoRenderContext,
    #[error("The format {0} is not supported")]
    InvalidFormat(u32),
    #[error("No planes were added")]
    NoPlanes,
    #[error("The modifier {0} is not supported")]
    InvalidModifier(u64),
    #[error("Plane {0} was not set")]
    MissingPlane(usize),
    #[error("The buffer dimensions {0}x{1} are invalid")]
    InvalidDimensions(i32, i32),
    #[error("Could not import the buffer")]
    BufferError(#[source] Box<ClientBufferError>),
}
efrom!(ZwpLinuxBufferParamsV1Error, ClientError);
efrom!(ZwpLinuxBufferParamsV1Error, BufferError, ClientBufferError);
