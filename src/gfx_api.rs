use {
    crate::{format::Format, video::dmabuf::DmaBuf},
    ahash::{AHashMap, AHashSet},
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter},
        rc::Rc,
    },
};

/// The modifiers a render context can import and render to for one format.
#[derive(Debug)]
pub struct GfxFormat {
    pub format: &'static Format,
    pub read_modifiers: AHashSet<u64>,
    pub write_modifiers: AHashSet<u64>,
}

/// A render context belonging to one GPU. Implemented by the graphics
/// backends of the embedding compositor.
pub trait GfxContext: Debug {
    /// Imports a dma-buf. This is a synchronous entry point into the GPU
    /// driver and may fail for exhausted or incompatible buffers.
    fn dmabuf_img(self: Rc<Self>, buf: &DmaBuf) -> Result<Rc<dyn GfxImage>, GfxError>;

    fn formats(&self) -> Rc<AHashMap<u32, GfxFormat>>;
}

pub trait GfxImage {
    fn to_framebuffer(self: Rc<Self>) -> Result<Rc<dyn GfxFramebuffer>, GfxError>;

    fn to_texture(self: Rc<Self>) -> Result<Rc<dyn GfxTexture>, GfxError>;

    fn width(&self) -> i32;

    fn height(&self) -> i32;
}

pub trait GfxTexture: Debug {
    fn width(&self) -> i32;

    fn height(&self) -> i32;
}

pub trait GfxFramebuffer: Debug {
    fn size(&self) -> (i32, i32);
}

#[derive(Debug)]
pub struct GfxError(pub Box<dyn Error>);

impl Display for GfxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Error for GfxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}
