use {
    crate::{format::Format, video::Modifier},
    arrayvec::ArrayVec,
    std::rc::Rc,
    uapi::OwnedFd,
};

#[derive(Clone, Debug)]
pub struct DmaBufPlane {
    pub offset: u32,
    pub stride: u32,
    pub fd: Rc<OwnedFd>,
}

pub const MAX_PLANES: usize = 4;

pub type PlaneVec<T> = ArrayVec<T, MAX_PLANES>;

/// The description of a dma-buf submitted by a client: one fd per plane
/// plus the layout metadata needed to import it.
#[derive(Debug, Clone)]
pub struct DmaBuf {
    pub width: i32,
    pub height: i32,
    pub format: &'static Format,
    pub modifier: Modifier,
    pub planes: PlaneVec<DmaBufPlane>,
}
