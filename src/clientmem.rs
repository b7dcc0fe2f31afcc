use {
    crate::utils::oserror::OsError,
    std::{cell::Cell, ptr, rc::Rc},
    thiserror::Error,
    uapi::c,
};

#[derive(Debug, Error)]
pub enum ClientMemError {
    #[error("mmap failed")]
    MmapFailed(#[source] OsError),
}

/// A client-owned memory pool mapped into the compositor. The client may
/// resize the pool but never shrink it below the announced length.
pub struct ClientMem {
    data: *const [Cell<u8>],
}

#[derive(Clone)]
pub struct ClientMemOffset {
    mem: Rc<ClientMem>,
    data: *const [Cell<u8>],
}

impl ClientMem {
    pub fn new(fd: i32, len: usize) -> Result<Self, ClientMemError> {
        let data = unsafe {
            let data = c::mmap64(
                ptr::null_mut(),
                len,
                c::PROT_READ | c::PROT_WRITE,
                c::MAP_SHARED,
                fd,
                0,
            );
            if data == c::MAP_FAILED {
                return Err(ClientMemError::MmapFailed(OsError::default()));
            }
            std::slice::from_raw_parts_mut(data as *mut Cell<u8>, len)
        };
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        unsafe { (&(*self.data)).len() }
    }

    pub fn offset(self: &Rc<Self>, offset: usize) -> ClientMemOffset {
        let mem = unsafe { &*self.data };
        ClientMemOffset {
            mem: self.clone(),
            data: &mem[offset..],
        }
    }
}

impl ClientMemOffset {
    pub fn pool(&self) -> &Rc<ClientMem> {
        &self.mem
    }

    pub fn len(&self) -> usize {
        unsafe { (&(*self.data)).len() }
    }

    pub fn access<T, F: FnOnce(&[Cell<u8>]) -> T>(&self, f: F) -> Result<T, ClientMemError> {
        unsafe { Ok(f(&*self.data)) }
    }
}

impl Drop for ClientMem {
    fn drop(&mut self) {
        unsafe {
            c::munmap(self.data as *mut Cell<u8> as _, self.len());
        }
    }
}
