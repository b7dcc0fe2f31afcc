pub trait PtrExt<T> {
    unsafe fn deref<'a>(self) -> &'a T;
}

impl<T> PtrExt<T> for *const T {
    unsafe fn deref<'a>(self) -> &'a T {
        unsafe { &*self }
    }
}

pub trait MutPtrExt<T> {
    unsafe fn deref_mut<'a>(self) -> &'a mut T;
}

impl<T> MutPtrExt<T> for *mut T {
    unsafe fn deref_mut<'a>(self) -> &'a mut T {
        unsafe { &mut *self }
    }
}
