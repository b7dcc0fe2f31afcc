use {
    crate::{
        gfx_api::GfxContext,
        utils::oserror::OsError,
        video::{Modifier, drm::drm_node_path},
    },
    byteorder::{NativeEndian, WriteBytesExt},
    indexmap::IndexSet,
    std::{io, io::Write, rc::Rc},
    thiserror::Error,
    uapi::{OwnedFd, c},
};

#[cfg(test)]
mod tests;

pub const SCANOUT: u32 = 1;

/// One fully built feedback advertisement: the sealed format table plus the
/// tranche list. Immutable; updating the advertised feedback means building
/// a new object and swapping it in, so consumers never observe a partial
/// update.
pub struct DrmFeedback {
    pub fd: Rc<OwnedFd>,
    pub size: usize,
    pub main_device: c::dev_t,
    pub main_device_path: Option<String>,
    pub tranches: Vec<DrmFeedbackTranche>,
}

/// A group of format-table indices supported by one target device, in
/// decreasing order of preference.
#[derive(Clone, Debug)]
pub struct DrmFeedbackTranche {
    pub device: c::dev_t,
    pub indices: Vec<u16>,
    pub flags: u32,
}

impl DrmFeedback {
    /// Builds the default feedback for a render context: one tranche
    /// containing every format/modifier pair the context can import.
    pub fn new(
        ctx: &Rc<dyn GfxContext>,
        main_device: c::dev_t,
    ) -> Result<Self, DrmFeedbackError> {
        let mut builder = DrmFeedbackBuilder::new(main_device);
        builder.start_tranche(main_device)?;
        for format in ctx.formats().values() {
            for modifier in &format.read_modifiers {
                builder.tranche_add_format(format.format.drm, *modifier)?;
            }
        }
        builder.tranche_done()?;
        builder.build()
    }
}

struct PendingTranche {
    device: c::dev_t,
    indices: Vec<u16>,
    flags: u32,
}

/// Accumulates one atomic feedback update. The pending tranche becomes
/// visible only through [`tranche_done`](Self::tranche_done), and nothing
/// becomes visible to clients before [`build`](Self::build) succeeds.
pub struct DrmFeedbackBuilder {
    main_device: c::dev_t,
    entries: IndexSet<(u32, Modifier)>,
    tranches: Vec<DrmFeedbackTranche>,
    pending: Option<PendingTranche>,
}

impl DrmFeedbackBuilder {
    pub fn new(main_device: c::dev_t) -> Self {
        Self {
            main_device,
            entries: Default::default(),
            tranches: Default::default(),
            pending: None,
        }
    }

    /// Adds a format/modifier pair to the format table, deduplicating, and
    /// returns its table index.
    pub fn add_format(
        &mut self,
        format: u32,
        modifier: Modifier,
    ) -> Result<u16, DrmFeedbackError> {
        let (idx, _) = self.entries.insert_full((format, modifier));
        if idx > u16::MAX as usize {
            return Err(DrmFeedbackError::TableTooLarge);
        }
        Ok(idx as u16)
    }

    pub fn start_tranche(&mut self, device: c::dev_t) -> Result<(), DrmFeedbackError> {
        if self.pending.is_some() {
            return Err(DrmFeedbackError::UnfinishedTranche);
        }
        self.pending = Some(PendingTranche {
            device,
            indices: vec![],
            flags: 0,
        });
        Ok(())
    }

    pub fn tranche_add_format(
        &mut self,
        format: u32,
        modifier: Modifier,
    ) -> Result<(), DrmFeedbackError> {
        let idx = self.add_format(format, modifier)?;
        let Some(pending) = &mut self.pending else {
            return Err(DrmFeedbackError::NoTranche);
        };
        if !pending.indices.contains(&idx) {
            pending.indices.push(idx);
        }
        Ok(())
    }

    pub fn tranche_flags(&mut self, flags: u32) -> Result<(), DrmFeedbackError> {
        let Some(pending) = &mut self.pending else {
            return Err(DrmFeedbackError::NoTranche);
        };
        pending.flags |= flags;
        Ok(())
    }

    /// Commits the pending tranche into the tranche list.
    pub fn tranche_done(&mut self) -> Result<(), DrmFeedbackError> {
        let Some(pending) = self.pending.take() else {
            return Err(DrmFeedbackError::NoTranche);
        };
        self.tranches.push(DrmFeedbackTranche {
            device: pending.device,
            indices: pending.indices,
            flags: pending.flags,
        });
        Ok(())
    }

    /// Writes and seals the format table and produces the immutable
    /// feedback object.
    pub fn build(self) -> Result<DrmFeedback, DrmFeedbackError> {
        if self.pending.is_some() {
            return Err(DrmFeedbackError::UnfinishedTranche);
        }
        let mut data = vec![];
        for (format, modifier) in &self.entries {
            data.write_u32::<NativeEndian>(*format).unwrap();
            data.write_u32::<NativeEndian>(0).unwrap();
            data.write_u64::<NativeEndian>(*modifier).unwrap();
        }
        let mut memfd = uapi::memfd_create("drm-feedback", c::MFD_CLOEXEC | c::MFD_ALLOW_SEALING)
            .map_err(|e| DrmFeedbackError::MemfdFailed(e.into()))?;
        memfd
            .write_all(&data)
            .map_err(DrmFeedbackError::WriteFailed)?;
        uapi::lseek(memfd.raw(), 0, c::SEEK_SET)
            .map_err(|e| DrmFeedbackError::SealFailed(e.into()))?;
        uapi::fcntl_add_seals(
            memfd.raw(),
            c::F_SEAL_SEAL | c::F_SEAL_GROW | c::F_SEAL_SHRINK | c::F_SEAL_WRITE,
        )
        .map_err(|e| DrmFeedbackError::SealFailed(e.into()))?;
        let mut tranches = self.tranches;
        if tranches.is_empty() {
            tranches.push(DrmFeedbackTranche {
                device: self.main_device,
                indices: (0..self.entries.len() as u16).collect(),
                flags: 0,
            });
        }
        Ok(DrmFeedback {
            fd: Rc::new(memfd),
            size: data.len(),
            main_device: self.main_device,
            main_device_path: drm_node_path(self.main_device),
            tranches,
        })
    }
}

#[derive(Debug, Error)]
pub enum DrmFeedbackError {
    #[error("Could not create a memfd")]
    MemfdFailed(#[source] OsError),
    #[error("Could not write the format table")]
    WriteFailed(#[source] io::Error),
    #[error("Could not seal the format table")]
    SealFailed(#[source] OsError),
    #[error("The format table exceeds 65536 entries")]
    TableTooLarge,
    #[error("A tranche is still under construction")]
    UnfinishedTranche,
    #[error("No tranche is under construction")]
    NoTranche,
}
