use {
    crate::{
        client::{Client, ClientError},
        drm_feedback::DrmFeedback,
        ifs::wl_surface::WlSurface,
        object::{Interface, Object, ObjectId},
        wire::{ZwpLinuxDmabufFeedbackV1Id, zwp_linux_dmabuf_feedback_v1::*},
    },
    std::rc::Rc,
    thiserror::Error,
    uapi::{OwnedFd, c},
};

pub struct ZwpLinuxDmabufFeedbackV1 {
    pub id: ZwpLinuxDmabufFeedbackV1Id,
    pub client: Rc<Client>,
    pub surface: Option<Rc<WlSurface>>,
}

impl ZwpLinuxDmabufFeedbackV1 {
    pub fn new(
        id: ZwpLinuxDmabufFeedbackV1Id,
        client: &Rc<Client>,
        surface: Option<Rc<WlSurface>>,
    ) -> Self {
        Self {
            id,
            client: client.clone(),
            surface,
        }
    }

    /// Emits one complete feedback sequence. Everything between here and
    /// the final `done` belongs to a single atomic update.
    pub fn send_feedback(&self, feedback: &DrmFeedback) {
        self.send_format_table(&feedback.fd, feedback.size);
        self.send_main_device(feedback.main_device);
        for tranche in &feedback.tranches {
            self.send_tranche_target_device(tranche.device);
            self.send_tranche_formats(&tranche.indices);
            if tranche.flags != 0 {
                self.send_tranche_flags(tranche.flags);
            }
            self.send_tranche_done();
        }
        self.send_done();
    }

    /// Re-advertises the feedback that currently applies to this object:
    /// the scanout feedback of the surface if any, the default feedback
    /// otherwise.
    pub fn resend(&self) {
        let feedback = self
            .surface
            .as_ref()
            .and_then(|s| s.scanout_feedback())
            .or_else(|| self.client.state.drm_feedback.get());
        if let Some(feedback) = feedback {
            self.send_feedback(&feedback);
        }
    }

    fn send_done(&self) {
        self.client.event(Done { self_id: self.id });
    }

    fn send_format_table(&self, fd: &Rc<OwnedFd>, size: usize) {
        self.client.event(FormatTable {
            self_id: self.id,
            fd: fd.clone(),
            size: size as _,
        });
    }

    fn send_main_device(&self, dev: c::dev_t) {
        self.client.event(MainDevice {
            self_id: self.id,
            device: dev,
        });
    }

    fn send_tranche_done(&self) {
        self.client.event(TrancheDone { self_id: self.id });
    }

    fn send_tranche_target_device(&self, dev: c::dev_t) {
        self.client.event(TrancheTargetDevice {
            self_id: self.id,
            device: dev,
        });
    }

    fn send_tranche_formats(&self, indices: &[u16]) {
        self.client.event(TrancheFormats {
            self_id: self.id,
            indices: indices.to_vec(),
        });
    }

    fn send_tranche_flags(&self, flags: u32) {
        self.client.event(TrancheFlags {
            self_id: self.id,
            flags,
        });
    }

    pub fn destroy(&self) -> Result<(), ZwpLinuxDmabufFeedbackV1Error> {
        self.detach();
        self.client.remove_obj(self)?;
        Ok(())
    }

    fn detach(&self) {
        self.client
            .state
            .drm_feedback_consumers
            .remove(&(self.client.id, self.id));
        if let Some(surface) = &self.surface {
            surface.dmabuf_feedback.remove(&self.id);
        }
    }
}

impl Object for ZwpLinuxDmabufFeedbackV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }

    fn break_loops(&self) {
        self.detach();
    }
}

#[derive(Debug, Error)]
pub enum ZwpLinuxDmabufFeedbackV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwpLinuxDmabufFeedbackV1Error, ClientError);
