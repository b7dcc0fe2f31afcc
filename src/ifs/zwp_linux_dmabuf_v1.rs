use {
    crate::{
        client::{Client, ClientError},
        ifs::{
            zwp_linux_buffer_params_v1::ZwpLinuxBufferParamsV1,
            zwp_linux_dmabuf_feedback_v1::ZwpLinuxDmabufFeedbackV1,
        },
        object::{Interface, Object, ObjectId, Version},
        wire::{
            WlSurfaceId, ZwpLinuxBufferParamsV1Id, ZwpLinuxDmabufFeedbackV1Id, ZwpLinuxDmabufV1Id,
            zwp_linux_dmabuf_v1::INTERFACE,
        },
    },
    std::rc::Rc,
    thiserror::Error,
};

pub struct ZwpLinuxDmabufV1 {
    pub id: ZwpLinuxDmabufV1Id,
    pub client: Rc<Client>,
    pub version: Version,
}

impl ZwpLinuxDmabufV1 {
    pub fn new(id: ZwpLinuxDmabufV1Id, client: &Rc<Client>, version: Version) -> Self {
        Self {
            id,
            client: client.clone(),
            version,
        }
    }

    pub fn destroy(&self) -> Result<(), ZwpLinuxDmabufV1Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }

    pub fn create_params(
        self: &Rc<Self>,
        id: ZwpLinuxBufferParamsV1Id,
    ) -> Result<Rc<ZwpLinuxBufferParamsV1>, ZwpLinuxDmabufV1Error> {
        let obj = Rc::new(ZwpLinuxBufferParamsV1::new(id, self));
        self.client.add_client_obj(&obj)?;
        Ok(obj)
    }

    pub fn get_default_feedback(
        &self,
        id: ZwpLinuxDmabufFeedbackV1Id,
    ) -> Result<Rc<ZwpLinuxDmabufFeedbackV1>, ZwpLinuxDmabufV1Error> {
        let obj = Rc::new(ZwpLinuxDmabufFeedbackV1::new(id, &self.client, None));
        self.client.add_client_obj(&obj)?;
        self.client
            .state
            .drm_feedback_consumers
            .set((self.client.id, id), obj.clone());
        obj.resend();
        Ok(obj)
    }

    pub fn get_surface_feedback(
        &self,
        id: ZwpLinuxDmabufFeedbackV1Id,
        surface_id: WlSurfaceId,
    ) -> Result<Rc<ZwpLinuxDmabufFeedbackV1>, ZwpLinuxDmabufV1Error> {
        let surface = self.client.objects.surface(surface_id)?;
        let obj = Rc::new(ZwpLinuxDmabufFeedbackV1::new(
            id,
            &self.client,
            Some(surface.clone()),
        ));
        self.client.add_client_obj(&obj)?;
        self.client
            .state
            .drm_feedback_consumers
            .set((self.client.id, id), obj.clone());
        surface.dmabuf_feedback.set(id, obj.clone());
        obj.resend();
        Ok(obj)
    }
}

impl Object for ZwpLinuxDmabufV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum ZwpLinuxDmabufV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ZwpLinuxDmabufV1Error, ClientError);
