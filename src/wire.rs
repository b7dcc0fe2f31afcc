//! Object id newtypes and server-to-client events for the interfaces
//! implemented by this crate. The wire format is the standard one: two
//! header words (object id, size << 16 | opcode) followed by the arguments.

id!(WlDisplayId);
id!(WlCompositorId);
id!(WlSurfaceId);
id!(WlBufferId);
id!(XdgToplevelId);
id!(ZwpLinuxDmabufV1Id);
id!(ZwpLinuxBufferParamsV1Id);
id!(ZwpLinuxDmabufFeedbackV1Id);
id!(ZxdgDecorationManagerV1Id);
id!(ZxdgToplevelDecorationV1Id);
id!(ExtIdleNotifierV1Id);
id!(ExtIdleNotificationV1Id);

pub mod wl_compositor {
    use crate::object::Interface;

    pub const INTERFACE: Interface = Interface("wl_compositor");
}

pub mod wl_surface {
    use crate::object::Interface;

    pub const INTERFACE: Interface = Interface("wl_surface");
}

pub mod xdg_toplevel {
    use crate::object::Interface;

    pub const INTERFACE: Interface = Interface("xdg_toplevel");
}

pub mod zwp_linux_dmabuf_v1 {
    use crate::object::Interface;

    pub const INTERFACE: Interface = Interface("zwp_linux_dmabuf_v1");
}

pub mod zxdg_decoration_manager_v1 {
    use crate::object::Interface;

    pub const INTERFACE: Interface = Interface("zxdg_decoration_manager_v1");
}

pub mod ext_idle_notifier_v1 {
    use crate::object::Interface;

    pub const INTERFACE: Interface = Interface("ext_idle_notifier_v1");
}

pub mod wl_display {
    use {
        super::WlDisplayId,
        crate::{
            client::EventFormatter,
            object::{Interface, ObjectId},
            utils::buffd::MsgFormatter,
        },
    };

    pub const INTERFACE: Interface = Interface("wl_display");

    pub const ERROR: u32 = 0;
    pub const DELETE_ID: u32 = 1;

    #[derive(Debug)]
    pub struct Error {
        pub self_id: WlDisplayId,
        pub object_id: ObjectId,
        pub code: u32,
        pub message: String,
    }

    impl EventFormatter for Error {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, ERROR)
                .object(self.object_id)
                .uint(self.code)
                .string(&self.message);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct DeleteId {
        pub self_id: WlDisplayId,
        pub id: u32,
    }

    impl EventFormatter for DeleteId {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, DELETE_ID).uint(self.id);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }
}

pub mod wl_buffer {
    use {
        super::WlBufferId,
        crate::{
            client::EventFormatter,
            object::{Interface, ObjectId},
            utils::buffd::MsgFormatter,
        },
    };

    pub const INTERFACE: Interface = Interface("wl_buffer");

    pub const RELEASE: u32 = 0;

    #[derive(Debug)]
    pub struct Release {
        pub self_id: WlBufferId,
    }

    impl EventFormatter for Release {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, RELEASE);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }
}

pub mod zwp_linux_buffer_params_v1 {
    use {
        super::{WlBufferId, ZwpLinuxBufferParamsV1Id},
        crate::{
            client::EventFormatter,
            object::{Interface, ObjectId},
            utils::buffd::MsgFormatter,
        },
    };

    pub const INTERFACE: Interface = Interface("zwp_linux_buffer_params_v1");

    pub const CREATED: u32 = 0;
    pub const FAILED: u32 = 1;

    #[derive(Debug)]
    pub struct Created {
        pub self_id: ZwpLinuxBufferParamsV1Id,
        pub buffer: WlBufferId,
    }

    impl EventFormatter for Created {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, CREATED).object(self.buffer);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct Failed {
        pub self_id: ZwpLinuxBufferParamsV1Id,
    }

    impl EventFormatter for Failed {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, FAILED);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }
}

pub mod zwp_linux_dmabuf_feedback_v1 {
    use {
        super::ZwpLinuxDmabufFeedbackV1Id,
        crate::{
            client::EventFormatter,
            object::{Interface, ObjectId},
            utils::buffd::MsgFormatter,
        },
        std::rc::Rc,
        uapi::{OwnedFd, c},
    };

    pub const INTERFACE: Interface = Interface("zwp_linux_dmabuf_feedback_v1");

    pub const DONE: u32 = 0;
    pub const FORMAT_TABLE: u32 = 1;
    pub const MAIN_DEVICE: u32 = 2;
    pub const TRANCHE_DONE: u32 = 3;
    pub const TRANCHE_TARGET_DEVICE: u32 = 4;
    pub const TRANCHE_FORMATS: u32 = 5;
    pub const TRANCHE_FLAGS: u32 = 6;

    #[derive(Debug)]
    pub struct Done {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
    }

    impl EventFormatter for Done {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, DONE);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct FormatTable {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
        pub fd: Rc<OwnedFd>,
        pub size: u32,
    }

    impl EventFormatter for FormatTable {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, FORMAT_TABLE)
                .fd(self.fd)
                .uint(self.size);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct MainDevice {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
        pub device: c::dev_t,
    }

    impl EventFormatter for MainDevice {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, MAIN_DEVICE).binary(&self.device);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct TrancheDone {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
    }

    impl EventFormatter for TrancheDone {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, TRANCHE_DONE);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct TrancheTargetDevice {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
        pub device: c::dev_t,
    }

    impl EventFormatter for TrancheTargetDevice {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, TRANCHE_TARGET_DEVICE)
                .binary(&self.device);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct TrancheFormats {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
        pub indices: Vec<u16>,
    }

    impl EventFormatter for TrancheFormats {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, TRANCHE_FORMATS)
                .binary(&self.indices[..]);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct TrancheFlags {
        pub self_id: ZwpLinuxDmabufFeedbackV1Id,
        pub flags: u32,
    }

    impl EventFormatter for TrancheFlags {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, TRANCHE_FLAGS).uint(self.flags);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }
}

pub mod zxdg_toplevel_decoration_v1 {
    use {
        super::ZxdgToplevelDecorationV1Id,
        crate::{
            client::EventFormatter,
            object::{Interface, ObjectId},
            utils::buffd::MsgFormatter,
        },
    };

    pub const INTERFACE: Interface = Interface("zxdg_toplevel_decoration_v1");

    pub const CONFIGURE: u32 = 0;

    #[derive(Debug)]
    pub struct Configure {
        pub self_id: ZxdgToplevelDecorationV1Id,
        pub mode: u32,
    }

    impl EventFormatter for Configure {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, CONFIGURE).uint(self.mode);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }
}

pub mod ext_idle_notification_v1 {
    use {
        super::ExtIdleNotificationV1Id,
        crate::{
            client::EventFormatter,
            object::{Interface, ObjectId},
            utils::buffd::MsgFormatter,
        },
    };

    pub const INTERFACE: Interface = Interface("ext_idle_notification_v1");

    pub const IDLED: u32 = 0;
    pub const RESUMED: u32 = 1;

    #[derive(Debug)]
    pub struct Idled {
        pub self_id: ExtIdleNotificationV1Id,
    }

    impl EventFormatter for Idled {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, IDLED);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }

    #[derive(Debug)]
    pub struct Resumed {
        pub self_id: ExtIdleNotificationV1Id,
    }

    impl EventFormatter for Resumed {
        fn format(self, fmt: &mut MsgFormatter<'_>) {
            fmt.header(self.self_id, RESUMED);
        }

        fn id(&self) -> ObjectId {
            self.self_id.into()
        }

        fn interface(&self) -> Interface {
            INTERFACE
        }
    }
}
