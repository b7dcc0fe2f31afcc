use {
    crate::{
        client::{ClientId, Clients},
        drm_feedback::DrmFeedback,
        gfx_api::GfxContext,
        idle::IdleState,
        ifs::{
            xdg_toplevel::Decoration, zwp_linux_dmabuf_feedback_v1::ZwpLinuxDmabufFeedbackV1,
        },
        time::Time,
        utils::{clonecell::CloneCell, copyhashmap::CopyHashMap},
        wire::ZwpLinuxDmabufFeedbackV1Id,
    },
    std::{cell::Cell, rc::Rc},
};

/// Compositor-global state shared by all clients.
pub struct State {
    pub clients: Clients,
    pub idle: IdleState,
    /// The current time, updated by the event loop once per dispatch
    /// iteration.
    pub now: Cell<Time>,
    pub render_ctx: CloneCell<Option<Rc<dyn GfxContext>>>,
    pub drm_feedback: CloneCell<Option<Rc<DrmFeedback>>>,
    pub drm_feedback_consumers:
        CopyHashMap<(ClientId, ZwpLinuxDmabufFeedbackV1Id), Rc<ZwpLinuxDmabufFeedbackV1>>,
    pub preferred_decoration: Cell<Decoration>,
}

impl State {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            clients: Clients::new(),
            idle: IdleState::new(),
            now: Cell::new(Time::now_unchecked()),
            render_ctx: Default::default(),
            drm_feedback: Default::default(),
            drm_feedback_consumers: Default::default(),
            preferred_decoration: Cell::new(Decoration::Server),
        })
    }

    /// Swaps the advertised dmabuf feedback and re-sends it to every
    /// consumer as one atomic update each.
    pub fn set_drm_feedback(&self, feedback: Option<Rc<DrmFeedback>>) {
        self.drm_feedback.set(feedback);
        for consumer in self.drm_feedback_consumers.lock().values() {
            consumer.resend();
        }
    }
}
