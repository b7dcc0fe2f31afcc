pub mod ext_idle_notification_v1;
pub mod ext_idle_notifier_v1;
pub mod wl_compositor;
pub mod wl_surface;
pub mod xdg_toplevel;
pub mod zwp_linux_buffer_params_v1;
pub mod zwp_linux_dmabuf_feedback_v1;
pub mod zwp_linux_dmabuf_v1;
pub mod zxdg_decoration_manager_v1;
pub mod zxdg_toplevel_decoration_v1;
