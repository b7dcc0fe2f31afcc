use {
    crate::{
        client::ClientId,
        ifs::ext_idle_notification_v1::ExtIdleNotificationV1,
        time::Time,
        utils::copyhashmap::CopyHashMap,
        wire::ExtIdleNotificationV1Id,
    },
    std::{cell::Cell, rc::Rc},
};

/// Book-keeping for ext-idle-notify. Deadlines are evaluated by the event
/// loop: it programs its timer from [`next_deadline`](Self::next_deadline)
/// and calls [`check_idle`](Self::check_idle) when the timer fires.
pub struct IdleState {
    notifications: CopyHashMap<(ClientId, ExtIdleNotificationV1Id), Rc<ExtIdleNotificationV1>>,
    last_activity: Cell<Time>,
}

impl IdleState {
    pub fn new() -> Self {
        Self {
            notifications: Default::default(),
            last_activity: Cell::new(Time::ZERO),
        }
    }

    pub fn add_notification(&self, notification: &Rc<ExtIdleNotificationV1>) {
        self.notifications.set(
            (notification.client.id, notification.id),
            notification.clone(),
        );
    }

    pub fn remove_notification(&self, notification: &ExtIdleNotificationV1) {
        self.notifications
            .remove(&(notification.client.id, notification.id));
    }

    pub fn last_activity(&self) -> Time {
        self.last_activity.get()
    }

    /// Called for every input event. Resumes idled notifications and
    /// re-arms all deadlines.
    pub fn notify_activity(&self, now: Time) {
        self.last_activity.set(now);
        for notification in self.notifications.lock().values() {
            if notification.idled.replace(false) {
                notification.send_resumed();
            }
            notification.deadline.set(now + notification.duration);
        }
    }

    /// Fires `idled` for all notifications whose deadline has passed.
    pub fn check_idle(&self, now: Time) {
        for notification in self.notifications.lock().values() {
            if !notification.idled.get() && notification.deadline.get() <= now {
                notification.idled.set(true);
                notification.send_idled();
            }
        }
    }

    /// The next point in time at which [`check_idle`](Self::check_idle)
    /// can have an effect.
    pub fn next_deadline(&self) -> Option<Time> {
        self.notifications
            .lock()
            .values()
            .filter(|n| !n.idled.get())
            .map(|n| n.deadline.get())
            .min()
    }
}

impl Default for IdleState {
    fn default() -> Self {
        Self::new()
    }
}
