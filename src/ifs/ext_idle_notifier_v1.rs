use {
    crate::{
        client::{Client, ClientError},
        ifs::ext_idle_notification_v1::ExtIdleNotificationV1,
        object::{Interface, Object, ObjectId, Version},
        wire::{ExtIdleNotificationV1Id, ExtIdleNotifierV1Id, ext_idle_notifier_v1::INTERFACE},
    },
    std::{cell::Cell, rc::Rc, time::Duration},
    thiserror::Error,
};

pub struct ExtIdleNotifierV1 {
    pub id: ExtIdleNotifierV1Id,
    pub client: Rc<Client>,
    pub version: Version,
}

impl ExtIdleNotifierV1 {
    pub fn new(id: ExtIdleNotifierV1Id, client: &Rc<Client>, version: Version) -> Self {
        Self {
            id,
            client: client.clone(),
            version,
        }
    }

    pub fn destroy(&self) -> Result<(), ExtIdleNotifierV1Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }

    /// Creates a notification that fires after `timeout_ms` without input.
    /// A timeout of zero fires at the next idle evaluation.
    pub fn get_idle_notification(
        &self,
        id: ExtIdleNotificationV1Id,
        timeout_ms: u32,
    ) -> Result<Rc<ExtIdleNotificationV1>, ExtIdleNotifierV1Error> {
        let duration = Duration::from_millis(timeout_ms as u64);
        let notification = Rc::new(ExtIdleNotificationV1 {
            id,
            client: self.client.clone(),
            version: self.version,
            duration,
            idled: Cell::new(false),
            deadline: Cell::new(self.client.state.now.get() + duration),
        });
        self.client.add_client_obj(&notification)?;
        self.client.state.idle.add_notification(&notification);
        Ok(notification)
    }
}

impl Object for ExtIdleNotifierV1 {
    fn id(&self) -> ObjectId {
        self.id.into()
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum ExtIdleNotifierV1Error {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(ExtIdleNotifierV1Error, ClientError);

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            state::State,
            time::Time,
            utils::buffd::OutMessage,
            wire::ext_idle_notification_v1::{IDLED, RESUMED},
        },
    };

    fn setup() -> (Rc<State>, Rc<Client>, Rc<ExtIdleNotifierV1>) {
        let state = State::new();
        state.now.set(Time::from_msec(10_000));
        let client = state.clients.spawn(&state);
        let notifier = Rc::new(ExtIdleNotifierV1::new(
            ExtIdleNotifierV1Id::from_raw(2),
            &client,
            Version(1),
        ));
        client.add_client_obj(&notifier).unwrap();
        (state, client, notifier)
    }

    fn opcodes(events: &[OutMessage]) -> Vec<u32> {
        events.iter().map(|e| e.opcode()).collect()
    }

    #[test]
    fn idle_fires_once_after_the_timeout() {
        let (state, client, notifier) = setup();
        let n = notifier
            .get_idle_notification(ExtIdleNotificationV1Id::from_raw(3), 1000)
            .unwrap();
        state.idle.check_idle(Time::from_msec(10_500));
        assert_eq!(client.pending_events(), 0);
        state.idle.check_idle(Time::from_msec(11_000));
        assert_eq!(opcodes(&client.take_events()), vec![IDLED]);
        // no repeat while the notification stays idled
        state.idle.check_idle(Time::from_msec(12_000));
        assert_eq!(client.pending_events(), 0);
        // input resumes it and re-arms the timeout
        state.idle.notify_activity(Time::from_msec(12_500));
        assert_eq!(opcodes(&client.take_events()), vec![RESUMED]);
        state.idle.check_idle(Time::from_msec(13_000));
        assert_eq!(client.pending_events(), 0);
        state.idle.check_idle(Time::from_msec(13_500));
        assert_eq!(opcodes(&client.take_events()), vec![IDLED]);
        drop(n);
    }

    #[test]
    fn activity_pushes_the_deadline_back() {
        let (state, client, notifier) = setup();
        let n = notifier
            .get_idle_notification(ExtIdleNotificationV1Id::from_raw(3), 1000)
            .unwrap();
        assert_eq!(state.idle.next_deadline(), Some(Time::from_msec(11_000)));
        state.idle.notify_activity(Time::from_msec(10_900));
        assert_eq!(state.idle.next_deadline(), Some(Time::from_msec(11_900)));
        // activity on a notification that never idled sends nothing
        assert_eq!(client.pending_events(), 0);
        state.idle.check_idle(Time::from_msec(11_000));
        assert_eq!(client.pending_events(), 0);
        state.idle.check_idle(Time::from_msec(11_900));
        assert_eq!(opcodes(&client.take_events()), vec![IDLED]);
        drop(n);
    }

    #[test]
    fn zero_timeout_fires_at_the_next_idle_boundary() {
        let (state, client, notifier) = setup();
        notifier
            .get_idle_notification(ExtIdleNotificationV1Id::from_raw(3), 0)
            .unwrap();
        state.idle.check_idle(state.now.get());
        assert_eq!(opcodes(&client.take_events()), vec![IDLED]);
    }

    #[test]
    fn destroyed_notifications_stop_firing() {
        let (state, client, notifier) = setup();
        let n = notifier
            .get_idle_notification(ExtIdleNotificationV1Id::from_raw(3), 1000)
            .unwrap();
        n.destroy().unwrap();
        client.take_events();
        state.idle.check_idle(Time::from_msec(20_000));
        assert_eq!(client.pending_events(), 0);
        assert_eq!(state.idle.next_deadline(), None);
    }
}
