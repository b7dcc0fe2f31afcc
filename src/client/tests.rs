use {
    super::*,
    crate::{
        ifs::wl_surface::WlSurface,
        state::State,
        wire::{WlSurfaceId, wl_buffer::Release},
    },
};

fn state_and_client() -> (Rc<State>, Rc<Client>) {
    let state = State::new();
    let client = state.clients.spawn(&state);
    (state, client)
}

fn surface(client: &Rc<Client>, id: u32) -> Rc<WlSurface> {
    Rc::new(WlSurface::new(WlSurfaceId::from_raw(id), client))
}

#[test]
fn duplicate_object_ids_are_rejected() {
    let (_state, client) = state_and_client();
    client.add_client_obj(&surface(&client, 3)).unwrap();
    assert!(matches!(
        client.add_client_obj(&surface(&client, 3)),
        Err(ClientError::IdAlreadyInUse)
    ));
}

#[test]
fn client_ids_must_be_in_the_client_range() {
    let (_state, client) = state_and_client();
    assert!(matches!(
        client.add_client_obj(&surface(&client, 0)),
        Err(ClientError::ClientIdOutOfBounds)
    ));
    assert!(matches!(
        client.add_client_obj(&surface(&client, MIN_SERVER_ID)),
        Err(ClientError::ClientIdOutOfBounds)
    ));
}

#[test]
fn removing_a_client_object_sends_delete_id() {
    let (_state, client) = state_and_client();
    let s = surface(&client, 3);
    client.add_client_obj(&s).unwrap();
    client.remove_obj(&*s).unwrap();
    let events = client.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].object(), WL_DISPLAY_ID.into());
    assert_eq!(events[0].opcode(), wl_display::DELETE_ID);
    assert!(matches!(
        client.remove_obj(&*s),
        Err(ClientError::UnknownId)
    ));
}

#[test]
fn server_ids_do_not_send_delete_id() {
    let (_state, client) = state_and_client();
    let id = client.objects.next_server_id().unwrap();
    assert!(id.raw() >= MIN_SERVER_ID);
    let s = Rc::new(WlSurface::new(id.into(), &client));
    client.objects.add_server_object(s.clone());
    client.objects.remove_obj(&client, s.id()).unwrap();
    assert_eq!(client.pending_events(), 0);
}

#[test]
fn protocol_errors_are_local_to_the_client() {
    let (state, client) = state_and_client();
    let other = state.clients.spawn(&state);
    let s = surface(&client, 3);
    client.add_client_obj(&s).unwrap();
    client.protocol_error(&*s, 7, "seven");
    assert!(client.is_shutdown());
    assert!(!other.is_shutdown());
    let events = client.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].object(), WL_DISPLAY_ID.into());
    assert_eq!(events[0].opcode(), wl_display::ERROR);
    // error payload: object id, code, message
    let data = &events[0].data;
    let object = u32::from_ne_bytes(data[8..12].try_into().unwrap());
    let code = u32::from_ne_bytes(data[12..16].try_into().unwrap());
    assert_eq!(object, 3);
    assert_eq!(code, 7);
    assert_eq!(other.pending_events(), 0);
}

#[test]
fn event_wire_format() {
    let (_state, client) = state_and_client();
    client.event(Release {
        self_id: crate::wire::WlBufferId::from_raw(42),
    });
    let events = client.take_events();
    assert_eq!(events.len(), 1);
    let data = &events[0].data;
    assert_eq!(data.len(), 8);
    assert_eq!(u32::from_ne_bytes(data[0..4].try_into().unwrap()), 42);
    let word = u32::from_ne_bytes(data[4..8].try_into().unwrap());
    assert_eq!(word & 0xffff, 0);
    assert_eq!(word >> 16, 8);
}

#[test]
fn string_events_are_padded_to_words() {
    let (_state, client) = state_and_client();
    let s = surface(&client, 3);
    client.add_client_obj(&s).unwrap();
    client.protocol_error(&*s, 1, "abc");
    let events = client.take_events();
    let data = &events[0].data;
    // header + object + code + string length + "abc\0"
    assert_eq!(data.len(), 8 + 4 + 4 + 4 + 4);
    assert_eq!(data.len() % 4, 0);
    let len = u32::from_ne_bytes(data[16..20].try_into().unwrap());
    assert_eq!(len, 4);
    assert_eq!(&data[20..24], b"abc\0");
}

#[test]
fn kill_tears_down_client_state() {
    let (state, client) = state_and_client();
    let s = surface(&client, 3);
    client.add_client_obj(&s).unwrap();
    client.objects.surfaces.set(s.id, s.clone());
    state.clients.kill(client.id);
    assert!(state.clients.get(client.id).is_err());
    assert!(client.objects.surfaces.get(&s.id).is_none());
}
