use crate::{functions::*, types::*};
use proptest::prelude::*;
use tlgen_wire::{BOOL_TRUE, TlObject, VECTOR_TAG, WireError};

fn user_peer(id: i64) -> Peer {
    Peer {
        constructor: TL_PEER_USER,
        user_id: id,
        ..Peer::default()
    }
}

fn bare_message(id: i32) -> Message {
    Message {
        constructor: TL_MESSAGE,
        id,
        peer_id: Some(Box::new(user_peer(1))),
        date: 1_700_000_000,
        message: "hello".to_string(),
        ..Message::default()
    }
}

fn le(word: u32) -> [u8; 4] {
    word.to_le_bytes()
}

#[test]
fn message_without_optionals_round_trips() {
    let message = bare_message(42);

    let bytes = message.to_bytes().unwrap();

    assert_eq!(bytes[..4], le(TL_MESSAGE));
    assert_eq!(bytes[4..8], [0, 0, 0, 0]);
    assert_eq!(Message::from_bytes(&bytes).unwrap(), message);
}

#[test]
fn message_with_every_optional_round_trips() {
    let message = Message {
        out: true,
        from_id: Some(Box::new(Peer {
            constructor: TL_PEER_CHAT,
            chat_id: 77,
            ..Peer::default()
        })),
        reply_to: Some(Box::new(bare_message(41))),
        entities: vec![1, 2, 3],
        views: 1_000,
        rating: 4.5,
        silent: true,
        ..bare_message(42)
    };

    let bytes = message.to_bytes().unwrap();

    let flags = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let expected = [1, 3, 7, 8, 10, 11, 13].iter().fold(0u32, |w, bit| w | (1 << bit));
    assert_eq!(flags, expected);
    assert_eq!(Message::from_bytes(&bytes).unwrap(), message);
}

#[test]
fn boxed_bool_optional_writes_the_bool_tag() {
    let message = Message {
        silent: true,
        ..bare_message(1)
    };

    let bytes = message.to_bytes().unwrap();

    assert_eq!(bytes[bytes.len() - 4..], le(BOOL_TRUE));
}

#[test]
fn empty_constructor_uses_its_own_shape() {
    let message = Message {
        constructor: TL_MESSAGE_EMPTY,
        id: 9,
        ..Message::default()
    };

    let bytes = message.to_bytes().unwrap();

    // tag + flags + id
    assert_eq!(bytes.len(), 12);
    assert_eq!(Message::from_bytes(&bytes).unwrap(), message);
}

#[test]
fn bool_base_type_is_its_tag() {
    let value = Bool {
        constructor: TL_BOOL_TRUE,
    };

    let bytes = value.to_bytes().unwrap();

    assert_eq!(bytes, le(BOOL_TRUE));
    assert_eq!(Bool::from_bytes(&bytes).unwrap(), value);
}

#[test]
fn generic_vectors_carry_the_vector_tag() {
    let messages = MessagesMessages {
        constructor: TL_MESSAGES_MESSAGES,
        messages: vec![bare_message(1), bare_message(2)],
        users: vec![10, 20],
    };

    let bytes = messages.to_bytes().unwrap();

    assert_eq!(bytes[4..8], le(VECTOR_TAG));
    assert_eq!(bytes[8..12], 2u32.to_le_bytes());
    assert_eq!(MessagesMessages::from_bytes(&bytes).unwrap(), messages);
}

#[test]
fn constructor_reference_and_keyword_fields() {
    let full = UserFull {
        constructor: TL_USER_FULL,
        user: Some(Box::new(user_peer(5))),
        r#type: "bot".to_string(),
        key: vec![7; 32],
        nonce: vec![1; 16],
        tags: vec!["a".to_string(), "bc".to_string()],
    };

    let bytes = full.to_bytes().unwrap();

    assert_eq!(UserFull::from_bytes(&bytes).unwrap(), full);
}

#[test]
fn unknown_constructor_is_rejected() {
    let err = Peer::from_bytes(&le(0xdead_beef)).unwrap_err();

    assert_eq!(err, WireError::UnknownConstructor(0xdead_beef));

    let err = Peer::default().to_bytes().unwrap_err();
    assert_eq!(err, WireError::UnknownConstructor(0));
}

#[test]
fn missing_required_reference_is_an_error() {
    let message = Message {
        peer_id: None,
        ..bare_message(1)
    };

    assert_eq!(message.to_bytes().unwrap_err(), WireError::MissingField("peer_id"));
}

#[test]
fn requests_start_with_the_method_id() {
    let request = MessagesGetHistory {
        peer: Some(Box::new(user_peer(3))),
        offset_id: 100,
        limit: 20,
    };

    let bytes = request.to_bytes().unwrap();

    assert_eq!(bytes[..4], le(MessagesGetHistory::ID));
    assert_eq!(MessagesGetHistory::from_bytes(&bytes).unwrap(), request);
}

#[test]
fn request_flags_and_bit_only_fields() {
    let request = MessagesGetDialogs {
        exclude_pinned: true,
        limit: 5,
    };

    let bytes = request.to_bytes().unwrap();

    // id + flags + limit, no payload for the flag
    assert_eq!(bytes.len(), 12);
    assert_eq!(bytes[4..8], le(1));
    assert_eq!(MessagesGetDialogs::from_bytes(&bytes).unwrap(), request);

    let search = MessagesSearch {
        peer: Some(Box::new(user_peer(1))),
        q: "tl".to_string(),
        from_id: None,
    };
    let bytes = search.to_bytes().unwrap();
    assert_eq!(MessagesSearch::from_bytes(&bytes).unwrap(), search);
}

#[test]
fn request_with_wrong_id_is_rejected() {
    let bytes = MessagesGetDialogs::default().to_bytes().unwrap();

    let err = MessagesGetHistory::from_bytes(&bytes).unwrap_err();

    assert!(matches!(err, WireError::UnexpectedTag { .. }), "{err:?}");
}

#[test]
fn vector_wrappers_round_trip() {
    let state = VectorLong(vec![1, -1, i64::MAX]);

    let bytes = state.to_bytes().unwrap();

    assert_eq!(bytes[..4], le(VECTOR_TAG));
    assert_eq!(VectorLong::from_bytes(&bytes).unwrap(), state);

    let history = VectorMessage(vec![bare_message(1)]);
    let bytes = history.to_bytes().unwrap();
    assert_eq!(VectorMessage::from_bytes(&bytes).unwrap(), history);
}

///
/// Service traits
///

#[derive(Default)]
struct Store {
    messages: Vec<Message>,
}

impl MessagesService for Store {
    type Error = WireError;

    fn get_history(&mut self, request: MessagesGetHistory) -> Result<VectorMessage, Self::Error> {
        let limit = usize::try_from(request.limit).unwrap_or(0);

        Ok(VectorMessage(self.messages.iter().take(limit).cloned().collect()))
    }

    fn get_dialogs(&mut self, _: MessagesGetDialogs) -> Result<VectorMessage, Self::Error> {
        Ok(VectorMessage::default())
    }

    fn search(&mut self, request: MessagesSearch) -> Result<MessagesMessages, Self::Error> {
        let messages = self
            .messages
            .iter()
            .filter(|m| m.message.contains(&request.q))
            .cloned()
            .collect();

        Ok(MessagesMessages {
            constructor: TL_MESSAGES_MESSAGES,
            messages,
            users: Vec::new(),
        })
    }
}

#[test]
fn services_dispatch_decoded_requests() {
    let mut store = Store {
        messages: vec![bare_message(1), bare_message(2), bare_message(3)],
    };

    let wire = MessagesGetHistory {
        peer: Some(Box::new(user_peer(1))),
        offset_id: 0,
        limit: 2,
    }
    .to_bytes()
    .unwrap();

    let request = MessagesGetHistory::from_bytes(&wire).unwrap();
    let response = store.get_history(request).unwrap();
    let bytes = response.to_bytes().unwrap();

    assert_eq!(VectorMessage::from_bytes(&bytes).unwrap().0.len(), 2);
}

///
/// PROPERTY TESTS
///

fn arb_peer() -> impl Strategy<Value = Peer> {
    prop_oneof![
        any::<i64>().prop_map(user_peer),
        any::<i64>().prop_map(|id| Peer {
            constructor: TL_PEER_CHAT,
            chat_id: id,
            ..Peer::default()
        }),
    ]
}

fn arb_message() -> impl Strategy<Value = Message> {
    (
        any::<bool>(),
        any::<i32>(),
        prop::option::of(arb_peer()),
        arb_peer(),
        any::<i32>(),
        "[ -~]{0,300}",
        prop::collection::vec(any::<i64>(), 0..4),
        any::<i32>(),
        -1.0e12..1.0e12f64,
        any::<bool>(),
    )
        .prop_map(
            |(out, id, from_id, peer_id, date, message, entities, views, rating, silent)| Message {
                constructor: TL_MESSAGE,
                out,
                id,
                from_id: from_id.map(Box::new),
                peer_id: Some(Box::new(peer_id)),
                date,
                message,
                reply_to: None,
                entities,
                views,
                rating,
                silent,
            },
        )
}

proptest! {
    #[test]
    fn messages_round_trip(message in arb_message(), reply in prop::option::of(arb_message())) {
        let message = Message {
            reply_to: reply.map(Box::new),
            ..message
        };

        let bytes = message.to_bytes().unwrap();

        prop_assert_eq!(Message::from_bytes(&bytes).unwrap(), message);
    }

    #[test]
    fn truncated_messages_never_decode(message in arb_message(), cut in 1usize..8) {
        let bytes = message.to_bytes().unwrap();
        let cut = cut.min(bytes.len());

        prop_assert!(Message::from_bytes(&bytes[..bytes.len() - cut]).is_err());
    }
}
