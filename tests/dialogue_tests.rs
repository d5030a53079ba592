use podabot::dialogue::{validate_description, ConversationState, MAX_DESCRIPTION_LEN};

#[test]
fn test_default_state_is_idle() {
    let state = ConversationState::default();
    assert!(state.is_idle());
    assert_eq!(state, ConversationState::Idle);
}

#[test]
fn test_description_validation() {
    assert_eq!(validate_description("Brown cow").unwrap(), "Brown cow");
    assert_eq!(validate_description("  padded  ").unwrap(), "padded");

    assert!(validate_description("").is_err());
    assert!(validate_description("   ").is_err());
    assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN)).is_ok());
}

/// The photo accumulator is append-only and keeps submission order across
/// state updates, which is what makes album uploads land in order.
#[test]
fn test_photo_accumulation_preserves_order() {
    let mut state = ConversationState::AddAwaitingPhotos {
        cattle_id: 42,
        photos: Vec::new(),
    };

    for file_id in ["first", "second", "third"] {
        state = match state {
            ConversationState::AddAwaitingPhotos { cattle_id, mut photos } => {
                photos.push(file_id.to_string());
                ConversationState::AddAwaitingPhotos { cattle_id, photos }
            }
            other => other,
        };
    }

    match state {
        ConversationState::AddAwaitingPhotos { cattle_id, photos } => {
            assert_eq!(cattle_id, 42);
            assert_eq!(photos, vec!["first", "second", "third"]);
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[test]
fn test_draft_carries_over_to_description_step() {
    let photos = vec!["a".to_string(), "b".to_string()];
    let state = ConversationState::AddAwaitingDescription {
        cattle_id: 7,
        photos: photos.clone(),
    };

    match state {
        ConversationState::AddAwaitingDescription { cattle_id, photos: carried } => {
            assert_eq!(cattle_id, 7);
            assert_eq!(carried, photos);
        }
        other => panic!("unexpected state: {other:?}"),
    }
}
