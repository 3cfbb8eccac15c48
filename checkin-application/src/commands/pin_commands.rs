use rand::Rng;
use tracing::info;

use crate::{AppError, AppState};
use checkin_domain::{
    is_valid_registry_pin, EventId, EventPinView, SetPinRequest, MAX_PIN_LEN, MIN_PIN_LEN,
};

const REGENERATE_MAX_TRIES: usize = 8;

pub async fn set_event_pin(
    state: &AppState,
    event_id: EventId,
    payload: SetPinRequest,
) -> Result<EventPinView, AppError> {
    let event_id = normalize_event_id(event_id)?;
    let pin = payload.pin.trim().to_string();
    if !is_valid_registry_pin(&pin) {
        return Err(AppError::BadRequest(format!(
            "pin must be {}-{} digits",
            MIN_PIN_LEN, MAX_PIN_LEN
        )));
    }
    state.pin_registry.set_pin(&event_id, &pin).await?;
    info!(event_id = %event_id, "event pin updated");
    Ok(EventPinView { event_id, pin })
}

/// Issues a fresh random PIN for the event, different from the current one.
pub async fn regenerate_event_pin(
    state: &AppState,
    event_id: EventId,
) -> Result<EventPinView, AppError> {
    let event_id = normalize_event_id(event_id)?;
    let current = state.pin_registry.lookup_pin(&event_id).await?;
    let length = state
        .config
        .generated_pin_length
        .clamp(MIN_PIN_LEN, MAX_PIN_LEN);

    let mut pin = generate_pin(length);
    for _ in 0..REGENERATE_MAX_TRIES {
        if current.as_deref() != Some(pin.as_str()) {
            break;
        }
        pin = generate_pin(length);
    }

    state.pin_registry.set_pin(&event_id, &pin).await?;
    info!(event_id = %event_id, "event pin regenerated");
    Ok(EventPinView { event_id, pin })
}

pub async fn remove_event_pin(state: &AppState, event_id: EventId) -> Result<(), AppError> {
    let event_id = normalize_event_id(event_id)?;
    if !state.pin_registry.remove_pin(&event_id).await? {
        return Err(AppError::NotFound(format!("no pin for event '{}'", event_id)));
    }
    info!(event_id = %event_id, "event pin removed");
    Ok(())
}

fn generate_pin(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

pub(crate) fn normalize_event_id(event_id: EventId) -> Result<EventId, AppError> {
    let trimmed = event_id.0.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("event_id must not be empty".to_string()));
    }
    Ok(EventId::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::checkin_commands::perform_checkin;
    use crate::testing::harness;
    use checkin_domain::UserId;

    #[test]
    fn generated_pins_are_digits_of_requested_length() {
        for length in MIN_PIN_LEN..=MAX_PIN_LEN {
            let pin = generate_pin(length);
            assert!(is_valid_registry_pin(&pin), "{pin}");
            assert_eq!(pin.len(), length);
        }
    }

    #[tokio::test]
    async fn set_pin_rejects_non_numeric_values() {
        let h = harness(&[]).await;
        let err = set_event_pin(
            &h.state,
            EventId::new("1"),
            SetPinRequest {
                pin: "12ab".to_string(),
            },
        )
        .await
        .expect_err("reject");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn regenerated_pin_replaces_the_old_one() {
        let h = harness(&[("1", "1234")]).await;

        let view = regenerate_event_pin(&h.state, EventId::new(" 1 "))
            .await
            .expect("regenerate");

        assert_eq!(view.event_id, EventId::new("1"));
        assert_ne!(view.pin, "1234");
        assert_eq!(view.pin.len(), 4);

        let old = perform_checkin(&h.state, Some(UserId::new("U")), &view.event_id, "1234").await;
        assert!(!old.success);
        let new = perform_checkin(&h.state, Some(UserId::new("U")), &view.event_id, &view.pin).await;
        assert!(new.success);
    }

    #[tokio::test]
    async fn removing_unknown_pin_is_not_found() {
        let h = harness(&[]).await;
        let err = remove_event_pin(&h.state, EventId::new("7"))
            .await
            .expect_err("missing");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_event_id_is_rejected() {
        let h = harness(&[]).await;
        let err = regenerate_event_pin(&h.state, EventId::new("  "))
            .await
            .expect_err("blank");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
