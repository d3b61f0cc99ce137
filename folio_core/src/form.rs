//! # Contact Form Controller
//!
//! Field validation on blur, whole-form validation on submit, and the
//! simulated submission: the form goes busy, and after a fixed delay the
//! submission is logged, a success banner is shown (and later dismissed),
//! and the form is reset. No request is sent anywhere.
//!
//! Both delays are [`Effect::Schedule`] requests. Each carries a generation,
//! so a timer that was superseded or cancelled is ignored when it fires. A
//! submit while one is already pending is dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::effects::{Effect, TimerId, TimerKind};
use crate::settings::SiteSettings;
use crate::validation::{validate, ContactFormData, Field};
use crate::views;

/// Receipt of a completed (simulated) submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub data: ContactFormData,
}

impl Submission {
    fn new(data: ContactFormData) -> Self {
        Submission {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Submitting { generation: u64, data: ContactFormData },
}

#[derive(Debug, Clone)]
pub struct FormController {
    submit_delay_ms: u32,
    banner_ms: u32,
    phase: Phase,
    submit_generation: u64,
    banner_generation: u64,
    banner_visible: bool,
    last_submission: Option<Submission>,
}

impl FormController {
    pub fn new(settings: &SiteSettings) -> Self {
        FormController {
            submit_delay_ms: settings.submit_delay_ms,
            banner_ms: settings.success_banner_ms,
            phase: Phase::Idle,
            submit_generation: 0,
            banner_generation: 0,
            banner_visible: false,
            last_submission: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// Check one field after it loses focus.
    pub fn validate_field(&self, field: Field, value: &str) -> Vec<Effect> {
        match field.check(value) {
            Ok(()) => vec![Effect::ClearFieldError(field)],
            Err(err) => vec![Effect::ShowFieldError {
                field,
                content: views::field_error(&err.message),
            }],
        }
    }

    /// Validate and, if clean, start the simulated submission.
    pub fn submit(&mut self, data: ContactFormData) -> Vec<Effect> {
        if self.is_submitting() {
            debug!("submission already pending, ignoring submit");
            return Vec::new();
        }

        let errors = validate(&data);
        if !errors.is_empty() {
            debug!(count = errors.len(), "contact form rejected");
            return vec![Effect::ShowFormErrors(views::form_errors(&errors))];
        }

        self.submit_generation += 1;
        self.phase = Phase::Submitting {
            generation: self.submit_generation,
            data,
        };

        vec![
            Effect::ClearFormErrors,
            Effect::SetSubmitBusy(true),
            Effect::Schedule {
                timer: TimerId::new(TimerKind::SubmitDelay, self.submit_generation),
                delay_ms: self.submit_delay_ms,
            },
        ]
    }

    /// The error block's close control was pressed.
    pub fn dismiss_errors(&self) -> Vec<Effect> {
        vec![Effect::ClearFormErrors]
    }

    /// One of this controller's timers fired.
    pub fn timer_elapsed(&mut self, timer: TimerId) -> Vec<Effect> {
        match timer.kind {
            TimerKind::SubmitDelay => self.complete_submission(timer.generation),
            TimerKind::SuccessDismiss => self.dismiss_banner(timer.generation),
            TimerKind::ResizeSettle => Vec::new(),
        }
    }

    fn complete_submission(&mut self, generation: u64) -> Vec<Effect> {
        let data = match &self.phase {
            Phase::Submitting { generation: pending, data } if *pending == generation => data.clone(),
            _ => {
                debug!(generation, "stale submit timer");
                return Vec::new();
            }
        };
        self.phase = Phase::Idle;

        let submission = Submission::new(data);
        info!(
            id = %submission.id,
            name = %submission.data.name,
            email = %submission.data.email,
            "contact form submitted"
        );
        self.last_submission = Some(submission);

        let mut effects = Vec::new();
        if self.banner_visible {
            effects.push(Effect::CancelTimer(TimerId::new(
                TimerKind::SuccessDismiss,
                self.banner_generation,
            )));
            effects.push(Effect::HideSuccess);
        }
        self.banner_generation += 1;
        self.banner_visible = true;

        effects.push(Effect::ShowSuccess(views::success_banner()));
        effects.push(Effect::Schedule {
            timer: TimerId::new(TimerKind::SuccessDismiss, self.banner_generation),
            delay_ms: self.banner_ms,
        });
        effects.push(Effect::ResetForm);
        effects.push(Effect::SetSubmitBusy(false));
        effects.extend(Field::ALL.into_iter().map(Effect::ClearFieldError));
        effects.push(Effect::ClearFormErrors);
        effects
    }

    fn dismiss_banner(&mut self, generation: u64) -> Vec<Effect> {
        if self.banner_visible && generation == self.banner_generation {
            self.banner_visible = false;
            vec![Effect::HideSuccess]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{EMAIL_INVALID, MESSAGE_TOO_SHORT, NAME_INVALID_CHARS};

    fn controller() -> FormController {
        FormController::new(&SiteSettings::default())
    }

    fn valid() -> ContactFormData {
        ContactFormData::new("Ana Pérez", "ana@x.com", "Hola, quiero contactarte")
    }

    fn scheduled(effects: &[Effect], kind: TimerKind) -> Option<(TimerId, u32)> {
        effects.iter().find_map(|e| match e {
            Effect::Schedule { timer, delay_ms } if timer.kind == kind => Some((*timer, *delay_ms)),
            _ => None,
        })
    }

    #[test]
    fn test_valid_submission_flow() {
        let mut form = controller();
        let effects = form.submit(valid());

        assert!(effects.contains(&Effect::SetSubmitBusy(true)));
        assert!(!effects.iter().any(|e| matches!(e, Effect::ShowFormErrors(_))));
        let (timer, delay) = scheduled(&effects, TimerKind::SubmitDelay).unwrap();
        assert_eq!(delay, 1500);
        assert!(form.is_submitting());

        let done = form.timer_elapsed(timer);
        assert!(done.iter().any(|e| matches!(e, Effect::ShowSuccess(_))));
        assert!(done.contains(&Effect::ResetForm));
        assert!(done.contains(&Effect::SetSubmitBusy(false)));
        for field in Field::ALL {
            assert!(done.contains(&Effect::ClearFieldError(field)));
        }
        let (banner_timer, banner_delay) = scheduled(&done, TimerKind::SuccessDismiss).unwrap();
        assert_eq!(banner_delay, 5000);
        assert!(!form.is_submitting());
        assert_eq!(form.last_submission().unwrap().data, valid());

        assert_eq!(form.timer_elapsed(banner_timer), vec![Effect::HideSuccess]);
        assert!(!form.banner_visible());
    }

    #[test]
    fn test_invalid_submission_shows_three_errors() {
        let mut form = controller();
        let effects = form.submit(ContactFormData::new("A1", "bad", "short"));

        assert_eq!(effects.len(), 1);
        let Effect::ShowFormErrors(block) = &effects[0] else {
            panic!("expected error block, got {effects:?}");
        };
        let items: Vec<String> = block
            .as_element()
            .unwrap()
            .children
            .iter()
            .filter_map(|n| n.as_element())
            .filter(|e| e.tag == "ul")
            .flat_map(|ul| ul.children.iter().map(|li| li.text_content()))
            .collect();
        assert_eq!(items, vec![NAME_INVALID_CHARS, EMAIL_INVALID, MESSAGE_TOO_SHORT]);

        assert!(!form.is_submitting());
        assert!(form.last_submission().is_none());
        assert!(!effects.contains(&Effect::ResetForm));
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut form = controller();
        let first = form.submit(valid());
        assert!(form.submit(valid()).is_empty());

        let (timer, _) = scheduled(&first, TimerKind::SubmitDelay).unwrap();
        assert!(!form.timer_elapsed(timer).is_empty());
        // A duplicate firing of the same timer does nothing
        assert!(form.timer_elapsed(timer).is_empty());
    }

    #[test]
    fn test_stale_submit_timer_ignored() {
        let mut form = controller();
        let first = form.submit(valid());
        let (first_timer, _) = scheduled(&first, TimerKind::SubmitDelay).unwrap();
        form.timer_elapsed(first_timer);

        let second = form.submit(valid());
        let (second_timer, _) = scheduled(&second, TimerKind::SubmitDelay).unwrap();
        assert_ne!(first_timer, second_timer);
        assert!(form.timer_elapsed(first_timer).is_empty());
        assert!(form.is_submitting());
    }

    #[test]
    fn test_second_banner_cancels_first_dismiss() {
        let mut form = controller();
        let (t1, _) = scheduled(&form.submit(valid()), TimerKind::SubmitDelay).unwrap();
        let done1 = form.timer_elapsed(t1);
        let (banner1, _) = scheduled(&done1, TimerKind::SuccessDismiss).unwrap();

        let (t2, _) = scheduled(&form.submit(valid()), TimerKind::SubmitDelay).unwrap();
        let done2 = form.timer_elapsed(t2);
        assert!(done2.contains(&Effect::CancelTimer(banner1)));
        let (banner2, _) = scheduled(&done2, TimerKind::SuccessDismiss).unwrap();

        // The first banner's timer no longer hides the second banner
        assert!(form.timer_elapsed(banner1).is_empty());
        assert!(form.banner_visible());
        assert_eq!(form.timer_elapsed(banner2), vec![Effect::HideSuccess]);
    }

    #[test]
    fn test_field_blur() {
        let form = controller();
        let bad = form.validate_field(Field::Email, "nope");
        match &bad[..] {
            [Effect::ShowFieldError { field, content }] => {
                assert_eq!(*field, Field::Email);
                assert_eq!(content.text_content(), EMAIL_INVALID);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert_eq!(
            form.validate_field(Field::Email, "ana@x.com"),
            vec![Effect::ClearFieldError(Field::Email)]
        );
    }

    #[test]
    fn test_dismiss_errors() {
        assert_eq!(controller().dismiss_errors(), vec![Effect::ClearFormErrors]);
    }
}
