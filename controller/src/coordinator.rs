use std::io;

use thermosim_common::{ThermostatConfig, ThermostatEngine, ValidationError};
use tracing::{debug, info};

use crate::{
    display::{DisplayFrame, DisplaySink, MessageBoard, MessageKind},
    input::{parse_setpoint, InputError},
    notify::CompletionDetector,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(f64),
    Rejected(ValidationError),
    Unparseable(InputError),
}

/// Sole owner of the engine. Serializes timer ticks and user submissions and
/// projects the result onto a display sink.
pub struct Coordinator<D> {
    engine: ThermostatEngine,
    completions: CompletionDetector,
    messages: MessageBoard,
    display: D,
    max_input_len: usize,
}

impl<D: DisplaySink> Coordinator<D> {
    pub fn new(config: &ThermostatConfig, display: D) -> Self {
        Self {
            engine: ThermostatEngine::new(),
            completions: CompletionDetector::default(),
            messages: MessageBoard::new(config.message_timeout_ms),
            display,
            max_input_len: config.max_input_len,
        }
    }

    pub fn engine(&self) -> &ThermostatEngine {
        &self.engine
    }

    pub fn on_tick(&mut self, now_ms: u64) -> io::Result<()> {
        self.engine.tick();
        debug!(snapshot = ?self.engine.snapshot(), "tick");
        self.refresh(now_ms)
    }

    pub fn submit(&mut self, raw: &str, now_ms: u64) -> io::Result<SubmitOutcome> {
        let outcome = match parse_setpoint(raw, self.max_input_len) {
            Err(err) => {
                self.messages.post(err.to_string(), MessageKind::Error, now_ms);
                SubmitOutcome::Unparseable(err)
            }
            Ok(proposed) => match self.engine.set_target(proposed) {
                Ok(()) => {
                    self.messages.post(
                        format!("Target set to {proposed:.1}°C"),
                        MessageKind::Info,
                        now_ms,
                    );
                    SubmitOutcome::Accepted(proposed)
                }
                Err(err) => {
                    self.messages.post(err.to_string(), MessageKind::Error, now_ms);
                    SubmitOutcome::Rejected(err)
                }
            },
        };

        self.refresh(now_ms)?;
        Ok(outcome)
    }

    pub fn refresh(&mut self, now_ms: u64) -> io::Result<()> {
        self.messages.expire(now_ms);

        let completed = self
            .completions
            .observe(self.engine.is_heating(), self.engine.is_cooling());
        for completion in completed {
            info!("{}", completion.message());
            self.messages.post(completion.message(), MessageKind::Info, now_ms);
        }

        let frame = DisplayFrame::from_engine(&self.engine);
        self.display.render(&frame, self.messages.visible())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::display::Message;

    #[derive(Default)]
    struct RecordingDisplay {
        frames: Vec<(DisplayFrame, Option<Message>)>,
    }

    impl RecordingDisplay {
        fn last_message(&self) -> Option<&str> {
            self.frames
                .last()
                .and_then(|(_, message)| message.as_ref())
                .map(|message| message.text.as_str())
        }

        fn last_frame(&self) -> &DisplayFrame {
            &self.frames.last().unwrap().0
        }
    }

    impl DisplaySink for RecordingDisplay {
        fn render(&mut self, frame: &DisplayFrame, message: Option<&Message>) -> io::Result<()> {
            self.frames.push((frame.clone(), message.cloned()));
            Ok(())
        }
    }

    fn coordinator() -> Coordinator<RecordingDisplay> {
        Coordinator::new(&ThermostatConfig::default(), RecordingDisplay::default())
    }

    #[test]
    fn accepted_input_shows_confirmation() {
        let mut coordinator = coordinator();

        let outcome = coordinator.submit("21,5", 0).unwrap();

        assert_eq!(outcome, SubmitOutcome::Accepted(21.5));
        assert_eq!(coordinator.engine().target_temp_c(), 21.5);
        assert_eq!(
            coordinator.display.last_message(),
            Some("Target set to 21.5°C")
        );
        assert_eq!(coordinator.display.last_frame().target, "21.5");
    }

    #[test]
    fn parse_failure_is_distinct_from_validation_failure() {
        let mut coordinator = coordinator();

        let outcome = coordinator.submit("abc", 0).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Unparseable(_)));
        assert_eq!(
            coordinator.display.last_message(),
            Some("Please enter a valid number")
        );

        let outcome = coordinator.submit("123", 10).unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            coordinator.display.last_message(),
            Some("Temperature range: 10.0°C – 35.0°C. Provided: 123.0°C")
        );

        let outcome = coordinator.submit("20.15", 20).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::InvalidGranularity)
        );
        assert_eq!(coordinator.engine().target_temp_c(), 20.0);
    }

    #[test]
    fn heating_completion_shows_until_timeout() {
        let mut coordinator = coordinator();
        coordinator.submit("20.3", 0).unwrap();

        for now_ms in [1_000, 2_000, 3_000] {
            coordinator.on_tick(now_ms).unwrap();
            assert_eq!(coordinator.display.last_frame().status, "Heating");
        }

        coordinator.on_tick(4_000).unwrap();
        assert_eq!(coordinator.display.last_frame().status, "Idle");
        assert_eq!(coordinator.display.last_frame().current, "20.3");
        assert_eq!(
            coordinator.display.last_message(),
            Some("Heating complete")
        );

        coordinator.on_tick(6_999).unwrap();
        assert_eq!(
            coordinator.display.last_message(),
            Some("Heating complete")
        );

        for now_ms in [7_000, 8_000, 9_000] {
            coordinator.on_tick(now_ms).unwrap();
            assert_eq!(coordinator.display.last_message(), None);
        }
    }

    #[test]
    fn cooling_completion_message() {
        let mut coordinator = coordinator();
        coordinator.submit("19.9", 0).unwrap();

        coordinator.on_tick(1_000).unwrap();
        assert_eq!(coordinator.display.last_frame().status, "Cooling");

        coordinator.on_tick(2_000).unwrap();
        assert_eq!(coordinator.display.last_frame().status, "Idle");
        assert_eq!(
            coordinator.display.last_message(),
            Some("Cooling complete")
        );
    }

    #[test]
    fn messages_clear_after_timeout() {
        let mut coordinator = coordinator();
        coordinator.submit("oops", 0).unwrap();

        coordinator.refresh(2_999).unwrap();
        assert!(coordinator.display.last_message().is_some());

        coordinator.refresh(3_000).unwrap();
        assert_eq!(coordinator.display.last_message(), None);
    }
}
