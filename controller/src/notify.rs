#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Heating,
    Cooling,
}

impl Completion {
    pub fn message(self) -> &'static str {
        match self {
            Self::Heating => "Heating complete",
            Self::Cooling => "Cooling complete",
        }
    }
}

/// Remembers the actuator flags from the previous poll and reports each
/// active -> inactive transition exactly once.
#[derive(Debug, Clone, Default)]
pub struct CompletionDetector {
    was_heating: bool,
    was_cooling: bool,
}

impl CompletionDetector {
    pub fn observe(&mut self, heating: bool, cooling: bool) -> Vec<Completion> {
        let mut completed = Vec::new();

        if self.was_heating && !heating {
            completed.push(Completion::Heating);
        }
        if self.was_cooling && !cooling {
            completed.push(Completion::Cooling);
        }

        self.was_heating = heating;
        self.was_cooling = cooling;
        completed
    }
}
