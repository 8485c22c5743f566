use crate::{format_mmss, CountdownTimer, Direction, Effect, IntervalEditor};

/// What a select press did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectOutcome {
    /// The countdown was armed with this many seconds.
    Started(u32),
    /// A running countdown was stopped early.
    Cancelled,
    /// Idle with a zero interval; nothing to arm.
    Ignored,
}

/// The two state holders wired together, one method per incoming event.
///
/// The binding owns a `TimerFace` and forwards button presses and ticks to it.
/// Adjustments are only honoured while idle; ticks only while running.
#[derive(Clone, Debug, Default)]
pub struct TimerFace {
    editor: IntervalEditor,
    timer: CountdownTimer,
}

impl TimerFace {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            editor: IntervalEditor::with_value(initial_secs),
            timer: CountdownTimer::new(),
        }
    }

    pub fn editor(&self) -> &IntervalEditor {
        &self.editor
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn on_up(&mut self, repeat_count: u32) -> Option<u32> {
        self.on_adjust(repeat_count, Direction::Up)
    }

    pub fn on_down(&mut self, repeat_count: u32) -> Option<u32> {
        self.on_adjust(repeat_count, Direction::Down)
    }

    /// Returns the new interval, or `None` if the edit was dropped because
    /// a countdown is in progress.
    pub fn on_adjust(&mut self, repeat_count: u32, direction: Direction) -> Option<u32> {
        if self.timer.is_running() {
            return None;
        }
        Some(self.editor.adjust(repeat_count, direction))
    }

    /// Toggle between arming and cancelling.
    pub fn on_select(&mut self) -> SelectOutcome {
        if self.timer.is_running() {
            self.timer.cancel();
            return SelectOutcome::Cancelled;
        }
        let seed = self.editor.value();
        if seed == 0 {
            return SelectOutcome::Ignored;
        }
        self.timer.start(seed);
        SelectOutcome::Started(seed)
    }

    pub fn on_tick(&mut self) -> Option<Effect> {
        self.timer.tick()
    }

    /// Seconds to show: the countdown while running, the edited interval otherwise.
    pub fn display_seconds(&self) -> u32 {
        if self.timer.is_running() {
            self.timer.remaining()
        } else {
            self.editor.value()
        }
    }

    pub fn display_text(&self) -> String {
        format_mmss(self.display_seconds())
    }
}
