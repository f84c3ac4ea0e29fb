/// Input normalizer — merges an analog source (virtual pad) and a discrete
/// source (keyboard) into one canonical per-frame command.
///
/// The only state kept here is last frame's merged button values, used to
/// derive the press edges.

/// Raw analog input: axes in [-1, 1] plus two buttons.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalogInput {
    pub move_x: f32,
    pub move_y: f32,
    pub jump: bool,
    pub action: bool,
}

/// Raw discrete input, keyboard-like.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscreteInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub action: bool,
}

/// The canonical merged command the simulation consumes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCommand {
    pub move_x: f32,
    pub move_y: f32,
    pub jump: bool,
    /// True only on the frame jump transitions false→true.
    pub jump_pressed: bool,
    pub action: bool,
    /// True only on the frame action transitions false→true.
    pub action_pressed: bool,
}

#[derive(Default)]
pub struct InputNormalizer {
    was_jump: bool,
    was_action: bool,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge rule: the analog axis wins whenever it is non-zero, buttons
    /// are OR'd. Press edges compare against the previous merged frame.
    pub fn merge(&mut self, analog: &AnalogInput, discrete: &DiscreteInput) -> FrameCommand {
        let discrete_x = (discrete.right as i8 - discrete.left as i8) as f32;
        let discrete_y = (discrete.down as i8 - discrete.up as i8) as f32;

        let move_x = if analog.move_x != 0.0 { analog.move_x } else { discrete_x };
        let move_y = if analog.move_y != 0.0 { analog.move_y } else { discrete_y };
        let jump = analog.jump || discrete.jump;
        let action = analog.action || discrete.action;

        let command = FrameCommand {
            move_x,
            move_y,
            jump,
            jump_pressed: jump && !self.was_jump,
            action,
            action_pressed: action && !self.was_action,
        };

        self.was_jump = jump;
        self.was_action = action;
        command
    }

    pub fn reset(&mut self) {
        self.was_jump = false;
        self.was_action = false;
    }
}
