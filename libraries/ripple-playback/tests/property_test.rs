//! Property tests over arbitrary command sequences.

mod common;

use common::MockHandle;
use proptest::prelude::*;
use ripple_playback::{PlaybackMachine, PlaybackState, PlayerConfig, MAX_RATE, MIN_RATE};

#[derive(Debug, Clone)]
enum ControlCommand {
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    SeekRelative(i64),
    AdjustVolume(i16),
    SetRate(f32),
    ToggleMute,
}

fn control_command() -> impl Strategy<Value = ControlCommand> {
    prop_oneof![
        Just(ControlCommand::TogglePlayPause),
        Just(ControlCommand::Stop),
        Just(ControlCommand::Next),
        Just(ControlCommand::Previous),
        (-600_000i64..600_000).prop_map(ControlCommand::SeekRelative),
        (-200i16..200).prop_map(ControlCommand::AdjustVolume),
        (-10.0f32..20.0).prop_map(ControlCommand::SetRate),
        Just(ControlCommand::ToggleMute),
    ]
}

fn apply(machine: &mut PlaybackMachine, command: &ControlCommand) {
    let result = match command {
        ControlCommand::TogglePlayPause => machine.toggle_play_pause(),
        ControlCommand::Stop => machine.stop(),
        ControlCommand::Next => machine.next(),
        ControlCommand::Previous => machine.previous(),
        ControlCommand::SeekRelative(delta) => machine.seek_relative(*delta),
        ControlCommand::AdjustVolume(delta) => machine.adjust_volume(*delta),
        ControlCommand::SetRate(rate) => machine.set_rate(*rate),
        ControlCommand::ToggleMute => machine.toggle_mute(),
    };
    result.unwrap();
}

proptest! {
    /// Control commands never write the selection memory and an empty
    /// player never starts loading or playing.
    #[test]
    fn empty_player_stays_inert(commands in prop::collection::vec(control_command(), 0..40)) {
        let handle = MockHandle::default();
        let mut machine = PlaybackMachine::new(handle.engine(), &PlayerConfig::default());

        for command in &commands {
            apply(&mut machine, command);
            prop_assert!(machine.selection_memory().recall().is_none());
            prop_assert!(!matches!(
                machine.state(),
                PlaybackState::Loading | PlaybackState::Playing
            ));
        }

        prop_assert!(!handle.calls().iter().any(|c| c.starts_with("load:")));
    }

    /// Volume and rate stay within their documented bounds no matter the
    /// input sequence.
    #[test]
    fn settings_stay_clamped(commands in prop::collection::vec(control_command(), 0..40)) {
        let handle = MockHandle::default();
        let mut machine = PlaybackMachine::new(handle.engine(), &PlayerConfig::default());

        for command in &commands {
            apply(&mut machine, command);
            let snapshot = machine.snapshot(None);
            prop_assert!(snapshot.volume <= 100);
            prop_assert!((MIN_RATE..=MAX_RATE).contains(&snapshot.rate));
        }
    }
}
