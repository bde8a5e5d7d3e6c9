//! One-way notifications to the hosting game shell
//!
//! Nothing here returns a value the game depends on.

/// Sounds the activity asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// A new nugget was placed
    NewNugget,
    /// A nugget was collected (and more are needed)
    Pickaxe,
}

pub trait Host {
    /// Show the current level number in the host's bar
    fn set_level(&mut self, level: u32);
    /// Update the collected-nugget counter ("collected/total")
    fn update_counter(&mut self, collected: u32, total: u32);
    fn play_sound(&mut self, sound: Sound);
    /// Level won: the host shows its win bonus (and pauses the game meanwhile)
    fn level_won(&mut self);
}

/// Host that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHost;

impl Host for LoggingHost {
    fn set_level(&mut self, level: u32) {
        log::info!("Level {level}");
    }

    fn update_counter(&mut self, collected: u32, total: u32) {
        log::info!("Nuggets: {collected}/{total}");
    }

    fn play_sound(&mut self, sound: Sound) {
        log::debug!("Sound: {sound:?}");
    }

    fn level_won(&mut self) {
        log::info!("Level won!");
    }
}
