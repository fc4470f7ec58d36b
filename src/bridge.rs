//! Collaborator interfaces
//!
//! The engine asks a [`Confirmer`] before destructive operations and tells a
//! [`ChangeBroadcaster`] about every committed change. Window addressing and
//! dialog rendering live on the other side of these traits.

use std::fmt::Debug;
use std::sync::mpsc::Sender;

use crate::settings::Settings;

/// Asks the user to confirm an operation
pub trait Confirmer: Debug {
    /// `false` aborts the operation with no side effects
    fn confirm(&self, message: &str) -> bool;
}

impl<C: Confirmer + ?Sized> Confirmer for Box<C> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Confirms everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!("Declined: {}", message);
        false
    }
}

/// Pushes the updated document to observers (fire-and-forget)
pub trait ChangeBroadcaster: Debug {
    fn notify(&self, settings: &Settings);
}

/// Drops notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBroadcaster;

impl ChangeBroadcaster for NullBroadcaster {
    fn notify(&self, _settings: &Settings) {}
}

/// Logs each notification
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBroadcaster;

impl ChangeBroadcaster for LogBroadcaster {
    fn notify(&self, settings: &Settings) {
        tracing::info!(
            language = %settings.language,
            languages = settings.presets_by_language.len(),
            "Settings updated"
        );
    }
}

/// Sends a copy of each committed document down a channel
#[derive(Debug, Clone)]
pub struct ChannelBroadcaster {
    sender: Sender<Settings>,
}

impl ChannelBroadcaster {
    pub fn new(sender: Sender<Settings>) -> Self {
        Self { sender }
    }
}

impl ChangeBroadcaster for ChannelBroadcaster {
    fn notify(&self, settings: &Settings) {
        if self.sender.send(settings.clone()).is_err() {
            tracing::debug!("No settings observers left");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_confirmers() {
        assert!(AlwaysConfirm.confirm("Delete?"));
        assert!(!NeverConfirm.confirm("Delete?"));
    }

    #[test]
    fn test_channel_broadcaster_delivers() {
        let (tx, rx) = mpsc::channel();
        let broadcaster = ChannelBroadcaster::new(tx);
        let settings = Settings::default();

        broadcaster.notify(&settings);
        assert_eq!(rx.try_recv().unwrap(), settings);
    }

    #[test]
    fn test_channel_broadcaster_ignores_closed_channel() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        ChannelBroadcaster::new(tx).notify(&Settings::default());
    }
}
