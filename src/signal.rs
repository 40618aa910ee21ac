use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;

/// A one-slot mailbox carrying "play a tone" from the timers to whatever makes sound.
///
/// Sending never blocks: if the previous tone hasn't been picked up yet the new one is dropped.
pub fn audio_channel() -> (AudioSender, AudioReceiver) {
    let (tx, rx) = mpsc::sync_channel(1);
    (AudioSender(tx), AudioReceiver(rx))
}

pub struct AudioSender(SyncSender<()>);

impl AudioSender {
    /// Returns whether the tone was queued
    pub fn signal(&self) -> bool {
        match self.0.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => false,
            Err(TrySendError::Disconnected(())) => false,
        }
    }
}

pub struct AudioReceiver(Receiver<()>);

impl AudioReceiver {
    /// Takes the pending tone, if any, without waiting
    pub fn try_recv(&self) -> bool {
        self.0.try_recv().is_ok()
    }

    /// Blocks until a tone arrives; false once the sender is gone
    pub fn recv(&self) -> bool {
        self.0.recv().is_ok()
    }
}

/// Cooperative cancellation shared between the run loop and whoever wants it to stop.
/// Loops check it between cycles, so an instruction is never cut short.
#[derive(Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_audio_signal_drops_when_full() {
        let (tx, rx) = audio_channel();
        assert!(tx.signal());
        assert!(!tx.signal());
        assert!(rx.try_recv());
        assert!(!rx.try_recv());
        assert!(tx.signal());
    }

    #[test]
    fn test_audio_signal_without_listener_doesnt_block() {
        let (tx, rx) = audio_channel();
        drop(rx);
        assert!(!tx.signal());
    }

    #[test]
    fn test_audio_receiver_across_threads() {
        let (tx, rx) = audio_channel();
        let listener = thread::spawn(move || {
            let mut tones = 0;
            while rx.recv() {
                tones += 1;
            }
            tones
        });
        assert!(tx.signal());
        drop(tx);
        assert_eq!(listener.join().unwrap(), 1);
    }

    #[test]
    fn test_shutdown_is_shared() {
        let shutdown = Shutdown::new();
        let handle = shutdown.clone();
        assert!(!shutdown.is_cancelled());
        handle.cancel();
        assert!(shutdown.is_cancelled());
    }
}
