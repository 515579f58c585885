//! Inbound command fan-in.
//!
//! Uses an `embassy-sync` bounded MPMC channel so that several provider
//! threads can post fixes while a single control loop drains them and
//! hands each one to [`AppService`](super::service::AppService).  The
//! channel is the only synchronisation point: the service itself is never
//! touched from more than one thread.
//!
//! ```text
//! ┌──────────────┐
//! │ GPS reader   │──┐  AppCommand  ┌──────────────┐
//! │ Net reader   │──┼────────────▶│ Control loop  │
//! │ Place picker │──┘             │ (AppService)  │
//! └──────────────┘                └──────────────┘
//! ```
//!
//! Blocking calls park the thread on the channel's waker
//! (`futures_lite::future::block_on`), so an idle loop uses no CPU.
//! Each producer holds an [`InboxSender`]; dropping it signs off, and
//! [`Inbox::serve`] returns once every sender has signed off.

use core::sync::atomic::{AtomicUsize, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use futures_lite::future::block_on;
use log::debug;

use super::commands::AppCommand;

/// Channel depth for inbound commands.
pub const INBOX_DEPTH: usize = 32;

enum Message {
    Command(AppCommand),
    SignOff,
}

/// Bounded queue of commands awaiting the control loop.
pub struct Inbox {
    channel: Channel<CriticalSectionRawMutex, Message, INBOX_DEPTH>,
    /// Senders created and not yet signed off (as seen by the receiver).
    senders: AtomicUsize,
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Inbox {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            senders: AtomicUsize::new(0),
        }
    }

    /// Register a producer.  Create every sender before calling
    /// [`serve`](Self::serve).
    pub fn sender(&self) -> InboxSender<'_> {
        self.senders.fetch_add(1, Ordering::AcqRel);
        InboxSender { inbox: self }
    }

    /// Queue a command.  Hands it back if the inbox is full.
    pub fn post(&self, cmd: AppCommand) -> Result<(), AppCommand> {
        match self.channel.try_send(Message::Command(cmd)) {
            Err(TrySendError::Full(Message::Command(cmd))) => Err(cmd),
            _ => Ok(()),
        }
    }

    /// Queue a command, parking the thread until there is room.
    pub fn post_blocking(&self, cmd: AppCommand) {
        block_on(self.channel.send(Message::Command(cmd)));
    }

    /// Take the oldest pending command, if any.
    pub fn take(&self) -> Option<AppCommand> {
        while let Ok(msg) = self.channel.try_receive() {
            match msg {
                Message::Command(cmd) => return Some(cmd),
                Message::SignOff => self.retire(),
            }
        }
        None
    }

    /// Drain all pending commands into a handler, in FIFO order.
    /// Returns how many were handled.
    pub fn drain(&self, mut handler: impl FnMut(AppCommand)) -> usize {
        let mut n = 0;
        while let Some(cmd) = self.take() {
            handler(cmd);
            n += 1;
        }
        n
    }

    /// Hand every command to `handler`, parking while the inbox is empty,
    /// until all senders have signed off.  Returns how many were handled.
    pub fn serve(&self, mut handler: impl FnMut(AppCommand)) -> usize {
        let mut n = 0;
        while self.senders.load(Ordering::Acquire) > 0 {
            match block_on(self.channel.receive()) {
                Message::Command(cmd) => {
                    handler(cmd);
                    n += 1;
                }
                Message::SignOff => self.retire(),
            }
        }
        n + self.drain(handler)
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    fn retire(&self) {
        let left = self.senders.fetch_sub(1, Ordering::AcqRel) - 1;
        debug!("inbox: sender signed off, {} left", left);
    }
}

/// A producer's handle on the [`Inbox`].  Signs off when dropped,
/// including when the producing thread panics.
pub struct InboxSender<'a> {
    inbox: &'a Inbox,
}

impl InboxSender<'_> {
    /// Queue a command, parking until there is room.
    pub fn post(&self, cmd: AppCommand) {
        self.inbox.post_blocking(cmd);
    }
}

impl Drop for InboxSender<'_> {
    fn drop(&mut self) {
        block_on(self.inbox.channel.send(Message::SignOff));
    }
}
