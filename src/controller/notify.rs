//! Collaborators the controller talks to besides the store.

use std::cell::RefCell;

use actix_web_flash_messages::FlashMessage;

/// Fire-and-forget sink for user-visible outcomes.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait Notifier {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Yes/no prompt asked before destructive operations.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl Confirmation for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

/// Collects notifications as flash messages.
///
/// A handler either renders the collected messages on the page it returns
/// ([`FlashNotifier::take`]) or hands them to the flash framework before
/// redirecting ([`FlashNotifier::flush`]). Both must run inside the request
/// task.
#[derive(Default)]
pub struct FlashNotifier {
    pending: RefCell<Vec<FlashMessage>>,
}

impl FlashNotifier {
    /// Removes and returns the messages collected so far.
    pub fn take(&self) -> Vec<FlashMessage> {
        self.pending.take()
    }

    /// Sends the collected messages to be shown on the next rendered page.
    pub fn flush(&self) {
        for message in self.take() {
            message.send();
        }
    }
}

impl Notifier for FlashNotifier {
    fn notify_success(&self, message: &str) {
        self.pending
            .borrow_mut()
            .push(FlashMessage::success(message));
    }

    fn notify_error(&self, message: &str) {
        self.pending.borrow_mut().push(FlashMessage::error(message));
    }
}
