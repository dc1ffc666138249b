//! Requests from background contexts (hotkey listener, tray loop) to the UI
//! context. Only the UI context touches application state; everyone else
//! queues a [`UiRequest`] and wakes it.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::tray::TrayAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest {
    ShowPopup,
    Tray(TrayAction),
}

type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct RequestSender {
    tx: Sender<UiRequest>,
    waker: Option<Waker>,
}

impl RequestSender {
    /// Run `waker` after every send, e.g. to request a UI repaint.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    /// Queue a request. Dropped silently once the UI side is gone.
    pub fn send(&self, request: UiRequest) {
        if self.tx.send(request).is_err() {
            tracing::debug!(?request, "ui gone; dropping request");
            return;
        }
        if let Some(wake) = &self.waker {
            wake();
        }
    }
}

pub struct RequestQueue {
    rx: Receiver<UiRequest>,
}

impl RequestQueue {
    /// All pending requests, oldest first.
    pub fn drain(&self) -> Vec<UiRequest> {
        self.rx.try_iter().collect()
    }
}

pub fn request_queue() -> (RequestSender, RequestQueue) {
    let (tx, rx) = mpsc::channel();
    (RequestSender { tx, waker: None }, RequestQueue { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn requests_cross_threads_in_order() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let (sender, queue) = request_queue();
        let sender = sender.with_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let remote = sender.clone();
        std::thread::spawn(move || {
            remote.send(UiRequest::ShowPopup);
            remote.send(UiRequest::Tray(TrayAction::Exit));
        })
        .join()
        .unwrap();

        assert_eq!(
            queue.drain(),
            vec![UiRequest::ShowPopup, UiRequest::Tray(TrayAction::Exit)]
        );
        assert!(queue.drain().is_empty());
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn send_after_queue_dropped_is_ignored() {
        let (sender, queue) = request_queue();
        drop(queue);
        sender.send(UiRequest::ShowPopup);
    }
}
