//! Delivery onto a single owning thread
//!
//! A [`DispatchQueue`] belongs to the thread whose state callbacks touch (a UI
//! loop, typically). Background work holds a cloned [`Context`] and posts
//! closures to it; they run only when the owner pumps the queue.

use tokio::sync::mpsc;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug)]
pub struct DispatchQueue {
    sender: mpsc::UnboundedSender<Job>,
    receiver: mpsc::UnboundedReceiver<Job>,
}

/// Handle for posting work onto a [`DispatchQueue`]
#[derive(Debug, Clone)]
pub struct Context {
    sender: mpsc::UnboundedSender<Job>,
}

impl Default for DispatchQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        DispatchQueue { sender, receiver }
    }

    pub fn context(&self) -> Context {
        Context {
            sender: self.sender.clone(),
        }
    }

    /// Run every job posted so far without waiting; returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;

        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }

        ran
    }

    /// Wait for the next job and run it.
    pub async fn run_next(&mut self) {
        // the queue keeps a sender of its own, so the channel never closes
        if let Some(job) = self.receiver.recv().await {
            job();
        }
    }
}

impl Context {
    /// Queue `job` for the owning thread. Returns false when the queue is gone.
    pub fn post(&self, job: impl FnOnce() + Send + 'static) -> bool {
        self.sender.send(Box::new(job)).is_ok()
    }
}
