//! Background histogram computation
//!
//! The display histogram only needs the three raw channel histograms, so
//! that scan is offloaded to a background thread. The caller transfers a
//! buffer copy to the worker and receives the counts over a channel; no
//! shared state crosses the boundary. Waiting is always bounded by a
//! timeout so a dead worker cannot hang the main pipeline, and
//! [`compute_channel_histograms`] provides the same result inline for
//! harnesses running without the worker.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use super::NUM_BINS;
use crate::buffer::PixelBuffer;

/// Raw per-channel histogram counts, as produced by the worker
///
/// Luminance and CDF derivation stay in the main analysis pass; the worker
/// protocol carries only the three channel histograms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistograms {
    pub red: [u32; NUM_BINS],
    pub green: [u32; NUM_BINS],
    pub blue: [u32; NUM_BINS],
}

/// Compute the three channel histograms inline (worker-less fallback)
pub fn compute_channel_histograms(buffer: &PixelBuffer) -> ChannelHistograms {
    let mut red = [0u32; NUM_BINS];
    let mut green = [0u32; NUM_BINS];
    let mut blue = [0u32; NUM_BINS];

    for pixel in buffer.data().chunks_exact(4) {
        red[pixel[0] as usize] += 1;
        green[pixel[1] as usize] += 1;
        blue[pixel[2] as usize] += 1;
    }

    ChannelHistograms { red, green, blue }
}

struct Job {
    buffer: PixelBuffer,
    reply: Sender<ChannelHistograms>,
}

/// Handle to one submitted histogram request
pub struct PendingHistograms {
    rx: Receiver<ChannelHistograms>,
}

impl PendingHistograms {
    /// Wait for the worker's response, up to `timeout`
    pub fn wait(self, timeout: Duration) -> Result<ChannelHistograms, String> {
        self.rx.recv_timeout(timeout).map_err(|_| {
            format!(
                "histogram worker did not respond within {}ms",
                timeout.as_millis()
            )
        })
    }
}

/// Background thread that owns buffer copies for the duration of one scan
///
/// Dropping the worker shuts the thread down after any queued jobs finish.
pub struct HistogramWorker {
    tx: Option<Sender<Job>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl HistogramWorker {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Job>();

        let handle = thread::spawn(move || {
            for job in rx {
                let histograms = compute_channel_histograms(&job.buffer);
                // The requester may have given up already; that is fine
                let _ = job.reply.send(histograms);
            }
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Transfer a buffer to the worker; the response arrives on the handle
    pub fn submit(&self, buffer: PixelBuffer) -> Result<PendingHistograms, String> {
        let (reply, rx) = mpsc::channel();
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| "histogram worker has shut down".to_string())?;
        tx.send(Job { buffer, reply })
            .map_err(|_| "histogram worker is no longer running".to_string())?;
        Ok(PendingHistograms { rx })
    }
}

impl Drop for HistogramWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
