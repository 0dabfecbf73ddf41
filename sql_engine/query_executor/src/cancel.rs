// Copyright 2025 - 2026 The rilldb developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

/// Creates a linked cancellation pair. The token is cheap to clone and hand
/// to every producer; cancelling the source, or just dropping it, fires all
/// of them at once.
pub fn cancellation() -> (CancelSource, CancelToken) {
    let (sender, receiver) = bounded::<()>(0);
    (CancelSource { _sender: sender }, CancelToken { receiver })
}

/// The owning half. Nothing is ever sent on the wire; disconnection is the
/// signal, so dropping the source cancels too.
pub struct CancelSource {
    _sender: Sender<()>,
}

impl CancelSource {
    pub fn cancel(self) {}
}

#[derive(Clone)]
pub struct CancelToken {
    receiver: Receiver<()>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// The receiver to select over: it completes only once the source is
    /// gone.
    pub fn as_receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_unfired() {
        let (source, token) = cancellation();

        assert!(!token.is_cancelled());
        drop(source);
    }

    #[test]
    fn cancel_fires_every_clone() {
        let (source, token) = cancellation();
        let other = token.clone();

        source.cancel();

        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[test]
    fn dropping_the_source_cancels() {
        let (source, token) = cancellation();

        drop(source);

        assert!(token.is_cancelled());
    }
}
