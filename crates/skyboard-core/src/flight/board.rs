// Copyright 2025 Chris Custine
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

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;

use super::Flight;

/// Flight board shared between the simulation task (sole writer) and the UI.
pub type SharedBoard = Arc<RwLock<FlightBoard>>;

/// Wrap a board for sharing.
#[must_use]
pub fn shared_board(board: FlightBoard) -> SharedBoard {
    Arc::new(RwLock::new(board))
}

/// In-memory flight collection plus a count of applied simulation batches.
#[derive(Debug, Clone, Default)]
pub struct FlightBoard {
    flights: Vec<Flight>,
    batches: u64,
}

impl FlightBoard {
    /// Create a board from an initial collection.
    #[must_use]
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights, batches: 0 }
    }

    /// All flights in display order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub(crate) fn flights_mut(&mut self) -> &mut [Flight] {
        &mut self.flights
    }

    /// Look up a flight by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Number of simulation batches applied so far.
    #[must_use]
    pub fn batches(&self) -> u64 {
        self.batches
    }

    pub(crate) fn record_batch(&mut self) {
        self.batches += 1;
    }

    /// Replace the whole collection, e.g. when remote data arrives.
    pub fn replace(&mut self, flights: Vec<Flight>) {
        info!("Replacing flight board ({} -> {} flights)", self.flights.len(), flights.len());
        self.flights = flights;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Read access that survives a panicked writer.
    pub fn read(board: &SharedBoard) -> RwLockReadGuard<'_, FlightBoard> {
        board.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access that survives a panicked writer.
    pub fn write(board: &SharedBoard) -> RwLockWriteGuard<'_, FlightBoard> {
        board.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::seed_flights;

    #[test]
    fn lookup_and_replace() {
        let board = shared_board(FlightBoard::new(seed_flights()));
        assert_eq!(FlightBoard::read(&board).len(), 5);
        assert_eq!(
            FlightBoard::read(&board).get("4").map(|f| f.flight_number.as_str()),
            Some("EK 202")
        );

        FlightBoard::write(&board).replace(Vec::new());
        assert!(FlightBoard::read(&board).is_empty());
        assert!(FlightBoard::read(&board).get("4").is_none());
    }
}
