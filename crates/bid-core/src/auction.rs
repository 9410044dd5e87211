use crate::seat::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionEntry {
    pub seat: Seat,
    pub label: String,
    /// True for a pass filled in for a seat the bidding path skipped.
    pub inferred: bool,
}

/// A bidding path laid out as a table, one column per seat starting with
/// the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub dealer: Seat,
    pub entries: Vec<AuctionEntry>,
}

impl Auction {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            entries: Vec::new(),
        }
    }

    /// Builds the table for a path of `(seat, label)` pairs, inferring a pass
    /// for every seat skipped between consecutive calls.
    pub fn from_path<I, S>(dealer: Seat, path: I) -> Self
    where
        I: IntoIterator<Item = (Seat, S)>,
        S: Into<String>,
    {
        let mut auction = Auction::new(dealer);
        for (seat, label) in path {
            auction.add_call(seat, label);
        }
        auction
    }

    pub fn current_seat(&self) -> Seat {
        let mut seat = self.dealer;
        for _ in 0..self.entries.len() % 4 {
            seat = seat.next();
        }
        seat
    }

    pub fn add_call(&mut self, seat: Seat, label: impl Into<String>) {
        while self.current_seat() != seat {
            let skipped = self.current_seat();
            self.entries.push(AuctionEntry {
                seat: skipped,
                label: "Pass".to_string(),
                inferred: true,
            });
        }
        self.entries.push(AuctionEntry {
            seat,
            label: label.into(),
            inferred: false,
        });
    }

    /// Column order of [`Auction::rows`].
    pub fn seats(&self) -> [Seat; 4] {
        let mut seats = [self.dealer; 4];
        for i in 1..4 {
            seats[i] = seats[i - 1].next();
        }
        seats
    }

    pub fn rows(&self) -> Vec<[Option<&AuctionEntry>; 4]> {
        self.entries
            .chunks(4)
            .map(|chunk| {
                let mut row = [None; 4];
                for (slot, entry) in row.iter_mut().zip(chunk) {
                    *slot = Some(entry);
                }
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(auction: &Auction) -> Vec<&str> {
        auction.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_passes_inferred_before_first_bidder() {
        let auction = Auction::from_path(Seat::South, [(Seat::North, "1C")]);
        assert_eq!(labels(&auction), vec!["Pass", "Pass", "1C"]);
        assert!(auction.entries[0].inferred);
        assert_eq!(auction.entries[1].seat, Seat::West);
        assert!(!auction.entries[2].inferred);
    }

    #[test]
    fn test_uncontested_sequence_fills_opponent_passes() {
        let auction = Auction::from_path(
            Seat::South,
            [(Seat::South, "1H"), (Seat::North, "2C"), (Seat::South, "2H")],
        );
        assert_eq!(
            labels(&auction),
            vec!["1H", "Pass", "2C", "Pass", "2H"]
        );
        let rows = auction.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][3].map(|e| e.seat), Some(Seat::East));
        assert_eq!(rows[1][0].map(|e| e.label.as_str()), Some("2H"));
        assert!(rows[1][1].is_none());
    }

    #[test]
    fn test_same_seat_twice_wraps_round() {
        let auction = Auction::from_path(Seat::South, [(Seat::South, "1C"), (Seat::South, "note")]);
        assert_eq!(labels(&auction), vec!["1C", "Pass", "Pass", "Pass", "note"]);
        assert_eq!(auction.current_seat(), Seat::West);
    }

    #[test]
    fn test_seats_start_with_dealer() {
        let auction = Auction::new(Seat::South);
        assert_eq!(auction.seats(), Seat::TABLE_ORDER);
    }
}
