use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::Serialize;

/// One arrival/departure pair. `departure == None` means the block is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StampBlock {
    pub arrival: NaiveTime,
    pub departure: Option<NaiveTime>,
}

impl StampBlock {
    pub fn open(arrival: NaiveTime) -> Self {
        Self {
            arrival,
            departure: None,
        }
    }

    pub fn closed(arrival: NaiveTime, departure: NaiveTime) -> Self {
        Self {
            arrival,
            departure: Some(departure),
        }
    }

    pub fn is_open(&self) -> bool {
        self.departure.is_none()
    }

    pub fn arrival_str(&self) -> String {
        self.arrival.format("%H:%M").to_string()
    }

    pub fn departure_str(&self) -> String {
        self.departure
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// Ordered stamp blocks of a single day.
///
/// Invariants held by every constructor and mutator:
/// - only the last block may be open
/// - a closed block never departs before it arrives
/// - blocks do not overlap and are ordered by arrival
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StampSequence {
    blocks: Vec<StampBlock>,
}

impl StampSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a sequence from persisted blocks, rejecting anything that
    /// breaks the ordering invariants (e.g. a hand-edited database).
    pub fn from_blocks(blocks: Vec<StampBlock>) -> AppResult<Self> {
        let mut seq = Self::new();
        for (idx, block) in blocks.into_iter().enumerate() {
            seq.append_arrival(block.arrival).map_err(|e| {
                AppError::Validation(format!("Stamp block {} is out of order: {}", idx + 1, e))
            })?;
            if let Some(dep) = block.departure {
                seq.close_last_block(dep).map_err(|e| {
                    AppError::Validation(format!("Stamp block {} is invalid: {}", idx + 1, e))
                })?;
            }
        }
        Ok(seq)
    }

    pub fn blocks(&self) -> &[StampBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// True when the last block has no departure yet.
    pub fn is_open(&self) -> bool {
        self.blocks.last().is_some_and(StampBlock::is_open)
    }

    pub fn open_block(&self) -> Option<&StampBlock> {
        self.blocks.last().filter(|b| b.is_open())
    }

    /// Open a new block at `time` (clock-in).
    pub fn append_arrival(&mut self, time: NaiveTime) -> AppResult<()> {
        if let Some(last) = self.blocks.last() {
            match last.departure {
                None => {
                    return Err(AppError::InvalidState(format!(
                        "Already clocked in since {}: clock out first.",
                        last.arrival_str()
                    )));
                }
                Some(dep) if time < dep => {
                    return Err(AppError::InvalidState(format!(
                        "Clock-in at {} is before the previous clock-out at {}.",
                        time.format("%H:%M"),
                        dep.format("%H:%M")
                    )));
                }
                Some(_) => {}
            }
        }

        self.blocks.push(StampBlock::open(time));
        Ok(())
    }

    /// Close the open block at `time` (clock-out).
    pub fn close_last_block(&mut self, time: NaiveTime) -> AppResult<()> {
        let last = self
            .blocks
            .last_mut()
            .filter(|b| b.is_open())
            .ok_or_else(|| {
                AppError::InvalidState("No open entry found: clock in first.".to_string())
            })?;

        if time < last.arrival {
            return Err(AppError::InvalidState(format!(
                "Clock-out at {} is before the clock-in at {}.",
                time.format("%H:%M"),
                last.arrival_str()
            )));
        }

        last.departure = Some(time);
        Ok(())
    }
}
