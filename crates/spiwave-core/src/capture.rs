use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub struct CaptureEntry {
    pub timestamp_ms: u64,
    pub direction: Direction,
    pub data: Vec<u8>,
}

/// Line the bytes were seen on, from the controller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Mosi,
    Miso,
}

impl Direction {
    fn label(&self) -> &'static str {
        match self {
            Direction::Mosi => "MOSI: ",
            Direction::Miso => "MISO: ",
        }
    }
}

/// Bounded record of the traffic on a simulated bus. Oldest entries are
/// evicted once `max_entries` is exceeded.
#[derive(Debug, Clone)]
pub struct CaptureStore {
    entries: VecDeque<CaptureEntry>,
    max_entries: usize,
    show_mosi: bool,
    show_miso: bool,
}

impl CaptureStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
            show_mosi: true,
            show_miso: true,
        }
    }

    pub fn set_filter(&mut self, show_mosi: bool, show_miso: bool) {
        self.show_mosi = show_mosi;
        self.show_miso = show_miso;
    }

    pub fn push(&mut self, direction: Direction, data: Vec<u8>) {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        self.entries.push_back(CaptureEntry {
            timestamp_ms,
            direction,
            data,
        });

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &CaptureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn is_visible(&self, direction: Direction) -> bool {
        match direction {
            Direction::Mosi => self.show_mosi,
            Direction::Miso => self.show_miso,
        }
    }

    /// Hex dump of the visible entries, one line per entry.
    pub fn to_text(&self, show_timestamp: bool) -> String {
        let mut result = String::new();
        for entry in &self.entries {
            if !self.is_visible(entry.direction) {
                continue;
            }

            if show_timestamp {
                let millis = entry.timestamp_ms % 1000;
                let secs = entry.timestamp_ms / 1000;
                let hours = (secs / 3600) % 24;
                let minutes = (secs / 60) % 60;
                let seconds = secs % 60;
                result.push_str(&format!("[{hours:02}:{minutes:02}:{seconds:02}.{millis:03}] "));
            }
            result.push_str(entry.direction.label());
            let bytes: Vec<String> = entry.data.iter().map(|b| format!("{b:02X}")).collect();
            result.push_str(&bytes.join(" "));
            result.push('\n');
        }
        result
    }
}
