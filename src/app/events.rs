#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started,
    Paused,
    Position { seconds: f64 },
    Duration { seconds: f64 },
    Ended,
}
