/// Fire-and-forget seam to the chat collaborator. The room posts
/// system-style lines ("a player exploded") and never awaits or reads
/// anything back; implementations forward to wherever chat actually
/// lives.
pub trait Notices: Send {
    fn system(&self, text: &str);
}

/// Swallows every notice, for rooms with no chat wired up.
#[derive(Debug, Default)]
pub struct NoNotices;

impl Notices for NoNotices {
    fn system(&self, _: &str) {}
}
