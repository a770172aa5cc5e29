/// Orders fetch responses by issue sequence.
///
/// Every request takes a number from [`SequenceGate::issue`]; a response is
/// applied only if its number is newer than the last applied one, so a slow
/// response can never overwrite a fresher view.
#[derive(Debug, Default, Clone)]
pub struct SequenceGate {
    next: u64,
    last_applied: Option<u64>,
}

impl SequenceGate {
    /// Create a gate with nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next sequence number for an outgoing request.
    pub fn issue(&mut self) -> u64 {
        let seq = self.next;
        self.next += 1;
        seq
    }

    /// Record `seq` as applied if it is newer than everything applied so far.
    ///
    /// Returns false, leaving the gate unchanged, for stale responses.
    pub fn accept(&mut self, seq: u64) -> bool {
        match self.last_applied {
            Some(last) if seq <= last => false,
            _ => {
                self.last_applied = Some(seq);
                true
            }
        }
    }

    /// Newest applied sequence number.
    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }
}
