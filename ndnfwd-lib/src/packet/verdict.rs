/// Forwarding decision returned to the capture layer, one per frame.
///
/// The discriminants mirror the XDP action constants named in the
/// boundary contract (`PASS = 2`, `DROP = 1`, `REDIRECT = 4`); this crate
/// does not load an XDP program, so the numbers are a wire-compatible
/// convention, not a requirement of this implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Drop,
    Pass,
    Redirect(u32),
}

impl Verdict {
    /// The boundary-contract integer code, ignoring any redirect target.
    pub fn code(self) -> u32 {
        match self {
            Verdict::Drop => 1,
            Verdict::Pass => 2,
            Verdict::Redirect(_) => 4,
        }
    }
}
