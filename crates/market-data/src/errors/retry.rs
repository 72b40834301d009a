/// Classification for retry policy.
///
/// The dashboard never retries on its own schedule; this classification is
/// reported in logs so operators can tell transient outages from bad input.
///
/// | Class | Meaning |
/// |-------|---------|
/// | `Never` | The vendor answered, the answer is unusable |
/// | `WithBackoff` | Rate limit, timeout, or connection failure |
/// | `NextProvider` | The vendor reported an error of its own |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - the payload is malformed and retrying won't help.
    Never,

    /// Transient error; retrying later is expected to succeed.
    WithBackoff,

    /// The vendor failed this request; a different vendor might not.
    NextProvider,
}
