#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| response             | one-pole      | mode bank          |
| -------------------- | ------------- | ------------------ |
| low-pass             | lp            | lp                 |
| band-pass            | 0 (no tap)    | bp                 |
| band-pass normalized | 0 (no tap)    | 0 (reserved)       |
| high-pass            | x - lp        | 0 (reserved)       |

Filters are generic over a zero-sized response type instead of taking the
enum at run time, so the tap selection is resolved when the filter loop is
monomorphized and the per-sample loop carries no branch for it.
*/

/// Filter response, as a plain value for configuration code.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    LowPass,
    BandPass,
    BandPassNormalized,
    HighPass,
}

/// Type-level filter response.
pub trait Response {
    const MODE: FilterMode;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LowPass;

#[derive(Debug, Clone, Copy, Default)]
pub struct BandPass;

#[derive(Debug, Clone, Copy, Default)]
pub struct BandPassNormalized;

#[derive(Debug, Clone, Copy, Default)]
pub struct HighPass;

impl Response for LowPass {
    const MODE: FilterMode = FilterMode::LowPass;
}

impl Response for BandPass {
    const MODE: FilterMode = FilterMode::BandPass;
}

impl Response for BandPassNormalized {
    const MODE: FilterMode = FilterMode::BandPassNormalized;
}

impl Response for HighPass {
    const MODE: FilterMode = FilterMode::HighPass;
}
