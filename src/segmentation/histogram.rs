//! Gaussian-smoothed intensity histogram supplying the regional
//! (log-likelihood) cost terms.

use error_stack::{Report, Result};

use crate::error::Error;

const BINS: usize = 256;
const SIGMA: f64 = 10.0;
const KERNEL_SCALE: f64 = 1000.0;

/// A per-bin floor added after the Gaussian kernels are summed.
///
/// Each seed's contribution to a bin is floored before the bins are
/// summed, so a bin more than roughly three kernel widths (`~30` intensity
/// units at `SIGMA = 10`) from every seed floors to exactly zero. Left
/// alone, that zero makes [`IntensityHistogram::neg_log_likelihood`]
/// diverge to infinity for any query intensity far from every seed of that
/// class, which in turn lets a single t-link capacity dominate an entire
/// segmentation network regardless of the true regional and boundary costs.
/// A one-count pseudocount on every bin keeps the histogram strictly
/// positive whenever the seed set is non-empty, which is the contract this
/// histogram is meant to provide.
const PSEUDOCOUNT: i64 = 1;

/// A 256-bin Parzen-window-smoothed histogram over a set of seed pixel
/// intensities.
///
/// Each seed contributes a Gaussian kernel centered on its own intensity to
/// every bin, rather than a single unit count to its own bin, so nearby
/// intensities borrow statistical weight from seeds that did not land on
/// them exactly.
#[derive(Debug, Clone)]
pub struct IntensityHistogram {
    bins: [i64; BINS],
    total: i64,
}

impl IntensityHistogram {
    /// Builds the histogram from a non-empty slice of seed intensities.
    /// Fails with [`Error::EmptySeeds`] if `intensities` is empty.
    pub fn build(intensities: &[u8]) -> Result<Self, Error> {
        if intensities.is_empty() {
            return Err(Report::new(Error::EmptySeeds));
        }
        let mut bins = [0i64; BINS];
        for &intensity in intensities {
            for (k, bin) in bins.iter_mut().enumerate() {
                let distance = k as f64 - f64::from(intensity);
                *bin += (KERNEL_SCALE * gaussian_pdf(distance)).floor() as i64;
            }
        }
        for bin in bins.iter_mut() {
            *bin += PSEUDOCOUNT;
        }
        let total = bins.iter().sum();
        Ok(Self { bins, total })
    }

    /// `T`, the cached sum of all bins.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// The raw smoothed count at bin `intensity`.
    pub fn bin(&self, intensity: u8) -> i64 {
        self.bins[intensity as usize]
    }

    /// `-( ln(hist[intensity]) - ln(total) )`, the regional log-likelihood
    /// cost used as a t-link capacity.
    ///
    /// Always finite: every bin carries at least [`PSEUDOCOUNT`], so `ln`
    /// never sees a zero argument. A query intensity far from every seed of
    /// this class still gets a large cost (the pixel matches this regional
    /// model poorly), but a bounded one, so it can be outweighed by a
    /// sufficiently strong boundary term instead of unconditionally
    /// dominating the network.
    pub fn neg_log_likelihood(&self, intensity: u8) -> f64 {
        -((self.bins[intensity as usize] as f64).ln() - (self.total as f64).ln())
    }
}

/// The Gaussian probability density with `mu = 0`, `sigma = SIGMA`.
fn gaussian_pdf(x: f64) -> f64 {
    let coefficient = 1.0 / (SIGMA * (2.0 * std::f64::consts::PI).sqrt());
    coefficient * (-(x * x) / (2.0 * SIGMA * SIGMA)).exp()
}
